use tracing::info;

use crate::error::Error;
use crate::index::{FilteredIndex, TrueIndex};
use crate::sequence;
use crate::xmlvalue::{Content, ContentKind, Element, Item, ProcessingInstruction};

/// ## Read-only access
///
/// `Content` has two index spaces. The element-only view returned by
/// [`Content::elements`] is addressed by [`FilteredIndex`]; the full sequence,
/// including comments, directives and the like, is addressed by
/// [`TrueIndex`]. Index-taking mutations only accept a [`TrueIndex`].
impl Content {
    /// The shape of this content.
    pub fn kind(&self) -> ContentKind {
        match self {
            Content::Empty => ContentKind::Empty,
            Content::Text(_) => ContentKind::Text,
            Content::SingleElement(_) => ContentKind::SingleElement,
            Content::Sequence(_) => ContentKind::Sequence,
        }
    }

    /// The length of the true sequence.
    ///
    /// Empty and text content have no items; a single element counts as one.
    pub fn len(&self) -> usize {
        match self {
            Content::Empty | Content::Text(_) => 0,
            Content::SingleElement(_) => 1,
            Content::Sequence(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The text, if this content is text.
    pub fn text(&self) -> Option<&str> {
        if let Content::Text(text) = self {
            Some(text)
        } else {
            None
        }
    }

    /// The items of a sequence, if this content is one.
    pub fn items(&self) -> Option<&[Item]> {
        if let Content::Sequence(items) = self {
            Some(items)
        } else {
            None
        }
    }

    /// Iterator over the element children, skipping everything else.
    ///
    /// The positions in this iterator are *not* true indexes; don't feed
    /// them to index-taking mutations.
    ///
    /// ```rust
    /// use xmledit::{Content, Element, Item};
    ///
    /// let content = Content::from(vec![
    ///     Item::comment("c1"),
    ///     Item::Element(Element::new("a")),
    ///     Item::Element(Element::new("b")),
    /// ]);
    /// let names = content.elements().map(|e| e.name()).collect::<Vec<_>>();
    /// assert_eq!(names, vec!["a", "b"]);
    /// ```
    pub fn elements(&self) -> impl Iterator<Item = &Element> + '_ {
        let (single, items): (Option<&Element>, &[Item]) = match self {
            Content::SingleElement(element) => (Some(&**element), &[]),
            Content::Sequence(items) => (None, items),
            Content::Empty | Content::Text(_) => (None, &[]),
        };
        single
            .into_iter()
            .chain(items.iter().filter_map(Item::as_element))
    }

    /// Mutable iterator over the element children.
    pub fn elements_mut(&mut self) -> impl Iterator<Item = &mut Element> + '_ {
        let (single, items): (Option<&mut Element>, &mut [Item]) = match self {
            Content::SingleElement(element) => (Some(&mut **element), &mut []),
            Content::Sequence(items) => (None, items),
            Content::Empty | Content::Text(_) => (None, &mut []),
        };
        single
            .into_iter()
            .chain(items.iter_mut().filter_map(Item::as_element_mut))
    }

    /// Iterator over the element children paired with their true index.
    ///
    /// This is the sanctioned source of indexes for
    /// [`Content::insert_at`], [`Content::remove_span`] and [`Content::reorder`].
    ///
    /// ```rust
    /// use xmledit::{Content, Element, Item, TrueIndex};
    ///
    /// let content = Content::from(vec![
    ///     Item::comment("c1"),
    ///     Item::Element(Element::new("a")),
    /// ]);
    /// let (index, element) = content.elements_with_true_index().next().unwrap();
    /// assert_eq!(index, TrueIndex::new(1));
    /// assert_eq!(element.name(), "a");
    /// ```
    pub fn elements_with_true_index(&self) -> impl Iterator<Item = (TrueIndex, &Element)> + '_ {
        let (single, items): (Option<&Element>, &[Item]) = match self {
            Content::SingleElement(element) => (Some(&**element), &[]),
            Content::Sequence(items) => (None, items),
            Content::Empty | Content::Text(_) => (None, &[]),
        };
        single
            .into_iter()
            .map(|element| (TrueIndex::new(0), element))
            .chain(items.iter().enumerate().filter_map(|(i, item)| {
                item.as_element()
                    .map(|element| (TrueIndex::new(i), element))
            }))
    }

    /// The element at a position of the element-only view.
    pub fn element_at(&self, index: FilteredIndex) -> Option<&Element> {
        self.elements().nth(index.get())
    }

    /// Translate a position of the element-only view into a true index.
    pub fn true_index_of(&self, index: FilteredIndex) -> Option<TrueIndex> {
        self.elements_with_true_index()
            .nth(index.get())
            .map(|(true_index, _)| true_index)
    }

    /// The element at a true index, if that position holds an element.
    pub fn element_at_true_index(&self, index: TrueIndex) -> Option<&Element> {
        match self {
            Content::SingleElement(element) if index.get() == 0 => Some(&**element),
            Content::Sequence(items) => items.get(index.get()).and_then(Item::as_element),
            _ => None,
        }
    }

    /// Mutable access to the element at a true index.
    pub fn element_at_true_index_mut(&mut self, index: TrueIndex) -> Option<&mut Element> {
        match self {
            Content::SingleElement(element) if index.get() == 0 => Some(&mut **element),
            Content::Sequence(items) => items
                .get_mut(index.get())
                .and_then(Item::as_element_mut),
            _ => None,
        }
    }
}

/// ## Mutation
///
/// A failed mutation leaves the content exactly as it was.
impl Content {
    /// Replace the content wholesale.
    pub fn set_contents(&mut self, contents: impl Into<Content>) {
        *self = contents.into();
    }

    /// Append items.
    ///
    /// A single element is first promoted to a sequence holding it. Any
    /// other shape than single element or sequence is an error.
    ///
    /// The items are moved in; clone an element first if you need to keep
    /// the original.
    pub fn append<I>(&mut self, items: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = Item>,
    {
        match std::mem::take(self) {
            Content::SingleElement(element) => {
                let mut sequence = vec![Item::Element(*element)];
                sequence.extend(items);
                *self = Content::Sequence(sequence);
                Ok(())
            }
            Content::Sequence(mut sequence) => {
                sequence.extend(items);
                *self = Content::Sequence(sequence);
                Ok(())
            }
            other => {
                let found = other.kind();
                *self = other;
                Err(Error::InvalidContentType {
                    operation: "append to",
                    found,
                })
            }
        }
    }

    /// Keep the first `count` elements and every non-element item, in their
    /// original order.
    ///
    /// ```rust
    /// use xmledit::{Content, Element, Item};
    ///
    /// let mut content = Content::from(vec![
    ///     Item::comment("before"),
    ///     Item::Element(Element::new("a")),
    ///     Item::Element(Element::new("b")),
    ///     Item::comment("after"),
    /// ]);
    /// content.truncate(1).unwrap();
    /// assert_eq!(content.len(), 3);
    /// assert_eq!(content.elements().count(), 1);
    /// ```
    pub fn truncate(&mut self, count: usize) -> Result<(), Error> {
        let items = self.sequence_mut("truncate")?;
        let mut kept = 0;
        items.retain(|item| {
            if !item.is_element() {
                return true;
            }
            if kept < count {
                kept += 1;
                true
            } else {
                false
            }
        });
        Ok(())
    }

    /// Insert an item at a true index.
    pub fn insert_at(&mut self, index: TrueIndex, item: impl Into<Item>) -> Result<(), Error> {
        let items = self.sequence_mut("insert into")?;
        sequence::insert_at(items, index.get(), item.into())
    }

    /// Insert a deep copy of the item at `source` so that it ends up at
    /// `index`. Both are true indexes into the sequence before insertion.
    pub fn insert_copy_of(&mut self, index: TrueIndex, source: TrueIndex) -> Result<(), Error> {
        let items = self.sequence_mut("insert into")?;
        let copy = items
            .get(source.get())
            .cloned()
            .ok_or(Error::IndexOutOfRange {
                index: source.get(),
                count: 1,
                len: items.len(),
            })?;
        sequence::insert_at(items, index.get(), copy)
    }

    /// Remove `count` items starting at a true index, returning them.
    ///
    /// A count of zero is a no-op, but the start is still bounds-checked.
    pub fn remove_span(&mut self, start: TrueIndex, count: usize) -> Result<Vec<Item>, Error> {
        let items = self.sequence_mut("remove from")?;
        sequence::remove_span(items, start.get(), count)
    }

    /// Move the item at `from` so that it ends up at `to`.
    ///
    /// The item itself is moved, not copied.
    pub fn reorder(&mut self, from: TrueIndex, to: TrueIndex) -> Result<(), Error> {
        let items = self.sequence_mut("reorder")?;
        sequence::move_item(items, from.get(), to.get())
    }

    /// Make sure there are exactly `count` elements.
    ///
    /// Missing elements are deep copies of the first element, appended at
    /// the end. Surplus elements are dropped with [`Content::truncate`].
    pub fn set_element_count_by_copying_first_element(
        &mut self,
        count: usize,
    ) -> Result<(), Error> {
        let current = self.elements().count();
        let first = self
            .elements()
            .next()
            .cloned()
            .ok_or_else(|| Error::NotFound("an element to copy".to_string()))?;
        if current < count {
            info!("extending by {} elements", count - current);
            self.append((current..count).map(|_| Item::Element(first.clone())))?;
        } else if current > count {
            info!("truncating by {} elements", current - count);
            self.truncate(count)?;
        }
        Ok(())
    }

    fn sequence_mut(&mut self, operation: &'static str) -> Result<&mut Vec<Item>, Error> {
        match self {
            Content::Sequence(items) => Ok(items),
            other => Err(Error::InvalidContentType {
                operation,
                found: other.kind(),
            }),
        }
    }
}

impl From<String> for Content {
    fn from(text: String) -> Self {
        Content::Text(text)
    }
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Content::Text(text.to_string())
    }
}

impl From<Element> for Content {
    fn from(element: Element) -> Self {
        Content::SingleElement(Box::new(element))
    }
}

impl From<Vec<Item>> for Content {
    fn from(items: Vec<Item>) -> Self {
        Content::Sequence(items)
    }
}

impl From<ProcessingInstruction> for Content {
    fn from(pi: ProcessingInstruction) -> Self {
        Content::Sequence(vec![Item::ProcessingInstruction(pi)])
    }
}

impl From<Item> for Content {
    fn from(item: Item) -> Self {
        match item {
            Item::Element(element) => Content::SingleElement(Box::new(element)),
            Item::Text(text) => Content::Text(text),
            other => Content::Sequence(vec![other]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn el(name: &str) -> Item {
        Item::Element(Element::new(name))
    }

    fn names(content: &Content) -> Vec<String> {
        match content {
            Content::Sequence(items) => items
                .iter()
                .map(|item| match item {
                    Item::Element(e) => e.name().to_string(),
                    Item::Comment(c) => format!("#{}", c),
                    Item::Directive(d) => format!("!{}", d),
                    Item::ProcessingInstruction(pi) => format!("?{}", pi.target()),
                    Item::Text(t) => format!("'{}'", t),
                })
                .collect(),
            Content::SingleElement(e) => vec![e.name().to_string()],
            _ => vec![],
        }
    }

    #[test]
    fn test_elements_of_empty_and_text() {
        assert_eq!(Content::Empty.elements().count(), 0);
        assert_eq!(Content::from("x").elements().count(), 0);
        assert_eq!(Content::from("x").elements_with_true_index().count(), 0);
    }

    #[test]
    fn test_elements_single() {
        let content = Content::from(Element::new("a"));
        let pairs = content.elements_with_true_index().collect::<Vec<_>>();
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].0, TrueIndex::new(0));
    }

    #[test]
    fn test_true_index_of() {
        let content = Content::from(vec![
            Item::comment("c"),
            el("a"),
            Item::directive("d"),
            el("b"),
        ]);
        assert_eq!(
            content.true_index_of(FilteredIndex::new(1)),
            Some(TrueIndex::new(3))
        );
        assert_eq!(content.true_index_of(FilteredIndex::new(2)), None);
        assert_eq!(
            content.element_at(FilteredIndex::new(1)).map(|e| e.name()),
            Some("b")
        );
        assert!(content.element_at_true_index(TrueIndex::new(2)).is_none());
    }

    #[test]
    fn test_append_promotes_single_element() {
        let mut content = Content::from(Element::new("a"));
        content.append(vec![el("b")]).unwrap();
        assert_eq!(names(&content), vec!["a", "b"]);
    }

    #[test]
    fn test_append_to_text_fails_unchanged() {
        let mut content = Content::from("10");
        let err = content.append(vec![el("b")]).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidContentType {
                found: ContentKind::Text,
                ..
            }
        ));
        assert_eq!(content, Content::from("10"));
    }

    #[test]
    fn test_append_to_empty_fails() {
        let mut content = Content::Empty;
        assert!(content.append(vec![el("b")]).is_err());
        assert_eq!(content, Content::Empty);
    }

    #[test]
    fn test_truncate_keeps_non_elements() {
        let mut content = Content::from(vec![
            Item::comment("c1"),
            el("a"),
            el("b"),
            Item::comment("c2"),
        ]);
        content.truncate(1).unwrap();
        assert_eq!(names(&content), vec!["#c1", "a", "#c2"]);
    }

    #[test]
    fn test_truncate_single_element_fails() {
        let mut content = Content::from(Element::new("a"));
        assert!(content.truncate(0).is_err());
    }

    #[test]
    fn test_insert_at() {
        let mut content = Content::from(vec![Item::comment("c"), el("a")]);
        content
            .insert_at(TrueIndex::new(1), Element::new("b"))
            .unwrap();
        assert_eq!(names(&content), vec!["#c", "b", "a"]);
    }

    #[test]
    fn test_insert_at_out_of_range() {
        let mut content = Content::from(vec![el("a")]);
        let err = content
            .insert_at(TrueIndex::new(5), Element::new("b"))
            .unwrap_err();
        assert!(matches!(err, Error::IndexOutOfRange { index: 5, .. }));
        assert_eq!(names(&content), vec!["a"]);
    }

    #[test]
    fn test_insert_copy_of_is_deep() {
        let mut content = Content::from(vec![Item::Element(Element::with_value("a", "1"))]);
        content
            .insert_copy_of(TrueIndex::new(1), TrueIndex::new(0))
            .unwrap();
        content
            .element_at_true_index_mut(TrueIndex::new(1))
            .unwrap()
            .set_value("2");
        let values = content
            .elements()
            .map(|e| e.value_or_empty().to_string())
            .collect::<Vec<_>>();
        assert_eq!(values, vec!["1", "2"]);
    }

    #[test]
    fn test_remove_span() {
        let mut content = Content::from(vec![el("a"), Item::comment("c"), el("b")]);
        let removed = content.remove_span(TrueIndex::new(0), 2).unwrap();
        assert_eq!(removed.len(), 2);
        assert_eq!(names(&content), vec!["b"]);
    }

    #[test]
    fn test_remove_span_out_of_range() {
        let mut content = Content::from(vec![el("a")]);
        assert!(matches!(
            content.remove_span(TrueIndex::new(0), 2),
            Err(Error::IndexOutOfRange { .. })
        ));
        assert_eq!(names(&content), vec!["a"]);
    }

    #[test]
    fn test_remove_span_on_single_element_fails() {
        let mut content = Content::from(Element::new("a"));
        assert!(matches!(
            content.remove_span(TrueIndex::new(0), 1),
            Err(Error::InvalidContentType { .. })
        ));
    }

    #[test]
    fn test_reorder() {
        let mut content = Content::from(vec![el("x"), el("y"), el("z")]);
        content
            .reorder(TrueIndex::new(2), TrueIndex::new(0))
            .unwrap();
        assert_eq!(names(&content), vec!["z", "x", "y"]);
    }

    #[test]
    fn test_reorder_same_is_noop() {
        let mut content = Content::from(vec![el("x"), el("y")]);
        content
            .reorder(TrueIndex::new(1), TrueIndex::new(1))
            .unwrap();
        assert_eq!(names(&content), vec!["x", "y"]);
    }

    #[test]
    fn test_set_element_count_extends() {
        let mut content = Content::from(vec![Item::comment("c"), el("a")]);
        content.set_element_count_by_copying_first_element(3).unwrap();
        assert_eq!(names(&content), vec!["#c", "a", "a", "a"]);
    }

    #[test]
    fn test_set_element_count_truncates() {
        let mut content = Content::from(vec![el("a"), el("b"), Item::comment("c")]);
        content.set_element_count_by_copying_first_element(1).unwrap();
        assert_eq!(names(&content), vec!["a", "#c"]);
    }

    #[test]
    fn test_set_element_count_without_elements() {
        let mut content = Content::from(vec![Item::comment("c")]);
        assert!(matches!(
            content.set_element_count_by_copying_first_element(2),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn test_from_item() {
        assert_eq!(Content::from(Item::text("t")), Content::Text("t".to_string()));
        assert_eq!(Content::from(Item::comment("c")).kind(), ContentKind::Sequence);
        assert_eq!(
            Content::from(Item::Element(Element::new("a"))).kind(),
            ContentKind::SingleElement
        );
    }
}
