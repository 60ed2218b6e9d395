use regex::Regex;

use crate::error::Error;
use crate::index::TrueIndex;
use crate::xmlvalue::{Content, Element, Item};

/// A (tag, value) pair to look for among the children of an element.
///
/// Used by [`Element::matches_all`] and
/// [`DocumentTree::find_element_with_all`](crate::DocumentTree::find_element_with_all).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchProperty {
    pub tag: String,
    pub value: String,
}

impl SearchProperty {
    pub fn new<T: Into<String>, V: Into<String>>(tag: T, value: V) -> Self {
        SearchProperty {
            tag: tag.into(),
            value: value.into(),
        }
    }
}

impl<T: Into<String>, V: Into<String>> From<(T, V)> for SearchProperty {
    fn from((tag, value): (T, V)) -> Self {
        SearchProperty::new(tag, value)
    }
}

/// ## Navigation and search
///
/// Unless noted otherwise these look at direct children only. Not finding
/// anything is reported as `None` or `false`, never as an error.
impl Element {
    /// Iterator over the element children.
    pub fn elements(&self) -> impl Iterator<Item = &Element> + '_ {
        self.content.elements()
    }

    /// Mutable iterator over the element children.
    pub fn elements_mut(&mut self) -> impl Iterator<Item = &mut Element> + '_ {
        self.content.elements_mut()
    }

    /// Iterator over the element children paired with their true index.
    pub fn elements_with_true_index(&self) -> impl Iterator<Item = (TrueIndex, &Element)> + '_ {
        self.content.elements_with_true_index()
    }

    /// The first child with this tag.
    ///
    /// ```rust
    /// use xmledit::{Element, Item};
    ///
    /// let config = Element::with_content("Config", vec![
    ///     Item::comment("speed in m/s"),
    ///     Item::Element(Element::with_value("Speed", "10")),
    /// ]);
    /// assert_eq!(config.child("Speed").unwrap().value(), Some("10"));
    /// assert!(config.child("Mass").is_none());
    /// ```
    pub fn child(&self, tag: &str) -> Option<&Element> {
        self.elements().find(|e| e.name == tag)
    }

    /// Mutable access to the first child with this tag.
    pub fn child_mut(&mut self, tag: &str) -> Option<&mut Element> {
        self.elements_mut().find(|e| e.name == tag)
    }

    pub(crate) fn required_child(&self, tag: &str) -> Result<&Element, Error> {
        self.child(tag).ok_or_else(|| self.missing(tag))
    }

    pub(crate) fn required_child_mut(&mut self, tag: &str) -> Result<&mut Element, Error> {
        let missing = self.missing(tag);
        self.child_mut(tag).ok_or(missing)
    }

    pub(crate) fn missing(&self, tag: &str) -> Error {
        Error::NotFound(format!("child {} in {}", tag, self.name))
    }

    /// The true index of the first child with this tag.
    pub fn child_index(&self, tag: &str) -> Option<TrueIndex> {
        self.elements_with_true_index()
            .find(|(_, e)| e.name == tag)
            .map(|(index, _)| index)
    }

    /// The true index of the first child element, whatever its tag.
    pub fn first_element_true_index(&self) -> Option<TrueIndex> {
        self.elements_with_true_index()
            .next()
            .map(|(index, _)| index)
    }

    /// True if this element has this tag and its text value equals `value`.
    pub fn matches(&self, tag: &str, value: &str) -> bool {
        self.name == tag && self.value() == Some(value)
    }

    /// True if every property is matched by some direct child.
    pub fn matches_all(&self, properties: &[SearchProperty]) -> bool {
        properties
            .iter()
            .all(|p| self.has_child_with_value(&p.tag, &p.value))
    }

    /// Children whose tag matches the regular expression.
    pub fn matching<'a>(&'a self, pattern: &'a Regex) -> impl Iterator<Item = &'a Element> + 'a {
        self.elements().filter(move |e| pattern.is_match(&e.name))
    }

    /// The first child with this tag whose text value equals `value`.
    pub fn child_with_value(&self, tag: &str, value: &str) -> Option<&Element> {
        self.elements().find(|e| e.matches(tag, value))
    }

    /// The first child with this tag whose text value is one of `values`.
    pub fn child_with_value_one_of(&self, tag: &str, values: &[&str]) -> Option<&Element> {
        self.elements()
            .find(|e| e.name == tag && e.value().map_or(false, |v| values.contains(&v)))
    }

    pub fn has_child_with_value(&self, tag: &str, value: &str) -> bool {
        self.child_with_value(tag, value).is_some()
    }

    pub fn has_child_with_value_one_of(&self, tag: &str, values: &[&str]) -> bool {
        self.child_with_value_one_of(tag, values).is_some()
    }

    /// True if some child with this tag has a text value starting with `prefix`.
    pub fn has_prefix(&self, tag: &str, prefix: &str) -> bool {
        self.elements()
            .any(|e| e.name == tag && e.value_starts_with(prefix))
    }

    /// True if some child with this tag has a text value ending with `suffix`.
    pub fn has_suffix(&self, tag: &str, suffix: &str) -> bool {
        self.elements()
            .any(|e| e.name == tag && e.value_ends_with(suffix))
    }

    /// Find the nearest element that owns a direct child matching `tag` and
    /// `value`, starting with this element.
    ///
    /// This element's own children are checked first. Only if none of them
    /// match does the search descend, depth-first, into each child in order.
    ///
    /// ```rust
    /// use xmledit::{Element, Item};
    ///
    /// let b = Element::with_content("B", Element::with_value("Name", "Other"));
    /// let a = Element::with_content("A", vec![
    ///     Item::Element(Element::with_value("Name", "Target")),
    ///     Item::Element(b),
    /// ]);
    /// let root = Element::with_content("Root", a);
    ///
    /// assert_eq!(root.find_recurse("Name", "Target").unwrap().name(), "A");
    /// assert_eq!(root.find_recurse("Name", "Other").unwrap().name(), "B");
    /// assert!(root.find_recurse("Name", "Nothing").is_none());
    /// ```
    pub fn find_recurse(&self, tag: &str, value: &str) -> Option<&Element> {
        if self.has_child_with_value(tag, value) {
            return Some(self);
        }
        self.elements()
            .find_map(|child| child.find_recurse(tag, value))
    }

    /// Mutable version of [`Element::find_recurse`].
    pub fn find_recurse_mut(&mut self, tag: &str, value: &str) -> Option<&mut Element> {
        if self.has_child_with_value(tag, value) {
            return Some(self);
        }
        self.elements_mut()
            .find_map(|child| child.find_recurse_mut(tag, value))
    }

    /// Call `visit` on each child element in order, stopping at the first
    /// error.
    pub fn visit_children<F, E>(&self, mut visit: F) -> Result<(), E>
    where
        F: FnMut(&Element) -> Result<(), E>,
    {
        for child in self.elements() {
            visit(child)?;
        }
        Ok(())
    }

    /// Call `visit` on each child element in order with mutable access,
    /// stopping at the first error.
    pub fn visit_children_mut<F, E>(&mut self, mut visit: F) -> Result<(), E>
    where
        F: FnMut(&mut Element) -> Result<(), E>,
    {
        for child in self.elements_mut() {
            visit(child)?;
        }
        Ok(())
    }

    /// True if this element has the given name.
    pub fn is(&self, kind: &str) -> bool {
        self.name == kind
    }

    /// Require this element to have the given name.
    pub fn must_be(&self, kind: &str) -> Result<(), Error> {
        if self.is(kind) {
            Ok(())
        } else {
            Err(Error::TypeMismatch {
                expected: kind.to_string(),
                found: self.name.clone(),
            })
        }
    }

    /// True if this element holds nothing but text, or nothing at all.
    pub fn is_leaf(&self) -> bool {
        match &self.content {
            Content::Empty | Content::Text(_) => true,
            Content::SingleElement(_) => false,
            Content::Sequence(items) => !items.iter().any(Item::is_element),
        }
    }
}
