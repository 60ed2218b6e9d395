use crate::error::Error;
use crate::index::TrueIndex;
use crate::valueaccess::Scalar;
use crate::xmlvalue::{Content, Element, Item};

/// ## Manipulation of children
///
/// These wrap the [`Content`](crate::Content) mutations and add find-or-create
/// conveniences by tag. Indexes are always true indexes; obtain them with
/// [`Element::child_index`] or [`Element::elements_with_true_index`] and
/// re-derive them after every structural change.
impl Element {
    /// Append items to the children. See [`Content::append`](crate::Content::append).
    pub fn append<I>(&mut self, items: I) -> Result<(), Error>
    where
        I: IntoIterator,
        I::Item: Into<Item>,
    {
        self.content.append(items.into_iter().map(Into::into))
    }

    /// Append a single child element.
    pub fn append_child(&mut self, child: Element) -> Result<(), Error> {
        self.content.append([Item::Element(child)])
    }

    /// See [`Content::truncate`](crate::Content::truncate).
    pub fn truncate(&mut self, count: usize) -> Result<(), Error> {
        self.content.truncate(count)
    }

    /// See [`Content::insert_at`](crate::Content::insert_at).
    pub fn insert_at(&mut self, index: TrueIndex, item: impl Into<Item>) -> Result<(), Error> {
        self.content.insert_at(index, item)
    }

    /// See [`Content::insert_copy_of`](crate::Content::insert_copy_of).
    pub fn insert_copy_of(&mut self, index: TrueIndex, source: TrueIndex) -> Result<(), Error> {
        self.content.insert_copy_of(index, source)
    }

    /// See [`Content::remove_span`](crate::Content::remove_span).
    pub fn remove_span(&mut self, start: TrueIndex, count: usize) -> Result<Vec<Item>, Error> {
        self.content.remove_span(start, count)
    }

    /// See [`Content::reorder`](crate::Content::reorder).
    pub fn reorder(&mut self, from: TrueIndex, to: TrueIndex) -> Result<(), Error> {
        self.content.reorder(from, to)
    }

    /// Set the value of the child with this tag, appending a new child if
    /// there is none.
    ///
    /// ```rust
    /// use xmledit::Element;
    ///
    /// let mut config = Element::with_content("Config", Element::with_value("Value", "10"));
    /// config.set_append_child("Value", "20").unwrap();
    /// assert_eq!(config.elements().count(), 1);
    /// assert_eq!(config.child("Value").unwrap().value(), Some("20"));
    /// ```
    pub fn set_append_child<V: Into<Scalar>>(
        &mut self,
        tag: &str,
        value: V,
    ) -> Result<&mut Element, Error> {
        if self.child(tag).is_none() {
            self.append_child(Element::new(tag))?;
        }
        let child = self.required_child_mut(tag)?;
        child.set_value(value);
        Ok(child)
    }

    /// Set the value of an existing child.
    ///
    /// If there is no such child this is a no-op for a default value (see
    /// [`Scalar::is_default`]), and [`Error::NotFound`] otherwise.
    pub fn set_child_value<V: Into<Scalar>>(
        &mut self,
        tag: &str,
        value: V,
    ) -> Result<Option<&mut Element>, Error> {
        let value = value.into();
        if self.child(tag).is_none() {
            if value.is_default() {
                return Ok(None);
            }
            return Err(self.missing(tag));
        }
        let child = self.required_child_mut(tag)?;
        child.set_value(value);
        Ok(Some(child))
    }

    /// Set the value of the child with this tag, creating and appending the
    /// child with that value if it does not exist.
    pub fn ensure_child_value<V: Into<Scalar>>(
        &mut self,
        tag: &str,
        value: V,
    ) -> Result<&mut Element, Error> {
        let value = value.into();
        if self.child(tag).is_none() {
            self.append_child(Element::with_value(tag, value))?;
            return self.required_child_mut(tag);
        }
        let child = self.required_child_mut(tag)?;
        child.set_value(value);
        Ok(child)
    }

    /// Multiply the numeric value of a child by `factor`.
    ///
    /// A factor of 1 does nothing, even if the child is missing.
    pub fn scale_child_by(&mut self, tag: &str, factor: f64) -> Result<(), Error> {
        if factor == 1.0 {
            return Ok(());
        }
        self.required_child_mut(tag)?.scale_by(factor)
    }

    /// Add `delta` to the numeric value of a child.
    ///
    /// A delta of 0 does nothing, even if the child is missing.
    pub fn adjust_child_by(&mut self, tag: &str, delta: f64) -> Result<(), Error> {
        if delta == 0.0 {
            return Ok(());
        }
        self.required_child_mut(tag)?.adjust_by(delta)
    }

    /// Copy the text value of the sibling onto the child.
    ///
    /// The sibling must exist. A missing child is tolerated under the same
    /// rule as [`Element::set_child_value`].
    pub fn set_child_to_sibling(&mut self, child: &str, sibling: &str) -> Result<(), Error> {
        let value = self.required_child(sibling)?.value_or_empty().to_string();
        self.set_child_value(child, value)?;
        Ok(())
    }

    /// Set the child's numeric value to the sibling's value times `factor`.
    pub fn scale_child_to_sibling_by(
        &mut self,
        tag: &str,
        sibling: &str,
        factor: f64,
    ) -> Result<(), Error> {
        self.required_child(tag)?;
        let base = self.required_child(sibling)?.float_value()?;
        self.required_child_mut(tag)?.set_value(base * factor);
        Ok(())
    }

    /// Set the child's numeric value to the sibling's value plus `delta`.
    pub fn adjust_child_to_sibling_by(
        &mut self,
        tag: &str,
        sibling: &str,
        delta: f64,
    ) -> Result<(), Error> {
        self.required_child(tag)?;
        let base = self.required_child(sibling)?.float_value()?;
        self.required_child_mut(tag)?.set_value(base + delta);
        Ok(())
    }

    /// Remove the first child with this tag, if there is one.
    ///
    /// Removing the only child of single element content leaves the content
    /// empty.
    pub fn remove_by_tag(&mut self, tag: &str) -> Result<(), Error> {
        if let Content::SingleElement(element) = &self.content {
            if element.name == tag {
                self.content = Content::Empty;
            }
            return Ok(());
        }
        match self.child_index(tag) {
            Some(index) => self.remove_span(index, 1).map(|_| ()),
            None => Ok(()),
        }
    }

    /// Remove the item at a true index.
    ///
    /// Accepts the result of [`Element::child_index`] directly; `None` is
    /// reported as [`Error::IndexOutOfRange`].
    ///
    /// ```rust
    /// use xmledit::{Element, Item};
    ///
    /// let mut config = Element::with_content("Config", vec![
    ///     Item::comment("c1"),
    ///     Item::Element(Element::with_value("Item", "x")),
    ///     Item::Element(Element::with_value("Item", "y")),
    /// ]);
    /// let index = config.child_index("Item");
    /// config.remove_child_at(index).unwrap();
    /// assert_eq!(config.content().len(), 2);
    /// assert_eq!(config.child("Item").unwrap().value(), Some("y"));
    /// assert!(config.remove_child_at(config.child_index("Missing")).is_err());
    /// ```
    pub fn remove_child_at(&mut self, index: impl Into<Option<TrueIndex>>) -> Result<(), Error> {
        let index = index.into().ok_or(Error::IndexOutOfRange {
            index: usize::MAX,
            count: 1,
            len: self.content.len(),
        })?;
        self.remove_span(index, 1).map(|_| ())
    }

    /// Replace the content of our child with this tag by a deep copy of the
    /// content of `from`'s child with the same tag.
    pub fn copy_by_tag(&mut self, tag: &str, from: &Element) -> Result<(), Error> {
        let source = from.required_child(tag)?.content.clone();
        self.required_child_mut(tag)?.set_contents(source);
        Ok(())
    }

    /// [`Element::copy_by_tag`], then visit each child element of the copied
    /// child, stopping at the first error.
    pub fn copy_and_visit_by_tag<F, E>(
        &mut self,
        tag: &str,
        from: &Element,
        visit: F,
    ) -> Result<(), E>
    where
        F: FnMut(&mut Element) -> Result<(), E>,
        E: From<Error>,
    {
        self.copy_by_tag(tag, from)?;
        self.required_child_mut(tag)?.visit_children_mut(visit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Element {
        Element::with_content(
            "Config",
            vec![
                Item::comment("c1"),
                Item::Element(Element::with_value("A", "10")),
                Item::Element(Element::with_value("B", "4")),
            ],
        )
    }

    #[test]
    fn test_set_append_child_creates() {
        let mut config = config();
        config.set_append_child("C", 3).unwrap();
        assert_eq!(config.child_index("C"), Some(TrueIndex::new(3)));
        assert_eq!(config.child("C").unwrap().value(), Some("3"));
    }

    #[test]
    fn test_set_append_child_on_text_fails() {
        let mut element = Element::with_value("a", "1");
        assert!(matches!(
            element.set_append_child("b", "2"),
            Err(Error::InvalidContentType { .. })
        ));
        assert_eq!(element.value(), Some("1"));
    }

    #[test]
    fn test_set_child_value() {
        let mut config = config();
        config.set_child_value("A", "11").unwrap();
        assert_eq!(config.child("A").unwrap().value(), Some("11"));
        assert!(config.set_child_value("Missing", "").unwrap().is_none());
        assert!(config.set_child_value("Missing", 0).unwrap().is_none());
        assert!(config.set_child_value("Missing", 0.0).unwrap().is_none());
        assert!(matches!(
            config.set_child_value("Missing", "x"),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn test_ensure_child_value() {
        let mut config = config();
        config.ensure_child_value("A", 1).unwrap();
        config.ensure_child_value("C", "new").unwrap();
        assert_eq!(config.child("A").unwrap().value(), Some("1"));
        assert_eq!(config.child("C").unwrap().value(), Some("new"));
        assert_eq!(config.elements().count(), 3);
    }

    #[test]
    fn test_scale_child_by() {
        let mut config = config();
        config.scale_child_by("A", 1.0).unwrap();
        config.scale_child_by("Missing", 1.0).unwrap();
        assert!(matches!(
            config.scale_child_by("Missing", 2.0),
            Err(Error::NotFound(_))
        ));
        config.scale_child_by("A", 0.5).unwrap();
        assert_eq!(config.child("A").unwrap().value(), Some("5"));
    }

    #[test]
    fn test_adjust_child_by() {
        let mut config = config();
        config.adjust_child_by("Missing", 0.0).unwrap();
        config.adjust_child_by("B", 1.5).unwrap();
        assert_eq!(config.child("B").unwrap().value(), Some("5.5"));
        assert!(config.adjust_child_by("Missing", 1.0).is_err());
    }

    #[test]
    fn test_set_child_to_sibling() {
        let mut config = config();
        config.set_child_to_sibling("A", "B").unwrap();
        assert_eq!(config.child("A").unwrap().value(), Some("4"));
        assert!(matches!(
            config.set_child_to_sibling("A", "Missing"),
            Err(Error::NotFound(_))
        ));
        // the sibling's value is not a default, so the missing child fails
        assert!(config.set_child_to_sibling("Missing", "B").is_err());
    }

    #[test]
    fn test_set_child_to_sibling_default_value() {
        let mut config = config();
        config.set_child_value("B", "0").unwrap();
        config.set_child_to_sibling("Missing", "B").unwrap();
        assert!(config.child("Missing").is_none());
    }

    #[test]
    fn test_scale_and_adjust_to_sibling() {
        let mut config = config();
        config.scale_child_to_sibling_by("A", "B", 2.5).unwrap();
        assert_eq!(config.child("A").unwrap().value(), Some("10"));
        config.adjust_child_to_sibling_by("A", "B", -1.0).unwrap();
        assert_eq!(config.child("A").unwrap().value(), Some("3"));
        assert!(config.scale_child_to_sibling_by("Missing", "B", 2.0).is_err());
        assert!(config.adjust_child_to_sibling_by("A", "Missing", 2.0).is_err());
    }

    #[test]
    fn test_remove_by_tag() {
        let mut config = config();
        config.remove_by_tag("A").unwrap();
        config.remove_by_tag("Missing").unwrap();
        assert!(config.child("A").is_none());
        assert_eq!(config.content().len(), 2);
    }

    #[test]
    fn test_remove_by_tag_only_child() {
        let mut outer = Element::with_content("Outer", Element::with_value("Inner", "1"));
        outer.remove_by_tag("Other").unwrap();
        assert!(outer.child("Inner").is_some());
        outer.remove_by_tag("Inner").unwrap();
        assert_eq!(outer.content(), &Content::Empty);
    }

    #[test]
    fn test_sibling_edit_reports_missing_child_first() {
        let mut config = Element::with_content(
            "Config",
            vec![Item::Element(Element::with_value("Name", "Dart"))],
        );
        let err = config
            .scale_child_to_sibling_by("Missing", "Name", 2.0)
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
        let err = config
            .adjust_child_to_sibling_by("Missing", "Name", 1.0)
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn test_remove_child_at_sentinel() {
        let mut config = config();
        assert!(matches!(
            config.remove_child_at(None),
            Err(Error::IndexOutOfRange { .. })
        ));
        assert_eq!(config.content().len(), 3);
    }

    #[test]
    fn test_copy_by_tag() {
        let mut target = config();
        let source = Element::with_content(
            "Other",
            Element::with_content("A", vec![Item::Element(Element::with_value("X", "1"))]),
        );
        target.copy_by_tag("A", &source).unwrap();
        assert_eq!(
            target.child("A").unwrap().child("X").unwrap().value(),
            Some("1")
        );
        assert!(matches!(
            target.copy_by_tag("B", &source),
            Err(Error::NotFound(_))
        ));
        assert!(matches!(
            source.clone().copy_by_tag("A", &Element::new("Empty")),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn test_copy_and_visit_by_tag() {
        let mut target = config();
        let source = Element::with_content(
            "Other",
            Element::with_content(
                "A",
                vec![
                    Item::Element(Element::with_value("X", "1")),
                    Item::Element(Element::with_value("Y", "2")),
                ],
            ),
        );
        target
            .copy_and_visit_by_tag("A", &source, |child| child.scale_by(10.0))
            .unwrap();
        let a = target.child("A").unwrap();
        assert_eq!(a.child("X").unwrap().value(), Some("10"));
        assert_eq!(a.child("Y").unwrap().value(), Some("20"));
        // the source is untouched
        let source_a = source.child("A").unwrap();
        assert_eq!(source_a.child("X").unwrap().value(), Some("1"));
    }

    #[test]
    fn test_copy_and_visit_propagates_visitor_error() {
        let mut target = config();
        let source = Element::with_content(
            "Other",
            Element::with_content("A", vec![Item::Element(Element::with_value("X", "x"))]),
        );
        let result = target.copy_and_visit_by_tag("A", &source, |child| child.scale_by(2.0));
        assert!(matches!(result, Err(Error::TypeMismatch { .. })));
    }

    #[test]
    fn test_append_wrapper() {
        let mut element = Element::with_content("a", Vec::<Item>::new());
        element
            .append(vec![Element::new("b"), Element::new("c")])
            .unwrap();
        assert_eq!(element.elements().count(), 2);
        element.truncate(1).unwrap();
        assert_eq!(element.content(), &Content::Sequence(vec![Item::Element(Element::new("b"))]));
    }
}
