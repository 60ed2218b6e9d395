use crate::valueaccess::Scalar;
use crate::xmlvalue::{Attribute, Content, Element};

impl Element {
    /// Create a bare element with [`Content::Empty`].
    ///
    /// Give it a value or content before using it as a container: appending
    /// to empty content is an error.
    pub fn new<S: Into<String>>(name: S) -> Self {
        Element {
            prefix: None,
            name: name.into(),
            attributes: Vec::new(),
            content: Content::Empty,
        }
    }

    /// Create an element holding a text value.
    ///
    /// ```rust
    /// use xmledit::Element;
    ///
    /// let element = Element::with_value("Speed", 2.5);
    /// assert_eq!(element.value(), Some("2.5"));
    /// ```
    pub fn with_value<S: Into<String>, V: Into<Scalar>>(name: S, value: V) -> Self {
        let mut element = Element::new(name);
        element.set_value(value);
        element
    }

    /// Create an element with the given content.
    pub fn with_content<S: Into<String>, C: Into<Content>>(name: S, content: C) -> Self {
        let mut element = Element::new(name);
        element.content = content.into();
        element
    }

    /// Add an attribute, builder style.
    pub fn with_attribute<N: Into<String>, V: Into<String>>(mut self, name: N, value: V) -> Self {
        self.attributes.push(Attribute::new(name, value));
        self
    }

    /// Deep copy of this element under another name.
    pub fn clone_as<S: Into<String>>(&self, name: S) -> Element {
        let mut element = self.clone();
        element.name = name.into();
        element
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_empty() {
        let element = Element::new("a");
        assert_eq!(element.content(), &Content::Empty);
        assert!(element.attributes().is_empty());
    }

    #[test]
    fn test_clone_as() {
        let original = Element::with_value("a", "1").with_attribute("x", "y");
        let copy = original.clone_as("b");
        assert_eq!(copy.name(), "b");
        assert_eq!(copy.attribute("x"), Some("y"));
        assert_eq!(copy.value(), Some("1"));
        assert_eq!(original.name(), "a");
    }
}
