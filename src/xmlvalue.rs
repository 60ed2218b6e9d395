use std::fmt;

/// The shape of a [`Content`] value.
///
/// Access it using [`Content::kind`]. Used when you are interested in the
/// shape without needing to match on the payload.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum ContentKind {
    Empty,
    Text,
    SingleElement,
    Sequence,
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ContentKind::Empty => "empty",
            ContentKind::Text => "text",
            ContentKind::SingleElement => "single element",
            ContentKind::Sequence => "sequence",
        };
        f.write_str(s)
    }
}

/// The payload of an element or of a document.
///
/// A content value exclusively owns everything reachable from it. Cloning
/// produces a disjoint deep copy.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Content {
    /// No payload. A freshly created element starts out like this.
    #[default]
    Empty,
    /// A scalar text value, e.g. `10` in `<Value>10</Value>`.
    Text(String),
    /// Exactly one child element and nothing else.
    SingleElement(Box<Element>),
    /// An ordered mix of elements, comments, directives, processing
    /// instructions and text.
    Sequence(Vec<Item>),
}

/// An entry of a [`Content::Sequence`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Item {
    Element(Element),
    /// Comment text, e.g. ` foo ` in `<!-- foo -->`.
    Comment(String),
    /// Directive text, e.g. `DOCTYPE doc` in `<!DOCTYPE doc>`.
    Directive(String),
    ProcessingInstruction(ProcessingInstruction),
    Text(String),
}

impl Item {
    /// Create a comment item.
    pub fn comment<S: Into<String>>(text: S) -> Self {
        Item::Comment(text.into())
    }

    /// Create a directive item.
    pub fn directive<S: Into<String>>(text: S) -> Self {
        Item::Directive(text.into())
    }

    /// Create a text item.
    pub fn text<S: Into<String>>(text: S) -> Self {
        Item::Text(text.into())
    }

    /// Create a processing instruction item.
    pub fn processing_instruction<S: Into<String>>(target: S, data: Option<&str>) -> Self {
        Item::ProcessingInstruction(ProcessingInstruction::new(target.into(), data))
    }

    /// If this item is an element, return a reference to it.
    pub fn as_element(&self) -> Option<&Element> {
        if let Item::Element(element) = self {
            Some(element)
        } else {
            None
        }
    }

    /// If this item is an element, return a mutable reference to it.
    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        if let Item::Element(element) = self {
            Some(element)
        } else {
            None
        }
    }

    pub fn is_element(&self) -> bool {
        matches!(self, Item::Element(_))
    }
}

impl From<Element> for Item {
    fn from(element: Element) -> Self {
        Item::Element(element)
    }
}

/// XML processing instruction.
///
/// Example: `<?foo?>` or `<?foo bar?>`. The XML declaration is kept as a
/// processing instruction with target `xml`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProcessingInstruction {
    pub(crate) target: String,
    pub(crate) data: Option<String>,
}

impl ProcessingInstruction {
    pub fn new(target: String, data: Option<&str>) -> Self {
        let mut pi = ProcessingInstruction { target, data: None };
        pi.set_data(data);
        pi
    }

    /// Get processing instruction target.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Get processing instruction data.
    pub fn data(&self) -> Option<&str> {
        self.data.as_deref()
    }

    /// Set data. Empty data is stored as no data.
    pub fn set_data<S: Into<String>>(&mut self, data: Option<S>) {
        if let Some(data) = data {
            let data = data.into();
            if !data.is_empty() {
                self.data = Some(data);
                return;
            }
        }
        self.data = None;
    }
}

/// An attribute of an element.
///
/// Only the local name takes part in lookups; the prefix is kept so that
/// parsed documents serialize the way they came in.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attribute {
    pub(crate) prefix: Option<String>,
    pub(crate) name: String,
    pub(crate) value: String,
}

impl Attribute {
    pub fn new<N: Into<String>, V: Into<String>>(name: N, value: V) -> Self {
        Attribute {
            prefix: None,
            name: name.into(),
            value: value.into(),
        }
    }

    /// The local name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value<S: Into<String>>(&mut self, value: S) {
        self.value = value.into();
    }
}

/// A named node: a local name, an ordered attribute list and exactly one
/// [`Content`] value.
///
/// Elements have no reference to their parent. Searches that need the
/// parent (see [`DocumentTree::find_using`](crate::DocumentTree::find_using))
/// carry it along as search state.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Element {
    pub(crate) prefix: Option<String>,
    pub(crate) name: String,
    pub(crate) attributes: Vec<Attribute>,
    pub(crate) content: Content,
}

impl Element {
    /// The local name of the element.
    ///
    /// ```rust
    /// use xmledit::Element;
    ///
    /// let element = Element::new("Config");
    /// assert_eq!(element.name(), "Config");
    /// ```
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the element.
    pub fn set_name<S: Into<String>>(&mut self, name: S) {
        self.name = name.into();
    }

    /// The namespace prefix this element was written with, if any. Lookups
    /// never look at it.
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    pub fn set_prefix(&mut self, prefix: Option<&str>) {
        self.prefix = prefix.map(|p| p.to_string());
    }

    /// The attributes of the element, in document order.
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Get an attribute value by local name. The first match wins.
    ///
    /// ```rust
    /// use xmledit::Element;
    ///
    /// let element = Element::new("Ship").with_attribute("id", "7");
    /// assert_eq!(element.attribute("id"), Some("7"));
    /// assert_eq!(element.attribute("missing"), None);
    /// ```
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attribute| attribute.name == name)
            .map(|attribute| attribute.value.as_str())
    }

    /// Set an attribute value.
    ///
    /// Replaces the value of the first attribute with this name, or appends a
    /// new attribute if there is none.
    pub fn set_attribute<N: Into<String>, V: Into<String>>(&mut self, name: N, value: V) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|a| a.name == name) {
            Some(attribute) => attribute.value = value,
            None => self.attributes.push(Attribute::new(name, value)),
        }
    }

    /// Remove every attribute with this name.
    pub fn remove_attribute(&mut self, name: &str) {
        self.attributes.retain(|attribute| attribute.name != name);
    }

    /// The content of the element.
    pub fn content(&self) -> &Content {
        &self.content
    }

    /// Mutable access to the content of the element.
    pub fn content_mut(&mut self) -> &mut Content {
        &mut self.content
    }

    /// Replace the content of the element.
    ///
    /// Anything that converts into a [`Content`] is accepted: a string, an
    /// [`Element`], an [`Item`] or a `Vec<Item>`.
    pub fn set_contents(&mut self, contents: impl Into<Content>) {
        self.content.set_contents(contents);
    }
}
