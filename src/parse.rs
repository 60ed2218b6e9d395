use std::borrow::Cow;

use encoding_rs::Encoding;
use tracing::debug;
use xmlparser::{ElementEnd, StrSpan, Token, Tokenizer};

use crate::document::DocumentTree;
use crate::entity::parse_entities;
use crate::error::Error;
use crate::xmlvalue::{Attribute, Content, Element, Item, ProcessingInstruction};

struct Frame {
    element: Element,
    items: Vec<Item>,
}

struct TreeBuilder<'a> {
    source: &'a str,
    stack: Vec<Frame>,
    top: Vec<Item>,
    // element whose start tag is still being read
    pending: Option<Element>,
    dtd_start: Option<usize>,
}

impl<'a> TreeBuilder<'a> {
    fn new(source: &'a str) -> Self {
        TreeBuilder {
            source,
            stack: Vec::new(),
            top: Vec::new(),
            pending: None,
            dtd_start: None,
        }
    }

    fn items(&mut self) -> &mut Vec<Item> {
        match self.stack.last_mut() {
            Some(frame) => &mut frame.items,
            None => &mut self.top,
        }
    }

    fn add(&mut self, item: Item) {
        self.items().push(item);
    }

    fn add_text(&mut self, text: Cow<'_, str>) {
        let items = self.items();
        if let Some(Item::Text(previous)) = items.last_mut() {
            previous.push_str(&text);
        } else {
            items.push(Item::Text(text.into_owned()));
        }
    }

    fn element_start(&mut self, prefix: StrSpan, local: StrSpan) {
        let mut element = Element::new(local.as_str());
        element.prefix = non_empty(prefix);
        self.pending = Some(element);
    }

    fn attribute(&mut self, prefix: StrSpan, local: StrSpan, value: StrSpan) -> Result<(), Error> {
        let value = parse_entities(value.as_str().into())?;
        if let Some(element) = self.pending.as_mut() {
            element.attributes.push(Attribute {
                prefix: non_empty(prefix),
                name: local.as_str().to_string(),
                value: value.into_owned(),
            });
        }
        Ok(())
    }

    fn element_end(&mut self, end: ElementEnd) -> Result<(), Error> {
        match end {
            ElementEnd::Open => {
                if let Some(element) = self.pending.take() {
                    self.stack.push(Frame {
                        element,
                        items: Vec::new(),
                    });
                }
            }
            ElementEnd::Empty => {
                if let Some(element) = self.pending.take() {
                    self.add(Item::Element(element));
                }
            }
            ElementEnd::Close(prefix, local) => {
                let found = qualified(non_empty(prefix).as_deref(), local.as_str());
                let frame = self.stack.pop().ok_or_else(|| Error::InvalidCloseTag {
                    expected: String::new(),
                    found: found.clone(),
                })?;
                let Frame {
                    mut element,
                    items,
                } = frame;
                let expected = qualified(element.prefix.as_deref(), &element.name);
                if expected != found {
                    return Err(Error::InvalidCloseTag { expected, found });
                }
                element.content = shape(items);
                self.add(Item::Element(element));
            }
        }
        Ok(())
    }

    fn token(&mut self, token: Token<'a>) -> Result<(), Error> {
        match token {
            Token::Declaration { span, .. } => {
                let data = span
                    .as_str()
                    .trim_start_matches("<?xml")
                    .trim_end_matches("?>")
                    .trim();
                self.add(Item::ProcessingInstruction(ProcessingInstruction::new(
                    "xml".to_string(),
                    Some(data),
                )));
            }
            Token::ProcessingInstruction {
                target, content, ..
            } => {
                self.add(Item::ProcessingInstruction(ProcessingInstruction::new(
                    target.as_str().to_string(),
                    content.map(|c| c.as_str()),
                )));
            }
            Token::Comment { text, .. } => self.add(Item::Comment(text.as_str().to_string())),
            Token::EmptyDtd { span, .. } => self.add(Item::Directive(directive(span.as_str()))),
            Token::DtdStart { span, .. } => self.dtd_start = Some(span.start()),
            Token::DtdEnd { span } => {
                if let Some(start) = self.dtd_start.take() {
                    let text = &self.source[start..span.end()];
                    self.add(Item::Directive(directive(text)));
                }
            }
            Token::EntityDeclaration { .. } => {}
            Token::ElementStart { prefix, local, .. } => self.element_start(prefix, local),
            Token::Attribute {
                prefix,
                local,
                value,
                ..
            } => self.attribute(prefix, local, value)?,
            Token::ElementEnd { end, .. } => self.element_end(end)?,
            Token::Text { text } => {
                let text = parse_entities(text.as_str().into())?;
                self.add_text(text);
            }
            Token::Cdata { text, .. } => self.add_text(text.as_str().into()),
        }
        Ok(())
    }

    fn finish(self) -> Result<DocumentTree, Error> {
        if let Some(element) = self.pending {
            return Err(Error::UnclosedTag(element.name));
        }
        if let Some(frame) = self.stack.into_iter().last() {
            return Err(Error::UnclosedTag(frame.element.name));
        }
        let root = shape(self.top);
        debug!(kind = %root.kind(), items = root.len(), "parsed document");
        Ok(DocumentTree { root })
    }
}

fn non_empty(span: StrSpan) -> Option<String> {
    let s = span.as_str();
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

fn qualified(prefix: Option<&str>, local: &str) -> String {
    match prefix {
        Some(prefix) => format!("{}:{}", prefix, local),
        None => local.to_string(),
    }
}

// text between `<!` and `>`
fn directive(span: &str) -> String {
    span.trim_start_matches("<!")
        .trim_end_matches('>')
        .to_string()
}

// Turn parsed items into the most specific content shape. Whitespace-only
// text is formatting and is dropped, unless the sequence also carries real
// text: then it is mixed content and every text item is kept.
fn shape(items: Vec<Item>) -> Content {
    if items.is_empty() {
        return Content::Empty;
    }
    if items.iter().all(|item| matches!(item, Item::Text(_))) {
        let text = items
            .into_iter()
            .filter_map(|item| match item {
                Item::Text(text) => Some(text),
                _ => None,
            })
            .collect::<String>();
        return Content::Text(text);
    }
    let mixed = items
        .iter()
        .any(|item| matches!(item, Item::Text(text) if !text.trim().is_empty()));
    let items = if mixed {
        items
    } else {
        items
            .into_iter()
            .filter(|item| !matches!(item, Item::Text(_)))
            .collect::<Vec<_>>()
    };
    match <[Item; 1]>::try_from(items) {
        Ok([Item::Element(element)]) => Content::SingleElement(Box::new(element)),
        Ok([item]) => Content::Sequence(vec![item]),
        Err(items) => Content::Sequence(items),
    }
}

fn detect_encoding(data: &[u8]) -> Result<&'static Encoding, Error> {
    let mut cursor = std::io::Cursor::new(data);
    let charsets = xhtmlchardet::detect(&mut cursor, None).unwrap_or_default();
    // no encoding detected
    let label = charsets.first().map(String::as_str).unwrap_or("UTF-8");
    Encoding::for_label(label.as_bytes())
        .ok_or_else(|| Error::UnsupportedEncoding(label.to_string()))
}

/// ## Parsing
impl DocumentTree {
    /// Parse an XML document.
    ///
    /// ```rust
    /// use xmledit::DocumentTree;
    ///
    /// let tree = DocumentTree::parse(r#"<?xml version="1.0"?>
    /// <!-- settings -->
    /// <Config><Speed>10</Speed></Config>"#)?;
    /// let config = tree.document_element().unwrap();
    /// assert_eq!(config.child("Speed").unwrap().value(), Some("10"));
    /// assert_eq!(tree.root().len(), 3);
    /// # Ok::<(), xmledit::Error>(())
    /// ```
    pub fn parse(xml: &str) -> Result<Self, Error> {
        Self::build(xml, Tokenizer::from(xml))
    }

    /// Parse an XML fragment: any number of top-level elements, mixed with
    /// text, comments and processing instructions.
    pub fn parse_fragment(xml: &str) -> Result<Self, Error> {
        Self::build(xml, Tokenizer::from_fragment(xml, 0..xml.len()))
    }

    /// Parse an XML document from bytes, detecting its encoding.
    pub fn parse_bytes(data: &[u8]) -> Result<Self, Error> {
        let encoding = detect_encoding(data)?;
        debug!(encoding = encoding.name(), "decoding document");
        let (xml, _, _) = encoding.decode(data);
        Self::parse(&xml)
    }

    fn build<'a>(source: &'a str, tokenizer: Tokenizer<'a>) -> Result<Self, Error> {
        let mut builder = TreeBuilder::new(source);
        for token in tokenizer {
            builder.token(token?)?;
        }
        builder.finish()
    }
}
