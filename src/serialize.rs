use std::io::Write;

use crate::document::DocumentTree;
use crate::error::Error;
use crate::output::{gen_outputs, gen_outputs_element, Output, Parameters, XmlSerializer};
use crate::xmlvalue::Element;

fn serialize_outputs<'a, W: Write>(
    outputs: impl Iterator<Item = Output<'a>>,
    parameters: &Parameters,
    w: &mut W,
) -> Result<(), Error> {
    match &parameters.indentation {
        Some(indentation) => XmlSerializer.serialize_pretty(w, outputs, indentation),
        None => XmlSerializer.serialize(w, outputs),
    }
}

fn into_string(buf: Vec<u8>) -> Result<String, Error> {
    String::from_utf8(buf)
        .map_err(|e| Error::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

/// ## Serialization
impl DocumentTree {
    /// Write the tree as XML.
    ///
    /// ```rust
    /// use xmledit::{DocumentTree, output};
    ///
    /// let tree = DocumentTree::parse("<a><b>1</b><c/></a>")?;
    /// let mut buf = Vec::new();
    /// tree.serialize_xml(
    ///     output::Parameters {
    ///         indentation: Some(Default::default()),
    ///     },
    ///     &mut buf,
    /// )?;
    /// assert_eq!(
    ///     String::from_utf8(buf).unwrap(),
    ///     "<a>\n  <b>1</b>\n  <c/>\n</a>\n"
    /// );
    /// # Ok::<(), xmledit::Error>(())
    /// ```
    pub fn serialize_xml<W: Write>(&self, parameters: Parameters, w: &mut W) -> Result<(), Error> {
        serialize_outputs(gen_outputs(&self.root), &parameters, w)
    }

    /// Write the tree compactly to a string.
    pub fn to_xml_string(&self) -> Result<String, Error> {
        let mut buf = Vec::new();
        self.serialize_xml(Parameters::default(), &mut buf)?;
        into_string(buf)
    }

    /// Write the tree to bytes, in UTF-8.
    pub fn to_bytes(&self, parameters: Parameters) -> Result<Vec<u8>, Error> {
        let mut buf = Vec::new();
        self.serialize_xml(parameters, &mut buf)?;
        Ok(buf)
    }
}

impl Element {
    /// Write this element and everything below it as XML.
    pub fn serialize_xml<W: Write>(&self, parameters: Parameters, w: &mut W) -> Result<(), Error> {
        serialize_outputs(gen_outputs_element(self), &parameters, w)
    }

    /// Write this element compactly to a string.
    ///
    /// ```rust
    /// use xmledit::Element;
    ///
    /// let element = Element::with_value("Name", "A & B").with_attribute("id", "\"1\"");
    /// assert_eq!(
    ///     element.to_xml_string()?,
    ///     r#"<Name id="&quot;1&quot;">A &amp; B</Name>"#
    /// );
    /// # Ok::<(), xmledit::Error>(())
    /// ```
    pub fn to_xml_string(&self) -> Result<String, Error> {
        let mut buf = Vec::new();
        self.serialize_xml(Parameters::default(), &mut buf)?;
        into_string(buf)
    }
}
