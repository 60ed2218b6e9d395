use crate::error::Error;
use crate::xmlvalue::{Content, Element};

/// A scalar value that can be stored as the text of an element.
///
/// Numbers are rendered with their shortest round-tripping representation.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Text(String),
    Float(f64),
    Int(i64),
}

impl Scalar {
    /// True for the empty string, `"0"`, integer zero and float zero.
    ///
    /// Setting a default on a missing child is not an error, see
    /// [`Element::set_child_value`].
    pub fn is_default(&self) -> bool {
        match self {
            Scalar::Text(s) => s.is_empty() || s == "0",
            Scalar::Float(f) => *f == 0.0,
            Scalar::Int(i) => *i == 0,
        }
    }

    /// The text this scalar is stored as.
    pub fn render(&self) -> String {
        match self {
            Scalar::Text(s) => s.clone(),
            Scalar::Float(f) => f.to_string(),
            Scalar::Int(i) => i.to_string(),
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Text(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::Text(s)
    }
}

impl From<&String> for Scalar {
    fn from(s: &String) -> Self {
        Scalar::Text(s.clone())
    }
}

impl From<f64> for Scalar {
    fn from(f: f64) -> Self {
        Scalar::Float(f)
    }
}

impl From<f32> for Scalar {
    fn from(f: f32) -> Self {
        Scalar::Float(f64::from(f))
    }
}

impl From<i64> for Scalar {
    fn from(i: i64) -> Self {
        Scalar::Int(i)
    }
}

impl From<i32> for Scalar {
    fn from(i: i32) -> Self {
        Scalar::Int(i64::from(i))
    }
}

impl From<u32> for Scalar {
    fn from(i: u32) -> Self {
        Scalar::Int(i64::from(i))
    }
}

/// Text and numeric values of elements.
///
/// The value of an element is its text, and only exists if its content is
/// [`Content::Text`].
impl Element {
    /// The text value, if the content is text.
    pub fn value(&self) -> Option<&str> {
        self.content.text()
    }

    /// The text value, or the empty string if the content is not text.
    pub fn value_or_empty(&self) -> &str {
        self.value().unwrap_or("")
    }

    /// Replace the content with a text value.
    pub fn set_value<V: Into<Scalar>>(&mut self, value: V) {
        self.content = Content::Text(value.into().render());
    }

    /// The text value parsed as a floating point number.
    ///
    /// ```rust
    /// use xmledit::Element;
    ///
    /// let element = Element::with_value("Mass", " 12.5 ");
    /// assert_eq!(element.float_value().unwrap(), 12.5);
    /// assert!(Element::with_value("Mass", "heavy").float_value().is_err());
    /// ```
    pub fn float_value(&self) -> Result<f64, Error> {
        let text = self.numeric_text()?;
        text.parse::<f64>().map_err(|_| self.not_numeric("a number"))
    }

    /// The text value parsed as an integer.
    pub fn int_value(&self) -> Result<i64, Error> {
        let text = self.numeric_text()?;
        text.parse::<i64>().map_err(|_| self.not_numeric("an integer"))
    }

    /// Multiply the numeric value by `factor`.
    pub fn scale_by(&mut self, factor: f64) -> Result<(), Error> {
        let value = self.float_value()?;
        self.set_value(value * factor);
        Ok(())
    }

    /// Add `delta` to the numeric value.
    pub fn adjust_by(&mut self, delta: f64) -> Result<(), Error> {
        let value = self.float_value()?;
        self.set_value(value + delta);
        Ok(())
    }

    pub fn value_starts_with(&self, prefix: &str) -> bool {
        self.value().map_or(false, |v| v.starts_with(prefix))
    }

    pub fn value_ends_with(&self, suffix: &str) -> bool {
        self.value().map_or(false, |v| v.ends_with(suffix))
    }

    /// The numeric value of the first child with this tag.
    pub fn float_value_of(&self, tag: &str) -> Result<f64, Error> {
        self.required_child(tag)?.float_value()
    }

    /// The integer value of the first child with this tag.
    pub fn int_value_of(&self, tag: &str) -> Result<i64, Error> {
        self.required_child(tag)?.int_value()
    }

    /// The text value of the first child with this tag.
    pub fn string_value_of(&self, tag: &str) -> Result<&str, Error> {
        let child = self.required_child(tag)?;
        child.value().ok_or_else(|| Error::TypeMismatch {
            expected: format!("text in {}", tag),
            found: child.content.kind().to_string(),
        })
    }

    fn numeric_text(&self) -> Result<&str, Error> {
        self.value()
            .map(str::trim)
            .ok_or_else(|| Error::TypeMismatch {
                expected: format!("numeric text in {}", self.name),
                found: self.content.kind().to_string(),
            })
    }

    fn not_numeric(&self, expected: &str) -> Error {
        Error::TypeMismatch {
            expected: format!("{} in {}", expected, self.name),
            found: format!("{:?}", self.value_or_empty()),
        }
    }
}
