/// Indentation: pretty-print XML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Indentation {
    /// Number of spaces per nesting level.
    pub indent: usize,
    /// A list of element names where indentation changes are suppressed.
    pub suppress: Vec<String>,
}

impl Default for Indentation {
    fn default() -> Self {
        Indentation {
            indent: 2,
            suppress: Vec::new(),
        }
    }
}

/// Parameters for XML serialization.
///
/// The default writes the tree compactly, without any whitespace that
/// isn't in the tree itself.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Parameters {
    /// Pretty-print the output. Element-only content is written one child per
    /// line; content mixed with text is written inline as it is.
    pub indentation: Option<Indentation>,
}
