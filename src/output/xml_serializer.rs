use std::io;

use crate::entity::{serialize_attribute, serialize_text};
use crate::error::Error;
use crate::xmlvalue::Content;

use super::{Indentation, Output, OutputToken, Pretty};

fn qualified(prefix: Option<&str>, name: &str) -> String {
    match prefix {
        Some(prefix) => format!("{}:{}", prefix, name),
        None => name.to_string(),
    }
}

pub(crate) struct XmlSerializer;

impl XmlSerializer {
    pub(crate) fn serialize<'a, W: io::Write>(
        &self,
        w: &mut W,
        outputs: impl Iterator<Item = Output<'a>>,
    ) -> Result<(), Error> {
        for output in outputs {
            self.serialize_output(w, &output)?;
        }
        Ok(())
    }

    pub(crate) fn serialize_pretty<'a, W: io::Write>(
        &self,
        w: &mut W,
        outputs: impl Iterator<Item = Output<'a>>,
        indentation: &Indentation,
    ) -> Result<(), Error> {
        let is_suppressed = |name: &str| indentation.suppress.iter().any(|s| s == name);
        let mut pretty = Pretty::new(is_suppressed);
        for output in outputs {
            let (level, newline) = pretty.prettify(&output);
            if level > 0 {
                w.write_all(" ".repeat(level * indentation.indent).as_bytes())?;
            }
            self.serialize_output(w, &output)?;
            if newline {
                w.write_all(b"\n")?;
            }
        }
        Ok(())
    }

    fn serialize_output<W: io::Write>(&self, w: &mut W, output: &Output) -> Result<(), Error> {
        let token = self.render_output(output);
        if token.space {
            w.write_all(b" ")?;
        }
        w.write_all(token.text.as_bytes())?;
        Ok(())
    }

    pub(crate) fn render_output(&self, output: &Output) -> OutputToken {
        use Output::*;
        match output {
            StartTagOpen(element) => OutputToken {
                space: false,
                text: format!("<{}", qualified(element.prefix(), element.name())),
            },
            Attribute(attribute) => OutputToken {
                space: true,
                text: format!(
                    "{}=\"{}\"",
                    qualified(attribute.prefix(), attribute.name()),
                    serialize_attribute(attribute.value())
                ),
            },
            StartTagClose(element) => OutputToken {
                space: false,
                text: if matches!(element.content, Content::Empty) {
                    "/>".to_string()
                } else {
                    ">".to_string()
                },
            },
            EndTag(element) => OutputToken {
                space: false,
                text: if matches!(element.content, Content::Empty) {
                    String::new()
                } else {
                    format!("</{}>", qualified(element.prefix(), element.name()))
                },
            },
            Text(text) => OutputToken {
                space: false,
                text: serialize_text(text).into_owned(),
            },
            Comment(text) => OutputToken {
                space: false,
                text: format!("<!--{}-->", text),
            },
            Directive(text) => OutputToken {
                space: false,
                text: format!("<!{}>", text),
            },
            ProcessingInstruction(pi) => OutputToken {
                space: false,
                text: match pi.data() {
                    Some(data) => format!("<?{} {}?>", pi.target(), data),
                    None => format!("<?{}?>", pi.target()),
                },
            },
        }
    }
}
