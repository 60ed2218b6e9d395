use genawaiter::rc::gen;
use genawaiter::yield_;

use crate::xmlvalue::{Attribute, Content, Element, Item, ProcessingInstruction};

/// Output of serialization
///
/// Each value stands for one fragment of the serialized XML, in document
/// order.
#[derive(Debug, PartialEq)]
pub enum Output<'a> {
    /// Start tag open, i.e `<foo` or `<ns:foo`
    StartTagOpen(&'a Element),
    /// Attribute, i.e. `foo="bar"`
    Attribute(&'a Attribute),
    /// Start tag close, either `>` or `/>` for an element with empty content
    StartTagClose(&'a Element),
    /// End tag, i.e. `</foo>`; nothing for an element with empty content
    EndTag(&'a Element),
    /// Text, i.e. `foo`
    Text(&'a str),
    /// Comment, i.e. `<!-- foo -->`
    Comment(&'a str),
    /// Directive, i.e. `<!DOCTYPE foo>`
    Directive(&'a str),
    /// Processing instruction, i.e. `<?foo bar?>`
    ProcessingInstruction(&'a ProcessingInstruction),
}

/// Output token
///
/// This represents an [`Output`] as a rendered output token.
pub struct OutputToken {
    /// Whether the token is prefixed by a space character.
    pub space: bool,
    /// The token.
    ///
    /// This is a fragment of XML like `<foo` or `a="A"` or `/>`, etc.
    pub text: String,
}

enum Edge<'a> {
    Start(&'a Element),
    End(&'a Element),
    Other(&'a Item),
    Text(&'a str),
}

// pushed in reverse, so that popping visits them in document order
fn push_content<'a>(stack: &mut Vec<Edge<'a>>, content: &'a Content) {
    match content {
        Content::Empty => {}
        Content::Text(text) => stack.push(Edge::Text(text)),
        Content::SingleElement(element) => stack.push(Edge::Start(element)),
        Content::Sequence(items) => {
            stack.extend(items.iter().rev().map(|item| match item {
                Item::Element(element) => Edge::Start(element),
                Item::Text(text) => Edge::Text(text),
                other => Edge::Other(other),
            }));
        }
    }
}

pub(crate) fn gen_outputs(content: &Content) -> impl Iterator<Item = Output<'_>> + '_ {
    let mut stack = Vec::new();
    push_content(&mut stack, content);
    gen_edges(stack)
}

pub(crate) fn gen_outputs_element(element: &Element) -> impl Iterator<Item = Output<'_>> + '_ {
    gen_edges(vec![Edge::Start(element)])
}

fn gen_edges<'a>(mut stack: Vec<Edge<'a>>) -> impl Iterator<Item = Output<'a>> + 'a {
    gen!({
        while let Some(edge) = stack.pop() {
            match edge {
                Edge::Start(element) => {
                    yield_!(Output::StartTagOpen(element));
                    for attribute in element.attributes.iter() {
                        yield_!(Output::Attribute(attribute));
                    }
                    yield_!(Output::StartTagClose(element));
                    stack.push(Edge::End(element));
                    push_content(&mut stack, &element.content);
                }
                Edge::End(element) => {
                    yield_!(Output::EndTag(element));
                }
                Edge::Text(text) => {
                    yield_!(Output::Text(text));
                }
                Edge::Other(Item::Comment(text)) => {
                    yield_!(Output::Comment(text));
                }
                Edge::Other(Item::Directive(text)) => {
                    yield_!(Output::Directive(text));
                }
                Edge::Other(Item::ProcessingInstruction(pi)) => {
                    yield_!(Output::ProcessingInstruction(pi));
                }
                // elements and text have their own edges
                Edge::Other(_) => {}
            }
        }
    })
    .into_iter()
}
