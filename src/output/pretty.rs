use crate::output::Output;
use crate::xmlvalue::{Content, Element, Item};

// we need to track where we are in xml:space, so that we can know when to
// insert newlines and indentation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Space {
    Empty,
    Default,
    Preserve,
}

// The stack keeps track of where we are, and the xml space state. We are
// either in a mixed element (with text and subcontent) (in which case we don't
// do any indentation anymore, including for its descendants), or in an element
// without text, in which case we can potentially indent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StackEntry {
    Unmixed(Space),
    Mixed,
}

pub(crate) struct Pretty<IsSuppressed>
where
    IsSuppressed: Fn(&str) -> bool,
{
    is_suppressed: IsSuppressed,
    stack: Vec<StackEntry>,
}

fn has_children(element: &Element) -> bool {
    !matches!(element.content, Content::Empty)
}

// text anywhere among the children means the content is mixed
fn has_inline_child(element: &Element) -> bool {
    match &element.content {
        Content::Text(_) => true,
        Content::Sequence(items) => items.iter().any(|item| matches!(item, Item::Text(_))),
        Content::Empty | Content::SingleElement(_) => false,
    }
}

fn element_space(element: &Element) -> Space {
    let space = element
        .attributes
        .iter()
        .find(|attribute| attribute.prefix() == Some("xml") && attribute.name() == "space")
        .map(|attribute| attribute.value());
    match space {
        Some("preserve") => Space::Preserve,
        Some("default") => Space::Default,
        _ => Space::Empty,
    }
}

impl<IsSuppressed> Pretty<IsSuppressed>
where
    IsSuppressed: Fn(&str) -> bool,
{
    pub(crate) fn new(is_suppressed: IsSuppressed) -> Self {
        Pretty {
            is_suppressed,
            stack: Vec::new(),
        }
    }

    fn unmixed(&mut self, space: Space) {
        self.stack.push(StackEntry::Unmixed(space));
    }

    fn mixed(&mut self) {
        self.stack.push(StackEntry::Mixed);
    }

    fn in_mixed(&self) -> bool {
        self.stack.iter().any(|e| *e == StackEntry::Mixed)
    }

    fn in_space_preserve(&self) -> bool {
        for entry in self.stack.iter().rev() {
            match entry {
                StackEntry::Unmixed(Space::Preserve) => return true,
                StackEntry::Unmixed(Space::Default) => return false,
                StackEntry::Unmixed(Space::Empty) => (),
                StackEntry::Mixed => return false,
            }
        }
        false
    }

    fn pop(&mut self) {
        self.stack.pop();
    }

    fn get_indentation(&self) -> usize {
        if self.in_mixed() {
            return 0;
        }
        let mut count = 0;
        let mut in_preserve = false;
        for entry in self.stack.iter() {
            match entry {
                StackEntry::Unmixed(Space::Default) => {
                    in_preserve = false;
                    count += 1
                }
                StackEntry::Unmixed(Space::Preserve) => in_preserve = true,
                StackEntry::Unmixed(Space::Empty) => {
                    if !in_preserve {
                        count += 1
                    }
                }
                StackEntry::Mixed => (),
            }
        }
        count
    }

    fn get_newline(&self) -> bool {
        !self.in_mixed() && !self.in_space_preserve()
    }

    /// The indentation level before the output, and whether a newline
    /// follows it.
    pub(crate) fn prettify(&mut self, output: &Output) -> (usize, bool) {
        use Output::*;
        match output {
            StartTagOpen(_) => (self.get_indentation(), false),
            Comment(_) | Directive(_) | ProcessingInstruction(_) => {
                (self.get_indentation(), self.get_newline())
            }
            StartTagClose(element) => {
                let newline = if has_children(element) {
                    if !has_inline_child(element) {
                        // treat suppress as mixed content, as we don't want to
                        // indent anywhere inside
                        if (self.is_suppressed)(element.name()) {
                            self.mixed();
                        } else {
                            self.unmixed(element_space(element));
                        }
                        self.get_newline()
                    } else {
                        self.mixed();
                        false
                    }
                } else {
                    false
                };
                (0, newline)
            }
            EndTag(element) => {
                let indentation = if has_children(element) {
                    let no_indentation = self.in_mixed();
                    self.pop();
                    if !no_indentation {
                        self.get_indentation()
                    } else {
                        0
                    }
                } else {
                    0
                };
                (indentation, self.get_newline())
            }
            Attribute(_) | Text(_) => (0, false),
        }
    }
}
