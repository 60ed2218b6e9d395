//! Proptest support
//!
//! Proptests allow you to test for *properties* of your code that must hold
//! for arbitrary data. This module lets you generate arbitrary elements,
//! content values and documents.
//!
//! This can be enabled by adding the `proptest` feature to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! xmledit = { version = "0.1", features = ["proptest"] }
//! ```
//!
//! See the [`proptest`](https://docs.rs/proptest/latest/proptest/)
//! documentation for more information.

use std::collections::HashSet;

use proptest::prelude::*;

use crate::document::DocumentTree;
use crate::xmlvalue::{Attribute, Content, Element, Item, ProcessingInstruction};

const ELEMENT_NAMES: &[&str] = &["a", "b", "c", "d", "e"];
const ATTRIBUTE_NAMES: &[&str] = &["q", "r", "s"];
const PI_NAMES: &[&str] = &["pi1", "pi2", "pi3", "pi4", "pi5"];
const XML_STRING: &str = "[\u{000a}\u{0009}][\u{0020}-\u{D7FF}][\u{E000}-\u{FFFD}]*";
const XML_STRING_WITHOUT_WHITESPACE: &str = "[\u{0020}-\u{D7FF}][\u{E000}-\u{FFFD}]*";

fn arb_attribute() -> impl Strategy<Value = Attribute> {
    (
        prop::sample::select(ATTRIBUTE_NAMES),
        XML_STRING_WITHOUT_WHITESPACE,
    )
        .prop_map(|(name, value)| Attribute::new(name, value))
}

fn arb_comment() -> impl Strategy<Value = String> {
    XML_STRING.prop_filter("comment", |s| !s.contains('-'))
}

fn arb_processing_instruction() -> impl Strategy<Value = ProcessingInstruction> {
    (
        prop::sample::select(PI_NAMES),
        prop::option::of(
            XML_STRING_WITHOUT_WHITESPACE
                .prop_filter("non-empty string", |s| !s.is_empty() && !s.contains("?>")),
        ),
    )
        .prop_map(|(target, data)| ProcessingInstruction::new(target.to_string(), data.as_deref()))
}

fn unduplicate_attributes(attributes: Vec<Attribute>) -> Vec<Attribute> {
    let mut seen = HashSet::new();
    attributes
        .into_iter()
        .filter(|attribute| seen.insert(attribute.name.clone()))
        .collect()
}

/// Generate an arbitrary sequence item. Elements nest up to 8 levels deep.
pub fn arb_item() -> impl Strategy<Value = Item> {
    let leaf = prop_oneof![
        XML_STRING.prop_map(Item::Text),
        arb_comment().prop_map(Item::Comment),
        arb_processing_instruction().prop_map(Item::ProcessingInstruction),
        prop::sample::select(ELEMENT_NAMES).prop_map(|name| Item::Element(Element::new(name))),
    ];

    leaf.prop_recursive(
        8,   // levels deep
        256, // maximum size of 256 nodes
        10,  // up to 10 items per collection
        |inner| {
            (
                prop::sample::select(ELEMENT_NAMES),
                prop::collection::vec(inner, 0..10),
                prop::collection::vec(arb_attribute(), 0..4),
            )
                .prop_map(|(name, items, attributes)| {
                    let mut element = Element::new(name);
                    element.attributes = unduplicate_attributes(attributes);
                    element.content = shape(items);
                    Item::Element(element)
                })
        },
    )
}

// spread generated items over every content shape
fn shape(mut items: Vec<Item>) -> Content {
    match items.len() {
        0 => Content::Empty,
        1 => match items.remove(0) {
            Item::Element(element) => Content::SingleElement(Box::new(element)),
            Item::Text(text) => Content::Text(text),
            item => Content::Sequence(vec![item]),
        },
        _ => Content::Sequence(items),
    }
}

/// Generate an arbitrary content value, of any shape.
pub fn arb_content() -> impl Strategy<Value = Content> {
    prop::collection::vec(arb_item(), 0..10).prop_map(shape)
}

/// Generate an arbitrary sequence content value.
pub fn arb_sequence() -> impl Strategy<Value = Content> {
    prop::collection::vec(arb_item(), 1..10).prop_map(Content::Sequence)
}

prop_compose! {
    /// Generate an arbitrary element.
    pub fn arb_element()(name in prop::sample::select(ELEMENT_NAMES),
                         content in arb_content(),
                         attributes in prop::collection::vec(arb_attribute(), 0..4)) -> Element {
        let mut element = Element::new(name);
        element.attributes = unduplicate_attributes(attributes);
        element.content = content;
        element
    }
}

/// Configure proptest
#[derive(Default)]
pub struct Config {
    /// Can generate comments and pi outside the document element
    pub comments_and_pi_outside_document_element: bool,
}

/// Generate an arbitrary document: one document element, optionally
/// surrounded by comments and processing instructions.
pub fn arb_document_tree() -> impl Strategy<Value = DocumentTree> {
    arb_document_tree_with_config(Config {
        comments_and_pi_outside_document_element: true,
    })
}

/// Generate an arbitrary document, with configuration.
pub fn arb_document_tree_with_config(config: Config) -> BoxedStrategy<DocumentTree> {
    if config.comments_and_pi_outside_document_element {
        let before = prop::collection::vec(
            prop_oneof![
                arb_comment().prop_map(Item::Comment),
                arb_processing_instruction().prop_map(Item::ProcessingInstruction),
            ],
            0..10,
        );
        let after = before.clone();
        (before, arb_element(), after)
            .prop_map(|(before, document_element, after)| {
                let mut items = before;
                items.push(Item::Element(document_element));
                items.extend(after);
                DocumentTree::new(shape(items))
            })
            .boxed()
    } else {
        arb_element().prop_map(DocumentTree::from).boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::TrueIndex;

    proptest! {
        #[test]
        fn test_arb_document_can_serialize_parse(tree in arb_document_tree()) {
            let serialized = tree.to_xml_string().unwrap();
            let parsed = DocumentTree::parse(&serialized);
            prop_assert!(parsed.is_ok(), "Cannot parse: {} {:?}", serialized, parsed.err().unwrap());
        }

        #[test]
        fn test_serialize_parse_keeps_elements(tree in arb_document_tree_with_config(Config::default())) {
            let serialized = tree.to_xml_string().unwrap();
            let parsed = DocumentTree::parse(&serialized).unwrap();
            let names = |tree: &DocumentTree| {
                tree.level_order().map(|(_, e)| e.name().to_string()).collect::<Vec<_>>()
            };
            prop_assert_eq!(names(&tree), names(&parsed));
        }

        #[test]
        fn test_clone_is_equal_and_independent(element in arb_element()) {
            let mut copy = element.clone();
            prop_assert_eq!(&copy, &element);
            copy.set_attribute("changed", "yes");
            copy.content_mut().set_contents("replaced");
            prop_assert_eq!(element.attribute("changed"), None);
            prop_assert_ne!(&copy, &element);
        }

        #[test]
        fn test_true_indexes_point_at_elements(content in arb_content()) {
            let by_filter = content.elements().collect::<Vec<_>>();
            let by_true_index = content.elements_with_true_index().collect::<Vec<_>>();
            prop_assert_eq!(by_filter.len(), by_true_index.len());
            for (filtered, (index, element)) in by_filter.iter().zip(by_true_index.iter()) {
                prop_assert!(std::ptr::eq(*filtered, *element));
                prop_assert!(std::ptr::eq(content.element_at_true_index(*index).unwrap(), *element));
            }
        }

        #[test]
        fn test_truncate_keeps_other_items(mut content in arb_sequence(), count in 0..5usize) {
            let others = content.len() - content.elements().count();
            let elements = content.elements().count();
            content.truncate(count).unwrap();
            prop_assert_eq!(content.elements().count(), elements.min(count));
            prop_assert_eq!(content.len() - content.elements().count(), others);
        }

        #[test]
        fn test_insert_then_remove_is_identity(content in arb_sequence(), item in arb_item(), at in 0..10usize) {
            let mut edited = content.clone();
            let at = TrueIndex::new(at.min(content.len()));
            edited.insert_at(at, item.clone()).unwrap();
            prop_assert_eq!(edited.len(), content.len() + 1);
            let removed = edited.remove_span(at, 1).unwrap();
            prop_assert_eq!(removed, vec![item]);
            prop_assert_eq!(edited, content);
        }

        #[test]
        fn test_reorder_inverse(content in arb_sequence(), from in 0..10usize, to in 0..10usize) {
            let len = content.len();
            let (from, to) = (TrueIndex::new(from % len), TrueIndex::new(to % len));
            let mut edited = content.clone();
            edited.reorder(from, to).unwrap();
            edited.reorder(to, from).unwrap();
            prop_assert_eq!(edited, content);
        }
    }
}
