#![forbid(unsafe_code)]

//! An owned XML element tree with structural query and editing operations.
//!
//! A [`DocumentTree`] owns a single [`Content`] value. Content is either
//! empty, a text value, exactly one child [`Element`], or a sequence of
//! [`Item`]s mixing elements with comments, directives, processing
//! instructions and text. Every element owns its content in turn, so the
//! whole tree is a plain recursive value: cloning it makes a deep copy, and
//! elements carry no reference to their parent.
//!
//! Sequences are addressed in two ways. A [`TrueIndex`] counts every item;
//! a [`FilteredIndex`] counts elements only. Structural mutations take true
//! indexes.
//!
//! ```rust
//! use xmledit::DocumentTree;
//!
//! let mut tree = DocumentTree::parse(
//!     "<Ships><Ship><Name>Dart</Name><Speed>10</Speed></Ship></Ships>",
//! )?;
//! let (ship, _) = tree.find("Name", "Dart").unwrap();
//! assert_eq!(ship.unwrap().float_value_of("Speed")?, 10.0);
//!
//! let ship = tree.find_using_mut(|e| e.has_child_with_value("Name", "Dart")).unwrap();
//! ship.scale_child_by("Speed", 1.5)?;
//! assert_eq!(
//!     tree.to_xml_string()?,
//!     "<Ships><Ship><Name>Dart</Name><Speed>15</Speed></Ship></Ships>"
//! );
//! # Ok::<(), xmledit::Error>(())
//! ```
//!
//! The tree is not synchronized: share it between threads only under your
//! own lock.

mod access;
mod content;
mod creation;
mod document;
mod entity;
mod error;
pub mod format;
mod index;
mod levelorder;
mod manipulation;
pub mod output;
mod parse;
pub mod sequence;
mod serialize;
mod valueaccess;
mod xmlvalue;

#[cfg(any(test, feature = "proptest"))]
pub mod proptest;

pub use access::SearchProperty;
pub use document::DocumentTree;
pub use error::Error;
pub use index::{FilteredIndex, TrueIndex};
pub use valueaccess::Scalar;
pub use xmlvalue::{Attribute, Content, ContentKind, Element, Item, ProcessingInstruction};
