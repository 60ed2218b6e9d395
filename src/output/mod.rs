//! Serialize trees back to XML.
//!
//! This module lets you control serialization with [`Parameters`].
mod common;
mod pretty;
mod serializer;
mod xml_serializer;

pub use common::{Indentation, Parameters};
pub(crate) use pretty::Pretty;
pub(crate) use serializer::{gen_outputs, gen_outputs_element};
pub use serializer::{Output, OutputToken};
pub(crate) use xml_serializer::XmlSerializer;
