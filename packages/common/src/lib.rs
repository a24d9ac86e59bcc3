//! Shared data model for sitecraft: property values, the serialized
//! document format and the virtual DOM that components render to.

pub mod document;
pub mod error;
pub mod props;
pub mod result;
pub mod vdom;

pub use document::{NodeId, SerializedDocument, SerializedNode, DOCUMENT_VERSION, MAX_DEPTH};
pub use error::*;
pub use props::{PropValue, Props, Record};
pub use result::*;
pub use vdom::VNode;
