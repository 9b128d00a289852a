//! # Annotext
//!
//! An annotated-text data model with a lossless JSON binding.
//!
//! ## Features
//!
//! - Immutable text plus typed annotation layers keyed by a closed set of attribute keys
//! - Builders for every record type
//! - Unknown fields preserved in extended-properties bags
//! - Morphological analyses in generic, Han and Arabic variants, decoded from untagged arrays
//! - A small CLI for inspecting and normalizing documents

pub mod attribute_key;
pub mod cli;
pub mod codec;
pub mod error;
pub mod model;

pub mod prelude {
    pub use crate::attribute_key::AttributeKey;
    pub use crate::codec::{MorphoAnalysisListCodec, ShapeRegistry, StandardShapes};
    pub use crate::error::{AnnotextError, Result};
    pub use crate::model::{
        AnnotatedText, AnnotatedTextBuilder, Attribute, BaseAttribute, Entity, EntityMention, Layer,
        ListAttribute, MorphoAnalysis, MorphoKind, Token,
    };
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
