//! JSON codecs that need more than a derive.
//!
//! - [`morpho_list`] - Mixed-variant morphological analysis arrays
//! - [`shapes`] - Per-variant record shapes used by the list codec

pub mod morpho_list;
pub mod shapes;

pub use morpho_list::{MorphoAnalysisListCodec, ShapeDecoder, ShapeRegistry, StandardShapes};
