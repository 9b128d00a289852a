//! The annotated-text data model.
//!
//! # Core Components
//!
//! - [`AnnotatedText`] - Immutable text plus its annotation layers
//! - [`attribute`] - Shared traits, the extended-properties bag and [`ListAttribute`]
//! - [`morpho`] - Morphological analyses (generic, Han, Arabic)
//! - [`token`], [`entity`], [`region`], [`language`], [`translation`] - Layer record types
//!
//! Every record keeps the fields its schema does not know about in an
//! extended-properties bag, so unfamiliar input survives a round trip.

pub mod annotated_text;
pub mod attribute;
pub mod entity;
pub mod language;
pub mod morpho;
pub mod region;
pub mod token;
pub mod translation;

// Re-export commonly used types
pub use annotated_text::{AnnotatedText, AnnotatedTextBuilder, DocumentMetadata, Layer};
pub use attribute::{Attribute, BaseAttribute, ExtendedProperties, ListAttribute, ListAttributeBuilder};
pub use entity::{Entity, EntityMention, NO_COREFERENCE_CHAIN, ResolvedEntity};
pub use language::{DetectionResult, LanguageDetection};
pub use morpho::{
    ArabicAnalysis, HanAnalysis, MorphoAnalysis, MorphoCommon, MorphoKind, MorphoVariant,
    TaggedSegment,
};
pub use region::{BaseNounPhrase, ScriptRegion, Sentence};
pub use token::Token;
pub use translation::{TranslatedData, TranslatedTokens};
