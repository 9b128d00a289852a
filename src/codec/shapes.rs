//! Record shapes for the three analysis variants.
//!
//! Each shape reads the fields its variant declares and collects everything
//! else into the record's extended-properties bag. These are the decoders
//! [`StandardShapes`](super::morpho_list::StandardShapes) hands out.

use serde::Deserialize;
use serde_json::Value;

use crate::error::Result;
use crate::model::attribute::ExtendedProperties;
use crate::model::morpho::{ArabicMorphoAnalysisBuilder, MorphoAnalysis, MorphoAnalysisBuilder};
use crate::model::token::Token;

/// Fields shared by every variant.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CommonFields {
    lemma: Option<String>,
    part_of_speech: Option<String>,
    raw: Option<String>,
    components: Option<Vec<Token>>,
}

impl CommonFields {
    fn into_builder(self, leftovers: ExtendedProperties) -> MorphoAnalysisBuilder {
        let mut builder = MorphoAnalysis::builder().extended_properties(leftovers);
        if let Some(lemma) = self.lemma {
            builder = builder.lemma(lemma);
        }
        if let Some(part_of_speech) = self.part_of_speech {
            builder = builder.part_of_speech(part_of_speech);
        }
        if let Some(raw) = self.raw {
            builder = builder.raw(raw);
        }
        builder.components(self.components.unwrap_or_default())
    }
}

/// The Arabic-only fields, all optional.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ArabicFields {
    prefix_length: Option<i32>,
    stem_length: Option<i32>,
    root: Option<String>,
    definite_article: Option<bool>,
    strippable_prefix: Option<bool>,
    prefixes: Option<Vec<String>>,
    prefix_tags: Option<Vec<String>>,
    stems: Option<Vec<String>>,
    stem_tags: Option<Vec<String>>,
    suffixes: Option<Vec<String>>,
    suffix_tags: Option<Vec<String>>,
}

impl ArabicFields {
    /// Apply the present fields to an Arabic builder.
    ///
    /// # Panics
    ///
    /// Panics if a values array is longer than its tags array (or the tags
    /// are missing while the values are present).
    pub(crate) fn apply(self, mut builder: ArabicMorphoAnalysisBuilder) -> ArabicMorphoAnalysisBuilder {
        if let (Some(prefix_length), Some(stem_length)) = (self.prefix_length, self.stem_length) {
            builder = builder.lengths(prefix_length, stem_length);
        }
        if let Some(root) = self.root {
            builder = builder.root(root);
        }
        if let Some(definite_article) = self.definite_article {
            builder = builder.definite_article(definite_article);
        }
        if let Some(strippable_prefix) = self.strippable_prefix {
            builder = builder.strippable_prefix(strippable_prefix);
        }
        for (value, tag) in pair_up(self.prefixes, self.prefix_tags) {
            builder = builder.add_prefix(value, tag);
        }
        for (value, tag) in pair_up(self.stems, self.stem_tags) {
            builder = builder.add_stem(value, tag);
        }
        for (value, tag) in pair_up(self.suffixes, self.suffix_tags) {
            builder = builder.add_suffix(value, tag);
        }
        builder
    }
}

/// Zip parallel value and tag arrays by index. Tags beyond the values are
/// ignored; a missing tag is out of range and panics.
fn pair_up(values: Option<Vec<String>>, tags: Option<Vec<String>>) -> Vec<(String, String)> {
    let Some(values) = values else {
        return Vec::new();
    };
    let tags = tags.unwrap_or_default();
    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| (value, tags[index].clone()))
        .collect()
}

#[derive(Deserialize)]
struct GenericShape {
    #[serde(flatten)]
    common: CommonFields,
    #[serde(flatten)]
    leftovers: ExtendedProperties,
}

#[derive(Deserialize)]
struct HanShape {
    #[serde(flatten)]
    common: CommonFields,
    #[serde(default)]
    readings: Option<Vec<String>>,
    #[serde(flatten)]
    leftovers: ExtendedProperties,
}

#[derive(Deserialize)]
struct ArabicShape {
    #[serde(flatten)]
    common: CommonFields,
    #[serde(flatten)]
    arabic: ArabicFields,
    #[serde(flatten)]
    leftovers: ExtendedProperties,
}

/// Read a record with the generic shape.
pub fn decode_generic(value: Value) -> Result<MorphoAnalysis> {
    let shape: GenericShape = serde_json::from_value(value)?;
    Ok(shape.common.into_builder(shape.leftovers).build())
}

/// Read a record with the Han shape; `readings` may be absent.
pub fn decode_han(value: Value) -> Result<MorphoAnalysis> {
    let shape: HanShape = serde_json::from_value(value)?;
    Ok(shape
        .common
        .into_builder(shape.leftovers)
        .han()
        .readings(shape.readings.unwrap_or_default())
        .build())
}

/// Read a record with the Arabic shape.
///
/// # Panics
///
/// Panics on parallel value/tag arrays of mismatched length, see
/// [`ArabicFields::apply`].
pub fn decode_arabic(value: Value) -> Result<MorphoAnalysis> {
    let shape: ArabicShape = serde_json::from_value(value)?;
    let builder = shape.common.into_builder(shape.leftovers).arabic();
    Ok(shape.arabic.apply(builder).build())
}
