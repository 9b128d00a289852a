//! Morphological analyses and their language-specific variants.
//!
//! Every analysis shares a [`MorphoCommon`] part (lemma, part of speech, raw
//! form, component tokens and an extended-properties bag). What it adds on
//! top is carried by the closed [`MorphoVariant`] union:
//!
//! - [`MorphoVariant::Generic`] adds nothing.
//! - [`MorphoVariant::Han`] adds readings.
//! - [`MorphoVariant::Arabic`] adds affix structure, see [`ArabicAnalysis`].
//!
//! Analyses are built through staged builders:
//!
//! ```
//! use annotext::model::morpho::{MorphoAnalysis, MorphoKind};
//!
//! let han = MorphoAnalysis::builder()
//!     .lemma("東京")
//!     .part_of_speech("NOUN")
//!     .han()
//!     .add_reading("とうきょう")
//!     .build();
//!
//! assert_eq!(han.kind(), MorphoKind::Han);
//! assert_eq!(han.as_han().unwrap().readings(), &["とうきょう".to_string()]);
//! ```
//!
//! The JSON form carries no type tag: a record is written in its variant's
//! shape and recognized again by the fields it holds. See
//! [`crate::codec::morpho_list`].

use std::collections::HashSet;
use std::fmt;

use lazy_static::lazy_static;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::codec::morpho_list::MorphoAnalysisListCodec;
use crate::model::attribute::{BaseAttribute, ExtendedProperties};
use crate::model::token::Token;

/// Wire names of the fields every variant declares.
pub const COMMON_FIELD_NAMES: [&str; 4] = ["lemma", "partOfSpeech", "raw", "components"];

/// Wire name of the Han readings field.
pub const READINGS: &str = "readings";

/// Wire names of the fields only an Arabic analysis declares.
pub const ARABIC_FIELD_NAMES: [&str; 11] = [
    "prefixLength",
    "stemLength",
    "root",
    "definiteArticle",
    "strippablePrefix",
    "prefixes",
    "prefixTags",
    "stems",
    "stemTags",
    "suffixes",
    "suffixTags",
];

lazy_static! {
    static ref ARABIC_FIELDS: HashSet<&'static str> = ARABIC_FIELD_NAMES.iter().copied().collect();
}

/// Whether `name` is a field declared by the Arabic variant and not by the
/// common part.
pub fn is_arabic_field(name: &str) -> bool {
    ARABIC_FIELDS.contains(name)
}

/// Which variant an analysis is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum MorphoKind {
    #[default]
    Generic,
    Han,
    Arabic,
}

impl MorphoKind {
    /// Whether records of this kind declare a typed field named `name`.
    pub fn declares_field(&self, name: &str) -> bool {
        COMMON_FIELD_NAMES.iter().any(|field| *field == name)
            || match self {
                MorphoKind::Generic => false,
                MorphoKind::Han => name == READINGS,
                MorphoKind::Arabic => is_arabic_field(name),
            }
    }
}

impl fmt::Display for MorphoKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MorphoKind::Generic => "generic",
            MorphoKind::Han => "han",
            MorphoKind::Arabic => "arabic",
        };
        f.write_str(name)
    }
}

/// Fields every analysis variant has.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct MorphoCommon {
    pub(crate) lemma: Option<String>,
    pub(crate) part_of_speech: Option<String>,
    pub(crate) raw: Option<String>,
    pub(crate) components: Vec<Token>,
    pub(crate) extended_properties: ExtendedProperties,
}

impl MorphoCommon {
    pub fn lemma(&self) -> Option<&str> {
        self.lemma.as_deref()
    }

    pub fn part_of_speech(&self) -> Option<&str> {
        self.part_of_speech.as_deref()
    }

    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }

    /// Tokens this analysis decomposes into (compounds), in order.
    pub fn components(&self) -> &[Token] {
        &self.components
    }

    pub fn extended_properties(&self) -> &ExtendedProperties {
        &self.extended_properties
    }

    fn serialize_fields<M: SerializeMap>(&self, map: &mut M) -> Result<(), M::Error> {
        if let Some(lemma) = &self.lemma {
            map.serialize_entry("lemma", lemma)?;
        }
        if let Some(part_of_speech) = &self.part_of_speech {
            map.serialize_entry("partOfSpeech", part_of_speech)?;
        }
        if let Some(raw) = &self.raw {
            map.serialize_entry("raw", raw)?;
        }
        if !self.components.is_empty() {
            map.serialize_entry("components", &self.components)?;
        }
        Ok(())
    }
}

/// Han-specific part of an analysis.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct HanAnalysis {
    readings: Vec<String>,
}

impl HanAnalysis {
    pub fn readings(&self) -> &[String] {
        &self.readings
    }
}

/// One affix or stem with its tag.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TaggedSegment {
    pub value: String,
    pub tag: String,
}

impl TaggedSegment {
    pub fn new<V: Into<String>, T: Into<String>>(value: V, tag: T) -> Self {
        TaggedSegment {
            value: value.into(),
            tag: tag.into(),
        }
    }
}

/// Arabic-specific part of an analysis.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ArabicAnalysis {
    lengths: Option<(i32, i32)>,
    root: Option<String>,
    definite_article: bool,
    strippable_prefix: bool,
    prefixes: Vec<TaggedSegment>,
    stems: Vec<TaggedSegment>,
    suffixes: Vec<TaggedSegment>,
}

impl ArabicAnalysis {
    /// Length of the prefix, set only together with the stem length.
    pub fn prefix_length(&self) -> Option<i32> {
        self.lengths.map(|(prefix, _)| prefix)
    }

    /// Length of the stem, set only together with the prefix length.
    pub fn stem_length(&self) -> Option<i32> {
        self.lengths.map(|(_, stem)| stem)
    }

    pub fn root(&self) -> Option<&str> {
        self.root.as_deref()
    }

    pub fn definite_article(&self) -> bool {
        self.definite_article
    }

    pub fn strippable_prefix(&self) -> bool {
        self.strippable_prefix
    }

    pub fn prefixes(&self) -> &[TaggedSegment] {
        &self.prefixes
    }

    pub fn stems(&self) -> &[TaggedSegment] {
        &self.stems
    }

    pub fn suffixes(&self) -> &[TaggedSegment] {
        &self.suffixes
    }

    fn serialize_fields<M: SerializeMap>(&self, map: &mut M) -> Result<(), M::Error> {
        if let Some((prefix_length, stem_length)) = self.lengths {
            map.serialize_entry("prefixLength", &prefix_length)?;
            map.serialize_entry("stemLength", &stem_length)?;
        }
        if let Some(root) = &self.root {
            map.serialize_entry("root", root)?;
        }
        // Always present so the record keeps an Arabic-only key.
        map.serialize_entry("definiteArticle", &self.definite_article)?;
        map.serialize_entry("strippablePrefix", &self.strippable_prefix)?;
        serialize_segments(map, "prefixes", "prefixTags", &self.prefixes)?;
        serialize_segments(map, "stems", "stemTags", &self.stems)?;
        serialize_segments(map, "suffixes", "suffixTags", &self.suffixes)?;
        Ok(())
    }
}

/// Write segments as two parallel arrays, values then tags.
fn serialize_segments<M: SerializeMap>(
    map: &mut M,
    values_name: &'static str,
    tags_name: &'static str,
    segments: &[TaggedSegment],
) -> Result<(), M::Error> {
    if segments.is_empty() {
        return Ok(());
    }
    let values: Vec<&str> = segments.iter().map(|s| s.value.as_str()).collect();
    let tags: Vec<&str> = segments.iter().map(|s| s.tag.as_str()).collect();
    map.serialize_entry(values_name, &values)?;
    map.serialize_entry(tags_name, &tags)
}

/// The variant-specific part of an analysis.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum MorphoVariant {
    #[default]
    Generic,
    Han(HanAnalysis),
    Arabic(ArabicAnalysis),
}

impl MorphoVariant {
    pub fn kind(&self) -> MorphoKind {
        match self {
            MorphoVariant::Generic => MorphoKind::Generic,
            MorphoVariant::Han(_) => MorphoKind::Han,
            MorphoVariant::Arabic(_) => MorphoKind::Arabic,
        }
    }
}

/// A morphological analysis of a token.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct MorphoAnalysis {
    common: MorphoCommon,
    variant: MorphoVariant,
}

impl MorphoAnalysis {
    /// Start building an analysis; finish with `build()` for a generic one
    /// or switch stage with `han()` / `arabic()`.
    pub fn builder() -> MorphoAnalysisBuilder {
        MorphoAnalysisBuilder::new()
    }

    pub fn common(&self) -> &MorphoCommon {
        &self.common
    }

    pub fn variant(&self) -> &MorphoVariant {
        &self.variant
    }

    pub fn kind(&self) -> MorphoKind {
        self.variant.kind()
    }

    pub fn lemma(&self) -> Option<&str> {
        self.common.lemma()
    }

    pub fn part_of_speech(&self) -> Option<&str> {
        self.common.part_of_speech()
    }

    pub fn raw(&self) -> Option<&str> {
        self.common.raw()
    }

    pub fn components(&self) -> &[Token] {
        self.common.components()
    }

    pub fn as_han(&self) -> Option<&HanAnalysis> {
        match &self.variant {
            MorphoVariant::Han(han) => Some(han),
            _ => None,
        }
    }

    pub fn as_arabic(&self) -> Option<&ArabicAnalysis> {
        match &self.variant {
            MorphoVariant::Arabic(arabic) => Some(arabic),
            _ => None,
        }
    }

    /// Split into the common part and the variant part.
    pub fn into_parts(self) -> (MorphoCommon, MorphoVariant) {
        (self.common, self.variant)
    }
}

impl BaseAttribute for MorphoAnalysis {
    fn extended_properties(&self) -> &ExtendedProperties {
        &self.common.extended_properties
    }
}

/// Writes the record in its own variant's shape, with the extended
/// properties flattened into the same object. Bag entries whose key names a
/// typed field of the record's own shape are not written.
impl Serialize for MorphoAnalysis {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        self.common.serialize_fields(&mut map)?;
        match &self.variant {
            MorphoVariant::Generic => {}
            MorphoVariant::Han(han) => map.serialize_entry(READINGS, &han.readings)?,
            MorphoVariant::Arabic(arabic) => arabic.serialize_fields(&mut map)?,
        }
        let kind = self.kind();
        for (key, value) in &self.common.extended_properties {
            if !kind.declares_field(key) {
                map.serialize_entry(key, value)?;
            }
        }
        map.end()
    }
}

/// Reads one record the way the first element of an analysis array is read:
/// with the generic shape, promoted to a variant by its leftover fields.
impl<'de> Deserialize<'de> for MorphoAnalysis {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        MorphoAnalysisListCodec::standard()
            .decode_one(value)
            .map_err(serde::de::Error::custom)
    }
}

/// Builder stage shared by all variants.
#[derive(Debug, Default)]
pub struct MorphoAnalysisBuilder {
    common: MorphoCommon,
}

impl MorphoAnalysisBuilder {
    pub fn new() -> Self {
        MorphoAnalysisBuilder {
            common: MorphoCommon::default(),
        }
    }

    pub fn lemma<S: Into<String>>(mut self, lemma: S) -> Self {
        self.common.lemma = Some(lemma.into());
        self
    }

    pub fn part_of_speech<S: Into<String>>(mut self, part_of_speech: S) -> Self {
        self.common.part_of_speech = Some(part_of_speech.into());
        self
    }

    pub fn raw<S: Into<String>>(mut self, raw: S) -> Self {
        self.common.raw = Some(raw.into());
        self
    }

    pub fn add_component(mut self, token: Token) -> Self {
        self.common.components.push(token);
        self
    }

    pub fn components<I: IntoIterator<Item = Token>>(mut self, tokens: I) -> Self {
        self.common.components.extend(tokens);
        self
    }

    /// Set one extended property, replacing any previous value.
    ///
    /// The key should not name a typed field. A key naming a field of the
    /// record's own shape is dropped on serialization; one naming a field of
    /// another variant (`readings`, an Arabic field) makes the record read
    /// back as that variant.
    pub fn extended_property<S: Into<String>>(mut self, key: S, value: Value) -> Self {
        self.common.extended_properties.insert(key.into(), value);
        self
    }

    /// Replace the whole extended-properties bag. Same key rules as
    /// [`extended_property`](Self::extended_property).
    pub fn extended_properties(mut self, properties: ExtendedProperties) -> Self {
        self.common.extended_properties = properties;
        self
    }

    /// Continue as a Han analysis.
    pub fn han(self) -> HanMorphoAnalysisBuilder {
        HanMorphoAnalysisBuilder {
            common: self.common,
            han: HanAnalysis::default(),
        }
    }

    /// Continue as an Arabic analysis.
    pub fn arabic(self) -> ArabicMorphoAnalysisBuilder {
        ArabicMorphoAnalysisBuilder {
            common: self.common,
            arabic: ArabicAnalysis::default(),
        }
    }

    /// Build a generic analysis.
    pub fn build(self) -> MorphoAnalysis {
        MorphoAnalysis {
            common: self.common,
            variant: MorphoVariant::Generic,
        }
    }
}

/// Builder stage for Han analyses.
#[derive(Debug)]
pub struct HanMorphoAnalysisBuilder {
    common: MorphoCommon,
    han: HanAnalysis,
}

impl HanMorphoAnalysisBuilder {
    pub fn add_reading<S: Into<String>>(mut self, reading: S) -> Self {
        self.han.readings.push(reading.into());
        self
    }

    pub fn readings<I, S>(mut self, readings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.han.readings.extend(readings.into_iter().map(Into::into));
        self
    }

    pub fn extended_property<S: Into<String>>(mut self, key: S, value: Value) -> Self {
        self.common.extended_properties.insert(key.into(), value);
        self
    }

    pub fn build(self) -> MorphoAnalysis {
        MorphoAnalysis {
            common: self.common,
            variant: MorphoVariant::Han(self.han),
        }
    }
}

/// Builder stage for Arabic analyses.
#[derive(Debug)]
pub struct ArabicMorphoAnalysisBuilder {
    common: MorphoCommon,
    arabic: ArabicAnalysis,
}

impl ArabicMorphoAnalysisBuilder {
    /// Set prefix and stem length together.
    pub fn lengths(mut self, prefix_length: i32, stem_length: i32) -> Self {
        self.arabic.lengths = Some((prefix_length, stem_length));
        self
    }

    pub fn root<S: Into<String>>(mut self, root: S) -> Self {
        self.arabic.root = Some(root.into());
        self
    }

    pub fn definite_article(mut self, definite_article: bool) -> Self {
        self.arabic.definite_article = definite_article;
        self
    }

    pub fn strippable_prefix(mut self, strippable_prefix: bool) -> Self {
        self.arabic.strippable_prefix = strippable_prefix;
        self
    }

    pub fn add_prefix<V: Into<String>, T: Into<String>>(mut self, value: V, tag: T) -> Self {
        self.arabic.prefixes.push(TaggedSegment::new(value, tag));
        self
    }

    pub fn add_stem<V: Into<String>, T: Into<String>>(mut self, value: V, tag: T) -> Self {
        self.arabic.stems.push(TaggedSegment::new(value, tag));
        self
    }

    pub fn add_suffix<V: Into<String>, T: Into<String>>(mut self, value: V, tag: T) -> Self {
        self.arabic.suffixes.push(TaggedSegment::new(value, tag));
        self
    }

    pub fn extended_property<S: Into<String>>(mut self, key: S, value: Value) -> Self {
        self.common.extended_properties.insert(key.into(), value);
        self
    }

    pub fn build(self) -> MorphoAnalysis {
        MorphoAnalysis {
            common: self.common,
            variant: MorphoVariant::Arabic(self.arabic),
        }
    }
}
