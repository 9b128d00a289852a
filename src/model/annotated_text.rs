//! The annotated text container.
//!
//! An [`AnnotatedText`] is an immutable snapshot of a text, the annotation
//! layers attached to it (at most one per [`AttributeKey`]) and
//! document-level metadata. It is assembled with an
//! [`AnnotatedTextBuilder`]:
//!
//! ```
//! use annotext::model::{AnnotatedText, ListAttribute, Sentence, Token};
//!
//! let text = AnnotatedText::builder()
//!     .data("Hello world.")
//!     .tokens(ListAttribute::new(vec![
//!         Token::builder(0, 5, "Hello").build(),
//!         Token::builder(6, 11, "world").build(),
//!     ]))
//!     .sentences(ListAttribute::new(vec![Sentence::new(0, 12)]))
//!     .document_metadata_value("source", "example")
//!     .build();
//!
//! assert_eq!(text.tokens().map(|t| t.len()), Some(2));
//! assert!(text.entity_mentions().is_none());
//! assert_eq!(text.sub_sequence(6, 11), Some("world"));
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::attribute_key::AttributeKey;
use crate::model::attribute::{Attribute, ListAttribute};
use crate::model::entity::{Entity, EntityMention};
use crate::model::language::LanguageDetection;
use crate::model::region::{BaseNounPhrase, ScriptRegion, Sentence};
use crate::model::token::Token;
use crate::model::translation::{TranslatedData, TranslatedTokens};

/// Document-level metadata: each key maps to an ordered list of values.
pub type DocumentMetadata = BTreeMap<String, Vec<String>>;

/// One annotation layer. The variant decides the [`AttributeKey`] it is
/// stored under.
#[derive(Clone, Debug, PartialEq)]
pub enum Layer {
    Tokens(ListAttribute<Token>),
    Sentences(ListAttribute<Sentence>),
    EntityMentions(ListAttribute<EntityMention>),
    ResolvedEntities(ListAttribute<Entity>),
    ScriptRegions(ListAttribute<ScriptRegion>),
    BaseNounPhrases(ListAttribute<BaseNounPhrase>),
    LanguageDetection(LanguageDetection),
    LanguageDetectionRegions(ListAttribute<LanguageDetection>),
    TranslatedTokens(ListAttribute<TranslatedTokens>),
    TranslatedData(ListAttribute<TranslatedData>),
}

impl Layer {
    /// The key this layer is stored under.
    pub fn key(&self) -> AttributeKey {
        match self {
            Layer::Tokens(_) => AttributeKey::Token,
            Layer::Sentences(_) => AttributeKey::Sentence,
            Layer::EntityMentions(_) => AttributeKey::EntityMention,
            Layer::ResolvedEntities(_) => AttributeKey::ResolvedEntity,
            Layer::ScriptRegions(_) => AttributeKey::ScriptRegion,
            Layer::BaseNounPhrases(_) => AttributeKey::BaseNounPhrase,
            Layer::LanguageDetection(_) => AttributeKey::LanguageDetection,
            Layer::LanguageDetectionRegions(_) => AttributeKey::LanguageDetectionRegions,
            Layer::TranslatedTokens(_) => AttributeKey::TranslatedTokens,
            Layer::TranslatedData(_) => AttributeKey::TranslatedData,
        }
    }

    /// Number of records in the layer; a single detection counts as one.
    pub fn item_count(&self) -> usize {
        match self {
            Layer::Tokens(list) => list.len(),
            Layer::Sentences(list) => list.len(),
            Layer::EntityMentions(list) => list.len(),
            Layer::ResolvedEntities(list) => list.len(),
            Layer::ScriptRegions(list) => list.len(),
            Layer::BaseNounPhrases(list) => list.len(),
            Layer::LanguageDetection(_) => 1,
            Layer::LanguageDetectionRegions(list) => list.len(),
            Layer::TranslatedTokens(list) => list.len(),
            Layer::TranslatedData(list) => list.len(),
        }
    }
}

impl Serialize for Layer {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Layer::Tokens(list) => list.serialize(serializer),
            Layer::Sentences(list) => list.serialize(serializer),
            Layer::EntityMentions(list) => list.serialize(serializer),
            Layer::ResolvedEntities(list) => list.serialize(serializer),
            Layer::ScriptRegions(list) => list.serialize(serializer),
            Layer::BaseNounPhrases(list) => list.serialize(serializer),
            Layer::LanguageDetection(detection) => detection.serialize(serializer),
            Layer::LanguageDetectionRegions(list) => list.serialize(serializer),
            Layer::TranslatedTokens(list) => list.serialize(serializer),
            Layer::TranslatedData(list) => list.serialize(serializer),
        }
    }
}

type Layers = BTreeMap<AttributeKey, Layer>;

/// Reads the `attributes` object, letting each key pick its layer type.
fn deserialize_layers<'de, D>(deserializer: D) -> std::result::Result<Layers, D::Error>
where
    D: Deserializer<'de>,
{
    struct LayersVisitor;

    impl<'de> Visitor<'de> for LayersVisitor {
        type Value = Layers;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a map of attribute keys to annotation layers")
        }

        fn visit_map<A>(self, mut map: A) -> std::result::Result<Layers, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut layers = Layers::new();
            while let Some(key) = map.next_key::<AttributeKey>()? {
                let layer = match key {
                    AttributeKey::Token => Layer::Tokens(map.next_value()?),
                    AttributeKey::Sentence => Layer::Sentences(map.next_value()?),
                    AttributeKey::EntityMention => Layer::EntityMentions(map.next_value()?),
                    AttributeKey::ResolvedEntity => Layer::ResolvedEntities(map.next_value()?),
                    AttributeKey::ScriptRegion => Layer::ScriptRegions(map.next_value()?),
                    AttributeKey::BaseNounPhrase => Layer::BaseNounPhrases(map.next_value()?),
                    AttributeKey::LanguageDetection => Layer::LanguageDetection(map.next_value()?),
                    AttributeKey::LanguageDetectionRegions => {
                        Layer::LanguageDetectionRegions(map.next_value()?)
                    }
                    AttributeKey::TranslatedTokens => Layer::TranslatedTokens(map.next_value()?),
                    AttributeKey::TranslatedData => Layer::TranslatedData(map.next_value()?),
                };
                layers.insert(key, layer);
            }
            Ok(layers)
        }
    }

    deserializer.deserialize_map(LayersVisitor)
}

/// A text with its annotation layers and document metadata.
///
/// Offsets in the layers count characters (Unicode scalar values) of
/// [`data`](AnnotatedText::data).
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotatedText {
    #[serde(default)]
    data: String,
    #[serde(
        default,
        skip_serializing_if = "BTreeMap::is_empty",
        deserialize_with = "deserialize_layers"
    )]
    attributes: Layers,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    document_metadata: DocumentMetadata,
}

impl AnnotatedText {
    /// Start building from empty text.
    pub fn builder() -> AnnotatedTextBuilder {
        AnnotatedTextBuilder::new()
    }

    /// A builder seeded with a copy of this text's contents.
    pub fn to_builder(&self) -> AnnotatedTextBuilder {
        AnnotatedTextBuilder::from(self)
    }

    pub fn data(&self) -> &str {
        &self.data
    }

    /// Length of the text in characters.
    pub fn len(&self) -> usize {
        self.data.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The character at a character index.
    pub fn char_at(&self, index: usize) -> Option<char> {
        self.data.chars().nth(index)
    }

    /// The text between two character offsets, or `None` if the range is
    /// inverted or runs past the end.
    pub fn sub_sequence(&self, start: usize, end: usize) -> Option<&str> {
        if start > end {
            return None;
        }
        let from = self.byte_index(start)?;
        let to = self.byte_index(end)?;
        Some(&self.data[from..to])
    }

    /// The text an attribute covers.
    pub fn covered_text<A: Attribute + ?Sized>(&self, attribute: &A) -> Option<&str> {
        self.sub_sequence(attribute.start_offset(), attribute.end_offset())
    }

    fn byte_index(&self, char_index: usize) -> Option<usize> {
        self.data
            .char_indices()
            .map(|(byte, _)| byte)
            .chain(std::iter::once(self.data.len()))
            .nth(char_index)
    }

    /// All layers, keyed by attribute key.
    pub fn attributes(&self) -> &BTreeMap<AttributeKey, Layer> {
        &self.attributes
    }

    /// The layer stored under `key`, if any.
    pub fn attribute(&self, key: AttributeKey) -> Option<&Layer> {
        self.attributes.get(&key)
    }

    pub fn document_metadata(&self) -> &DocumentMetadata {
        &self.document_metadata
    }

    pub fn tokens(&self) -> Option<&ListAttribute<Token>> {
        match self.attribute(AttributeKey::Token) {
            Some(Layer::Tokens(list)) => Some(list),
            _ => None,
        }
    }

    pub fn sentences(&self) -> Option<&ListAttribute<Sentence>> {
        match self.attribute(AttributeKey::Sentence) {
            Some(Layer::Sentences(list)) => Some(list),
            _ => None,
        }
    }

    pub fn entity_mentions(&self) -> Option<&ListAttribute<EntityMention>> {
        match self.attribute(AttributeKey::EntityMention) {
            Some(Layer::EntityMentions(list)) => Some(list),
            _ => None,
        }
    }

    pub fn resolved_entities(&self) -> Option<&ListAttribute<Entity>> {
        match self.attribute(AttributeKey::ResolvedEntity) {
            Some(Layer::ResolvedEntities(list)) => Some(list),
            _ => None,
        }
    }

    pub fn script_regions(&self) -> Option<&ListAttribute<ScriptRegion>> {
        match self.attribute(AttributeKey::ScriptRegion) {
            Some(Layer::ScriptRegions(list)) => Some(list),
            _ => None,
        }
    }

    pub fn base_noun_phrases(&self) -> Option<&ListAttribute<BaseNounPhrase>> {
        match self.attribute(AttributeKey::BaseNounPhrase) {
            Some(Layer::BaseNounPhrases(list)) => Some(list),
            _ => None,
        }
    }

    /// Language of the text as a whole.
    pub fn whole_text_language_detection(&self) -> Option<&LanguageDetection> {
        match self.attribute(AttributeKey::LanguageDetection) {
            Some(Layer::LanguageDetection(detection)) => Some(detection),
            _ => None,
        }
    }

    pub fn language_detection_regions(&self) -> Option<&ListAttribute<LanguageDetection>> {
        match self.attribute(AttributeKey::LanguageDetectionRegions) {
            Some(Layer::LanguageDetectionRegions(list)) => Some(list),
            _ => None,
        }
    }

    pub fn translated_tokens(&self) -> Option<&ListAttribute<TranslatedTokens>> {
        match self.attribute(AttributeKey::TranslatedTokens) {
            Some(Layer::TranslatedTokens(list)) => Some(list),
            _ => None,
        }
    }

    pub fn translated_data(&self) -> Option<&ListAttribute<TranslatedData>> {
        match self.attribute(AttributeKey::TranslatedData) {
            Some(Layer::TranslatedData(list)) => Some(list),
            _ => None,
        }
    }
}

impl fmt::Display for AnnotatedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.data)
    }
}

/// Builder for [`AnnotatedText`].
///
/// Every layer setter replaces whatever was stored under the same key.
/// `build` consumes the builder, so a built text can never be reached
/// through it again.
#[derive(Debug, Default)]
pub struct AnnotatedTextBuilder {
    data: String,
    attributes: Layers,
    document_metadata: DocumentMetadata,
}

impl AnnotatedTextBuilder {
    pub fn new() -> Self {
        AnnotatedTextBuilder::default()
    }

    /// Set the text, replacing any previous text.
    pub fn data<S: Into<String>>(mut self, data: S) -> Self {
        self.data = data.into();
        self
    }

    /// Attach a layer under its own key.
    pub fn attribute(mut self, layer: Layer) -> Self {
        self.attributes.insert(layer.key(), layer);
        self
    }

    pub fn tokens(self, tokens: ListAttribute<Token>) -> Self {
        self.attribute(Layer::Tokens(tokens))
    }

    pub fn sentences(self, sentences: ListAttribute<Sentence>) -> Self {
        self.attribute(Layer::Sentences(sentences))
    }

    pub fn entity_mentions(self, mentions: ListAttribute<EntityMention>) -> Self {
        self.attribute(Layer::EntityMentions(mentions))
    }

    pub fn resolved_entities(self, entities: ListAttribute<Entity>) -> Self {
        self.attribute(Layer::ResolvedEntities(entities))
    }

    pub fn script_regions(self, regions: ListAttribute<ScriptRegion>) -> Self {
        self.attribute(Layer::ScriptRegions(regions))
    }

    pub fn base_noun_phrases(self, phrases: ListAttribute<BaseNounPhrase>) -> Self {
        self.attribute(Layer::BaseNounPhrases(phrases))
    }

    pub fn whole_text_language_detection(self, detection: LanguageDetection) -> Self {
        self.attribute(Layer::LanguageDetection(detection))
    }

    pub fn language_detection_regions(self, regions: ListAttribute<LanguageDetection>) -> Self {
        self.attribute(Layer::LanguageDetectionRegions(regions))
    }

    pub fn translated_tokens(self, translated: ListAttribute<TranslatedTokens>) -> Self {
        self.attribute(Layer::TranslatedTokens(translated))
    }

    pub fn translated_data(self, translated: ListAttribute<TranslatedData>) -> Self {
        self.attribute(Layer::TranslatedData(translated))
    }

    /// Set a metadata entry, replacing any previous values for the key.
    pub fn document_metadata<K, I, V>(mut self, key: K, values: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let values = values.into_iter().map(Into::into).collect();
        self.document_metadata.insert(key.into(), values);
        self
    }

    /// Set a metadata entry to a single value.
    pub fn document_metadata_value<K: Into<String>, V: Into<String>>(self, key: K, value: V) -> Self {
        self.document_metadata(key, [value])
    }

    pub fn current_data(&self) -> &str {
        &self.data
    }

    pub fn current_attributes(&self) -> &BTreeMap<AttributeKey, Layer> {
        &self.attributes
    }

    pub fn current_document_metadata(&self) -> &DocumentMetadata {
        &self.document_metadata
    }

    pub fn build(self) -> AnnotatedText {
        AnnotatedText {
            data: self.data,
            attributes: self.attributes,
            document_metadata: self.document_metadata,
        }
    }
}

impl From<&AnnotatedText> for AnnotatedTextBuilder {
    fn from(text: &AnnotatedText) -> Self {
        AnnotatedTextBuilder {
            data: text.data.clone(),
            attributes: text.attributes.clone(),
            document_metadata: text.document_metadata.clone(),
        }
    }
}
