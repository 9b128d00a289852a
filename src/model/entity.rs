//! Entity mentions and resolved entities.

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::model::attribute::{ExtendedProperties, hash_extended_properties, impl_attribute};

/// Chain id of an entity that belongs to no coreference chain.
pub const NO_COREFERENCE_CHAIN: i32 = -1;

fn no_coreference_chain() -> i32 {
    NO_COREFERENCE_CHAIN
}

fn is_no_coreference_chain(chain_id: &i32) -> bool {
    *chain_id == NO_COREFERENCE_CHAIN
}

/// JSON has no NaN, so a NaN confidence is written as `null`; read `null`
/// back as NaN.
fn deserialize_confidence<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

/// Bits used to compare and hash a confidence. All NaNs collapse to one
/// value; positive and negative zero stay distinct.
fn confidence_bits(confidence: f64) -> u64 {
    if confidence.is_nan() {
        f64::NAN.to_bits()
    } else {
        confidence.to_bits()
    }
}

/// A resolved entity: a span linked to an entity id.
///
/// Equality is structural over every field. `confidence` is compared
/// bitwise, so two NaN confidences are equal while `0.0` and `-0.0` are not.
/// Neither the offsets nor the confidence range are checked.
///
/// # Examples
///
/// ```
/// use annotext::model::entity::Entity;
///
/// let entity = Entity::builder(0, 6, "Q90").confidence(0.75).build();
/// assert_eq!(entity.entity_id(), "Q90");
/// assert_eq!(entity.coreference_chain_id(), -1);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    start_offset: usize,
    end_offset: usize,
    entity_id: String,
    #[serde(default = "no_coreference_chain")]
    coreference_chain_id: i32,
    #[serde(default, deserialize_with = "deserialize_confidence")]
    confidence: f64,
    #[serde(default, skip_serializing_if = "ExtendedProperties::is_empty")]
    extended_properties: ExtendedProperties,
}

/// Resolved entities are stored under the `resolvedEntity` key.
pub type ResolvedEntity = Entity;

impl_attribute!(Entity);

impl Entity {
    pub fn builder<S: Into<String>>(start_offset: usize, end_offset: usize, entity_id: S) -> EntityBuilder {
        EntityBuilder {
            start_offset,
            end_offset,
            entity_id: entity_id.into(),
            coreference_chain_id: NO_COREFERENCE_CHAIN,
            confidence: 0.0,
            extended_properties: ExtendedProperties::new(),
        }
    }

    /// A builder seeded with a copy of this entity.
    pub fn to_builder(&self) -> EntityBuilder {
        EntityBuilder {
            start_offset: self.start_offset,
            end_offset: self.end_offset,
            entity_id: self.entity_id.clone(),
            coreference_chain_id: self.coreference_chain_id,
            confidence: self.confidence,
            extended_properties: self.extended_properties.clone(),
        }
    }

    pub fn entity_id(&self) -> &str {
        &self.entity_id
    }

    /// The coreference chain, or [`NO_COREFERENCE_CHAIN`].
    pub fn coreference_chain_id(&self) -> i32 {
        self.coreference_chain_id
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }
}

impl PartialEq for Entity {
    fn eq(&self, other: &Self) -> bool {
        self.start_offset == other.start_offset
            && self.end_offset == other.end_offset
            && self.entity_id == other.entity_id
            && self.coreference_chain_id == other.coreference_chain_id
            && confidence_bits(self.confidence) == confidence_bits(other.confidence)
            && self.extended_properties == other.extended_properties
    }
}

impl Eq for Entity {}

impl Hash for Entity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.start_offset.hash(state);
        self.end_offset.hash(state);
        self.entity_id.hash(state);
        self.coreference_chain_id.hash(state);
        confidence_bits(self.confidence).hash(state);
        hash_extended_properties(&self.extended_properties, state);
    }
}

/// Builder for [`Entity`].
#[derive(Debug)]
pub struct EntityBuilder {
    start_offset: usize,
    end_offset: usize,
    entity_id: String,
    coreference_chain_id: i32,
    confidence: f64,
    extended_properties: ExtendedProperties,
}

impl EntityBuilder {
    pub fn entity_id<S: Into<String>>(mut self, entity_id: S) -> Self {
        self.entity_id = entity_id.into();
        self
    }

    pub fn coreference_chain_id(mut self, chain_id: i32) -> Self {
        self.coreference_chain_id = chain_id;
        self
    }

    pub fn confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }

    pub fn extended_property<S: Into<String>>(mut self, key: S, value: Value) -> Self {
        self.extended_properties.insert(key.into(), value);
        self
    }

    pub fn build(self) -> Entity {
        Entity {
            start_offset: self.start_offset,
            end_offset: self.end_offset,
            entity_id: self.entity_id,
            coreference_chain_id: self.coreference_chain_id,
            confidence: self.confidence,
            extended_properties: self.extended_properties,
        }
    }
}

/// A mention of an entity in the text, before resolution.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityMention {
    start_offset: usize,
    end_offset: usize,
    entity_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    subsource: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    normalized: Option<String>,
    #[serde(
        default = "no_coreference_chain",
        skip_serializing_if = "is_no_coreference_chain"
    )]
    coreference_chain_id: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "ExtendedProperties::is_empty")]
    extended_properties: ExtendedProperties,
}

impl_attribute!(EntityMention);

impl EntityMention {
    pub fn builder<S: Into<String>>(start_offset: usize, end_offset: usize, entity_type: S) -> EntityMentionBuilder {
        EntityMentionBuilder {
            mention: EntityMention {
                start_offset,
                end_offset,
                entity_type: entity_type.into(),
                source: None,
                subsource: None,
                normalized: None,
                coreference_chain_id: NO_COREFERENCE_CHAIN,
                confidence: None,
                extended_properties: ExtendedProperties::new(),
            },
        }
    }

    pub fn entity_type(&self) -> &str {
        &self.entity_type
    }

    /// Name of the component that produced the mention.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn subsource(&self) -> Option<&str> {
        self.subsource.as_deref()
    }

    pub fn normalized(&self) -> Option<&str> {
        self.normalized.as_deref()
    }

    pub fn coreference_chain_id(&self) -> i32 {
        self.coreference_chain_id
    }

    pub fn confidence(&self) -> Option<f64> {
        self.confidence
    }
}

/// Builder for [`EntityMention`].
#[derive(Debug)]
pub struct EntityMentionBuilder {
    mention: EntityMention,
}

impl EntityMentionBuilder {
    pub fn source<S: Into<String>>(mut self, source: S) -> Self {
        self.mention.source = Some(source.into());
        self
    }

    pub fn subsource<S: Into<String>>(mut self, subsource: S) -> Self {
        self.mention.subsource = Some(subsource.into());
        self
    }

    pub fn normalized<S: Into<String>>(mut self, normalized: S) -> Self {
        self.mention.normalized = Some(normalized.into());
        self
    }

    pub fn coreference_chain_id(mut self, chain_id: i32) -> Self {
        self.mention.coreference_chain_id = chain_id;
        self
    }

    pub fn confidence(mut self, confidence: f64) -> Self {
        self.mention.confidence = Some(confidence);
        self
    }

    pub fn extended_property<S: Into<String>>(mut self, key: S, value: Value) -> Self {
        self.mention.extended_properties.insert(key.into(), value);
        self
    }

    pub fn build(self) -> EntityMention {
        self.mention
    }
}
