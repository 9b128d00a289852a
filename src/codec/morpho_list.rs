//! Decoding and encoding of mixed-variant morphological analysis arrays.
//!
//! The JSON form of an analysis carries no type tag. A decoder walks the
//! array and reads each record with the shape of the *current* variant,
//! starting with the generic one. Whatever that shape does not recognize
//! lands in the record's leftover bag, and the leftover keys decide whether
//! the record is promoted:
//!
//! - a `readings` key makes it a Han analysis;
//! - otherwise any Arabic-only key (see
//!   [`ARABIC_FIELD_NAMES`](crate::model::morpho::ARABIC_FIELD_NAMES)) makes
//!   it an Arabic analysis;
//! - otherwise it stays as decoded, leftovers and all.
//!
//! A promotion is sticky: every later element of the same array is read
//! with the promoted variant's shape, whatever it contains.
//!
//! ```
//! use annotext::codec::MorphoAnalysisListCodec;
//! use annotext::model::MorphoKind;
//!
//! let codec = MorphoAnalysisListCodec::standard();
//! let analyses = codec
//!     .decode_str(r#"[{"lemma": "a", "readings": ["r1", "r2"]}, {"lemma": "b"}]"#)
//!     .unwrap();
//!
//! assert_eq!(analyses[0].kind(), MorphoKind::Han);
//! assert_eq!(analyses[1].kind(), MorphoKind::Han);
//! ```
//!
//! The module also works as a serde `with` adapter for
//! `Vec<MorphoAnalysis>` fields, using the standard codec.

use log::{debug, trace};
use serde::{Deserialize, Deserializer, Serializer};
use serde_json::Value;

use crate::codec::shapes;
use crate::error::{AnnotextError, JsonToken, Result};
use crate::model::attribute::{BaseAttribute, ExtendedProperties};
use crate::model::morpho::{MorphoAnalysis, MorphoAnalysisBuilder, MorphoCommon, MorphoKind, READINGS, is_arabic_field};

/// Reads one record with a variant's shape.
pub type ShapeDecoder = fn(Value) -> Result<MorphoAnalysis>;

/// Source of the per-variant decoders a codec binds to.
pub trait ShapeRegistry {
    /// The decoder for records of `kind`.
    fn shape_decoder(&self, kind: MorphoKind) -> Result<ShapeDecoder>;
}

/// The built-in shapes from [`crate::codec::shapes`].
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardShapes;

impl ShapeRegistry for StandardShapes {
    fn shape_decoder(&self, kind: MorphoKind) -> Result<ShapeDecoder> {
        let decoder: ShapeDecoder = match kind {
            MorphoKind::Generic => shapes::decode_generic,
            MorphoKind::Han => shapes::decode_han,
            MorphoKind::Arabic => shapes::decode_arabic,
        };
        Ok(decoder)
    }
}

#[derive(Clone, Copy, Debug)]
struct BoundDecoders {
    generic: ShapeDecoder,
    han: ShapeDecoder,
    arabic: ShapeDecoder,
}

impl BoundDecoders {
    fn resolve<R: ShapeRegistry + ?Sized>(registry: &R) -> Result<Self> {
        Ok(BoundDecoders {
            generic: registry.shape_decoder(MorphoKind::Generic)?,
            han: registry.shape_decoder(MorphoKind::Han)?,
            arabic: registry.shape_decoder(MorphoKind::Arabic)?,
        })
    }

    fn for_kind(&self, kind: MorphoKind) -> ShapeDecoder {
        match kind {
            MorphoKind::Generic => self.generic,
            MorphoKind::Han => self.han,
            MorphoKind::Arabic => self.arabic,
        }
    }
}

/// Codec for arrays of morphological analyses.
///
/// A codec starts unbound; [`bind`](Self::bind) resolves the three variant
/// decoders once. The variant switch lives in each `decode` call, so a
/// bound codec can be shared across threads and used concurrently.
#[derive(Clone, Copy, Debug, Default)]
pub struct MorphoAnalysisListCodec {
    decoders: Option<BoundDecoders>,
}

impl MorphoAnalysisListCodec {
    /// An unbound codec. Decoding with it fails until it is bound.
    pub fn new() -> Self {
        MorphoAnalysisListCodec { decoders: None }
    }

    /// A codec bound to [`StandardShapes`].
    pub fn standard() -> Self {
        MorphoAnalysisListCodec {
            decoders: Some(BoundDecoders {
                generic: shapes::decode_generic,
                han: shapes::decode_han,
                arabic: shapes::decode_arabic,
            }),
        }
    }

    /// Resolve the variant decoders from `registry`.
    ///
    /// Binding an already bound codec returns it unchanged.
    pub fn bind<R: ShapeRegistry + ?Sized>(&self, registry: &R) -> Result<Self> {
        if self.decoders.is_some() {
            return Ok(*self);
        }
        let decoders = BoundDecoders::resolve(registry)?;
        debug!("bound morphological analysis list codec");
        Ok(MorphoAnalysisListCodec {
            decoders: Some(decoders),
        })
    }

    pub fn is_bound(&self) -> bool {
        self.decoders.is_some()
    }

    fn decoders(&self) -> Result<BoundDecoders> {
        self.decoders.ok_or_else(|| {
            AnnotextError::unbound_codec(
                "attempt to decode with an unbound MorphoAnalysisListCodec; call bind() first",
            )
        })
    }

    /// Decode a JSON array of analyses.
    ///
    /// # Errors
    ///
    /// [`AnnotextError::UnboundCodec`] if the codec is not bound,
    /// [`AnnotextError::UnexpectedToken`] if `value` is not an array, and
    /// whatever a variant decoder returns, unchanged.
    ///
    /// # Panics
    ///
    /// Panics if an Arabic record has a values array longer than its tags
    /// array.
    pub fn decode_value(&self, value: Value) -> Result<Vec<MorphoAnalysis>> {
        let decoders = self.decoders()?;
        let elements = match value {
            Value::Array(elements) => elements,
            other => return Err(AnnotextError::unexpected_token(JsonToken::StartArray, &other)),
        };

        let mut current = MorphoKind::Generic;
        let mut result = Vec::with_capacity(elements.len());
        for (index, element) in elements.into_iter().enumerate() {
            let decoded = decoders.for_kind(current)(element)?;
            let (analysis, next) = promote(decoded, current)?;
            trace!("analysis {index} decoded as {}", analysis.kind());
            if next != current {
                debug!("analysis list switched from {current} to {next} at element {index}");
                current = next;
            }
            result.push(analysis);
        }
        Ok(result)
    }

    /// Decode a borrowed JSON array of analyses. See [`decode_value`](Self::decode_value).
    pub fn decode(&self, value: &Value) -> Result<Vec<MorphoAnalysis>> {
        self.decode_value(value.clone())
    }

    /// Parse and decode a JSON array of analyses.
    pub fn decode_str(&self, json: &str) -> Result<Vec<MorphoAnalysis>> {
        self.decode_value(serde_json::from_str(json)?)
    }

    /// Decode a single record as if it were the first element of an array.
    pub fn decode_one(&self, value: Value) -> Result<MorphoAnalysis> {
        let decoders = self.decoders()?;
        let decoded = decoders.for_kind(MorphoKind::Generic)(value)?;
        let (analysis, _) = promote(decoded, MorphoKind::Generic)?;
        Ok(analysis)
    }

    /// Encode analyses as a JSON array, each in its own variant's shape.
    pub fn encode(&self, analyses: &[MorphoAnalysis]) -> Result<Value> {
        let elements = analyses
            .iter()
            .map(serde_json::to_value)
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Value::Array(elements))
    }

    /// Encode analyses as a compact JSON string.
    pub fn encode_string(&self, analyses: &[MorphoAnalysis]) -> Result<String> {
        Ok(serde_json::to_string(analyses)?)
    }
}

/// One step of the variant fold: promote a freshly decoded record by its
/// leftover keys and return the variant later elements are read with.
///
/// # Panics
///
/// Panics if an Arabic promotion meets a values array longer than its tags
/// array.
pub fn promote(analysis: MorphoAnalysis, current: MorphoKind) -> Result<(MorphoAnalysis, MorphoKind)> {
    let leftovers = analysis.extended_properties();
    if leftovers.is_empty() {
        return Ok((analysis, current));
    }

    if leftovers.contains_key(READINGS) {
        let (common, _) = analysis.into_parts();
        return Ok((to_han(common)?, MorphoKind::Han));
    }

    if leftovers.keys().any(|key| is_arabic_field(key)) {
        let (common, _) = analysis.into_parts();
        return Ok((to_arabic(common)?, MorphoKind::Arabic));
    }

    Ok((analysis, current))
}

/// Start a fresh builder from the common fields, skipping empty strings,
/// and hand back the leftover bag.
fn copy_basic(common: MorphoCommon) -> (MorphoAnalysisBuilder, ExtendedProperties) {
    let mut builder = MorphoAnalysis::builder();
    if let Some(lemma) = common.lemma.filter(|s| !s.is_empty()) {
        builder = builder.lemma(lemma);
    }
    if let Some(part_of_speech) = common.part_of_speech.filter(|s| !s.is_empty()) {
        builder = builder.part_of_speech(part_of_speech);
    }
    if let Some(raw) = common.raw.filter(|s| !s.is_empty()) {
        builder = builder.raw(raw);
    }
    (builder.components(common.components), common.extended_properties)
}

fn to_han(common: MorphoCommon) -> Result<MorphoAnalysis> {
    let (builder, mut leftovers) = copy_basic(common);
    let readings = match leftovers.remove(READINGS) {
        Some(value) => serde_json::from_value::<Option<Vec<String>>>(value)?.unwrap_or_default(),
        None => Vec::new(),
    };
    Ok(builder
        .extended_properties(leftovers)
        .han()
        .readings(readings)
        .build())
}

fn to_arabic(common: MorphoCommon) -> Result<MorphoAnalysis> {
    let (builder, leftovers) = copy_basic(common);
    let (arabic, rest): (ExtendedProperties, ExtendedProperties) =
        leftovers.into_iter().partition(|(key, _)| is_arabic_field(key));
    let fields: shapes::ArabicFields = serde_json::from_value(Value::Object(arabic.into_iter().collect()))?;
    Ok(fields.apply(builder.extended_properties(rest).arabic()).build())
}

/// Serialize a `Vec<MorphoAnalysis>` field, each record in its own shape.
pub fn serialize<S>(analyses: &[MorphoAnalysis], serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_seq(analyses)
}

/// Deserialize a `Vec<MorphoAnalysis>` field with the standard codec.
pub fn deserialize<'de, D>(deserializer: D) -> std::result::Result<Vec<MorphoAnalysis>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    MorphoAnalysisListCodec::standard()
        .decode_value(value)
        .map_err(serde::de::Error::custom)
}
