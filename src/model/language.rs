//! Language detection results.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::attribute::{ExtendedProperties, impl_attribute};

/// One candidate language for a region of text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionResult {
    /// ISO 639 code of the language.
    language: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    encoding: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    script: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    confidence: Option<f64>,
}

impl DetectionResult {
    pub fn builder<S: Into<String>>(language: S) -> DetectionResultBuilder {
        DetectionResultBuilder {
            result: DetectionResult {
                language: language.into(),
                encoding: None,
                script: None,
                confidence: None,
            },
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn encoding(&self) -> Option<&str> {
        self.encoding.as_deref()
    }

    pub fn script(&self) -> Option<&str> {
        self.script.as_deref()
    }

    pub fn confidence(&self) -> Option<f64> {
        self.confidence
    }
}

/// Builder for [`DetectionResult`].
#[derive(Debug)]
pub struct DetectionResultBuilder {
    result: DetectionResult,
}

impl DetectionResultBuilder {
    pub fn encoding<S: Into<String>>(mut self, encoding: S) -> Self {
        self.result.encoding = Some(encoding.into());
        self
    }

    pub fn script<S: Into<String>>(mut self, script: S) -> Self {
        self.result.script = Some(script.into());
        self
    }

    pub fn confidence(mut self, confidence: f64) -> Self {
        self.result.confidence = Some(confidence);
        self
    }

    pub fn build(self) -> DetectionResult {
        self.result
    }
}

/// Ranked language candidates for a span of text.
///
/// Used both for the whole text (`languageDetection`) and for the regions
/// of a mixed-language text (`languageDetectionRegions`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageDetection {
    start_offset: usize,
    end_offset: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    detection_results: Vec<DetectionResult>,
    #[serde(default, skip_serializing_if = "ExtendedProperties::is_empty")]
    extended_properties: ExtendedProperties,
}

impl_attribute!(LanguageDetection);

impl LanguageDetection {
    pub fn builder(start_offset: usize, end_offset: usize) -> LanguageDetectionBuilder {
        LanguageDetectionBuilder {
            detection: LanguageDetection {
                start_offset,
                end_offset,
                detection_results: Vec::new(),
                extended_properties: ExtendedProperties::new(),
            },
        }
    }

    /// Candidates, best first.
    pub fn detection_results(&self) -> &[DetectionResult] {
        &self.detection_results
    }

    /// The top candidate, if any.
    pub fn best(&self) -> Option<&DetectionResult> {
        self.detection_results.first()
    }
}

/// Builder for [`LanguageDetection`].
#[derive(Debug)]
pub struct LanguageDetectionBuilder {
    detection: LanguageDetection,
}

impl LanguageDetectionBuilder {
    pub fn add_result(mut self, result: DetectionResult) -> Self {
        self.detection.detection_results.push(result);
        self
    }

    pub fn extended_property<S: Into<String>>(mut self, key: S, value: Value) -> Self {
        self.detection.extended_properties.insert(key.into(), value);
        self
    }

    pub fn build(self) -> LanguageDetection {
        self.detection
    }
}
