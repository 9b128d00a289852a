//! Tokens of an annotated text.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::attribute::{ExtendedProperties, impl_attribute};
use crate::model::morpho::MorphoAnalysis;

/// A token: a span of text with its normalized forms and morphological
/// analyses.
///
/// # Examples
///
/// ```
/// use annotext::model::attribute::Attribute;
/// use annotext::model::morpho::MorphoAnalysis;
/// use annotext::model::token::Token;
///
/// let token = Token::builder(0, 5, "Books")
///     .add_normalized("books")
///     .add_analysis(MorphoAnalysis::builder().lemma("book").build())
///     .build();
///
/// assert_eq!(token.text(), "Books");
/// assert_eq!(token.length(), 5);
/// assert_eq!(token.analyses()[0].lemma(), Some("book"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    start_offset: usize,
    end_offset: usize,
    text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    normalized: Vec<String>,
    /// Mixed-variant analyses; the variant of each record is recovered from
    /// its fields by the list codec.
    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        with = "crate::codec::morpho_list"
    )]
    analyses: Vec<MorphoAnalysis>,
    #[serde(default, skip_serializing_if = "ExtendedProperties::is_empty")]
    extended_properties: ExtendedProperties,
}

impl_attribute!(Token);

impl Token {
    /// Start building a token over `[start_offset, end_offset)`.
    pub fn builder<S: Into<String>>(start_offset: usize, end_offset: usize, text: S) -> TokenBuilder {
        TokenBuilder {
            token: Token {
                start_offset,
                end_offset,
                text: text.into(),
                normalized: Vec::new(),
                analyses: Vec::new(),
                extended_properties: ExtendedProperties::new(),
            },
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn normalized(&self) -> &[String] {
        &self.normalized
    }

    pub fn analyses(&self) -> &[MorphoAnalysis] {
        &self.analyses
    }
}

/// Builder for [`Token`].
#[derive(Debug)]
pub struct TokenBuilder {
    token: Token,
}

impl TokenBuilder {
    pub fn add_normalized<S: Into<String>>(mut self, normalized: S) -> Self {
        self.token.normalized.push(normalized.into());
        self
    }

    pub fn add_analysis(mut self, analysis: MorphoAnalysis) -> Self {
        self.token.analyses.push(analysis);
        self
    }

    pub fn analyses<I: IntoIterator<Item = MorphoAnalysis>>(mut self, analyses: I) -> Self {
        self.token.analyses.extend(analyses);
        self
    }

    pub fn extended_property<S: Into<String>>(mut self, key: S, value: Value) -> Self {
        self.token.extended_properties.insert(key.into(), value);
        self
    }

    pub fn build(self) -> Token {
        self.token
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::model::attribute::{Attribute, BaseAttribute};
    use crate::model::morpho::MorphoKind;

    #[test]
    fn test_token_json_shape() {
        let token = Token::builder(0, 3, "cat").build();
        assert_eq!(
            serde_json::to_value(&token).unwrap(),
            json!({"startOffset": 0, "endOffset": 3, "text": "cat"})
        );
    }

    #[test]
    fn test_offsets_are_not_validated() {
        let token = Token::builder(9, 2, "odd").build();
        assert_eq!(token.start_offset(), 9);
        assert_eq!(token.end_offset(), 2);
        assert_eq!(token.length(), 0);
    }

    #[test]
    fn test_analyses_keep_their_variant_through_json() {
        let token = Token::builder(0, 2, "東京")
            .add_analysis(
                MorphoAnalysis::builder()
                    .lemma("東京")
                    .han()
                    .add_reading("とうきょう")
                    .build(),
            )
            .add_analysis(MorphoAnalysis::builder().lemma("東").han().build())
            .extended_property("source", json!("test"))
            .build();

        let json = serde_json::to_string(&token).unwrap();
        let back: Token = serde_json::from_str(&json).unwrap();

        assert_eq!(back, token);
        assert!(back.analyses().iter().all(|a| a.kind() == MorphoKind::Han));
        assert_eq!(back.extended_properties().get("source"), Some(&json!("test")));
    }
}
