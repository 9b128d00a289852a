use serde_json::json;

use annotext::attribute_key::AttributeKey;
use annotext::error::{AnnotextError, Result};
use annotext::model::{
    AnnotatedText, Attribute, BaseAttribute, DetectionResult, Entity, EntityMention, LanguageDetection,
    Layer, ListAttribute, MorphoAnalysis, MorphoKind, ScriptRegion, Sentence, Token, TranslatedData,
};

fn sample_text() -> AnnotatedText {
    let tokens = ListAttribute::builder()
        .add(
            Token::builder(0, 5, "Hello")
                .add_analysis(MorphoAnalysis::builder().lemma("hello").part_of_speech("INTJ").build())
                .build(),
        )
        .add(Token::builder(6, 11, "world").build())
        .extended_property("tokenizer", json!("ws"))
        .build();

    let detection = LanguageDetection::builder(0, 11)
        .add_result(DetectionResult::builder("eng").confidence(0.9).build())
        .add_result(DetectionResult::builder("deu").confidence(0.1).build())
        .build();

    AnnotatedText::builder()
        .data("Hello world")
        .tokens(tokens)
        .sentences(ListAttribute::new(vec![Sentence::new(0, 11)]))
        .script_regions(ListAttribute::new(vec![ScriptRegion::new(0, 11, "Latn")]))
        .whole_text_language_detection(detection)
        .resolved_entities(ListAttribute::new(vec![Entity::builder(6, 11, "Q2").build()]))
        .document_metadata_value("source", "unit")
        .build()
}

#[test]
fn layers_are_reachable_by_key_and_accessor() {
    let text = sample_text();

    assert_eq!(text.attributes().len(), 5);
    assert_eq!(text.tokens().map(|t| t.len()), Some(2));
    assert_eq!(text.sentences().map(|s| s.len()), Some(1));
    assert!(matches!(text.attribute(AttributeKey::ScriptRegion), Some(Layer::ScriptRegions(_))));
    assert_eq!(
        text.whole_text_language_detection()
            .and_then(|d| d.best())
            .map(|r| r.language()),
        Some("eng")
    );
    assert_eq!(text.document_metadata().get("source"), Some(&vec!["unit".to_string()]));
}

#[test]
fn absent_layers_return_none() {
    let text = sample_text();

    assert!(text.entity_mentions().is_none());
    assert!(text.base_noun_phrases().is_none());
    assert!(text.translated_tokens().is_none());
    assert!(text.translated_data().is_none());
    assert!(text.language_detection_regions().is_none());
    assert!(text.attribute(AttributeKey::EntityMention).is_none());
}

#[test]
fn covered_text_uses_character_offsets() {
    let text = AnnotatedText::builder()
        .data("日本語 text")
        .tokens(ListAttribute::new(vec![
            Token::builder(0, 3, "日本語").build(),
            Token::builder(4, 8, "text").build(),
        ]))
        .build();

    let tokens = text.tokens().expect("tokens");
    assert_eq!(text.len(), 8);
    assert_eq!(text.char_at(1), Some('本'));
    assert_eq!(text.covered_text(&tokens.items()[0]), Some("日本語"));
    assert_eq!(text.covered_text(&tokens.items()[1]), Some("text"));
    assert_eq!(tokens.items()[1].length(), 4);
    assert_eq!(text.sub_sequence(4, 9), None);
    assert_eq!(text.sub_sequence(3, 2), None);
}

#[test]
fn seeded_builder_does_not_touch_the_source() {
    let original = sample_text();

    let changed = original
        .to_builder()
        .data("Goodbye world")
        .entity_mentions(ListAttribute::new(vec![EntityMention::builder(8, 13, "LOCATION").build()]))
        .document_metadata_value("source", "changed")
        .build();

    assert_eq!(original.data(), "Hello world");
    assert!(original.entity_mentions().is_none());
    assert_eq!(original.document_metadata()["source"], vec!["unit".to_string()]);

    assert_eq!(changed.data(), "Goodbye world");
    assert_eq!(changed.attributes().len(), 6);
    assert_eq!(changed.tokens(), original.tokens());
}

#[test]
fn layer_setters_replace_existing_layers() {
    let text = sample_text()
        .to_builder()
        .sentences(ListAttribute::new(vec![Sentence::new(0, 5), Sentence::new(6, 11)]))
        .build();

    assert_eq!(text.sentences().map(|s| s.len()), Some(2));
    assert_eq!(text.attributes().len(), 5);
}

#[test]
fn document_round_trips_through_json() -> Result<()> {
    let original = sample_text()
        .to_builder()
        .translated_data(ListAttribute::new(vec![TranslatedData::new(
            Some("fra".to_string()),
            "Bonjour le monde",
        )]))
        .build();

    let json = serde_json::to_value(&original)?;
    assert_eq!(json["data"], "Hello world");
    assert_eq!(json["attributes"]["token"]["extendedProperties"]["tokenizer"], "ws");
    assert_eq!(json["attributes"]["resolvedEntity"]["items"][0]["coreferenceChainId"], -1);
    assert_eq!(json["documentMetadata"]["source"], json!(["unit"]));

    let back: AnnotatedText = serde_json::from_value(json)?;
    assert_eq!(back, original);
    assert_eq!(back.tokens().map(|t| t.extended_properties().len()), Some(1));
    Ok(())
}

#[test]
fn analyses_inside_a_document_recover_their_variant() -> Result<()> {
    let back: AnnotatedText = serde_json::from_value(json!({
        "data": "漢字",
        "attributes": {
            "token": {
                "items": [{
                    "startOffset": 0,
                    "endOffset": 2,
                    "text": "漢字",
                    "analyses": [
                        {"lemma": "漢字", "readings": ["かんじ"]},
                        {"lemma": "漢字"}
                    ]
                }]
            }
        }
    }))?;

    let token = &back.tokens().expect("tokens").items()[0];
    assert!(token.analyses().iter().all(|a| a.kind() == MorphoKind::Han));
    Ok(())
}

#[test]
fn unknown_attribute_keys_are_rejected() {
    let result: std::result::Result<AnnotatedText, _> = serde_json::from_value(json!({
        "data": "x",
        "attributes": {"bogus": {"items": []}}
    }));
    assert!(result.is_err());

    let err = "bogus".parse::<AttributeKey>().unwrap_err();
    assert!(matches!(err, AnnotextError::UnknownAttributeKey(key) if key == "bogus"));
}

#[test]
fn entities_compare_nan_confidence_and_default_chain() {
    let a = Entity::builder(0, 1, "Q1").confidence(f64::NAN).build();
    let b = Entity::builder(0, 1, "Q1").confidence(f64::NAN).build();
    assert_eq!(a, b);

    let defaulted = Entity::builder(0, 1, "Q1").build();
    let zero_chain = Entity::builder(0, 1, "Q1").coreference_chain_id(0).build();
    assert_eq!(defaulted.coreference_chain_id(), -1);
    assert_ne!(defaulted, zero_chain);
}

#[test]
fn display_prints_the_text() {
    assert_eq!(sample_text().to_string(), "Hello world");
}

#[test]
fn nan_entity_confidence_round_trips_through_a_document() -> Result<()> {
    let original = AnnotatedText::builder()
        .data("Paris is nice")
        .resolved_entities(ListAttribute::new(vec![
            Entity::builder(0, 5, "Q90").confidence(f64::NAN).build(),
        ]))
        .build();

    let json = serde_json::to_string(&original)?;
    let back: AnnotatedText = serde_json::from_str(&json)?;

    let entity = &back.resolved_entities().expect("entities").items()[0];
    assert!(entity.confidence().is_nan());
    assert_eq!(back, original);
    Ok(())
}
