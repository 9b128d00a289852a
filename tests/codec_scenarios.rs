use std::sync::Arc;
use std::thread;

use serde_json::json;

use annotext::codec::{MorphoAnalysisListCodec, StandardShapes};
use annotext::error::{AnnotextError, JsonToken, Result};
use annotext::model::{BaseAttribute, MorphoAnalysis, MorphoKind, TaggedSegment, Token};

fn codec() -> Result<MorphoAnalysisListCodec> {
    MorphoAnalysisListCodec::new().bind(&StandardShapes)
}

#[test]
fn han_promotion_is_sticky_for_later_elements() -> Result<()> {
    let analyses = codec()?.decode(&json!([
        {"lemma": "a", "readings": ["r1", "r2"]},
        {"lemma": "b"}
    ]))?;

    assert_eq!(analyses.len(), 2);
    let first = analyses[0].as_han().expect("first is han");
    assert_eq!(first.readings(), &["r1".to_string(), "r2".to_string()]);
    assert_eq!(analyses[0].lemma(), Some("a"));

    let second = analyses[1].as_han().expect("second is han");
    assert!(second.readings().is_empty());
    assert_eq!(analyses[1].lemma(), Some("b"));
    assert!(analyses[1].extended_properties().is_empty());
    Ok(())
}

#[test]
fn arabic_fields_upgrade_a_generic_record() -> Result<()> {
    let analyses = codec()?.decode(&json!([{
        "lemma": "x",
        "prefixLength": 1,
        "stemLength": 2,
        "prefixes": ["al"],
        "prefixTags": ["DET"]
    }]))?;

    let analysis = &analyses[0];
    assert_eq!(analysis.kind(), MorphoKind::Arabic);
    assert_eq!(analysis.lemma(), Some("x"));
    assert!(analysis.extended_properties().is_empty());

    let arabic = analysis.as_arabic().expect("arabic");
    assert_eq!(arabic.prefix_length(), Some(1));
    assert_eq!(arabic.stem_length(), Some(2));
    assert_eq!(arabic.prefixes(), &[TaggedSegment::new("al", "DET")]);
    Ok(())
}

#[test]
fn unrelated_leftovers_stay_generic() -> Result<()> {
    let analyses = codec()?.decode(&json!([
        {"lemma": "x", "weird": 5},
        {"lemma": "y"}
    ]))?;

    assert!(analyses.iter().all(|a| a.kind() == MorphoKind::Generic));
    assert_eq!(analyses[0].extended_properties().get("weird"), Some(&json!(5)));
    Ok(())
}

#[test]
fn sticky_arabic_reads_plain_records_as_arabic() -> Result<()> {
    let analyses = codec()?.decode(&json!([
        {"lemma": "x", "root": "ktb"},
        {"lemma": "y", "partOfSpeech": "NOUN", "gloss": "book"}
    ]))?;

    assert_eq!(analyses[1].kind(), MorphoKind::Arabic);
    assert_eq!(analyses[1].part_of_speech(), Some("NOUN"));
    assert_eq!(analyses[1].extended_properties().get("gloss"), Some(&json!("book")));
    Ok(())
}

#[test]
fn promotion_drops_empty_common_strings() -> Result<()> {
    let analyses = codec()?.decode(&json!([{"lemma": "", "raw": "r", "readings": []}]))?;

    assert_eq!(analyses[0].kind(), MorphoKind::Han);
    assert_eq!(analyses[0].lemma(), None);
    assert_eq!(analyses[0].raw(), Some("r"));
    Ok(())
}

#[test]
fn each_variant_round_trips() -> Result<()> {
    let component = Token::builder(0, 2, "al").build();
    let analyses = vec![
        MorphoAnalysis::builder()
            .lemma("run")
            .part_of_speech("VERB")
            .extended_property("gloss", json!("move fast"))
            .build(),
        MorphoAnalysis::builder()
            .lemma("kitab")
            .add_component(component)
            .arabic()
            .lengths(2, 5)
            .root("ktb")
            .definite_article(true)
            .add_prefix("al", "DET")
            .add_stem("kitab", "NOUN")
            .build(),
    ];

    let codec = codec()?;
    for analysis in analyses {
        let encoded = codec.encode(std::slice::from_ref(&analysis))?;
        let decoded = codec.decode(&encoded)?;
        assert_eq!(decoded, vec![analysis]);
    }

    let han = vec![
        MorphoAnalysis::builder()
            .lemma("日本")
            .han()
            .readings(["にほん", "にっぽん"])
            .build(),
    ];
    assert_eq!(codec.decode_str(&codec.encode_string(&han)?)?, han);
    Ok(())
}

#[test]
fn tokens_carry_analyses_through_json() -> Result<()> {
    let token = Token::builder(0, 5, "kitab")
        .add_normalized("kitab")
        .add_analysis(MorphoAnalysis::builder().lemma("k").arabic().root("ktb").build())
        .add_analysis(MorphoAnalysis::builder().lemma("j").build())
        .build();

    let json = serde_json::to_string(&token)?;
    let back: Token = serde_json::from_str(&json)?;

    // The second analysis comes back in the sticky Arabic shape.
    assert_eq!(back.analyses()[0], token.analyses()[0]);
    assert_eq!(back.analyses()[1].kind(), MorphoKind::Arabic);
    assert_eq!(back.analyses()[1].lemma(), Some("j"));
    Ok(())
}

#[test]
fn unbound_codec_refuses_to_decode() {
    let err = MorphoAnalysisListCodec::new().decode(&json!([])).unwrap_err();
    assert!(matches!(err, AnnotextError::UnboundCodec(_)));
}

#[test]
fn non_array_input_is_an_unexpected_token() -> Result<()> {
    let err = codec()?.decode_str(r#""just a string""#).unwrap_err();
    assert!(matches!(
        err,
        AnnotextError::UnexpectedToken {
            expected: JsonToken::StartArray,
            actual: JsonToken::String
        }
    ));
    Ok(())
}

#[test]
fn empty_array_decodes_to_nothing() -> Result<()> {
    assert!(codec()?.decode(&json!([]))?.is_empty());
    Ok(())
}

#[test]
#[should_panic]
fn mismatched_prefix_tags_panic() {
    let codec = MorphoAnalysisListCodec::standard();
    let _ = codec.decode(&json!([{"prefixes": ["a", "b"], "prefixTags": ["X"]}]));
}

#[test]
fn bound_codec_decodes_concurrently() -> Result<()> {
    let codec = Arc::new(codec()?);
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let codec = Arc::clone(&codec);
            thread::spawn(move || {
                let input = if i % 2 == 0 {
                    json!([{"lemma": "a", "readings": ["r"]}, {"lemma": "b"}])
                } else {
                    json!([{"lemma": "a"}, {"lemma": "b"}])
                };
                codec.decode(&input).map(|list| list[1].kind())
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let kind = handle.join().expect("decoder thread")?;
        let expected = if i % 2 == 0 { MorphoKind::Han } else { MorphoKind::Generic };
        assert_eq!(kind, expected);
    }
    Ok(())
}

#[test]
fn bare_arabic_records_stay_arabic_through_a_round_trip() -> Result<()> {
    let codec = codec()?;
    let decoded = codec.decode(&json!([{"lemma": "x", "definiteArticle": false}]))?;
    assert_eq!(decoded[0].kind(), MorphoKind::Arabic);

    let built = MorphoAnalysis::builder().lemma("y").arabic().build();
    for analysis in [decoded[0].clone(), built] {
        let encoded = codec.encode(std::slice::from_ref(&analysis))?;
        let again = codec.decode(&encoded)?;
        assert_eq!(again[0].kind(), MorphoKind::Arabic);
        assert_eq!(again, vec![analysis]);
    }
    Ok(())
}

#[test]
fn negative_lengths_are_kept() -> Result<()> {
    let analyses = codec()?.decode(&json!([{"lemma": "x", "prefixLength": -1, "stemLength": 2}]))?;

    let arabic = analyses[0].as_arabic().expect("arabic");
    assert_eq!(arabic.prefix_length(), Some(-1));
    assert_eq!(arabic.stem_length(), Some(2));
    Ok(())
}

#[test]
fn bag_keys_naming_typed_fields_are_not_written() -> Result<()> {
    let analysis = MorphoAnalysis::builder()
        .lemma("a")
        .extended_property("lemma", json!("shadow"))
        .arabic()
        .extended_property("root", json!("shadow"))
        .root("ktb")
        .build();

    let encoded = codec()?.encode(std::slice::from_ref(&analysis))?;
    assert_eq!(encoded[0]["lemma"], "a");
    assert_eq!(encoded[0]["root"], "ktb");
    Ok(())
}
