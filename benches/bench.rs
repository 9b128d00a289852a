//! Criterion benchmarks for the morphological analysis list codec.

use std::hint::black_box;

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use serde_json::{Value, json};

use annotext::codec::MorphoAnalysisListCodec;
use annotext::model::MorphoAnalysis;

/// Generate an analysis array that switches variant part way through.
fn generate_analyses(count: usize, switch_at: usize, han: bool) -> Value {
    let elements = (0..count)
        .map(|i| {
            let mut record = json!({
                "lemma": format!("lemma{i}"),
                "partOfSpeech": "NOUN",
            });
            if i == switch_at {
                if han {
                    record["readings"] = json!(["r1", "r2"]);
                } else {
                    record["root"] = json!("ktb");
                    record["prefixes"] = json!(["al"]);
                    record["prefixTags"] = json!(["DET"]);
                }
            }
            record
        })
        .collect();
    Value::Array(elements)
}

fn bench_decode(c: &mut Criterion) {
    let codec = MorphoAnalysisListCodec::standard();
    let mut group = c.benchmark_group("morpho_list_decode");

    for &count in &[16usize, 256] {
        group.throughput(Throughput::Elements(count as u64));

        let generic = generate_analyses(count, count, false);
        group.bench_function(format!("generic_{count}"), |b| {
            b.iter(|| codec.decode(black_box(&generic)))
        });

        let han = generate_analyses(count, 0, true);
        group.bench_function(format!("han_{count}"), |b| {
            b.iter(|| codec.decode(black_box(&han)))
        });

        let arabic = generate_analyses(count, count / 2, false);
        group.bench_function(format!("arabic_switch_{count}"), |b| {
            b.iter(|| codec.decode(black_box(&arabic)))
        });
    }

    group.finish();
}

fn bench_encode(c: &mut Criterion) {
    let codec = MorphoAnalysisListCodec::standard();
    let analyses: Vec<MorphoAnalysis> = (0..256)
        .map(|i| match i % 3 {
            0 => MorphoAnalysis::builder().lemma(format!("g{i}")).build(),
            1 => MorphoAnalysis::builder()
                .lemma(format!("h{i}"))
                .han()
                .add_reading("r")
                .build(),
            _ => MorphoAnalysis::builder()
                .lemma(format!("a{i}"))
                .arabic()
                .root("ktb")
                .add_stem("kitab", "NOUN")
                .build(),
        })
        .collect();

    let mut group = c.benchmark_group("morpho_list_encode");
    group.throughput(Throughput::Elements(analyses.len() as u64));
    group.bench_function("mixed_256", |b| {
        b.iter(|| codec.encode_string(black_box(&analyses)))
    });
    group.finish();
}

criterion_group!(benches, bench_decode, bench_encode);
criterion_main!(benches);
