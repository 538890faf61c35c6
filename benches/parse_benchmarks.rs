#![allow(missing_docs)]
//! Benchmarks for the marcline parse pipeline.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// A representative catalog record exercising every pipeline stage:
/// shared-tag templates, repeatable fields, continuations, transforms, and
/// the synthetic author-role insertion.
const SAMPLE_RECORD: &str = "\
020\t\t\t$a 9780140449136$c 150,000đ
041\t\t\t$a vie$h grc
082\t\t\t$a 883.01$b H76
100\t1\t#\t$a Homer
245\t1\t0\t$a The Odyssey$b an epic poem$c Homer$c trans. Robert Fagles
250\t\t\t$a Revised edition$b 2
260\t\t\t$a London$b Penguin Classics$c 2003
300\t\t\t$a 541 tr.$b ill., maps$c 20 cm
520\t\t\t$a Epic poem recounting the long voyage home of Odysseus,
king of Ithaca, after the fall of Troy
650\t\t\t$a Epic poetry, Greek
653\t\t\t$a Odysseus
655\t\t\t$a Poetry
700\t1\t#\t$a Fagles, Robert
700\t1\t#\t$e translator
700\t1\t#\t$a Knox, Bernard";

fn benchmark_parse_full_record(c: &mut Criterion) {
    c.bench_function("parse_full_record", |b| {
        b.iter(|| marcline::parse(black_box(SAMPLE_RECORD)));
    });
}

fn benchmark_normalize_only(c: &mut Criterion) {
    c.bench_function("normalize_only", |b| {
        b.iter(|| marcline::normalize(black_box(SAMPLE_RECORD)));
    });
}

fn benchmark_parse_minimal_record(c: &mut Criterion) {
    let minimal = "245\t1\t0\t$a The Odyssey";
    c.bench_function("parse_minimal_record", |b| {
        b.iter(|| marcline::parse(black_box(minimal)));
    });
}

criterion_group!(
    benches,
    benchmark_parse_full_record,
    benchmark_normalize_only,
    benchmark_parse_minimal_record
);
criterion_main!(benches);
