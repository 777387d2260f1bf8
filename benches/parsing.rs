//! Benchmarks for chatstats parsing and statistics.
//!
//! Run with: `cargo bench`
//! Run specific group: `cargo bench --bench parsing -- segmentation`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use chatstats::analyzer::Analyzer;
use chatstats::config::{AnalyzerConfig, Preset};
use chatstats::filter::{FilterConfig, apply_filters};
use chatstats::grammar::{LineGrammar, detect_preset_in};
use chatstats::output::{to_csv, to_json, to_jsonl};
use chatstats::segmenter::MessageSegmenter;

const SIZES: [usize; 3] = [100, 1_000, 10_000];

// =============================================================================
// Test Data Generators
// =============================================================================

/// Android-style transcript with links, emoji, media and multiline bodies.
fn generate_android_txt(count: usize) -> String {
    let authors = ["Alice", "Bob", "Charlie", "Dana"];
    let mut lines = Vec::with_capacity(count + count / 5);
    lines.push("01/01/24, 9:00 AM - Alice created group \"Bench\"".to_string());

    for i in 0..count {
        let author = authors[i % authors.len()];
        let day = i % 28 + 1;
        let month = i / 28 % 12 + 1;
        let hour = i % 12 + 1;
        let minute = i % 60;
        let ampm = if i % 3 == 0 { "PM" } else { "AM" };
        let body = match i % 5 {
            0 => "<Media omitted>".to_string(),
            1 => format!("see https://example.com/{i} 😀"),
            2 => format!("message number {i}\nwith a second line"),
            _ => format!("message number {i} 🎉 ok"),
        };
        lines.push(format!(
            "{day:02}/{month:02}/24, {hour}:{minute:02} {ampm} - {author}: {body}"
        ));
    }
    lines.join("\n")
}

fn generate_ios_txt(count: usize) -> String {
    let mut lines = Vec::with_capacity(count);
    for i in 0..count {
        let sender = if i % 2 == 0 { "Alice" } else { "Bob" };
        lines.push(format!(
            "[1/15/24, {}:{:02}:00 AM] {}: Message number {}",
            i % 12 + 1,
            i % 60,
            sender,
            i
        ));
    }
    lines.join("\n")
}

fn analyzer() -> Analyzer {
    Analyzer::new(AnalyzerConfig::default()).unwrap()
}

// =============================================================================
// Parsing Benchmarks
// =============================================================================

fn bench_segmentation(c: &mut Criterion) {
    let mut group = c.benchmark_group("segmentation");
    let grammar = LineGrammar::new(&AnalyzerConfig::default()).unwrap();
    let segmenter = MessageSegmenter::new(&grammar, true);

    for size in SIZES {
        let txt = generate_android_txt(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &txt, |b, txt| {
            b.iter(|| black_box(segmenter.segment(black_box(txt)).unwrap()));
        });
    }
    group.finish();
}

fn bench_build_record(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_record");
    let analyzer = analyzer();

    for size in SIZES {
        let txt = generate_android_txt(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &txt, |b, txt| {
            b.iter(|| black_box(analyzer.build_record(black_box(txt)).unwrap()));
        });
    }
    group.finish();
}

fn bench_detect_preset(c: &mut Criterion) {
    let mut group = c.benchmark_group("detect_preset");

    let android = generate_android_txt(100);
    let ios = generate_ios_txt(100);
    group.bench_function("android", |b| {
        b.iter(|| black_box(detect_preset_in(black_box(&android))));
    });
    group.bench_function("ios", |b| {
        b.iter(|| black_box(detect_preset_in(black_box(&ios))));
    });
    group.finish();
}

// =============================================================================
// Statistics Benchmarks
// =============================================================================

fn bench_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");
    let analyzer = analyzer();

    for size in SIZES {
        let (record, _) = analyzer.build_record(&generate_android_txt(size)).unwrap();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &record, |b, record| {
            b.iter(|| black_box(analyzer.stats().aggregate(black_box(record))));
        });
    }
    group.finish();
}

fn bench_rankings(c: &mut Criterion) {
    let mut group = c.benchmark_group("rankings");
    let analyzer = analyzer();

    for size in SIZES {
        let (record, _) = analyzer.build_record(&generate_android_txt(size)).unwrap();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &record, |b, record| {
            b.iter(|| black_box(analyzer.stats().rankings(black_box(record))));
        });
    }
    group.finish();
}

fn bench_filter_by_date(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_by_date");
    let analyzer = analyzer();
    let filter = FilterConfig::new()
        .with_date_from("2024-03-01")
        .unwrap()
        .with_date_to("2024-06-30")
        .unwrap();

    for size in SIZES {
        let (record, _) = analyzer.build_record(&generate_android_txt(size)).unwrap();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &record, |b, record| {
            b.iter(|| black_box(apply_filters(black_box(record), &filter)));
        });
    }
    group.finish();
}

// =============================================================================
// Output Benchmarks
// =============================================================================

fn bench_output(c: &mut Criterion) {
    let mut group = c.benchmark_group("output");
    let analyzer = analyzer();
    let (record, _) = analyzer.build_record(&generate_android_txt(1_000)).unwrap();
    group.throughput(Throughput::Elements(record.len() as u64));

    group.bench_function("csv", |b| b.iter(|| black_box(to_csv(black_box(&record)).unwrap())));
    group.bench_function("json", |b| b.iter(|| black_box(to_json(black_box(&record)).unwrap())));
    group.bench_function("jsonl", |b| b.iter(|| black_box(to_jsonl(black_box(&record)).unwrap())));
    group.finish();
}

// =============================================================================
// Full Pipeline Benchmark
// =============================================================================

fn bench_full_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_pipeline");

    for size in SIZES {
        let txt = generate_android_txt(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &txt, |b, txt| {
            b.iter(|| {
                let analyzer = Analyzer::auto(AnalyzerConfig::default(), txt).unwrap();
                let analysis = analyzer.analyze_str(black_box(txt)).unwrap();
                black_box(analyzer.stats().rankings(&analysis.record))
            });
        });
    }
    group.finish();
}

fn bench_fixed_preset_pipeline(c: &mut Criterion) {
    let analyzer = Analyzer::new(AnalyzerConfig::for_preset(Preset::IosBracketed)).unwrap();
    let txt = generate_ios_txt(1_000);
    c.bench_function("ios_pipeline_1000", |b| {
        b.iter(|| black_box(analyzer.analyze_str(black_box(&txt)).unwrap()));
    });
}

// =============================================================================
// Criterion Configuration
// =============================================================================

criterion_group!(
    benches,
    bench_segmentation,
    bench_build_record,
    bench_detect_preset,
    bench_aggregate,
    bench_rankings,
    bench_filter_by_date,
    bench_output,
    bench_full_pipeline,
    bench_fixed_preset_pipeline,
);

criterion_main!(benches);
