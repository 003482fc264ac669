//! Benchmarks for resumark pipeline stages.
//!
//! Run with: cargo bench

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use resumark::format::{format, FormatMode};
use resumark::render::{layout, render_paginated, render_screen, RenderOptions};
use resumark::normalize::Normalizer;
use resumark::{parse_text, NormalizeOptions, ParseOptions};

/// Creates a synthetic resume with the given number of experience entries.
fn create_resume(entries: usize) -> String {
    let mut text = String::from(
        "JANE DOE\nSenior Software Engineer\njane@example.com | (555) 123-4567\n\nEXPERIENCE\n",
    );
    for i in 0..entries {
        text.push_str(&format!("Software Engineer | Company {} | 2015-2020\n", i));
        text.push_str("• Built **Rust** APIs serving 2M users with 99.9% uptime\n");
        text.push_str("• Led migration to Kubernetes, cutting costs 40% over 3 years\n");
        text.push_str("• Mentored 5+ engineers on PostgreSQL and Docker\n");
    }
    text.push_str("\nSKILLS\nLanguages: Rust, Go, Python, TypeScript\n");
    text
}

fn bench_normalize(c: &mut Criterion) {
    let text = create_resume(10);
    let ats = Normalizer::new(NormalizeOptions::ats());
    let screen = Normalizer::new(NormalizeOptions::screen());

    c.bench_function("normalize_ats", |b| {
        b.iter(|| ats.process(black_box(&text)));
    });
    c.bench_function("normalize_screen", |b| {
        b.iter(|| screen.process(black_box(&text)));
    });
}

fn bench_format(c: &mut Criterion) {
    let line = "Led migration to Kubernetes and Rust, cutting costs 40% for 10+ teams; see github.com/jane";

    c.bench_function("format_screen", |b| {
        b.iter(|| format(black_box(line), FormatMode::Screen));
    });
    c.bench_function("format_ats", |b| {
        b.iter(|| format(black_box(line), FormatMode::Ats));
    });
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for entries in [1, 10, 50].iter() {
        let text = create_resume(*entries);
        group.bench_function(format!("{}_entries", entries), |b| {
            b.iter(|| parse_text(black_box(&text)).unwrap());
        });
    }

    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let doc = resumark::parse_text_with_options(&create_resume(20), ParseOptions::ats()).unwrap();
    let options = RenderOptions::new();
    let uncompressed = RenderOptions::new().with_compression(false);

    c.bench_function("render_screen", |b| {
        b.iter(|| render_screen(black_box(&doc)));
    });
    c.bench_function("layout", |b| {
        b.iter(|| layout(black_box(&doc), &options).unwrap());
    });
    c.bench_function("render_pdf", |b| {
        b.iter(|| render_paginated(black_box(&doc), &options).unwrap());
    });
    c.bench_function("render_pdf_uncompressed", |b| {
        b.iter(|| render_paginated(black_box(&doc), &uncompressed).unwrap());
    });
}

fn bench_batch(c: &mut Criterion) {
    let inputs: Vec<String> = (0..16).map(|i| create_resume(i % 5 + 1)).collect();
    let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let parse = ParseOptions::ats();
    let options = RenderOptions::new();

    c.bench_function("export_batch_16", |b| {
        b.iter(|| resumark::export::export_batch(black_box(&inputs), &parse, &options, date));
    });
}

criterion_group!(
    benches,
    bench_normalize,
    bench_format,
    bench_parse,
    bench_render,
    bench_batch,
);
criterion_main!(benches);
