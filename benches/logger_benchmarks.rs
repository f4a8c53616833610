//! Criterion benchmarks for hlog

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use hlog::prelude::*;
use std::collections::HashMap;
use std::io;
use std::sync::Arc;

fn sink_logger(level: LogLevel, format: OutputFormat) -> Logger {
    Logger::builder()
        .min_level(level)
        .sink(ConsoleAppender::with_writer(io::sink()))
        .output_format(format)
        .exit_handlers(ExitHandlers::new())
        .build()
}

// ============================================================================
// Logging Performance Benchmarks
// ============================================================================

fn bench_logging(c: &mut Criterion) {
    let mut group = c.benchmark_group("logging");
    group.throughput(Throughput::Elements(1));

    for (name, format) in [
        ("text", OutputFormat::Text),
        ("json", OutputFormat::Json),
        ("logfmt", OutputFormat::Logfmt),
    ] {
        let logger = sink_logger(LogLevel::Info, format);
        let mut ctx = HashMap::new();
        ctx.insert("user", "alice");
        ctx.insert("request_id", "abc-123");

        group.bench_function(name, |b| {
            b.iter(|| logger.info(black_box("request handled"), &ctx));
        });
    }

    group.finish();
}

fn bench_level_filtering(c: &mut Criterion) {
    let mut group = c.benchmark_group("level_filtering");
    group.throughput(Throughput::Elements(1));

    let logger = sink_logger(LogLevel::Warn, OutputFormat::Text);

    group.bench_function("filtered_out", |b| {
        b.iter(|| logger.debug(black_box("never written"), ()));
    });

    group.bench_function("passed", |b| {
        b.iter(|| logger.error(black_box("written"), ()));
    });

    group.finish();
}

fn bench_concurrent_logging(c: &mut Criterion) {
    let mut group = c.benchmark_group("concurrent_logging");
    group.throughput(Throughput::Elements(400));

    let logger = Arc::new(sink_logger(LogLevel::Info, OutputFormat::Text));

    group.bench_function("4_threads_x_100", |b| {
        b.iter(|| {
            let handles: Vec<_> = (0..4)
                .map(|t| {
                    let logger = Arc::clone(&logger);
                    std::thread::spawn(move || {
                        for i in 0..100 {
                            logger.info(format!("thread {} message {}", t, i), ());
                        }
                    })
                })
                .collect();
            for handle in handles {
                let _ = handle.join();
            }
        });
    });

    group.finish();
}

// ============================================================================
// Field extraction Benchmarks
// ============================================================================

fn bench_field_extraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("field_extraction");

    let mut map = HashMap::new();
    for i in 0..8 {
        map.insert(format!("key{}", i), i);
    }
    let mapping = ContextValue::from(&map);
    let record = ContextValue::record((0..8).map(|i| (format!("attr{}", i), i)));
    let opaque = ContextValue::from(42);

    group.bench_function("mapping_8", |b| b.iter(|| extract_fields(black_box(&mapping))));
    group.bench_function("record_8", |b| b.iter(|| extract_fields(black_box(&record))));
    group.bench_function("opaque", |b| b.iter(|| extract_fields(black_box(&opaque))));

    group.finish();
}

// ============================================================================
// Criterion Configuration
// ============================================================================

criterion_group!(
    benches,
    bench_logging,
    bench_level_filtering,
    bench_concurrent_logging,
    bench_field_extraction
);

criterion_main!(benches);
