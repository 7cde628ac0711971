//! Criterion benchmarks for log_dispatch

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use log_dispatch::prelude::*;

/// Appender that swallows everything, so benchmarks measure the hand-off
struct NullAppender;

impl Appender for NullAppender {
    fn process(&mut self, _record: &LogRecord) -> Result<()> {
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "null"
    }
}

fn bench_record_creation(c: &mut Criterion) {
    let mut group = c.benchmark_group("record_creation");
    group.throughput(Throughput::Elements(1));

    group.bench_function("new", |b| {
        b.iter(|| {
            let record = LogRecord::new(LogLevel::Info, black_box("benchmark message"));
            black_box(record)
        });
    });

    group.bench_function("new_sanitized", |b| {
        b.iter(|| {
            let record = LogRecord::new(LogLevel::Info, black_box("line\nbreak\tand\rmore"));
            black_box(record)
        });
    });

    group.finish();
}

fn bench_dispatcher_creation(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatcher_creation");
    group.throughput(Throughput::Elements(1));

    group.bench_function("build_and_shutdown", |b| {
        b.iter(|| {
            let mut dispatcher = AsyncDispatcher::with_capacity(1_000).expect("dispatcher starts");
            dispatcher.shutdown().expect("clean shutdown");
        });
    });

    group.finish();
}

fn bench_submit(c: &mut Criterion) {
    let mut group = c.benchmark_group("submit");
    group.throughput(Throughput::Elements(1));

    let mut dispatcher = AsyncDispatcher::builder()
        .capacity(1_000_000)
        .appender(NullAppender)
        .build()
        .expect("dispatcher starts");

    group.bench_function("record", |b| {
        b.iter(|| {
            let record = LogRecord::new(LogLevel::Info, black_box("benchmark message"));
            black_box(dispatcher.submit(record));
        });
    });

    group.bench_function("flush", |b| {
        b.iter(|| {
            black_box(dispatcher.flush());
        });
    });

    group.finish();
    dispatcher.shutdown().expect("clean shutdown");
}

criterion_group!(
    benches,
    bench_record_creation,
    bench_dispatcher_creation,
    bench_submit
);
criterion_main!(benches);
