//! Benchmarks for slotlog append and dump

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use slotlog::config::Config;
use slotlog::record::encode;
use slotlog::AppendLog;
use tempfile::TempDir;

fn open_log(dir: &TempDir, max_records: u32) -> AppendLog {
    let config = Config::builder()
        .path(dir.path().join("bench.dat"))
        .max_records(max_records)
        .build();
    AppendLog::open(&config).expect("open bench log")
}

fn append_benchmarks(c: &mut Criterion) {
    // Single-process append: two lock brackets plus a 32-byte copy
    c.bench_function("append_single_record", |b| {
        let dir = TempDir::new().unwrap();
        b.iter_batched(
            || open_log(&dir, 1_048_576),
            |mut log| {
                log.append(&encode("bench", 0)).unwrap();
            },
            BatchSize::SmallInput,
        );
    });

    c.bench_function("append_1000_records", |b| {
        let dir = TempDir::new().unwrap();
        b.iter_batched(
            || open_log(&dir, 1_048_576),
            |mut log| {
                for sequence in 0..1000 {
                    log.append(&encode("bench", sequence)).unwrap();
                }
            },
            BatchSize::SmallInput,
        );
    });
}

fn dump_benchmarks(c: &mut Criterion) {
    c.bench_function("dump_1000_records", |b| {
        let dir = TempDir::new().unwrap();
        let mut log = open_log(&dir, 2048);
        for sequence in 0..1000 {
            log.append(&encode("bench", sequence)).unwrap();
        }
        b.iter(|| log.dump().unwrap());
    });
}

criterion_group!(benches, append_benchmarks, dump_benchmarks);
criterion_main!(benches);
