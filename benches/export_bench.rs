//! Export pipeline benchmarks.
//!
//! Benchmarks:
//! - CSV encoding for growing record counts
//! - Archive building with and without CRC-32
//!
//! Run with:
//! ```bash
//! cargo bench --bench export_bench
//! ```

use chrono::{TimeZone, Utc};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use fieldlog::archive::{ArchiveEntry, ArchiveOptions, CrcMode, build};
use fieldlog::csv;
use fieldlog::export::build_zip;
use fieldlog::record::{Photo, Record};
use std::hint::black_box;
use std::time::Duration;

fn records(count: usize, photo_len: usize) -> Vec<Record> {
    (0..count)
        .map(|i| {
            let id = format!("20240501T0900{:02}Z-{i:08x}", i % 60);
            Record {
                timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap()
                    + chrono::Duration::seconds(i as i64),
                latitude: 35.681_236_8,
                longitude: 139.767_125_1,
                accuracy: Some(10),
                note: format!("station {i}, \"north\" bank\nsecond line"),
                photo: (photo_len > 0).then(|| Photo {
                    name: format!("{id}.jpg"),
                    mime: "image/jpeg".to_string(),
                    bytes: vec![0xD8; photo_len],
                }),
                id,
            }
        })
        .collect()
}

fn csv_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("csv_encode");
    group.measurement_time(Duration::from_secs(5));

    for count in [10, 100, 1_000] {
        let data = records(count, 0);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &data, |b, data| {
            b.iter(|| csv::encode(black_box(data)));
        });
    }

    group.finish();
}

fn archive_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("archive_build");
    group.measurement_time(Duration::from_secs(5));

    let payload = vec![0xAAu8; 2 * 1024 * 1024];
    let names: Vec<String> = (0..8).map(|i| format!("photos/{i}.jpg")).collect();
    let entries: Vec<ArchiveEntry<'_>> = names
        .iter()
        .map(|name| ArchiveEntry::new(name, &payload))
        .collect();
    group.throughput(Throughput::Bytes((payload.len() * entries.len()) as u64));

    for (label, crc) in [("crc_computed", CrcMode::Computed), ("crc_zero", CrcMode::Zero)] {
        let options = ArchiveOptions {
            crc,
            utf8_names: true,
        };
        group.bench_function(label, |b| {
            b.iter(|| build(black_box(&entries), options).unwrap());
        });
    }

    let data = records(50, 256 * 1024);
    group.bench_function("build_zip_50_records", |b| {
        b.iter(|| build_zip(black_box(&data), ArchiveOptions::default()).unwrap());
    });

    group.finish();
}

criterion_group!(benches, csv_benchmarks, archive_benchmarks);
criterion_main!(benches);
