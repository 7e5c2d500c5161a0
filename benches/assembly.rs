//! Assembly Benchmark for the FlashKV client
//!
//! Measures the local half of a command: argument validation, assembly
//! and multi-bulk encoding. No sockets are involved.

use bytes::{Bytes, BytesMut};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use flashkv_client::commands::{self, MigrateOptions, ScanOptions, SortOptions};
use flashkv_client::params;
use flashkv_client::protocol::parse_reply;

/// Benchmark single-parameter validation
fn bench_validate(c: &mut Criterion) {
    let mut group = c.benchmark_group("validate");
    group.throughput(Throughput::Elements(1));

    group.bench_function("key", |b| {
        b.iter(|| black_box(params::key("key", black_box("session:42")).unwrap()));
    });

    group.bench_function("integer_from_int", |b| {
        b.iter(|| black_box(params::integer("seconds", black_box(3600i64)).unwrap()));
    });

    group.bench_function("integer_from_text", |b| {
        b.iter(|| black_box(params::integer("seconds", black_box("3600")).unwrap()));
    });

    group.bench_function("limit_pair", |b| {
        b.iter(|| black_box(params::limit("limit", black_box((10, 20))).unwrap()));
    });

    group.finish();
}

/// Benchmark building whole commands
fn bench_assemble(c: &mut Criterion) {
    let mut group = c.benchmark_group("assemble");
    group.throughput(Throughput::Elements(1));

    group.bench_function("expire", |b| {
        b.iter(|| black_box(commands::expire(black_box("session:42"), 30).unwrap()));
    });

    group.bench_function("migrate_copy_replace", |b| {
        let options = MigrateOptions {
            copy: true,
            replace: true,
        };
        b.iter(|| {
            black_box(commands::migrate("10.0.0.2", 6379, "k", 0, 5000, options).unwrap())
        });
    });

    group.bench_function("scan_match_count", |b| {
        let options = ScanOptions::new().pattern("user:*").count(100);
        b.iter(|| black_box(commands::scan(0, &options).unwrap()));
    });

    group.bench_function("sort_with_gets", |b| {
        let options = (0..8)
            .fold(SortOptions::new().by("weight_*").limit((0, 50)), |opts, i| {
                opts.get(format!("field{}_*", i))
            })
            .alpha()
            .store("sorted");
        b.iter(|| black_box(commands::sort("ids", &options).unwrap()));
    });

    group.bench_function("del_1000_keys", |b| {
        let keys: Vec<String> = (0..1000).map(|i| format!("key:{}", i)).collect();
        b.iter(|| black_box(commands::del(keys.clone()).unwrap()));
    });

    group.finish();
}

/// Benchmark wire encoding
fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");

    let expire = commands::expire("session:42", 30).unwrap();
    group.throughput(Throughput::Bytes(expire.encoded_len() as u64));
    group.bench_function("expire", |b| {
        let mut buf = BytesMut::with_capacity(expire.encoded_len());
        b.iter(|| {
            buf.clear();
            expire.encode_into(&mut buf);
            black_box(&buf);
        });
    });

    let payload = Bytes::from(vec![0xABu8; 64 * 1024]);
    let restore = commands::restore("k", 0, payload, Default::default()).unwrap();
    group.throughput(Throughput::Bytes(restore.encoded_len() as u64));
    group.bench_function("restore_64kb", |b| {
        b.iter(|| black_box(restore.encode()));
    });

    group.finish();
}

/// Benchmark decoding a SCAN-sized reply
fn bench_parse_reply(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_reply");

    let mut raw = b"*2\r\n$4\r\n1234\r\n*100\r\n".to_vec();
    for i in 0..100 {
        let key = format!("user:{}", i);
        raw.extend_from_slice(format!("${}\r\n{}\r\n", key.len(), key).as_bytes());
    }
    group.throughput(Throughput::Bytes(raw.len() as u64));

    group.bench_function("scan_page_100_keys", |b| {
        b.iter(|| black_box(parse_reply(black_box(&raw)).unwrap()));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_validate,
    bench_assemble,
    bench_encode,
    bench_parse_reply,
);

criterion_main!(benches);
