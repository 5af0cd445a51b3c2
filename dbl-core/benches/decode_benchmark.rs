//! Benchmarks for DBL decoder performance.
//!
//! Run with: cargo bench

use byteorder::{ByteOrder, LittleEndian};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use dbl_core::DblDecoder;
use dbl_core::types::{CHANNEL_HEADER_LEN, PRIMARY_HEADER_LEN};

/// Builds a synthetic log image with the given geometry.
fn synthetic_log(channel_count: u16, row_count: u32) -> Vec<u8> {
    let mut primary = vec![0u8; PRIMARY_HEADER_LEN];
    LittleEndian::write_u32(&mut primary[112..116], row_count);
    LittleEndian::write_u16(&mut primary[118..120], channel_count);

    let mut bytes = primary;
    for channel in 0..channel_count {
        let mut header = [0u8; CHANNEL_HEADER_LEN];
        LittleEndian::write_f32(&mut header[48..52], 0.5 + channel as f32);
        bytes.extend_from_slice(&header);
    }
    for row in 0..row_count {
        for channel in 0..channel_count {
            let value = (row.wrapping_mul(31) as u16).wrapping_add(channel * 7);
            bytes.extend_from_slice(&value.to_le_bytes());
        }
    }
    bytes
}

fn decode_benchmark(c: &mut Criterion) {
    let bytes = synthetic_log(8, 500_000);

    let mut group = c.benchmark_group("decode");
    group.throughput(Throughput::Bytes(bytes.len() as u64));

    group.bench_function("synthetic_8ch_500k_rows", |b| {
        let decoder = DblDecoder::new();
        b.iter(|| {
            let log = decoder.decode(&mut black_box(bytes.as_slice())).unwrap();
            black_box(log.samples.row_count())
        })
    });

    group.finish();
}

criterion_group!(benches, decode_benchmark);
criterion_main!(benches);
