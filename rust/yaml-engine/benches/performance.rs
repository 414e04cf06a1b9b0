// Copyright (c) 2026 Arista Networks, Inc.
// Use of this source code is governed by the Apache License 2.0
// that can be found in the LICENSE file.

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use yaml_engine::{deserialize, from_utf16, serialize};

fn sample_document(entries: usize) -> String {
    let mut text = String::from("%YAML 1.2\n---\ninterfaces:\n");
    for index in 0..entries {
        text.push_str(&format!(
            "  - name: Ethernet{index}\n    description: \"uplink {index}\\tto spine\"\n    mtu: 9214\n    shutdown: false\n    speed: 1.0e+11\n    vlans: [10, 20, 30]\n    notes: |\n      managed by automation\n      do not edit\n"
        ));
    }
    text
}

pub fn benchmark_deserialize(c: &mut Criterion) {
    let input = sample_document(500);
    c.bench_function("deserialize", |b| b.iter(|| deserialize(black_box(&input))));
}

pub fn benchmark_deserialize_utf16(c: &mut Criterion) {
    let units: Vec<u16> = sample_document(500).encode_utf16().collect();
    c.bench_function("deserialize_utf16", |b| {
        b.iter(|| from_utf16(black_box(&units)));
    });
}

pub fn benchmark_serialize(c: &mut Criterion) {
    let input = sample_document(500);
    let Ok(root) = deserialize(&input) else {
        return;
    };
    c.bench_function("serialize", |b| b.iter(|| serialize(black_box(&root))));
}

criterion_group!(
    benches,
    benchmark_deserialize,
    benchmark_deserialize_utf16,
    benchmark_serialize
);
criterion_main!(benches);
