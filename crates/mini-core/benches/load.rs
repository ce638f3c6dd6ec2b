// MINI - Sectioned documents with inheritance and derived values
//
// Copyright (c) 2025 The MINI contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Load and serialization benchmarks.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use mini_core::expression::evaluate;
use mini_core::{parse, SerializeMode};

/// A chain of `depth` sections, each inheriting the previous one and adding
/// a derived value.
fn generate_chain(depth: usize) -> String {
    let mut text = String::from("[S0]\nhp = 10\nname = $this\n");
    for i in 1..depth {
        text.push_str(&format!(
            "\n[S{}] : S{}\nlevel = {}\ndmg = ($hp + $level) * 2\n",
            i,
            i - 1,
            i
        ));
    }
    text
}

// ============================================================================
// Load Benchmarks
// ============================================================================

fn bench_parse_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_chain");
    for depth in [10, 100, 500] {
        let input = generate_chain(depth);
        group.throughput(Throughput::Bytes(input.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(depth), &input, |b, input| {
            b.iter(|| parse(black_box(input)))
        });
    }
    group.finish();
}

// ============================================================================
// Serialization Benchmarks
// ============================================================================

fn bench_serialize(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialize");
    let doc = match parse(&generate_chain(200)) {
        Ok(doc) => doc,
        Err(e) => panic!("benchmark input failed to parse: {}", e),
    };
    group.bench_function("full", |b| b.iter(|| doc.to_text(black_box(SerializeMode::Full))));
    group.bench_function("diff", |b| b.iter(|| doc.to_text(black_box(SerializeMode::Diff))));
    group.finish();
}

// ============================================================================
// Expression Benchmarks
// ============================================================================

fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate");
    let cases = [
        ("arithmetic", "1 + 2 * 3 - 4 / 5"),
        ("nested", "((1 + 2) * (3 + 4)) ^ 2"),
        ("text", "fire + ball - all"),
    ];
    for (name, input) in cases {
        group.bench_function(name, |b| b.iter(|| evaluate(black_box(input))));
    }
    group.finish();
}

criterion_group!(benches, bench_parse_chain, bench_serialize, bench_evaluate);
criterion_main!(benches);
