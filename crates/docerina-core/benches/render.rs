//! Benchmark suite for documentation rendering
//!
//! Measures the in-memory stages of a run over synthetic registries:
//! - parse: declaration extraction from one module
//! - render: all documents of a site, including cross-linking

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::fmt::Write;
use std::path::Path;

use docerina_core::doc::{list_primitives, render, PackageRegistry};
use docerina_core::Parser;

/// Generate a module with structs, functions referencing them and a connector
fn generate_module(package: &str, decls: usize) -> String {
    let mut source = format!("package {package};\n\n");
    for i in 0..decls {
        writeln!(
            source,
            "@doc:Description{{value: \"Record {i}\"}}\nstruct Record{i} {{ string name; int id; Record{}[] children; }}",
            i.saturating_sub(1)
        )
        .unwrap();
        writeln!(
            source,
            "@doc:Param{{value: \"r: the record\"}}\nfunction process{i}(Record{i} r, json payload) (message m) {{ return m; }}"
        )
        .unwrap();
    }
    source.push_str(
        "connector Client(string url) {\n    action send(Client c, message m) (message) { return m; }\n}\n",
    );
    source
}

/// Build a registry of `packages` packages with `decls` declarations each
fn generate_registry(packages: usize, decls: usize) -> PackageRegistry {
    let mut registry = PackageRegistry::new();
    for p in 0..packages {
        let name = format!("org.bench.pkg{p}");
        let module = Parser::parse_module(&generate_module(&name, decls))
            .expect("benchmark module should parse");
        registry.add_module(Path::new(&format!("{name}.bal")), module);
    }
    registry
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_module");

    for decls in [10, 100, 1_000].iter() {
        let source = generate_module("org.bench", *decls);
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(decls), &source, |b, source| {
            b.iter(|| black_box(Parser::parse_module(source)));
        });
    }

    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_site");

    for packages in [1, 10, 50].iter() {
        let registry = generate_registry(*packages, 50);
        group.throughput(Throughput::Elements(*packages as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(packages),
            &registry,
            |b, registry| {
                b.iter(|| black_box(render(registry, list_primitives())));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_parse, bench_render);
criterion_main!(benches);
