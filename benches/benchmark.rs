//! Performance benchmarks for litweave

use std::path::Path;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use litweave::config::LineDirective;
use litweave::interface::Document;
use litweave::io::VirtualFS;
use litweave::model::{tangle_to_string, verify};
use litweave::weave::{Annotator, CmarkRenderer, MarkdownRenderer};

fn generate_markdown(num_chunks: usize, lines_per_chunk: usize) -> String {
    let mut md = String::from("# Benchmark Document\n\n");

    md.push_str("``` output.py\n");
    for i in 0..num_chunks {
        md.push_str(&format!("@{{block{}}}\n", i));
    }
    md.push_str("```\n\n");

    for i in 0..num_chunks {
        md.push_str(&format!("## Block {}\n\n``` block{}\n", i, i));
        for j in 0..lines_per_chunk {
            md.push_str(&format!("print('Block {} line {}')\n", i, j));
        }
        md.push_str("```\n\n");
    }

    md
}

fn generate_nested_markdown(depth: usize, breadth: usize) -> String {
    fn generate_chunk(md: &mut String, name: &str, depth: usize, breadth: usize) {
        md.push_str(&format!("``` {}\n", name));
        if depth > 0 {
            for i in 0..breadth {
                md.push_str(&format!("    @{{{}_{}}}\n", name, i));
            }
        } else {
            md.push_str("pass\n");
        }
        md.push_str("```\n\n");

        if depth > 0 {
            for i in 0..breadth {
                generate_chunk(md, &format!("{}_{}", name, i), depth - 1, breadth);
            }
        }
    }

    let mut md = String::from("# Nested Benchmark\n\n``` output.py\n@{main}\n```\n\n");
    generate_chunk(&mut md, "main", depth, breadth);
    md
}

fn scanned(md: &str) -> Document {
    let mut fs = VirtualFS::new();
    fs.add_file("bench.md", md);
    let mut doc = Document::new();
    doc.scan(&fs, Path::new("bench.md"), false).unwrap();
    doc
}

fn bench_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan");

    for num_chunks in [10, 50, 100, 500].iter() {
        let mut fs = VirtualFS::new();
        fs.add_file("bench.md", generate_markdown(*num_chunks, 10));
        group.bench_with_input(BenchmarkId::new("chunks", num_chunks), &fs, |b, fs| {
            b.iter(|| {
                let mut doc = Document::new();
                doc.scan(black_box(fs), Path::new("bench.md"), false).unwrap();
                doc
            })
        });
    }

    group.finish();
}

fn bench_validate(c: &mut Criterion) {
    let mut group = c.benchmark_group("validate");

    for num_chunks in [100, 1000].iter() {
        let doc = scanned(&generate_markdown(*num_chunks, 2));
        let lattice = doc.compile_lattice();
        group.bench_with_input(BenchmarkId::new("chunks", num_chunks), &doc, |b, doc| {
            b.iter(|| verify(black_box(&lattice), &doc.chunks).is_ok())
        });
    }

    group.finish();
}

fn bench_tangle(c: &mut Criterion) {
    let mut group = c.benchmark_group("tangle");
    let directive = LineDirective::new("%i# %f:%l");

    for num_chunks in [10, 50, 100, 500].iter() {
        let doc = scanned(&generate_markdown(*num_chunks, 10));
        let lattice = doc.compile_lattice();
        let verified = verify(&lattice, &doc.chunks).unwrap();

        group.bench_with_input(BenchmarkId::new("chunks", num_chunks), &doc, |b, doc| {
            b.iter(|| {
                tangle_to_string(&doc.chunks, &verified, black_box("output.py"), &directive)
                    .unwrap()
            })
        });
    }

    group.finish();
}

fn bench_tangle_nested(c: &mut Criterion) {
    let mut group = c.benchmark_group("tangle_nested");
    let directive = LineDirective::default();

    for depth in [2, 3, 4, 5].iter() {
        let doc = scanned(&generate_nested_markdown(*depth, 3));
        let lattice = doc.compile_lattice();
        let verified = verify(&lattice, &doc.chunks).unwrap();

        group.bench_with_input(
            BenchmarkId::new("depth", format!("d{}({}chunks)", depth, doc.chunks.len())),
            &doc,
            |b, doc| {
                b.iter(|| {
                    tangle_to_string(&doc.chunks, &verified, black_box("output.py"), &directive)
                        .unwrap()
                })
            },
        );
    }

    group.finish();
}

fn bench_weave(c: &mut Criterion) {
    let mut group = c.benchmark_group("weave");
    let renderer = CmarkRenderer::new();

    for num_chunks in [10, 100].iter() {
        let mut doc = scanned(&generate_markdown(*num_chunks, 10));
        doc.assign_outputs(Path::new(""));
        let lattice = doc.compile_lattice();

        group.bench_with_input(BenchmarkId::new("chunks", num_chunks), &doc, |b, doc| {
            b.iter(|| {
                let annotated = Annotator::new(doc, &lattice).annotate(Path::new("bench.md"));
                renderer.render(black_box(&annotated))
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_scan,
    bench_validate,
    bench_tangle,
    bench_tangle_nested,
    bench_weave,
);

criterion_main!(benches);
