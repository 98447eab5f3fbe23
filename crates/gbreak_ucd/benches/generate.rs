use criterion::{criterion_main, criterion_group, Criterion, black_box};

use gbreak_common::MiB;
use gbreak_logging::{get_logger, LogLevel};
use gbreak_ucd::*;

const SAMPLE: &str = include_str!("../src/tests/data/GraphemeBreakProperty-sample.txt");

fn large_source() -> String {
    // Every line covers new codepoints, so the table keeps growing instead of appending tags
    let mut source = String::new();
    for plane in 0..16u32 {
        for idx in 0..0x100u32 {
            let start = (plane << 16) | (idx << 8);
            source.push_str(&format!("{:04X}..{:04X} ; Extend # generated\n", start, start + 0x7F));
            source.push_str(&format!("{:04X} ; Control # generated\n", start + 0x80));
        }
    }
    source
}

fn line_benchmark(c: &mut Criterion) {
    c.bench_function("parse_line: data", |b| b.iter(|| {
        parse_line(black_box("0600..0605    ; Prepend # Cf   [6] ARABIC NUMBER SIGN..ARABIC NUMBER MARK ABOVE"))
    }));

    c.bench_function("parse_line: comment", |b| b.iter(|| {
        parse_line(black_box("# ================================================"))
    }));

    c.bench_function("CodepointSpec::parse: range", |b| b.iter(|| {
        CodepointSpec::parse(black_box("1F1E6..1F1FF"))
    }));
}

fn generate_benchmark(c: &mut Criterion) {
    get_logger().set_max_level(LogLevel::Severe);

    let generator = Generator::default();
    c.bench_function("generate: sample", |b| b.iter(|| {
        generator.generate(black_box(SAMPLE))
    }));

    let source = large_source();
    c.bench_function("generate: 4096 lines", |b| b.iter(|| {
        generator.generate(black_box(&source))
    }));

    let Ok(generation) = generator.generate(&source) else { return; };
    c.bench_function("emit: 4096 lines", |b| b.iter(|| {
        let mut out = Vec::with_capacity(MiB(4));
        RustTableEmitter::default().emit(&generation.table, &mut out).map(|_| out.len())
    }));
}

criterion_group!(benches, line_benchmark, generate_benchmark);
criterion_main!(benches);
