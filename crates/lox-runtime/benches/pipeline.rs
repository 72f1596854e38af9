//! Pipeline benchmarks
//!
//! Measures each phase on canonical programs:
//! - Scanning throughput
//! - Parsing (including the `for` desugaring)
//! - Tree-walking execution: loops, string building, scope depth

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use lox_runtime::{parse_source, scan, Interpreter, PrintSink};

struct NullSink;

impl PrintSink for NullSink {
    fn print(&mut self, _text: &str) {}
}

/// Scan, parse and run `source`, discarding output
fn run(source: &str) {
    let (statements, _) = parse_source(source);
    let mut interpreter = Interpreter::new();
    let _ = interpreter.interpret(&statements, &mut NullSink);
}

const LOOP_PROGRAM: &str = r#"
var sum = 0;
for (var i = 0; i < 10000; i = i + 1) {
  sum = sum + i;
}
print sum;
"#;

// ============================================================================
// Front end
// ============================================================================

fn bench_scan(c: &mut Criterion) {
    let source = LOOP_PROGRAM.repeat(50);
    let mut group = c.benchmark_group("scan");
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("loop_program_x50", |b| {
        b.iter(|| scan(black_box(&source)));
    });
    group.finish();
}

fn bench_parse(c: &mut Criterion) {
    let source = LOOP_PROGRAM.repeat(50);
    c.bench_function("parse_loop_program_x50", |b| {
        b.iter(|| parse_source(black_box(&source)));
    });
}

// ============================================================================
// Execution
// ============================================================================

fn bench_arithmetic_loop(c: &mut Criterion) {
    c.bench_function("run_arithmetic_loop_10k", |b| {
        b.iter(|| run(black_box(LOOP_PROGRAM)));
    });
}

fn bench_string_concat(c: &mut Criterion) {
    c.bench_function("run_string_concat_500", |b| {
        let code = r#"var s = ""; var i = 0; while (i < 500) { s = s + "x"; i = i + 1; }"#;
        b.iter(|| run(black_box(code)));
    });
}

fn bench_scope_depth(c: &mut Criterion) {
    let mut group = c.benchmark_group("run_scope_depth");

    // Lookups of a global from increasingly nested blocks
    for depth in [1usize, 8, 32].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(depth), depth, |b, &d| {
            let code = format!(
                "var g = 0; {} var i = 0; while (i < 1000) {{ g = g + 1; i = i + 1; }} {}",
                "{".repeat(d),
                "}".repeat(d)
            );
            b.iter(|| run(black_box(&code)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_scan,
    bench_parse,
    bench_arithmetic_loop,
    bench_string_concat,
    bench_scope_depth
);
criterion_main!(benches);
