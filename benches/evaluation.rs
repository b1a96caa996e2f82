use criterion::{black_box, criterion_group, criterion_main, Criterion};
use evalexpr::*;
use safecalc_rs::ast::{normalize, Evaluator, Parser};
use safecalc_rs::Calculator;

/// Benchmark simple arithmetic expressions
fn benchmark_simple_arithmetic(c: &mut Criterion) {
    let mut group = c.benchmark_group("Simple arithmetic Expression Evaluation");

    let calculator = Calculator::new();
    let evaluator = Evaluator::new();

    let expr = "2 + 3";
    let parsed = Parser::parse_expression(&normalize(expr).unwrap()).unwrap();
    let precompiled_evalexpr = build_operator_tree::<DefaultNumericTypes>(expr).unwrap();

    group.bench_function("calculate_arithmetic", |b| {
        b.iter(|| calculator.calculate(black_box(expr)))
    });

    group.bench_function("preparsed_arithmetic", |b| {
        b.iter(|| evaluator.evaluate(black_box(&parsed)))
    });

    group.bench_function("native_rust_arithmetic", |b| {
        b.iter(|| black_box(2.0) + black_box(3.0))
    });

    group.bench_function("meval_arithmetic", |b| {
        b.iter(|| meval::eval_str(black_box(expr)).unwrap())
    });

    group.bench_function("evalexpr_arithmetic", |b| {
        b.iter(|| evalexpr::eval(black_box(expr)).unwrap())
    });

    group.bench_function("precompiled_evalexpr_arithmetic", |b| {
        b.iter(|| precompiled_evalexpr.eval().unwrap())
    });
}

/// Benchmark complex arithmetic expressions
fn benchmark_complex_arithmetic(c: &mut Criterion) {
    let mut group = c.benchmark_group("Complex arithmetic Expression Evaluation");

    let calculator = Calculator::new();
    let evaluator = Evaluator::new();

    let expr = "(10 + 20) * 3 / (4 - 1) + 5 ^ 2";
    let parsed = Parser::parse_expression(&normalize(expr).unwrap()).unwrap();

    group.bench_function("calculate_complex_arithmetic", |b| {
        b.iter(|| calculator.calculate(black_box(expr)))
    });

    group.bench_function("preparsed_complex_arithmetic", |b| {
        b.iter(|| evaluator.evaluate(black_box(&parsed)))
    });

    group.bench_function("native_rust_complex_arithmetic", |b| {
        b.iter(|| black_box((10.0 + 20.0) * 3.0 / (4.0 - 1.0) + 5.0f64.powf(2.0)))
    });

    group.bench_function("meval_complex_arithmetic", |b| {
        b.iter(|| meval::eval_str(black_box(expr)).unwrap())
    });
}

/// Benchmark function calls and constants
fn benchmark_function_calls(c: &mut Criterion) {
    let mut group = c.benchmark_group("Function Call Evaluation");

    let calculator = Calculator::new();

    let expr = "sqrt(16) + sin(pi / 2) * abs(-3)";

    group.bench_function("calculate_function_call", |b| {
        b.iter(|| calculator.calculate(black_box(expr)))
    });

    group.bench_function("native_rust_function_call", |b| {
        b.iter(|| {
            black_box(16.0f64).sqrt() + (std::f64::consts::PI / 2.0).sin() * (-3.0f64).abs()
        })
    });

    group.bench_function("meval_function_call", |b| {
        b.iter(|| meval::eval_str(black_box(expr)).unwrap())
    });
}

/// Benchmark rejected input
fn benchmark_rejections(c: &mut Criterion) {
    let mut group = c.benchmark_group("Rejected Expression Evaluation");
    let calculator = Calculator::new();

    group.bench_function("unsupported_function", |b| {
        b.iter(|| calculator.calculate(black_box("__import__(1)")))
    });

    group.bench_function("parse_error", |b| {
        b.iter(|| calculator.calculate(black_box("2 +* 3")))
    });
}

/// Benchmark batches
fn benchmark_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("Batch Evaluation");
    let calculator = Calculator::new();
    let expressions: Vec<String> = (0..1000)
        .map(|i| format!("sqrt({}) * {} / (1 + {})", i, i, i))
        .collect();

    group.bench_function("calculate_batch", |b| {
        b.iter(|| calculator.calculate_batch(black_box(&expressions)))
    });

    group.bench_function("calculate_sequential", |b| {
        b.iter(|| {
            expressions
                .iter()
                .map(|expression| calculator.calculate(expression))
                .collect::<Vec<_>>()
        })
    });
}

criterion_group!(
    benches,
    benchmark_simple_arithmetic,
    benchmark_complex_arithmetic,
    benchmark_function_calls,
    benchmark_rejections,
    benchmark_batch,
);
criterion_main!(benches);
