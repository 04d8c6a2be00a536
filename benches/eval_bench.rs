use criterion::{criterion_group, criterion_main, Criterion, black_box};
use puzzlebench::search::eval::{Evaluator, MaterialBalance, MaterialDifferential};
use puzzlebench::Position;

fn bench_eval(c: &mut Criterion) {
    let root = Position::startpos();
    let pos = Position::from_start_and_moves(&["e2e4", "d7d5", "e4d5"]).expect("legal line");
    c.bench_function("material_balance", |ben| {
        ben.iter(|| black_box(MaterialBalance.evaluate(black_box(&pos), &root, 1)))
    });
    c.bench_function("material_differential", |ben| {
        ben.iter(|| black_box(MaterialDifferential.evaluate(black_box(&pos), &root, 1)))
    });
}

criterion_group!(benches, bench_eval);
criterion_main!(benches);
