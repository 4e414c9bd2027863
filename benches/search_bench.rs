use criterion::{black_box, criterion_group, criterion_main, Criterion};

use goshawk::engine::Engine;

const STARTPOS: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
const MIDDLEGAME: &str = "r1bqk2r/pppp1ppp/2n2n2/2b1p3/2B1P3/2N2N2/PPPP1PPP/R1BQK2R w KQkq - 4 5";

fn bench_perft(c: &mut Criterion) {
    let mut group = c.benchmark_group("perft");
    group.bench_function("startpos_4", |b| {
        let mut engine = Engine::new(4, 1);
        engine.set_position(STARTPOS).unwrap();
        b.iter(|| {
            let nodes = engine.perft(black_box(4));
            assert_eq!(nodes, 197_281);
            nodes
        });
    });
    group.bench_function("kiwipete_3", |b| {
        let mut engine = Engine::new(4, 1);
        engine.set_position(KIWIPETE).unwrap();
        b.iter(|| {
            let nodes = engine.perft(black_box(3));
            assert_eq!(nodes, 97_862);
            nodes
        });
    });
    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    group.sample_size(10);
    for (name, fen, depth) in [
        ("startpos_d5", STARTPOS, 5),
        ("middlegame_d5", MIDDLEGAME, 5),
        ("kiwipete_d4", KIWIPETE, 4),
    ] {
        group.bench_function(name, |b| {
            b.iter(|| {
                // Fresh engine per run: warm tables change node counts.
                let mut engine = Engine::new(4, 1);
                engine.set_position(fen).unwrap();
                engine.deepen(black_box(depth), |_| {})
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_perft, bench_search);
criterion_main!(benches);
