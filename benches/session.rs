use criterion::{black_box, criterion_group, criterion_main, Criterion};

use blockfall::core::{GameConfig, GameSession, Grid, LockedCell};
use blockfall::types::{BlockToken, InputState, ShapeId};

fn bench_tick(c: &mut Criterion) {
    let mut session = GameSession::with_seed(GameConfig::default(), 12345).unwrap();
    let mut now = 0.0;

    c.bench_function("session_tick", |b| {
        b.iter(|| {
            now += 0.016;
            session.tick(black_box(now), InputState::default());
        })
    });
}

fn bench_clear_cascade(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut grid = Grid::new(10, 20);
            // Fill the bottom 4 rows.
            let cells: Vec<LockedCell> = (0..4)
                .flat_map(|y| {
                    (0..10).map(move |x| LockedCell {
                        x,
                        y,
                        token: BlockToken {
                            piece: 0,
                            shape: ShapeId(0),
                        },
                    })
                })
                .collect();
            grid.place(&cells);

            let mut events = Vec::new();
            grid.clear_lines(0, 4, &mut events);
        })
    });
}

fn bench_hard_drop_cycle(c: &mut Criterion) {
    c.bench_function("hard_drop_to_lock", |b| {
        b.iter(|| {
            let mut session = GameSession::with_seed(GameConfig::default(), 7).unwrap();
            let mut now = 0.0;
            session.tick(
                now,
                InputState {
                    hard_drop: true,
                    ..InputState::default()
                },
            );
            for _ in 0..64 {
                now += 0.03;
                session.tick(now, InputState::default());
            }
            black_box(session.score());
        })
    });
}

criterion_group!(benches, bench_tick, bench_clear_cascade, bench_hard_drop_cycle);
criterion_main!(benches);
