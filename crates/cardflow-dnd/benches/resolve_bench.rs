//! Benchmarks for drop-target resolution and drag sessions.
//!
//! Run with: cargo bench -p cardflow-dnd

use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use cardflow_board::{Board, Container, DragEntity, Item};
use cardflow_core::{Direction, Point, Rect};
use cardflow_dnd::{BoardEngine, CollisionResolver, DragConfig, DropRect, GestureInput};
use std::hint::black_box;

/// `columns` columns of `per_column` cards each.
fn make_board(columns: usize, per_column: usize) -> Board<()> {
    Board::new(
        (0..columns)
            .map(|col| {
                Container::new(format!("c{col}"), format!("Column {col}")).with_items(
                    (0..per_column).map(|row| Item::new(format!("c{col}-{row}"), ())),
                )
            })
            .collect(),
    )
    .unwrap_or_default()
}

fn measure(board: &Board<()>) -> Vec<DropRect> {
    let mut rects = Vec::new();
    for (col, container) in board.containers().iter().enumerate() {
        let x = col as f64 * 210.0;
        rects.push(DropRect::container(
            container.id().clone(),
            Rect::new(x, 0.0, 200.0, 2_000.0),
        ));
        for (row, item) in container.items().iter().enumerate() {
            rects.push(DropRect::item(
                item.id.clone(),
                Rect::new(x + 8.0, 40.0 + row as f64 * 60.0, 184.0, 52.0),
            ));
        }
    }
    rects
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("dnd/resolve");
    let resolver = CollisionResolver::default();
    let dragged = DragEntity::item("c0-0");

    for (columns, per_column) in [(3, 10), (5, 30), (8, 100)] {
        let board = make_board(columns, per_column);
        let rects = measure(&board);
        let id = format!("{columns}x{per_column}");

        // Pointer on a card: tier 1 only.
        group.bench_with_input(BenchmarkId::new("over_card", &id), &rects, |b, rects| {
            b.iter(|| {
                black_box(resolver.resolve(&board, &dragged, Point::new(300.0, 60.0), rects))
            })
        });
        // Below the last card: tier 1 then closest-corner re-resolution.
        group.bench_with_input(
            BenchmarkId::new("column_whitespace", &id),
            &rects,
            |b, rects| {
                b.iter(|| {
                    black_box(resolver.resolve(
                        &board,
                        &dragged,
                        Point::new(300.0, 1_990.0),
                        rects,
                    ))
                })
            },
        );
        // Column gap: intersection fallback.
        group.bench_with_input(BenchmarkId::new("gap", &id), &rects, |b, rects| {
            b.iter(|| {
                black_box(resolver.resolve(&board, &dragged, Point::new(205.0, 60.0), rects))
            })
        });
    }

    group.finish();
}

fn bench_keyboard_session(c: &mut Criterion) {
    let mut group = c.benchmark_group("dnd/session");
    let board = make_board(5, 30);

    group.bench_function("keyboard_drag_cancel", |b| {
        b.iter_batched(
            || BoardEngine::new(board.clone(), DragConfig::default()).ok(),
            |engine| {
                let Some(mut engine) = engine else { return };
                let _ = engine.on_gesture_start(DragEntity::item("c0-0"));
                for direction in [Direction::Down, Direction::Right, Direction::Right] {
                    let _ = engine.on_gesture_move(GestureInput::Intent(direction));
                }
                black_box(engine.on_gesture_cancel());
            },
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

criterion_group!(benches, bench_resolve, bench_keyboard_session);
criterion_main!(benches);
