use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use tetrimino::core::{Field, Game, GameConfig, Piece};
use tetrimino::term::{FrameBuffer, GameView, Viewport};
use tetrimino::types::{Action, GridOffset, PieceKind};

fn started_game() -> Game {
    let mut game = Game::new(GameConfig::default(), 12345);
    game.apply(Action::Play, 0.0);
    game
}

fn bench_tick(c: &mut Criterion) {
    c.bench_function("session_300_ticks", |b| {
        b.iter_batched(
            started_game,
            |mut game| {
                for _ in 0..300 {
                    game.tick();
                }
                game
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut field = Field::default();
            for y in 16..20 {
                for x in 0..10 {
                    field.set(GridOffset::new(x, y), Some(PieceKind::I));
                }
            }
            black_box(field.delete_filled_rows())
        })
    });
}

fn bench_piece_spawn(c: &mut Criterion) {
    c.bench_function("spawn_piece", |b| {
        b.iter_batched(
            started_game,
            |mut game| {
                game.tick();
                game
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_touching(c: &mut Criterion) {
    let field = Field::from_rows(&[
        "..........",
        "..........",
        "..........",
        "ZZZZ..ZZZZ",
    ]);
    let piece = Piece::new(PieceKind::T, GridOffset::new(4, 1));

    c.bench_function("touching", |b| {
        b.iter(|| black_box(&field).touching(black_box(&piece)))
    });
}

fn bench_rotate(c: &mut Criterion) {
    let mut game = started_game();
    game.tick();

    c.bench_function("rotate_tetrimino", |b| {
        b.iter(|| {
            game.rotate_tetrimino();
        })
    });
}

fn bench_render(c: &mut Criterion) {
    let mut game = started_game();
    game.tick();
    let snap = game.snapshot();
    let view = GameView::default();
    let mut fb = FrameBuffer::new(80, 24);

    c.bench_function("render_into_80x24", |b| {
        b.iter(|| view.render_into(black_box(&snap), Viewport::new(80, 24), &mut fb))
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_line_clear,
    bench_piece_spawn,
    bench_touching,
    bench_rotate,
    bench_render
);
criterion_main!(benches);
