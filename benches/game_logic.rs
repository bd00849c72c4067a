use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tui_blockfall::core::{collides, rotate_clockwise, Board, GameState};
use tui_blockfall::term::{BoardView, Scene, Viewport};
use tui_blockfall::types::PieceKind;

fn filled_board(rows: std::ops::Range<i32>) -> Board {
    let mut board = Board::new(10, 20);
    for y in rows {
        for x in 0..10 {
            board.set_cell(x, y, PieceKind::I.color());
        }
    }
    board
}

fn bench_drop_step(c: &mut Criterion) {
    let mut state = GameState::new(10, 20, 12345);
    state.spawn();

    c.bench_function("drop_step", |b| {
        b.iter(|| {
            black_box(state.drop_step(|_| {}));
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut state = GameState::with_board(filled_board(16..20), 1);
            black_box(state.clear_lines(|_| {}));
        })
    });
}

fn bench_spawn(c: &mut Criterion) {
    let mut state = GameState::new(10, 20, 12345);

    c.bench_function("spawn_piece", |b| {
        b.iter(|| {
            black_box(state.spawn());
        })
    });
}

fn bench_collides(c: &mut Criterion) {
    let board = filled_board(10..20);
    let shape = rotate_clockwise(&tui_blockfall::core::catalog_shape(PieceKind::T));

    c.bench_function("collides", |b| {
        b.iter(|| black_box(collides(&shape, black_box(4), black_box(8), &board)))
    });
}

fn bench_translate_rotate(c: &mut Criterion) {
    let mut state = GameState::new(10, 20, 12345);
    state.spawn_kind(PieceKind::T);
    let mut dx = 1;

    c.bench_function("translate_rotate", |b| {
        b.iter(|| {
            if !state.translate(dx) {
                dx = -dx;
            }
            black_box(state.rotate());
        })
    });
}

fn bench_render_view(c: &mut Criterion) {
    let mut state = GameState::with_board(filled_board(15..19), 1);
    state.spawn_kind(PieceKind::L);
    let view = BoardView::default();
    let viewport = Viewport::new(80, 24);
    let mut fb = tui_blockfall::term::FrameBuffer::new(80, 24);

    c.bench_function("render_board_view", |b| {
        b.iter(|| {
            let scene = Scene::new(state.board(), state.active());
            view.render_into(&scene, viewport, &mut fb);
            black_box(fb.get(0, 0));
        })
    });
}

criterion_group!(
    benches,
    bench_drop_step,
    bench_line_clear,
    bench_spawn,
    bench_collides,
    bench_translate_rotate,
    bench_render_view
);
criterion_main!(benches);
