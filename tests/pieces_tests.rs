//! Pieces tests - templates, clockwise rotation and wall kicks

use skills_tetris::core::pieces::{template_shape, WALL_KICKS};
use skills_tetris::core::{rotate, try_rotate, Board, PieceTemplate, Shape, Tetromino};
use skills_tetris::types::{ColorTag, PieceKind, SPAWN_X, SPAWN_Y};

fn rows(shape: &Shape) -> Vec<Vec<u8>> {
    shape.to_rows()
}

// ============== Template Tests ==============

#[test]
fn test_template_matrices() {
    assert_eq!(rows(&template_shape(PieceKind::I)), vec![vec![1, 1, 1, 1]]);
    assert_eq!(
        rows(&template_shape(PieceKind::J)),
        vec![vec![1, 0, 0], vec![1, 1, 1]]
    );
    assert_eq!(
        rows(&template_shape(PieceKind::L)),
        vec![vec![0, 0, 1], vec![1, 1, 1]]
    );
    assert_eq!(rows(&template_shape(PieceKind::O)), vec![vec![1, 1], vec![1, 1]]);
    assert_eq!(
        rows(&template_shape(PieceKind::S)),
        vec![vec![0, 1, 1], vec![1, 1, 0]]
    );
    assert_eq!(
        rows(&template_shape(PieceKind::T)),
        vec![vec![0, 1, 0], vec![1, 1, 1]]
    );
    assert_eq!(
        rows(&template_shape(PieceKind::Z)),
        vec![vec![1, 1, 0], vec![0, 1, 1]]
    );
}

#[test]
fn test_template_metadata() {
    let t = PieceTemplate::of(PieceKind::T);
    assert_eq!(t.color, ColorTag::Primary);
    assert_eq!(t.category, "aiml");

    let o = PieceTemplate::of(PieceKind::O);
    assert_eq!(o.color, ColorTag::Chart4);
    assert_eq!(o.category, "backend");
}

#[test]
fn test_new_tetromino_spawns_in_template_orientation() {
    let piece = Tetromino::new(PieceKind::S);
    assert_eq!((piece.x, piece.y), (SPAWN_X, SPAWN_Y));
    assert_eq!(piece.shape, template_shape(PieceKind::S));
    assert_eq!(piece.color(), ColorTag::Chart5);
}

// ============== Rotation Tests ==============

#[test]
fn test_rotate_i_turns_row_into_column() {
    let vertical = rotate(&template_shape(PieceKind::I));
    assert_eq!((vertical.rows(), vertical.cols()), (4, 1));
    assert_eq!(rows(&vertical), vec![vec![1], vec![1], vec![1], vec![1]]);
}

#[test]
fn test_rotate_t_clockwise() {
    let t = rotate(&template_shape(PieceKind::T));
    assert_eq!(rows(&t), vec![vec![1, 0], vec![1, 1], vec![1, 0]]);
}

#[test]
fn test_rotate_four_times_is_identity() {
    for kind in PieceKind::ALL {
        let shape = template_shape(kind);
        let back = rotate(&rotate(&rotate(&rotate(&shape))));
        assert_eq!(back, shape, "{:?}", kind);
    }
}

#[test]
fn test_rotate_preserves_mino_count() {
    let custom = Shape::from_rows(&[&[1, 1, 0], &[0, 1, 0], &[0, 1, 1]]).unwrap();
    assert_eq!(rotate(&custom).minos().count(), 5);
}

#[test]
fn test_from_rows_rejects_bad_matrices() {
    assert!(Shape::from_rows(&[]).is_none());
    assert!(Shape::from_rows(&[&[1, 1], &[1]]).is_none());
    assert!(Shape::from_rows(&[&[1, 1, 1, 1, 1]]).is_none());
}

// ============== Wall Kick Tests ==============

#[test]
fn test_kick_order() {
    assert_eq!(
        WALL_KICKS,
        [(0, 0), (-1, 0), (1, 0), (0, -1), (-1, -1), (1, -1)]
    );
}

#[test]
fn test_try_rotate_in_place_when_free() {
    let board = Board::new();
    let shape = template_shape(PieceKind::T);
    let (rotated, kick) = try_rotate(&shape, 4, 10, |s, x, y| board.collides(s, x, y)).unwrap();
    assert_eq!(kick, (0, 0));
    assert_eq!(rotated, rotate(&shape));
}

#[test]
fn test_try_rotate_kicks_off_right_wall() {
    let board = Board::new();
    // Horizontal at x = 7 would cover column 10.
    let vertical = rotate(&template_shape(PieceKind::I));
    let (rotated, kick) =
        try_rotate(&vertical, 7, 10, |s, x, y| board.collides(s, x, y)).unwrap();

    assert_eq!(rows(&rotated), vec![vec![1, 1, 1, 1]]);
    assert_eq!(kick, (-1, 0));
    assert!(!board.collides(&rotated, 7 + kick.0, 10 + kick.1));
}

#[test]
fn test_try_rotate_fails_flush_against_wall() {
    let board = Board::new();
    let vertical = rotate(&template_shape(PieceKind::I));
    assert!(try_rotate(&vertical, 9, 10, |s, x, y| board.collides(s, x, y)).is_none());
}

#[test]
fn test_try_rotate_first_free_offset_wins() {
    let shape = template_shape(PieceKind::T);
    // Only the up-left offset is free.
    let blocked = |_: &Shape, x: i8, y: i8| (x, y) != (3, 9);
    let (_, kick) = try_rotate(&shape, 4, 10, blocked).unwrap();
    assert_eq!(kick, (-1, -1));
}

#[test]
fn test_try_rotate_fails_when_every_offset_collides() {
    let shape = template_shape(PieceKind::L);
    assert!(try_rotate(&shape, 4, 10, |_, _, _| true).is_none());
}
