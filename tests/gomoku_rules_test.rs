//! Tests for gomoku board types and win detection.

use rand::SeedableRng;
use rand::rngs::StdRng;
use strictly_gomoku::{
    Board, BoardSize, Color, Difficulty, Game, PlaceError, Placement, Position, Square,
    suggest_move,
};
use strum::IntoEnumIterator;

/// Plays `moves` in order, alternating colors starting with black.
fn play(game: &mut Game, moves: &[(i64, i64)]) -> Placement {
    let mut last = None;
    for &(row, col) in moves {
        last = Some(game.place(row, col).expect("Valid move"));
    }
    last.expect("At least one move")
}

#[test]
fn test_every_size_starts_empty() {
    for size in BoardSize::iter() {
        let board = Board::new(size);
        assert_eq!(board.rows().count(), size.side());
        assert!(board.rows().all(|row| row.len() == size.side()));
        assert_eq!(board.stone_count(), 0);
    }
}

#[test]
fn test_size_normalization() {
    assert_eq!(BoardSize::from_requested(Some(9)), BoardSize::Nine);
    assert_eq!(BoardSize::from_requested(Some(13)), BoardSize::Thirteen);
    assert_eq!(BoardSize::from_requested(Some(19)), BoardSize::Nineteen);
    assert_eq!(BoardSize::from_requested(Some(10)), BoardSize::Fifteen);
    assert_eq!(BoardSize::from_requested(Some(0)), BoardSize::Fifteen);
    assert_eq!(BoardSize::from_requested(None), BoardSize::Fifteen);
}

#[test]
fn test_color_normalization() {
    assert_eq!(Color::from_requested(Some("white")), Color::White);
    assert_eq!(Color::from_requested(Some("black")), Color::Black);
    assert_eq!(Color::from_requested(Some("WHITE")), Color::Black);
    assert_eq!(Color::from_requested(Some("red")), Color::Black);
    assert_eq!(Color::from_requested(None), Color::Black);
}

#[test]
fn test_locate_respects_board_size() {
    let board = Board::new(BoardSize::Nine);
    assert_eq!(board.locate(8, 8), Some(Position::new(8, 8)));
    assert_eq!(board.locate(9, 0), None);
    assert_eq!(board.locate(0, -1), None);

    let board = Board::new(BoardSize::Nineteen);
    assert_eq!(board.locate(18, 9), Some(Position::new(18, 9)));
}

#[test]
fn test_board_serializes_as_rows_of_nullable_colors() {
    let mut game = Game::new(BoardSize::Nine);
    game.place(0, 0).expect("Valid move");
    game.place(0, 1).expect("Valid move");

    let json = serde_json::to_value(game.board()).expect("Serialize");
    let rows = json.as_array().expect("Array of rows");
    assert_eq!(rows.len(), 9);
    assert_eq!(rows[0][0], "black");
    assert_eq!(rows[0][1], "white");
    assert!(rows[0][2].is_null());
    assert!(rows[8][8].is_null());

    let back: Board = serde_json::from_value(json).expect("Deserialize");
    assert_eq!(&back, game.board());
}

#[test]
fn test_ragged_board_rejected() {
    let mut rows = vec![vec![Square::Empty; 9]; 9];
    rows[3].pop();
    assert!(Board::try_from(rows).is_err());
    assert!(Board::try_from(vec![vec![Square::Empty; 10]; 10]).is_err());
}

#[test]
fn test_turn_alternates() {
    let mut game = Game::new(BoardSize::Fifteen);
    assert_eq!(game.to_move(), Color::Black);
    assert_eq!(
        game.place(7, 7),
        Ok(Placement::Continue { next: Color::White })
    );
    assert_eq!(
        game.place(7, 8),
        Ok(Placement::Continue { next: Color::Black })
    );
    assert_eq!(game.board().stone_count(), 2);
}

#[test]
fn test_horizontal_five_wins() {
    let mut game = Game::new(BoardSize::Fifteen);
    let result = play(
        &mut game,
        &[(0, 0), (5, 0), (0, 1), (5, 1), (0, 2), (5, 2), (0, 3), (5, 3), (0, 4)],
    );
    assert_eq!(result, Placement::Won(Color::Black));
    assert_eq!(game.winner(), Some(Color::Black));
    assert_eq!(game.to_move(), Color::Black);
}

#[test]
fn test_four_does_not_win() {
    let mut game = Game::new(BoardSize::Fifteen);
    let result = play(
        &mut game,
        &[(0, 0), (5, 0), (0, 1), (5, 1), (0, 2), (5, 2), (0, 3)],
    );
    assert_eq!(result, Placement::Continue { next: Color::White });
    assert_eq!(game.winner(), None);
}

#[test]
fn test_vertical_five_wins_for_white() {
    let mut game = Game::new(BoardSize::Thirteen);
    let result = play(
        &mut game,
        &[
            (0, 12),
            (2, 2),
            (1, 12),
            (3, 2),
            (3, 12),
            (4, 2),
            (5, 12),
            (5, 2),
            (7, 12),
            (6, 2),
        ],
    );
    assert_eq!(result, Placement::Won(Color::White));
}

#[test]
fn test_diagonal_five_wins() {
    let mut game = Game::new(BoardSize::Nine);
    let result = play(
        &mut game,
        &[(4, 4), (0, 8), (5, 5), (1, 8), (6, 6), (2, 8), (7, 7), (3, 8), (8, 8)],
    );
    assert_eq!(result, Placement::Won(Color::Black));
}

#[test]
fn test_anti_diagonal_five_wins_at_corner() {
    let mut game = Game::new(BoardSize::Nine);
    let result = play(
        &mut game,
        &[(4, 4), (0, 0), (3, 5), (0, 1), (2, 6), (0, 2), (1, 7), (0, 3), (0, 8)],
    );
    assert_eq!(result, Placement::Won(Color::Black));
}

#[test]
fn test_gap_filled_last_wins() {
    let mut game = Game::new(BoardSize::Fifteen);
    let result = play(
        &mut game,
        &[(7, 3), (0, 0), (7, 4), (0, 1), (7, 6), (0, 2), (7, 7), (0, 4), (7, 5)],
    );
    assert_eq!(result, Placement::Won(Color::Black));
}

#[test]
fn test_overline_wins() {
    let mut game = Game::new(BoardSize::Fifteen);
    let result = play(
        &mut game,
        &[
            (7, 1),
            (0, 0),
            (7, 2),
            (0, 1),
            (7, 3),
            (0, 2),
            (7, 5),
            (0, 4),
            (7, 6),
            (0, 6),
            (7, 4),
        ],
    );
    assert_eq!(result, Placement::Won(Color::Black));
}

#[test]
fn test_blocked_line_does_not_win() {
    let mut game = Game::new(BoardSize::Fifteen);
    // White sits in the middle of black's row.
    let result = play(
        &mut game,
        &[(3, 0), (3, 2), (3, 1), (9, 9), (3, 3), (9, 10), (3, 4), (9, 12), (3, 5)],
    );
    assert_eq!(result, Placement::Continue { next: Color::White });
}

#[test]
fn test_moves_after_win_rejected() {
    let mut game = Game::new(BoardSize::Nine);
    play(
        &mut game,
        &[(0, 0), (8, 0), (0, 1), (8, 1), (0, 2), (8, 2), (0, 3), (8, 3), (0, 4)],
    );
    let before = game.clone();
    assert_eq!(game.place(4, 4), Err(PlaceError::GameOver));
    assert_eq!(game, before);
}

#[test]
fn test_out_of_bounds_uses_own_size() {
    let mut small = Game::new(BoardSize::Nine);
    assert!(matches!(
        small.place(12, 12),
        Err(PlaceError::OutOfBounds { .. })
    ));

    let mut large = Game::new(BoardSize::Nineteen);
    assert_eq!(
        large.place(12, 12),
        Ok(Placement::Continue { next: Color::White })
    );
}

#[test]
fn test_display_marks_stones() {
    let mut game = Game::new(BoardSize::Nine);
    game.place(0, 0).expect("Valid move");
    game.place(8, 8).expect("Valid move");

    let text = game.board().display();
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines.len(), 10);
    assert!(lines[1].contains('X'));
    assert!(lines[9].contains('O'));
}

#[test]
fn test_suggestion_blocks_then_wins() {
    let mut game = Game::new(BoardSize::Fifteen);
    // Black builds four on row 7, white answers far away on row 0.
    for col in 3..7 {
        game.place(7, col).expect("Black move");
        game.place(0, col * 2).expect("White move");
    }
    assert_eq!(game.to_move(), Color::Black);

    let mut rng = StdRng::seed_from_u64(5);
    let win = suggest_move(game.board(), Color::Black, Difficulty::Medium, &mut rng)
        .expect("Move");
    assert!([Position::new(7, 2), Position::new(7, 7)].contains(&win));

    let block = suggest_move(game.board(), Color::White, Difficulty::Hard, &mut rng)
        .expect("Move");
    assert!([Position::new(7, 2), Position::new(7, 7)].contains(&block));

    assert_eq!(
        game.place(win.row as i64, win.col as i64),
        Ok(Placement::Won(Color::Black))
    );
}

#[test]
fn test_difficulty_parses_from_lowercase() {
    assert_eq!("easy".parse::<Difficulty>(), Ok(Difficulty::Easy));
    assert_eq!("hard".parse::<Difficulty>(), Ok(Difficulty::Hard));
    assert_eq!(Difficulty::default().to_string(), "medium");
    assert!("brutal".parse::<Difficulty>().is_err());
}
