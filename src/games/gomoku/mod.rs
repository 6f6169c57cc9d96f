//! Gomoku: five in a row on a square grid.

mod position;
mod rules;
mod suggest;
mod types;

pub use position::Position;
pub use rules::{Game, PlaceError, Placement, WIN_LENGTH, is_winning_move, longest_line, run_length};
pub use suggest::{Difficulty, suggest_move};
pub use types::{Board, BoardSize, Color, MalformedBoard, Square, UnsupportedSize};
