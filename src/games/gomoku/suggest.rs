//! Move suggestions for the side to move.

use super::position::Position;
use super::rules::{is_winning_move, longest_line};
use super::types::{Board, Color};
use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::{debug, instrument};

/// Empty points closer than this (in king moves) to a stone are candidates.
const NEIGHBORHOOD: isize = 2;

/// How hard the suggester tries.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub enum Difficulty {
    /// Any empty point.
    Easy,
    /// Win if possible, else block the opponent's win.
    #[default]
    Medium,
    /// Like medium, then prefer the longest own line and the longest blocked line.
    Hard,
}

/// Suggests a point for `color` to play, or `None` on a full board.
///
/// Candidates are evaluated as if `color` stood on them; the board is
/// never modified. Ties between equally scored points are broken by `rng`.
#[instrument(skip(board, rng))]
pub fn suggest_move<R: Rng + ?Sized>(
    board: &Board,
    color: Color,
    difficulty: Difficulty,
    rng: &mut R,
) -> Option<Position> {
    let side = board.side();
    let empties: Vec<Position> = (0..side)
        .flat_map(|row| (0..side).map(move |col| Position::new(row, col)))
        .filter(|&pos| board.is_empty(pos))
        .collect();

    if difficulty == Difficulty::Easy {
        return empties.choose(&mut *rng).copied();
    }

    if board.stone_count() == 0 {
        return Some(Position::new(side / 2, side / 2));
    }

    let near: Vec<Position> = empties
        .iter()
        .copied()
        .filter(|&pos| touches_stone(board, pos))
        .collect();
    let candidates = if near.is_empty() { empties } else { near };

    let opponent = color.opponent();
    let score = |pos: Position| {
        let tier = if is_winning_move(board, pos, color) {
            2
        } else if is_winning_move(board, pos, opponent) {
            1
        } else {
            0
        };
        match difficulty {
            Difficulty::Hard => (
                tier,
                longest_line(board, pos, color),
                longest_line(board, pos, opponent),
            ),
            _ => (tier, 0, 0),
        }
    };

    let best = candidates.iter().map(|&pos| score(pos)).max()?;
    let best_moves: Vec<Position> = candidates
        .into_iter()
        .filter(|&pos| score(pos) == best)
        .collect();

    let choice = best_moves.choose(&mut *rng).copied();
    debug!(?choice, tier = best.0, options = best_moves.len(), "Suggested move");
    choice
}

fn touches_stone(board: &Board, pos: Position) -> bool {
    (-NEIGHBORHOOD..=NEIGHBORHOOD).any(|dr| {
        (-NEIGHBORHOOD..=NEIGHBORHOOD).any(|dc| {
            pos.step((dr, dc), board.side())
                .and_then(|near| board.get(near))
                .is_some_and(|square| square.stone().is_some())
        })
    })
}
