use crate::core::{find_matches, Board, MatchSet, MoveSync, MoveToken};
use crate::error::SwapRejected;
use crate::types::{Coord, Tile};

/// A swap that has been applied to the board, along with the scan that followed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapAttempt {
    pub a: Coord,
    pub b: Coord,
    /// Tile that started at `a` (now at `b`).
    pub tile_a: Tile,
    /// Tile that started at `b` (now at `a`).
    pub tile_b: Tile,
    pub tokens: [MoveToken; 2],
    pub matches: MatchSet,
}

impl SwapAttempt {
    pub fn is_productive(&self) -> bool {
        !self.matches.is_empty()
    }

    pub fn moves_complete(&self, sync: &dyn MoveSync) -> bool {
        self.tokens.iter().all(|&t| sync.is_complete(t))
    }
}

/// Check a swap request against the board without touching it
pub fn validate_swap(board: &Board, a: Coord, b: Coord) -> Result<(Tile, Tile), SwapRejected> {
    if a == b {
        return Err(SwapRejected::SameCell);
    }
    if !a.is_adjacent(b) {
        return Err(SwapRejected::NotAdjacent);
    }
    if !board.is_visible(a) || !board.is_visible(b) {
        return Err(SwapRejected::OutsidePlayArea);
    }
    match (board.get(a), board.get(b)) {
        (Some(ta), Some(tb)) => Ok((ta, tb)),
        _ => Err(SwapRejected::EmptyCell),
    }
}

/// Exchange two adjacent tiles through `Board::set` and scan once.
///
/// Rejections leave the board unchanged.
pub fn try_swap(
    board: &mut Board,
    a: Coord,
    b: Coord,
    sync: &mut dyn MoveSync,
) -> Result<SwapAttempt, SwapRejected> {
    let (tile_a, tile_b) = validate_swap(board, a, b)?;

    let token_a = board.set(b, tile_a, sync).unwrap_or(MoveToken::Done);
    let token_b = board.set(a, tile_b, sync).unwrap_or(MoveToken::Done);
    let matches = find_matches(board);

    Ok(SwapAttempt {
        a,
        b,
        tile_a,
        tile_b,
        tokens: [token_a, token_b],
        matches,
    })
}

/// Put both tiles of an unproductive swap back where they started
pub fn revert_swap(
    board: &mut Board,
    attempt: &SwapAttempt,
    sync: &mut dyn MoveSync,
) -> [MoveToken; 2] {
    let token_a = board.set(attempt.a, attempt.tile_a, sync).unwrap_or(MoveToken::Done);
    let token_b = board.set(attempt.b, attempt.tile_b, sync).unwrap_or(MoveToken::Done);
    [token_a, token_b]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ImmediateSync, RecordingSync};

    #[test]
    fn test_rejections_leave_board_alone() {
        let mut board = Board::from_pattern(&["AB.", "CDE"]).unwrap();
        let before = board.clone();
        let mut sync = RecordingSync::default();
        let c = Coord::new;

        let cases = [
            (c(0, 0), c(0, 0), SwapRejected::SameCell),
            (c(0, 0), c(1, 1), SwapRejected::NotAdjacent),
            (c(0, 0), c(2, 0), SwapRejected::NotAdjacent),
            (c(0, 1), c(0, 2), SwapRejected::OutsidePlayArea),
            (c(-1, 0), c(0, 0), SwapRejected::OutsidePlayArea),
            (c(1, 1), c(2, 1), SwapRejected::EmptyCell),
        ];
        for (a, b, expected) in cases {
            assert_eq!(try_swap(&mut board, a, b, &mut sync).unwrap_err(), expected);
        }
        assert_eq!(board, before);
        assert!(sync.moves().is_empty());
    }

    #[test]
    fn test_swap_places_both_tiles_through_sync() {
        let mut board = Board::from_pattern(&["AB", "CD"]).unwrap();
        let a = Coord::new(0, 0);
        let b = Coord::new(1, 0);
        let (ta, tb) = (board.get(a).unwrap(), board.get(b).unwrap());
        let mut sync = RecordingSync::default();

        let attempt = try_swap(&mut board, a, b, &mut sync).unwrap();

        assert_eq!(board.get(a), Some(tb));
        assert_eq!(board.get(b), Some(ta));
        assert_eq!(sync.moves(), &[(ta.id, b), (tb.id, a)]);
        assert!(!attempt.is_productive());
    }

    #[test]
    fn test_revert_restores_board() {
        let mut board = Board::from_pattern(&["AB", "CD"]).unwrap();
        let before = board.clone();
        let mut sync = ImmediateSync;

        let attempt = try_swap(&mut board, Coord::new(0, 0), Coord::new(0, 1), &mut sync).unwrap();
        assert_ne!(board, before);
        revert_swap(&mut board, &attempt, &mut sync);
        assert_eq!(board, before);
    }

    #[test]
    fn test_productive_swap_reports_matches() {
        // Swapping (1,1) and (1,2) lines up three A's in the middle row
        let mut board = Board::from_pattern(&["BAC", "ACA", "CBB"]).unwrap();
        let attempt =
            try_swap(&mut board, Coord::new(1, 1), Coord::new(1, 2), &mut ImmediateSync).unwrap();

        assert!(attempt.is_productive());
        let expected: MatchSet = [Coord::new(0, 1), Coord::new(1, 1), Coord::new(2, 1)]
            .into_iter()
            .collect();
        assert_eq!(attempt.matches, expected);
        assert!(attempt.moves_complete(&ImmediateSync));
    }
}
