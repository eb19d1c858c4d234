//! Draw detection.

use crate::Board;
use tracing::instrument;

/// Checks if the board is full (no blank cells).
#[instrument(level = "trace")]
pub fn is_full(board: &Board) -> bool {
    board.blank_count() == 0
}
