//! Error types surfaced by the engine entry points.
//!
//! Validation failures are rejected before any room mutation. Missing
//! definition data is never an error at this level: the affected skill or
//! card is logged and skipped during resolution. `Internal` covers contract
//! breaches discovered mid-resolution; because plays resolve against a
//! working copy, a returned error always leaves the room unchanged.

use thiserror::Error;

/// Typed rejection for a play or match-start request.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PlayError {
    /// The acting player is not the player to move (or the match has not
    /// started yet).
    #[error("it is not this player's turn")]
    NotYourTurn,

    /// The grid index is outside the 3x3 board.
    #[error("grid index {0} is outside the board")]
    InvalidCell(usize),

    /// The target cell already holds a card.
    #[error("cell {0} is already occupied")]
    CellOccupied(usize),

    /// The card instance is not in the acting player's hand.
    #[error("card is not in the player's hand")]
    CardNotInHand,

    /// The account is not seated in this room.
    #[error("player {0} is not in this room")]
    UnknownPlayer(String),

    /// The room does not have two seated players yet.
    #[error("room is not full; the match cannot start")]
    RoomNotReady,

    /// Invariant breach during resolution. The room was not modified.
    #[error("internal error during resolution: {0}")]
    Internal(String),
}
