//! Adjacency combat: capturing neighbors of a just-placed card.

use log::debug;

use crate::board::Direction;
use crate::core::PlayError;
use crate::defs::{DefRegistry, RANGED_ATTACK};
use crate::room::{Account, Room};

/// Record of one adjacency capture, consumed by `onCapture` dispatch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Capture {
    /// Board index of the captured cell.
    pub index: usize,
    /// Who owned the cell before the flip.
    pub original_owner: Account,
}

/// Scan the four neighbors of a just-placed card and flip every opponent
/// card it beats.
///
/// The cell at `placed_index` must already hold the placed card. A card
/// with `can_attack` false, or carrying the ranged-attack skill, skips
/// adjacency combat entirely and captures only through its own skills.
///
/// A neighbor flips iff the placed card's stat toward it strictly exceeds
/// the neighbor's stat back; ties never flip. Flipping reassigns the cell
/// owner to a copy of the placing player's identity and strips the captured
/// card's adjudicating skills. All flips complete before any `onCapture`
/// skill runs, so those skills observe the updated board.
pub fn resolve_captures(
    room: &mut Room,
    defs: &DefRegistry,
    placing: &Account,
    placed_index: usize,
) -> Result<Vec<Capture>, PlayError> {
    let placed = room
        .board
        .card(placed_index)
        .ok_or_else(|| PlayError::Internal(format!("placed cell {placed_index} is empty")))?;

    if !placed.can_attack {
        debug!("card {:?} cannot attack; skipping adjacency combat", placed.id);
        return Ok(Vec::new());
    }
    if placed.has_skill(RANGED_ATTACK) {
        debug!("card {:?} is ranged; skipping adjacency combat", placed.id);
        return Ok(Vec::new());
    }

    // Stats of the placed card, read before any neighbor mutation.
    let attack = placed.stats();
    let mut captures = Vec::new();

    for dir in Direction::ALL {
        let Some(neighbor_index) = dir.neighbor(placed_index) else {
            continue;
        };
        let Some(cell) = room.board.get_mut(neighbor_index) else {
            continue;
        };
        if cell.owner == *placing {
            continue;
        }

        let attack_value = match dir {
            Direction::Up => attack.up,
            Direction::Down => attack.down,
            Direction::Left => attack.left,
            Direction::Right => attack.right,
        };
        if attack_value > cell.card.stat(dir.opposite()) {
            debug!("card at {neighbor_index} captured by placement at {placed_index}");
            let original_owner = std::mem::replace(&mut cell.owner, placing.clone());
            cell.card.strip_adjudicating(defs);
            captures.push(Capture {
                index: neighbor_index,
                original_owner,
            });
        }
    }

    Ok(captures)
}
