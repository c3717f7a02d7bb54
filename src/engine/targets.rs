//! Target resolution: mapping a skill's target type to board positions.
//!
//! Resolution reads the board and (for random picks) the room RNG, but
//! never mutates a card; effect application happens afterwards in
//! [`crate::engine::effects`].

use crate::board::{Board, Direction};
use crate::core::GameRng;
use crate::defs::TargetType;
use crate::room::Account;

/// One resolved target of a skill.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Target {
    /// Board index of the targeted cell.
    pub index: usize,
    /// The adjacency direction used to reach the target from the skill
    /// owner's cell; `None` when the target is not directionally derived.
    pub direction: Option<Direction>,
}

/// Resolve a target type to an ordered list of board positions.
///
/// `owner_index` is the cell of the card carrying the skill. Empty cells
/// are never targets. Unrecognized target types resolve to an empty list,
/// a forward-compatible no-op rather than an error.
#[must_use]
pub fn resolve_targets(
    board: &Board,
    rng: &mut GameRng,
    acting: &Account,
    target_type: TargetType,
    owner_index: usize,
) -> Vec<Target> {
    let mut targets = Vec::new();

    match target_type {
        TargetType::Self_ => {
            if board.get(owner_index).is_some() {
                targets.push(Target {
                    index: owner_index,
                    direction: None,
                });
            }
        }

        TargetType::AdjacentAllies | TargetType::AdjacentEnemies => {
            let want_ally = target_type == TargetType::AdjacentAllies;
            for dir in Direction::ALL {
                let Some(neighbor) = dir.neighbor(owner_index) else {
                    continue;
                };
                let Some(cell) = board.get(neighbor) else {
                    continue;
                };
                if (cell.owner == *acting) == want_ally {
                    targets.push(Target {
                        index: neighbor,
                        direction: Some(dir),
                    });
                }
            }
        }

        TargetType::RandomEnemyOnBoard => {
            let enemies: Vec<usize> = board
                .occupied()
                .filter(|(_, cell)| cell.owner != *acting)
                .map(|(i, _)| i)
                .collect();
            if let Some(&index) = rng.choose(&enemies) {
                targets.push(Target {
                    index,
                    direction: None,
                });
            }
        }

        TargetType::AllEnemiesOnBoard => {
            targets.extend(
                board
                    .occupied()
                    .filter(|(_, cell)| cell.owner != *acting)
                    .map(|(index, _)| Target {
                        index,
                        direction: None,
                    }),
            );
        }

        TargetType::Unknown => {}
    }

    targets
}
