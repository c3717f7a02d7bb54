//! Skill trigger dispatch: collecting, ordering, and running skills for a
//! trigger phase.
//!
//! A play dispatches phases in a fixed order: `onPlay` for the placed card,
//! then capture resolution (which dispatches `onCapture` once per capture),
//! then `onTurnEnd` over every cell the acting player owns. Within a phase,
//! candidates are filtered against their definitions, sorted by ascending
//! priority (collection order breaks ties), and executed strictly one after
//! another — a later skill observes everything an earlier one changed.

use log::debug;

use crate::core::PlayError;
use crate::defs::{DefRegistry, SkillId, Trigger};
use crate::room::{Account, Room};

use super::effects::apply_effect;

/// Context of one adjacency capture, passed to `onCapture` skills.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaptureContext {
    /// Cell of the card that made the capture.
    pub capturing_index: usize,
    /// Cell of the captured card (already flipped when skills run).
    pub captured_index: usize,
    /// Who owned the captured cell before the flip.
    pub original_owner: Account,
}

/// A trigger phase within one play.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TriggerPhase {
    /// The card was just placed at this index.
    OnPlay { placed_index: usize },
    /// The placed card captured a neighbor; dispatched once per capture.
    OnCapture { context: CaptureContext },
    /// The acting player's turn is ending.
    OnTurnEnd,
}

impl TriggerPhase {
    /// The definition trigger this phase matches.
    #[must_use]
    pub fn trigger(&self) -> Trigger {
        match self {
            TriggerPhase::OnPlay { .. } => Trigger::OnPlay,
            TriggerPhase::OnCapture { .. } => Trigger::OnCapture,
            TriggerPhase::OnTurnEnd => Trigger::OnTurnEnd,
        }
    }
}

impl std::fmt::Display for TriggerPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            TriggerPhase::OnPlay { .. } => "onPlay",
            TriggerPhase::OnCapture { .. } => "onCapture",
            TriggerPhase::OnTurnEnd => "onTurnEnd",
        })
    }
}

/// Collect and run every eligible skill for a phase.
///
/// An empty candidate list is a silent no-op. Skill ids with no definition
/// are discarded here (the definition table is authoritative; a card can
/// carry ids the table no longer knows).
pub fn trigger_skills(
    room: &mut Room,
    defs: &DefRegistry,
    acting: &Account,
    phase: &TriggerPhase,
) -> Result<(), PlayError> {
    let candidates = collect_candidates(room, acting, phase)?;

    let mut pending: Vec<(&crate::defs::SkillDef, usize)> = candidates
        .iter()
        .filter_map(|(skill_id, owner_index)| {
            defs.skill(*skill_id)
                .filter(|def| def.trigger == phase.trigger())
                .map(|def| (def, *owner_index))
        })
        .collect();

    if pending.is_empty() {
        debug!("no {phase} skills to resolve");
        return Ok(());
    }

    // Stable: collection order breaks priority ties.
    pending.sort_by_key(|(def, _)| def.priority);

    debug!("resolving {} {phase} skill(s)", pending.len());
    let context = match phase {
        TriggerPhase::OnCapture { context } => Some(context),
        _ => None,
    };
    for (def, owner_index) in pending {
        debug!(
            "skill {} fires from cell {owner_index} (priority {})",
            def.id, def.priority
        );
        apply_effect(room, defs, acting, def, owner_index, context)?;
    }

    Ok(())
}

/// Candidate skill invocations for a phase: `(skill id, owner cell index)`.
///
/// Skill lists are snapshotted before execution, so a skill resolved mid-
/// phase cannot add or remove candidates from the running phase.
fn collect_candidates(
    room: &Room,
    acting: &Account,
    phase: &TriggerPhase,
) -> Result<Vec<(SkillId, usize)>, PlayError> {
    let mut candidates = Vec::new();

    match phase {
        TriggerPhase::OnPlay { placed_index } => {
            let card = room.board.card(*placed_index).ok_or_else(|| {
                PlayError::Internal(format!("onPlay dispatch: cell {placed_index} is empty"))
            })?;
            candidates.extend(card.skills.iter().map(|&id| (id, *placed_index)));
        }

        TriggerPhase::OnCapture { context } => {
            let card = room.board.card(context.capturing_index).ok_or_else(|| {
                PlayError::Internal(format!(
                    "onCapture dispatch: capturing cell {} is empty",
                    context.capturing_index
                ))
            })?;
            candidates.extend(card.skills.iter().map(|&id| (id, context.capturing_index)));
        }

        TriggerPhase::OnTurnEnd => {
            for (index, cell) in room.board.occupied() {
                if cell.owner == *acting {
                    candidates.extend(cell.card.skills.iter().map(|&id| (id, index)));
                }
            }
        }
    }

    Ok(candidates)
}
