//! Effect application: the terminal stage of skill resolution.
//!
//! Targets are resolved first (remote flips narrow them further), then each
//! target is mutated in order and a `skill_effect` event records the
//! per-direction delta — except remote flips, which append `card_flipped`
//! instead. Stats are clamped to [0, 20] by buffs and debuffs.

use log::{debug, warn};

use crate::board::{facing, Direction};
use crate::core::PlayError;
use crate::defs::{DefRegistry, EffectKind, SkillDef};
use crate::room::{Account, Event, Room, StatChanges};

use super::dispatch::CaptureContext;
use super::targets::{resolve_targets, Target};

/// Apply one skill's effect to every resolved target.
///
/// `owner_index` is the cell of the card carrying the skill; `context` is
/// present only during `onCapture` dispatch. Unknown effect ids and
/// definition/targeting mismatches skip the affected target with a warning
/// rather than failing the play.
pub fn apply_effect(
    room: &mut Room,
    defs: &DefRegistry,
    acting: &Account,
    def: &SkillDef,
    owner_index: usize,
    context: Option<&CaptureContext>,
) -> Result<(), PlayError> {
    let mut targets = resolve_targets(&room.board, &mut room.rng, acting, def.target_type, owner_index);

    // Remote flips fight at range: keep only targets the owner's facing
    // stat beats, then pick one at random.
    if def.effect == EffectKind::RemoteFlip {
        targets = narrow_remote_flip(room, owner_index, &targets)?;
    }

    let source_id = room
        .board
        .card(owner_index)
        .ok_or_else(|| PlayError::Internal(format!("skill owner cell {owner_index} is empty")))?
        .id;

    for target in targets {
        let (target_id, before) = room
            .board
            .card(target.index)
            .map(|card| (card.id, card.stats()))
            .ok_or_else(|| {
                PlayError::Internal(format!("resolved target cell {} is empty", target.index))
            })?;

        match def.effect {
            EffectKind::Buff | EffectKind::Debuff => {
                let dirs = match effect_directions(def, &target) {
                    Some(dirs) => dirs,
                    None => {
                        warn!(
                            "skill {} wants a directional stat change but target {} has no reach direction; skipped",
                            def.id, target.index
                        );
                        continue;
                    }
                };
                let card = room.board.card_mut(target.index).ok_or_else(|| {
                    PlayError::Internal(format!("target cell {} is empty", target.index))
                })?;
                for dir in dirs {
                    let stat = card.stat_mut(dir);
                    *stat = if def.effect == EffectKind::Buff {
                        (*stat + def.num_1).min(20)
                    } else {
                        (*stat - def.num_1).max(0)
                    };
                }
                debug!("skill {} changed stats of card at {}", def.id, target.index);
            }

            EffectKind::RemoteFlip => {
                let cell = room.board.get_mut(target.index).ok_or_else(|| {
                    PlayError::Internal(format!("target cell {} is empty", target.index))
                })?;
                cell.owner = acting.clone();
                cell.card.strip_adjudicating(defs);
                debug!(
                    "skill {} flipped the card at {} from cell {owner_index}",
                    def.id, target.index
                );
                room.push_event(Event::CardFlipped {
                    skill_id: def.id,
                    source_card_id: source_id,
                    target_card_id: target_id,
                    new_owner: acting.clone(),
                });
                // A flip is not a stat change; no skill_effect event.
                continue;
            }

            EffectKind::Drain => {
                let Some(context) = context else {
                    warn!("drain skill {} fired outside a capture; skipped", def.id);
                    continue;
                };
                drain(room, def, owner_index, context)?;
            }

            EffectKind::Unknown(id) => {
                warn!("skill {} has unknown effect id {id}; skipped", def.id);
                continue;
            }
        }

        let after = room
            .board
            .card(target.index)
            .ok_or_else(|| {
                PlayError::Internal(format!("target cell {} is empty", target.index))
            })?
            .stats();
        room.push_event(Event::SkillEffect {
            skill_id: def.id,
            source_card_id: source_id,
            target_card_id: target_id,
            changes: StatChanges::delta(&after, &before),
        });
    }

    Ok(())
}

/// The directions a buff/debuff touches on one target.
///
/// `num_2` of 0 or 4 means all four; anything else means only the target's
/// face pointed back at the source, which requires an adjacency-derived
/// direction.
fn effect_directions(def: &SkillDef, target: &Target) -> Option<Vec<Direction>> {
    if def.num_2 == 0 || def.num_2 == 4 {
        Some(Direction::ALL.to_vec())
    } else {
        target.direction.map(|dir| vec![dir.opposite()])
    }
}

/// Keep only remote-flip targets the owner's facing stat strictly beats,
/// then pick one uniformly at random.
fn narrow_remote_flip(
    room: &mut Room,
    owner_index: usize,
    targets: &[Target],
) -> Result<Vec<Target>, PlayError> {
    let owner = room
        .board
        .card(owner_index)
        .ok_or_else(|| PlayError::Internal(format!("skill owner cell {owner_index} is empty")))?;
    let owner_stats = owner.stats();

    let beatable: Vec<Target> = targets
        .iter()
        .filter(|target| {
            let Some(dir) = facing(owner_index, target.index) else {
                return false;
            };
            let Some(card) = room.board.card(target.index) else {
                return false;
            };
            let attack = match dir {
                Direction::Up => owner_stats.up,
                Direction::Down => owner_stats.down,
                Direction::Left => owner_stats.left,
                Direction::Right => owner_stats.right,
            };
            attack > card.stat(dir.opposite())
        })
        .copied()
        .collect();

    Ok(room.rng.choose(&beatable).map(|t| vec![*t]).unwrap_or_default())
}

/// Move up to `num_1` points from the captured card's highest direction to
/// the owner card's lowest direction. No-op when the highest is already 0.
fn drain(
    room: &mut Room,
    def: &SkillDef,
    owner_index: usize,
    context: &CaptureContext,
) -> Result<(), PlayError> {
    let captured = room.board.card(context.captured_index).ok_or_else(|| {
        PlayError::Internal(format!("captured cell {} is empty", context.captured_index))
    })?;
    let high = captured.highest_dir();
    let high_value = captured.stat(high);
    if high_value <= 0 {
        return Ok(());
    }

    let owner = room
        .board
        .card(owner_index)
        .ok_or_else(|| PlayError::Internal(format!("skill owner cell {owner_index} is empty")))?;
    let low = owner.lowest_dir();

    let steal = high_value.min(def.num_1);
    if let Some(card) = room.board.card_mut(context.captured_index) {
        *card.stat_mut(high) -= steal;
    }
    if let Some(card) = room.board.card_mut(owner_index) {
        *card.stat_mut(low) += steal;
    }
    debug!(
        "skill {} drained {steal} from cell {} into cell {owner_index}",
        def.id, context.captured_index
    );
    Ok(())
}
