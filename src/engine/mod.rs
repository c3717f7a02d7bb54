//! Play resolution engine.
//!
//! [`Engine`] owns the definition tables and exposes the two entry points
//! that mutate a room: [`Engine::start_match`] deals hands and picks the
//! first turn, [`Engine::place_card`] resolves one play. A play validates
//! fully before touching anything, then resolves against a working copy of
//! the room and commits only on success, so a mid-resolution failure leaves
//! the room exactly as it was.

pub mod capture;
pub mod dispatch;
pub mod effects;
pub mod targets;

pub use capture::{resolve_captures, Capture};
pub use dispatch::{trigger_skills, CaptureContext, TriggerPhase};
pub use effects::apply_effect;
pub use targets::{resolve_targets, Target};

use std::sync::Arc;

use log::{debug, info, warn};

use crate::board::{Cell, BOARD_CELLS};
use crate::core::PlayError;
use crate::defs::{CardDefId, DefRegistry, DEFAULTS_CONFIG};
use crate::room::{Account, CardInstance, Event, InstanceId, Room};

/// The resolution engine: definition tables plus the play entry points.
///
/// Cheap to clone and share; all per-match state lives in the [`Room`].
#[derive(Clone, Debug)]
pub struct Engine {
    defs: Arc<DefRegistry>,
}

impl Engine {
    /// Create an engine over a populated definition registry.
    #[must_use]
    pub fn new(defs: Arc<DefRegistry>) -> Self {
        Self { defs }
    }

    /// The definition tables this engine resolves against.
    #[must_use]
    pub fn defs(&self) -> &DefRegistry {
        &self.defs
    }

    /// Deal both hands and pick the first turn at random.
    ///
    /// Each deck's templates are instantiated into the player's hand; a
    /// deck id with no template is logged and skipped, and an empty deck
    /// falls back to the default deck in global config 1. Both players are
    /// seated if they are not already.
    pub fn start_match(
        &self,
        room: &mut Room,
        player1: (Account, &[CardDefId]),
        player2: (Account, &[CardDefId]),
    ) -> Result<(), PlayError> {
        for (account, _) in [&player1, &player2] {
            if !room.has_player(account) {
                room.add_player(account.clone());
            }
        }
        if !room.is_ready() {
            return Err(PlayError::RoomNotReady);
        }

        for (account, deck) in [player1, player2] {
            let hand = self.deal_hand(room, &account, deck);
            info!("{} dealt {} card(s) in {}", account, hand.len(), room.id);
            room.hands.insert(account, hand);
        }

        let seats = room.players().len();
        let first = room.rng.gen_range_usize(0..seats);
        room.turn = Some(room.players()[first].clone());
        info!("{} starts: {} to move", room.id, room.players()[first]);
        Ok(())
    }

    /// Resolve one play: validate, place, run skills and captures, switch
    /// the turn, and return the play's event log.
    ///
    /// Validation happens before any mutation; resolution happens on a
    /// working copy of the room committed only on success.
    pub fn place_card(
        &self,
        room: &mut Room,
        player: &Account,
        card_id: InstanceId,
        grid_index: usize,
    ) -> Result<Vec<Event>, PlayError> {
        if !room.has_player(player) {
            return Err(PlayError::UnknownPlayer(player.to_string()));
        }
        if room.turn.as_ref() != Some(player) {
            return Err(PlayError::NotYourTurn);
        }
        if grid_index >= BOARD_CELLS {
            return Err(PlayError::InvalidCell(grid_index));
        }
        if room.board.get(grid_index).is_some() {
            return Err(PlayError::CellOccupied(grid_index));
        }
        let hand_index = room
            .hand(player)
            .iter()
            .position(|card| card.id == card_id)
            .ok_or(PlayError::CardNotInHand)?;

        let mut working = room.clone();
        self.resolve_play(&mut working, player, hand_index, grid_index)?;

        working.turn = working.opponent_of(player).cloned();
        let events = working.take_events();
        *room = working;
        Ok(events)
    }

    /// The resolution pipeline, run against an already-validated room.
    fn resolve_play(
        &self,
        room: &mut Room,
        player: &Account,
        hand_index: usize,
        grid_index: usize,
    ) -> Result<(), PlayError> {
        let card = room
            .hands
            .get_mut(player)
            .map(|hand| hand.remove(hand_index))
            .ok_or_else(|| PlayError::Internal(format!("no hand for {player}")))?;
        debug!("{} plays card {:?} at {grid_index}", player, card.id);
        room.board.place(
            grid_index,
            Cell {
                owner: player.clone(),
                card,
            },
        );

        trigger_skills(
            room,
            &self.defs,
            player,
            &TriggerPhase::OnPlay {
                placed_index: grid_index,
            },
        )?;

        let captures = resolve_captures(room, &self.defs, player, grid_index)?;
        for capture in captures {
            trigger_skills(
                room,
                &self.defs,
                player,
                &TriggerPhase::OnCapture {
                    context: CaptureContext {
                        capturing_index: grid_index,
                        captured_index: capture.index,
                        original_owner: capture.original_owner,
                    },
                },
            )?;
        }

        trigger_skills(room, &self.defs, player, &TriggerPhase::OnTurnEnd)?;
        Ok(())
    }

    /// Instantiate a deck into hand cards.
    ///
    /// An empty deck falls back to global config 1's default deck. Deck
    /// entries with no registered template are skipped.
    fn deal_hand(&self, room: &mut Room, account: &Account, deck: &[CardDefId]) -> Vec<CardInstance> {
        let deck: Vec<CardDefId> = if deck.is_empty() {
            let fallback = self
                .defs
                .global(DEFAULTS_CONFIG)
                .map(|config| config.default_deck.clone())
                .unwrap_or_default();
            if fallback.is_empty() {
                warn!("{account} has an empty deck and no default deck is configured");
            }
            fallback
        } else {
            deck.to_vec()
        };

        let mut hand = Vec::with_capacity(deck.len());
        for def_id in deck {
            let Some(template) = self.defs.card(def_id) else {
                warn!("deck of {account} names unregistered card {def_id:?}; skipped");
                continue;
            };
            let id = room.alloc_instance();
            hand.push(CardInstance::from_template(id, template));
        }
        hand
    }
}
