//! Room state: players, hands, board, turn pointer, per-play event log.
//!
//! A `Room` is the unit of mutation: the engine's entry points are the only
//! code that writes to it, one play at a time. The event log collects what a
//! play's skills did and is handed back (and cleared) when the play
//! resolves.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::board::{Board, Direction};
use crate::core::GameRng;
use crate::defs::{CardDefId, CardTemplate, DefRegistry, SkillId};

/// A player identity: the account name.
///
/// Cells store a copy of this, never a reference into the player list.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Account(String);

impl Account {
    /// Create an account identity.
    #[must_use]
    pub fn new(account: impl Into<String>) -> Self {
        Self(account.into())
    }

    /// The account name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unique identifier for a room.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoomId(pub u64);

impl std::fmt::Display for RoomId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Room({})", self.0)
    }
}

/// Unique identifier for a card instance within a room.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InstanceId(pub u64);

/// A card in play or in hand.
///
/// Created when a hand is dealt, destroyed only with the room. Stats start
/// at template values (unclamped) and are clamped to [0, 20] by effects.
/// The skill list can shrink (adjudicating skills are stripped on capture)
/// but never grows.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardInstance {
    /// Unique per instance within a room.
    pub id: InstanceId,
    /// The template this instance was dealt from.
    pub def_id: CardDefId,
    /// Attack value toward the cell above.
    pub up: i32,
    /// Attack value toward the cell below.
    pub down: i32,
    /// Attack value toward the cell to the left.
    pub left: i32,
    /// Attack value toward the cell to the right.
    pub right: i32,
    /// Whether this card evaluates adjacency combat when placed.
    pub can_attack: bool,
    /// Remaining skills, in template order.
    pub skills: SmallVec<[SkillId; 4]>,
}

impl CardInstance {
    /// Instantiate a template.
    #[must_use]
    pub fn from_template(id: InstanceId, template: &CardTemplate) -> Self {
        let attrs = &template.attributes;
        Self {
            id,
            def_id: template.id,
            up: attrs.up,
            down: attrs.down,
            left: attrs.left,
            right: attrs.right,
            can_attack: attrs.can_attack,
            skills: attrs.skills.clone(),
        }
    }

    /// Build an instance directly from stats (`[up, down, left, right]`).
    #[must_use]
    pub fn with_stats(id: InstanceId, def_id: CardDefId, stats: [i32; 4], can_attack: bool) -> Self {
        Self {
            id,
            def_id,
            up: stats[0],
            down: stats[1],
            left: stats[2],
            right: stats[3],
            can_attack,
            skills: SmallVec::new(),
        }
    }

    /// The stat facing a direction.
    #[must_use]
    pub fn stat(&self, dir: Direction) -> i32 {
        match dir {
            Direction::Up => self.up,
            Direction::Down => self.down,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    /// Mutable access to the stat facing a direction.
    pub fn stat_mut(&mut self, dir: Direction) -> &mut i32 {
        match dir {
            Direction::Up => &mut self.up,
            Direction::Down => &mut self.down,
            Direction::Left => &mut self.left,
            Direction::Right => &mut self.right,
        }
    }

    /// Snapshot of all four stats, for computing effect deltas.
    #[must_use]
    pub fn stats(&self) -> StatChanges {
        StatChanges {
            up: self.up,
            down: self.down,
            left: self.left,
            right: self.right,
        }
    }

    /// The direction with the highest stat (scan-order tiebreak).
    #[must_use]
    pub fn highest_dir(&self) -> Direction {
        let mut best = Direction::Up;
        for dir in Direction::ALL {
            if self.stat(dir) > self.stat(best) {
                best = dir;
            }
        }
        best
    }

    /// The direction with the lowest stat (scan-order tiebreak).
    #[must_use]
    pub fn lowest_dir(&self) -> Direction {
        let mut worst = Direction::Up;
        for dir in Direction::ALL {
            if self.stat(dir) < self.stat(worst) {
                worst = dir;
            }
        }
        worst
    }

    /// Whether the card still carries a skill.
    #[must_use]
    pub fn has_skill(&self, id: SkillId) -> bool {
        self.skills.contains(&id)
    }

    /// Remove every skill whose definition is marked adjudicating.
    ///
    /// Skills with no definition are kept, not stripped. Returns how many
    /// were removed. Called when this card is captured, by adjacency combat
    /// or by a remote flip.
    pub fn strip_adjudicating(&mut self, defs: &DefRegistry) -> usize {
        let before = self.skills.len();
        self.skills
            .retain(|id| defs.skill(*id).map_or(true, |def| !def.is_adjudicating()));
        before - self.skills.len()
    }
}

/// Per-direction stat delta (or snapshot) of a card.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatChanges {
    pub up: i32,
    pub down: i32,
    pub left: i32,
    pub right: i32,
}

impl StatChanges {
    /// Per-direction difference `after - before`.
    #[must_use]
    pub fn delta(after: &StatChanges, before: &StatChanges) -> Self {
        Self {
            up: after.up - before.up,
            down: after.down - before.down,
            left: after.left - before.left,
            right: after.right - before.right,
        }
    }

    /// Whether every direction is unchanged.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

/// One record in a room's per-play event log.
///
/// Serialized with the original wire names (`card_flipped`, `skill_effect`,
/// camelCase fields) so existing clients can consume it unchanged.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// A skill flipped a card's ownership (remote flip).
    #[serde(rename = "card_flipped")]
    #[serde(rename_all = "camelCase")]
    CardFlipped {
        skill_id: SkillId,
        source_card_id: InstanceId,
        target_card_id: InstanceId,
        new_owner: Account,
    },

    /// A skill changed a card's stats; deltas recorded for all four
    /// directions, zeros included.
    #[serde(rename = "skill_effect")]
    #[serde(rename_all = "camelCase")]
    SkillEffect {
        skill_id: SkillId,
        source_card_id: InstanceId,
        target_card_id: InstanceId,
        changes: StatChanges,
    },
}

/// One match's worth of mutable state.
///
/// Owned by the room store for the match lifetime; mutated only through the
/// engine entry points. The RNG is part of the room so a seeded room replays
/// deterministically.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    /// Room identifier.
    pub id: RoomId,

    /// Seated players, in join order. At most two.
    players: Vec<Account>,

    /// Each player's hand, dealt at match start.
    pub hands: FxHashMap<Account, Vec<CardInstance>>,

    /// The 3x3 grid.
    pub board: Board,

    /// Account of the player to move; `None` until the match starts.
    pub turn: Option<Account>,

    /// Events of the play being resolved; cleared when the play returns.
    events: Vec<Event>,

    #[serde(skip)]
    pub(crate) rng: GameRng,

    #[serde(skip)]
    next_instance: u64,
}

impl Room {
    /// Create an empty room with a seeded RNG.
    #[must_use]
    pub fn new(id: RoomId, seed: u64) -> Self {
        Self {
            id,
            players: Vec::with_capacity(2),
            hands: FxHashMap::default(),
            board: Board::new(),
            turn: None,
            events: Vec::new(),
            rng: GameRng::new(seed),
            next_instance: 0,
        }
    }

    /// Seated players, in join order.
    #[must_use]
    pub fn players(&self) -> &[Account] {
        &self.players
    }

    /// Seat a player. Returns false if the room is full or the account is
    /// already seated.
    pub fn add_player(&mut self, account: Account) -> bool {
        if self.players.len() >= 2 || self.players.contains(&account) {
            return false;
        }
        self.players.push(account);
        true
    }

    /// Whether both seats are taken.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.players.len() == 2
    }

    /// Whether an account is seated here.
    #[must_use]
    pub fn has_player(&self, account: &Account) -> bool {
        self.players.contains(account)
    }

    /// The other seated player.
    #[must_use]
    pub fn opponent_of(&self, account: &Account) -> Option<&Account> {
        self.players.iter().find(|p| *p != account)
    }

    /// A player's hand; empty if none dealt.
    #[must_use]
    pub fn hand(&self, account: &Account) -> &[CardInstance] {
        self.hands.get(account).map_or(&[], Vec::as_slice)
    }

    /// Allocate a fresh card instance id.
    pub(crate) fn alloc_instance(&mut self) -> InstanceId {
        let id = InstanceId(self.next_instance);
        self.next_instance += 1;
        id
    }

    /// Append an event to the per-play log.
    pub(crate) fn push_event(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Events accumulated by the play being resolved.
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Drain the per-play event log.
    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defs::{EffectKind, SkillDef, TargetType, Trigger};

    fn template() -> CardTemplate {
        CardTemplate::new(CardDefId::new(7), "Test")
            .with_stats(1, 2, 3, 4)
            .with_skill(SkillId::new(100))
            .with_skill(SkillId::new(200))
    }

    #[test]
    fn test_instance_from_template() {
        let card = CardInstance::from_template(InstanceId(0), &template());

        assert_eq!(card.def_id, CardDefId::new(7));
        assert_eq!(card.stat(Direction::Up), 1);
        assert_eq!(card.stat(Direction::Right), 4);
        assert!(card.can_attack);
        assert_eq!(card.skills.len(), 2);
    }

    #[test]
    fn test_highest_and_lowest_dir() {
        let card = CardInstance::with_stats(InstanceId(0), CardDefId::new(1), [3, 8, 8, 1], true);
        // Ties resolve in up/down/left/right scan order.
        assert_eq!(card.highest_dir(), Direction::Down);
        assert_eq!(card.lowest_dir(), Direction::Right);
    }

    #[test]
    fn test_strip_adjudicating_keeps_unknown_ids() {
        let mut defs = DefRegistry::new();
        defs.register_skill(
            SkillDef::new(
                SkillId::new(100),
                Trigger::OnPlay,
                TargetType::Self_,
                EffectKind::Buff,
            )
            .adjudicating(),
        );
        // SkillId(200) has no definition.

        let mut card = CardInstance::from_template(InstanceId(0), &template());
        let removed = card.strip_adjudicating(&defs);

        assert_eq!(removed, 1);
        assert!(!card.has_skill(SkillId::new(100)));
        assert!(card.has_skill(SkillId::new(200)));
    }

    #[test]
    fn test_stat_changes_delta() {
        let before = StatChanges { up: 5, down: 5, left: 5, right: 5 };
        let after = StatChanges { up: 7, down: 5, left: 3, right: 5 };

        let delta = StatChanges::delta(&after, &before);
        assert_eq!(delta, StatChanges { up: 2, down: 0, left: -2, right: 0 });
        assert!(!delta.is_zero());
        assert!(StatChanges::delta(&before, &before).is_zero());
    }

    #[test]
    fn test_room_seating() {
        let mut room = Room::new(RoomId(1), 42);
        let alice = Account::new("alice");
        let bob = Account::new("bob");

        assert!(room.add_player(alice.clone()));
        assert!(!room.is_ready());
        assert!(!room.add_player(alice.clone()));
        assert!(room.add_player(bob.clone()));
        assert!(room.is_ready());
        assert!(!room.add_player(Account::new("carol")));

        assert_eq!(room.opponent_of(&alice), Some(&bob));
        assert_eq!(room.opponent_of(&bob), Some(&alice));
    }

    #[test]
    fn test_room_event_log_drains() {
        let mut room = Room::new(RoomId(1), 42);
        room.push_event(Event::CardFlipped {
            skill_id: SkillId::new(1),
            source_card_id: InstanceId(0),
            target_card_id: InstanceId(1),
            new_owner: Account::new("alice"),
        });

        assert_eq!(room.events().len(), 1);
        let events = room.take_events();
        assert_eq!(events.len(), 1);
        assert!(room.events().is_empty());
    }

    #[test]
    fn test_event_wire_shape() {
        let event = Event::SkillEffect {
            skill_id: SkillId::new(30001),
            source_card_id: InstanceId(3),
            target_card_id: InstanceId(5),
            changes: StatChanges { up: 2, down: 0, left: 0, right: 0 },
        };

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "skill_effect");
        assert_eq!(json["skillId"], 30001);
        assert_eq!(json["sourceCardId"], 3);
        assert_eq!(json["targetCardId"], 5);
        assert_eq!(json["changes"]["up"], 2);
        assert_eq!(json["changes"]["down"], 0);

        let flip = Event::CardFlipped {
            skill_id: SkillId::new(30003),
            source_card_id: InstanceId(3),
            target_card_id: InstanceId(5),
            new_owner: Account::new("alice"),
        };
        let json = serde_json::to_value(&flip).unwrap();
        assert_eq!(json["type"], "card_flipped");
        assert_eq!(json["newOwner"], "alice");
    }

    #[test]
    fn test_instance_ids_unique() {
        let mut room = Room::new(RoomId(1), 42);
        let a = room.alloc_instance();
        let b = room.alloc_instance();
        assert_ne!(a, b);
    }
}
