//! Skill definitions - static skill data.
//!
//! A `SkillDef` describes one skill: when it fires ([`Trigger`]), what it
//! aims at ([`TargetType`]), what it does ([`EffectKind`]), and its numeric
//! parameters. Definitions are immutable at play time; cards reference them
//! by [`SkillId`].
//!
//! Unknown values are forward-compatible rather than fatal: an unrecognized
//! trigger never matches a phase, an unrecognized target type resolves to no
//! targets, and an unrecognized effect id is skipped with a warning.

use serde::{Deserialize, Serialize};

/// Unique identifier for a skill definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SkillId(pub u32);

impl SkillId {
    /// Create a new skill ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for SkillId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Skill({})", self.0)
    }
}

/// Sentinel skill id: a card carrying it bypasses adjacency combat entirely
/// and relies on its own skills to capture.
pub const RANGED_ATTACK: SkillId = SkillId(30003);

/// The phase at which a skill fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Trigger {
    /// When the card is placed on the board.
    OnPlay,
    /// Once per neighbor the card captures by adjacency combat.
    OnCapture,
    /// At the end of the acting player's turn, for every card they own.
    OnTurnEnd,
    /// A trigger this engine does not know; never matches any phase.
    #[serde(other)]
    Unknown,
}

/// The rule selecting which board positions a skill affects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetType {
    /// The skill owner's own cell.
    #[serde(rename = "self")]
    Self_,
    /// Occupied neighbors owned by the acting player.
    AdjacentAllies,
    /// Occupied neighbors owned by the opponent.
    AdjacentEnemies,
    /// One uniformly random opponent-owned cell anywhere on the board.
    RandomEnemyOnBoard,
    /// Every opponent-owned cell, in board order.
    AllEnemiesOnBoard,
    /// A target type this engine does not know; resolves to no targets.
    #[serde(other)]
    Unknown,
}

/// What a skill does to its targets.
///
/// Stored in the definition tables as a numeric `effectId`; ids outside the
/// known range are preserved so they can be logged when skipped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub enum EffectKind {
    /// Raise target stats by `num_1`, ceiling 20.
    Buff,
    /// Lower target stats by `num_1`, floor 0.
    Debuff,
    /// Flip one beatable target anywhere on the board.
    RemoteFlip,
    /// Move stat points from a just-captured card to the skill owner.
    Drain,
    /// An effect id this engine does not know.
    Unknown(u32),
}

impl From<u32> for EffectKind {
    fn from(id: u32) -> Self {
        match id {
            1 => EffectKind::Buff,
            2 => EffectKind::Debuff,
            3 => EffectKind::RemoteFlip,
            4 => EffectKind::Drain,
            other => EffectKind::Unknown(other),
        }
    }
}

impl From<EffectKind> for u32 {
    fn from(kind: EffectKind) -> Self {
        match kind {
            EffectKind::Buff => 1,
            EffectKind::Debuff => 2,
            EffectKind::RemoteFlip => 3,
            EffectKind::Drain => 4,
            EffectKind::Unknown(other) => other,
        }
    }
}

/// Marker classifying a skill beyond its effect.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillType {
    /// Stripped from a card the moment that card is captured.
    Adjudicating,
    /// Any other classification; survives capture.
    #[serde(other)]
    #[default]
    Other,
}

/// Static skill definition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillDef {
    /// Unique identifier for this skill.
    pub id: SkillId,

    /// Skill name (for display/debugging).
    #[serde(default)]
    pub name: String,

    /// Phase at which this skill fires.
    pub trigger: Trigger,

    /// Targeting rule.
    pub target_type: TargetType,

    /// Effect applied to each resolved target.
    #[serde(rename = "effectId")]
    pub effect: EffectKind,

    /// Resolution order within a phase; lower resolves first.
    #[serde(default)]
    pub priority: i32,

    /// Classification marker (`adjudicating` skills are stripped on capture).
    #[serde(default)]
    pub skill_type: SkillType,

    /// First numeric parameter (buff/debuff amount, drain cap).
    #[serde(default, rename = "num_1")]
    pub num_1: i32,

    /// Second numeric parameter (0 or 4 = all directions for buff/debuff).
    #[serde(default, rename = "num_2")]
    pub num_2: i32,
}

impl SkillDef {
    /// Create a new definition with priority 0 and zeroed parameters.
    #[must_use]
    pub fn new(id: SkillId, trigger: Trigger, target_type: TargetType, effect: EffectKind) -> Self {
        Self {
            id,
            name: String::new(),
            trigger,
            target_type,
            effect,
            priority: 0,
            skill_type: SkillType::Other,
            num_1: 0,
            num_2: 0,
        }
    }

    /// Set the resolution priority (builder pattern).
    #[must_use]
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Set the numeric parameters (builder pattern).
    #[must_use]
    pub fn with_nums(mut self, num_1: i32, num_2: i32) -> Self {
        self.num_1 = num_1;
        self.num_2 = num_2;
        self
    }

    /// Mark the skill as adjudicating (builder pattern).
    #[must_use]
    pub fn adjudicating(mut self) -> Self {
        self.skill_type = SkillType::Adjudicating;
        self
    }

    /// Whether this skill is stripped from its card on capture.
    #[must_use]
    pub fn is_adjudicating(&self) -> bool {
        self.skill_type == SkillType::Adjudicating
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trigger_wire_names() {
        assert_eq!(
            serde_json::from_str::<Trigger>("\"onPlay\"").unwrap(),
            Trigger::OnPlay
        );
        assert_eq!(
            serde_json::from_str::<Trigger>("\"onTurnEnd\"").unwrap(),
            Trigger::OnTurnEnd
        );
        assert_eq!(
            serde_json::from_str::<Trigger>("\"onDiscard\"").unwrap(),
            Trigger::Unknown
        );
    }

    #[test]
    fn test_target_type_wire_names() {
        assert_eq!(
            serde_json::from_str::<TargetType>("\"self\"").unwrap(),
            TargetType::Self_
        );
        assert_eq!(
            serde_json::from_str::<TargetType>("\"adjacent_enemies\"").unwrap(),
            TargetType::AdjacentEnemies
        );
        assert_eq!(
            serde_json::from_str::<TargetType>("\"random_ally_hand\"").unwrap(),
            TargetType::Unknown
        );
    }

    #[test]
    fn test_effect_kind_from_id() {
        assert_eq!(EffectKind::from(1), EffectKind::Buff);
        assert_eq!(EffectKind::from(4), EffectKind::Drain);
        assert_eq!(EffectKind::from(9), EffectKind::Unknown(9));
        assert_eq!(u32::from(EffectKind::RemoteFlip), 3);
    }

    #[test]
    fn test_skill_def_from_table_json() {
        let json = r#"{
            "id": 30001,
            "name": "Rally",
            "trigger": "onPlay",
            "targetType": "adjacent_allies",
            "effectId": 1,
            "priority": 2,
            "skillType": "adjudicating",
            "num_1": 2,
            "num_2": 0
        }"#;

        let def: SkillDef = serde_json::from_str(json).unwrap();
        assert_eq!(def.id, SkillId::new(30001));
        assert_eq!(def.trigger, Trigger::OnPlay);
        assert_eq!(def.target_type, TargetType::AdjacentAllies);
        assert_eq!(def.effect, EffectKind::Buff);
        assert_eq!(def.priority, 2);
        assert!(def.is_adjudicating());
        assert_eq!((def.num_1, def.num_2), (2, 0));
    }

    #[test]
    fn test_skill_type_defaults_to_other() {
        let json = r#"{
            "id": 30002,
            "trigger": "onCapture",
            "targetType": "self",
            "effectId": 4
        }"#;

        let def: SkillDef = serde_json::from_str(json).unwrap();
        assert!(!def.is_adjudicating());
        assert_eq!(def.priority, 0);
    }

    #[test]
    fn test_builder() {
        let def = SkillDef::new(
            SkillId::new(1),
            Trigger::OnTurnEnd,
            TargetType::RandomEnemyOnBoard,
            EffectKind::Debuff,
        )
        .with_priority(5)
        .with_nums(3, 4)
        .adjudicating();

        assert_eq!(def.priority, 5);
        assert_eq!(def.num_1, 3);
        assert!(def.is_adjudicating());
    }
}
