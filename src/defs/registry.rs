//! Definition registry for lookup at play time.
//!
//! `DefRegistry` stores the card templates, skill definitions, and global
//! configs the engine looks up by id. It is populated once at startup —
//! either programmatically or from the original JSON definition tables —
//! and is read-only afterwards.

use rustc_hash::FxHashMap;
use serde::Deserialize;

use super::card::{CardDefId, CardTemplate};
use super::global::GlobalConfig;
use super::skill::{SkillDef, SkillId};

/// Registry of all static definitions.
///
/// ## Example
///
/// ```
/// use gridclash::defs::{CardDefId, CardTemplate, DefRegistry};
///
/// let mut defs = DefRegistry::new();
/// defs.register_card(CardTemplate::new(CardDefId::new(1), "Scout").with_stats(5, 5, 5, 9));
///
/// assert_eq!(defs.card(CardDefId::new(1)).unwrap().name, "Scout");
/// assert!(defs.card(CardDefId::new(99)).is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct DefRegistry {
    cards: FxHashMap<CardDefId, CardTemplate>,
    skills: FxHashMap<SkillId, SkillDef>,
    globals: FxHashMap<u32, GlobalConfig>,
}

#[derive(Deserialize)]
struct ItemsFile {
    items: Vec<CardTemplate>,
}

#[derive(Deserialize)]
struct SkillsFile {
    skills: Vec<SkillDef>,
}

#[derive(Deserialize)]
struct GlobalsFile {
    globals: Vec<GlobalConfig>,
}

impl DefRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // === Registration ===

    /// Register a card template.
    ///
    /// Panics if a template with the same ID already exists.
    pub fn register_card(&mut self, card: CardTemplate) {
        if self.cards.contains_key(&card.id) {
            panic!("Card template {:?} already registered", card.id);
        }
        self.cards.insert(card.id, card);
    }

    /// Register a skill definition.
    ///
    /// Panics if a definition with the same ID already exists.
    pub fn register_skill(&mut self, skill: SkillDef) {
        if self.skills.contains_key(&skill.id) {
            panic!("Skill definition {:?} already registered", skill.id);
        }
        self.skills.insert(skill.id, skill);
    }

    /// Register a global config entry.
    ///
    /// Panics if an entry with the same ID already exists.
    pub fn register_global(&mut self, global: GlobalConfig) {
        if self.globals.contains_key(&global.id) {
            panic!("Global config {} already registered", global.id);
        }
        self.globals.insert(global.id, global);
    }

    // === JSON tables ===

    /// Load card templates from an `{ "items": [...] }` table.
    pub fn load_cards_json(&mut self, json: &str) -> Result<usize, serde_json::Error> {
        let file: ItemsFile = serde_json::from_str(json)?;
        let count = file.items.len();
        for card in file.items {
            self.register_card(card);
        }
        Ok(count)
    }

    /// Load skill definitions from a `{ "skills": [...] }` table.
    pub fn load_skills_json(&mut self, json: &str) -> Result<usize, serde_json::Error> {
        let file: SkillsFile = serde_json::from_str(json)?;
        let count = file.skills.len();
        for skill in file.skills {
            self.register_skill(skill);
        }
        Ok(count)
    }

    /// Load global configs from a `{ "globals": [...] }` table.
    pub fn load_globals_json(&mut self, json: &str) -> Result<usize, serde_json::Error> {
        let file: GlobalsFile = serde_json::from_str(json)?;
        let count = file.globals.len();
        for global in file.globals {
            self.register_global(global);
        }
        Ok(count)
    }

    // === Lookup ===

    /// Get a card template by ID.
    #[must_use]
    pub fn card(&self, id: CardDefId) -> Option<&CardTemplate> {
        self.cards.get(&id)
    }

    /// Get a skill definition by ID.
    #[must_use]
    pub fn skill(&self, id: SkillId) -> Option<&SkillDef> {
        self.skills.get(&id)
    }

    /// Get a global config entry by ID.
    #[must_use]
    pub fn global(&self, id: u32) -> Option<&GlobalConfig> {
        self.globals.get(&id)
    }

    /// Number of registered card templates.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    /// Number of registered skill definitions.
    #[must_use]
    pub fn skill_count(&self) -> usize {
        self.skills.len()
    }

    /// Iterate over all card templates.
    pub fn iter_cards(&self) -> impl Iterator<Item = &CardTemplate> {
        self.cards.values()
    }

    /// Iterate over all skill definitions.
    pub fn iter_skills(&self) -> impl Iterator<Item = &SkillDef> {
        self.skills.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defs::skill::{EffectKind, TargetType, Trigger};

    #[test]
    fn test_register_and_get() {
        let mut defs = DefRegistry::new();
        defs.register_card(CardTemplate::new(CardDefId::new(1), "A"));
        defs.register_skill(SkillDef::new(
            SkillId::new(30001),
            Trigger::OnPlay,
            TargetType::AdjacentAllies,
            EffectKind::Buff,
        ));

        assert!(defs.card(CardDefId::new(1)).is_some());
        assert!(defs.card(CardDefId::new(2)).is_none());
        assert!(defs.skill(SkillId::new(30001)).is_some());
        assert!(defs.skill(SkillId::new(30002)).is_none());
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn test_duplicate_card_panics() {
        let mut defs = DefRegistry::new();
        defs.register_card(CardTemplate::new(CardDefId::new(1), "A"));
        defs.register_card(CardTemplate::new(CardDefId::new(1), "B"));
    }

    #[test]
    fn test_load_tables() {
        let mut defs = DefRegistry::new();

        let items = r#"{ "items": [
            { "id": 10001, "name": "Scout",
              "attributes": { "up": 5, "down": 5, "left": 5, "right": 9, "canAttack": 1,
                              "skills": [30001] } },
            { "id": 10002, "name": "Wall",
              "attributes": { "up": 8, "down": 8, "left": 8, "right": 8, "canAttack": 0 } }
        ] }"#;
        let skills = r#"{ "skills": [
            { "id": 30001, "name": "Rally", "trigger": "onPlay",
              "targetType": "adjacent_allies", "effectId": 1, "priority": 1,
              "skillType": "adjudicating", "num_1": 2, "num_2": 0 }
        ] }"#;
        let globals = r#"{ "globals": [
            { "id": 1, "defaultCards": [10001, 10002], "defaultDeck": [10001] }
        ] }"#;

        assert_eq!(defs.load_cards_json(items).unwrap(), 2);
        assert_eq!(defs.load_skills_json(skills).unwrap(), 1);
        assert_eq!(defs.load_globals_json(globals).unwrap(), 1);

        let scout = defs.card(CardDefId::new(10001)).unwrap();
        assert_eq!(scout.attributes.skills.as_slice(), &[SkillId::new(30001)]);
        assert!(!defs.card(CardDefId::new(10002)).unwrap().attributes.can_attack);
        assert!(defs.skill(SkillId::new(30001)).unwrap().is_adjudicating());
        assert_eq!(defs.global(1).unwrap().default_deck, vec![CardDefId::new(10001)]);
    }

    #[test]
    fn test_bad_json_is_an_error() {
        let mut defs = DefRegistry::new();
        assert!(defs.load_cards_json("{ not json").is_err());
        assert_eq!(defs.card_count(), 0);
    }
}
