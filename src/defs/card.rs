//! Card templates - static card data.
//!
//! `CardTemplate` holds the immutable properties of a card type: its four
//! directional attack values, whether it participates in adjacency combat,
//! and the skills it is printed with. Instance-specific data (current stats,
//! remaining skills) lives in `CardInstance`.
//!
//! The serialized shape matches the original definition table: an `items`
//! array of `{ id, name, attributes: { up, down, left, right, canAttack,
//! skills } }`, with `canAttack` stored as 0/1.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use smallvec::SmallVec;

use super::skill::SkillId;

/// Unique identifier for a card template.
///
/// This identifies the "type" of card, not a specific instance in a room.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardDefId(pub u32);

impl CardDefId {
    /// Create a new card definition ID.
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

impl std::fmt::Display for CardDefId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CardDef({})", self.0)
    }
}

/// Printed attributes of a card type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardAttributes {
    /// Attack value toward the cell above.
    pub up: i32,
    /// Attack value toward the cell below.
    pub down: i32,
    /// Attack value toward the cell to the left.
    pub left: i32,
    /// Attack value toward the cell to the right.
    pub right: i32,
    /// Whether placing this card evaluates adjacency combat.
    #[serde(
        serialize_with = "flag_to_int",
        deserialize_with = "flag_from_int",
        default
    )]
    pub can_attack: bool,
    /// Skill ids printed on the card, in template order.
    #[serde(default)]
    pub skills: SmallVec<[SkillId; 4]>,
}

/// Static card template.
///
/// ## Example
///
/// ```
/// use gridclash::defs::{CardDefId, CardTemplate};
///
/// let scout = CardTemplate::new(CardDefId::new(10001), "Scout")
///     .with_stats(5, 5, 5, 9)
///     .attacking(true);
///
/// assert_eq!(scout.attributes.right, 9);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardTemplate {
    /// Unique identifier for this template.
    pub id: CardDefId,

    /// Card name (for display/debugging).
    pub name: String,

    /// Printed attributes.
    pub attributes: CardAttributes,
}

impl CardTemplate {
    /// Create a new template with zeroed stats and no skills.
    #[must_use]
    pub fn new(id: CardDefId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            attributes: CardAttributes {
                up: 0,
                down: 0,
                left: 0,
                right: 0,
                can_attack: true,
                skills: SmallVec::new(),
            },
        }
    }

    /// Set the four directional stats (builder pattern).
    #[must_use]
    pub fn with_stats(mut self, up: i32, down: i32, left: i32, right: i32) -> Self {
        self.attributes.up = up;
        self.attributes.down = down;
        self.attributes.left = left;
        self.attributes.right = right;
        self
    }

    /// Append a printed skill (builder pattern).
    #[must_use]
    pub fn with_skill(mut self, skill: SkillId) -> Self {
        self.attributes.skills.push(skill);
        self
    }

    /// Set the adjacency-combat flag (builder pattern).
    #[must_use]
    pub fn attacking(mut self, can_attack: bool) -> Self {
        self.attributes.can_attack = can_attack;
        self
    }
}

fn flag_to_int<S: Serializer>(flag: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u8(u8::from(*flag))
}

/// Accept either a JSON boolean or the original table's 0/1 integer.
fn flag_from_int<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IntOrBool {
        Int(i64),
        Bool(bool),
    }

    Ok(match IntOrBool::deserialize(deserializer)? {
        IntOrBool::Int(n) => n == 1,
        IntOrBool::Bool(b) => b,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_def_id() {
        let id = CardDefId::new(10001);
        assert_eq!(id.raw(), 10001);
        assert_eq!(format!("{}", id), "CardDef(10001)");
    }

    #[test]
    fn test_template_builder() {
        let card = CardTemplate::new(CardDefId::new(1), "Test Card")
            .with_stats(1, 2, 3, 4)
            .with_skill(SkillId::new(30001))
            .attacking(false);

        assert_eq!(card.name, "Test Card");
        assert_eq!(card.attributes.up, 1);
        assert_eq!(card.attributes.right, 4);
        assert_eq!(card.attributes.skills.as_slice(), &[SkillId::new(30001)]);
        assert!(!card.attributes.can_attack);
    }

    #[test]
    fn test_can_attack_from_int() {
        let json = r#"{
            "id": 10001,
            "name": "Scout",
            "attributes": { "up": 5, "down": 5, "left": 5, "right": 9, "canAttack": 1 }
        }"#;

        let card: CardTemplate = serde_json::from_str(json).unwrap();
        assert!(card.attributes.can_attack);
        assert!(card.attributes.skills.is_empty());

        let json_off = json.replace("\"canAttack\": 1", "\"canAttack\": 0");
        let card: CardTemplate = serde_json::from_str(&json_off).unwrap();
        assert!(!card.attributes.can_attack);
    }

    #[test]
    fn test_can_attack_roundtrip() {
        let card = CardTemplate::new(CardDefId::new(2), "Wall")
            .with_stats(9, 9, 9, 9)
            .attacking(true);

        let json = serde_json::to_string(&card).unwrap();
        assert!(json.contains("\"canAttack\":1"));

        let back: CardTemplate = serde_json::from_str(&json).unwrap();
        assert_eq!(card, back);
    }
}
