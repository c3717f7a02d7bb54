//! Static definition tables: card templates, skill definitions, globals.
//!
//! Everything here is read-only at play time; the engine only looks entries
//! up by id. Unknown ids are handled where they are used (logged and
//! skipped), never here.

mod card;
mod global;
mod registry;
mod skill;

pub use card::{CardAttributes, CardDefId, CardTemplate};
pub use global::{GlobalConfig, DEFAULTS_CONFIG};
pub use registry::DefRegistry;
pub use skill::{EffectKind, SkillDef, SkillId, SkillType, TargetType, Trigger, RANGED_ATTACK};
