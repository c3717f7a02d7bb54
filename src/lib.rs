//! # gridclash
//!
//! Skill and battle resolution for a turn-based card-placement game on a
//! 3x3 grid.
//!
//! ## Design Principles
//!
//! 1. **Data-Driven**: Card templates, skill definitions, and global configs
//!    come from JSON tables; the engine hardcodes no card or skill.
//!
//! 2. **Room-Scoped State**: A `Room` holds everything one match mutates —
//!    hands, board, turn, RNG, event log. The engine entry points are the
//!    only writers.
//!
//! 3. **Deterministic Replay**: Every random draw (first turn, random
//!    targeting, remote-flip picks) goes through the room's seedable RNG.
//!
//! ## Architecture
//!
//! - **Atomic Plays**: A play validates fully up front, resolves against a
//!   working copy of the room, and commits only on success.
//!
//! - **Ordered Dispatch**: Skills run `onPlay` -> capture resolution (with
//!   `onCapture` per capture) -> `onTurnEnd`, sorted by ascending priority
//!   within each phase.
//!
//! ## Modules
//!
//! - `core`: RNG, play errors
//! - `defs`: Card templates, skill definitions, global configs, registry
//! - `board`: 3x3 geometry, directions, cells
//! - `room`: Match state, card instances, events
//! - `store`: Concurrency-safe keyed room storage
//! - `engine`: Entry points and the resolution stages (capture, dispatch,
//!   targets, effects)

pub mod board;
pub mod core;
pub mod defs;
pub mod engine;
pub mod room;
pub mod store;

// Re-export commonly used types
pub use crate::core::{GameRng, PlayError};

pub use crate::defs::{
    CardAttributes, CardDefId, CardTemplate, DefRegistry, EffectKind, GlobalConfig, SkillDef,
    SkillId, SkillType, TargetType, Trigger, DEFAULTS_CONFIG, RANGED_ATTACK,
};

pub use crate::board::{facing, Board, Cell, Direction, BOARD_CELLS};

pub use crate::room::{
    Account, CardInstance, Event, InstanceId, Room, RoomId, StatChanges,
};

pub use crate::store::{RoomHandle, RoomStore};

pub use crate::engine::{
    apply_effect, resolve_captures, resolve_targets, trigger_skills, Capture, CaptureContext,
    Engine, Target, TriggerPhase,
};
