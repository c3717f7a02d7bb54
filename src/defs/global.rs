//! Global configuration entries.
//!
//! The original definition tables carry a `globals` array whose entry 1
//! holds the default card pool and default deck handed to new accounts.
//! The engine consumes these when a player reaches match start without a
//! usable deck.

use serde::{Deserialize, Serialize};

use super::card::CardDefId;

/// One global configuration entry, keyed by integer id.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalConfig {
    /// Configuration id; entry 1 holds new-account defaults.
    pub id: u32,

    /// Card templates every new account owns.
    #[serde(default)]
    pub default_cards: Vec<CardDefId>,

    /// The deck a new account fields before customizing.
    #[serde(default)]
    pub default_deck: Vec<CardDefId>,
}

/// The config id carrying new-account defaults.
pub const DEFAULTS_CONFIG: u32 = 1;
