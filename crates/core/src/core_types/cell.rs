//! Cell states of the fire automaton and the transition table between them.
//!
//! The chain is strictly linear and one-directional:
//!
//! ```text
//! Tree -> Burning -> Ember(n) -> Ember(n-1) -> ... -> Ember(1) -> Burned
//! ```
//!
//! `Empty` and `Burned` are absorbing. With zero ember stages a burning cell
//! goes straight to `Burned`.

use serde::{Deserialize, Serialize};

/// Highest supported number of ember stages.
///
/// Keeps every state representable by the `u8` wire code (`3 + k` for
/// `Ember(k)`).
pub const MAX_EMBER_STAGES: u8 = 250;

/// Condition of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CellState {
    /// Inert ground, never burns
    #[default]
    Empty,
    /// Flammable, burns exactly once
    Tree,
    /// On fire; ignites 4-connected trees on the next tick
    Burning,
    /// Cooling stage, numbered from hottest (`ember_stages`) down to 1
    Ember(u8),
    /// Terminal
    Burned,
}

impl CellState {
    /// Ignition edge of the chain. Only a `Tree` can catch fire.
    #[must_use]
    pub const fn ignite(self) -> Option<Self> {
        match self {
            Self::Tree => Some(Self::Burning),
            Self::Empty | Self::Burning | Self::Ember(_) | Self::Burned => None,
        }
    }

    /// Aging edge of the chain: the state this cell holds one tick later,
    /// ignoring neighbours.
    ///
    /// Adding or removing ember stages only changes `ember_stages`; the table
    /// itself stays the same.
    #[must_use]
    pub const fn advance(self, ember_stages: u8) -> Self {
        match self {
            Self::Empty => Self::Empty,
            Self::Tree => Self::Tree,
            Self::Burning if ember_stages == 0 => Self::Burned,
            Self::Burning => Self::Ember(ember_stages),
            Self::Ember(stage) if stage > 1 => Self::Ember(stage - 1),
            Self::Ember(_) | Self::Burned => Self::Burned,
        }
    }

    /// Position in the transition chain. Never decreases for a given cell.
    ///
    /// `Empty` sits outside the chain and ranks 0.
    #[must_use]
    pub fn chain_rank(self, ember_stages: u8) -> u16 {
        match self {
            Self::Empty => 0,
            Self::Tree => 1,
            Self::Burning => 2,
            Self::Ember(stage) => 3 + u16::from(ember_stages).saturating_sub(u16::from(stage)),
            Self::Burned => 3 + u16::from(ember_stages),
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_tree(self) -> bool {
        matches!(self, Self::Tree)
    }

    #[inline]
    #[must_use]
    pub const fn is_burning(self) -> bool {
        matches!(self, Self::Burning)
    }

    #[inline]
    #[must_use]
    pub const fn is_ember(self) -> bool {
        matches!(self, Self::Ember(_))
    }

    /// Cell is burning or cooling and still owned by a frontier.
    #[inline]
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Burning | Self::Ember(_))
    }

    /// Cell caught fire at some point (`Burning`, any `Ember`, or `Burned`).
    #[inline]
    #[must_use]
    pub const fn was_ignited(self) -> bool {
        matches!(self, Self::Burning | Self::Ember(_) | Self::Burned)
    }

    /// Compact code handed to hosts and visualizers.
    ///
    /// `Empty=0`, `Tree=1`, `Burning=2`, `Burned=3`, `Ember(k)=3+k`.
    #[must_use]
    pub const fn to_code(self) -> u8 {
        match self {
            Self::Empty => 0,
            Self::Tree => 1,
            Self::Burning => 2,
            Self::Burned => 3,
            Self::Ember(stage) => 3u8.saturating_add(stage),
        }
    }

    /// Inverse of [`CellState::to_code`].
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Empty),
            1 => Some(Self::Tree),
            2 => Some(Self::Burning),
            3 => Some(Self::Burned),
            c if c - 3 <= MAX_EMBER_STAGES => Some(Self::Ember(c - 3)),
            _ => None,
        }
    }
}
