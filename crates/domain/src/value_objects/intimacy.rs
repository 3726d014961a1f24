//! Intimacy - how close an NPC feels to the player.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Intimacy level between an NPC and the player, from -100 (hostile) to 100 (devoted).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Intimacy(i32);

impl Intimacy {
    pub const MIN: i32 = -100;
    pub const MAX: i32 = 100;

    /// Neutral starting point for a fresh relationship.
    pub const NEUTRAL: Intimacy = Intimacy(0);

    /// Create an intimacy value, rejecting anything outside [-100, 100].
    pub fn new(value: i64) -> Result<Self, DomainError> {
        if value < i64::from(Self::MIN) || value > i64::from(Self::MAX) {
            return Err(DomainError::validation(format!(
                "intimacy {} outside range [{}, {}]",
                value,
                Self::MIN,
                Self::MAX
            )));
        }
        Ok(Self(value as i32))
    }

    /// Create an intimacy value, saturating at the range bounds.
    pub fn clamped(value: i64) -> Self {
        Self(value.clamp(i64::from(Self::MIN), i64::from(Self::MAX)) as i32)
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}

impl Default for Intimacy {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

impl TryFrom<i64> for Intimacy {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Intimacy> for i64 {
    fn from(value: Intimacy) -> Self {
        i64::from(value.0)
    }
}

impl fmt::Display for Intimacy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
