//! Gift card lifecycle status.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lifecycle status of a gift card.
///
/// Set by the store, never by the issuing form. Only active cards accept edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GiftCardStatus {
    #[default]
    Active,
    Redeemed,
    Expired,
}

/// Error returned when parsing an unknown status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid gift card status: {0}")]
pub struct UnknownStatus(pub String);

impl GiftCardStatus {
    /// Whether the card's editable fields may still change.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Redeemed => "Redeemed",
            Self::Expired => "Expired",
        }
    }
}

impl std::fmt::Display for GiftCardStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Redeemed => write!(f, "redeemed"),
            Self::Expired => write!(f, "expired"),
        }
    }
}

impl std::str::FromStr for GiftCardStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "redeemed" => Ok(Self::Redeemed),
            "expired" => Ok(Self::Expired),
            _ => Err(UnknownStatus(s.to_string())),
        }
    }
}
