//! Core types for Giftdesk.
//!
//! This module provides type-safe wrappers for gift card domain concepts.

pub mod id;
pub mod money;
pub mod status;

pub use id::*;
pub use money::{CurrencyCode, Money, UnknownCurrency};
pub use status::{GiftCardStatus, UnknownStatus};
