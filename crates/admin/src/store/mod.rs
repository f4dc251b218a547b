//! Gift card store abstraction.
//!
//! The store owns persistence and identity: it assigns IDs and the initial
//! status on creation, merges partial updates, and answers lookups. The form
//! controllers only ever talk to the [`GiftCardStore`] trait.
//!
//! # Implementations
//!
//! - [`InMemoryGiftCardStore`] - process-local store used by the admin binary
//!   and the test suites

pub mod memory;

use thiserror::Error;

use giftdesk_core::{GiftCardId, GiftCardStatus};

use crate::models::{GiftCard, GiftCardUpdate, NewGiftCard};

pub use memory::InMemoryGiftCardStore;

/// Errors that can occur during store operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// Requested gift card was not found.
    #[error("gift card {0} not found")]
    NotFound(GiftCardId),

    /// Another card already uses this redemption code.
    #[error("redemption code already in use: {0}")]
    DuplicateCode(String),

    /// The card is no longer active and cannot be modified.
    #[error("gift card {id} is {status} and cannot be modified")]
    NotActive {
        id: GiftCardId,
        status: GiftCardStatus,
    },

    /// The backing storage is unusable.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Persistence collaborator for gift cards.
///
/// Implementations must apply each write atomically and make it visible to
/// subsequent reads.
pub trait GiftCardStore: Send + Sync {
    /// Create a card. The store assigns the ID and sets status to active.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::DuplicateCode` if the code is already in use.
    fn add(&self, record: NewGiftCard) -> Result<GiftCard, StoreError>;

    /// Merge `update` into the card identified by `id`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` for unknown IDs, `StoreError::NotActive`
    /// if the card is redeemed or expired, and `StoreError::DuplicateCode` if
    /// the new code belongs to another card.
    fn update(&self, id: GiftCardId, update: GiftCardUpdate) -> Result<GiftCard, StoreError>;

    /// Look up a card by ID.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` if the store cannot be read.
    fn find(&self, id: GiftCardId) -> Result<Option<GiftCard>, StoreError>;

    /// All cards, in creation order.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` if the store cannot be read.
    fn list(&self) -> Result<Vec<GiftCard>, StoreError>;

    /// Move a card to another lifecycle status.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` for unknown IDs.
    fn set_status(&self, id: GiftCardId, status: GiftCardStatus) -> Result<GiftCard, StoreError>;
}
