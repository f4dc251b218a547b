//! Process-local gift card store.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;

use giftdesk_core::{GiftCardId, GiftCardStatus};

use super::{GiftCardStore, StoreError};
use crate::models::{GiftCard, GiftCardUpdate, NewGiftCard};

#[derive(Debug)]
struct Inner {
    next_id: i32,
    cards: BTreeMap<GiftCardId, GiftCard>,
}

impl Inner {
    /// Codes compare case-insensitively; `except` skips the card being edited.
    fn code_taken(&self, code: &str, except: Option<GiftCardId>) -> bool {
        self.cards
            .values()
            .any(|card| Some(card.id) != except && card.code.eq_ignore_ascii_case(code))
    }
}

/// Gift card store backed by an in-process map.
///
/// IDs are assigned sequentially from 1, so iteration order is creation order.
#[derive(Debug)]
pub struct InMemoryGiftCardStore {
    inner: RwLock<Inner>,
}

impl Default for InMemoryGiftCardStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryGiftCardStore {
    /// Create an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                next_id: 1,
                cards: BTreeMap::new(),
            }),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Inner>, StoreError> {
        self.inner
            .read()
            .map_err(|_| StoreError::Unavailable("store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Inner>, StoreError> {
        self.inner
            .write()
            .map_err(|_| StoreError::Unavailable("store lock poisoned".to_string()))
    }
}

impl GiftCardStore for InMemoryGiftCardStore {
    fn add(&self, record: NewGiftCard) -> Result<GiftCard, StoreError> {
        let mut inner = self.write()?;

        if inner.code_taken(&record.code, None) {
            return Err(StoreError::DuplicateCode(record.code));
        }

        let id = GiftCardId::new(inner.next_id);
        inner.next_id += 1;

        let now = Utc::now();
        let card = GiftCard {
            id,
            code: record.code,
            amount: record.amount,
            currency: record.currency,
            message: record.message,
            expiry_date: record.expiry_date,
            status: GiftCardStatus::Active,
            created_at: now,
            updated_at: now,
        };
        inner.cards.insert(id, card.clone());

        tracing::debug!(gift_card_id = %id, "Gift card stored");
        Ok(card)
    }

    fn update(&self, id: GiftCardId, update: GiftCardUpdate) -> Result<GiftCard, StoreError> {
        let mut inner = self.write()?;

        if let Some(code) = update.code.as_deref()
            && inner.code_taken(code, Some(id))
        {
            return Err(StoreError::DuplicateCode(code.to_string()));
        }

        let card = inner.cards.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        if !card.is_editable() {
            return Err(StoreError::NotActive {
                id,
                status: card.status,
            });
        }

        update.apply_to(card);
        card.updated_at = Utc::now();
        Ok(card.clone())
    }

    fn find(&self, id: GiftCardId) -> Result<Option<GiftCard>, StoreError> {
        Ok(self.read()?.cards.get(&id).cloned())
    }

    fn list(&self) -> Result<Vec<GiftCard>, StoreError> {
        Ok(self.read()?.cards.values().cloned().collect())
    }

    fn set_status(&self, id: GiftCardId, status: GiftCardStatus) -> Result<GiftCard, StoreError> {
        let mut inner = self.write()?;
        let card = inner.cards.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        card.status = status;
        card.updated_at = Utc::now();
        Ok(card.clone())
    }
}
