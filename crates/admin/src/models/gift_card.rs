//! Gift card domain models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use giftdesk_core::{CurrencyCode, GiftCardId, GiftCardStatus, Money};

/// A gift card as held by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GiftCard {
    /// Store-assigned ID.
    pub id: GiftCardId,
    /// Redemption code.
    pub code: String,
    /// Card value.
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    /// Currency of the card value.
    pub currency: CurrencyCode,
    /// Rich-text (HTML) message shown to the recipient. Empty means none.
    pub message: String,
    /// When the card stops being redeemable. `None` means never.
    pub expiry_date: Option<DateTime<Utc>>,
    /// Lifecycle status.
    pub status: GiftCardStatus,
    /// When the card was issued.
    pub created_at: DateTime<Utc>,
    /// Last modification.
    pub updated_at: DateTime<Utc>,
}

impl GiftCard {
    /// Card value with its currency.
    #[must_use]
    pub const fn value(&self) -> Money {
        Money::new(self.amount, self.currency)
    }

    /// Whether the card's fields may still be edited.
    #[must_use]
    pub const fn is_editable(&self) -> bool {
        self.status.is_active()
    }
}

/// A validated record ready to be handed to the store for creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGiftCard {
    /// Trimmed redemption code.
    pub code: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub currency: CurrencyCode,
    pub message: String,
    pub expiry_date: Option<DateTime<Utc>>,
}

/// Partial record merged into an existing card.
///
/// Fields left as `None` keep their stored value. `expiry_date` is doubly
/// optional so an update can clear an expiry (`Some(None)`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GiftCardUpdate {
    pub code: Option<String>,
    pub amount: Option<Decimal>,
    pub currency: Option<CurrencyCode>,
    pub message: Option<String>,
    pub expiry_date: Option<Option<DateTime<Utc>>>,
}

impl GiftCardUpdate {
    /// Merge the present fields into `card`.
    pub fn apply_to(self, card: &mut GiftCard) {
        if let Some(code) = self.code {
            card.code = code;
        }
        if let Some(amount) = self.amount {
            card.amount = amount;
        }
        if let Some(currency) = self.currency {
            card.currency = currency;
        }
        if let Some(message) = self.message {
            card.message = message;
        }
        if let Some(expiry_date) = self.expiry_date {
            card.expiry_date = expiry_date;
        }
    }
}

impl From<NewGiftCard> for GiftCardUpdate {
    /// A full update replacing every editable field.
    fn from(record: NewGiftCard) -> Self {
        Self {
            code: Some(record.code),
            amount: Some(record.amount),
            currency: Some(record.currency),
            message: Some(record.message),
            expiry_date: Some(record.expiry_date),
        }
    }
}
