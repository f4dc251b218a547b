//! Domain models for admin.

pub mod gift_card;

pub use gift_card::{GiftCard, GiftCardUpdate, NewGiftCard};
