//! Giftdesk Core - Shared gift card types.
//!
//! This crate provides the types shared by the Giftdesk components:
//! - `admin` - Gift card issuing panel and its form controller
//! - `cli` - Command-line tools for code generation
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP, no randomness.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Type-safe IDs, currencies, money amounts and card statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
