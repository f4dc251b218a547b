//! Gift card issuing: code generation, form state, preview and the
//! controller that ties them to the store.
//!
//! # Modules
//!
//! - [`code`] - Redemption code generator
//! - [`form`] - Form state, reducer and validation
//! - [`preview`] - Recipient-facing preview
//! - [`controller`] - Create/edit controller

pub mod code;
pub mod controller;
pub mod form;
pub mod preview;

pub use code::{generate_code, is_well_formed};
pub use controller::{EditLoad, FormError, GiftCardFormController, LISTING_PATH, Navigation, Submitted};
pub use form::{Field, FieldError, FormAction, FormField, GiftCardForm, ValidationErrors, reduce};
pub use preview::GiftCardPreview;
