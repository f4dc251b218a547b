//! Create/edit form controller.
//!
//! A controller owns one form's transient state, applies edits through the
//! reducer, and on submit hands a validated record to the store. A successful
//! submit answers with the [`Navigation`] the caller should perform.

use chrono::FixedOffset;
use thiserror::Error;

use giftdesk_core::{GiftCardId, GiftCardStatus};

use super::code::generate_code;
use super::form::{Field, FieldError, FormAction, GiftCardForm, ValidationErrors};
use super::preview::GiftCardPreview;
use crate::components::{RichTextInput, TextAreaInput};
use crate::models::GiftCard;
use crate::store::{GiftCardStore, StoreError};

/// Path of the gift card listing view.
pub const LISTING_PATH: &str = "/gift-cards";

/// A route transition requested by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub to: String,
}

impl Navigation {
    /// Go back to the gift card listing.
    #[must_use]
    pub fn to_listing() -> Self {
        Self {
            to: LISTING_PATH.to_string(),
        }
    }
}

/// Why a submit did not reach the store, or failed there.
#[derive(Debug, Error)]
pub enum FormError {
    /// One or more fields are invalid. Nothing was stored.
    #[error("invalid gift card: {0}")]
    Validation(ValidationErrors),

    /// The card is redeemed or expired. Nothing was stored.
    #[error("gift card {id} is {status} and can no longer be edited")]
    InvalidState {
        id: GiftCardId,
        status: GiftCardStatus,
    },

    /// The store failed.
    #[error("store error: {0}")]
    Store(StoreError),
}

impl From<ValidationErrors> for FormError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

impl From<StoreError> for FormError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::DuplicateCode(code) => {
                Self::Validation(FieldError::DuplicateCode(code).into())
            }
            StoreError::NotActive { id, status } => Self::InvalidState { id, status },
            other => Self::Store(other),
        }
    }
}

/// Result of a successful submit.
#[derive(Debug, Clone)]
pub struct Submitted {
    /// The card as stored.
    pub card: GiftCard,
    /// Where to go next.
    pub navigation: Navigation,
}

/// Outcome of opening the edit form.
pub enum EditLoad<'s> {
    /// The card exists; the form is populated.
    Ready(GiftCardFormController<'s>),
    /// No such card. Leave without rendering the form.
    Redirect(Navigation),
}

#[derive(Debug)]
enum Target {
    New,
    Existing(GiftCard),
}

/// Controller behind the create and edit gift card screens.
pub struct GiftCardFormController<'s> {
    store: &'s dyn GiftCardStore,
    target: Target,
    form: GiftCardForm,
    message_input: Box<dyn RichTextInput>,
    offset: FixedOffset,
}

impl<'s> GiftCardFormController<'s> {
    /// Empty form for issuing a new card.
    ///
    /// `offset` is the local time offset expiry dates are entered in.
    #[must_use]
    pub fn create(store: &'s dyn GiftCardStore, offset: FixedOffset) -> Self {
        Self::new(store, Target::New, GiftCardForm::default(), offset)
    }

    /// Form for an existing card.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the lookup itself fails. A missing card is not
    /// an error; it yields `EditLoad::Redirect`.
    pub fn edit(
        store: &'s dyn GiftCardStore,
        id: GiftCardId,
        offset: FixedOffset,
    ) -> Result<EditLoad<'s>, StoreError> {
        let Some(card) = store.find(id)? else {
            tracing::info!(gift_card_id = %id, "Gift card not found, redirecting to listing");
            return Ok(EditLoad::Redirect(Navigation::to_listing()));
        };

        let form = GiftCardForm::from_card(&card, offset);
        Ok(EditLoad::Ready(Self::new(
            store,
            Target::Existing(card),
            form,
            offset,
        )))
    }

    fn new(
        store: &'s dyn GiftCardStore,
        target: Target,
        form: GiftCardForm,
        offset: FixedOffset,
    ) -> Self {
        let input = TextAreaInput::new("message")
            .placeholder("Add a message for the recipient")
            .rows(5);
        Self {
            store,
            target,
            form,
            message_input: Box::new(input),
            offset,
        }
        .bind_message_input()
    }

    /// Swap the message editor for another rich-text implementation.
    #[must_use]
    pub fn with_message_input(mut self, input: Box<dyn RichTextInput>) -> Self {
        self.message_input = input;
        self.bind_message_input()
    }

    fn bind_message_input(mut self) -> Self {
        self.message_input.set_read_only(false);
        self.message_input.set_value(self.form.message.clone());
        self.message_input.set_read_only(self.form.locked);
        self
    }

    /// Current form state.
    #[must_use]
    pub const fn form(&self) -> &GiftCardForm {
        &self.form
    }

    /// The card being edited, if any.
    #[must_use]
    pub const fn card(&self) -> Option<&GiftCard> {
        match &self.target {
            Target::New => None,
            Target::Existing(card) => Some(card),
        }
    }

    /// Whether every input is disabled.
    #[must_use]
    pub const fn is_locked(&self) -> bool {
        self.form.locked
    }

    /// The message editor bound to this form.
    #[must_use]
    pub fn message_input(&self) -> &dyn RichTextInput {
        self.message_input.as_ref()
    }

    /// Change one field. No cross-field validation happens here.
    pub fn set_field(&mut self, field: Field) {
        let field = match field {
            Field::Message(text) => {
                self.message_input.set_value(text);
                Field::Message(self.message_input.value().to_string())
            }
            other => other,
        };
        self.form.dispatch(FormAction::SetField(field));
    }

    /// Replace the code with a freshly generated one, discarding manual edits.
    pub fn generate_code(&mut self) -> &str {
        if !self.form.locked {
            self.form.dispatch(FormAction::CodeGenerated(generate_code()));
        }
        &self.form.code
    }

    /// Preview of the card as currently filled in.
    #[must_use]
    pub fn preview(&self) -> GiftCardPreview {
        GiftCardPreview::from_form(&self.form, self.offset)
    }

    /// Validate and store the card.
    ///
    /// Creates a new card or updates the edited one, calling the store
    /// exactly once on success and not at all on failure.
    ///
    /// # Errors
    ///
    /// Returns `FormError::InvalidState` if the edited card is no longer
    /// active, `FormError::Validation` listing every invalid field, or
    /// `FormError::Store` if the store fails.
    pub fn submit(&mut self) -> Result<Submitted, FormError> {
        match &self.target {
            Target::New => self.submit_create(),
            Target::Existing(card) => {
                let id = card.id;
                self.submit_update(id)
            }
        }
    }

    fn submit_create(&self) -> Result<Submitted, FormError> {
        let record = self.form.to_record(self.offset)?;
        let card = self.store.add(record)?;

        tracing::info!(
            gift_card_id = %card.id,
            amount = %card.amount,
            currency = %card.currency,
            expires = card.expiry_date.is_some(),
            "Gift card created"
        );

        Ok(Submitted {
            card,
            navigation: Navigation::to_listing(),
        })
    }

    fn submit_update(&mut self, id: GiftCardId) -> Result<Submitted, FormError> {
        let current = self.store.find(id)?.ok_or(StoreError::NotFound(id))?;
        if !current.is_editable() {
            tracing::warn!(gift_card_id = %id, status = %current.status, "Rejected edit of inactive gift card");
            let status = current.status;
            self.form.locked = true;
            self.message_input.set_read_only(true);
            self.target = Target::Existing(current);
            return Err(FormError::InvalidState { id, status });
        }

        let record = self.form.to_record(self.offset)?;
        let card = self.store.update(id, record.into())?;

        tracing::info!(
            gift_card_id = %card.id,
            amount = %card.amount,
            currency = %card.currency,
            expires = card.expiry_date.is_some(),
            "Gift card updated"
        );

        self.target = Target::Existing(card.clone());
        Ok(Submitted {
            card,
            navigation: Navigation::to_listing(),
        })
    }
}
