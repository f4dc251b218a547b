//! Gift card form state, its reducer, and submit-time validation.
//!
//! The form is a plain value. Every change goes through [`reduce`], which
//! returns the next state and never touches the store. Validation only runs
//! when the form is turned into a [`NewGiftCard`].

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use thiserror::Error;

use giftdesk_core::CurrencyCode;

use crate::models::{GiftCard, NewGiftCard};

/// Input formats accepted for the expiry date, most specific first.
const EXPIRY_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];
const EXPIRY_DATE_FORMAT: &str = "%Y-%m-%d";

/// Format used to put a stored expiry back into a `datetime-local` input.
const EXPIRY_INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Transient state of the create/edit form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GiftCardForm {
    /// Raw amount as typed.
    pub amount: String,
    pub currency: CurrencyCode,
    /// Raw code as typed or generated (untrimmed).
    pub code: String,
    /// Rich-text message (HTML).
    pub message: String,
    /// Whether the expiry toggle is on.
    pub expiry_enabled: bool,
    /// Raw local date-time from the picker. Kept even when the toggle is off.
    pub expiry_date: String,
    /// Set when the underlying card is not active. A locked form ignores edits.
    pub locked: bool,
}

/// A single editable field with its new value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field {
    Amount(String),
    Currency(CurrencyCode),
    Code(String),
    Message(String),
    ExpiryEnabled(bool),
    ExpiryDate(String),
}

/// Something that happened to the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormAction {
    /// One field was edited.
    SetField(Field),
    /// A freshly generated code replaces whatever was in the code field.
    CodeGenerated(String),
}

/// Compute the next form state.
///
/// Locked forms return unchanged for every action.
#[must_use]
pub fn reduce(state: GiftCardForm, action: FormAction) -> GiftCardForm {
    if state.locked {
        return state;
    }

    match action {
        FormAction::SetField(field) => match field {
            Field::Amount(amount) => GiftCardForm { amount, ..state },
            Field::Currency(currency) => GiftCardForm { currency, ..state },
            Field::Code(code) => GiftCardForm { code, ..state },
            Field::Message(message) => GiftCardForm { message, ..state },
            Field::ExpiryEnabled(expiry_enabled) => GiftCardForm {
                expiry_enabled,
                ..state
            },
            Field::ExpiryDate(expiry_date) => GiftCardForm {
                expiry_date,
                ..state
            },
        },
        FormAction::CodeGenerated(code) => GiftCardForm { code, ..state },
    }
}

impl GiftCardForm {
    /// Populate the form from a stored card.
    ///
    /// The expiry is shown in `offset` local time. The form is locked unless
    /// the card is active.
    #[must_use]
    pub fn from_card(card: &GiftCard, offset: FixedOffset) -> Self {
        Self {
            amount: card.amount.normalize().to_string(),
            currency: card.currency,
            code: card.code.clone(),
            message: card.message.clone(),
            expiry_enabled: card.expiry_date.is_some(),
            expiry_date: card
                .expiry_date
                .map(|date| {
                    date.with_timezone(&offset)
                        .format(EXPIRY_INPUT_FORMAT)
                        .to_string()
                })
                .unwrap_or_default(),
            locked: !card.is_editable(),
        }
    }

    /// Apply an action in place.
    pub fn dispatch(&mut self, action: FormAction) {
        *self = reduce(std::mem::take(self), action);
    }

    /// The expiry to attach, if any.
    ///
    /// Returns `Ok(None)` when the toggle is off or no date was picked.
    ///
    /// # Errors
    ///
    /// Returns `FieldError::InvalidExpiry` if a date was picked but cannot be parsed.
    pub fn resolved_expiry(&self, offset: FixedOffset) -> Result<Option<DateTime<Utc>>, FieldError> {
        if !self.expiry_enabled {
            return Ok(None);
        }
        let raw = self.expiry_date.trim();
        if raw.is_empty() {
            return Ok(None);
        }
        parse_local_expiry(raw, offset)
            .map(Some)
            .ok_or_else(|| FieldError::InvalidExpiry(raw.to_string()))
    }

    /// Validate the form and build the record handed to the store.
    ///
    /// # Errors
    ///
    /// Returns every failing field at once.
    pub fn to_record(&self, offset: FixedOffset) -> Result<NewGiftCard, ValidationErrors> {
        let mut errors = Vec::new();

        let code = self.code.trim();
        if code.is_empty() {
            errors.push(FieldError::BlankCode);
        }

        let amount = match parse_amount(&self.amount) {
            Ok(amount) => Some(amount),
            Err(e) => {
                errors.push(e);
                None
            }
        };

        let expiry_date = self.resolved_expiry(offset).unwrap_or_else(|e| {
            errors.push(e);
            None
        });

        match amount {
            Some(amount) if errors.is_empty() => Ok(NewGiftCard {
                code: code.to_string(),
                amount,
                currency: self.currency,
                message: self.message.clone(),
                expiry_date,
            }),
            _ => Err(ValidationErrors(errors)),
        }
    }
}

/// Parse a typed amount. Empty input counts as missing.
///
/// # Errors
///
/// Returns `MissingAmount`, `InvalidAmount`, `AmountTooLarge` or `NegativeAmount`.
pub fn parse_amount(raw: &str) -> Result<Decimal, FieldError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(FieldError::MissingAmount);
    }
    let amount = Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .map_err(|_| out_of_range_error(raw))?;
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(FieldError::NegativeAmount);
    }
    Ok(amount)
}

/// Classify a string `Decimal` refused: a real number outside its range, or
/// not a number at all.
fn out_of_range_error(raw: &str) -> FieldError {
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() && value <= -1.0 => FieldError::NegativeAmount,
        Ok(value) if value.is_finite() && value >= 1.0 => FieldError::AmountTooLarge,
        _ => FieldError::InvalidAmount(raw.to_string()),
    }
}

/// Interpret a picker value as local time at `offset` and convert it to UTC.
#[must_use]
pub fn parse_local_expiry(raw: &str, offset: FixedOffset) -> Option<DateTime<Utc>> {
    let naive = EXPIRY_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, EXPIRY_DATE_FORMAT)
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })?;

    offset
        .from_local_datetime(&naive)
        .single()
        .map(|local| local.with_timezone(&Utc))
}

/// Which input a validation message belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Code,
    Amount,
    Expiry,
}

impl FormField {
    /// Name of the input in the HTML form.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Code => "code",
            Self::Amount => "amount",
            Self::Expiry => "expiry_date",
        }
    }
}

/// A single field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("Code is required")]
    BlankCode,
    #[error("Code {0} is already in use")]
    DuplicateCode(String),
    #[error("Amount is required")]
    MissingAmount,
    #[error("Amount '{0}' is not a number")]
    InvalidAmount(String),
    #[error("Amount cannot be negative")]
    NegativeAmount,
    #[error("Amount is too large")]
    AmountTooLarge,
    #[error("Expiry date '{0}' is not a valid date")]
    InvalidExpiry(String),
}

impl FieldError {
    /// The input this error is reported against.
    #[must_use]
    pub const fn field(&self) -> FormField {
        match self {
            Self::BlankCode | Self::DuplicateCode(_) => FormField::Code,
            Self::MissingAmount
            | Self::InvalidAmount(_)
            | Self::NegativeAmount
            | Self::AmountTooLarge => FormField::Amount,
            Self::InvalidExpiry(_) => FormField::Expiry,
        }
    }
}

/// All validation failures of one submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    /// Errors for a single input.
    pub fn for_field(&self, field: FormField) -> impl Iterator<Item = &FieldError> {
        self.0.iter().filter(move |e| e.field() == field)
    }

    /// First message for a single input, for inline display.
    #[must_use]
    pub fn message_for(&self, field: FormField) -> Option<String> {
        self.for_field(field).next().map(ToString::to_string)
    }

    /// Returns true if the given error was reported.
    #[must_use]
    pub fn contains(&self, error: &FieldError) -> bool {
        self.0.contains(error)
    }
}

impl From<FieldError> for ValidationErrors {
    fn from(error: FieldError) -> Self {
        Self(vec![error])
    }
}

impl std::error::Error for ValidationErrors {}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "{}", messages.join("; "))
    }
}
