//! Read-only preview of the card being issued.

use askama::Template;
use chrono::FixedOffset;
use rust_decimal::Decimal;

use giftdesk_core::Money;

use super::code::CODE_PLACEHOLDER;
use super::form::{GiftCardForm, parse_amount, parse_local_expiry};

const EXPIRY_NOTICE_FORMAT: &str = "%B %-d, %Y at %H:%M";

/// What the recipient would see, derived from the current form state.
#[derive(Debug, Clone, PartialEq, Eq, Template)]
#[template(path = "gift_cards/_preview.html")]
pub struct GiftCardPreview {
    /// Symbol plus two-decimal amount, e.g. `$25.50`.
    pub amount: String,
    /// Trimmed code, or the placeholder when empty.
    pub code: String,
    pub code_is_placeholder: bool,
    /// Message markup, rendered unescaped.
    pub message_html: String,
    /// `Expires ...` when expiry is on and a valid date is set.
    pub expiry_notice: Option<String>,
}

impl GiftCardPreview {
    /// Project the form state. Unparseable amounts show as zero.
    #[must_use]
    pub fn from_form(form: &GiftCardForm, offset: FixedOffset) -> Self {
        let amount = parse_amount(&form.amount).unwrap_or(Decimal::ZERO);
        let code = form.code.trim();
        let code_is_placeholder = code.is_empty();

        let expiry_notice = form
            .expiry_enabled
            .then(|| parse_local_expiry(form.expiry_date.trim(), offset))
            .flatten()
            .map(|expiry| {
                format!(
                    "Expires {}",
                    expiry.with_timezone(&offset).format(EXPIRY_NOTICE_FORMAT)
                )
            });

        Self {
            amount: Money::new(amount, form.currency).display(),
            code: if code_is_placeholder {
                CODE_PLACEHOLDER.to_string()
            } else {
                code.to_string()
            },
            code_is_placeholder,
            message_html: form.message.clone(),
            expiry_notice,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use giftdesk_core::CurrencyCode;

    use super::*;

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    #[test]
    fn test_empty_form_preview() {
        let preview = GiftCardPreview::from_form(&GiftCardForm::default(), utc());
        assert_eq!(preview.amount, "$0.00");
        assert_eq!(preview.code, "XXXX-XXXX-XXXX-XXXX");
        assert!(preview.code_is_placeholder);
        assert_eq!(preview.expiry_notice, None);
    }

    #[test]
    fn test_amount_uses_currency_symbol_and_two_decimals() {
        let form = GiftCardForm {
            amount: "25.5".to_string(),
            currency: CurrencyCode::EUR,
            ..Default::default()
        };
        assert_eq!(GiftCardPreview::from_form(&form, utc()).amount, "€25.50");
    }

    #[test]
    fn test_code_is_trimmed() {
        let form = GiftCardForm {
            code: "  ABCD-EFGH-JKLM-NPQR ".to_string(),
            ..Default::default()
        };
        let preview = GiftCardPreview::from_form(&form, utc());
        assert_eq!(preview.code, "ABCD-EFGH-JKLM-NPQR");
        assert!(!preview.code_is_placeholder);
    }

    #[test]
    fn test_expiry_notice_only_when_enabled_with_date() {
        let mut form = GiftCardForm {
            expiry_enabled: false,
            expiry_date: "2025-12-31T10:00".to_string(),
            ..Default::default()
        };
        assert_eq!(GiftCardPreview::from_form(&form, utc()).expiry_notice, None);

        form.expiry_enabled = true;
        assert_eq!(
            GiftCardPreview::from_form(&form, utc())
                .expiry_notice
                .as_deref(),
            Some("Expires December 31, 2025 at 10:00")
        );

        form.expiry_date = String::new();
        assert_eq!(GiftCardPreview::from_form(&form, utc()).expiry_notice, None);
    }

    #[test]
    fn test_render_keeps_message_markup() {
        let form = GiftCardForm {
            amount: "10".to_string(),
            currency: CurrencyCode::GBP,
            message: "<p><strong>Happy birthday!</strong></p>".to_string(),
            ..Default::default()
        };
        let html = GiftCardPreview::from_form(&form, utc()).render().unwrap();
        assert!(html.contains("£10.00"));
        assert!(html.contains("<strong>Happy birthday!</strong>"));
        assert!(html.contains("XXXX-XXXX-XXXX-XXXX"));
    }
}
