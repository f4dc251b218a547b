//! Integration tests for the gift card issuing routes.
//!
//! Each test builds its own app over a fresh in-memory store, so they run
//! without any external services.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use axum::http::StatusCode;
use chrono::{FixedOffset, TimeZone, Utc};
use rust_decimal::Decimal;

use giftdesk_admin::config::AdminConfig;
use giftdesk_admin::gift_cards::is_well_formed;
use giftdesk_admin::models::{GiftCard, NewGiftCard};
use giftdesk_admin::store::GiftCardStore;
use giftdesk_core::{CurrencyCode, GiftCardStatus};
use giftdesk_integration_tests::TestApp;

fn seed(app: &TestApp, code: &str, amount: Decimal) -> GiftCard {
    app.store
        .add(NewGiftCard {
            code: code.to_string(),
            amount,
            currency: CurrencyCode::USD,
            message: "Enjoy".to_string(),
            expiry_date: None,
        })
        .expect("Failed to seed gift card")
}

/// Pull the `value` attribute of the code input out of a rendered page.
fn code_input_value(body: &str) -> Option<&str> {
    let input = body.get(body.find("name=\"code\"")?..)?;
    let start = input.find("value=\"")? + "value=\"".len();
    let rest = input.get(start..)?;
    rest.get(..rest.find('"')?)
}

// ============================================================================
// Health & Navigation
// ============================================================================

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();

    let resp = app.get("/health").await.expect("Request failed");

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body, "ok");
}

#[tokio::test]
async fn test_root_redirects_to_listing() {
    let app = TestApp::new();

    let resp = app.get("/").await.expect("Request failed");

    assert!(resp.status.is_redirection());
    assert_eq!(resp.location(), Some("/gift-cards"));
}

#[tokio::test]
async fn test_empty_listing() {
    let app = TestApp::new();

    let resp = app.get("/gift-cards").await.expect("Request failed");

    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("No gift cards issued yet."));
}

// ============================================================================
// Create
// ============================================================================

#[tokio::test]
async fn test_new_form_shows_placeholder_preview() {
    let app = TestApp::new();

    let resp = app.get("/gift-cards/new").await.expect("Request failed");

    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("New Gift Card"));
    assert!(resp.body.contains("XXXX-XXXX-XXXX-XXXX"));
    assert!(resp.body.contains("$0.00"));
    assert!(!resp.body.contains("aria-disabled=\"true\""));
}

#[tokio::test]
async fn test_create_gift_card_redirects_to_listing() {
    let app = TestApp::new();

    let resp = app
        .post_form(
            "/gift-cards/new",
            &[
                ("amount", "25.50"),
                ("currency", "USD"),
                ("code", "ABCD-EFGH-JKLM-NPQR"),
                ("message", "Happy birthday"),
                ("expiry_enabled", "on"),
                ("expiry_date", "2026-12-31T18:00"),
                ("intent", "save"),
            ],
        )
        .await
        .expect("Request failed");

    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location(), Some("/gift-cards"));

    let cards = app.store.list().expect("Failed to list");
    assert_eq!(cards.len(), 1);
    let card = &cards[0];
    assert_eq!(card.code, "ABCD-EFGH-JKLM-NPQR");
    assert_eq!(card.amount, Decimal::new(2550, 2));
    assert_eq!(card.currency, CurrencyCode::USD);
    assert_eq!(card.message, "Happy birthday");
    assert_eq!(card.status, GiftCardStatus::Active);
    assert_eq!(
        card.expiry_date,
        Some(Utc.with_ymd_and_hms(2026, 12, 31, 18, 0, 0).unwrap())
    );

    let listing = app.get("/gift-cards").await.expect("Request failed");
    assert!(listing.body.contains("ABCD-EFGH-JKLM-NPQR"));
    assert!(listing.body.contains("$25.50"));
}

#[tokio::test]
async fn test_create_without_expiry_ignores_date() {
    let app = TestApp::new();

    let resp = app
        .post_form(
            "/gift-cards/new",
            &[
                ("amount", "10"),
                ("code", "WXYZ-2345-6789-ABCD"),
                ("expiry_date", "2026-12-31T18:00"),
            ],
        )
        .await
        .expect("Request failed");

    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    let cards = app.store.list().expect("Failed to list");
    assert_eq!(cards[0].expiry_date, None);
}

#[tokio::test]
async fn test_create_interprets_expiry_in_configured_offset() {
    let mut config = AdminConfig::local("http://localhost:3002");
    config.expiry_offset = FixedOffset::east_opt(2 * 3600).unwrap();
    let app = TestApp::with_config(config);

    let resp = app
        .post_form(
            "/gift-cards/new",
            &[
                ("amount", "50"),
                ("code", "ABCD-EFGH-JKLM-NPQR"),
                ("expiry_enabled", "on"),
                ("expiry_date", "2026-12-31T18:00"),
            ],
        )
        .await
        .expect("Request failed");

    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    let cards = app.store.list().expect("Failed to list");
    assert_eq!(
        cards[0].expiry_date,
        Some(Utc.with_ymd_and_hms(2026, 12, 31, 16, 0, 0).unwrap())
    );
}

#[tokio::test]
async fn test_create_with_missing_fields_rerenders_form() {
    let app = TestApp::new();

    let resp = app
        .post_form(
            "/gift-cards/new",
            &[("amount", ""), ("code", "   "), ("message", "Keep me")],
        )
        .await
        .expect("Request failed");

    assert_eq!(resp.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(resp.body.contains("Code is required"));
    assert!(resp.body.contains("Amount is required"));
    // Entered values survive the round trip
    assert!(resp.body.contains("Keep me"));
    assert!(app.store.list().expect("Failed to list").is_empty());
}

#[tokio::test]
async fn test_create_with_invalid_expiry_is_rejected() {
    let app = TestApp::new();

    let resp = app
        .post_form(
            "/gift-cards/new",
            &[
                ("amount", "10"),
                ("code", "ABCD-EFGH-JKLM-NPQR"),
                ("expiry_enabled", "on"),
                ("expiry_date", "next tuesday"),
            ],
        )
        .await
        .expect("Request failed");

    assert_eq!(resp.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(resp.body.contains("data-error=\"expiry\""));
    assert!(app.store.list().expect("Failed to list").is_empty());
}

#[tokio::test]
async fn test_create_with_oversized_amount_is_rejected() {
    let app = TestApp::new();

    let resp = app
        .post_form(
            "/gift-cards/new",
            &[("amount", "1e30"), ("code", "ABCD-EFGH-JKLM-NPQR")],
        )
        .await
        .expect("Request failed");

    assert_eq!(resp.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(resp.body.contains("Amount is too large"));
    assert!(!resp.body.contains("is not a number"));
    assert!(app.store.list().expect("Failed to list").is_empty());
}

#[tokio::test]
async fn test_create_with_duplicate_code_is_rejected() {
    let app = TestApp::new();
    seed(&app, "ABCD-EFGH-JKLM-NPQR", Decimal::new(10, 0));

    let resp = app
        .post_form(
            "/gift-cards/new",
            &[("amount", "20"), ("code", "abcd-efgh-jklm-npqr")],
        )
        .await
        .expect("Request failed");

    assert_eq!(resp.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(resp.body.contains("is already in use"));
    assert_eq!(app.store.list().expect("Failed to list").len(), 1);
}

#[tokio::test]
async fn test_generate_intent_replaces_code_without_saving() {
    let app = TestApp::new();

    let resp = app
        .post_form(
            "/gift-cards/new",
            &[
                ("amount", "15"),
                ("code", "HAND-TYPED"),
                ("intent", "generate"),
            ],
        )
        .await
        .expect("Request failed");

    assert_eq!(resp.status, StatusCode::OK);
    assert!(!resp.body.contains("HAND-TYPED"));
    let code = code_input_value(&resp.body).expect("Code input missing");
    assert!(is_well_formed(code), "unexpected code {code}");
    assert!(app.store.list().expect("Failed to list").is_empty());
}

// ============================================================================
// Edit
// ============================================================================

#[tokio::test]
async fn test_edit_unknown_card_redirects_to_listing() {
    let app = TestApp::new();

    let resp = app.get("/gift-cards/999/edit").await.expect("Request failed");
    assert!(resp.status.is_redirection());
    assert_eq!(resp.location(), Some("/gift-cards"));

    let resp = app
        .post_form("/gift-cards/999/edit", &[("amount", "1"), ("code", "X")])
        .await
        .expect("Request failed");
    assert!(resp.status.is_redirection());
    assert_eq!(resp.location(), Some("/gift-cards"));
    assert!(app.store.list().expect("Failed to list").is_empty());
}

#[tokio::test]
async fn test_edit_malformed_id_redirects_to_listing() {
    let app = TestApp::new();

    // Neither segment can name a stored card
    for id in ["abc", "99999999999"] {
        let resp = app
            .get(&format!("/gift-cards/{id}/edit"))
            .await
            .expect("Request failed");
        assert_eq!(resp.status, StatusCode::SEE_OTHER, "GET {id}");
        assert_eq!(resp.location(), Some("/gift-cards"), "GET {id}");

        let resp = app
            .post_form(
                &format!("/gift-cards/{id}/edit"),
                &[("amount", "1"), ("code", "ABCD-EFGH-JKLM-NPQR")],
            )
            .await
            .expect("Request failed");
        assert_eq!(resp.status, StatusCode::SEE_OTHER, "POST {id}");
        assert_eq!(resp.location(), Some("/gift-cards"), "POST {id}");
    }
    assert!(app.store.list().expect("Failed to list").is_empty());
}

#[tokio::test]
async fn test_edit_form_is_prefilled() {
    let app = TestApp::new();
    let card = seed(&app, "ABCD-EFGH-JKLM-NPQR", Decimal::new(2550, 2));

    let resp = app
        .get(&format!("/gift-cards/{}/edit", card.id))
        .await
        .expect("Request failed");

    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains(&format!("Edit Gift Card #{}", card.id)));
    assert_eq!(code_input_value(&resp.body), Some("ABCD-EFGH-JKLM-NPQR"));
    assert!(resp.body.contains("value=\"25.5\""));
    assert!(resp.body.contains("Enjoy"));
    assert!(resp.body.contains("$25.50"));
}

#[tokio::test]
async fn test_update_active_card() {
    let app = TestApp::new();
    let card = seed(&app, "ABCD-EFGH-JKLM-NPQR", Decimal::new(10, 0));

    let resp = app
        .post_form(
            &format!("/gift-cards/{}/edit", card.id),
            &[
                ("amount", "40"),
                ("currency", "GBP"),
                ("code", "ABCD-EFGH-JKLM-NPQR"),
                ("message", "Updated"),
            ],
        )
        .await
        .expect("Request failed");

    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location(), Some("/gift-cards"));

    let stored = app
        .store
        .find(card.id)
        .expect("Failed to find")
        .expect("Card vanished");
    assert_eq!(stored.amount, Decimal::new(40, 0));
    assert_eq!(stored.currency, CurrencyCode::GBP);
    assert_eq!(stored.message, "Updated");
    assert_eq!(stored.created_at, card.created_at);
    assert_eq!(app.store.list().expect("Failed to list").len(), 1);
}

#[tokio::test]
async fn test_redeemed_card_renders_read_only() {
    let app = TestApp::new();
    let card = seed(&app, "ABCD-EFGH-JKLM-NPQR", Decimal::new(10, 0));
    app.store
        .set_status(card.id, GiftCardStatus::Redeemed)
        .expect("Failed to redeem");

    let resp = app
        .get(&format!("/gift-cards/{}/edit", card.id))
        .await
        .expect("Request failed");

    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("data-status=\"redeemed\""));
    assert!(resp.body.contains("This gift card can no longer be edited."));
    assert!(resp.body.contains("aria-disabled=\"true\""));
}

#[tokio::test]
async fn test_update_redeemed_card_is_rejected() {
    let app = TestApp::new();
    let card = seed(&app, "ABCD-EFGH-JKLM-NPQR", Decimal::new(10, 0));
    app.store
        .set_status(card.id, GiftCardStatus::Expired)
        .expect("Failed to expire");

    let resp = app
        .post_form(
            &format!("/gift-cards/{}/edit", card.id),
            &[("amount", "99"), ("code", "WXYZ-2345-6789-ABCD")],
        )
        .await
        .expect("Request failed");

    assert_eq!(resp.status, StatusCode::CONFLICT);
    assert!(resp.body.contains("can no longer be edited"));

    let stored = app
        .store
        .find(card.id)
        .expect("Failed to find")
        .expect("Card vanished");
    assert_eq!(stored.amount, Decimal::new(10, 0));
    assert_eq!(stored.code, "ABCD-EFGH-JKLM-NPQR");
}

// ============================================================================
// Status
// ============================================================================

#[tokio::test]
async fn test_set_status() {
    let app = TestApp::new();
    let card = seed(&app, "ABCD-EFGH-JKLM-NPQR", Decimal::new(10, 0));

    let resp = app
        .post_form(
            &format!("/gift-cards/{}/status", card.id),
            &[("status", "redeemed")],
        )
        .await
        .expect("Request failed");

    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    let stored = app
        .store
        .find(card.id)
        .expect("Failed to find")
        .expect("Card vanished");
    assert_eq!(stored.status, GiftCardStatus::Redeemed);
}

#[tokio::test]
async fn test_set_status_rejects_unknown_values() {
    let app = TestApp::new();
    let card = seed(&app, "ABCD-EFGH-JKLM-NPQR", Decimal::new(10, 0));

    let resp = app
        .post_form(
            &format!("/gift-cards/{}/status", card.id),
            &[("status", "lost")],
        )
        .await
        .expect("Request failed");
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);

    let resp = app
        .post_form("/gift-cards/999/status", &[("status", "expired")])
        .await
        .expect("Request failed");
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert_eq!(resp.body, "Not found: gift card 999");

    let resp = app
        .post_form("/gift-cards/abc/status", &[("status", "expired")])
        .await
        .expect("Request failed");
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert_eq!(resp.body, "Not found: gift card abc");
}

// ============================================================================
// HTMX fragments
// ============================================================================

#[tokio::test]
async fn test_generated_code_fragment() {
    let app = TestApp::new();

    let resp = app.get("/gift-cards/code").await.expect("Request failed");

    assert_eq!(resp.status, StatusCode::OK);
    let code = code_input_value(&resp.body).expect("Code input missing");
    assert!(is_well_formed(code), "unexpected code {code}");
    // The swapped-in input posts the form to the preview immediately
    assert!(resp.body.contains("hx-trigger=\"keyup changed delay:300ms, load\""));
    assert!(resp.body.contains("hx-post=\"/gift-cards/preview\""));
}

#[tokio::test]
async fn test_form_code_input_does_not_refresh_on_load() {
    let app = TestApp::new();

    let resp = app.get("/gift-cards/new").await.expect("Request failed");

    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("hx-trigger=\"keyup changed delay:300ms\""));
    assert!(!resp.body.contains(", load\""));
}

#[tokio::test]
async fn test_preview_fragment() {
    let app = TestApp::new();

    let resp = app
        .post_form(
            "/gift-cards/preview",
            &[
                ("amount", "10"),
                ("currency", "EUR"),
                ("code", ""),
                ("message", "<b>Hi</b>"),
                ("expiry_enabled", "on"),
                ("expiry_date", "2027-01-05T09:30"),
            ],
        )
        .await
        .expect("Request failed");

    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("id=\"gift-card-preview\""));
    assert!(resp.body.contains("€10.00"));
    assert!(resp.body.contains("XXXX-XXXX-XXXX-XXXX"));
    assert!(resp.body.contains("<b>Hi</b>"));
    assert!(resp.body.contains("Expires January 5, 2027 at 09:30"));
}

#[tokio::test]
async fn test_preview_hides_expiry_when_disabled() {
    let app = TestApp::new();

    let resp = app
        .post_form(
            "/gift-cards/preview",
            &[
                ("amount", "abc"),
                ("code", "ABCD-EFGH-JKLM-NPQR"),
                ("expiry_date", "2027-01-05T09:30"),
            ],
        )
        .await
        .expect("Request failed");

    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("$0.00"));
    assert!(resp.body.contains("ABCD-EFGH-JKLM-NPQR"));
    assert!(!resp.body.contains("Expires"));
}
