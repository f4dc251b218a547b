//! HTTP route handlers for the admin panel.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                          - Redirects to /gift-cards
//!
//! # Gift cards
//! GET  /gift-cards                - Gift card listing
//! GET  /gift-cards/new            - New gift card form
//! POST /gift-cards/new            - Create gift card (or regenerate code)
//! GET  /gift-cards/{id}/edit      - Edit gift card form
//! POST /gift-cards/{id}/edit      - Update gift card (or regenerate code)
//! POST /gift-cards/{id}/status    - Change gift card status
//!
//! # HTMX fragments
//! GET  /gift-cards/code           - Freshly generated code input
//! POST /gift-cards/preview        - Preview of the posted form
//! ```
//!
//! `/health` is mounted by [`crate::app`].

pub mod gift_cards;

use axum::{Router, response::Redirect, routing::get};

use crate::gift_cards::LISTING_PATH;
use crate::state::AppState;

/// Build the admin router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(|| async { Redirect::to(LISTING_PATH) }))
        .merge(gift_cards::router())
}
