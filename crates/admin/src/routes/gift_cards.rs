//! Gift card issuing route handlers.

use askama::Template;
use axum::{
    Form, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use chrono::FixedOffset;
use serde::Deserialize;
use tracing::instrument;

use giftdesk_core::{CurrencyCode, GiftCardId, GiftCardStatus};

use crate::{
    error::AppError,
    filters,
    gift_cards::{
        EditLoad, Field, FormError, FormField, GiftCardFormController, LISTING_PATH,
        ValidationErrors, generate_code,
    },
    models::GiftCard,
    state::AppState,
    store::StoreError,
};

const EXPIRY_DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Gift card row for the listing.
#[derive(Debug, Clone)]
pub struct GiftCardView {
    pub id: GiftCardId,
    pub code: String,
    pub value: String,
    pub status: String,
    pub status_label: &'static str,
    pub expires: Option<String>,
    pub editable: bool,
}

impl GiftCardView {
    fn new(gc: &GiftCard, offset: FixedOffset) -> Self {
        Self {
            id: gc.id,
            code: gc.code.clone(),
            value: gc.value().display(),
            status: gc.status.to_string(),
            status_label: gc.status.label(),
            expires: gc.expiry_date.map(|date| {
                date.with_timezone(&offset)
                    .format(EXPIRY_DISPLAY_FORMAT)
                    .to_string()
            }),
            editable: gc.is_editable(),
        }
    }
}

/// Currency choice in the form's select.
#[derive(Debug, Clone)]
pub struct CurrencyOption {
    pub code: &'static str,
    pub symbol: &'static str,
    pub selected: bool,
}

/// Gift cards list page template.
#[derive(Template)]
#[template(path = "gift_cards/index.html")]
pub struct GiftCardsIndexTemplate {
    pub current_path: String,
    pub gift_cards: Vec<GiftCardView>,
}

/// Create/edit form template.
#[derive(Template)]
#[template(path = "gift_cards/form.html")]
pub struct GiftCardFormTemplate {
    pub current_path: String,
    pub title: String,
    pub action: String,
    pub card_id: Option<GiftCardId>,
    pub status: Option<String>,
    pub status_label: Option<&'static str>,
    pub locked: bool,
    pub amount: String,
    pub currencies: Vec<CurrencyOption>,
    pub code: String,
    pub refresh_preview: bool,
    pub expiry_enabled: bool,
    pub expiry_date: String,
    pub message_input_html: String,
    pub preview_html: String,
    pub code_error: Option<String>,
    pub amount_error: Option<String>,
    pub expiry_error: Option<String>,
    pub notice: Option<String>,
}

/// Code input fragment (HTMX).
#[derive(Template)]
#[template(path = "gift_cards/_code_input.html")]
pub struct CodeInputTemplate {
    pub code: String,
    pub locked: bool,
    /// Re-post the form to the preview as soon as the input is swapped in.
    pub refresh_preview: bool,
}

/// Form input shared by create, edit and preview.
///
/// Missing fields count as empty. `expiry_enabled` is a checkbox and is only
/// present when ticked.
#[derive(Debug, Default, Deserialize)]
pub struct GiftCardFormInput {
    #[serde(default)]
    pub amount: String,
    pub currency: Option<CurrencyCode>,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
    pub expiry_enabled: Option<String>,
    #[serde(default)]
    pub expiry_date: String,
    /// `generate` regenerates the code instead of saving.
    pub intent: Option<String>,
}

impl GiftCardFormInput {
    fn wants_new_code(&self) -> bool {
        self.intent.as_deref() == Some("generate")
    }

    /// Replay the posted fields onto the controller.
    fn apply(self, controller: &mut GiftCardFormController<'_>) {
        controller.set_field(Field::Amount(self.amount));
        if let Some(currency) = self.currency {
            controller.set_field(Field::Currency(currency));
        }
        controller.set_field(Field::Code(self.code));
        controller.set_field(Field::Message(self.message));
        controller.set_field(Field::ExpiryEnabled(self.expiry_enabled.is_some()));
        controller.set_field(Field::ExpiryDate(self.expiry_date));
    }
}

/// Status change input.
#[derive(Debug, Deserialize)]
pub struct StatusInput {
    pub status: String,
}

fn form_page(
    controller: &GiftCardFormController<'_>,
    errors: Option<&ValidationErrors>,
    notice: Option<String>,
) -> Result<Html<String>, AppError> {
    let form = controller.form();
    let card = controller.card();

    let (title, action) = card.map_or_else(
        || ("New Gift Card".to_string(), "/gift-cards/new".to_string()),
        |card| {
            (
                format!("Edit Gift Card #{}", card.id),
                format!("/gift-cards/{}/edit", card.id),
            )
        },
    );

    let template = GiftCardFormTemplate {
        current_path: LISTING_PATH.to_string(),
        title,
        action,
        card_id: card.map(|c| c.id),
        status: card.map(|c| c.status.to_string()),
        status_label: card.map(|c| c.status.label()),
        locked: controller.is_locked(),
        amount: form.amount.clone(),
        currencies: CurrencyCode::ALL
            .iter()
            .map(|c| CurrencyOption {
                code: c.code(),
                symbol: c.symbol(),
                selected: *c == form.currency,
            })
            .collect(),
        code: form.code.clone(),
        refresh_preview: false,
        expiry_enabled: form.expiry_enabled,
        expiry_date: form.expiry_date.clone(),
        message_input_html: controller.message_input().render_html()?,
        preview_html: controller.preview().render()?,
        code_error: errors.and_then(|e| e.message_for(FormField::Code)),
        amount_error: errors.and_then(|e| e.message_for(FormField::Amount)),
        expiry_error: errors.and_then(|e| e.message_for(FormField::Expiry)),
        notice,
    };

    Ok(Html(template.render()?))
}

/// Save or regenerate, then answer with a redirect or the re-rendered form.
fn submit_or_render(
    mut controller: GiftCardFormController<'_>,
    input: GiftCardFormInput,
) -> Result<Response, AppError> {
    if input.wants_new_code() {
        input.apply(&mut controller);
        controller.generate_code();
        return Ok(form_page(&controller, None, None)?.into_response());
    }

    input.apply(&mut controller);
    match controller.submit() {
        Ok(submitted) => Ok(Redirect::to(&submitted.navigation.to).into_response()),
        Err(FormError::Validation(errors)) => {
            tracing::debug!(errors = %errors, "Gift card form rejected");
            let page = form_page(&controller, Some(&errors), None)?;
            Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response())
        }
        Err(err @ FormError::InvalidState { .. }) => {
            let page = form_page(&controller, None, Some(err.to_string()))?;
            Ok((StatusCode::CONFLICT, page).into_response())
        }
        Err(FormError::Store(e)) => Err(e.into()),
    }
}

/// Gift cards list page handler.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let offset = state.expiry_offset();
    let gift_cards = state
        .store()
        .list()?
        .iter()
        .map(|gc| GiftCardView::new(gc, offset))
        .collect();

    let template = GiftCardsIndexTemplate {
        current_path: LISTING_PATH.to_string(),
        gift_cards,
    };

    Ok(Html(template.render()?))
}

/// New gift card form handler.
#[instrument(skip(state))]
pub async fn new_gift_card(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let controller = GiftCardFormController::create(state.store(), state.expiry_offset());
    form_page(&controller, None, None)
}

/// Create gift card handler.
#[instrument(skip(state, input))]
pub async fn create(
    State(state): State<AppState>,
    Form(input): Form<GiftCardFormInput>,
) -> Result<Response, AppError> {
    let controller = GiftCardFormController::create(state.store(), state.expiry_offset());
    submit_or_render(controller, input)
}

/// Card ID from a URL segment. Segments that cannot name a card are `None`.
fn parse_card_id(raw: &str) -> Option<GiftCardId> {
    raw.parse().ok()
}

fn redirect_to_listing(raw_id: &str) -> Response {
    tracing::info!(gift_card_id = raw_id, "Gift card not found, redirecting to listing");
    Redirect::to(LISTING_PATH).into_response()
}

/// Edit gift card form handler. Unknown IDs go back to the listing.
#[instrument(skip(state))]
pub async fn edit(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Response, AppError> {
    let Some(id) = parse_card_id(&raw_id) else {
        return Ok(redirect_to_listing(&raw_id));
    };

    match GiftCardFormController::edit(state.store(), id, state.expiry_offset())? {
        EditLoad::Ready(controller) => Ok(form_page(&controller, None, None)?.into_response()),
        EditLoad::Redirect(navigation) => Ok(Redirect::to(&navigation.to).into_response()),
    }
}

/// Update gift card handler.
#[instrument(skip(state, input))]
pub async fn update(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Form(input): Form<GiftCardFormInput>,
) -> Result<Response, AppError> {
    let Some(id) = parse_card_id(&raw_id) else {
        return Ok(redirect_to_listing(&raw_id));
    };

    match GiftCardFormController::edit(state.store(), id, state.expiry_offset())? {
        EditLoad::Ready(controller) => submit_or_render(controller, input),
        EditLoad::Redirect(navigation) => Ok(Redirect::to(&navigation.to).into_response()),
    }
}

/// Status change handler (redeem, expire, reactivate).
#[instrument(skip(state))]
pub async fn set_status(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Form(input): Form<StatusInput>,
) -> Result<Redirect, AppError> {
    let status: GiftCardStatus = input
        .status
        .parse()
        .map_err(|e: giftdesk_core::UnknownStatus| AppError::BadRequest(e.to_string()))?;
    let id = parse_card_id(&raw_id)
        .ok_or_else(|| AppError::NotFound(format!("gift card {raw_id}")))?;

    let card = state.store().set_status(id, status).map_err(|e| match e {
        StoreError::NotFound(id) => AppError::NotFound(format!("gift card {id}")),
        other => other.into(),
    })?;
    tracing::info!(gift_card_id = %card.id, status = %card.status, "Gift card status changed");

    Ok(Redirect::to(LISTING_PATH))
}

/// Fresh code input (HTMX).
#[instrument]
pub async fn generated_code() -> Result<Html<String>, AppError> {
    let template = CodeInputTemplate {
        code: generate_code(),
        locked: false,
        refresh_preview: true,
    };
    Ok(Html(template.render()?))
}

/// Live preview of the posted form (HTMX).
#[instrument(skip(state, input))]
pub async fn preview(
    State(state): State<AppState>,
    Form(input): Form<GiftCardFormInput>,
) -> Result<Html<String>, AppError> {
    let mut controller = GiftCardFormController::create(state.store(), state.expiry_offset());
    input.apply(&mut controller);
    Ok(Html(controller.preview().render()?))
}

/// Gift card routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(LISTING_PATH, get(index))
        .route("/gift-cards/new", get(new_gift_card).post(create))
        .route("/gift-cards/code", get(generated_code))
        .route("/gift-cards/preview", post(preview))
        .route("/gift-cards/{id}/edit", get(edit).post(update))
        .route("/gift-cards/{id}/status", post(set_status))
}
