//! Record Routes
//!
//! The same family of page routes for every entity type `E`, where `e` is
//! `E::NAME` and `es` is `E::PLURAL`:
//!
//! - GET /e/list, GET /es - List all records
//! - GET /e/:id - Show one record
//! - GET /e/new - Blank form
//! - POST /e/new - Create from form input
//! - GET /e/edit/:id - Pre-populated form (owner only)
//! - POST /e/edit/:id - Update from form input (owner only)
//! - GET /e/delete/:id - Delete (owner only), then list what remains
//!
//! Forms are `application/x-www-form-urlencoded`. Successful writes answer
//! with a `303` to the record's page.

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Form, Router,
};
use axum_extra::extract::CookieJar;
use serde_json::{json, Value};

use super::flash;
use crate::forms::FormData;
use crate::models::{CurrentUser, Entity, Record};
use crate::services::crud::edit_denied_notice;
use crate::services::{FormOutcome, FormState, Page};
use crate::{AppState, Result};

/// Build the route family for entity `E`.
pub fn routes<E: Entity>() -> Router<AppState> {
    let base = format!("/{}", E::NAME);

    Router::new()
        .route(&format!("{}/list", base), get(list::<E>))
        .route(&format!("/{}", E::PLURAL), get(list::<E>))
        .route(&format!("{}/new", base), get(new_form::<E>).post(create::<E>))
        .route(
            &format!("{}/edit/:id", base),
            get(edit_form::<E>).post(update::<E>),
        )
        .route(&format!("{}/delete/:id", base), get(delete::<E>))
        .route(&format!("{}/:id", base), get(view::<E>))
}

/// Path of the detail page for a record.
pub fn record_path<E: Entity>(id: &str) -> String {
    format!("/{}/{}", E::NAME, urlencoding::encode(id))
}

// ============================================================================
// Handlers
// ============================================================================

async fn list<E: Entity>(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    jar: CookieJar,
) -> Result<Response> {
    let records = state.controller::<E>().list(&user).await?;
    let (jar, flashes) = flash::take(jar);

    let page = list_page::<E>(&user, &records, flashes)?;
    Ok((jar, state.renderer.render(page)).into_response())
}

async fn view<E: Entity>(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    jar: CookieJar,
) -> Result<Response> {
    let record = state.controller::<E>().view(&user, &id).await?;
    let (jar, flashes) = flash::take(jar);

    let mut context = base_context::<E>(&user, flashes);
    context["is_owner"] = json!(record.is_owned_by(&user.user_id));
    context[E::NAME] = serde_json::to_value(&record)?;

    let page = Page::new(E::NAME, context);
    Ok((jar, state.renderer.render(page)).into_response())
}

async fn new_form<E: Entity>(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Response> {
    let outcome = state.controller::<E>().create(&user, None).await?;
    respond::<E>(&state, &user, None, outcome, CookieJar::new())
}

async fn create<E: Entity>(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Form(input): Form<FormData>,
) -> Result<Response> {
    let outcome = state.controller::<E>().create(&user, Some(&input)).await?;
    respond::<E>(&state, &user, None, outcome, CookieJar::new())
}

async fn edit_form<E: Entity>(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    jar: CookieJar,
) -> Result<Response> {
    let outcome = state.controller::<E>().edit(&user, &id, None).await?;
    respond::<E>(&state, &user, Some(&id), outcome, jar)
}

async fn update<E: Entity>(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    jar: CookieJar,
    Form(input): Form<FormData>,
) -> Result<Response> {
    let outcome = state.controller::<E>().edit(&user, &id, Some(&input)).await?;
    respond::<E>(&state, &user, Some(&id), outcome, jar)
}

async fn delete<E: Entity>(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<Response> {
    let outcome = state.controller::<E>().delete(&user, &id).await?;

    let mut page = list_page::<E>(&user, &outcome.remaining, vec![outcome.notice])?;
    page.context["deleted"] = json!(outcome.deleted);
    Ok(state.renderer.render(page))
}

// ============================================================================
// Helpers
// ============================================================================

/// Turn a new/edit outcome into a response.
fn respond<E: Entity>(
    state: &AppState,
    user: &CurrentUser,
    record_id: Option<&str>,
    outcome: FormOutcome<E>,
    jar: CookieJar,
) -> Result<Response> {
    match outcome {
        FormOutcome::Saved(record) => Ok(Redirect::to(&record_path::<E>(&record.id)).into_response()),
        FormOutcome::Render(form) => {
            let page = form_page::<E>(user, record_id, &form);
            Ok(state.renderer.render(page))
        }
        FormOutcome::Denied => {
            // Denied is only produced for an existing record
            let id = record_id.unwrap_or_default();
            let jar = flash::push(jar, &edit_denied_notice::<E>());
            Ok((jar, Redirect::to(&record_path::<E>(id))).into_response())
        }
    }
}

fn base_context<E: Entity>(user: &CurrentUser, flashes: Vec<String>) -> Value {
    json!({
        "entity": {
            "name": E::NAME,
            "plural": E::PLURAL,
            "label": E::LABEL,
            "fields": E::FIELDS,
        },
        "current_user": user,
        "flashes": flashes,
    })
}

fn list_page<E: Entity>(
    user: &CurrentUser,
    records: &[Record<E>],
    flashes: Vec<String>,
) -> Result<Page> {
    let mut context = base_context::<E>(user, flashes);
    context[E::PLURAL] = serde_json::to_value(records)?;
    Ok(Page::new(E::PLURAL, context))
}

fn form_page<E: Entity>(user: &CurrentUser, record_id: Option<&str>, form: &FormState) -> Page {
    let mut context = base_context::<E>(user, Vec::new());
    context["form"] = json!(form);
    context["record_id"] = json!(record_id);

    let status = if form.has_errors() {
        StatusCode::UNPROCESSABLE_ENTITY
    } else {
        StatusCode::OK
    };

    Page::new(format!("{}form", E::NAME), context).with_status(status)
}
