use crate::admin::{AdminError, AdminService, AdminSuccess};
use crate::flash::{session_cookie, session_from_jar};
use crate::models::{AdminForm, AdminQuery};
use crate::normalize::normalize;
use crate::render::{admin_edit_link, admin_page, AdminPage};
use crate::routes;
use crate::state::AppState;
use crate::store::find_index;
use crate::word_bank::load_word_bank;
use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::cookie::CookieJar;
use uuid::Uuid;

/// Where the browser goes after a submission, and what it is told there
#[derive(Debug, PartialEq, Eq)]
struct SubmitOutcome {
    message: Option<String>,
    location: String,
}

impl SubmitOutcome {
    fn back(message: Option<String>) -> Self {
        Self {
            message,
            location: routes::ADMIN.to_string(),
        }
    }

    fn edit(message: String, path: &str) -> Self {
        Self {
            message: Some(message),
            location: admin_edit_link(path),
        }
    }
}

/// GET /admin handler - Back office page
///
/// Shows the pending flash message for this client (once), the create or
/// edit form and the route table. `?edit=<path>` opens a stored route in
/// the form; an unknown path falls back to the create form.
pub async fn admin_page_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<AdminQuery>,
) -> Html<String> {
    let flash = session_from_jar(&jar).and_then(|session| state.flash.take(session));
    let all_routes = state.admin.list().await;
    let editing = query
        .edit
        .as_deref()
        .map(normalize)
        .and_then(|path| find_index(&all_routes, &path))
        .map(|index| &all_routes[index]);
    let words = load_word_bank(state.config.word_bank_file.as_deref()).await;

    Html(admin_page(&AdminPage {
        flash: flash.as_deref(),
        editing,
        routes: &all_routes,
        words: &words,
    }))
}

/// POST /admin handler - Create, update or delete a route
///
/// Always answers 303 See Other. The status message is parked in the flash
/// slot for this client, issuing the session cookie on first use.
pub async fn admin_submit_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<AdminForm>,
) -> Response {
    let (session, jar) = match session_from_jar(&jar) {
        Some(session) => (session, jar),
        None => {
            let session = Uuid::new_v4();
            (session, jar.add(session_cookie(session, routes::ADMIN)))
        }
    };

    let outcome = apply_submission(&state.admin, &form).await;
    if let Some(message) = outcome.message {
        state.flash.put(session, message);
    }

    (jar, Redirect::to(&outcome.location)).into_response()
}

async fn apply_submission(admin: &AdminService, form: &AdminForm) -> SubmitOutcome {
    match form.action.as_str() {
        "delete" => match admin.delete(&form.target_path).await {
            Ok(success) => SubmitOutcome::back(success.status_message()),
            Err(err) => failed(err),
        },
        "create" => {
            let result = match form.route_input() {
                Ok(input) => admin.create(input).await,
                Err(err) => Err(AdminError::from(err)),
            };
            match result {
                Ok(success) => succeeded(success),
                Err(AdminError::Conflict) => {
                    SubmitOutcome::edit(AdminError::Conflict.status_message(), &normalize(&form.path))
                }
                Err(err) => failed(err),
            }
        }
        "update" => {
            let result = match form.route_input() {
                Ok(input) => admin.update(&form.original_path, input).await,
                Err(err) => Err(AdminError::from(err)),
            };
            match result {
                Ok(success) => succeeded(success),
                Err(err @ (AdminError::Validation(_) | AdminError::Conflict)) => {
                    SubmitOutcome::edit(err.status_message(), &normalize(&form.original_path))
                }
                Err(err) => failed(err),
            }
        }
        other => {
            tracing::warn!("Ignoring admin submission with unknown action {:?}", other);
            SubmitOutcome::back(Some("Unknown action.".to_string()))
        }
    }
}

fn succeeded(success: AdminSuccess) -> SubmitOutcome {
    SubmitOutcome::back(success.status_message())
}

fn failed(err: AdminError) -> SubmitOutcome {
    if let AdminError::Storage(ref cause) = err {
        tracing::error!("Admin operation failed: {:#}", cause);
    } else {
        tracing::info!("Admin operation rejected: {}", err);
    }
    SubmitOutcome::back(Some(err.status_message()))
}
