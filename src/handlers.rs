use crate::dashboard::{build_dashboard, DashboardView};
use crate::errors::{AppError, UploadError, MSG_NO_DATA};
use crate::models::{PopulationRow, Resultats, StoredPayload};
use crate::session::{session_cookie, session_id, SessionStore, KEY_DATA, KEY_RESULTATS};
use crate::state::AppState;
use crate::ui::{render_dashboard, render_index};
use crate::upstream::UploadedFile;
use crate::validation::{check_file_name, sanitize_file_name};
use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, State,
    },
    http::{header, HeaderMap, StatusCode},
    response::{AppendHeaders, Html, IntoResponse, Redirect, Response},
    Json,
};
use serde::de::DeserializeOwned;
use tracing::{error, info, warn};

pub const DASHBOARD_PATH: &str = "/dashboard";

pub async fn index() -> Html<String> {
    Html(render_index(None))
}

pub async fn upload_form(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    match accept_upload(&state, multipart).await {
        Ok(id) => (
            AppendHeaders([(header::SET_COOKIE, session_cookie(&id))]),
            Redirect::to(DASHBOARD_PATH),
        )
            .into_response(),
        Err(err) => (err.status(), Html(render_index(Some(&err.user_message())))).into_response(),
    }
}

pub async fn upload_api(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, AppError> {
    let id = accept_upload(&state, multipart).await?;
    let body = serde_json::json!({ "success": true, "redirect": DASHBOARD_PATH });
    Ok((AppendHeaders([(header::SET_COOKIE, session_cookie(&id))]), Json(body)).into_response())
}

pub async fn dashboard(State(state): State<AppState>, headers: HeaderMap) -> Html<String> {
    let view = load_dashboard(&state.sessions, &headers).await;
    Html(render_dashboard(view.as_ref()))
}

pub async fn get_results(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<DashboardView>, AppError> {
    load_dashboard(&state.sessions, &headers)
        .await
        .map(Json)
        .ok_or_else(|| AppError::not_found(MSG_NO_DATA))
}

/// Validates and forwards the file, then stores both keys under a fresh
/// session id. Returns that id.
async fn accept_upload(
    state: &AppState,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<String, UploadError> {
    let result = forward_upload(state, multipart).await;
    let payload = match result {
        Ok(payload) => payload,
        Err(err) => {
            match &err {
                UploadError::NoFile
                | UploadError::InvalidExtension { .. }
                | UploadError::TooLarge
                | UploadError::Malformed { .. } => warn!("upload rejected: {err}"),
                _ => error!("upload failed: {err}"),
            }
            return Err(err);
        }
    };

    let id = SessionStore::new_id();
    state.sessions.set_item(&id, KEY_RESULTATS, payload.resultats).await;
    state.sessions.set_item(&id, KEY_DATA, payload.data).await;
    Ok(id)
}

async fn forward_upload(
    state: &AppState,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<StoredPayload, UploadError> {
    let mut multipart = multipart.map_err(|rejection| UploadError::Malformed {
        message: rejection.body_text(),
    })?;
    let file = read_file_field(&mut multipart).await?;
    info!(file = %file.name, bytes = file.bytes.len(), "forwarding upload");
    state.upstream.submit(&file).await
}

async fn read_file_field(multipart: &mut Multipart) -> Result<UploadedFile, UploadError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some("file") {
            continue;
        }
        let original = field.file_name().map(str::to_owned);
        let name = sanitize_file_name(check_file_name(original.as_deref())?);
        let bytes = field.bytes().await.map_err(multipart_error)?;
        return Ok(UploadedFile { name, bytes });
    }
    Err(UploadError::NoFile)
}

fn multipart_error(err: MultipartError) -> UploadError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        UploadError::TooLarge
    } else {
        UploadError::Malformed {
            message: err.body_text(),
        }
    }
}

/// Both keys must be present and readable, otherwise the empty state is shown.
pub async fn load_dashboard(sessions: &SessionStore, headers: &HeaderMap) -> Option<DashboardView> {
    let id = session_id(headers)?;
    let resultats = sessions.get_item(&id, KEY_RESULTATS).await?;
    let data = sessions.get_item(&id, KEY_DATA).await?;

    let resultats: Resultats = parse_stored(KEY_RESULTATS, &resultats)?;
    let rows: Vec<PopulationRow> = parse_stored(KEY_DATA, &data)?;
    Some(build_dashboard(&resultats, &rows))
}

fn parse_stored<T: DeserializeOwned>(key: &str, raw: &str) -> Option<T> {
    match serde_json::from_str(raw) {
        Ok(value) => Some(value),
        Err(err) => {
            warn!("stored {key} is unreadable: {err}");
            None
        }
    }
}
