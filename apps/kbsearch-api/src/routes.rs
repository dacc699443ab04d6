use axum::{
	Json, Router,
	extract::{Query, State},
	http::{HeaderMap, StatusCode, header::AUTHORIZATION},
	response::{IntoResponse, Response},
	routing::{get, post},
};
use serde::{Deserialize, Serialize};

use crate::state::AppState;
use kbsearch_domain::{KbInfo, SelectedSearchResult};
use kbsearch_service::{
	DeleteKbRequest, DeleteKbResponse, Error, ListKbsRequest, ListKbsResponse, ResultCardRequest,
	SearchRequest, SearchResponse, UpsertKbResponse, auth,
};

pub const SESSION_HEADER: &str = "x-session-id";

#[derive(Debug, Default, Deserialize)]
struct TokenQuery {
	token: Option<String>,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
	fields: Option<Vec<String>>,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
	fields: Option<Vec<String>>,
}
impl ApiError {
	fn new(
		status: StatusCode,
		error_code: impl Into<String>,
		message: impl Into<String>,
		fields: Option<Vec<String>>,
	) -> Self {
		Self { status, error_code: error_code.into(), message: message.into(), fields }
	}
}
impl From<Error> for ApiError {
	fn from(err: Error) -> Self {
		match err {
			Error::Auth { message } =>
				ApiError::new(StatusCode::UNAUTHORIZED, "unauthorized", message, None),
			Error::NotFound { message } =>
				ApiError::new(StatusCode::NOT_FOUND, "not_found", message, None),
			Error::MalformedPayload { message } =>
				ApiError::new(StatusCode::BAD_GATEWAY, "malformed_payload", message, None),
			Error::RemoteService { message } =>
				ApiError::new(StatusCode::BAD_GATEWAY, "remote_service_error", message, None),
			Error::InvalidRequest { message, fields } => ApiError::new(
				StatusCode::BAD_REQUEST,
				"invalid_request",
				message,
				Some(fields).filter(|fields| !fields.is_empty()),
			),
			Error::Storage { message } => {
				tracing::error!(error = %message, "Knowledge base store failure.");

				ApiError::new(
					StatusCode::INTERNAL_SERVER_ERROR,
					"storage_error",
					"Knowledge base store is unavailable.",
					None,
				)
			},
		}
	}
}
impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body =
			ErrorBody { error_code: self.error_code, message: self.message, fields: self.fields };

		(self.status, Json(body)).into_response()
	}
}

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/v1/kbs", get(list_kbs))
		.route("/v1/search", post(search))
		.route("/v1/result_card", post(result_card))
		.with_state(state)
}

pub fn admin_router(state: AppState) -> Router {
	Router::new()
		.route("/v1/admin/kbs", post(upsert_kb))
		.route("/v1/admin/kbs/delete", post(delete_kb))
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn list_kbs(
	State(state): State<AppState>,
	headers: HeaderMap,
	Query(query): Query<TokenQuery>,
) -> Result<Json<ListKbsResponse>, ApiError> {
	let token = caller_token(&headers, query.token.as_deref());
	let response = state.service.list_kbs(ListKbsRequest { token }).await?;

	Ok(Json(response))
}

async fn search(
	State(state): State<AppState>,
	headers: HeaderMap,
	Json(mut payload): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
	payload.token = caller_token(&headers, payload.token.as_deref());
	payload.session_id = session_id(&headers);

	let response = state.service.search(payload).await?;

	Ok(Json(response))
}

async fn result_card(
	State(state): State<AppState>,
	headers: HeaderMap,
	Json(mut payload): Json<ResultCardRequest>,
) -> Result<Json<SelectedSearchResult>, ApiError> {
	payload.token = caller_token(&headers, payload.token.as_deref());
	payload.session_id = session_id(&headers);

	let response = state.service.result_card(payload)?;

	Ok(Json(response))
}

async fn upsert_kb(
	State(state): State<AppState>,
	Json(payload): Json<KbInfo>,
) -> Result<Json<UpsertKbResponse>, ApiError> {
	let response = state.service.upsert_kb(payload).await?;

	Ok(Json(response))
}

async fn delete_kb(
	State(state): State<AppState>,
	Json(payload): Json<DeleteKbRequest>,
) -> Result<Json<DeleteKbResponse>, ApiError> {
	let response = state.service.delete_kb(payload).await?;

	Ok(Json(response))
}

fn caller_token(headers: &HeaderMap, explicit: Option<&str>) -> Option<String> {
	let authorization = headers.get(AUTHORIZATION).and_then(|value| value.to_str().ok());

	auth::resolve_token(explicit, authorization)
}

fn session_id(headers: &HeaderMap) -> Option<String> {
	headers
		.get(SESSION_HEADER)
		.and_then(|value| value.to_str().ok())
		.map(str::trim)
		.filter(|value| !value.is_empty())
		.map(str::to_string)
}
