use axum::{
	Json, Router,
	extract::{Path, Query, State},
	http::{HeaderMap, StatusCode, header},
	response::{IntoResponse, Response},
	routing::get,
};
use serde::Serialize;

use pace_domain::Caller;
use pace_service::{
	AverageDistance, AverageQuery, Error as ServiceError, NewRecordRequest, RecordItem,
	RecordPage, RecordQuery, UserItem, UserRoleUpdate,
};

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/v1/records", get(list_records).post(create_record))
		.route("/v1/records/{id}", get(fetch_record).delete(delete_record))
		.route("/v1/records/distance/{user_id}", get(average_distance))
		.route("/v1/users", get(list_users))
		.route("/v1/users/{id}", get(fetch_user).patch(update_user_role).delete(delete_user))
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn list_records(
	State(state): State<AppState>,
	headers: HeaderMap,
	Query(query): Query<RecordQuery>,
) -> Result<Json<RecordPage>, ApiError> {
	let caller = authenticate(&state, &headers).await?;
	let page = state.service.list_records(&caller, query).await?;

	Ok(Json(page))
}

async fn create_record(
	State(state): State<AppState>,
	headers: HeaderMap,
	Json(payload): Json<NewRecordRequest>,
) -> Result<(StatusCode, Json<RecordItem>), ApiError> {
	let caller = authenticate(&state, &headers).await?;
	let record = state.service.create_record(&caller, payload).await?;

	Ok((StatusCode::CREATED, Json(record)))
}

async fn fetch_record(
	State(state): State<AppState>,
	headers: HeaderMap,
	Path(id): Path<i64>,
) -> Result<Json<RecordItem>, ApiError> {
	let caller = authenticate(&state, &headers).await?;
	let record = state.service.fetch_record(&caller, id).await?;

	Ok(Json(record))
}

async fn delete_record(
	State(state): State<AppState>,
	headers: HeaderMap,
	Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
	let caller = authenticate(&state, &headers).await?;

	state.service.delete_record(&caller, id).await?;

	Ok(StatusCode::NO_CONTENT)
}

async fn average_distance(
	State(state): State<AppState>,
	headers: HeaderMap,
	Path(user_id): Path<i64>,
	Query(query): Query<AverageQuery>,
) -> Result<Json<AverageDistance>, ApiError> {
	let caller = authenticate(&state, &headers).await?;
	let average = state.service.average_distance(&caller, user_id, query).await?;

	Ok(Json(average))
}

async fn list_users(
	State(state): State<AppState>,
	headers: HeaderMap,
) -> Result<Json<Vec<UserItem>>, ApiError> {
	let caller = authenticate(&state, &headers).await?;
	let users = state.service.list_users(&caller).await?;

	Ok(Json(users))
}

async fn fetch_user(
	State(state): State<AppState>,
	headers: HeaderMap,
	Path(id): Path<i64>,
) -> Result<Json<UserItem>, ApiError> {
	let caller = authenticate(&state, &headers).await?;
	let user = state.service.fetch_user(&caller, id).await?;

	Ok(Json(user))
}

async fn update_user_role(
	State(state): State<AppState>,
	headers: HeaderMap,
	Path(id): Path<i64>,
	Json(payload): Json<UserRoleUpdate>,
) -> Result<Json<UserItem>, ApiError> {
	let caller = authenticate(&state, &headers).await?;
	let user = state.service.update_user_role(&caller, id, payload).await?;

	Ok(Json(user))
}

async fn delete_user(
	State(state): State<AppState>,
	headers: HeaderMap,
	Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
	let caller = authenticate(&state, &headers).await?;

	state.service.delete_user(&caller, id).await?;

	Ok(StatusCode::NO_CONTENT)
}

async fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<Caller, ApiError> {
	let caller = state.service.authenticate(bearer_token(headers)).await?;

	Ok(caller)
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
	headers.get(header::AUTHORIZATION)?.to_str().ok()?.strip_prefix("Bearer ")
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
}

impl ApiError {
	fn new(status: StatusCode, error_code: impl Into<String>, message: impl Into<String>) -> Self {
		Self { status, error_code: error_code.into(), message: message.into() }
	}
}

impl From<ServiceError> for ApiError {
	fn from(err: ServiceError) -> Self {
		match &err {
			ServiceError::Unauthenticated =>
				Self::new(StatusCode::UNAUTHORIZED, "unauthenticated", err.to_string()),
			ServiceError::Validation { .. } =>
				Self::new(StatusCode::BAD_REQUEST, "validation_error", err.to_string()),
			ServiceError::MalformedExpression =>
				Self::new(StatusCode::BAD_REQUEST, "malformed_expression", err.to_string()),
			ServiceError::UnknownField { .. } =>
				Self::new(StatusCode::BAD_REQUEST, "unknown_field", err.to_string()),
			ServiceError::InvalidFieldValue { .. } =>
				Self::new(StatusCode::BAD_REQUEST, "invalid_field_value", err.to_string()),
			ServiceError::WeatherLookupFailed { .. } =>
				Self::new(StatusCode::BAD_GATEWAY, "weather_lookup_failed", err.to_string()),
			ServiceError::NotFound =>
				Self::new(StatusCode::NOT_FOUND, "not_found", err.to_string()),
			ServiceError::Storage { message } => {
				tracing::error!(%message, "Storage failure while serving a request.");

				Self::new(StatusCode::INTERNAL_SERVER_ERROR, "storage_error", "Storage failure.")
			},
		}
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body = ErrorBody { error_code: self.error_code, message: self.message };

		(self.status, Json(body)).into_response()
	}
}
