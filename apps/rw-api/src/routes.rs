use axum::{
	Json, Router,
	extract::State,
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::get,
};
use serde::Serialize;
use serde_json::Value;

use rw_service::{FetchNowResponse, HistoryResponse, RankResponse};

use crate::state::AppState;

pub const RANK_PATH: &str = "/api/rank";
pub const FETCH_NOW_PATH: &str = "/api/fetch-now";
pub const HISTORY_PATH: &str = "/api/rank/history";

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/", get(home))
		.route("/health", get(health))
		.route(RANK_PATH, get(rank))
		.route(FETCH_NOW_PATH, get(fetch_now))
		.route(HISTORY_PATH, get(history))
		.with_state(state)
}

#[derive(Debug, Serialize)]
struct HomeResponse {
	message: &'static str,
	endpoints: Endpoints,
}

#[derive(Debug, Serialize)]
struct Endpoints {
	get_rank: &'static str,
	fetch_now: &'static str,
	rank_history: &'static str,
}

async fn home() -> Json<HomeResponse> {
	Json(HomeResponse {
		message: "Welcome to the LeetCode Rank API",
		endpoints: Endpoints {
			get_rank: RANK_PATH,
			fetch_now: FETCH_NOW_PATH,
			rank_history: HISTORY_PATH,
		},
	})
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn rank(State(state): State<AppState>) -> Result<Json<RankResponse>, ApiError> {
	let response = state.service.latest().await.map_err(ApiError::retrieval)?;

	Ok(Json(response))
}

async fn fetch_now(State(state): State<AppState>) -> Result<Json<FetchNowResponse>, ApiError> {
	let response = state.service.fetch_now().await?;

	Ok(Json(response))
}

async fn history(State(state): State<AppState>) -> Result<Json<HistoryResponse>, ApiError> {
	let response = state.service.history().await?;

	Ok(Json(response))
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum ErrorBody {
	Retrieval {
		error: &'static str,
		details: String,
	},
	Failure {
		success: bool,
		message: String,
		#[serde(skip_serializing_if = "Option::is_none")]
		response: Option<Value>,
	},
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	body: ErrorBody,
}
impl ApiError {
	/// Read-path failure on `/api/rank`, reported as `{error, details}`.
	fn retrieval(err: rw_service::Error) -> Self {
		tracing::error!(error = %err, "Failed to retrieve rank data.");

		Self {
			status: StatusCode::INTERNAL_SERVER_ERROR,
			body: ErrorBody::Retrieval {
				error: "Failed to retrieve rank data",
				details: err.to_string(),
			},
		}
	}

	fn failure(status: StatusCode, message: impl Into<String>, response: Option<Value>) -> Self {
		Self {
			status,
			body: ErrorBody::Failure { success: false, message: message.into(), response },
		}
	}
}

impl From<rw_service::Error> for ApiError {
	fn from(err: rw_service::Error) -> Self {
		match err {
			rw_service::Error::UserNotFound { username, response } => {
				tracing::warn!(%username, "Upstream returned no matched user.");

				Self::failure(
					StatusCode::BAD_REQUEST,
					"Failed to fetch LeetCode data",
					Some(response),
				)
			},
			other => {
				tracing::error!(error = %other, "Rank request failed.");

				Self::failure(StatusCode::INTERNAL_SERVER_ERROR, other.to_string(), None)
			},
		}
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		(self.status, Json(self.body)).into_response()
	}
}
