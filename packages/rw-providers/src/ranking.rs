use std::time::Duration;

use reqwest::{Client, header::HeaderMap};
use serde_json::Value;

use crate::{Error, Result};

/// Reads a user's global ranking from a LeetCode-compatible GraphQL endpoint.
#[derive(Debug, Clone)]
pub struct RankClient {
	client: Client,
	endpoint: String,
	headers: HeaderMap,
}
impl RankClient {
	pub fn new(cfg: &rw_config::SourceConfig) -> Result<Self> {
		let mut builder = Client::builder();

		if let Some(timeout_ms) = cfg.timeout_ms {
			builder = builder.timeout(Duration::from_millis(timeout_ms));
		}

		let client = builder.build()?;
		let headers = crate::request_headers(&cfg.default_headers)?;

		Ok(Self { client, endpoint: cfg.endpoint(), headers })
	}

	pub fn endpoint(&self) -> &str {
		&self.endpoint
	}

	pub async fn fetch_rank(&self, username: &str) -> Result<i64> {
		let body = serde_json::json!({ "query": build_query(username) });
		let res = self
			.client
			.post(&self.endpoint)
			.headers(self.headers.clone())
			.json(&body)
			.send()
			.await?;
		let bytes = res.error_for_status()?.bytes().await?;
		let json: Value = serde_json::from_slice(&bytes)?;

		parse_ranking_response(username, json)
	}
}

/// The username is embedded verbatim; callers only pass validated config values.
pub fn build_query(username: &str) -> String {
	format!(
		"{{ matchedUser(username: \"{username}\") {{ username profile {{ ranking }} }} }}"
	)
}

pub fn parse_ranking_response(username: &str, json: Value) -> Result<i64> {
	let matched = json
		.get("data")
		.and_then(|data| data.get("matchedUser"))
		.filter(|user| !user.is_null());
	let Some(matched) = matched else {
		return Err(Error::UserNotFound { username: username.to_string(), response: json });
	};
	let ranking = matched
		.get("profile")
		.and_then(|profile| profile.get("ranking"))
		.ok_or_else(|| Error::InvalidResponse {
			message: "Ranking response is missing data.matchedUser.profile.ranking.".to_string(),
		})?;

	ranking.as_i64().ok_or_else(|| Error::InvalidResponse {
		message: format!("Ranking must be an integer, got {ranking}."),
	})
}
