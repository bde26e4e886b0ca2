use std::time::Duration;

use serde::Deserialize;
use serde_json::{Map, Value};

pub const DEFAULT_INTERVAL_SECS: u64 = 6 * 60 * 60;
/// One year. Longer intervals are rejected at load time.
pub const MAX_INTERVAL_SECS: u64 = 366 * 24 * 60 * 60;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	pub source: SourceConfig,
	pub tracker: Tracker,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub log_level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Storage {
	pub postgres: Postgres,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
}

/// Upstream GraphQL endpoint the ranking is read from.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
	pub api_base: String,
	pub path: String,
	/// Optional. Falls back to the HTTP client's defaults when unset.
	#[serde(default)]
	pub timeout_ms: Option<u64>,
	/// Optional. Extra headers sent with every request; values must be strings.
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}
impl SourceConfig {
	pub fn endpoint(&self) -> String {
		format!("{}{}", self.api_base, self.path)
	}
}

#[derive(Debug, Clone, Deserialize)]
pub struct Tracker {
	pub username: String,
	#[serde(default = "default_interval_secs")]
	pub interval_secs: u64,
	#[serde(default)]
	pub fetch_on_start: bool,
	/// Embed the scheduler in the API process.
	#[serde(default = "default_enabled")]
	pub enabled: bool,
}
impl Tracker {
	pub fn interval(&self) -> Duration {
		Duration::from_secs(self.interval_secs)
	}
}

fn default_interval_secs() -> u64 {
	DEFAULT_INTERVAL_SECS
}

fn default_enabled() -> bool {
	true
}
