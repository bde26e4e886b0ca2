mod error;
mod types;

pub use error::{Error, Result};
pub use types::{
	Config, DEFAULT_INTERVAL_SECS, MAX_INTERVAL_SECS, Postgres, Service, SourceConfig, Storage,
	Tracker,
};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}
	if cfg.storage.postgres.dsn.trim().is_empty() {
		return Err(Error::Validation {
			message: "storage.postgres.dsn must be non-empty.".to_string(),
		});
	}
	if cfg.storage.postgres.pool_max_conns == 0 {
		return Err(Error::Validation {
			message: "storage.postgres.pool_max_conns must be greater than zero.".to_string(),
		});
	}
	if !cfg.source.api_base.starts_with("http://") && !cfg.source.api_base.starts_with("https://")
	{
		return Err(Error::Validation {
			message: "source.api_base must start with http:// or https://.".to_string(),
		});
	}
	if !cfg.source.path.starts_with('/') {
		return Err(Error::Validation { message: "source.path must start with /.".to_string() });
	}
	if let Some(timeout_ms) = cfg.source.timeout_ms
		&& timeout_ms == 0
	{
		return Err(Error::Validation {
			message: "source.timeout_ms must be greater than zero.".to_string(),
		});
	}

	for (key, value) in &cfg.source.default_headers {
		if !value.is_string() {
			return Err(Error::Validation {
				message: format!("source.default_headers.{key} must be a string."),
			});
		}
	}

	if cfg.tracker.username.is_empty() {
		return Err(Error::Validation {
			message: "tracker.username must be non-empty.".to_string(),
		});
	}
	// The username is spliced into the GraphQL document as-is.
	if !cfg
		.tracker
		.username
		.chars()
		.all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '.'))
	{
		return Err(Error::Validation {
			message: "tracker.username may only contain ASCII letters, digits, '-', '_', or '.'."
				.to_string(),
		});
	}
	if cfg.tracker.interval_secs == 0 {
		return Err(Error::Validation {
			message: "tracker.interval_secs must be greater than zero.".to_string(),
		});
	}
	if cfg.tracker.interval_secs > MAX_INTERVAL_SECS {
		return Err(Error::Validation {
			message: format!("tracker.interval_secs must be at most {MAX_INTERVAL_SECS}."),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	cfg.tracker.username = cfg.tracker.username.trim().to_string();
	cfg.source.api_base = cfg.source.api_base.trim().trim_end_matches('/').to_string();
	cfg.source.path = cfg.source.path.trim().to_string();

	if cfg.service.log_level.trim().is_empty() {
		cfg.service.log_level = "info".to_string();
	}
}
