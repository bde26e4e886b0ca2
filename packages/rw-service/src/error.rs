use serde_json::Value;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Upstream fetch failed: {message}")]
	Fetch { message: String },
	#[error("No matched user for {username:?}.")]
	UserNotFound { username: String, response: Value },
	#[error("Storage error: {message}")]
	Storage { message: String },
}
impl From<rw_providers::Error> for Error {
	fn from(err: rw_providers::Error) -> Self {
		match err {
			rw_providers::Error::UserNotFound { username, response } =>
				Self::UserNotFound { username, response },
			other => Self::Fetch { message: other.to_string() },
		}
	}
}

impl From<rw_storage::Error> for Error {
	fn from(err: rw_storage::Error) -> Self {
		match err {
			rw_storage::Error::Sqlx(inner) => Self::Storage { message: inner.to_string() },
			rw_storage::Error::InvalidArgument(message) => Self::Storage { message },
		}
	}
}
