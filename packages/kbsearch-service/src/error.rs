pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Unauthorized: {message}")]
	Auth { message: String },
	#[error("Not found: {message}")]
	NotFound { message: String },
	#[error("Malformed payload: {message}")]
	MalformedPayload { message: String },
	#[error("QA service error: {message}")]
	RemoteService { message: String },
	/// `fields` names the offending request fields, when known.
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String, fields: Vec<String> },
	#[error("Storage error: {message}")]
	Storage { message: String },
}
impl Error {
	pub(crate) fn invalid_field(field: &str, message: impl Into<String>) -> Self {
		Self::InvalidRequest { message: message.into(), fields: vec![field.to_string()] }
	}
}

impl From<kbsearch_storage::Error> for Error {
	fn from(err: kbsearch_storage::Error) -> Self {
		match err {
			kbsearch_storage::Error::Sqlx(inner) => Self::Storage { message: inner.to_string() },
			kbsearch_storage::Error::InvalidArgument(message) =>
				Self::InvalidRequest { message, fields: Vec::new() },
			err @ kbsearch_storage::Error::CorruptRow { .. } =>
				Self::MalformedPayload { message: err.to_string() },
		}
	}
}

impl From<kbsearch_providers::Error> for Error {
	fn from(err: kbsearch_providers::Error) -> Self {
		Self::RemoteService { message: err.to_string() }
	}
}

impl From<kbsearch_domain::Error> for Error {
	fn from(err: kbsearch_domain::Error) -> Self {
		Self::MalformedPayload { message: err.to_string() }
	}
}
