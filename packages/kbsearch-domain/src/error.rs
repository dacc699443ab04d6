pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Answer payload is not valid JSON: {0}")]
	PayloadJson(#[from] serde_json::Error),
	#[error("Answer payload must be a JSON object, got {kind}.")]
	PayloadNotObject { kind: &'static str },
	#[error("Unknown ranker type {0:?}.")]
	UnknownRankerType(String),
	#[error("Unknown knowledge base field {0:?}.")]
	UnknownKbField(String),
}
