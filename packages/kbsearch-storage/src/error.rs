#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Sqlx(#[from] sqlx::Error),
	#[error("Invalid argument: {0}")]
	InvalidArgument(String),
	#[error("Corrupt kb_info row {kb_id}: {source}")]
	CorruptRow { kb_id: String, source: kbsearch_domain::Error },
}
