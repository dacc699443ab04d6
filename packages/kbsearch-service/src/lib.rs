pub mod auth;
pub mod kbs;
pub mod result_card;
pub mod search;
pub mod session;

mod error;

pub use auth::{JwtValidator, Principal};
pub use error::{Error, Result};
pub use kbs::{
	DeleteKbRequest, DeleteKbResponse, KbSummary, ListKbsRequest, ListKbsResponse,
	UpsertKbResponse,
};
pub use result_card::ResultCardRequest;
pub use search::{SearchRequest, SearchResponse};
pub use session::MemorySessionStore;

use std::{future::Future, pin::Pin, sync::Arc};

use kbsearch_config::{Config, QnaProviderConfig, Security};
use kbsearch_domain::{KbField, KbInfo};
use kbsearch_providers::qna::{self, GenerateAnswerRequest, GenerateAnswerResponse};
use kbsearch_storage::{db::Db, queries};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// The hosted question-answering service.
pub trait QnaProvider
where
	Self: Send + Sync,
{
	fn generate_answer<'a>(
		&'a self,
		cfg: &'a QnaProviderConfig,
		kb_id: &'a str,
		req: &'a GenerateAnswerRequest,
	) -> BoxFuture<'a, Result<GenerateAnswerResponse>>;
}

/// Knowledge base metadata, keyed by kb id.
pub trait KbStore
where
	Self: Send + Sync,
{
	fn get_kb_info<'a>(&'a self, kb_id: &'a str) -> BoxFuture<'a, Result<Option<KbInfo>>>;

	fn list_kbs<'a>(&'a self, fields: &'a [KbField]) -> BoxFuture<'a, Result<Vec<KbInfo>>>;

	fn upsert_kb<'a>(&'a self, info: &'a KbInfo) -> BoxFuture<'a, Result<()>>;

	fn delete_kb<'a>(&'a self, kb_id: &'a str) -> BoxFuture<'a, Result<bool>>;
}

pub trait TokenValidator
where
	Self: Send + Sync,
{
	fn validate(&self, cfg: &Security, token: &str) -> Result<Principal>;
}

/// Per-caller state carried between a search and the result card that follows it.
pub trait SessionStore
where
	Self: Send + Sync,
{
	fn set_list_url(&self, session_key: &str, list_url: String);

	fn list_url(&self, session_key: &str) -> Option<String>;
}

#[derive(Clone)]
pub struct Providers {
	pub qna: Arc<dyn QnaProvider>,
	pub identity: Arc<dyn TokenValidator>,
}
impl Providers {
	pub fn new(qna: Arc<dyn QnaProvider>, identity: Arc<dyn TokenValidator>) -> Self {
		Self { qna, identity }
	}
}
impl Default for Providers {
	fn default() -> Self {
		Self { qna: Arc::new(DefaultProviders), identity: Arc::new(JwtValidator) }
	}
}

struct DefaultProviders;
impl QnaProvider for DefaultProviders {
	fn generate_answer<'a>(
		&'a self,
		cfg: &'a QnaProviderConfig,
		kb_id: &'a str,
		req: &'a GenerateAnswerRequest,
	) -> BoxFuture<'a, Result<GenerateAnswerResponse>> {
		Box::pin(async move { Ok(qna::generate_answer(cfg, kb_id, req).await?) })
	}
}

impl KbStore for Db {
	fn get_kb_info<'a>(&'a self, kb_id: &'a str) -> BoxFuture<'a, Result<Option<KbInfo>>> {
		Box::pin(async move { Ok(queries::get_kb_info(self, kb_id).await?) })
	}

	fn list_kbs<'a>(&'a self, fields: &'a [KbField]) -> BoxFuture<'a, Result<Vec<KbInfo>>> {
		Box::pin(async move { Ok(queries::list_kbs(self, fields).await?) })
	}

	fn upsert_kb<'a>(&'a self, info: &'a KbInfo) -> BoxFuture<'a, Result<()>> {
		Box::pin(async move { Ok(queries::upsert_kb(self, info).await?) })
	}

	fn delete_kb<'a>(&'a self, kb_id: &'a str) -> BoxFuture<'a, Result<bool>> {
		Box::pin(async move { Ok(queries::delete_kb(self, kb_id).await?) })
	}
}

pub struct KbSearchService {
	pub cfg: Config,
	pub kb_store: Arc<dyn KbStore>,
	pub providers: Providers,
	pub sessions: Arc<dyn SessionStore>,
}
impl KbSearchService {
	pub fn new(cfg: Config, db: Db) -> Self {
		let sessions = Arc::new(MemorySessionStore::new(&cfg.session));

		Self { cfg, kb_store: Arc::new(db), providers: Providers::default(), sessions }
	}

	pub fn with_providers(
		cfg: Config,
		kb_store: Arc<dyn KbStore>,
		providers: Providers,
		sessions: Arc<dyn SessionStore>,
	) -> Self {
		Self { cfg, kb_store, providers, sessions }
	}

	/// Validates the caller token. Runs before any store or QA call.
	pub fn authorize(&self, token: Option<&str>) -> Result<Principal> {
		let Some(token) = token.map(str::trim).filter(|token| !token.is_empty()) else {
			return Err(Error::Auth { message: "A bearer token is required.".to_string() });
		};

		self.providers.identity.validate(&self.cfg.security, token)
	}
}

/// Session slots belong to the token subject, narrowed by the explicit session id when one is
/// sent. Two callers sending the same id never share a slot.
pub(crate) fn session_key(session_id: Option<&str>, principal: &Principal) -> String {
	match session_id.map(str::trim).filter(|id| !id.is_empty()) {
		Some(id) => format!("{}\u{1f}{id}", principal.subject),
		None => principal.subject.clone(),
	}
}

/// Lookups are exact, so the id is returned as given.
pub(crate) fn require_kb_id(kb_id: &str) -> Result<&str> {
	if kb_id.trim().is_empty() {
		return Err(Error::invalid_field("kb_id", "kb_id is required."));
	}

	Ok(kb_id)
}

pub(crate) fn list_url(raw: &str) -> Option<String> {
	Some(raw.trim()).filter(|url| !url.is_empty()).map(str::to_string)
}
