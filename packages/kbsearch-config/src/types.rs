use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	pub providers: Providers,
	pub search: Search,
	pub security: Security,
	#[serde(default)]
	pub session: Session,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub admin_bind: String,
	#[serde(default = "default_log_level")]
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

#[derive(Debug, Clone, Deserialize)]
pub struct Providers {
	pub qna: QnaProviderConfig,
}

/// Hosted question-answering runtime endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct QnaProviderConfig {
	pub provider_id: String,
	pub api_base: String,
	/// Request path appended to `api_base`. Must contain the `{kb_id}` placeholder.
	#[serde(default = "default_qna_path")]
	pub path: String,
	pub endpoint_key: String,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Search {
	/// Maximum number of candidates requested from the QA service.
	pub top: u32,
	/// Minimum confidence on the service's 0-100 scale.
	pub score_threshold: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Security {
	pub tenant_id: String,
	pub bind_localhost_only: bool,
	pub jwt: Jwt,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Jwt {
	pub signing_secret: String,
	#[serde(default = "default_jwt_algorithm")]
	pub algorithm: String,
	pub audience: Option<String>,
	pub issuer: Option<String>,
	#[serde(default = "default_leeway_secs")]
	pub leeway_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Session {
	pub ttl_secs: u64,
	pub max_entries: usize,
}
impl Default for Session {
	fn default() -> Self {
		Self { ttl_secs: 3_600, max_entries: 10_000 }
	}
}

fn default_log_level() -> String {
	"info".to_string()
}

fn default_qna_path() -> String {
	"/qnamaker/knowledgebases/{kb_id}/generateAnswer".to_string()
}

fn default_jwt_algorithm() -> String {
	"HS256".to_string()
}

fn default_leeway_secs() -> u64 {
	60
}
