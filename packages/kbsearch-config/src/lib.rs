mod error;
mod types;

pub use error::{Error, Result};
pub use types::{
	Config, Jwt, Postgres, Providers, QnaProviderConfig, Search, Security, Service, Session,
	Storage,
};

use std::{fs, path::Path};

/// Placeholder substituted with the URL-encoded knowledge base id in the QA request path.
pub const KB_ID_PLACEHOLDER: &str = "{kb_id}";

pub const JWT_ALGORITHMS: [&str; 3] = ["HS256", "HS384", "HS512"];

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
	for (field, value) in [
		("service.http_bind", &cfg.service.http_bind),
		("service.admin_bind", &cfg.service.admin_bind),
		("storage.postgres.dsn", &cfg.storage.postgres.dsn),
		("providers.qna.api_base", &cfg.providers.qna.api_base),
		("providers.qna.endpoint_key", &cfg.providers.qna.endpoint_key),
		("security.tenant_id", &cfg.security.tenant_id),
		("security.jwt.signing_secret", &cfg.security.jwt.signing_secret),
	] {
		if value.trim().is_empty() {
			return Err(Error::invalid(field, "must be non-empty."));
		}
	}

	if cfg.storage.postgres.pool_max_conns == 0 {
		return Err(Error::invalid("storage.postgres.pool_max_conns", "must be greater than zero."));
	}
	if !cfg.providers.qna.path.contains(KB_ID_PLACEHOLDER) {
		return Err(Error::invalid(
			"providers.qna.path",
			format!("must contain the {KB_ID_PLACEHOLDER} placeholder."),
		));
	}
	if cfg.providers.qna.timeout_ms == 0 {
		return Err(Error::invalid("providers.qna.timeout_ms", "must be greater than zero."));
	}
	if cfg.providers.qna.default_headers.values().any(|value| !value.is_string()) {
		return Err(Error::invalid("providers.qna.default_headers", "values must be strings."));
	}
	if cfg.search.top == 0 {
		return Err(Error::invalid("search.top", "must be greater than zero."));
	}
	if !cfg.search.score_threshold.is_finite() {
		return Err(Error::invalid("search.score_threshold", "must be a finite number."));
	}
	if !(0.0..=100.0).contains(&cfg.search.score_threshold) {
		return Err(Error::invalid("search.score_threshold", "must be in the range 0-100."));
	}
	if !JWT_ALGORITHMS.contains(&cfg.security.jwt.algorithm.as_str()) {
		return Err(Error::invalid(
			"security.jwt.algorithm",
			format!("must be one of {}.", JWT_ALGORITHMS.join(", ")),
		));
	}
	if cfg.session.ttl_secs == 0 {
		return Err(Error::invalid("session.ttl_secs", "must be greater than zero."));
	}
	if cfg.session.max_entries == 0 {
		return Err(Error::invalid("session.max_entries", "must be greater than zero."));
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	cfg.security.tenant_id = cfg.security.tenant_id.trim().to_string();
	cfg.security.jwt.algorithm = cfg.security.jwt.algorithm.trim().to_ascii_uppercase();

	if cfg.security.jwt.audience.as_deref().map(|aud| aud.trim().is_empty()).unwrap_or(false) {
		cfg.security.jwt.audience = None;
	}
	if cfg.security.jwt.issuer.as_deref().map(|iss| iss.trim().is_empty()).unwrap_or(false) {
		cfg.security.jwt.issuer = None;
	}
	if cfg.providers.qna.api_base.ends_with('/') {
		cfg.providers.qna.api_base = cfg.providers.qna.api_base.trim_end_matches('/').to_string();
	}
}
