//! Caller identity: bearer token extraction and JWT validation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::{Error, Result, TokenValidator};
use kbsearch_config::Security;

const BEARER_SCHEME: &str = "bearer";

/// The identity a validated token resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
	pub subject: String,
	pub tenant_id: String,
}

#[derive(Debug, Deserialize)]
struct Claims {
	sub: String,
	#[serde(default)]
	tid: Option<String>,
}

/// Validates HMAC-signed JWTs issued for the configured tenant.
#[derive(Debug, Clone, Copy, Default)]
pub struct JwtValidator;
impl TokenValidator for JwtValidator {
	fn validate(&self, cfg: &Security, token: &str) -> Result<Principal> {
		let algorithm: Algorithm = cfg.jwt.algorithm.parse().map_err(|_| Error::Auth {
			message: format!("Unsupported token algorithm {}.", cfg.jwt.algorithm),
		})?;
		let mut validation = Validation::new(algorithm);

		validation.leeway = cfg.jwt.leeway_secs;
		validation.set_required_spec_claims(&["exp", "sub"]);

		match cfg.jwt.audience.as_deref() {
			Some(audience) => validation.set_audience(&[audience]),
			None => validation.validate_aud = false,
		}

		if let Some(issuer) = cfg.jwt.issuer.as_deref() {
			validation.set_issuer(&[issuer]);
		}

		let key = DecodingKey::from_secret(cfg.jwt.signing_secret.as_bytes());
		let claims = jsonwebtoken::decode::<Claims>(token, &key, &validation)
			.map_err(|err| {
				tracing::debug!(reason = ?err.kind(), "Token rejected.");

				Error::Auth { message: "Token is invalid or expired.".to_string() }
			})?
			.claims;

		if claims.tid.as_deref() != Some(cfg.tenant_id.as_str()) {
			return Err(Error::Auth { message: "Token was issued for another tenant.".to_string() });
		}
		if claims.sub.trim().is_empty() {
			return Err(Error::Auth { message: "Token subject is empty.".to_string() });
		}

		Ok(Principal { subject: claims.sub, tenant_id: cfg.tenant_id.clone() })
	}
}

/// Extracts the token from an `Authorization` header value such as `Bearer <token>`.
pub fn bearer_token(header: &str) -> Option<&str> {
	let mut parts = header.split_whitespace();
	let scheme = parts.next()?;
	let token = parts.next()?;

	scheme.eq_ignore_ascii_case(BEARER_SCHEME).then_some(token)
}

/// An explicit, non-blank token parameter wins over the `Authorization` header.
pub fn resolve_token(explicit: Option<&str>, authorization: Option<&str>) -> Option<String> {
	explicit
		.map(str::trim)
		.filter(|token| !token.is_empty())
		.or_else(|| authorization.and_then(bearer_token))
		.map(str::to_string)
}
