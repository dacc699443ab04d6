// std
use std::time::Duration;

// crates.io
use reqwest::Client;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::{Error, Result};
use kbsearch_config::{KB_ID_PLACEHOLDER, QnaProviderConfig};
use kbsearch_domain::RankerType;

const AUTH_SCHEME: &str = "EndpointKey";
const MAX_ERROR_BODY_CHARS: usize = 512;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateAnswerRequest {
	pub question: String,
	pub top: u32,
	/// Minimum confidence on the 0-100 scale. The service applies it loosely.
	pub score_threshold: f64,
	pub ranker_type: RankerType,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GenerateAnswerResponse {
	pub answers: Vec<QnaAnswer>,
}

/// One ranked candidate. `answer` is itself JSON text produced by the list sync job.
///
/// Placeholder answers arrive with `null` members. Those decode to empty values and a zero score,
/// so the caller's score filter drops them.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QnaAnswer {
	#[serde(default, deserialize_with = "null_as_default")]
	pub questions: Vec<String>,
	#[serde(default, deserialize_with = "null_as_default")]
	pub answer: String,
	#[serde(default, deserialize_with = "null_as_default")]
	pub score: f64,
}

pub async fn generate_answer(
	cfg: &QnaProviderConfig,
	kb_id: &str,
	req: &GenerateAnswerRequest,
) -> Result<GenerateAnswerResponse> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = request_url(cfg, kb_id);
	let res = client
		.post(url)
		.headers(crate::auth_headers(AUTH_SCHEME, &cfg.endpoint_key, &cfg.default_headers)?)
		.json(req)
		.send()
		.await?;
	let status = res.status();

	if !status.is_success() {
		let body = res.text().await.unwrap_or_default();

		tracing::warn!(
			provider_id = %cfg.provider_id,
			kb_id,
			status = status.as_u16(),
			"QA service request failed."
		);

		return Err(Error::Status {
			status: status.as_u16(),
			body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
		});
	}

	let json: Value = res.json().await?;

	parse_generate_answer_response(json)
}

pub fn request_url(cfg: &QnaProviderConfig, kb_id: &str) -> String {
	let path = cfg.path.replace(KB_ID_PLACEHOLDER, &urlencoding::encode(kb_id));

	format!("{}{}", cfg.api_base, path)
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
	D: Deserializer<'de>,
	T: Default + Deserialize<'de>,
{
	Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn parse_generate_answer_response(json: Value) -> Result<GenerateAnswerResponse> {
	if !json.get("answers").map(Value::is_array).unwrap_or(false) {
		return Err(Error::InvalidResponse {
			message: "QA response is missing answers array.".to_string(),
		});
	}

	serde_json::from_value(json).map_err(|err| Error::InvalidResponse {
		message: format!("QA response could not be decoded: {err}"),
	})
}
