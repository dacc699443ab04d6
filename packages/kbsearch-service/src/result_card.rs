use serde::{Deserialize, Serialize};

use crate::{Error, KbSearchService, Result};
use kbsearch_domain::{DeserializedAnswer, SelectedSearchResult};

/// A result the caller picked from an earlier search, echoed back for the detail view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultCardRequest {
	pub kb_id: String,
	pub question: String,
	/// JSON array of `DeserializedAnswer`, as returned by the search.
	pub answers: String,
	pub list_item_id: String,
	#[serde(default)]
	pub token: Option<String>,
	#[serde(skip)]
	pub session_id: Option<String>,
}

impl KbSearchService {
	pub fn result_card(&self, req: ResultCardRequest) -> Result<SelectedSearchResult> {
		let principal = self.authorize(req.token.as_deref())?;
		let kb_id = crate::require_kb_id(&req.kb_id)?;
		let answers: Vec<DeserializedAnswer> =
			serde_json::from_str(&req.answers).map_err(|err| {
				Error::invalid_field(
					"answers",
					format!("answers must be a JSON array of question/answer pairs: {err}"),
				)
			})?;
		let share_point_list_url = self
			.sessions
			.list_url(&crate::session_key(req.session_id.as_deref(), &principal))
			.and_then(|url| crate::list_url(&url));

		Ok(SelectedSearchResult {
			kb_id: kb_id.to_string(),
			question: req.question,
			answers,
			list_item_id: req.list_item_id,
			share_point_list_url,
		})
	}
}
