use serde::{Deserialize, Serialize};

use crate::{Error, KbSearchService, Result};
use kbsearch_domain::{
	KbInfo, SelectedSearchResult,
	projection::{self, LIST_ITEM_ID_FIELD},
};
use kbsearch_providers::qna::{GenerateAnswerRequest, QnaAnswer};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
	pub kb_id: String,
	pub keyword: String,
	#[serde(default)]
	pub token: Option<String>,
	#[serde(skip)]
	pub session_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
	pub results: Vec<SelectedSearchResult>,
}

impl KbSearchService {
	/// Runs one keyword search against a knowledge base and returns display-ready results in the
	/// order the QA service ranked them.
	pub async fn search(&self, req: SearchRequest) -> Result<SearchResponse> {
		let principal = self.authorize(req.token.as_deref())?;
		let keyword = req.keyword.trim();

		if keyword.is_empty() {
			return Ok(SearchResponse::default());
		}

		let kb_id = crate::require_kb_id(&req.kb_id)?;
		let kb = self
			.kb_store
			.get_kb_info(kb_id)
			.await?
			.ok_or_else(|| Error::NotFound { message: format!("Unknown kb_id {kb_id}.") })?;

		self.sessions.set_list_url(
			&crate::session_key(req.session_id.as_deref(), &principal),
			kb.share_point_url.clone(),
		);

		let qna_req = GenerateAnswerRequest {
			question: keyword.to_string(),
			top: self.cfg.search.top,
			score_threshold: self.cfg.search.score_threshold,
			ranker_type: kb.ranker_type.unwrap_or_default(),
		};
		let response =
			self.providers.qna.generate_answer(&self.cfg.providers.qna, kb_id, &qna_req).await?;
		let received = response.answers.len();
		let results = response
			.answers
			.into_iter()
			.filter(|answer| answer.score > 0.0)
			.map(|answer| project_answer(&kb, answer))
			.collect::<Result<Vec<_>>>()?;

		tracing::info!(
			kb_id,
			ranker_type = %qna_req.ranker_type,
			received,
			returned = results.len(),
			"Search completed."
		);

		Ok(SearchResponse { results })
	}
}

fn project_answer(kb: &KbInfo, answer: QnaAnswer) -> Result<SelectedSearchResult> {
	let Some(question) = answer.questions.into_iter().next() else {
		return Err(Error::MalformedPayload {
			message: "QA answer has no question phrasings.".to_string(),
		});
	};
	let payload = projection::parse_payload(&answer.answer)?;

	Ok(SelectedSearchResult {
		kb_id: kb.kb_id.clone(),
		question,
		answers: projection::project_fields(&payload, &kb.answer_fields),
		list_item_id: projection::string_field(&payload, LIST_ITEM_ID_FIELD),
		share_point_list_url: crate::list_url(&kb.share_point_url),
	})
}
