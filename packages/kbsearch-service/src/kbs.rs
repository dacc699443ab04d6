use serde::{Deserialize, Serialize};

use crate::{Error, KbSearchService, Result};
use kbsearch_domain::{KbField, KbInfo};

const LIST_FIELDS: [KbField; 2] = [KbField::KbId, KbField::KbName];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListKbsRequest {
	#[serde(default)]
	pub token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KbSummary {
	pub kb_id: String,
	pub kb_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListKbsResponse {
	pub items: Vec<KbSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpsertKbResponse {
	pub kb_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteKbRequest {
	pub kb_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteKbResponse {
	pub kb_id: String,
	pub deleted: bool,
}

impl KbSearchService {
	pub async fn list_kbs(&self, req: ListKbsRequest) -> Result<ListKbsResponse> {
		self.authorize(req.token.as_deref())?;

		let items = self
			.kb_store
			.list_kbs(&LIST_FIELDS)
			.await?
			.into_iter()
			.map(|info| KbSummary { kb_id: info.kb_id, kb_name: info.kb_name })
			.collect();

		Ok(ListKbsResponse { items })
	}

	pub async fn upsert_kb(&self, info: KbInfo) -> Result<UpsertKbResponse> {
		crate::require_kb_id(&info.kb_id)?;

		if info.kb_name.trim().is_empty() {
			return Err(Error::invalid_field("kb_name", "kb_name is required."));
		}
		if let Some(index) = info.answer_fields.iter().position(|field| field.name.trim().is_empty())
		{
			let field = format!("answer_fields[{index}].name");

			return Err(Error::invalid_field(&field, format!("{field} is required.")));
		}

		self.kb_store.upsert_kb(&info).await?;

		tracing::info!(
			kb_id = %info.kb_id,
			answer_fields = info.answer_fields.len(),
			"Knowledge base upserted."
		);

		Ok(UpsertKbResponse { kb_id: info.kb_id })
	}

	pub async fn delete_kb(&self, req: DeleteKbRequest) -> Result<DeleteKbResponse> {
		let kb_id = crate::require_kb_id(&req.kb_id)?;

		if !self.kb_store.delete_kb(kb_id).await? {
			return Err(Error::NotFound { message: format!("Unknown kb_id {kb_id}.") });
		}

		tracing::info!(kb_id, "Knowledge base deleted.");

		Ok(DeleteKbResponse { kb_id: kb_id.to_string(), deleted: true })
	}
}
