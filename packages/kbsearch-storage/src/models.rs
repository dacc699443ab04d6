use kbsearch_domain::{KbInfo, kb};

use crate::{Error, Result};

#[derive(Debug, sqlx::FromRow)]
pub struct KbInfoRow {
	pub kb_id: String,
	pub kb_name: String,
	pub question_field: String,
	/// JSON array of column definitions.
	pub answer_fields: String,
	pub ranker_type: Option<String>,
	pub share_point_url: String,
}
impl KbInfoRow {
	pub fn into_kb_info(self) -> Result<KbInfo> {
		let answer_fields = kb::parse_answer_fields(&self.answer_fields)
			.map_err(|source| Error::CorruptRow { kb_id: self.kb_id.clone(), source })?;
		let ranker_type = parse_ranker_type(&self.kb_id, self.ranker_type.as_deref())?;

		Ok(KbInfo {
			kb_id: self.kb_id,
			kb_name: self.kb_name,
			question_field: self.question_field,
			answer_fields,
			ranker_type,
			share_point_url: self.share_point_url,
		})
	}
}

pub(crate) fn parse_ranker_type(
	kb_id: &str,
	raw: Option<&str>,
) -> Result<Option<kbsearch_domain::RankerType>> {
	match raw.map(str::trim).filter(|value| !value.is_empty()) {
		None => Ok(None),
		Some(value) => value
			.parse()
			.map(Some)
			.map_err(|source| Error::CorruptRow { kb_id: kb_id.to_string(), source }),
	}
}
