use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Knowledge base configuration as held by the metadata store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KbInfo {
	pub kb_id: String,
	pub kb_name: String,
	pub question_field: String,
	/// Display order of the answer columns.
	#[serde(default)]
	pub answer_fields: Vec<ColumnInfo>,
	/// `None` for knowledge bases created before ranker configuration existed.
	#[serde(default)]
	pub ranker_type: Option<RankerType>,
	#[serde(default)]
	pub share_point_url: String,
}
impl KbInfo {
	pub fn answer_fields_json(&self) -> Result<String> {
		Ok(serde_json::to_string(&self.answer_fields)?)
	}
}

/// One answer column: `name` keys into the raw answer object, `display_name` labels it.
///
/// Persisted column lists predate this service and use `Name`/`DisplayName`, so both spellings
/// are accepted on read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnInfo {
	#[serde(alias = "Name")]
	pub name: String,
	#[serde(alias = "DisplayName")]
	pub display_name: String,
}
impl ColumnInfo {
	pub fn new(name: impl Into<String>, display_name: impl Into<String>) -> Self {
		Self { name: name.into(), display_name: display_name.into() }
	}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RankerType {
	#[default]
	QuestionOnly,
	Default,
}
impl RankerType {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::QuestionOnly => "QuestionOnly",
			Self::Default => "Default",
		}
	}
}
impl fmt::Display for RankerType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}
impl FromStr for RankerType {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self> {
		match s.trim() {
			"QuestionOnly" => Ok(Self::QuestionOnly),
			"Default" => Ok(Self::Default),
			other => Err(Error::UnknownRankerType(other.to_string())),
		}
	}
}

/// Attributes of [`KbInfo`] that a listing may ask the store for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KbField {
	KbId,
	KbName,
	QuestionField,
	AnswerFields,
	RankerType,
	SharePointUrl,
}
impl KbField {
	pub const ALL: [Self; 6] = [
		Self::KbId,
		Self::KbName,
		Self::QuestionField,
		Self::AnswerFields,
		Self::RankerType,
		Self::SharePointUrl,
	];

	pub fn as_str(self) -> &'static str {
		match self {
			Self::KbId => "kb_id",
			Self::KbName => "kb_name",
			Self::QuestionField => "question_field",
			Self::AnswerFields => "answer_fields",
			Self::RankerType => "ranker_type",
			Self::SharePointUrl => "share_point_url",
		}
	}
}
impl FromStr for KbField {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self> {
		let wanted = s.trim();

		Self::ALL
			.into_iter()
			.find(|field| field.as_str() == wanted)
			.ok_or_else(|| Error::UnknownKbField(wanted.to_string()))
	}
}

pub fn parse_answer_fields(raw: &str) -> Result<Vec<ColumnInfo>> {
	if raw.trim().is_empty() {
		return Ok(Vec::new());
	}

	Ok(serde_json::from_str(raw)?)
}
