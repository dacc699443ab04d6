use serde::{Deserialize, Serialize};

/// One labelled answer column, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeserializedAnswer {
	/// Decoded column label.
	pub question: String,
	pub answer: String,
}
impl DeserializedAnswer {
	pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
		Self { question: question.into(), answer: answer.into() }
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedSearchResult {
	pub kb_id: String,
	pub question: String,
	pub answers: Vec<DeserializedAnswer>,
	pub list_item_id: String,
	pub share_point_list_url: Option<String>,
}
