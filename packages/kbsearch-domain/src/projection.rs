use serde_json::{Map, Value};

use crate::{ColumnInfo, DeserializedAnswer, Error, Result, display_name};

/// Key of the source list item id inside every answer payload.
pub const LIST_ITEM_ID_FIELD: &str = "id";

pub type AnswerPayload = Map<String, Value>;

/// Parses the JSON object the QA service stores as an answer.
pub fn parse_payload(raw: &str) -> Result<AnswerPayload> {
	match serde_json::from_str::<Value>(raw)? {
		Value::Object(map) => Ok(map),
		other => Err(Error::PayloadNotObject { kind: json_kind(&other) }),
	}
}

/// Renders `payload[name]` for display. Absent keys and `null` render as an empty string,
/// strings render unquoted, and every other value renders as compact JSON.
pub fn string_field(payload: &AnswerPayload, name: &str) -> String {
	match payload.get(name) {
		None | Some(Value::Null) => String::new(),
		Some(Value::String(text)) => text.clone(),
		Some(other) => other.to_string(),
	}
}

/// Emits exactly one entry per column, in column order, whether or not the payload has the key.
pub fn project_fields(payload: &AnswerPayload, fields: &[ColumnInfo]) -> Vec<DeserializedAnswer> {
	fields
		.iter()
		.map(|field| DeserializedAnswer {
			question: display_name::decode(&field.display_name),
			answer: string_field(payload, &field.name),
		})
		.collect()
}

pub fn project(raw: &str, fields: &[ColumnInfo]) -> Result<Vec<DeserializedAnswer>> {
	let payload = parse_payload(raw)?;

	Ok(project_fields(&payload, fields))
}

fn json_kind(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "a boolean",
		Value::Number(_) => "a number",
		Value::String(_) => "a string",
		Value::Array(_) => "an array",
		Value::Object(_) => "an object",
	}
}
