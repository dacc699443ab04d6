use kbsearch_domain::{
	ColumnInfo, DeserializedAnswer, Error,
	projection::{self, LIST_ITEM_ID_FIELD},
};

fn city_fields() -> Vec<ColumnInfo> {
	vec![ColumnInfo::new("q", "City"), ColumnInfo::new("missing", "X")]
}

#[test]
fn missing_fields_render_empty_and_are_kept() {
	let projected =
		projection::project(r#"{"id":"42","q":"Paris"}"#, &city_fields()).expect("project failed");

	assert_eq!(
		projected,
		vec![DeserializedAnswer::new("City", "Paris"), DeserializedAnswer::new("X", "")]
	);
}

#[test]
fn output_follows_field_order_not_payload_order() {
	let fields = vec![
		ColumnInfo::new("c", "Third key first"),
		ColumnInfo::new("a", "First key"),
		ColumnInfo::new("b", "Second key"),
	];
	let projected =
		projection::project(r#"{"a":"1","b":"2","c":"3"}"#, &fields).expect("project failed");
	let labels: Vec<&str> = projected.iter().map(|entry| entry.question.as_str()).collect();
	let values: Vec<&str> = projected.iter().map(|entry| entry.answer.as_str()).collect();

	assert_eq!(labels, ["Third key first", "First key", "Second key"]);
	assert_eq!(values, ["3", "1", "2"]);
}

#[test]
fn column_count_is_stable_across_payloads() {
	let fields = vec![
		ColumnInfo::new("title", "Title"),
		ColumnInfo::new("owner", "Owner"),
		ColumnInfo::new("due", "Due_x0020_Date"),
	];

	for raw in [r#"{}"#, r#"{"title":"t"}"#, r#"{"title":"t","owner":"o","due":"d","extra":1}"#] {
		let projected = projection::project(raw, &fields).expect("project failed");

		assert_eq!(projected.len(), fields.len(), "payload {raw}");
		assert_eq!(projected[2].question, "Due Date");
	}
}

#[test]
fn empty_field_list_projects_nothing() {
	let projected = projection::project(r#"{"q":"Paris"}"#, &[]).expect("project failed");

	assert!(projected.is_empty());
}

#[test]
fn numeric_list_item_id_is_stringified() {
	let payload = projection::parse_payload(r#"{"id":42}"#).expect("parse failed");

	assert_eq!(projection::string_field(&payload, LIST_ITEM_ID_FIELD), "42");
}

#[test]
fn malformed_payload_is_an_error() {
	let err = projection::project("Paris", &city_fields()).expect_err("expected error");

	assert!(matches!(err, Error::PayloadJson(_)), "Unexpected error: {err}");

	let err = projection::project(r#""Paris""#, &city_fields()).expect_err("expected error");

	assert!(err.to_string().contains("must be a JSON object"), "Unexpected error: {err}");
}
