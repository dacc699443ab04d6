use std::{
	env, fs,
	path::PathBuf,
	sync::atomic::{AtomicU64, Ordering},
	time::{SystemTime, UNIX_EPOCH},
};

use toml::Value;

use kbsearch_config::{Config, Error};

const SAMPLE_CONFIG_TOML: &str = include_str!("fixtures/sample_config.toml");
const EXAMPLE_CONFIG_TOML: &str = include_str!("../../../kbsearch.example.toml");

fn sample_toml_with(section: &str, key: &str, value: Value) -> String {
	let mut root: Value = toml::from_str(SAMPLE_CONFIG_TOML).expect("Failed to parse sample config.");
	let mut table = root.as_table_mut().expect("Sample config must be a table.");

	for part in section.split('.') {
		table = table
			.get_mut(part)
			.and_then(Value::as_table_mut)
			.unwrap_or_else(|| panic!("Sample config must include [{section}]."));
	}

	table.insert(key.to_string(), value);

	toml::to_string(&root).expect("Failed to render sample config.")
}

fn write_temp_config(payload: String) -> PathBuf {
	static COUNTER: AtomicU64 = AtomicU64::new(0);

	let nanos = SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.expect("System time must be valid.")
		.as_nanos();
	let ordinal = COUNTER.fetch_add(1, Ordering::SeqCst);
	let pid = std::process::id();
	let mut path = env::temp_dir();

	path.push(format!("kbsearch_config_test_{nanos}_{pid}_{ordinal}.toml"));

	fs::write(&path, payload).expect("Failed to write test config.");

	path
}

fn load_payload(payload: String) -> kbsearch_config::Result<Config> {
	let path = write_temp_config(payload);
	let result = kbsearch_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	result
}

fn base_config() -> Config {
	let mut cfg: Config = toml::from_str(SAMPLE_CONFIG_TOML).expect("Failed to parse test config.");

	// `load` normalizes the algorithm; parsing alone does not.
	cfg.security.jwt.algorithm = "HS256".to_string();

	cfg
}

#[test]
fn sample_config_loads_and_normalizes() {
	let cfg = load_payload(SAMPLE_CONFIG_TOML.to_string()).expect("Sample config must be valid.");

	assert_eq!(cfg.security.jwt.algorithm, "HS256");
	assert_eq!(cfg.security.jwt.audience, None);
	assert_eq!(cfg.providers.qna.api_base, "https://example-qna.azurewebsites.net");
	assert_eq!(cfg.search.top, 5);
	assert_eq!(cfg.session.max_entries, 512);
}

#[test]
fn example_toml_is_valid() {
	let cfg: Config = toml::from_str(EXAMPLE_CONFIG_TOML).expect("Failed to parse example config.");

	kbsearch_config::validate(&cfg).expect("Example config must be valid.");
}

#[test]
fn session_section_is_optional() {
	let mut root: Value = toml::from_str(SAMPLE_CONFIG_TOML).expect("Failed to parse sample config.");

	root.as_table_mut().expect("Sample config must be a table.").remove("session");

	let cfg =
		load_payload(toml::to_string(&root).expect("Failed to render config.")).expect("valid");

	assert_eq!(cfg.session.ttl_secs, 3_600);
	assert_eq!(cfg.session.max_entries, 10_000);
}

#[test]
fn top_must_be_positive() {
	let err = load_payload(sample_toml_with("search", "top", Value::Integer(0)))
		.expect_err("Expected top validation error.");

	assert!(
		matches!(err, Error::Validation { field: "search.top", .. }),
		"Unexpected error: {err}"
	);
	assert!(err.to_string().contains("search.top must be greater than zero."));
}

#[test]
fn score_threshold_must_be_within_scale() {
	for threshold in [-1.0, 100.5] {
		let err = load_payload(sample_toml_with(
			"search",
			"score_threshold",
			Value::Float(threshold),
		))
		.expect_err("Expected score_threshold validation error.");

		assert!(
			err.to_string().contains("search.score_threshold must be in the range 0-100."),
			"Unexpected error: {err}"
		);
	}
}

#[test]
fn score_threshold_accepts_bounds() {
	let mut cfg = base_config();

	cfg.search.score_threshold = 0.0;

	assert!(kbsearch_config::validate(&cfg).is_ok());

	cfg.search.score_threshold = 100.0;

	assert!(kbsearch_config::validate(&cfg).is_ok());
}

#[test]
fn score_threshold_must_be_finite() {
	let mut cfg = base_config();

	cfg.search.score_threshold = f64::NAN;

	let err = kbsearch_config::validate(&cfg).expect_err("Expected finite validation error.");

	assert!(err.to_string().contains("search.score_threshold must be a finite number."));
}

#[test]
fn tenant_id_is_required() {
	let err = load_payload(sample_toml_with("security", "tenant_id", Value::String("  ".into())))
		.expect_err("Expected tenant_id validation error.");

	assert!(
		err.to_string().contains("security.tenant_id must be non-empty."),
		"Unexpected error: {err}"
	);
}

#[test]
fn qna_path_requires_kb_id_placeholder() {
	let mut cfg = base_config();

	cfg.providers.qna.path = "/qnamaker/generateAnswer".to_string();

	let err = kbsearch_config::validate(&cfg).expect_err("Expected path validation error.");

	assert!(
		err.to_string().contains("providers.qna.path must contain the {kb_id} placeholder."),
		"Unexpected error: {err}"
	);
}

#[test]
fn qna_default_headers_must_be_strings() {
	let mut cfg = base_config();

	cfg.providers.qna.default_headers.insert("x-retries".to_string(), serde_json::json!(3));

	let err = kbsearch_config::validate(&cfg).expect_err("Expected header validation error.");

	assert!(matches!(err, Error::Validation { field: "providers.qna.default_headers", .. }));
}

#[test]
fn jwt_algorithm_must_be_hmac() {
	let err = load_payload(sample_toml_with(
		"security.jwt",
		"algorithm",
		Value::String("RS256".to_string()),
	))
	.expect_err("Expected algorithm validation error.");

	assert!(
		err.to_string().contains("security.jwt.algorithm must be one of HS256, HS384, HS512."),
		"Unexpected error: {err}"
	);
}

#[test]
fn session_bounds_must_be_positive() {
	let mut cfg = base_config();

	cfg.session.ttl_secs = 0;

	let err = kbsearch_config::validate(&cfg).expect_err("Expected ttl validation error.");

	assert!(err.to_string().contains("session.ttl_secs must be greater than zero."));

	cfg = base_config();
	cfg.session.max_entries = 0;

	let err = kbsearch_config::validate(&cfg).expect_err("Expected cap validation error.");

	assert!(err.to_string().contains("session.max_entries must be greater than zero."));
}

#[test]
fn missing_file_reports_path() {
	let path = env::temp_dir().join("kbsearch_config_test_missing.toml");
	let err = kbsearch_config::load(&path).expect_err("Expected read error.");

	assert!(matches!(err, Error::ReadConfig { .. }), "Unexpected error: {err}");
}
