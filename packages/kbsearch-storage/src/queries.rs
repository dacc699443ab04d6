use sqlx::{Row, postgres::PgRow};

use crate::{Error, Result, db::Db, models::{self, KbInfoRow}};
use kbsearch_domain::{KbField, KbInfo, kb};

pub async fn get_kb_info(db: &Db, kb_id: &str) -> Result<Option<KbInfo>> {
	let row: Option<KbInfoRow> = sqlx::query_as(
		"\
SELECT kb_id, kb_name, question_field, answer_fields, ranker_type, share_point_url
FROM kb_info
WHERE kb_id = $1",
	)
	.bind(kb_id)
	.fetch_optional(&db.pool)
	.await?;

	row.map(KbInfoRow::into_kb_info).transpose()
}

/// Lists every knowledge base, reading only the requested columns. Attributes that were not
/// requested keep their `Default` value.
pub async fn list_kbs(db: &Db, fields: &[KbField]) -> Result<Vec<KbInfo>> {
	if fields.is_empty() {
		return Err(Error::InvalidArgument("At least one kb_info field is required.".to_string()));
	}

	// kb_id is always read so corrupt rows can be reported by id.
	let mut columns = vec![KbField::KbId.as_str()];

	for field in fields {
		if !columns.contains(&field.as_str()) {
			columns.push(field.as_str());
		}
	}

	let sql = format!("SELECT {} FROM kb_info ORDER BY kb_name, kb_id", columns.join(", "));
	let rows = sqlx::query(sql.as_str()).fetch_all(&db.pool).await?;

	rows.iter().map(|row| project_row(row, fields)).collect()
}

pub async fn upsert_kb(db: &Db, info: &KbInfo) -> Result<()> {
	if info.kb_id.trim().is_empty() {
		return Err(Error::InvalidArgument("kb_id must be non-empty.".to_string()));
	}

	let answer_fields = info
		.answer_fields_json()
		.map_err(|source| Error::CorruptRow { kb_id: info.kb_id.clone(), source })?;

	sqlx::query(
		"\
INSERT INTO kb_info (
	kb_id,
	kb_name,
	question_field,
	answer_fields,
	ranker_type,
	share_point_url
)
VALUES ($1, $2, $3, $4, $5, $6)
ON CONFLICT (kb_id) DO UPDATE
SET
	kb_name = EXCLUDED.kb_name,
	question_field = EXCLUDED.question_field,
	answer_fields = EXCLUDED.answer_fields,
	ranker_type = EXCLUDED.ranker_type,
	share_point_url = EXCLUDED.share_point_url,
	updated_at = now()",
	)
	.bind(info.kb_id.as_str())
	.bind(info.kb_name.as_str())
	.bind(info.question_field.as_str())
	.bind(answer_fields)
	.bind(info.ranker_type.map(|ranker| ranker.as_str()))
	.bind(info.share_point_url.as_str())
	.execute(&db.pool)
	.await?;

	Ok(())
}

/// Returns whether a row was removed.
pub async fn delete_kb(db: &Db, kb_id: &str) -> Result<bool> {
	let result =
		sqlx::query("DELETE FROM kb_info WHERE kb_id = $1").bind(kb_id).execute(&db.pool).await?;

	Ok(result.rows_affected() > 0)
}

fn project_row(row: &PgRow, fields: &[KbField]) -> Result<KbInfo> {
	let kb_id: String = row.try_get("kb_id")?;
	let mut info = KbInfo::default();

	for field in fields {
		let column = field.as_str();

		match field {
			KbField::KbId => info.kb_id = kb_id.clone(),
			KbField::KbName => info.kb_name = row.try_get(column)?,
			KbField::QuestionField => info.question_field = row.try_get(column)?,
			KbField::AnswerFields => {
				let raw: String = row.try_get(column)?;

				info.answer_fields = kb::parse_answer_fields(&raw)
					.map_err(|source| Error::CorruptRow { kb_id: kb_id.clone(), source })?;
			},
			KbField::RankerType => {
				let raw: Option<String> = row.try_get(column)?;

				info.ranker_type = models::parse_ranker_type(&kb_id, raw.as_deref())?;
			},
			KbField::SharePointUrl => info.share_point_url = row.try_get(column)?,
		}
	}

	Ok(info)
}
