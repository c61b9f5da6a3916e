//! Database repository for survey responses.
//!
//! Create-only: responses are inserted once and read back in creation order. There
//! is no update or delete.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use sqlx::{Row, SqlitePool};

use super::RESPONSES_TABLE;
use crate::errors::AppError;
use crate::models::{NewSurveyRecord, StoredValue, SurveyRecord};
use crate::schema::{AnswerSlot, SurveySchema};

/// Database repository for all data operations.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
    schema: Arc<SurveySchema>,
}

impl Repository {
    pub fn new(pool: SqlitePool, schema: Arc<SurveySchema>) -> Self {
        Self { pool, schema }
    }

    pub fn schema(&self) -> &SurveySchema {
        &self.schema
    }

    /// Insert one response and return it with its new identity.
    ///
    /// Every slot of the schema is written; slots missing from `record` are stored
    /// unanswered. A value longer than its slot width is an integrity error and
    /// nothing is written.
    pub async fn create_record(
        &self,
        record: &NewSurveyRecord,
    ) -> Result<SurveyRecord, AppError> {
        let mut answers = BTreeMap::new();
        for slot in self.schema.slots() {
            let value = record
                .get(&slot.name)
                .cloned()
                .unwrap_or_else(|| StoredValue::empty_for(slot));
            check_fits(slot, &value)?;
            answers.insert(slot.name.clone(), value);
        }

        let now = Utc::now().to_rfc3339();
        let columns: Vec<String> = self
            .schema
            .slots()
            .iter()
            .map(|s| format!("\"{}\"", s.name))
            .collect();
        let placeholders = vec!["?"; columns.len() + 1].join(", ");
        let sql = format!(
            "INSERT INTO {} (created_at, {}) VALUES ({})",
            RESPONSES_TABLE,
            columns.join(", "),
            placeholders
        );

        let mut query = sqlx::query(&sql).bind(&now);
        for slot in self.schema.slots() {
            query = match &answers[&slot.name] {
                StoredValue::Text(text) => query.bind(text.clone()),
                StoredValue::Integer(value) => query.bind(*value),
            };
        }

        let result = query.execute(&self.pool).await?;
        let id = result.last_insert_rowid();
        tracing::info!("Stored survey response {}", id);

        Ok(SurveyRecord {
            id,
            created_at: now,
            answers,
        })
    }

    /// All responses, oldest first.
    pub async fn list_records(&self) -> Result<Vec<SurveyRecord>, AppError> {
        let columns: Vec<String> = self
            .schema
            .slots()
            .iter()
            .map(|s| format!("\"{}\"", s.name))
            .collect();
        let sql = format!(
            "SELECT id, created_at, {} FROM {} ORDER BY id",
            columns.join(", "),
            RESPONSES_TABLE
        );
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;

        rows.iter()
            .map(|row| record_from_row(row, &self.schema))
            .collect()
    }

    /// Number of stored responses.
    pub async fn count_records(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", RESPONSES_TABLE))
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

/// Refuse values that would not fit their column.
fn check_fits(slot: &AnswerSlot, value: &StoredValue) -> Result<(), AppError> {
    match value {
        StoredValue::Text(text) if slot.is_integer() => Err(AppError::Integrity(format!(
            "Slot {} stores integers, got text {:?}",
            slot.name, text
        ))),
        StoredValue::Text(text) if text.chars().count() > slot.max_width => {
            Err(AppError::Integrity(format!(
                "Value for slot {} is {} characters, column width is {}",
                slot.name,
                text.chars().count(),
                slot.max_width
            )))
        }
        StoredValue::Integer(_) if !slot.is_integer() => Err(AppError::Integrity(format!(
            "Slot {} stores text, got an integer",
            slot.name
        ))),
        _ => Ok(()),
    }
}

fn record_from_row(
    row: &sqlx::sqlite::SqliteRow,
    schema: &SurveySchema,
) -> Result<SurveyRecord, AppError> {
    let mut answers = BTreeMap::new();
    for slot in schema.slots() {
        let value = if slot.is_integer() {
            StoredValue::Integer(row.try_get(slot.name.as_str())?)
        } else {
            let text: Option<String> = row.try_get(slot.name.as_str())?;
            StoredValue::Text(text.unwrap_or_default())
        };
        answers.insert(slot.name.clone(), value);
    }

    Ok(SurveyRecord {
        id: row.get("id"),
        created_at: row.get("created_at"),
        answers,
    })
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::db::init_database;
    use crate::schema::{national_park_survey, Choice};

    const RACE: &[Choice] = &[Choice::new("W", "White"), Choice::new("A", "Asian")];

    async fn repository(schema: SurveySchema) -> (Repository, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.sqlite");
        let pool = init_database(&db_path, &schema)
            .await
            .expect("Failed to init DB");
        (Repository::new(pool, Arc::new(schema)), temp_dir)
    }

    #[tokio::test]
    async fn test_create_and_list_in_creation_order() {
        let schema = national_park_survey().unwrap();
        let mut first = NewSurveyRecord::empty(&schema);
        first
            .answers
            .insert("q4".to_string(), StoredValue::Text("W,AA".to_string()));
        let mut second = NewSurveyRecord::empty(&schema);
        second
            .answers
            .insert("q10_1".to_string(), StoredValue::Integer(Some(4)));

        let (repo, _dir) = repository(schema).await;
        let a = repo.create_record(&first).await.unwrap();
        let b = repo.create_record(&second).await.unwrap();
        assert!(b.id > a.id);

        let records = repo.list_records().await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, a.id);
        assert_eq!(records[0].get("q4"), Some(&StoredValue::Text("W,AA".to_string())));
        assert_eq!(records[0].get("q10_1"), Some(&StoredValue::Integer(None)));
        assert_eq!(records[1].get("q10_1"), Some(&StoredValue::Integer(Some(4))));
        assert_eq!(records[1].get("q4"), Some(&StoredValue::Text(String::new())));
        assert_eq!(repo.count_records().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_full_park_record_reads_back() {
        let schema = national_park_survey().unwrap();
        let mut record = NewSurveyRecord::empty(&schema);
        for slot in schema.slots() {
            let value = match slot.kind.choices().first() {
                _ if slot.is_integer() => StoredValue::Integer(Some(1)),
                Some(choice) => StoredValue::Text(choice.code.to_string()),
                None => StoredValue::Text(format!("{} answer", slot.name)),
            };
            record.answers.insert(slot.name.clone(), value);
        }

        let (repo, _dir) = repository(schema).await;
        let created = repo.create_record(&record).await.unwrap();

        let records = repo.list_records().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, created.id);
        assert_eq!(records[0].answers.len(), 151);
        assert_eq!(records[0].answers, record.answers);
        assert_eq!(
            records[0].get("q28_10"),
            Some(&StoredValue::Integer(Some(1)))
        );
        assert_eq!(
            records[0].get("q20_10_text"),
            Some(&StoredValue::Text("q20_10_text answer".to_string()))
        );
    }

    #[tokio::test]
    async fn test_over_width_value_is_an_integrity_error() {
        let schema = SurveySchema::builder()
            .multi("race", "Race", RACE)
            .build()
            .unwrap();
        let mut record = NewSurveyRecord::empty(&schema);
        // A code added after sizing: W + A doubled is 4, this needs 7
        record
            .answers
            .insert("race".to_string(), StoredValue::Text("W,A,NEW".to_string()));

        let (repo, _dir) = repository(schema).await;
        let err = repo.create_record(&record).await.unwrap_err();
        assert!(matches!(err, AppError::Integrity(_)));
        assert_eq!(repo.count_records().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_column_check_rejects_oversized_rows() {
        let schema = SurveySchema::builder()
            .text("note", "Note", 3)
            .build()
            .unwrap();
        let (repo, _dir) = repository(schema).await;

        let result = sqlx::query(&format!(
            "INSERT INTO {} (created_at, note) VALUES ('now', 'too long')",
            RESPONSES_TABLE
        ))
        .execute(&repo.pool)
        .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_new_slots_are_added_to_existing_table() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.sqlite");

        let before = SurveySchema::builder().integer("q1", "First").build().unwrap();
        let pool = init_database(&db_path, &before).await.unwrap();
        let repo = Repository::new(pool.clone(), Arc::new(before.clone()));
        repo.create_record(&NewSurveyRecord::empty(&before))
            .await
            .unwrap();
        pool.close().await;

        let after = SurveySchema::builder()
            .integer("q1", "First")
            .text("q2", "Second", 20)
            .build()
            .unwrap();
        let pool = init_database(&db_path, &after).await.unwrap();
        let repo = Repository::new(pool, Arc::new(after.clone()));

        let records = repo.list_records().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("q2"), Some(&StoredValue::Text(String::new())));

        // Identities continue after the rebuild
        let next = repo
            .create_record(&NewSurveyRecord::empty(&after))
            .await
            .unwrap();
        assert!(next.id > records[0].id);
    }
}
