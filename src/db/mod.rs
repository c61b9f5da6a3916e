//! Database module for SQLite persistence.
//!
//! Survey responses live in one table with a column per answer slot.

mod repository;

pub use repository::*;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;

use crate::schema::{FieldKind, SurveySchema};

/// Table holding one row per survey response.
pub const RESPONSES_TABLE: &str = "survey_responses";

/// Initialize the database connection pool and run migrations.
pub async fn init_database(
    db_path: &Path,
    schema: &SurveySchema,
) -> Result<SqlitePool, sqlx::Error> {
    // Ensure the parent directory exists
    if let Some(parent) = db_path.parent() {
        tokio::fs::create_dir_all(parent).await.ok();
    }

    let db_url = format!("sqlite:{}?mode=rwc", db_path.display());

    let options = SqliteConnectOptions::from_str(&db_url)?
        .create_if_missing(true)
        .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
        .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    run_migrations(&pool, schema).await?;

    Ok(pool)
}

/// Create the responses table, or rebuild it when the schema declares slots it lacks.
///
/// Columns are never added with `ALTER TABLE ADD COLUMN`; sqlx misreads rows of
/// such tables. A table missing columns is recreated and its rows copied across.
async fn run_migrations(pool: &SqlitePool, schema: &SurveySchema) -> Result<(), sqlx::Error> {
    let existing: Vec<(String, String)> = sqlx::query_as(&format!(
        "SELECT name, type FROM pragma_table_info('{}')",
        RESPONSES_TABLE
    ))
    .fetch_all(pool)
    .await?;

    if existing.is_empty() {
        sqlx::query(&create_table_sql(RESPONSES_TABLE, schema, &[]))
            .execute(pool)
            .await?;
        return Ok(());
    }

    let missing: Vec<&str> = schema
        .slots()
        .iter()
        .filter(|slot| !existing.iter().any(|(name, _)| name == &slot.name))
        .map(|slot| slot.name.as_str())
        .collect();
    if missing.is_empty() {
        return Ok(());
    }

    tracing::info!(
        "Rebuilding {} to add columns: {}",
        RESPONSES_TABLE,
        missing.join(", ")
    );
    rebuild_table(pool, schema, &existing).await
}

/// Recreate the responses table with every slot column, keeping existing rows, ids
/// and any columns the schema no longer declares.
async fn rebuild_table(
    pool: &SqlitePool,
    schema: &SurveySchema,
    existing: &[(String, String)],
) -> Result<(), sqlx::Error> {
    let staging = format!("{}_rebuild", RESPONSES_TABLE);
    let retired: Vec<(String, String)> = existing
        .iter()
        .filter(|(name, _)| {
            name != "id" && name != "created_at" && schema.slot(name).is_none()
        })
        .cloned()
        .collect();
    let copied = existing
        .iter()
        .map(|(name, _)| format!("\"{}\"", name))
        .collect::<Vec<_>>()
        .join(", ");

    let mut tx = pool.begin().await?;
    sqlx::query(&format!("DROP TABLE IF EXISTS {}", staging))
        .execute(&mut *tx)
        .await?;
    sqlx::query(&create_table_sql(&staging, schema, &retired))
        .execute(&mut *tx)
        .await?;
    sqlx::query(&format!(
        "INSERT INTO {} ({}) SELECT {} FROM {}",
        staging, copied, copied, RESPONSES_TABLE
    ))
    .execute(&mut *tx)
    .await?;
    sqlx::query(&format!("DROP TABLE {}", RESPONSES_TABLE))
        .execute(&mut *tx)
        .await?;
    sqlx::query(&format!(
        "ALTER TABLE {} RENAME TO {}",
        staging, RESPONSES_TABLE
    ))
    .execute(&mut *tx)
    .await?;
    tx.commit().await?;

    Ok(())
}

/// DDL for a responses table holding every slot of `schema`, plus `retired` columns
/// given as (name, declared type).
fn create_table_sql(table: &str, schema: &SurveySchema, retired: &[(String, String)]) -> String {
    let mut columns = vec![
        "id INTEGER PRIMARY KEY AUTOINCREMENT".to_string(),
        "created_at TEXT NOT NULL".to_string(),
    ];
    columns.extend(
        schema
            .slots()
            .iter()
            .map(|slot| column_definition(&slot.name, &slot.kind, slot.max_width)),
    );
    columns.extend(
        retired
            .iter()
            .map(|(name, kind)| format!("\"{}\" {}", name, kind)),
    );
    format!("CREATE TABLE {} (\n    {}\n)", table, columns.join(",\n    "))
}

/// Column DDL for one slot. Text columns carry a length check so an oversized value
/// fails the insert instead of being stored.
fn column_definition(name: &str, kind: &FieldKind, max_width: usize) -> String {
    match kind {
        FieldKind::Integer => format!("\"{}\" INTEGER", name),
        FieldKind::SingleChoice { .. }
        | FieldKind::MultiChoice { .. }
        | FieldKind::MultiChoiceWithOther { .. }
        | FieldKind::FreeText => format!(
            "\"{0}\" TEXT NOT NULL DEFAULT '' CHECK (length(\"{0}\") <= {1})",
            name, max_width
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_table_lists_every_slot() {
        let schema = SurveySchema::builder()
            .integer("q1", "First")
            .text("q2", "Second", 20)
            .build()
            .unwrap();
        let retired = vec![("q0".to_string(), "TEXT".to_string())];
        assert_eq!(
            create_table_sql("responses", &schema, &retired),
            "CREATE TABLE responses (\n    \
             id INTEGER PRIMARY KEY AUTOINCREMENT,\n    \
             created_at TEXT NOT NULL,\n    \
             \"q1\" INTEGER,\n    \
             \"q2\" TEXT NOT NULL DEFAULT '' CHECK (length(\"q2\") <= 20),\n    \
             \"q0\" TEXT\n)"
        );
    }

    #[test]
    fn test_column_definitions() {
        assert_eq!(
            column_definition("q10_1", &FieldKind::Integer, 0),
            "\"q10_1\" INTEGER"
        );
        assert_eq!(
            column_definition("q7", &FieldKind::FreeText, 10),
            "\"q7\" TEXT NOT NULL DEFAULT '' CHECK (length(\"q7\") <= 10)"
        );
    }
}
