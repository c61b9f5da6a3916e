//! Batch export of survey responses to the analysis import file.
//!
//! The output is the first rows of an external template file, copied byte for
//! byte, followed by one row per response in creation order. Each data row starts
//! with empty placeholders for the template's metadata columns, then carries one
//! resolved value per export column.
//!
//! Nothing is written unless the whole batch succeeds: rows are produced in full
//! and written to a temporary file that is renamed over the output at the end.
//! Two exports must not run concurrently against the same output path.

mod resolver;

pub use resolver::*;

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::db::Repository;
use crate::errors::ExportError;
use crate::models::SurveyRecord;
use crate::schema::SurveySchema;

/// Rows taken from the template by default.
pub const DEFAULT_TEMPLATE_ROWS: usize = 3;

/// Metadata columns (dates, recipient, location, ...) the template expects first.
pub const METADATA_COLUMNS: usize = 17;

/// Outcome of a successful export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub template_rows: usize,
    pub records: usize,
    pub output_path: PathBuf,
}

/// One-shot exporter merging responses beneath a template's header rows.
#[derive(Debug, Clone)]
pub struct BatchExporter {
    template_path: PathBuf,
    output_path: PathBuf,
    template_rows: usize,
    placeholder_columns: usize,
    resolver: DisplayResolver,
}

impl BatchExporter {
    pub fn new(template_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            template_path: template_path.into(),
            output_path: output_path.into(),
            template_rows: DEFAULT_TEMPLATE_ROWS,
            placeholder_columns: METADATA_COLUMNS,
            resolver: DisplayResolver::default(),
        }
    }

    pub fn with_template_rows(mut self, rows: usize) -> Self {
        self.template_rows = rows;
        self
    }

    pub fn with_placeholder_columns(mut self, columns: usize) -> Self {
        self.placeholder_columns = columns;
        self
    }

    pub fn with_resolver(mut self, resolver: DisplayResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Export every stored response.
    pub async fn run(&self, repo: &Repository) -> Result<ExportSummary, ExportError> {
        tracing::info!(
            "Exporting survey responses to {} using template {}",
            self.output_path.display(),
            self.template_path.display()
        );

        let prefix = self.read_template_prefix()?;
        let records = repo.list_records().await?;
        let rows = self.build_rows(repo.schema(), &records)?;
        self.write_output(&prefix, &rows)?;

        let summary = ExportSummary {
            template_rows: self.template_rows,
            records: rows.len(),
            output_path: self.output_path.clone(),
        };
        tracing::info!(
            "Exported {} responses below {} template rows",
            summary.records,
            summary.template_rows
        );
        Ok(summary)
    }

    /// Raw bytes of the template's first rows, ending with a line terminator.
    pub fn read_template_prefix(&self) -> Result<Vec<u8>, ExportError> {
        let template_error = |message: String| ExportError::Template {
            path: self.template_path.clone(),
            message,
        };

        let bytes = fs::read(&self.template_path).map_err(|e| template_error(e.to_string()))?;

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(bytes.as_slice());
        let mut record = csv::StringRecord::new();
        for found in 0..self.template_rows {
            let more = reader
                .read_record(&mut record)
                .map_err(|e| template_error(e.to_string()))?;
            if !more {
                return Err(template_error(format!(
                    "has {} rows, {} required",
                    found, self.template_rows
                )));
            }
        }

        // The reader may stop between the two bytes of a CRLF terminator
        let mut end = reader.position().byte() as usize;
        while end < bytes.len() && matches!(bytes[end], b'\r' | b'\n') {
            end += 1;
        }

        let mut prefix = bytes[..end].to_vec();
        if !prefix.is_empty() && !prefix.ends_with(b"\n") {
            prefix.extend_from_slice(b"\r\n");
        }
        Ok(prefix)
    }

    /// One output row per record, in the order given.
    pub fn build_rows(
        &self,
        schema: &SurveySchema,
        records: &[SurveyRecord],
    ) -> Result<Vec<Vec<String>>, ExportError> {
        records
            .iter()
            .map(|record| self.build_row(schema, record))
            .collect()
    }

    fn build_row(
        &self,
        schema: &SurveySchema,
        record: &SurveyRecord,
    ) -> Result<Vec<String>, ExportError> {
        let mut row = vec![String::new(); self.placeholder_columns];
        row.reserve(schema.export_columns().len());

        for column in schema.export_columns() {
            let resolution_error = |message: String| ExportError::Resolution {
                record_id: record.id,
                column: column.clone(),
                message,
            };
            let slot = schema
                .slot(column)
                .ok_or_else(|| resolution_error("no such slot".to_string()))?;
            let value = self
                .resolver
                .resolve(slot, record.get(column))
                .map_err(|e| resolution_error(e.to_string()))?;
            row.push(value);
        }

        Ok(row)
    }

    fn write_output(&self, prefix: &[u8], rows: &[Vec<String>]) -> Result<(), ExportError> {
        if let Some(parent) = self.output_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp_path = temporary_path(&self.output_path);
        let result = write_file(&tmp_path, prefix, rows)
            .and_then(|()| fs::rename(&tmp_path, &self.output_path).map_err(ExportError::from));
        if result.is_err() {
            fs::remove_file(&tmp_path).ok();
        }
        result
    }
}

fn write_file(path: &Path, prefix: &[u8], rows: &[Vec<String>]) -> Result<(), ExportError> {
    let mut out = BufWriter::new(File::create(path)?);
    out.write_all(prefix)?;

    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer(out);
    for row in rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn temporary_path(output: &Path) -> PathBuf {
    let name = output
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "export.csv".to_string());
    output.with_file_name(format!(".{}.tmp", name))
}
