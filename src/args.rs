use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Collects National Park visitor survey responses and exports them for analysis.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    #[clap(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Serve the submission API. This is the default when no command is given.
    Serve,
    /// Write every stored response to the import CSV, beneath the template's header rows.
    Export {
        /// (file path) Template whose first rows are copied to the top of the export.
        /// Overrides PARK_SURVEY_EXPORT_TEMPLATE.
        #[clap(long, value_parser)]
        template: Option<PathBuf>,
        /// (file path) Where the export is written. Overrides PARK_SURVEY_EXPORT_OUTPUT.
        #[clap(long, value_parser)]
        output: Option<PathBuf>,
        /// Number of template rows to copy. Overrides PARK_SURVEY_TEMPLATE_ROWS.
        #[clap(long, value_parser)]
        template_rows: Option<usize>,
        /// (default 17) Number of empty metadata columns written before the answers.
        #[clap(long, value_parser)]
        metadata_columns: Option<usize>,
        /// (default ",") Separator placed between labels of multi-choice answers.
        #[clap(long, value_parser)]
        label_separator: Option<String>,
    },
}
