//! CLI argument parsing and query execution.
//!
//! # Example
//!
//! ```bash
//! csvmodel people.csv --where active=true
//! csvmodel people.csv --where active=true --where-not name=Bob --select id,name
//! csvmodel people.csv --format csv --config csvmodel.yaml
//! csvmodel people.csv --where active=true --count
//! ```

use crate::output::{OutputFormat, write_rows};
use anyhow::{Context, Result};
use clap::Parser;
use csvmodel::{FilterMode, QueryBuilder, ReaderConfig, column_eq, column_ne};
use std::io::Write;
use std::path::PathBuf;

/// csvmodel - filter rows of a CSV file
///
/// Reads a comma-separated file whose first line is the header, keeps the
/// rows matching every condition, and prints them.
#[derive(Parser, Debug)]
#[command(name = "csvmodel")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// CSV file to query
    pub file: PathBuf,

    /// Keep rows where COLUMN equals VALUE (repeatable)
    #[arg(short = 'w', long = "where", value_name = "COLUMN=VALUE", value_parser = parse_condition)]
    pub conditions: Vec<Condition>,

    /// Keep rows where COLUMN is present and differs from VALUE (repeatable)
    #[arg(long = "where-not", value_name = "COLUMN=VALUE", value_parser = parse_condition)]
    pub exclusions: Vec<Condition>,

    /// Only output these columns, in this order (comma-separated)
    #[arg(short, long, value_delimiter = ',', conflicts_with = "count")]
    pub select: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json", conflicts_with = "count")]
    pub format: OutputFormat,

    /// Print the number of matching rows instead of the rows
    #[arg(short, long)]
    pub count: bool,

    /// YAML file with reader options
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Field delimiter (overrides the config file)
    #[arg(short, long, value_parser = parse_delimiter)]
    pub delimiter: Option<char>,

    /// Decide each row by the last condition only instead of all of them
    #[arg(long)]
    pub last_wins: bool,
}

/// A `COLUMN=VALUE` pair from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    /// Column name.
    pub column: String,
    /// Expected value.
    pub value: String,
}

/// Parse a `COLUMN=VALUE` condition.
///
/// Splits at the first `=`, so values may themselves contain `=`.
pub fn parse_condition(s: &str) -> Result<Condition, String> {
    let Some((column, value)) = s.split_once('=') else {
        return Err(format!("Invalid condition '{s}'. Expected COLUMN=VALUE"));
    };
    if column.is_empty() {
        return Err("Condition column cannot be empty".to_string());
    }
    Ok(Condition {
        column: column.to_string(),
        value: value.to_string(),
    })
}

/// Parse a single ASCII delimiter character. `\t` is accepted for tab.
pub fn parse_delimiter(s: &str) -> Result<char, String> {
    if s == "\\t" {
        return Ok('\t');
    }
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii() => Ok(c),
        _ => Err(format!(
            "Invalid delimiter '{s}'. Expected a single ASCII character"
        )),
    }
}

impl Cli {
    /// Parse command-line arguments.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Build the reader configuration from the config file and flags.
    ///
    /// # Errors
    ///
    /// Fails if the config file cannot be loaded or the result is invalid.
    pub fn reader_config(&self) -> Result<ReaderConfig> {
        let mut config = match &self.config {
            Some(path) => ReaderConfig::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => ReaderConfig::default(),
        };
        if let Some(delimiter) = self.delimiter {
            config.delimiter = delimiter;
        }
        if self.last_wins {
            config.filter_mode = FilterMode::LastWins;
        }
        config.validate()?;
        Ok(config)
    }

    /// Run the query and write its result to `out`.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be opened or parsed, if a selected column is
    /// missing from the header, or if writing the output fails.
    pub fn execute(&self, out: &mut impl Write) -> Result<()> {
        let config = self.reader_config()?;
        let mut query = QueryBuilder::open(&self.file)
            .with_context(|| format!("Failed to open {}", self.file.display()))?
            .with_config(config);
        for condition in &self.conditions {
            query = query.filter(column_eq(&condition.column, &condition.value));
        }
        for exclusion in &self.exclusions {
            query = query.filter(column_ne(&exclusion.column, &exclusion.value));
        }
        tracing::debug!(
            file = %self.file.display(),
            predicates = query.predicate_count(),
            "running query"
        );

        if self.count {
            let matched = query
                .count()
                .with_context(|| format!("Failed to query {}", self.file.display()))?;
            writeln!(out, "{matched}")?;
            return Ok(());
        }

        let rows = if self.select.is_empty() {
            query.rows()
        } else {
            query.select(&self.select)
        }
        .with_context(|| format!("Failed to query {}", self.file.display()))?;
        write_rows(out, &rows, &self.select, self.format)?;
        Ok(())
    }
}
