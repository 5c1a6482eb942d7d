//! Reader configuration.
//!
//! [`ReaderConfig`] controls how the delimited text is split into rows and
//! how attached predicates are combined. It can be built in code or loaded
//! from a YAML file:
//!
//! ```yaml
//! delimiter: ";"
//! trim: all
//! comment: "#"
//! filter-mode: last-wins
//! ```

use crate::error::{Error, Result};
use crate::predicate::FilterMode;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Whitespace trimming applied while reading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrimMode {
    /// Keep values exactly as written.
    #[default]
    None,
    /// Trim header names only.
    Headers,
    /// Trim data values only.
    Fields,
    /// Trim header names and data values.
    All,
}

impl From<TrimMode> for csv::Trim {
    fn from(mode: TrimMode) -> Self {
        match mode {
            TrimMode::None => csv::Trim::None,
            TrimMode::Headers => csv::Trim::Headers,
            TrimMode::Fields => csv::Trim::Fields,
            TrimMode::All => csv::Trim::All,
        }
    }
}

/// Options for reading a source and filtering its rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct ReaderConfig {
    /// Field separator.
    pub delimiter: char,
    /// Quote character.
    pub quote: char,
    /// Whitespace trimming.
    pub trim: TrimMode,
    /// Lines starting with this character are ignored.
    pub comment: Option<char>,
    /// How attached predicates are combined.
    pub filter_mode: FilterMode,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            quote: '"',
            trim: TrimMode::None,
            comment: None,
            filter_mode: FilterMode::All,
        }
    }
}

impl ReaderConfig {
    /// Parses a configuration from YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the YAML is invalid or names an unknown
    /// option, or if the separator characters fail [`validate`](Self::validate).
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read and [`Error::Config`]
    /// if its contents are invalid.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Checks that every separator character fits in one byte and that the
    /// delimiter, quote and comment characters are all distinct.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] naming the offending option.
    pub fn validate(&self) -> Result<()> {
        ascii_byte("delimiter", self.delimiter)?;
        ascii_byte("quote", self.quote)?;
        if self.delimiter == self.quote {
            return Err(Error::Config(
                "delimiter and quote must be different characters".to_string(),
            ));
        }
        if let Some(comment) = self.comment {
            ascii_byte("comment", comment)?;
            if comment == self.delimiter {
                return Err(Error::Config(
                    "comment and delimiter must be different characters".to_string(),
                ));
            }
            if comment == self.quote {
                return Err(Error::Config(
                    "comment and quote must be different characters".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Builds a `csv` reader configured with these options.
    ///
    /// The first record is always treated as the header and every data record
    /// must have as many fields as the header.
    pub(crate) fn reader_builder(&self) -> Result<csv::ReaderBuilder> {
        self.validate()?;
        let mut builder = csv::ReaderBuilder::new();
        builder
            .has_headers(true)
            .flexible(false)
            .delimiter(ascii_byte("delimiter", self.delimiter)?)
            .quote(ascii_byte("quote", self.quote)?)
            .trim(self.trim.into())
            .comment(self.comment.map(|c| ascii_byte("comment", c)).transpose()?);
        Ok(builder)
    }
}

fn ascii_byte(option: &str, c: char) -> Result<u8> {
    if c.is_ascii() {
        Ok(c as u8)
    } else {
        Err(Error::Config(format!(
            "{option} must be a single ASCII character, got {c:?}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn default_is_plain_comma_separated() {
        let config = ReaderConfig::default();
        assert_eq!(config.delimiter, ',');
        assert_eq!(config.quote, '"');
        assert_eq!(config.trim, TrimMode::None);
        assert_eq!(config.comment, None);
        assert_eq!(config.filter_mode, FilterMode::All);
    }

    #[test]
    fn empty_yaml_object_uses_defaults() {
        let config = ReaderConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, ReaderConfig::default());
    }

    #[test]
    fn parses_every_option() {
        let config = ReaderConfig::from_yaml_str(
            "delimiter: \";\"\nquote: \"'\"\ntrim: all\ncomment: \"#\"\nfilter-mode: last-wins\n",
        )
        .unwrap();
        assert_eq!(config.delimiter, ';');
        assert_eq!(config.quote, '\'');
        assert_eq!(config.trim, TrimMode::All);
        assert_eq!(config.comment, Some('#'));
        assert_eq!(config.filter_mode, FilterMode::LastWins);
    }

    #[test]
    fn unknown_option_is_rejected() {
        let err = ReaderConfig::from_yaml_str("seperator: \";\"").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn non_ascii_delimiter_is_rejected() {
        let err = ReaderConfig::from_yaml_str("delimiter: \"§\"").unwrap_err();
        assert!(matches!(err, Error::Config(ref msg) if msg.contains("delimiter")));
    }

    #[test]
    fn delimiter_equal_to_quote_is_rejected() {
        let config = ReaderConfig {
            delimiter: '"',
            ..ReaderConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn comment_equal_to_delimiter_is_rejected() {
        let config = ReaderConfig {
            comment: Some(','),
            ..ReaderConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, Error::Config(ref msg) if msg.contains("comment and delimiter")));
    }

    #[test]
    fn comment_equal_to_quote_is_rejected() {
        let err = ReaderConfig::from_yaml_str("quote: \"'\"\ncomment: \"'\"\n").unwrap_err();
        assert!(matches!(err, Error::Config(ref msg) if msg.contains("comment and quote")));
    }

    #[test]
    fn comment_equal_to_delimiter_fails_reader_build() {
        let config = ReaderConfig {
            delimiter: ';',
            comment: Some(';'),
            ..ReaderConfig::default()
        };
        assert!(config.reader_builder().is_err());
    }

    #[test]
    fn load_reads_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "delimiter: \"|\"").unwrap();
        let config = ReaderConfig::load(file.path()).unwrap();
        assert_eq!(config.delimiter, '|');
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = ReaderConfig::load(Path::new("/nonexistent/csvmodel.yaml")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
