//! Error, configuration and statistics types for taxonomy loading.

use chrono::Datelike;
use snomed_types::EffectiveTime;
use thiserror::Error;

/// Errors raised by the RF2 row source before a row reaches the taxonomy.
#[derive(Error, Debug)]
pub enum Rf2Error {
    /// CSV parsing error.
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// Invalid SCTID format.
    #[error("Invalid SCTID format: {value}")]
    InvalidSctId {
        /// The invalid value that was encountered.
        value: String,
    },

    /// Missing required column in an RF2 row.
    #[error("Missing required column: {column}")]
    MissingColumn {
        /// The name of the missing column.
        column: String,
    },

    /// Invalid date format.
    #[error("Invalid date format: {value}")]
    InvalidDate {
        /// The invalid date value.
        value: String,
    },

    /// Invalid boolean value.
    #[error("Invalid boolean value: {value} (expected 0 or 1)")]
    InvalidBoolean {
        /// The invalid boolean value.
        value: String,
    },

    /// Invalid integer value.
    #[error("Invalid integer value: {value}")]
    InvalidInteger {
        /// The invalid integer value.
        value: String,
    },

    /// Invalid header - column count mismatch.
    #[error("Invalid header: expected at least {expected} columns, found {found}")]
    InvalidHeader {
        /// Expected column count.
        expected: usize,
        /// Found column count.
        found: usize,
    },

    /// Unexpected column name.
    #[error("Unexpected column '{found}' at position {position}, expected '{expected}'")]
    UnexpectedColumn {
        /// The column position.
        position: usize,
        /// Expected column name.
        expected: String,
        /// Found column name.
        found: String,
    },
}

/// Result type for RF2 row source operations.
pub type Rf2Result<T> = Result<T, Rf2Error>;

/// Errors produced while turning an axiom expression into a parsed axiom.
#[derive(Error, Debug)]
pub enum AxiomError {
    /// The ontology document is not well-formed functional syntax.
    #[error("Malformed OWL document at offset {offset}: {message}")]
    Syntax {
        /// Byte offset into the ontology document.
        offset: usize,
        /// What the parser expected or found.
        message: String,
    },

    /// A prefixed name used a prefix that was never declared.
    #[error("Undeclared prefix '{prefix}:' at offset {offset}")]
    UnknownPrefix {
        /// The prefix, without its trailing colon.
        prefix: String,
        /// Byte offset into the ontology document.
        offset: usize,
    },

    /// The document parsed but did not hold exactly one axiom.
    #[error("OWL Axiom reference set member should contain a single Axiom, found {found}")]
    AxiomCount {
        /// Number of axioms found.
        found: usize,
    },

    /// Failure reported by an externally supplied parser.
    #[error("External axiom parser failed: {0}")]
    External(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Run-level failures of a taxonomy import.
#[derive(Error, Debug)]
pub enum TaxonomyError {
    /// The first axiom member that failed to parse during the run.
    #[error("Failed to parse OWL Axiom in reference set member '{member_id}'")]
    AxiomParse {
        /// Id of the offending reference set member.
        member_id: String,
        /// Underlying parse failure.
        #[source]
        source: AxiomError,
    },

    /// A snapshot phase was requested after the delta phase began.
    #[error("Cannot begin the snapshot phase after the delta phase has started")]
    PhaseRegression,

    /// The row source failed before the stream was complete.
    #[error(transparent)]
    Rf2(#[from] Rf2Error),
}

/// Result type for taxonomy operations.
pub type TaxonomyResult<T> = Result<T, TaxonomyError>;

/// Configuration for a taxonomy import run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    /// Effective time given to relationships whose row carries none.
    ///
    /// Defaults to the local date when the config is created.
    pub effective_time_now: EffectiveTime,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            effective_time_now: today(),
        }
    }
}

impl LoaderConfig {
    /// Overrides the default effective time.
    pub fn with_effective_time_now(mut self, effective_time: EffectiveTime) -> Self {
        self.effective_time_now = effective_time;
        self
    }
}

/// Local date as a `YYYYMMDD` integer.
fn today() -> EffectiveTime {
    let date = chrono::Local::now().date_naive();
    date.year() as u32 * 10_000 + date.month() * 100 + date.day()
}

/// Row counts gathered while an import runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportStats {
    /// Concept rows applied.
    pub concept_rows: usize,
    /// Relationship rows applied.
    pub relationship_rows: usize,
    /// OWL axiom member rows applied.
    pub axiom_member_rows: usize,
    /// OWL axiom member rows skipped after a parse failure.
    pub skipped_axiom_member_rows: usize,
    /// MRCM attribute domain rows applied.
    pub ungrouped_role_rows: usize,
    /// Reference set rows from refsets the taxonomy does not use.
    pub ignored_refset_rows: usize,
}

impl ImportStats {
    /// Total rows offered to the loader.
    pub fn total_rows(&self) -> usize {
        self.concept_rows
            + self.relationship_rows
            + self.axiom_member_rows
            + self.skipped_axiom_member_rows
            + self.ungrouped_role_rows
            + self.ignored_refset_rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_effective_time_is_a_plausible_date() {
        let config = LoaderConfig::default();
        let year = config.effective_time_now / 10_000;
        let month = config.effective_time_now / 100 % 100;
        let day = config.effective_time_now % 100;

        assert!(year >= 2020);
        assert!((1..=12).contains(&month));
        assert!((1..=31).contains(&day));
    }

    #[test]
    fn test_effective_time_override() {
        let config = LoaderConfig::default().with_effective_time_now(20240131);
        assert_eq!(config.effective_time_now, 20240131);
    }

    #[test]
    fn test_axiom_parse_error_message_names_member() {
        let error = TaxonomyError::AxiomParse {
            member_id: "e3a2c9f0".to_string(),
            source: AxiomError::AxiomCount { found: 2 },
        };

        assert_eq!(
            error.to_string(),
            "Failed to parse OWL Axiom in reference set member 'e3a2c9f0'"
        );
        let source = std::error::Error::source(&error).map(ToString::to_string);
        assert_eq!(
            source.as_deref(),
            Some("OWL Axiom reference set member should contain a single Axiom, found 2")
        );
    }

    #[test]
    fn test_import_stats_total() {
        let stats = ImportStats {
            concept_rows: 3,
            relationship_rows: 4,
            axiom_member_rows: 2,
            skipped_axiom_member_rows: 1,
            ungrouped_role_rows: 1,
            ignored_refset_rows: 5,
        };
        assert_eq!(stats.total_rows(), 16);
    }
}
