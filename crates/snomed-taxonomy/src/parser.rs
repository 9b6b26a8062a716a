//! Generic RF2 row parser.
//!
//! Provides a streaming parser for SNOMED CT RF2 tab-delimited content. It
//! is the reference row source for the taxonomy loader: every row is parsed
//! and validated here, so malformed numbers or flags never reach the
//! taxonomy mergers.

use std::io::Read;
use std::marker::PhantomData;

use csv::{Reader, ReaderBuilder, StringRecord};
use snomed_types::{EffectiveTime, SctId};

use crate::types::{Rf2Error, Rf2Result};

/// Trait for types that can be parsed from RF2 records.
pub trait Rf2Record: Sized {
    /// Expected leading column names for this record type.
    const EXPECTED_COLUMNS: &'static [&'static str];

    /// Parse a record from a CSV StringRecord.
    ///
    /// `header` is the file's header row, for record types whose trailing
    /// columns vary between files.
    fn from_record(record: &StringRecord, header: &StringRecord) -> Rf2Result<Self>;
}

/// A streaming parser for RF2 content.
///
/// Rows are read one at a time and handed out in file order, so whole
/// releases never have to be held in memory.
pub struct Rf2Parser<R: Read, T: Rf2Record> {
    reader: Reader<R>,
    header: StringRecord,
    _marker: PhantomData<T>,
}

impl<R: Read, T: Rf2Record> Rf2Parser<R, T> {
    /// Creates a new parser from a reader.
    ///
    /// # Errors
    /// Returns an error if the header row is missing or does not start with
    /// the columns `T` expects.
    pub fn from_reader(reader: R) -> Rf2Result<Self> {
        let mut csv_reader = ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(true)
            .flexible(false)
            .quoting(false)
            .trim(csv::Trim::None)
            .from_reader(reader);

        let header = Self::validate_headers(&mut csv_reader)?;

        Ok(Self {
            reader: csv_reader,
            header,
            _marker: PhantomData,
        })
    }

    /// Validates that the content has the expected column headers.
    fn validate_headers(reader: &mut Reader<R>) -> Rf2Result<StringRecord> {
        let headers = reader.headers()?.clone();
        let expected = T::EXPECTED_COLUMNS;

        if headers.len() < expected.len() {
            return Err(Rf2Error::InvalidHeader {
                expected: expected.len(),
                found: headers.len(),
            });
        }

        for (i, expected_col) in expected.iter().enumerate() {
            let found = headers.get(i).unwrap_or("");
            // Handle UTF-8 BOM at start of file
            let found = found.trim_start_matches('\u{feff}');
            if found != *expected_col {
                return Err(Rf2Error::UnexpectedColumn {
                    position: i,
                    expected: expected_col.to_string(),
                    found: found.to_string(),
                });
            }
        }

        Ok(headers)
    }

    /// Returns the header row.
    pub fn header(&self) -> &StringRecord {
        &self.header
    }
}

impl<R: Read, T: Rf2Record> Iterator for Rf2Parser<R, T> {
    type Item = Rf2Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let mut record = StringRecord::new();
            match self.reader.read_record(&mut record) {
                Ok(true) => {
                    // Skip empty records
                    if record.is_empty() || record.iter().all(|f| f.trim().is_empty()) {
                        continue;
                    }

                    return Some(T::from_record(&record, &self.header));
                }
                Ok(false) => return None, // End of input
                Err(e) => return Some(Err(e.into())),
            }
        }
    }
}

/// Helper functions for parsing RF2 field values.
pub mod parse {
    use super::{EffectiveTime, Rf2Error, Rf2Result, SctId, StringRecord};

    /// Returns the field at `index`, or a missing-column error naming `column`.
    pub fn field<'r>(record: &'r StringRecord, index: usize, column: &str) -> Rf2Result<&'r str> {
        record.get(index).ok_or_else(|| Rf2Error::MissingColumn {
            column: column.to_string(),
        })
    }

    /// Parses an SCTID from a string.
    pub fn sctid(value: &str) -> Rf2Result<SctId> {
        value.parse::<u64>().map_err(|_| Rf2Error::InvalidSctId {
            value: value.to_string(),
        })
    }

    /// Parses a boolean from "0" or "1".
    pub fn boolean(value: &str) -> Rf2Result<bool> {
        match value {
            "0" => Ok(false),
            "1" => Ok(true),
            _ => Err(Rf2Error::InvalidBoolean {
                value: value.to_string(),
            }),
        }
    }

    /// Parses an effective time (YYYYMMDD) as u32.
    pub fn effective_time(value: &str) -> Rf2Result<EffectiveTime> {
        if value.len() != 8 {
            return Err(Rf2Error::InvalidDate {
                value: value.to_string(),
            });
        }
        value.parse::<u32>().map_err(|_| Rf2Error::InvalidDate {
            value: value.to_string(),
        })
    }

    /// Parses an effective time that delta content may leave blank.
    pub fn optional_effective_time(value: &str) -> Rf2Result<Option<EffectiveTime>> {
        if value.is_empty() {
            Ok(None)
        } else {
            effective_time(value).map(Some)
        }
    }

    /// Parses an integer value.
    pub fn integer<T: std::str::FromStr>(value: &str) -> Rf2Result<T> {
        value.parse::<T>().map_err(|_| Rf2Error::InvalidInteger {
            value: value.to_string(),
        })
    }
}
