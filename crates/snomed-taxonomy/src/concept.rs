//! SNOMED CT Concept row parser.
//!
//! Parses sct2_Concept_*.txt RF2 content.

use csv::StringRecord;
use snomed_types::Rf2Concept;

use crate::parser::{parse, Rf2Record};
use crate::types::Rf2Result;

/// Expected columns in a concept file.
const CONCEPT_COLUMNS: &[&str] = &[
    "id",
    "effectiveTime",
    "active",
    "moduleId",
    "definitionStatusId",
];

impl Rf2Record for Rf2Concept {
    const EXPECTED_COLUMNS: &'static [&'static str] = CONCEPT_COLUMNS;

    fn from_record(record: &StringRecord, _header: &StringRecord) -> Rf2Result<Self> {
        Ok(Rf2Concept {
            id: parse::sctid(parse::field(record, 0, "id")?)?,
            effective_time: parse::optional_effective_time(parse::field(
                record,
                1,
                "effectiveTime",
            )?)?,
            active: parse::boolean(parse::field(record, 2, "active")?)?,
            module_id: parse::sctid(parse::field(record, 3, "moduleId")?)?,
            definition_status_id: parse::sctid(parse::field(record, 4, "definitionStatusId")?)?,
        })
    }
}
