//! Drives a [`ComponentFactory`] from RF2 content.
//!
//! Each `import_*` function streams one RF2 file through [`Rf2Parser`] and
//! hands every row to the factory. [`load_taxonomy`] runs a whole import:
//! the snapshot release, an optional delta release, then error reporting.
//!
//! Locating release files on disk is left to the caller; any
//! [`std::io::Read`] works, including in-memory strings.
//!
//! # Example
//!
//! ```
//! use snomed_taxonomy::{load_taxonomy, FunctionalSyntaxParser, LoaderConfig, Rf2Release};
//!
//! let concepts = "id\teffectiveTime\tactive\tmoduleId\tdefinitionStatusId\n\
//!     138875005\t20020131\t1\t900000000000207008\t900000000000074008\n";
//!
//! let snapshot = Rf2Release::new().with_concepts(concepts.as_bytes());
//! let taxonomy = load_taxonomy(
//!     FunctionalSyntaxParser::new(),
//!     LoaderConfig::default(),
//!     snapshot,
//!     None,
//! )
//! .unwrap();
//!
//! assert!(taxonomy.contains_concept(138875005));
//! ```

use std::io::Read;

use snomed_types::{Rf2Concept, Rf2RefsetMember, Rf2Relationship};

use crate::axiom::AxiomParser;
use crate::factory::ComponentFactory;
use crate::loader::TaxonomyLoader;
use crate::parser::{Rf2Parser, Rf2Record};
use crate::taxonomy::SnomedTaxonomy;
use crate::types::{LoaderConfig, Rf2Result, TaxonomyResult};

/// Streams every row of `reader` into `apply`, returning the number of rows.
///
/// Stops at the first row the parser rejects.
fn import_rows<R, T, F>(reader: R, factory: &mut F, apply: fn(&mut F, &T)) -> Rf2Result<usize>
where
    R: Read,
    T: Rf2Record,
    F: ComponentFactory + ?Sized,
{
    let parser = Rf2Parser::<R, T>::from_reader(reader)?;
    let mut count = 0;
    for row in parser {
        apply(factory, &row?);
        count += 1;
    }
    Ok(count)
}

/// Imports a concept file.
pub fn import_concepts<R: Read, F: ComponentFactory + ?Sized>(
    reader: R,
    factory: &mut F,
) -> Rf2Result<usize> {
    import_rows::<R, Rf2Concept, F>(reader, factory, F::apply_concept_row)
}

/// Imports a stated or inferred relationship file.
pub fn import_relationships<R: Read, F: ComponentFactory + ?Sized>(
    reader: R,
    factory: &mut F,
) -> Rf2Result<usize> {
    import_rows::<R, Rf2Relationship, F>(reader, factory, F::apply_relationship_row)
}

/// Imports a reference set file of any pattern.
pub fn import_refset_members<R: Read, F: ComponentFactory + ?Sized>(
    reader: R,
    factory: &mut F,
) -> Rf2Result<usize> {
    import_rows::<R, Rf2RefsetMember, F>(reader, factory, F::apply_refset_member_row)
}

/// The RF2 files making up one phase of an import.
///
/// Files are imported concepts first, then relationships, then reference
/// set members, each group in the order it was added.
#[derive(Debug)]
pub struct Rf2Release<R> {
    /// Concept files.
    pub concepts: Vec<R>,
    /// Stated and inferred relationship files.
    pub relationships: Vec<R>,
    /// Reference set files.
    pub refset_members: Vec<R>,
}

impl<R> Default for Rf2Release<R> {
    fn default() -> Self {
        Self {
            concepts: Vec::new(),
            relationships: Vec::new(),
            refset_members: Vec::new(),
        }
    }
}

impl<R: Read> Rf2Release<R> {
    /// Creates an empty release.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a concept file.
    pub fn with_concepts(mut self, reader: R) -> Self {
        self.concepts.push(reader);
        self
    }

    /// Adds a relationship file.
    pub fn with_relationships(mut self, reader: R) -> Self {
        self.relationships.push(reader);
        self
    }

    /// Adds a reference set file.
    pub fn with_refset_members(mut self, reader: R) -> Self {
        self.refset_members.push(reader);
        self
    }

    /// Imports every file into `factory` and returns the total row count.
    pub fn import_into<F: ComponentFactory + ?Sized>(self, factory: &mut F) -> Rf2Result<usize> {
        let mut total = 0;

        for reader in self.concepts {
            let count = import_concepts(reader, factory)?;
            tracing::debug!("Imported {} concept rows", count);
            total += count;
        }
        for reader in self.relationships {
            let count = import_relationships(reader, factory)?;
            tracing::debug!("Imported {} relationship rows", count);
            total += count;
        }
        for reader in self.refset_members {
            let count = import_refset_members(reader, factory)?;
            tracing::debug!("Imported {} reference set rows", count);
            total += count;
        }

        Ok(total)
    }
}

/// Loads a taxonomy from a snapshot release and an optional delta release.
///
/// # Errors
/// Returns [`TaxonomyError::Rf2`](crate::TaxonomyError::Rf2) if any file
/// cannot be read, or [`TaxonomyError::AxiomParse`](crate::TaxonomyError::AxiomParse)
/// for the first axiom member that failed to parse.
pub fn load_taxonomy<P, R>(
    axiom_parser: P,
    config: LoaderConfig,
    snapshot: Rf2Release<R>,
    delta: Option<Rf2Release<R>>,
) -> TaxonomyResult<SnomedTaxonomy<P::Axiom>>
where
    P: AxiomParser,
    R: Read,
{
    let mut loader = TaxonomyLoader::with_config(axiom_parser, config);

    loader.begin_snapshot_phase()?;
    let rows = snapshot.import_into(&mut loader)?;
    tracing::info!("Snapshot import applied {} rows", rows);

    if let Some(delta) = delta {
        loader.begin_delta_phase();
        let rows = delta.import_into(&mut loader)?;
        tracing::info!("Delta import applied {} rows", rows);
    }

    loader.report_errors()
}
