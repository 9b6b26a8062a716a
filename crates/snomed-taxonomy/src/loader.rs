//! Snapshot and delta taxonomy loader.
//!
//! [`TaxonomyLoader`] is the [`ComponentFactory`] that folds RF2 component
//! states into a [`SnomedTaxonomy`]. A run applies a snapshot, optionally a
//! delta on top of it, and finishes with [`TaxonomyLoader::report_errors`],
//! which surfaces the first axiom that failed to parse and otherwise hands
//! back the finished taxonomy.
//!
//! # Example
//!
//! ```
//! use snomed_taxonomy::{ComponentFactory, FunctionalSyntaxParser, LoaderConfig, TaxonomyLoader};
//! use snomed_taxonomy::snomed_types::{well_known, DefinitionStatus, Rf2Concept};
//!
//! let config = LoaderConfig::default().with_effective_time_now(20250131);
//! let mut loader = TaxonomyLoader::with_config(FunctionalSyntaxParser::new(), config);
//!
//! loader.begin_snapshot_phase().unwrap();
//! loader.apply_concept_row(&Rf2Concept {
//!     id: 73211009,
//!     effective_time: Some(20020131),
//!     active: true,
//!     module_id: well_known::SNOMED_CT_CORE_MODULE,
//!     definition_status_id: DefinitionStatus::FULLY_DEFINED_ID,
//! });
//! loader.apply_axiom_member_row(
//!     "5b3b7c8e-8a0b-4a47-9f2c-bb0a4bb8c6b1",
//!     true,
//!     73211009,
//!     "EquivalentClasses(:73211009 ObjectIntersectionOf(:362969004 :126877002))",
//! );
//!
//! let taxonomy = loader.report_errors().unwrap();
//! assert!(taxonomy.is_fully_defined(73211009));
//! assert_eq!(taxonomy.axiom_count(), 1);
//! ```

use snomed_types::{well_known, Relationship, Rf2Concept, Rf2RefsetMember, Rf2Relationship, SctId};

use crate::axiom::{deserialise_axiom, AxiomParser};
use crate::factory::ComponentFactory;
use crate::parser::parse;
use crate::phase::ImportPhase;
use crate::taxonomy::SnomedTaxonomy;
use crate::types::{AxiomError, ImportStats, LoaderConfig, TaxonomyError, TaxonomyResult};

/// Returns true if an MRCM attribute domain `grouped` value marks the
/// attribute as one that must never be grouped.
///
/// The column is named `grouped`, but the release encodes "not grouped"
/// as `"0"`.
pub fn is_ungrouped_flag(value: &str) -> bool {
    value == "0"
}

/// The first axiom failure of a run, held until errors are reported.
#[derive(Debug)]
struct DeferredAxiomFailure {
    member_id: String,
    error: AxiomError,
}

/// Folds component state rows into a [`SnomedTaxonomy`].
///
/// Concept, relationship and ungrouped-role rows only retract state in the
/// delta phase. Axiom member rows retract in either phase. An axiom that
/// fails to parse does not interrupt the run: the failure is kept, every
/// later axiom member row is skipped, and [`report_errors`](Self::report_errors)
/// returns it once the stream is done.
pub struct TaxonomyLoader<P: AxiomParser> {
    taxonomy: SnomedTaxonomy<P::Axiom>,
    axiom_parser: P,
    config: LoaderConfig,
    phase: ImportPhase,
    axiom_failure: Option<DeferredAxiomFailure>,
    stats: ImportStats,
}

impl<P: AxiomParser> std::fmt::Debug for TaxonomyLoader<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaxonomyLoader")
            .field("taxonomy", &self.taxonomy)
            .field("config", &self.config)
            .field("phase", &self.phase)
            .field("axiom_failure", &self.axiom_failure)
            .field("stats", &self.stats)
            .finish()
    }
}

impl<P: AxiomParser> TaxonomyLoader<P> {
    /// Creates a loader with the default configuration.
    pub fn new(axiom_parser: P) -> Self {
        Self::with_config(axiom_parser, LoaderConfig::default())
    }

    /// Creates a loader with an explicit configuration.
    pub fn with_config(axiom_parser: P, config: LoaderConfig) -> Self {
        Self {
            taxonomy: SnomedTaxonomy::new(),
            axiom_parser,
            config,
            phase: ImportPhase::Snapshot,
            axiom_failure: None,
            stats: ImportStats::default(),
        }
    }

    /// Current import phase.
    pub fn phase(&self) -> ImportPhase {
        self.phase
    }

    /// Configuration of this run.
    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Row counts so far.
    pub fn stats(&self) -> &ImportStats {
        &self.stats
    }

    /// The taxonomy as built so far.
    ///
    /// Only complete once the stream has ended and errors were reported.
    pub fn taxonomy(&self) -> &SnomedTaxonomy<P::Axiom> {
        &self.taxonomy
    }

    /// Returns true if an axiom failure is waiting to be reported.
    pub fn has_deferred_error(&self) -> bool {
        self.axiom_failure.is_some()
    }

    /// Starts the snapshot phase.
    ///
    /// # Errors
    /// Returns [`TaxonomyError::PhaseRegression`] once the delta phase has begun.
    pub fn begin_snapshot_phase(&mut self) -> TaxonomyResult<()> {
        if self.phase.is_delta() {
            return Err(TaxonomyError::PhaseRegression);
        }
        tracing::info!("Beginning snapshot import phase");
        Ok(())
    }

    /// Switches to the delta phase. Inactive rows retract state from here on.
    pub fn begin_delta_phase(&mut self) {
        if !self.phase.is_delta() {
            tracing::info!(
                "Snapshot phase complete ({} rows); beginning delta import phase",
                self.stats.total_rows()
            );
        }
        self.phase = ImportPhase::Delta;
    }

    /// Applies one OWL axiom reference set member.
    ///
    /// Active members are parsed and stored under
    /// `(referenced_concept_id, member_id)`; inactive members remove that
    /// entry. After the first parse failure every further call is skipped.
    pub fn apply_axiom_member_row(
        &mut self,
        member_id: &str,
        active: bool,
        referenced_concept_id: SctId,
        expression: &str,
    ) {
        if self.axiom_failure.is_some() {
            self.stats.skipped_axiom_member_rows += 1;
            tracing::trace!("Skipping axiom member {} after earlier failure", member_id);
            return;
        }
        self.stats.axiom_member_rows += 1;

        if !active {
            self.taxonomy.remove_axiom(referenced_concept_id, member_id);
            return;
        }

        match deserialise_axiom(&self.axiom_parser, expression) {
            Ok(axiom) => {
                self.taxonomy
                    .add_axiom(referenced_concept_id, member_id.to_string(), axiom);
            }
            Err(error) => {
                tracing::warn!(
                    "Failed to parse OWL axiom in reference set member {}: {}; remaining axiom members will be skipped",
                    member_id,
                    error
                );
                self.axiom_failure = Some(DeferredAxiomFailure {
                    member_id: member_id.to_string(),
                    error,
                });
            }
        }
    }

    /// Applies one MRCM attribute domain fact.
    ///
    /// The attribute is recorded as ungrouped for the content type when the
    /// row is active and `grouped_value` is the ungrouped flag, and removed
    /// otherwise.
    pub fn apply_ungrouped_role_row(
        &mut self,
        active: bool,
        content_type_id: SctId,
        attribute_id: SctId,
        grouped_value: &str,
    ) {
        self.stats.ungrouped_role_rows += 1;
        if active && is_ungrouped_flag(grouped_value) {
            self.taxonomy.add_ungrouped_role(content_type_id, attribute_id);
        } else {
            self.taxonomy
                .remove_ungrouped_role(content_type_id, attribute_id);
        }
    }

    fn apply_attribute_domain_member(&mut self, member: &Rf2RefsetMember) {
        let (Some(grouped), Some(content_type)) = (member.other_value(1), member.other_value(5))
        else {
            tracing::warn!(
                "Skipping MRCM attribute domain member {}: expected at least 6 additional fields, found {}",
                member.id,
                member.other_values.len()
            );
            self.stats.ignored_refset_rows += 1;
            return;
        };

        match parse::sctid(content_type) {
            Ok(content_type_id) => self.apply_ungrouped_role_row(
                member.active,
                content_type_id,
                member.referenced_component_id,
                grouped,
            ),
            Err(e) => {
                tracing::warn!("Skipping MRCM attribute domain member {}: {}", member.id, e);
                self.stats.ignored_refset_rows += 1;
            }
        }
    }

    /// Ends the run.
    ///
    /// # Errors
    /// Returns [`TaxonomyError::AxiomParse`] carrying the first axiom member
    /// that failed to parse. Otherwise the finished taxonomy is returned.
    pub fn report_errors(self) -> TaxonomyResult<SnomedTaxonomy<P::Axiom>> {
        if let Some(failure) = self.axiom_failure {
            return Err(TaxonomyError::AxiomParse {
                member_id: failure.member_id,
                source: failure.error,
            });
        }

        let taxonomy = self.taxonomy;
        tracing::info!(
            "Taxonomy loaded: {} concepts ({} fully defined), {} stated and {} inferred relationships, {} axioms",
            taxonomy.concept_count(),
            taxonomy.fully_defined_concept_ids().len(),
            taxonomy.stated_relationship_count(),
            taxonomy.inferred_relationship_count(),
            taxonomy.axiom_count()
        );
        tracing::debug!("Import row counts: {:?}", self.stats);

        Ok(taxonomy)
    }
}

impl<P: AxiomParser> ComponentFactory for TaxonomyLoader<P> {
    fn apply_concept_row(&mut self, concept: &Rf2Concept) {
        self.stats.concept_rows += 1;
        if concept.active {
            self.taxonomy
                .add_concept(concept.id, concept.is_fully_defined());
        } else if self.phase.is_delta() {
            self.taxonomy.remove_concept(concept.id);
        }
    }

    fn apply_relationship_row(&mut self, relationship: &Rf2Relationship) {
        self.stats.relationship_rows += 1;
        let axis = relationship.axis();
        if relationship.active {
            let value = Relationship::from_rf2(relationship, self.config.effective_time_now);
            self.taxonomy
                .add_or_modify_relationship(axis, relationship.source_id, value);
        } else if self.phase.is_delta() {
            self.taxonomy
                .remove_relationship(axis, relationship.source_id, relationship.id);
        }
    }

    fn apply_refset_member_row(&mut self, member: &Rf2RefsetMember) {
        match member.refset_id {
            well_known::OWL_AXIOM_REFSET => self.apply_axiom_member_row(
                &member.id,
                member.active,
                member.referenced_component_id,
                member.other_value(0).unwrap_or(""),
            ),
            well_known::MRCM_ATTRIBUTE_DOMAIN_INTERNATIONAL_REFSET => {
                self.apply_attribute_domain_member(member)
            }
            _ => {
                self.stats.ignored_refset_rows += 1;
                tracing::trace!(
                    "Ignoring member {} of reference set {}",
                    member.id,
                    member.refset_id
                );
            }
        }
    }
}
