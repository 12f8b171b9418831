//! The staged pipeline run.
//!
//! One [`Pipeline::run`] drives extract → select → bucket → pack →
//! manifest over a single compilation unit. Every stage is pure and
//! synchronous; configuration comes in explicitly through
//! [`PipelineConfig`], never from ambient state. A failed stage aborts the
//! run with the stage's own error, so there is no partial output to clean
//! up.

use lp_01_inventory::{extract_inventory, InventoryError, RawUnit};
use lp_02_selectors::{CollisionReport, SelectorMap};
use lp_03_bucketing::{bucket_inventory, RuleTable};
use lp_04_packing::{pack_buckets, PackedModule, PackingError};
use lp_05_manifest::{build_manifest, Manifest, ManifestError};
use shared_types::{FunctionDescriptor, PipelineConfig, Warnings};
use thiserror::Error;
use tracing::{info, info_span};

/// A fatal pipeline failure, tagged with the stage that produced it.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Inventory extraction rejected the input unit.
    #[error(transparent)]
    Inventory(#[from] InventoryError),

    /// Distinct signatures share a selector. Collisions are fatal at the
    /// selection stage; the full signature sets are carried verbatim.
    #[error("{} selector collision(s) in inventory", .0.len())]
    SelectorCollisions(Vec<CollisionReport>),

    /// Packing failed (size ceiling, reserved function).
    #[error(transparent)]
    Packing(#[from] PackingError),

    /// Manifest construction failed.
    #[error(transparent)]
    Manifest(#[from] ManifestError),
}

/// Everything a successful run produces.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// The extracted canonical inventory, in source order.
    pub inventory: Vec<FunctionDescriptor>,
    /// Packed modules, in packing order.
    pub modules: Vec<PackedModule>,
    /// The versioned manifest with root and proofs.
    pub manifest: Manifest,
    /// Non-fatal advisories accumulated across all stages.
    pub warnings: Warnings,
}

/// The staged packing pipeline.
pub struct Pipeline {
    config: PipelineConfig,
    rules: RuleTable,
}

impl Pipeline {
    /// Creates a pipeline with the standard rule table.
    #[must_use]
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            rules: RuleTable::standard(),
        }
    }

    /// Creates a pipeline with a caller-supplied rule table.
    #[must_use]
    pub fn with_rules(config: PipelineConfig, rules: RuleTable) -> Self {
        Self { config, rules }
    }

    /// The configuration this pipeline runs under.
    #[must_use]
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Runs all five stages over one compilation unit.
    ///
    /// ## Errors
    ///
    /// Any stage failure aborts the run; see [`PipelineError`]. Warnings
    /// never abort and are returned with the output.
    pub fn run(&self, unit: &RawUnit) -> Result<PipelineOutput, PipelineError> {
        let mut warnings = Warnings::new();

        let inventory = {
            let _span = info_span!("stage", id = "01-inventory").entered();
            let (inventory, stage_warnings) = extract_inventory(unit)?;
            info!(unit = %unit.name, functions = inventory.len(), "extracted inventory");
            warnings.extend(stage_warnings);
            inventory
        };

        {
            let _span = info_span!("stage", id = "02-selectors").entered();
            let map = SelectorMap::from_inventory(&inventory);
            let collisions = map.collisions();
            if !collisions.is_empty() {
                return Err(PipelineError::SelectorCollisions(collisions));
            }
            info!(selectors = inventory.len(), "selector set is collision-free");
        }

        let buckets = {
            let _span = info_span!("stage", id = "03-bucketing").entered();
            let (buckets, stage_warnings) = bucket_inventory(&inventory, &self.rules);
            warnings.extend(stage_warnings);
            buckets
        };

        let modules = {
            let _span = info_span!("stage", id = "04-packing").entered();
            let (modules, stage_warnings) = pack_buckets(&buckets, &self.config)?;
            info!(modules = modules.len(), "packed modules");
            warnings.extend(stage_warnings);
            modules
        };

        let manifest = {
            let _span = info_span!("stage", id = "05-manifest").entered();
            build_manifest(&modules, &self.config.version)?
        };

        Ok(PipelineOutput {
            inventory,
            modules,
            manifest,
            warnings,
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================
