//! # Lapidary CLI
//!
//! Runs the packing pipeline over one ABI-shaped compilation unit and
//! writes the manifest artifacts. When a reference manifest is supplied,
//! the run ends with a diff and a policy gate verdict; a failing verdict
//! is the process exit code, so CI can wire this directly.
//!
//! ## Usage
//!
//! ```text
//! lapidary <unit.abi.json>
//! ```
//!
//! ## Environment
//!
//! - `LAPIDARY_VERSION`   version string baked into the manifest (default 1.0.0)
//! - `LAPIDARY_OUT`       output directory (default ./out)
//! - `LAPIDARY_REFERENCE` path to a reference minimal manifest to diff against
//! - `LAPIDARY_FAIL_ON`   gate policy: `hazards` (default) or `strict`
//! - `RUST_LOG`           tracing filter (default `info`)

use anyhow::{bail, Context, Result};
use lapidary_runtime::Pipeline;
use lp_01_inventory::RawUnit;
use lp_05_manifest::{load_minimal, save_manifest, save_minimal, MinimalManifest};
use lp_07_diff::{
    banned_selectors, diff_manifests, evaluate_gate, GatePolicy, GateVerdict, OwnershipView,
};
use shared_types::PipelineConfig;
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

struct CliConfig {
    unit_path: PathBuf,
    version: String,
    out_dir: PathBuf,
    reference: Option<PathBuf>,
    policy: GatePolicy,
}

/// Reads the invocation from argv and environment overrides.
fn load_cli_config() -> Result<CliConfig> {
    let unit_path = std::env::args()
        .nth(1)
        .context("usage: lapidary <unit.abi.json>")?;

    let version = std::env::var("LAPIDARY_VERSION").unwrap_or_else(|_| "1.0.0".to_string());
    let out_dir = std::env::var("LAPIDARY_OUT").unwrap_or_else(|_| "out".to_string());
    let reference = std::env::var("LAPIDARY_REFERENCE").ok().map(PathBuf::from);

    let policy = match std::env::var("LAPIDARY_FAIL_ON").as_deref() {
        Ok("strict") => GatePolicy::strict(),
        Ok("hazards") | Err(_) => GatePolicy::hazards_only(),
        Ok(other) => bail!("unknown LAPIDARY_FAIL_ON value '{other}' (strict|hazards)"),
    };

    Ok(CliConfig {
        unit_path: PathBuf::from(unit_path),
        version,
        out_dir: PathBuf::from(out_dir),
        reference,
        policy,
    })
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let cli = load_cli_config()?;

    let raw = fs::read_to_string(&cli.unit_path)
        .with_context(|| format!("reading unit {}", cli.unit_path.display()))?;
    let unit: RawUnit = serde_json::from_str(&raw)
        .with_context(|| format!("parsing unit {}", cli.unit_path.display()))?;

    let config = PipelineConfig::for_version(&cli.version)?;
    let pipeline = Pipeline::new(config);
    let output = pipeline
        .run(&unit)
        .with_context(|| format!("packing unit '{}'", unit.name))?;

    for warning in output.warnings.as_slice() {
        warn!("{warning}");
    }

    fs::create_dir_all(&cli.out_dir)
        .with_context(|| format!("creating output directory {}", cli.out_dir.display()))?;
    for module in &output.modules {
        let path = cli.out_dir.join(format!("{}.sol", module.name));
        fs::write(&path, &module.source)
            .with_context(|| format!("writing {}", path.display()))?;
    }
    save_manifest(&output.manifest, &cli.out_dir.join("manifest.json"))?;
    let minimal = MinimalManifest::from_manifest(&output.manifest);
    save_minimal(&minimal, &cli.out_dir.join("manifest.min.json"))?;

    info!(
        version = %output.manifest.version,
        modules = output.manifest.facets.len(),
        selectors = output.manifest.selector_count(),
        root = %output.manifest.root,
        out = %cli.out_dir.display(),
        "pipeline complete"
    );

    // Diff and gate only when a reference exists; a first deployment has
    // nothing to compare against and passes as NoReference.
    let report = match &cli.reference {
        Some(path) => {
            let reference = load_minimal(path, None)
                .with_context(|| format!("loading reference {}", path.display()))?;
            let strict = OwnershipView::from_minimal(&reference)?;
            let canary = OwnershipView::from_minimal(&minimal)?;
            Some(diff_manifests(&strict, &canary, &banned_selectors(pipeline.config())))
        }
        None => None,
    };

    if let Some(report) = &report {
        print!("{}", report.render());
    }

    match evaluate_gate(report.as_ref(), &cli.policy) {
        GateVerdict::Pass => {
            info!("gate: pass");
            Ok(())
        }
        GateVerdict::NoReference => {
            info!("gate: no reference manifest, nothing to compare");
            Ok(())
        }
        GateVerdict::Fail { triggered } => {
            bail!("gate failed on {triggered:?}")
        }
    }
}
