//! Pipeline snapshot plugin for debugging.
//!
//! Captures the extraction state after each phase so the intermediate
//! results can be inspected (`--visualize`).

use std::{
    fs,
    path::{Path, PathBuf},
    sync::RwLock,
};

use eyre::{Result, eyre};
use serde::Serialize;
use starcgen_ir::Top;

use super::{Diagnostic, ExtractionContext, Plugin};
use crate::entities::Summary;

/// A snapshot of the extraction state at a specific phase.
#[derive(Debug, Clone, Serialize)]
pub struct PhaseSnapshot {
    /// The phase that just completed.
    pub phase: String,

    /// Entity counts so far.
    pub summary: Summary,

    /// The allow-list in effect (available after "scan", when non-empty).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,

    /// The generation model (available after "assemble").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<Top>,

    /// Diagnostics collected so far.
    pub diagnostics: Vec<Diagnostic>,
}

/// A plugin that captures extraction state after each phase.
///
/// # Example
///
/// ```ignore
/// let snapshots = Arc::new(SnapshotPlugin::new());
/// let pipeline = Pipeline::new(checker).plugin(snapshots.clone());
/// let ctx = pipeline.run(config, files, "main.shims.go")?;
///
/// snapshots.write_to_dir(".starcgen/debug")?;
/// ```
pub struct SnapshotPlugin {
    snapshots: RwLock<Vec<PhaseSnapshot>>,
    /// When set, each snapshot is written as it is captured.
    output_dir: Option<PathBuf>,
}

impl SnapshotPlugin {
    pub fn new() -> Self {
        Self {
            snapshots: RwLock::new(Vec::new()),
            output_dir: None,
        }
    }

    /// Create a snapshot plugin that writes `<phase>.json` into a directory.
    pub fn with_output_dir(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            snapshots: RwLock::new(Vec::new()),
            output_dir: Some(output_dir.into()),
        }
    }

    /// All collected snapshots.
    pub fn snapshots(&self) -> Vec<PhaseSnapshot> {
        match self.snapshots.read() {
            Ok(snapshots) => snapshots.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Write all snapshots to `dir`.
    pub fn write_to_dir(&self, dir: impl AsRef<Path>) -> Result<()> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;

        for snapshot in self.snapshots() {
            write_snapshot(dir, &snapshot)?;
        }

        Ok(())
    }

    fn capture_snapshot(&self, phase: &str, ctx: &ExtractionContext) -> Result<PhaseSnapshot> {
        let snapshot = PhaseSnapshot {
            phase: phase.to_string(),
            summary: ctx.entities.summary(),
            required: ctx
                .required
                .as_ref()
                .map(|r| r.iter().map(str::to_string).collect()),
            model: ctx.model.clone(),
            diagnostics: ctx.diagnostics.clone(),
        };
        self.snapshots
            .write()
            .map_err(|_| eyre!("snapshot store poisoned"))?
            .push(snapshot.clone());
        Ok(snapshot)
    }
}

fn write_snapshot(dir: &Path, snapshot: &PhaseSnapshot) -> Result<()> {
    let path = dir.join(format!("{}.json", snapshot.phase));
    let json = serde_json::to_string_pretty(snapshot)?;
    fs::write(&path, json)?;
    Ok(())
}

impl Default for SnapshotPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for SnapshotPlugin {
    fn name(&self) -> &'static str {
        "snapshot"
    }

    fn on_after_phase(&self, phase: &str, ctx: &mut ExtractionContext) -> Result<()> {
        let snapshot = self.capture_snapshot(phase, ctx)?;

        if let Some(dir) = &self.output_dir {
            fs::create_dir_all(dir)?;
            write_snapshot(dir, &snapshot)?;
        }

        Ok(())
    }
}

impl<P: Plugin + ?Sized> Plugin for std::sync::Arc<P> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn on_before_phase(&self, phase: &str, ctx: &mut ExtractionContext) -> Result<()> {
        (**self).on_before_phase(phase, ctx)
    }

    fn on_after_phase(&self, phase: &str, ctx: &mut ExtractionContext) -> Result<()> {
        (**self).on_after_phase(phase, ctx)
    }
}
