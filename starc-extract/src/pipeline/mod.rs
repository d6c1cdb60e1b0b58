//! Extraction pipeline.
//!
//! A [`Pipeline`] runs the extraction phases over one package:
//!
//! - Explicit phase boundaries (check → scan → classify → assemble)
//! - Plugin hooks before and after each phase
//! - Diagnostics collected in [`ExtractionContext`], with the
//!   classification trace recorded only in debug mode
//!
//! # Example
//!
//! ```ignore
//! use starcgen_extract::pipeline::Pipeline;
//!
//! let ctx = Pipeline::new(checker).run(config, files, "main.shims.go")?;
//!
//! for diag in ctx.warnings() {
//!     eprintln!("warning: {}", diag);
//! }
//! ```

mod context;
mod diagnostic;
mod phase;
pub mod phases;
mod plugin;
mod runner;
mod snapshot;

pub use context::ExtractionContext;
pub use diagnostic::{Diagnostic, Severity, Trace, render_trace};
pub use phase::{Phase, PhaseInfo};
pub use plugin::Plugin;
pub use runner::Pipeline;
pub use snapshot::{PhaseSnapshot, SnapshotPlugin};
