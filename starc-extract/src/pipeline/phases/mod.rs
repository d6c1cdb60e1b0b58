//! Built-in pipeline phases.
//!
//! - [`CheckPhase`] - runs the front end over the package
//! - [`ScanPhase`] - collects identifiers named by registration calls
//! - [`ClassifyPhase`] - classifies definitions, then uses
//! - [`AssemblePhase`] - builds the generation model

mod assemble;
mod check;
mod classify;
mod scan;

pub use assemble::AssemblePhase;
pub use check::CheckPhase;
pub use classify::ClassifyPhase;
pub use scan::ScanPhase;
