//! Extraction of registration shims for Beam Go pipelines.
//!
//! Given a type-checked package, find every user function, structural
//! processing unit and callback shape that needs generated registration
//! code, and describe it as a [`starcgen_ir::Top`].
//!
//! ```text
//! check → scan (RegisterDoFn calls) → classify (defs, then uses) → assemble
//! ```

pub mod assemble;
pub mod classify;
mod config;
pub mod conventions;
pub mod entities;
mod error;
mod extractor;
pub mod naming;
pub mod pipeline;
pub mod scan;
pub mod shape;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use assemble::{Target, assemble};
pub use classify::{Classifier, RequiredIds};
pub use config::ExtractConfig;
pub use entities::{Entities, ImportSet, Summary};
pub use error::Error;
pub use extractor::{Extraction, Extractor};
pub use pipeline::{Diagnostic, Pipeline, Severity, SnapshotPlugin};
pub use scan::RegisterCallScanner;
pub use shape::TypeNamer;
