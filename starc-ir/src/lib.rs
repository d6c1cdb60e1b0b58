//! Generation model for the starcgen registration-shim generator.
//!
//! These types are the hand-off between the extractor and whatever renders
//! the final source file. They carry strings only: every type has already
//! been rendered the way the generated file must spell it.
//!
//! The model is designed to be:
//! - Renderer-agnostic (templates, JSON, or a direct writer all consume it)
//! - Deterministic (every list is sorted by the extractor)
//! - Self-contained (no reference back to the checked program)

mod shim;
mod top;

pub use shim::{Emitter, Func, Input, Wrap};
pub use top::Top;
