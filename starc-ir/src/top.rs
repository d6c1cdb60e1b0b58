//! The generation model.
//!
//! ```text
//! CheckedPackage → Extractor (classification) → Top (ordered snapshot) → renderer
//! ```

use serde::{Deserialize, Serialize};

use crate::{Emitter, Func, Input, Wrap};

/// Everything a renderer needs to emit the registration file for one
/// package. All lists are sorted so that rendering is reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Top {
    /// Name of the file the renderer should produce.
    pub file_name: String,
    /// Tool that produced the model, stamped into the generated header.
    pub tool_name: String,
    /// Package the generated file belongs to.
    pub package: String,
    /// Module paths the generated file must import.
    pub imports: Vec<String>,
    /// Package-level functions to register.
    pub functions: Vec<String>,
    /// Named types to register.
    pub types: Vec<String>,
    /// Per-receiver lifecycle method wrappers.
    pub wraps: Vec<Wrap>,
    /// Deduplicated function shims.
    pub shims: Vec<Func>,
    pub emitters: Vec<Emitter>,
    pub inputs: Vec<Input>,
}

impl Top {
    /// True when there is nothing to register or generate.
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
            && self.types.is_empty()
            && self.wraps.is_empty()
            && self.shims.is_empty()
            && self.emitters.is_empty()
            && self.inputs.is_empty()
    }

    pub fn wrap(&self, ty: &str) -> Option<&Wrap> {
        self.wraps.iter().find(|w| w.ty == ty)
    }

    pub fn shim(&self, key: &str) -> Option<&Func> {
        self.shims.iter().find(|s| s.ty == key)
    }
}
