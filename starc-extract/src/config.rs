//! Extraction configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use starcgen_types::CheckConfig;

use crate::conventions::DEFAULT_UNIVERSAL_MODULE;

/// Settings for one extraction job, loadable from `starcgen.toml`.
///
/// ```toml
/// package = "wordcount"
/// ids = ["CountFn", "strings.ToUpper"]
/// debug = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExtractConfig {
    /// Name of the package under analysis.
    pub package: String,
    /// Optional allow-list of identifiers to generate for. Local names are
    /// bare (`CountFn`), foreign ones module-qualified (`strings.ToUpper`).
    pub ids: Vec<String>,
    /// Skip use-site analysis unless qualified identifiers demand it.
    pub legacy_identifiers: bool,
    /// Record a trace of every classification decision.
    pub debug: bool,
    /// Module whose types are never registered.
    pub universal_module: String,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            package: String::new(),
            ids: Vec::new(),
            legacy_identifiers: false,
            debug: false,
            universal_module: DEFAULT_UNIVERSAL_MODULE.to_string(),
        }
    }
}

impl ExtractConfig {
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            ..Default::default()
        }
    }

    /// Load from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> eyre::Result<Self> {
        use eyre::WrapErr;

        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read '{}'", path.display()))?;
        toml::from_str(&content).wrap_err_with(|| format!("failed to parse '{}'", path.display()))
    }

    /// The front-end settings implied by this configuration.
    ///
    /// Legacy mode turns off use-site resolution and body checking. An
    /// allow-list turns uses back on, and bodies too when any entry names a
    /// foreign (module-qualified) identifier, since those are only reachable
    /// through calls inside function bodies.
    pub fn check_config(&self) -> CheckConfig {
        let mut config = CheckConfig::default();
        if !self.legacy_identifiers {
            return config;
        }

        config.record_uses = false;
        config.ignore_func_bodies = true;
        if !self.ids.is_empty() {
            let qualified = self.ids.iter().any(|id| id.contains('.'));
            config.ignore_func_bodies = !qualified;
            config.record_uses = true;
        }
        config
    }
}
