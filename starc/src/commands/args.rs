use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use starcgen_extract::ExtractConfig;

/// Extraction settings shared by every command that type checks a model.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Path to a starcgen.toml; command-line flags override its values
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Package under analysis (defaults to the package the model describes)
    #[arg(short, long)]
    pub package: Option<String>,

    /// Comma-separated identifiers to generate for
    #[arg(short, long, value_delimiter = ',')]
    pub ids: Vec<String>,

    /// Skip use-site analysis unless qualified identifiers require it
    #[arg(long)]
    pub legacy: bool,

    /// Module whose types are never registered
    #[arg(long)]
    pub universal_module: Option<String>,
}

impl ConfigArgs {
    /// Load the config file, if any, and apply the flags on top of it.
    pub fn resolve(&self) -> Result<ExtractConfig> {
        let mut config = match &self.config {
            Some(path) => ExtractConfig::from_file(path)?,
            None => ExtractConfig::default(),
        };
        if let Some(package) = &self.package {
            config.package = package.clone();
        }
        if !self.ids.is_empty() {
            config.ids = self.ids.clone();
        }
        config.legacy_identifiers |= self.legacy;
        if let Some(module) = &self.universal_module {
            config.universal_module = module.clone();
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        args: ConfigArgs,
    }

    fn parse(argv: &[&str]) -> ConfigArgs {
        Harness::try_parse_from(std::iter::once("starcgen").chain(argv.iter().copied()))
            .unwrap()
            .args
    }

    #[test]
    fn test_resolve_without_file() {
        let config = parse(&["-p", "main", "-i", "Foo,Bar"]).resolve().unwrap();
        assert_eq!(config.package, "main");
        assert_eq!(config.ids, vec!["Foo", "Bar"]);
        assert!(!config.legacy_identifiers);
        assert_eq!(
            config.universal_module,
            "github.com/apache/beam/sdks/v2/go/pkg/beam/core/typex"
        );
    }

    #[test]
    fn test_flags_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("starcgen.toml");
        std::fs::write(
            &path,
            "package = \"wordcount\"\nids = [\"CountFn\"]\nuniversal_module = \"example.com/typex\"\n",
        )
        .unwrap();
        let path = path.to_string_lossy().into_owned();

        let config = parse(&["--config", &path, "--ids", "SplitFn", "--legacy"])
            .resolve()
            .unwrap();
        assert_eq!(config.package, "wordcount");
        assert_eq!(config.ids, vec!["SplitFn"]);
        assert!(config.legacy_identifiers);
        assert_eq!(config.universal_module, "example.com/typex");
    }

    #[test]
    fn test_missing_config_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        let path = path.to_string_lossy().into_owned();
        assert!(parse(&["--config", &path]).resolve().is_err());
    }
}
