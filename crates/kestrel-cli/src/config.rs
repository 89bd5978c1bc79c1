// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Project configuration.
//!
//! Parses `kestrel.toml`, which selects the analyses `kestrel check` runs and
//! how strictly it treats warnings. Every key is optional:
//!
//! ```toml
//! [analysis]
//! scopes = true
//! reachability = true
//! unused_variables = true
//! prelude = ["print"]
//!
//! [check]
//! warnings_as_errors = false
//! ```

use std::fs;

use camino::Utf8Path;
use kestrel_core::semantic_analysis::AnalysisOptions;
use miette::{Context, IntoDiagnostic, Result};
use serde::Deserialize;
use tracing::debug;

/// Name of the configuration file looked up next to the checked sources.
pub const CONFIG_FILE: &str = "kestrel.toml";

/// The top-level configuration parsed from `kestrel.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// The `[analysis]` section.
    pub analysis: AnalysisConfig,
    /// The `[check]` section.
    pub check: CheckConfig,
}

/// Which semantic analyses to run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    pub scopes: bool,
    pub reachability: bool,
    pub unused_variables: bool,
    /// Names treated as declared before every file.
    pub prelude: Vec<String>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        let defaults = AnalysisOptions::default();
        Self {
            scopes: defaults.scopes,
            reachability: defaults.reachability,
            unused_variables: defaults.unused_variables,
            prelude: defaults.prelude.iter().map(ToString::to_string).collect(),
        }
    }
}

impl AnalysisConfig {
    /// Converts the section into options for the core analyses.
    pub fn to_options(&self) -> AnalysisOptions {
        AnalysisOptions {
            scopes: self.scopes,
            reachability: self.reachability,
            unused_variables: self.unused_variables,
            prelude: self.prelude.iter().map(|name| name.as_str().into()).collect(),
        }
    }
}

/// Settings for `kestrel check`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CheckConfig {
    /// Fail the check when any warning is reported.
    pub warnings_as_errors: bool,
}

/// Parse a `kestrel.toml` file.
pub fn parse_config(path: &Utf8Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to read config '{path}'"))?;

    toml::from_str(&content)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to parse config '{path}'"))
}

/// Look for `kestrel.toml` in the given directory and parse it if found.
///
/// Returns `None` if no config file exists. Returns an error if the file
/// exists but is malformed.
pub fn find_config(dir: &Utf8Path) -> Result<Option<Config>> {
    let config_path = dir.join(CONFIG_FILE);
    if config_path
        .try_exists()
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to stat config '{config_path}'"))?
    {
        debug!(path = %config_path, "loading config");
        parse_config(&config_path).map(Some)
    } else {
        Ok(None)
    }
}

/// Loads the configuration that applies to `target`.
///
/// For a directory the config is looked up inside it; for a file, next to
/// it. A missing config yields the defaults.
pub fn load_for(target: &Utf8Path) -> Result<Config> {
    let dir = if target.is_dir() {
        target
    } else {
        match target.parent() {
            Some(parent) if !parent.as_str().is_empty() => parent,
            _ => Utf8Path::new("."),
        }
    };
    Ok(find_config(dir)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use tempfile::TempDir;

    fn write_config(content: &str) -> (TempDir, Utf8PathBuf) {
        let dir = TempDir::new().unwrap();
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
        fs::write(root.join(CONFIG_FILE), content).unwrap();
        (dir, root)
    }

    #[test]
    fn missing_config_is_none() {
        let dir = TempDir::new().unwrap();
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
        assert!(find_config(&root).unwrap().is_none());
        assert_eq!(load_for(&root).unwrap(), Config::default());
    }

    #[test]
    fn defaults_match_core_options() {
        let config = Config::default();
        assert_eq!(config.analysis.to_options(), AnalysisOptions::default());
        assert!(!config.check.warnings_as_errors);
    }

    #[test]
    fn partial_config_keeps_other_defaults() {
        let (_dir, root) = write_config("[analysis]\nreachability = false\n");
        let config = find_config(&root).unwrap().unwrap();
        assert!(!config.analysis.reachability);
        assert!(config.analysis.scopes);
        assert_eq!(config.analysis.prelude, vec!["print".to_string()]);
    }

    #[test]
    fn full_config() {
        let (_dir, root) = write_config(
            r#"
[analysis]
scopes = true
reachability = true
unused_variables = false
prelude = ["print", "len"]

[check]
warnings_as_errors = true
"#,
        );
        let config = find_config(&root).unwrap().unwrap();
        let options = config.analysis.to_options();
        assert!(!options.unused_variables);
        assert_eq!(options.prelude.len(), 2);
        assert!(config.check.warnings_as_errors);
    }

    #[test]
    fn config_next_to_a_file_applies_to_it() {
        let (_dir, root) = write_config("[check]\nwarnings_as_errors = true\n");
        let file = root.join("main.kes");
        fs::write(&file, "let x = 1;").unwrap();
        assert!(load_for(&file).unwrap().check.warnings_as_errors);
    }

    #[test]
    fn malformed_config_is_an_error() {
        let (_dir, root) = write_config("[analysis\nscopes = true\n");
        let err = find_config(&root).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let (_dir, root) = write_config("[analysis]\nspeling = true\n");
        assert!(find_config(&root).is_err());
    }
}
