// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! CLI command implementations, plus the file handling they share.

use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use kestrel_core::source_analysis::Diagnostic;
use miette::{Context, IntoDiagnostic, Result};

use crate::diagnostic::CompileDiagnostic;

pub mod ast;
pub mod check;
pub mod fmt;
pub mod tokens;

/// Extension of Kestrel source files.
pub const SOURCE_EXTENSION: &str = "kes";

/// Output format for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text output via miette (default).
    #[default]
    Text,
    /// Machine-readable JSON (one object per line).
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!(
                "unknown format '{other}': expected 'text' or 'json'"
            )),
        }
    }
}

/// Resolves `path` to the source files it names, sorted by path.
///
/// A file must have the `.kes` extension; a directory is searched
/// recursively.
pub fn collect_source_files(path: &Utf8Path) -> Result<Vec<Utf8PathBuf>> {
    let mut files = if path.is_file() {
        if path.extension() != Some(SOURCE_EXTENSION) {
            miette::bail!("File '{path}' is not a .{SOURCE_EXTENSION} source file");
        }
        vec![path.to_path_buf()]
    } else if path.is_dir() {
        let mut files = Vec::new();
        collect_files_recursive(path, &mut files)?;
        files
    } else {
        miette::bail!("Path '{path}' does not exist");
    };
    if files.is_empty() {
        miette::bail!("No .{SOURCE_EXTENSION} source files found in '{path}'");
    }
    files.sort();
    Ok(files)
}

/// Recursively collect all source files from a directory tree.
///
/// Symlinks are skipped to avoid potential infinite recursion from circular links.
fn collect_files_recursive(dir: &Utf8Path, files: &mut Vec<Utf8PathBuf>) -> Result<()> {
    for entry in fs::read_dir(dir)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to read directory '{dir}'"))?
    {
        let entry = entry.into_diagnostic()?;
        let file_type = entry.file_type().into_diagnostic()?;
        if file_type.is_symlink() {
            continue;
        }
        let entry_path = Utf8PathBuf::from_path_buf(entry.path())
            .map_err(|_| miette::miette!("Non-UTF-8 path"))?;

        if file_type.is_dir() {
            collect_files_recursive(&entry_path, files)?;
        } else if file_type.is_file() && entry_path.extension() == Some(SOURCE_EXTENSION) {
            files.push(entry_path);
        }
    }
    Ok(())
}

/// Reads a source file.
pub fn read_source(path: &Utf8Path) -> Result<String> {
    fs::read_to_string(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to read '{path}'"))
}

/// Reads the single source file a per-file command operates on.
pub fn read_single_source(path: &str) -> Result<(Utf8PathBuf, String)> {
    let path = Utf8PathBuf::from(path);
    if !path.is_file() {
        miette::bail!("'{path}' is not a file");
    }
    let source = read_source(&path)?;
    Ok((path, source))
}

/// Renders diagnostics for one file to stderr.
pub fn report_text(path: &Utf8Path, source: &str, diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        let report = CompileDiagnostic::from_core_diagnostic(diagnostic, path.as_str(), source);
        eprintln!("{:?}", miette::Report::new(report));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_root() -> (TempDir, Utf8PathBuf) {
        let dir = TempDir::new().unwrap();
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
        (dir, root)
    }

    #[test]
    fn output_format_from_str() {
        assert_eq!("text".parse::<OutputFormat>(), Ok(OutputFormat::Text));
        assert_eq!("json".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn collects_sources_recursively_in_path_order() {
        let (_dir, root) = temp_root();
        fs::create_dir_all(root.join("nested/deeper")).unwrap();
        fs::write(root.join("b.kes"), "").unwrap();
        fs::write(root.join("a.kes"), "").unwrap();
        fs::write(root.join("notes.txt"), "").unwrap();
        fs::write(root.join("nested/deeper/c.kes"), "").unwrap();

        let files = collect_source_files(&root).unwrap();
        let relative: Vec<_> = files
            .iter()
            .map(|f| f.strip_prefix(&root).unwrap().as_str().to_string())
            .collect();
        assert_eq!(relative, vec!["a.kes", "b.kes", "nested/deeper/c.kes"]);
    }

    #[test]
    fn single_file_must_have_source_extension() {
        let (_dir, root) = temp_root();
        let file = root.join("main.txt");
        fs::write(&file, "").unwrap();
        assert!(collect_source_files(&file).is_err());

        let file = root.join("main.kes");
        fs::write(&file, "").unwrap();
        assert_eq!(collect_source_files(&file).unwrap(), vec![file]);
    }

    #[test]
    fn empty_directory_and_missing_path_are_errors() {
        let (_dir, root) = temp_root();
        assert!(collect_source_files(&root).is_err());
        assert!(collect_source_files(&root.join("missing")).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn symlinks_are_skipped() {
        let (_dir, root) = temp_root();
        fs::write(root.join("real.kes"), "").unwrap();
        std::os::unix::fs::symlink(root.join("real.kes"), root.join("link.kes")).unwrap();
        std::os::unix::fs::symlink(&root, root.join("loop")).unwrap();

        let files = collect_source_files(&root).unwrap();
        assert_eq!(files, vec![root.join("real.kes")]);
    }
}
