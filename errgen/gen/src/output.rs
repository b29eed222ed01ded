//! Output file assembly.
//!
//! Each target file is built in three steps:
//!
//! 1. [`OutputFile::start`] truncates the file and copies in the header
//! 2. [`OutputFile::write_fragment`] appends one fragment, in catalog order
//! 3. [`OutputFile::finish`] appends the footer, parses the whole file with
//!    `syn` and rewrites it formatted by `prettyplease`
//!
//! Parsing is the only syntax check on the generated code. A file that does
//! not parse is left on disk as assembled, which helps when debugging a
//! resource, and the run fails with [`GeneratorError::Syntax`].
//!
//! The final write goes through a temp file and a rename, so a formatted
//! file is never observed half written.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::config::{Resource, Target, TargetConfig};
use crate::errors::GeneratorError;

/// One generated file being assembled.
#[derive(Debug, Clone)]
pub struct OutputFile {
    target: Target,
    path: PathBuf,
    header: Resource,
    footer: Resource,
    version: String,
}

impl OutputFile {
    /// Describes the file for `target` under `output_dir`.
    pub fn new(output_dir: &Path, target: Target, config: &TargetConfig, version: &str) -> Self {
        Self {
            target,
            path: output_dir.join(&config.file),
            header: config.header.clone(),
            footer: config.footer.clone(),
            version: version.to_string(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn target(&self) -> Target {
        self.target
    }

    /// Resets the file to the header resource, creating parent directories.
    ///
    /// ## Errors
    ///
    /// Returns `GeneratorError::Io` if the header cannot be read or the file
    /// cannot be created.
    pub fn start(&self) -> Result<(), GeneratorError> {
        let header = read_resource(&self.header, "read header")?;
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|source| GeneratorError::Io {
                op: "create directory",
                path: parent.display().to_string(),
                source,
            })?;
        }
        fs::write(&self.path, header).map_err(|source| GeneratorError::Io {
            op: "reset",
            path: self.path.display().to_string(),
            source,
        })?;
        debug!(target_file = %self.target, path = %self.path.display(), "started output file");
        Ok(())
    }

    /// Appends one fragment verbatim.
    ///
    /// ## Errors
    ///
    /// Returns `GeneratorError::EmptyArgument` for an empty fragment and
    /// `GeneratorError::Io` if the file cannot be appended to, including when
    /// [`OutputFile::start`] was never called.
    pub fn write_fragment(&self, fragment: &str) -> Result<(), GeneratorError> {
        if fragment.is_empty() {
            return Err(GeneratorError::EmptyArgument {
                field: "fragment".to_string(),
            });
        }
        self.append(fragment)?;
        trace!(path = %self.path.display(), bytes = fragment.len(), "appended fragment");
        Ok(())
    }

    /// Appends the footer, then validates and formats the whole file.
    ///
    /// Returns the path of the finished file.
    ///
    /// ## Errors
    ///
    /// - `GeneratorError::Io` if the footer or the file cannot be read, or the
    ///   formatted file cannot be written
    /// - `GeneratorError::Syntax` if the assembled file is not valid Rust
    pub fn finish(self) -> Result<PathBuf, GeneratorError> {
        let footer = read_resource(&self.footer, "read footer")?;
        if !footer.is_empty() {
            self.append(&footer)?;
        }

        let source = fs::read_to_string(&self.path).map_err(|source| GeneratorError::Io {
            op: "read back",
            path: self.path.display().to_string(),
            source,
        })?;
        let formatted =
            format_source(&source, &self.version).map_err(|source| GeneratorError::Syntax {
                path: self.path.display().to_string(),
                source,
            })?;
        write_atomic(&self.path, &formatted)?;

        debug!(target_file = %self.target, path = %self.path.display(), "finished output file");
        Ok(self.path)
    }

    fn append(&self, text: &str) -> Result<(), GeneratorError> {
        let io_error = |source| GeneratorError::Io {
            op: "append",
            path: self.path.display().to_string(),
            source,
        };
        let mut file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(io_error)?;
        file.write_all(text.as_bytes()).map_err(io_error)
    }
}

fn read_resource(resource: &Resource, op: &'static str) -> Result<String, GeneratorError> {
    match resource {
        Resource::Builtin(text) => Ok((*text).to_string()),
        Resource::File(path) => fs::read_to_string(path).map_err(|source| GeneratorError::Io {
            op,
            path: path.display().to_string(),
            source,
        }),
    }
}

/// Parses `source` and returns it formatted, behind a generated-code notice.
///
/// Plain `//` comments do not survive formatting; doc comments do. The
/// notice is itself a plain comment, so formatting the output again yields
/// the same text.
///
/// ## Errors
///
/// Returns the parse error if `source` is not a valid Rust file.
pub fn format_source(source: &str, version: &str) -> Result<String, syn::Error> {
    let file = syn::parse_file(source)?;
    Ok(format!(
        "// This code was automatically generated by errgen (catalog version {}). Do not edit manually.\n\n{}",
        version,
        prettyplease::unparse(&file)
    ))
}

/// Writes content to a file atomically using temp file + rename.
///
/// ## Errors
///
/// Returns `GeneratorError::Io` if parent directories cannot be created, the
/// temp file cannot be written or the rename fails.
pub fn write_atomic(path: &Path, content: &str) -> Result<(), GeneratorError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| GeneratorError::Io {
            op: "create directory",
            path: parent.display().to_string(),
            source,
        })?;
    }

    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, content).map_err(|source| GeneratorError::Io {
        op: "write",
        path: temp_path.display().to_string(),
        source,
    })?;

    fs::rename(&temp_path, path).map_err(|source| GeneratorError::Io {
        op: "rename",
        path: path.display().to_string(),
        source,
    })?;

    Ok(())
}
