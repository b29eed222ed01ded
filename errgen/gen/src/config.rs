//! Generator configuration.
//!
//! A run writes three targets. Each target has an explicit file name and
//! explicit header and footer resources. The default resources are compiled
//! into the generator ([`TargetConfig::builtin`]), so an installed binary
//! needs nothing on disk. [`TargetConfig::conventional`] instead derives
//! resource paths from a resource directory and the file name
//! (`<dir>/<file>.header`, `<dir>/<file>.footer`).
//!
//! An optional TOML file can override any of it:
//!
//! ```toml
//! resources = "templates"
//! output = "src/generated"
//!
//! [api]
//! file = "constructors.rs"
//! footer = "templates/custom.footer"
//!
//! [fixtures]
//! u8 = "7"
//! ```
//!
//! Relative paths in the file are resolved against the file's directory.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use strum::{Display, EnumIter, IntoEnumIterator};

use crate::errors::GeneratorError;
use crate::fixtures::Fixtures;

const HEADER_SUFFIX: &str = ".header";
const FOOTER_SUFFIX: &str = ".footer";

/// The three generated files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum Target {
    /// Message slot constants.
    Messages,
    /// Error constructor functions.
    Api,
    /// Tests for the constructors.
    ApiTests,
}

impl Target {
    /// Default output file name.
    pub fn default_file(self) -> &'static str {
        match self {
            Target::Messages => "messages.rs",
            Target::Api => "api.rs",
            Target::ApiTests => "api_tests.rs",
        }
    }

    fn builtin_header(self) -> &'static str {
        match self {
            Target::Messages => include_str!("../resources/messages.rs.header"),
            Target::Api => include_str!("../resources/api.rs.header"),
            Target::ApiTests => include_str!("../resources/api_tests.rs.header"),
        }
    }

    fn builtin_footer(self) -> &'static str {
        match self {
            Target::Messages => include_str!("../resources/messages.rs.footer"),
            Target::Api => include_str!("../resources/api.rs.footer"),
            Target::ApiTests => include_str!("../resources/api_tests.rs.footer"),
        }
    }
}

/// Header or footer content.
#[derive(Clone, PartialEq, Eq)]
pub enum Resource {
    /// Compiled into the generator.
    Builtin(&'static str),
    /// Read from disk when the file is assembled.
    File(PathBuf),
}

impl fmt::Debug for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::Builtin(text) => write!(f, "Builtin({} bytes)", text.len()),
            Resource::File(path) => f.debug_tuple("File").field(path).finish(),
        }
    }
}

/// File name and resources of one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetConfig {
    /// File name, relative to the output directory.
    pub file: PathBuf,
    /// Content copied to the start of the file.
    pub header: Resource,
    /// Content copied to the end of the file.
    pub footer: Resource,
}

impl TargetConfig {
    /// Default file name and the resources shipped with the generator.
    pub fn builtin(target: Target) -> Self {
        Self {
            file: PathBuf::from(target.default_file()),
            header: Resource::Builtin(target.builtin_header()),
            footer: Resource::Builtin(target.builtin_footer()),
        }
    }

    /// Resolves header and footer as `<resources>/<file>.header|.footer`.
    pub fn conventional(resources: &Path, file: &str) -> Self {
        Self {
            file: PathBuf::from(file),
            header: Resource::File(resources.join(format!("{}{}", file, HEADER_SUFFIX))),
            footer: Resource::File(resources.join(format!("{}{}", file, FOOTER_SUFFIX))),
        }
    }
}

/// Everything a generation run needs besides the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Overrides the catalog's output path.
    pub output: Option<PathBuf>,
    pub messages: TargetConfig,
    pub api: TargetConfig,
    pub api_tests: TargetConfig,
    /// Fixture values for generated tests.
    pub fixtures: Fixtures,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            output: None,
            messages: TargetConfig::builtin(Target::Messages),
            api: TargetConfig::builtin(Target::Api),
            api_tests: TargetConfig::builtin(Target::ApiTests),
            fixtures: Fixtures::default(),
        }
    }
}

impl GeneratorConfig {
    /// Conventional configuration for every target, default fixtures.
    pub fn with_resources(resources: &Path) -> Self {
        Self {
            output: None,
            messages: TargetConfig::conventional(resources, Target::Messages.default_file()),
            api: TargetConfig::conventional(resources, Target::Api.default_file()),
            api_tests: TargetConfig::conventional(resources, Target::ApiTests.default_file()),
            fixtures: Fixtures::default(),
        }
    }

    /// Configuration of `target`.
    pub fn target(&self, target: Target) -> &TargetConfig {
        match target {
            Target::Messages => &self.messages,
            Target::Api => &self.api,
            Target::ApiTests => &self.api_tests,
        }
    }

    fn target_mut(&mut self, target: Target) -> &mut TargetConfig {
        match target {
            Target::Messages => &mut self.messages,
            Target::Api => &mut self.api,
            Target::ApiTests => &mut self.api_tests,
        }
    }

    /// Loads a TOML configuration file.
    ///
    /// `resources` is used when the file does not name a resource directory;
    /// with neither, targets keep the builtin resources.
    ///
    /// ## Errors
    ///
    /// Returns `GeneratorError::Io` if the file cannot be read and
    /// `GeneratorError::ConfigError` if it is not valid configuration.
    pub fn from_toml_file(path: &Path, resources: Option<&Path>) -> Result<Self, GeneratorError> {
        let text = fs::read_to_string(path).map_err(|source| GeneratorError::Io {
            op: "read config",
            path: path.display().to_string(),
            source,
        })?;
        let base = path.parent().unwrap_or(Path::new("."));
        Self::from_toml_str(&text, base, resources)
    }

    /// Parses TOML configuration, resolving relative paths against `base`.
    ///
    /// ## Errors
    ///
    /// Returns `GeneratorError::ConfigError` if the text is not valid
    /// configuration.
    pub fn from_toml_str(
        text: &str,
        base: &Path,
        resources: Option<&Path>,
    ) -> Result<Self, GeneratorError> {
        let file: ConfigFile =
            toml::from_str(text).map_err(|e| GeneratorError::ConfigError(e.to_string()))?;

        let resolve = |p: &Path| {
            if p.is_absolute() {
                p.to_path_buf()
            } else {
                base.join(p)
            }
        };

        let resources = file
            .resources
            .as_deref()
            .map(resolve)
            .or_else(|| resources.map(Path::to_path_buf));
        let mut config = match &resources {
            Some(dir) => Self::with_resources(dir),
            None => Self::default(),
        };
        config.output = file.output.as_deref().map(resolve);

        for target in Target::iter() {
            let Some(over) = file.target(target) else {
                continue;
            };
            let slot = config.target_mut(target);
            if let Some(name) = &over.file {
                *slot = match &resources {
                    Some(dir) => TargetConfig::conventional(dir, name),
                    None => TargetConfig {
                        file: PathBuf::from(name),
                        ..TargetConfig::builtin(target)
                    },
                };
            }
            if let Some(header) = &over.header {
                slot.header = Resource::File(resolve(header));
            }
            if let Some(footer) = &over.footer {
                slot.footer = Resource::File(resolve(footer));
            }
        }

        config.fixtures.extend(file.fixtures);
        Ok(config)
    }
}

/// On-disk shape of the configuration file.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    resources: Option<PathBuf>,
    output: Option<PathBuf>,
    messages: Option<TargetOverride>,
    api: Option<TargetOverride>,
    api_tests: Option<TargetOverride>,
    fixtures: BTreeMap<String, String>,
}

impl ConfigFile {
    fn target(&self, target: Target) -> Option<&TargetOverride> {
        match target {
            Target::Messages => self.messages.as_ref(),
            Target::Api => self.api.as_ref(),
            Target::ApiTests => self.api_tests.as_ref(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct TargetOverride {
    file: Option<String>,
    header: Option<PathBuf>,
    footer: Option<PathBuf>,
}
