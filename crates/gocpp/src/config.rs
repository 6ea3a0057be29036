//! Configuration system for gocpp.
//!
//! Loads config from:
//! 1. Global: ~/.config/gocpp/config.toml
//! 2. Per-project: .gocpp/config.toml (overrides global)
//!
//! Example config.toml:
//! ```toml
//! [format]
//! enabled = true
//! style = "{BasedOnStyle: Webkit, ColumnLimit: 99}"
//!
//! [compile]
//! compiler = "clang++"
//! std = "c++20"
//! opt_level = "3"
//! extra_args = ["-static"]
//! ```
//!
//! Every field is optional. A field set in the project file wins over the
//! same field in the global file; unset fields fall through to the
//! built-in defaults.

use gocpp_tools::CompileOptions;
use gocpp_tools::adapters::DEFAULT_STYLE;
use serde::Deserialize;
use std::path::{Path, PathBuf};

const DEFAULT_FORMATTER: &str = "clang-format";

/// Formatter configuration.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct FormatConfig {
    /// Whether to format when the command line does not say.
    pub enabled: Option<bool>,
    /// Formatter executable.
    pub tool: Option<String>,
    /// Passed as `-style=...`.
    pub style: Option<String>,
}

impl FormatConfig {
    pub fn enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }

    pub fn tool(&self) -> &str {
        self.tool.as_deref().unwrap_or(DEFAULT_FORMATTER)
    }

    pub fn style(&self) -> &str {
        self.style.as_deref().unwrap_or(DEFAULT_STYLE)
    }

    fn merge(self, other: Self) -> Self {
        Self {
            enabled: other.enabled.or(self.enabled),
            tool: other.tool.or(self.tool),
            style: other.style.or(self.style),
        }
    }
}

/// Compiler configuration.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct CompileConfig {
    /// Compiler executable; the first one found on PATH when unset.
    pub compiler: Option<String>,
    pub std: Option<String>,
    pub opt_level: Option<String>,
    pub extra_args: Option<Vec<String>>,
}

impl CompileConfig {
    /// Flags for the compiler adapters.
    pub fn options(&self) -> CompileOptions {
        let defaults = CompileOptions::default();
        CompileOptions {
            std: self.std.clone().unwrap_or(defaults.std),
            opt_level: self.opt_level.clone().unwrap_or(defaults.opt_level),
            extra_args: self.extra_args.clone().unwrap_or(defaults.extra_args),
        }
    }

    fn merge(self, other: Self) -> Self {
        Self {
            compiler: other.compiler.or(self.compiler),
            std: other.std.or(self.std),
            opt_level: other.opt_level.or(self.opt_level),
            extra_args: other.extra_args.or(self.extra_args),
        }
    }
}

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct GocppConfig {
    pub format: FormatConfig,
    pub compile: CompileConfig,
}

impl GocppConfig {
    /// Load configuration for a project.
    ///
    /// Loads global config from ~/.config/gocpp/config.toml,
    /// then merges with per-project config from .gocpp/config.toml.
    pub fn load(root: &Path) -> Self {
        Self::load_with_global(root, Self::global_config_path().as_deref())
    }

    /// Like [`GocppConfig::load`] with an explicit global config path.
    pub fn load_with_global(root: &Path, global: Option<&Path>) -> Self {
        let mut config = Self::default();

        if let Some(global) = global.and_then(Self::load_file) {
            config = config.merge(global);
        }

        let project_path = root.join(".gocpp").join("config.toml");
        if let Some(project) = Self::load_file(&project_path) {
            config = config.merge(project);
        }

        config
    }

    /// Get the global config path.
    fn global_config_path() -> Option<PathBuf> {
        let config_home = std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .ok()
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))?;
        Some(config_home.join("gocpp").join("config.toml"))
    }

    /// Load config from a file path. Missing files are skipped silently,
    /// unreadable or malformed ones with a warning.
    fn load_file(path: &Path) -> Option<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "cannot read config");
                return None;
            }
        };
        match toml::from_str(&content) {
            Ok(config) => {
                tracing::debug!(path = %path.display(), "loaded config");
                Some(config)
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring invalid config");
                None
            }
        }
    }

    /// Merge another config into this one. Fields set in `other` win.
    fn merge(self, other: Self) -> Self {
        Self {
            format: self.format.merge(other.format),
            compile: self.compile.merge(other.compile),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_config(dir: &Path, content: &str) -> PathBuf {
        std::fs::create_dir_all(dir).unwrap();
        let path = dir.join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "{content}").unwrap();
        path
    }

    #[test]
    fn test_default_config() {
        let config = GocppConfig::default();
        assert!(config.format.enabled());
        assert_eq!(config.format.tool(), "clang-format");
        assert_eq!(config.format.style(), "{BasedOnStyle: Webkit, ColumnLimit: 99}");
        assert_eq!(config.compile.options(), CompileOptions::default());
        assert!(config.compile.compiler.is_none());
    }

    #[test]
    fn test_load_project_config() {
        let dir = TempDir::new().unwrap();
        write_config(
            &dir.path().join(".gocpp"),
            r#"
[format]
enabled = false

[compile]
compiler = "clang++"
extra_args = ["-static"]
"#,
        );

        let config = GocppConfig::load_with_global(dir.path(), None);
        assert!(!config.format.enabled());
        assert_eq!(config.compile.compiler.as_deref(), Some("clang++"));
        let options = config.compile.options();
        assert_eq!(options.std, "c++17");
        assert_eq!(options.extra_args, vec!["-static".to_string()]);
    }

    #[test]
    fn test_project_overrides_global_per_field() {
        let global_dir = TempDir::new().unwrap();
        let global = write_config(
            global_dir.path(),
            r#"
[format]
style = "LLVM"

[compile]
std = "c++20"
opt_level = "3"
"#,
        );
        let project = TempDir::new().unwrap();
        write_config(
            &project.path().join(".gocpp"),
            r#"
[compile]
opt_level = "s"
"#,
        );

        let config = GocppConfig::load_with_global(project.path(), Some(&global));
        assert_eq!(config.format.style(), "LLVM");
        assert!(config.format.enabled());
        let options = config.compile.options();
        assert_eq!(options.std, "c++20");
        assert_eq!(options.opt_level, "s");
    }

    #[test]
    fn test_invalid_config_is_ignored() {
        let dir = TempDir::new().unwrap();
        write_config(&dir.path().join(".gocpp"), "[format\nenabled = ");
        let config = GocppConfig::load_with_global(dir.path(), None);
        assert_eq!(config, GocppConfig::default());
    }
}
