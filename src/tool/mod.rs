//! tool
//!
//! Known-tool table and the local install layout.
//!
//! # Design
//!
//! The set of tools this build knows is a fixed table: matching validates
//! tool-name arguments against it, and each entry also backs one tool
//! commandlet (`tsd gradle ...`). Real artifact download and version
//! resolution live behind this module's narrow surface; the local layout is
//!
//! ```text
//! <project-root>/.toolshed/tools/<tool>/<version>/   - installed payload
//! <project-root>/.toolshed/tools/<tool>/version      - active version marker
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::Settings;

/// Directory under the project root holding toolshed state.
pub const STATE_DIR: &str = ".toolshed";

/// Version resolved when neither the CLI nor the settings pin one.
pub const DEFAULT_VERSION: &str = "latest";

/// Errors from tool install/uninstall operations.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Tool is not installed in this project.
    #[error("tool '{0}' is not installed. Run 'tsd install {0}'.")]
    NotInstalled(String),

    /// Filesystem failure under the state directory.
    #[error("tool state error for '{tool}': {source}")]
    Io {
        /// Tool name.
        tool: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

/// Static description of one supported tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolDescriptor {
    /// Tool name; doubles as the commandlet keyword.
    pub name: &'static str,
    /// Executable launched by the tool commandlet.
    pub executable: &'static str,
    /// Environment variable exporting the tool's home directory.
    pub home_var: &'static str,
    /// One-line description for help output.
    pub summary: &'static str,
}

/// All tools this build knows, in help-output order.
pub const KNOWN_TOOLS: &[ToolDescriptor] = &[
    ToolDescriptor {
        name: "gradle",
        executable: "gradle",
        home_var: "GRADLE_HOME",
        summary: "Gradle build tool",
    },
    ToolDescriptor {
        name: "mvn",
        executable: "mvn",
        home_var: "M2_HOME",
        summary: "Apache Maven build tool",
    },
    ToolDescriptor {
        name: "npm",
        executable: "npm",
        home_var: "NPM_HOME",
        summary: "Node package manager",
    },
];

/// Whether `name` is a known tool.
pub fn is_known(name: &str) -> bool {
    by_name(name).is_some()
}

/// Look up a tool descriptor by name.
pub fn by_name(name: &str) -> Option<&'static ToolDescriptor> {
    KNOWN_TOOLS.iter().find(|t| t.name == name)
}

/// Directory holding all state for one tool.
pub fn tool_dir(project_root: &Path, tool: &str) -> PathBuf {
    project_root.join(STATE_DIR).join("tools").join(tool)
}

/// Home directory of the active install, if the tool is installed.
pub fn installed_home(project_root: &Path, tool: &str) -> Option<PathBuf> {
    let version = installed_version(project_root, tool)?;
    let home = tool_dir(project_root, tool).join(&version);
    home.is_dir().then_some(home)
}

/// Active installed version, if any.
pub fn installed_version(project_root: &Path, tool: &str) -> Option<String> {
    let marker = tool_dir(project_root, tool).join("version");
    let version = fs::read_to_string(marker).ok()?;
    let version = version.trim();
    if version.is_empty() {
        None
    } else {
        Some(version.to_string())
    }
}

/// Resolve the version to install: CLI flag > settings pin > `latest`.
pub fn resolve_version(flag: Option<&str>, settings: &Settings, tool: &str) -> String {
    flag.map(str::to_string)
        .or_else(|| settings.tool_version(tool).map(str::to_string))
        .unwrap_or_else(|| DEFAULT_VERSION.to_string())
}

/// Install `tool` at `version`, returning the install home.
///
/// Creates the version directory and flips the active-version marker.
/// Idempotent for an already-installed version.
pub fn install(project_root: &Path, tool: &str, version: &str) -> Result<PathBuf, ToolError> {
    let io = |source| ToolError::Io {
        tool: tool.to_string(),
        source,
    };
    let dir = tool_dir(project_root, tool);
    let home = dir.join(version);
    fs::create_dir_all(&home).map_err(io)?;
    fs::write(dir.join("version"), format!("{}\n", version)).map_err(io)?;
    Ok(home)
}

/// Remove all installed state for `tool`.
///
/// Returns the version that was active, or [`ToolError::NotInstalled`].
pub fn uninstall(project_root: &Path, tool: &str) -> Result<String, ToolError> {
    let version = installed_version(project_root, tool)
        .ok_or_else(|| ToolError::NotInstalled(tool.to_string()))?;
    fs::remove_dir_all(tool_dir(project_root, tool)).map_err(|source| ToolError::Io {
        tool: tool.to_string(),
        source,
    })?;
    Ok(version)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    mod table {
        use super::*;

        #[test]
        fn known_tools_resolve() {
            assert!(is_known("gradle"));
            assert!(is_known("mvn"));
            assert!(is_known("npm"));
            assert!(!is_known("zzz-unknown"));
        }

        #[test]
        fn descriptor_fields() {
            let gradle = by_name("gradle").unwrap();
            assert_eq!(gradle.executable, "gradle");
            assert_eq!(gradle.home_var, "GRADLE_HOME");
        }
    }

    mod install_layout {
        use super::*;

        #[test]
        fn install_then_query() {
            let root = TempDir::new().unwrap();
            let home = install(root.path(), "gradle", "8.5").unwrap();
            assert!(home.ends_with(".toolshed/tools/gradle/8.5"));
            assert_eq!(
                installed_version(root.path(), "gradle").as_deref(),
                Some("8.5")
            );
            assert_eq!(installed_home(root.path(), "gradle"), Some(home));
        }

        #[test]
        fn reinstall_flips_active_version() {
            let root = TempDir::new().unwrap();
            install(root.path(), "gradle", "8.5").unwrap();
            install(root.path(), "gradle", "8.7").unwrap();
            assert_eq!(
                installed_version(root.path(), "gradle").as_deref(),
                Some("8.7")
            );
        }

        #[test]
        fn uninstall_clears_state() {
            let root = TempDir::new().unwrap();
            install(root.path(), "mvn", "3.9.6").unwrap();
            assert_eq!(uninstall(root.path(), "mvn").unwrap(), "3.9.6");
            assert!(installed_version(root.path(), "mvn").is_none());
            assert!(matches!(
                uninstall(root.path(), "mvn"),
                Err(ToolError::NotInstalled(_))
            ));
        }

        #[test]
        fn not_installed_reads_as_none() {
            let root = TempDir::new().unwrap();
            assert!(installed_version(root.path(), "npm").is_none());
            assert!(installed_home(root.path(), "npm").is_none());
        }
    }

    mod versions {
        use super::*;

        #[test]
        fn resolve_precedence() {
            let mut settings = Settings::default();
            settings.set_tool_version("gradle", "8.5");
            assert_eq!(resolve_version(Some("9.0"), &settings, "gradle"), "9.0");
            assert_eq!(resolve_version(None, &settings, "gradle"), "8.5");
            assert_eq!(resolve_version(None, &settings, "npm"), "latest");
        }
    }
}
