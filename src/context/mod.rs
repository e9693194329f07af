//! context
//!
//! Process/session-wide state shared across all dispatch attempts.
//!
//! # Design
//!
//! One [`GlobalContext`] is created at process start (or interactive-session
//! start) by the CLI entry point and passed by reference everywhere; nothing
//! in this crate reaches for ambient global state. It owns:
//!
//! - the resolved project root (nearest ancestor containing `toolshed.toml`)
//! - the logger and its threshold
//! - loaded project settings
//! - transient per-invocation run params (`--batch`, `--force`), which the
//!   shell loop resets after every line so flags never leak between lines

use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::log::Logger;

/// Walk up from `start` to the nearest directory containing `toolshed.toml`.
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut dir = start;
    loop {
        if dir.join(crate::config::SETTINGS_FILE).is_file() {
            return Some(dir.to_path_buf());
        }
        dir = dir.parent()?;
    }
}

/// Process/session-wide state.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Working directory the process was started in.
    pub cwd: PathBuf,
    /// Resolved project root, if the working directory is inside a project.
    project_root: Option<PathBuf>,
    /// Logger; threshold set by the global verbosity flags.
    pub log: Logger,
    /// Settings loaded from the project root (empty default outside a project).
    pub settings: Settings,
    /// Transient: suppress interactive prompts for this invocation.
    pub batch: bool,
    /// Transient: override safety checks for this invocation.
    pub force: bool,
}

impl GlobalContext {
    /// Create a context rooted at `cwd`, resolving the project root by
    /// walking up.
    ///
    /// A malformed settings file is reported as a warning and replaced with
    /// the empty default rather than aborting startup.
    pub fn new(cwd: PathBuf) -> Self {
        let log = Logger::default();
        let project_root = find_project_root(&cwd);
        let settings = Self::load_settings(project_root.as_deref(), &log);
        Self {
            cwd,
            project_root,
            log,
            settings,
            batch: false,
            force: false,
        }
    }

    fn load_settings(root: Option<&Path>, log: &Logger) -> Settings {
        match root {
            Some(root) => Settings::load(root).unwrap_or_else(|err| {
                log.warning(err);
                Settings::default()
            }),
            None => Settings::default(),
        }
    }

    /// Resolved project root, if any.
    pub fn project_root(&self) -> Option<&Path> {
        self.project_root.as_deref()
    }

    /// Override the project root (global `--project-dir` option) and reload
    /// settings from it. The override persists for the whole session.
    pub fn set_project_root(&mut self, root: PathBuf) {
        self.settings = Self::load_settings(Some(&root), &self.log);
        self.project_root = Some(root);
    }

    /// Clear the transient per-invocation run params.
    ///
    /// Called by the shell loop after each line; the project root and the
    /// log threshold deliberately persist for the whole session.
    pub fn reset_run_params(&mut self) {
        self.batch = false;
        self.force = false;
    }
}
