//! Toolshed - A Rust-native CLI for per-project developer tooling
//!
//! Toolshed manages the tools a project needs (build tools, package managers)
//! on a per-project basis: installing pinned versions, running them, and
//! exposing their environment.
//!
//! # Architecture
//!
//! The codebase follows a strict layered architecture:
//!
//! - [`cli`] - Argument sequence, matcher, dispatcher, and interactive shell
//! - [`property`] - Typed parameter slots bound during matching
//! - [`commandlet`] - Command units, their grammars, and the registry
//! - [`context`] - Process/session-wide state (project root, logging, run params)
//! - [`config`] - Project settings file (pinned tool versions)
//! - [`tool`] - Known-tool table and the local install layout
//! - [`process`] - Process execution for tool commandlets
//! - [`variable`] - Typed tool environment variable definitions
//! - [`log`] - Level-threshold logging
//!
//! # Correctness Invariants
//!
//! Toolshed maintains the following invariants:
//!
//! 1. Matching is single-pass with no backtracking; a rejected candidate
//!    leaves no observable state (bindings are per-attempt)
//! 2. Exactly one commandlet executes per dispatched invocation
//! 3. Once end-of-options is seen, no later token is split as an option
//! 4. Fatal errors escape to exactly one top-level handler

pub mod cli;
pub mod commandlet;
pub mod config;
pub mod context;
pub mod log;
pub mod process;
pub mod property;
pub mod tool;
pub mod variable;
