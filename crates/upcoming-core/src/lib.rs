//! Core library for upcoming.
//!
//! Infers the next semantic version of a git repository from its latest
//! release tag and the commit subjects recorded since that tag.
//!
//! # Modules
//!
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//! - [`exec`] - Command execution seam (real and scripted)
//! - [`git`] - Git command lines and repository detection
//! - [`history`] - Commit subjects since a tag
//! - [`observer`] - Progress reporting hooks
//! - [`pipeline`] - The full tag → history → version computation
//! - [`tags`] - Latest tag discovery
//! - [`version`] - Tag parsing, commit classification and bumping
//!
//! # Quick Start
//!
//! ```no_run
//! use upcoming_core::{NextVersion, SystemExecutor, TracingObserver};
//!
//! let observer = TracingObserver;
//! let next = NextVersion::new(".", &SystemExecutor)
//!     .with_observer(&observer)
//!     .compute()
//!     .expect("failed to compute next version");
//!
//! println!("{next}");
//! ```
//!
//! The resolver can also be used on its own:
//!
//! ```
//! use upcoming_core::version::resolve::compute;
//!
//! assert_eq!(compute("v1.2.3", &["feat: add endpoint"]).unwrap(), "1.3.0");
//! ```
#![deny(unsafe_code)]

pub mod config;

pub mod error;

pub mod exec;

pub mod git;

pub mod history;

pub mod observer;

pub mod pipeline;

pub mod tags;

pub mod version;

pub use config::{Config, ConfigLoader, LogLevel};

pub use error::{ConfigError, ConfigResult, UpcomingError, UpcomingResult};

pub use exec::{CommandExecutor, SystemExecutor};

pub use observer::{NoopObserver, TracingObserver, VersionObserver};

pub use pipeline::{NextVersion, Resolution};

pub use tags::FALLBACK_VERSION;

// Re-export semver so downstream crates don't need a direct dependency.
pub use semver;
