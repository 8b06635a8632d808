//! Enhanced error types with contextual suggestions
//!
//! Provides structured error types that include:
//! - Actionable error messages
//! - Suggested fixes and recovery actions
//! - Proper exit codes for CI/CD
//!
//! # Examples
//!
//! ```no_run
//! use bundle_diff::error::DiffError;
//! use bundle_diff::snapshot::provider::{FileSnapshotProvider, SnapshotProvider};
//!
//! let provider = FileSnapshotProvider::new(".");
//!
//! match provider.load("baseline") {
//!     Ok(snapshot) => {
//!         println!("Loaded build {}", snapshot.hash);
//!     }
//!     Err(e) => {
//!         eprintln!("Load failed: {}", e);
//!         std::process::exit(1);
//!     }
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Enhanced bundle-diff errors with contextual suggestions
#[derive(Error, Debug)]
pub enum DiffError {
    /// A single module/asset/package lacks the fields needed to identify it
    /// across builds. Recoverable: callers skip the entity and record a
    /// warning rather than aborting the diff.
    #[error("Invalid {kind}: {detail}")]
    InvalidEntity {
        /// Entity kind ("module", "asset", "package")
        kind: &'static str,
        /// What was missing or malformed
        detail: String,
    },

    /// A required top-level graph is missing from a snapshot. Fatal for the
    /// comparison: no partial report is produced.
    #[error("Malformed snapshot '{hash}': missing {missing}")]
    MalformedSnapshot {
        /// Hash of the offending snapshot
        hash: String,
        /// Name of the missing graph ("moduleGraph", "chunkGraph", "packageGraph")
        missing: &'static str,
    },

    /// Snapshot file could not be found
    #[error("Snapshot not found: {path}")]
    SnapshotNotFound {
        /// Path to the missing snapshot file
        path: PathBuf,
        #[source]
        /// IO error source
        source: std::io::Error,
    },

    /// Snapshot file exists but is not valid snapshot JSON
    #[error("Failed to parse snapshot: {path}")]
    SnapshotParse {
        /// Path to the unparseable snapshot file
        path: PathBuf,
        #[source]
        /// JSON error source
        source: serde_json::Error,
    },

    /// Generic I/O error with context
    #[error("I/O error: {context}")]
    Io {
        /// Context about where the error occurred
        context: String,
        #[source]
        /// IO error source
        source: std::io::Error,
    },
}

impl DiffError {
    /// Get actionable suggestion for resolving this error.
    ///
    /// Returns a user-friendly suggestion for how to fix the error, if available.
    ///
    /// # Examples
    ///
    /// ```
    /// use bundle_diff::error::DiffError;
    ///
    /// let error = DiffError::MalformedSnapshot {
    ///     hash: "a1b2c3".to_string(),
    ///     missing: "moduleGraph",
    /// };
    ///
    /// let suggestion = error.suggestion();
    /// assert!(suggestion.is_some());
    /// assert!(suggestion.unwrap().contains("moduleGraph"));
    /// ```
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::InvalidEntity { kind, .. } => Some(format!(
                "The {} was skipped; re-run the build instrumentation if entities are missing ids",
                kind
            )),
            Self::MalformedSnapshot { missing, .. } => Some(format!(
                "The snapshot has no {}. It was likely produced by an incompatible or \
                 interrupted build; regenerate it with the analysis plugin enabled",
                missing
            )),
            Self::SnapshotNotFound { path, .. } => Some(format!(
                "Ensure {} exists. Snapshots are the JSON manifests emitted by the build",
                path.display()
            )),
            Self::SnapshotParse { path, .. } => Some(format!(
                "{} is not a valid build snapshot. Check that the file is complete \
                 and was not truncated during transport",
                path.display()
            )),
            Self::Io { context, .. } => Some(format!(
                "Check file permissions and that {} is accessible",
                context
            )),
        }
    }

    /// Get appropriate exit code for this error.
    ///
    /// Returns Unix-style exit codes based on the error type, following sysexits.h conventions.
    ///
    /// # Examples
    ///
    /// ```
    /// use bundle_diff::error::DiffError;
    /// use std::path::PathBuf;
    ///
    /// let error = DiffError::SnapshotNotFound {
    ///     path: PathBuf::from("baseline.json"),
    ///     source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
    /// };
    ///
    /// assert_eq!(error.exit_code(), 66); // EX_NOINPUT
    /// ```
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidEntity { .. } => 65, // EX_DATAERR
            Self::MalformedSnapshot { .. } => 65, // EX_DATAERR
            Self::SnapshotNotFound { .. } => 66, // EX_NOINPUT (sysexits.h)
            Self::SnapshotParse { .. } => 65, // EX_DATAERR
            Self::Io { .. } => 74,           // EX_IOERR
        }
    }
}

/// Error formatter with colors and structured output
pub struct ErrorFormatter;

impl ErrorFormatter {
    /// Format error with suggestions
    pub fn format(error: &anyhow::Error) -> String {
        use console::style;

        let mut output = String::new();

        // Main error message
        output.push_str(&format!("{} {}\n", style("error:").red().bold(), error));

        // Error chain (caused by)
        let mut source = error.source();
        let mut indent = 1;
        while let Some(err) = source {
            output.push_str(&format!(
                "{}{} {}\n",
                "  ".repeat(indent),
                style("caused by:").yellow(),
                err
            ));
            source = err.source();
            indent += 1;
        }

        // Try to downcast to DiffError for suggestions
        if let Some(diff_error) = error.downcast_ref::<DiffError>() {
            if let Some(suggestion) = diff_error.suggestion() {
                output.push_str(&format!(
                    "\n{} {}\n",
                    style("help:").cyan().bold(),
                    suggestion
                ));
            }
        }

        output
    }

    /// Get exit code from error
    pub fn exit_code(error: &anyhow::Error) -> i32 {
        if let Some(diff_error) = error.downcast_ref::<DiffError>() {
            diff_error.exit_code()
        } else {
            1 // Generic error
        }
    }
}
