//! Settings that are present on the pipeline when it is launched.
use std::path::{Path, PathBuf};

use jpat_exhaustiveness::ExhaustivenessSettings;

/// Various settings that are present on the pipeline when initially
/// launching.
#[derive(Debug, Clone, Default)]
pub struct CompilerSettings {
    /// The workspace that should be checked.
    ///
    /// N.B. This path is the one that is specified via command-line arguments,
    /// it is not resolved and it is not guaranteed to exist.
    pub(crate) workspace: Option<PathBuf>,

    /// Whether debugging log statements are enabled.
    pub debug: bool,

    /// Whether the pipeline should output errors and warnings to
    /// standard error.
    pub emit_errors: bool,

    /// Drop warnings, only errors are reported.
    pub report_only_errors: bool,

    /// All settings that relate to the exhaustiveness checker.
    pub exhaustiveness_settings: ExhaustivenessSettings,
}

impl CompilerSettings {
    /// Create a new [CompilerSettings] for the given workspace.
    pub fn new(workspace: impl Into<PathBuf>) -> Self {
        Self { workspace: Some(workspace.into()), emit_errors: true, ..Default::default() }
    }

    /// The workspace path, if one was specified.
    pub fn workspace(&self) -> Option<&Path> {
        self.workspace.as_deref()
    }

    /// Specify whether the pipeline should emit errors to standard error, or
    /// if they should be handled by the caller.
    pub fn set_emit_errors(&mut self, value: bool) {
        self.emit_errors = value;
    }

    /// Get a reference to the [ExhaustivenessSettings].
    pub fn exhaustiveness_settings(&self) -> &ExhaustivenessSettings {
        &self.exhaustiveness_settings
    }

    /// Get a mutable reference to the [ExhaustivenessSettings].
    pub fn exhaustiveness_settings_mut(&mut self) -> &mut ExhaustivenessSettings {
        &mut self.exhaustiveness_settings
    }
}
