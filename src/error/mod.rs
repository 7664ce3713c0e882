// git-acp: Ansible git add/commit/push modules
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!            AcpError (~24 bytes)
//!                   |
//!   +-------+-------+-------+-------+------+
//!   |       |       |       |       |      |
//!   v       v       v       v       v      v
//! Param    Git    Config  Process   Io   Other
//!  Box     Box     Box     Box     Box  Box<str>
//!
//! Sub-errors (unboxed internally):
//!   Param    Missing, Together, OneOf, Exclusive, If, By, Unsupported, Invalid
//!   Git      CommandFailed, NotARepository, Precondition, Gix
//!   Config   Load, InvalidValue
//!   Process  SpawnFailed, NonZeroExit, OutputError, ExecutableNotFound
//! ```
//!
//! Every variant maps onto the module failure protocol, see
//! [`crate::module::result::FailureReport`].

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`AcpError`].
pub type AcpResult<T> = std::result::Result<T, AcpError>;

/// Top-level module error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum AcpError {
    /// Parameter validation failed before any git command ran.
    #[error("{0}")]
    Param(#[from] Box<ParamError>),

    /// Git operation failed.
    #[error("{0}")]
    Git(#[from] Box<GitError>),

    /// Parameter loading failed.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// Process execution error.
    #[error("{0}")]
    Process(#[from] Box<ProcessError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),

    /// Generic error with message.
    #[error("{0}")]
    Other(Box<str>),
}

impl AcpError {
    /// Create an [`AcpError::Other`] from a message.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into().into_boxed_str())
    }
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for AcpError {
                fn from(err: $error) -> Self {
                    AcpError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    ParamError => Param,
    GitError => Git,
    ConfigError => Config,
    ProcessError => Process,
    std::io::Error => Io,
}

// --- Parameter Errors ---

/// Parameter validation errors, raised before any subprocess runs.
///
/// The messages follow the wording Ansible uses for the same checks so
/// playbook authors see familiar failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParamError {
    /// A required parameter is absent.
    #[error("missing required arguments: {0}")]
    Missing(String),

    /// Parameters declared together were only partially supplied.
    #[error("parameters are required together: {0}")]
    Together(String),

    /// None of a group of parameters was supplied.
    #[error("one of the following is required: {0}")]
    OneOf(String),

    /// More than one parameter of an exclusive group was supplied.
    #[error("parameters are mutually exclusive: {0}")]
    Exclusive(String),

    /// A parameter value requires further parameters.
    #[error("{key} is {value} but all of the following are missing: {missing}")]
    RequiredIf {
        key: String,
        value: String,
        missing: String,
    },

    /// A supplied parameter needs others that are absent.
    #[error("missing parameter(s) required by '{key}': {missing}")]
    RequiredBy { key: String, missing: String },

    /// Keys that the module does not declare.
    #[error("Unsupported parameters for ({module}) module: {keys}")]
    Unsupported { module: String, keys: String },

    /// A declared parameter has an unacceptable value.
    #[error("{0}")]
    Invalid(String),
}

// --- Git Errors ---

/// Git operation errors.
#[derive(Debug, Error)]
pub enum GitError {
    /// A git invocation exited with an unexpected code.
    #[error("Error in running '{command}' command")]
    CommandFailed {
        command: String,
        rc: i32,
        stdout: String,
        stderr: String,
    },

    /// The working tree is not inside a git repository.
    #[error("{path} is not a git repository")]
    NotARepository { path: String },

    /// A precondition on the parameters failed (URL scheme, mode, ...).
    #[error("{0}")]
    Precondition(String),

    /// Error from the gix library.
    #[error("gix error: {0}")]
    Gix(String),
}

// --- Config Errors ---

/// Parameter loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read or merge parameter sources.
    #[error("failed to load module arguments: {0}")]
    Load(#[from] config::ConfigError),

    /// Invalid configuration value.
    #[error("invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

// --- Process Errors ---

/// Process execution errors.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Executable not found in PATH.
    #[error("Failed to find required executable \"{name}\" in paths")]
    ExecutableNotFound { name: String },

    /// Failed to spawn process.
    #[error("failed to spawn process '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Process exited with a code outside its success set.
    #[error("process '{command}' exited with code {code}")]
    NonZeroExit {
        command: String,
        code: i32,
        stdout: String,
        stderr: String,
    },

    /// Failed to read process output.
    #[error("failed to read output from process '{command}': {message}")]
    OutputError { command: String, message: String },
}

#[cfg(test)]
mod tests;
