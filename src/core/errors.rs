//! PHD-prefixed error types with structured error codes.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Shared `Result` alias for the project.
pub type Result<T> = std::result::Result<T, PhdError>;

/// Top-level error type for the power-hint daemon.
#[derive(Debug, Error)]
pub enum PhdError {
    /// The hint-definition file could not be read.
    #[error("[PHD-1001] hint config read failure at {path}: {source}")]
    HintConfigIo {
        /// Resolved config path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The hint-definition file is not well-formed JSON.
    #[error("[PHD-1002] hint config parse failure at {path}: {details}")]
    HintConfigParse {
        /// Resolved config path.
        path: PathBuf,
        /// Deserializer diagnostic.
        details: String,
    },

    /// The hint-definition file parsed but violates a semantic constraint.
    #[error("[PHD-1003] invalid hint config at {path}: {details}")]
    HintConfigInvalid {
        /// Resolved config path.
        path: PathBuf,
        /// Which constraint failed.
        details: String,
    },

    /// Publishing a service under its instance name failed.
    #[error("[PHD-2001] service registration failure for {instance}: {details}")]
    Registration {
        /// Instance name the publication was attempted under.
        instance: String,
        /// Registry diagnostic.
        details: String,
    },

    /// Attaching the extension object into a host's extension slot failed.
    #[error("[PHD-2002] extension attach failure on {descriptor}: {details}")]
    ExtensionAttach {
        /// Host interface identifier.
        descriptor: &'static str,
        /// Attachment diagnostic.
        details: String,
    },

    /// The request dispatch loop returned outside of an orderly shutdown.
    #[error("[PHD-3001] request dispatch loop exited unexpectedly")]
    ServeExited,

    /// A request addressed an instance nothing is published under.
    #[error("[PHD-4001] unknown service instance {instance}")]
    ServiceNotFound {
        /// Requested instance name.
        instance: String,
    },

    /// A request named a method the service does not implement.
    #[error("[PHD-4002] unknown method {method} on {descriptor}")]
    UnknownMethod {
        /// Interface identifier of the dispatching service.
        descriptor: &'static str,
        /// Requested method name.
        method: String,
    },

    /// A transport channel closed underneath an in-flight request.
    #[error("[PHD-4003] ipc channel closed in component {component}")]
    ChannelClosed {
        /// Which transport component observed the closure.
        component: &'static str,
    },
}

impl PhdError {
    /// Stable machine-parseable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::HintConfigIo { .. } => "PHD-1001",
            Self::HintConfigParse { .. } => "PHD-1002",
            Self::HintConfigInvalid { .. } => "PHD-1003",
            Self::Registration { .. } => "PHD-2001",
            Self::ExtensionAttach { .. } => "PHD-2002",
            Self::ServeExited => "PHD-3001",
            Self::ServiceNotFound { .. } => "PHD-4001",
            Self::UnknownMethod { .. } => "PHD-4002",
            Self::ChannelClosed { .. } => "PHD-4003",
        }
    }

    /// Whether the error terminates the daemon rather than a single request.
    ///
    /// Dispatch-time errors (4xxx) are returned to the calling client; every
    /// other variant ends the process.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        !matches!(
            self,
            Self::ServiceNotFound { .. } | Self::UnknownMethod { .. } | Self::ChannelClosed { .. }
        )
    }

    /// Convenience constructor for config read failures with a known path.
    #[must_use]
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::HintConfigIo {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::PhdError;

    #[test]
    fn codes_are_stable_and_embedded_in_messages() {
        let err = PhdError::Registration {
            instance: "powerhint.IPower/default".to_string(),
            details: "instance already published".to_string(),
        };
        assert_eq!(err.code(), "PHD-2001");
        assert!(err.to_string().starts_with("[PHD-2001]"));
    }

    #[test]
    fn dispatch_errors_are_not_fatal() {
        let err = PhdError::UnknownMethod {
            descriptor: "powerhint.IPower",
            method: "bogus".to_string(),
        };
        assert!(!err.is_fatal());
        assert!(PhdError::ServeExited.is_fatal());
    }
}
