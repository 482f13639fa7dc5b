//! Provisioning error taxonomy.
//!
//! Four classes cover every failure surface of a run: configuration,
//! deployment, transaction, and protocol shape. All of them are fatal.
//! The orchestrator has no retry, no compensation and no resumption, so an
//! error anywhere aborts the whole run.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProvisionError>;

/// Coarse classification of a [`ProvisionError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    Configuration,
    Deployment,
    Transaction,
    ProtocolShape,
}

#[derive(Debug, Error)]
pub enum ProvisionError {
    /// Required configuration values are unset.
    #[error("missing configuration: {}", missing.join(", "))]
    MissingConfig { missing: Vec<String> },

    /// A configuration value is present but unusable.
    #[error("invalid configuration for {name}: {reason}")]
    InvalidConfig { name: String, reason: String },

    /// The external toolchain the run depends on is absent or broken.
    #[error("toolchain unavailable: {reason}")]
    Toolchain { reason: String },

    /// The contract deployer failed to produce a deployed instance.
    #[error("deployment of {contract} failed: {reason}")]
    DeployFailed { contract: String, reason: String },

    /// A component spec referenced a dependency that has not been
    /// deployed yet.
    #[error("{component} depends on {dependency}, which is not deployed")]
    DependencyUnresolved {
        component: String,
        dependency: String,
    },

    /// A collaborator call reverted, was rejected, or could not be made.
    #[error("{label} failed: {reason}")]
    TxFailed { label: String, reason: String },

    /// A receipt did not carry exactly one of the expected events.
    #[error("{label}: expected exactly one {event} event, found {found}")]
    EventShape {
        label: String,
        event: String,
        found: usize,
    },

    /// An expected field is absent from a decoded event.
    #[error("{label}: event {event} carries no {field} field")]
    MissingEventField {
        label: String,
        event: String,
        field: String,
    },

    /// A collaborator produced output the adapter cannot parse.
    #[error("unparseable {tool} output: {reason}")]
    MalformedOutput { tool: String, reason: String },
}

impl ProvisionError {
    pub fn invalid_config(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            name: name.into(),
            reason: reason.into(),
        }
    }

    pub fn deploy(contract: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::DeployFailed {
            contract: contract.into(),
            reason: reason.into(),
        }
    }

    pub fn tx(label: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::TxFailed {
            label: label.into(),
            reason: reason.into(),
        }
    }

    pub fn malformed(tool: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedOutput {
            tool: tool.into(),
            reason: reason.into(),
        }
    }

    /// Which of the four failure classes this error belongs to.
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::MissingConfig { .. } | Self::InvalidConfig { .. } | Self::Toolchain { .. } => {
                ErrorClass::Configuration
            }
            Self::DeployFailed { .. } | Self::DependencyUnresolved { .. } => ErrorClass::Deployment,
            Self::TxFailed { .. } => ErrorClass::Transaction,
            Self::EventShape { .. }
            | Self::MissingEventField { .. }
            | Self::MalformedOutput { .. } => ErrorClass::ProtocolShape,
        }
    }
}
