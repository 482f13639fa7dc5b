//! Gantry Core Library
//!
//! Domain logic for dependency-ordered deployment and registration of
//! on-chain components against a pre-existing instance/registry
//! deployment: configuration loading, the chain collaborator seam, the
//! component catalog, and the provisioning orchestrator.

pub mod chain;
pub mod component;
pub mod config;
pub mod error;
pub mod orchestration;
pub mod record;
pub mod types;

/// Re-exports of commonly used types
pub mod prelude {
    // Chain seam
    pub use crate::chain::{
        Arg, ChainClient, ContractCall, ContractSpec, DeployedContract, EventRecord, TxReceipt,
    };

    // Components
    pub use crate::component::{ComponentKind, ComponentNames, DeployInputs};

    // Configuration
    pub use crate::config::{Accounts, LibraryAddresses, ProvisionConfig};

    // Errors
    pub use crate::error::{ErrorClass, ProvisionError, Result};

    // Orchestration
    pub use crate::orchestration::{
        DeployPlan, ProvisionOutcome, Provisioner, RegisteredComponent,
    };

    // Shared types
    pub use crate::types::{Address, Fee, NftId, ObjectType, RoleId};
}
