//! Provisioning orchestration: dependency-ordered deployment and
//! registration of the component set.

mod grants;
mod plan;
mod registrar;
mod runner;

pub use grants::grant_owner_roles;
pub use plan::DeployPlan;
pub use registrar::{RegisteredComponent, deploy_and_register};
pub use runner::{ProvisionOutcome, Provisioner};
