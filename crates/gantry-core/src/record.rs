//! Deployment record written after a successful run.
//!
//! The record is informational: re-running never reads it back, and every
//! run provisions fresh components.

use serde::Serialize;

use crate::orchestration::ProvisionOutcome;
use crate::types::Address;

#[derive(Debug, Serialize)]
pub struct DeploymentRecord {
    pub token: Address,
    pub components: Vec<ComponentRecord>,
}

#[derive(Debug, Serialize)]
pub struct ComponentRecord {
    pub kind: String,
    pub name: String,
    pub address: Address,
    pub nft_id: String,
}

impl DeploymentRecord {
    pub fn from_outcome(outcome: &ProvisionOutcome) -> Self {
        Self {
            token: outcome.token.clone(),
            components: outcome
                .components
                .values()
                .map(|component| ComponentRecord {
                    kind: component.kind.to_string(),
                    name: component.name.clone(),
                    address: component.address.clone(),
                    nft_id: component.nft_id.to_string(),
                })
                .collect(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
