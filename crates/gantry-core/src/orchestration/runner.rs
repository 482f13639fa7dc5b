//! Top-level provisioning run.

use std::collections::BTreeMap;

use crate::chain::ChainClient;
use crate::chain::contracts::Instance;
use crate::component::{ComponentKind, ComponentNames, DeployInputs, token_spec};
use crate::config::{Accounts, ProvisionConfig};
use crate::error::Result;
use crate::orchestration::grants::grant_owner_roles;
use crate::orchestration::plan::DeployPlan;
use crate::orchestration::registrar::{RegisteredComponent, deploy_and_register};
use crate::types::Address;

/// Everything a successful run produced.
#[derive(Debug, Clone)]
pub struct ProvisionOutcome {
    pub token: Address,
    pub components: BTreeMap<ComponentKind, RegisteredComponent>,
}

impl ProvisionOutcome {
    pub fn component(&self, kind: ComponentKind) -> Option<&RegisteredComponent> {
        self.components.get(&kind)
    }
}

/// One-shot provisioner.
///
/// Runs strictly sequentially; every chain operation blocks until it is
/// final. There is no rollback and no resumption: a failure anywhere
/// aborts the run and leaves earlier on-chain steps live.
pub struct Provisioner<'a> {
    client: &'a dyn ChainClient,
    config: ProvisionConfig,
    accounts: Accounts,
    names: ComponentNames,
}

impl<'a> Provisioner<'a> {
    pub fn new(client: &'a dyn ChainClient, config: ProvisionConfig, accounts: Accounts) -> Self {
        Self {
            client,
            config,
            accounts,
            names: ComponentNames::default(),
        }
    }

    /// Override randomized naming for individual components.
    pub fn with_names(mut self, names: ComponentNames) -> Self {
        self.names = names;
        self
    }

    /// Grant roles, deploy the payment token, then deploy and register
    /// every component in dependency order.
    pub fn run(&self) -> Result<ProvisionOutcome> {
        let instance = Instance::connect(self.client, self.config.instance_address.clone());
        let access_manager = instance.access_manager()?;
        let registry = instance.registry()?;
        tracing::info!(
            access_manager = %access_manager,
            registry = %registry,
            "instance collaborators resolved"
        );

        let grants: Vec<_> = ComponentKind::ALL
            .into_iter()
            .map(|kind| (kind.owner_role(), self.accounts.owner_of(kind).clone()))
            .collect();
        grant_owner_roles(
            self.client,
            &access_manager,
            &self.accounts.instance_owner,
            &grants,
        )?;

        let token = self.client.deploy(&token_spec(&self.accounts.protocol_owner))?;
        tracing::info!(address = %token.address, "payment token deployed");

        let inputs = DeployInputs {
            registry,
            instance_nft_id: self.config.instance_nft_id.clone(),
            token: token.address.clone(),
            libraries: self.config.libraries.clone(),
        };

        let plan = DeployPlan::standard();
        let mut components = BTreeMap::new();
        let mut resolved: BTreeMap<ComponentKind, Address> = BTreeMap::new();
        for &kind in plan.ordered() {
            let component = deploy_and_register(
                self.client,
                kind,
                self.names.resolve(kind),
                &inputs,
                self.accounts.owner_of(kind),
                &resolved,
            )?;
            resolved.insert(kind, component.address.clone());
            components.insert(kind, component);
        }

        Ok(ProvisionOutcome {
            token: token.address,
            components,
        })
    }
}
