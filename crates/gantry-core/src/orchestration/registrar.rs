//! Generic deploy-then-register step, parameterized by component kind.

use std::collections::BTreeMap;

use crate::chain::ChainClient;
use crate::chain::contracts::{
    ComponentService, NFT_ID_FIELD, REGISTRATION_EVENT, Registry, SERVICE_VERSION,
};
use crate::component::{ComponentKind, DeployInputs, contract_spec};
use crate::error::Result;
use crate::types::{Address, NftId};

/// A component that has been deployed and registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredComponent {
    pub kind: ComponentKind,
    pub name: String,
    pub address: Address,
    pub nft_id: NftId,
}

/// Deploy one component, resolve its registration service from the
/// registry, register the deployed address and extract the assigned id.
///
/// The service address is looked up per call via
/// `getServiceAddress(objectType, version)`; it is never cached or
/// hard-coded.
pub fn deploy_and_register(
    client: &dyn ChainClient,
    kind: ComponentKind,
    name: String,
    inputs: &DeployInputs,
    owner: &Address,
    resolved: &BTreeMap<ComponentKind, Address>,
) -> Result<RegisteredComponent> {
    let spec = contract_spec(kind, &name, inputs, owner, resolved)?;
    let deployed = client.deploy(&spec)?;
    tracing::info!(kind = %kind, name = %name, address = %deployed.address, "component deployed");

    let registry = Registry::connect(client, inputs.registry.clone());
    let service_address = registry.service_address(kind.object_type(), SERVICE_VERSION)?;
    let service = ComponentService::connect(client, service_address);

    let label = format!("register {kind} at {}", deployed.address);
    let receipt = service.register(&deployed.address, owner, &label)?;
    let nft_id = NftId::new(receipt.event_field(&label, REGISTRATION_EVENT, NFT_ID_FIELD)?);
    tracing::info!(kind = %kind, name = %name, nft_id = %nft_id, "component registered");

    Ok(RegisteredComponent {
        kind,
        name,
        address: deployed.address,
        nft_id,
    })
}
