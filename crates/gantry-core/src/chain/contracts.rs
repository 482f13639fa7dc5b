//! Typed facades over the collaborator contracts.
//!
//! Each facade wraps a [`ChainClient`] plus an address and exposes the
//! documented call surface of one collaborator: the instance, its access
//! manager, the registry, and the per-type registration services.

use crate::chain::{Arg, ChainClient, ContractCall, TxReceipt};
use crate::error::Result;
use crate::types::{Address, ObjectType, RoleId};

/// Release of the registration services resolved from the registry.
pub const SERVICE_VERSION: u8 = 3;

/// Event emitted by the registry when a component is registered.
pub const REGISTRATION_EVENT: &str = "LogRegistration";

/// Field of [`REGISTRATION_EVENT`] carrying the assigned identifier.
pub const NFT_ID_FIELD: &str = "nftId";

/// The on-chain context that owns the access manager and the registry.
pub struct Instance<'a> {
    client: &'a dyn ChainClient,
    address: Address,
}

impl<'a> Instance<'a> {
    pub fn connect(client: &'a dyn ChainClient, address: Address) -> Self {
        Self { client, address }
    }

    pub fn access_manager(&self) -> Result<Address> {
        let raw = self.client.call(&ContractCall::read(
            "instance access manager lookup",
            self.address.clone(),
            "getInstanceAccessManager()(address)",
        ))?;
        Ok(Address::new(raw))
    }

    pub fn registry(&self) -> Result<Address> {
        let raw = self.client.call(&ContractCall::read(
            "instance registry lookup",
            self.address.clone(),
            "getRegistry()(address)",
        ))?;
        Ok(Address::new(raw))
    }
}

/// Access manager of the instance; grants owner roles.
pub struct AccessManager<'a> {
    client: &'a dyn ChainClient,
    address: Address,
}

impl<'a> AccessManager<'a> {
    pub fn connect(client: &'a dyn ChainClient, address: Address) -> Self {
        Self { client, address }
    }

    pub fn grant_role(&self, role: RoleId, grantee: &Address, from: &Address) -> Result<TxReceipt> {
        self.client.send(
            &ContractCall::write(
                format!("grant role {} to {grantee}", role.0),
                self.address.clone(),
                from.clone(),
                "grantRole(uint64,address)",
            )
            .arg(Arg::Uint(u128::from(role.0)))
            .arg(Arg::Addr(grantee.clone())),
        )
    }
}

/// Central directory mapping (object type, version) to service addresses.
pub struct Registry<'a> {
    client: &'a dyn ChainClient,
    address: Address,
}

impl<'a> Registry<'a> {
    pub fn connect(client: &'a dyn ChainClient, address: Address) -> Self {
        Self { client, address }
    }

    /// Address of the registration service for `object_type` at `version`.
    pub fn service_address(&self, object_type: ObjectType, version: u8) -> Result<Address> {
        let raw = self.client.call(
            &ContractCall::read(
                format!("{object_type} service lookup"),
                self.address.clone(),
                "getServiceAddress(uint8,uint8)(address)",
            )
            .arg(Arg::Uint(u128::from(object_type.code())))
            .arg(Arg::Uint(u128::from(version))),
        )?;
        Ok(Address::new(raw))
    }
}

/// Type-specific registration service, resolved from the registry per call.
pub struct ComponentService<'a> {
    client: &'a dyn ChainClient,
    address: Address,
}

impl<'a> ComponentService<'a> {
    pub fn connect(client: &'a dyn ChainClient, address: Address) -> Self {
        Self { client, address }
    }

    pub fn register(
        &self,
        component: &Address,
        from: &Address,
        label: &str,
    ) -> Result<TxReceipt> {
        self.client.send(
            &ContractCall::write(
                label,
                self.address.clone(),
                from.clone(),
                "register(address)",
            )
            .arg(Arg::Addr(component.clone())),
        )
    }
}
