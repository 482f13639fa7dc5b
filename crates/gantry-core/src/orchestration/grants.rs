//! Owner-role grants, the prerequisite for every registration.

use crate::chain::ChainClient;
use crate::chain::contracts::AccessManager;
use crate::error::Result;
use crate::types::{Address, RoleId};

/// Grant each (role, owner) pair via the instance access manager.
///
/// Grants are submitted one at a time, each confirmed before the next.
/// The first failure aborts the run; nothing is rolled back.
pub fn grant_owner_roles(
    client: &dyn ChainClient,
    access_manager: &Address,
    instance_owner: &Address,
    grants: &[(RoleId, Address)],
) -> Result<()> {
    let manager = AccessManager::connect(client, access_manager.clone());
    for (role, grantee) in grants {
        manager.grant_role(*role, grantee, instance_owner)?;
        tracing::info!(
            role = role.0,
            grantee = %grantee,
            access_manager = %access_manager,
            "owner role granted"
        );
    }
    Ok(())
}
