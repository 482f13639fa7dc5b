//! Named signer accounts for a provisioning run.
//!
//! Accounts are project configuration, not secrets: each entry is the
//! address of an account the connected node can sign for. They live in a
//! TOML file next to the project:
//!
//! ```toml
//! [accounts]
//! protocol_owner = "0x…"
//! instance_owner = "0x…"
//! distribution_owner = "0x…"
//! pool_owner = "0x…"
//! product_owner = "0x…"
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::component::ComponentKind;
use crate::config::parse_address;
use crate::error::{ProvisionError, Result};
use crate::types::Address;

/// The five named owner accounts a run signs with.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Accounts {
    pub protocol_owner: Address,
    pub instance_owner: Address,
    pub distribution_owner: Address,
    pub pool_owner: Address,
    pub product_owner: Address,
}

#[derive(Debug, Deserialize)]
struct AccountsFile {
    accounts: Accounts,
}

impl Accounts {
    /// Load and validate the accounts file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let name = format!("accounts file {}", path.display());
        let raw = std::fs::read_to_string(path)
            .map_err(|err| ProvisionError::invalid_config(&name, err.to_string()))?;
        let file: AccountsFile = toml::from_str(&raw)
            .map_err(|err| ProvisionError::invalid_config(&name, err.to_string()))?;
        file.accounts.validate()?;
        Ok(file.accounts)
    }

    /// Check the address shape of every entry.
    pub fn validate(&self) -> Result<()> {
        for (name, address) in [
            ("accounts.protocol_owner", &self.protocol_owner),
            ("accounts.instance_owner", &self.instance_owner),
            ("accounts.distribution_owner", &self.distribution_owner),
            ("accounts.pool_owner", &self.pool_owner),
            ("accounts.product_owner", &self.product_owner),
        ] {
            parse_address(name, address.as_str())?;
        }
        Ok(())
    }

    /// The owner account that deploys and registers `kind`.
    pub fn owner_of(&self, kind: ComponentKind) -> &Address {
        match kind {
            ComponentKind::Distribution => &self.distribution_owner,
            ComponentKind::Pool => &self.pool_owner,
            ComponentKind::Product => &self.product_owner,
        }
    }
}
