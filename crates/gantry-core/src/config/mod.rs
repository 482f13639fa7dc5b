//! Run configuration: environment-sourced addresses and identifiers.
//!
//! Every required value is checked before the first chain interaction, and
//! all missing variables are reported in a single error rather than one at
//! a time.

use crate::error::{ProvisionError, Result};
use crate::types::{Address, NftId};

mod accounts;

pub use accounts::Accounts;

pub const AMOUNT_LIB_VAR: &str = "AMOUNTLIB_ADDRESS";
pub const FEE_LIB_VAR: &str = "FEELIB_ADDRESS";
pub const NFT_ID_LIB_VAR: &str = "NFTIDLIB_ADDRESS";
pub const REFERRAL_LIB_VAR: &str = "REFERRALLIB_ADDRESS";
pub const ROLE_ID_LIB_VAR: &str = "ROLEIDLIB_ADDRESS";
pub const UFIXED_LIB_VAR: &str = "UFIXEDLIB_ADDRESS";
pub const INSTANCE_NFT_ID_VAR: &str = "INSTANCE_NFTID";
pub const INSTANCE_ADDRESS_VAR: &str = "INSTANCE_ADDRESS";

/// Addresses of the pre-deployed shared libraries components link against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryAddresses {
    pub amount: Address,
    pub fee: Address,
    pub nft_id: Address,
    pub referral: Address,
    pub role_id: Address,
    pub ufixed: Address,
}

/// Validated inputs for one provisioning run.
#[derive(Debug, Clone)]
pub struct ProvisionConfig {
    pub instance_address: Address,
    pub instance_nft_id: NftId,
    pub libraries: LibraryAddresses,
}

impl ProvisionConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load from an arbitrary variable lookup.
    ///
    /// Missing variables are collected before failing so a single run
    /// surfaces the complete gap. Values that are present but malformed
    /// fail individually afterwards.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut missing = Vec::new();
        let mut require = |name: &str| -> String {
            match lookup(name).map(|v| v.trim().to_string()) {
                Some(value) if !value.is_empty() => value,
                _ => {
                    missing.push(name.to_string());
                    String::new()
                }
            }
        };

        let amount = require(AMOUNT_LIB_VAR);
        let fee = require(FEE_LIB_VAR);
        let nft_id = require(NFT_ID_LIB_VAR);
        let referral = require(REFERRAL_LIB_VAR);
        let role_id = require(ROLE_ID_LIB_VAR);
        let ufixed = require(UFIXED_LIB_VAR);
        let instance_nft_id = require(INSTANCE_NFT_ID_VAR);
        let instance_address = require(INSTANCE_ADDRESS_VAR);

        if !missing.is_empty() {
            return Err(ProvisionError::MissingConfig { missing });
        }

        Ok(Self {
            instance_address: parse_address(INSTANCE_ADDRESS_VAR, &instance_address)?,
            instance_nft_id: parse_nft_id(INSTANCE_NFT_ID_VAR, &instance_nft_id)?,
            libraries: LibraryAddresses {
                amount: parse_address(AMOUNT_LIB_VAR, &amount)?,
                fee: parse_address(FEE_LIB_VAR, &fee)?,
                nft_id: parse_address(NFT_ID_LIB_VAR, &nft_id)?,
                referral: parse_address(REFERRAL_LIB_VAR, &referral)?,
                role_id: parse_address(ROLE_ID_LIB_VAR, &role_id)?,
                ufixed: parse_address(UFIXED_LIB_VAR, &ufixed)?,
            },
        })
    }
}

/// Validate the `0x…` shape of an address value.
pub(crate) fn parse_address(name: &str, value: &str) -> Result<Address> {
    let value = value.trim();
    let digits = value.strip_prefix("0x").ok_or_else(|| {
        ProvisionError::invalid_config(name, format!("address must start with 0x, got {value:?}"))
    })?;
    if digits.len() != 40 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ProvisionError::invalid_config(
            name,
            format!("expected 20-byte hex address, got {value:?}"),
        ));
    }
    Ok(Address::new(value))
}

fn parse_nft_id(name: &str, value: &str) -> Result<NftId> {
    let value = value.trim();
    value.parse::<u128>().map_err(|_| {
        ProvisionError::invalid_config(name, format!("expected a numeric nft id, got {value:?}"))
    })?;
    Ok(NftId::new(value))
}
