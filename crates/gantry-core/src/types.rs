//! Shared domain types used across configuration, chain and orchestration layers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An on-chain address in `0x…` hex form.
///
/// Addresses are carried as strings end to end; shape validation happens
/// once, when configuration is loaded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Address {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Identifier assigned by the registry when a component is registered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NftId(String);

impl NftId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NftId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Role identifier understood by the instance access manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoleId(pub u64);

/// Fee pair passed verbatim into component constructors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fee {
    pub fractional_fee: u64,
    pub fixed_fee: u64,
}

impl Fee {
    pub const ZERO: Fee = Fee {
        fractional_fee: 0,
        fixed_fee: 0,
    };
}

/// Category tag of a registrable component, as understood by the registry.
///
/// The numeric codes are owned by the collaborating registry deployment and
/// pinned here in one place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectType {
    Distribution,
    Pool,
    Product,
}

impl ObjectType {
    /// Code used in `getServiceAddress` lookups.
    pub fn code(self) -> u8 {
        match self {
            ObjectType::Distribution => 110,
            ObjectType::Pool => 120,
            ObjectType::Product => 130,
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ObjectType::Distribution => "distribution",
            ObjectType::Pool => "pool",
            ObjectType::Product => "product",
        };
        f.write_str(label)
    }
}
