//! Chain collaborator seam.
//!
//! The orchestrator talks to the chain exclusively through [`ChainClient`]:
//! one opaque deployment operation plus read-only and state-changing
//! contract calls. Implementations own transport, signing and finality;
//! every operation blocks until its effect is final.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::{ProvisionError, Result};
use crate::types::{Address, Fee, NftId};

pub mod contracts;
pub mod foundry;

/// One constructor or call argument, in calling order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arg {
    Str(String),
    Addr(Address),
    Uint(u128),
    Bool(bool),
    Id(NftId),
    /// Fee pair, rendered as a two-field tuple.
    Fee(Fee),
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Str(v) => f.write_str(v),
            Arg::Addr(v) => write!(f, "{v}"),
            Arg::Uint(v) => write!(f, "{v}"),
            Arg::Bool(v) => write!(f, "{v}"),
            Arg::Id(v) => write!(f, "{v}"),
            Arg::Fee(v) => write!(f, "({},{})", v.fractional_fee, v.fixed_fee),
        }
    }
}

/// Everything the deployer needs for one contract instance.
///
/// Immutable once built. The argument order is part of each contract's
/// documented constructor interface and is asserted by tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractSpec {
    /// Compiled contract name, e.g. `BasicPool`.
    pub contract: String,
    /// Account submitting the deployment.
    pub deployer: Address,
    /// Ordered constructor arguments.
    pub args: Vec<Arg>,
    /// Pre-deployed libraries to link, by library name.
    pub libraries: BTreeMap<String, Address>,
}

/// Result of a deployment; only the address propagates forward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployedContract {
    pub address: Address,
    pub tx_hash: String,
}

/// A single typed collaborator call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractCall {
    /// Human-readable label used in logs and errors.
    pub label: String,
    pub contract: Address,
    /// Submitting account; `None` for read-only calls.
    pub from: Option<Address>,
    /// Human-readable method signature, e.g. `grantRole(uint64,address)`.
    pub method: String,
    pub args: Vec<Arg>,
}

impl ContractCall {
    /// A read-only call; no account attached.
    pub fn read(label: impl Into<String>, contract: Address, method: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            contract,
            from: None,
            method: method.into(),
            args: Vec::new(),
        }
    }

    /// A state-changing call submitted by `from`.
    pub fn write(
        label: impl Into<String>,
        contract: Address,
        from: Address,
        method: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            contract,
            from: Some(from),
            method: method.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: Arg) -> Self {
        self.args.push(arg);
        self
    }

    /// Bare method name, without the parameter list.
    pub fn method_name(&self) -> &str {
        self.method.split('(').next().unwrap_or(&self.method)
    }
}

/// Decoded event from a transaction receipt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRecord {
    pub name: String,
    pub fields: BTreeMap<String, String>,
}

impl EventRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: BTreeMap::new(),
        }
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }
}

/// Receipt of a finalized state-changing call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TxReceipt {
    pub tx_hash: String,
    pub events: Vec<EventRecord>,
}

impl TxReceipt {
    /// The single `event` this receipt must carry; zero or several is a
    /// protocol-shape failure.
    pub fn single_event(&self, label: &str, event: &str) -> Result<&EventRecord> {
        let matching: Vec<&EventRecord> = self.events.iter().filter(|e| e.name == event).collect();
        match matching.as_slice() {
            [record] => Ok(*record),
            _ => Err(ProvisionError::EventShape {
                label: label.to_string(),
                event: event.to_string(),
                found: matching.len(),
            }),
        }
    }

    /// Extract one field from the single `event` in this receipt.
    pub fn event_field(&self, label: &str, event: &str, field: &str) -> Result<&str> {
        let record = self.single_event(label, event)?;
        record
            .get(field)
            .ok_or_else(|| ProvisionError::MissingEventField {
                label: label.to_string(),
                event: event.to_string(),
                field: field.to_string(),
            })
    }
}

/// Chain access used by the orchestrator.
///
/// Implementations submit work and block until it is final; a revert or a
/// rejection surfaces as an error. There is no retry at this seam.
pub trait ChainClient: Send + Sync {
    /// Deploy one contract instance and return its address.
    fn deploy(&self, spec: &ContractSpec) -> Result<DeployedContract>;

    /// Execute a read-only call and return the raw result value.
    fn call(&self, call: &ContractCall) -> Result<String>;

    /// Submit a state-changing call and wait for its receipt.
    fn send(&self, call: &ContractCall) -> Result<TxReceipt>;
}
