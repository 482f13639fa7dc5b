//! Recording chain client for orchestration tests.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::Mutex;

use gantry_core::chain::{
    ChainClient, ContractCall, ContractSpec, DeployedContract, EventRecord, TxReceipt,
};
use gantry_core::component::ComponentNames;
use gantry_core::config::{Accounts, LibraryAddresses, ProvisionConfig};
use gantry_core::error::{ProvisionError, Result};
use gantry_core::orchestration::{ProvisionOutcome, Provisioner};
use gantry_core::types::{Address, NftId};

pub const ACCESS_MANAGER: &str = "0x00000000000000000000000000000000000000aa";
pub const REGISTRY: &str = "0x00000000000000000000000000000000000000bb";
pub const DISTRIBUTION_SERVICE: &str = "0x0000000000000000000000000000000000000aaa";
pub const POOL_SERVICE: &str = "0x0000000000000000000000000000000000000bbb";
pub const PRODUCT_SERVICE: &str = "0x0000000000000000000000000000000000000ccc";

pub const INSTANCE_NFT_ID: &str = "23133705";

/// Everything the orchestrator asked of the chain, in submission order.
#[derive(Debug, Clone)]
pub enum ChainOp {
    Deploy(ContractSpec),
    Call(ContractCall),
    Send(ContractCall),
}

/// How the mock shapes registration receipts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiptMode {
    Normal,
    MissingEvent,
    DuplicateEvent,
    MissingNftId,
}

/// Programmable [`ChainClient`] that records every operation.
pub struct MockChain {
    ops: Mutex<Vec<ChainOp>>,
    services: BTreeMap<(u8, u8), Address>,
    nft_ids: Mutex<Vec<String>>,
    fail_grant_at: Option<usize>,
    fail_deploys: Vec<String>,
    receipt_mode: ReceiptMode,
    grant_count: Mutex<usize>,
    deploy_count: Mutex<usize>,
    register_count: Mutex<usize>,
}

impl Default for MockChain {
    fn default() -> Self {
        Self::new()
    }
}

impl MockChain {
    pub fn new() -> Self {
        Self {
            ops: Mutex::new(Vec::new()),
            services: BTreeMap::from([
                ((110, 3), Address::from(DISTRIBUTION_SERVICE)),
                ((120, 3), Address::from(POOL_SERVICE)),
                ((130, 3), Address::from(PRODUCT_SERVICE)),
            ]),
            nft_ids: Mutex::new(Vec::new()),
            fail_grant_at: None,
            fail_deploys: Vec::new(),
            receipt_mode: ReceiptMode::Normal,
            grant_count: Mutex::new(0),
            deploy_count: Mutex::new(0),
            register_count: Mutex::new(0),
        }
    }

    /// Identifiers handed out by successive registrations.
    pub fn with_nft_ids(self, ids: &[&str]) -> Self {
        *self.nft_ids.lock().unwrap() = ids.iter().rev().map(|id| id.to_string()).collect();
        self
    }

    /// Fail the `index`-th grant transaction (zero-based).
    pub fn fail_grant(mut self, index: usize) -> Self {
        self.fail_grant_at = Some(index);
        self
    }

    /// Fail any deployment of `contract`.
    pub fn fail_deploy(mut self, contract: &str) -> Self {
        self.fail_deploys.push(contract.to_string());
        self
    }

    pub fn with_receipt_mode(mut self, mode: ReceiptMode) -> Self {
        self.receipt_mode = mode;
        self
    }

    pub fn ops(&self) -> Vec<ChainOp> {
        self.ops.lock().unwrap().clone()
    }

    pub fn deploys(&self) -> Vec<ContractSpec> {
        self.ops()
            .into_iter()
            .filter_map(|op| match op {
                ChainOp::Deploy(spec) => Some(spec),
                _ => None,
            })
            .collect()
    }

    pub fn sends(&self) -> Vec<ContractCall> {
        self.ops()
            .into_iter()
            .filter_map(|op| match op {
                ChainOp::Send(call) => Some(call),
                _ => None,
            })
            .collect()
    }

    pub fn calls(&self) -> Vec<ContractCall> {
        self.ops()
            .into_iter()
            .filter_map(|op| match op {
                ChainOp::Call(call) => Some(call),
                _ => None,
            })
            .collect()
    }

    fn next_nft_id(&self) -> String {
        let mut count = self.register_count.lock().unwrap();
        *count += 1;
        self.nft_ids
            .lock()
            .unwrap()
            .pop()
            .unwrap_or_else(|| (100 + *count).to_string())
    }
}

impl ChainClient for MockChain {
    fn deploy(&self, spec: &ContractSpec) -> Result<DeployedContract> {
        self.ops.lock().unwrap().push(ChainOp::Deploy(spec.clone()));
        if self.fail_deploys.contains(&spec.contract) {
            return Err(ProvisionError::deploy(&spec.contract, "constructor reverted"));
        }
        let mut count = self.deploy_count.lock().unwrap();
        *count += 1;
        Ok(DeployedContract {
            address: Address::new(format!("0x{:040x}", 0xd000 + *count)),
            tx_hash: format!("0x{:x}", *count),
        })
    }

    fn call(&self, call: &ContractCall) -> Result<String> {
        self.ops.lock().unwrap().push(ChainOp::Call(call.clone()));
        match call.method_name() {
            "getInstanceAccessManager" => Ok(ACCESS_MANAGER.to_string()),
            "getRegistry" => Ok(REGISTRY.to_string()),
            "getServiceAddress" => {
                let object: u8 = call.args[0].to_string().parse().unwrap();
                let version: u8 = call.args[1].to_string().parse().unwrap();
                self.services
                    .get(&(object, version))
                    .map(|address| address.to_string())
                    .ok_or_else(|| {
                        ProvisionError::tx(
                            &call.label,
                            format!("no service for object type {object} version {version}"),
                        )
                    })
            }
            other => Err(ProvisionError::tx(
                &call.label,
                format!("unexpected read {other}"),
            )),
        }
    }

    fn send(&self, call: &ContractCall) -> Result<TxReceipt> {
        self.ops.lock().unwrap().push(ChainOp::Send(call.clone()));
        match call.method_name() {
            "grantRole" => {
                let mut count = self.grant_count.lock().unwrap();
                let index = *count;
                *count += 1;
                if self.fail_grant_at == Some(index) {
                    return Err(ProvisionError::tx(&call.label, "grant reverted"));
                }
                Ok(TxReceipt {
                    tx_hash: format!("0xg{index}"),
                    events: Vec::new(),
                })
            }
            "register" => {
                let events = match self.receipt_mode {
                    ReceiptMode::Normal => {
                        vec![EventRecord::new("LogRegistration").field("nftId", self.next_nft_id())]
                    }
                    ReceiptMode::MissingEvent => Vec::new(),
                    ReceiptMode::DuplicateEvent => vec![
                        EventRecord::new("LogRegistration").field("nftId", self.next_nft_id()),
                        EventRecord::new("LogRegistration").field("nftId", self.next_nft_id()),
                    ],
                    ReceiptMode::MissingNftId => vec![EventRecord::new("LogRegistration")],
                };
                Ok(TxReceipt {
                    tx_hash: "0xr".to_string(),
                    events,
                })
            }
            other => Err(ProvisionError::tx(
                &call.label,
                format!("unexpected send {other}"),
            )),
        }
    }
}

pub fn test_config() -> ProvisionConfig {
    ProvisionConfig {
        instance_address: Address::from("0x00000000000000000000000000000000000000f0"),
        instance_nft_id: NftId::new(INSTANCE_NFT_ID),
        libraries: LibraryAddresses {
            amount: Address::from("0x00000000000000000000000000000000000000a1"),
            fee: Address::from("0x00000000000000000000000000000000000000a2"),
            nft_id: Address::from("0x00000000000000000000000000000000000000a3"),
            referral: Address::from("0x00000000000000000000000000000000000000a4"),
            role_id: Address::from("0x00000000000000000000000000000000000000a5"),
            ufixed: Address::from("0x00000000000000000000000000000000000000a6"),
        },
    }
}

pub fn test_accounts() -> Accounts {
    Accounts {
        protocol_owner: Address::from("0x0000000000000000000000000000000000000001"),
        instance_owner: Address::from("0x0000000000000000000000000000000000000002"),
        distribution_owner: Address::from("0x0000000000000000000000000000000000000003"),
        pool_owner: Address::from("0x0000000000000000000000000000000000000004"),
        product_owner: Address::from("0x0000000000000000000000000000000000000005"),
    }
}

pub fn run(chain: &MockChain) -> Result<ProvisionOutcome> {
    Provisioner::new(chain, test_config(), test_accounts()).run()
}

pub fn run_named(chain: &MockChain, names: ComponentNames) -> Result<ProvisionOutcome> {
    Provisioner::new(chain, test_config(), test_accounts())
        .with_names(names)
        .run()
}
