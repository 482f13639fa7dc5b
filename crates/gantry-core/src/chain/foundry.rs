//! Foundry-backed chain access.
//!
//! Deploys through `forge create` and calls through `cast`, treating the
//! local foundry toolchain as the transport boundary. `cast send
//! --unlocked` leaves signing to the connected node, so no key material
//! ever passes through this process. Receipt logs are decoded against a
//! pinned event table, and the rest of the crate only ever sees named
//! events.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::Command;
use std::sync::{Mutex, MutexGuard};

use serde::Deserialize;

use crate::chain::{
    ChainClient, ContractCall, ContractSpec, DeployedContract, EventRecord, TxReceipt,
};
use crate::error::{ProvisionError, Result};
use crate::types::Address;

/// Static-width field of a pinned event layout.
#[derive(Debug, Clone)]
pub struct EventField {
    pub name: &'static str,
    pub sol_type: &'static str,
    pub indexed: bool,
}

/// Event layout the adapter can decode from raw receipt logs.
///
/// Only static-width fields are supported; that covers the registry's
/// event surface.
#[derive(Debug, Clone)]
pub struct EventAbi {
    pub name: &'static str,
    pub fields: Vec<EventField>,
}

impl EventAbi {
    /// Canonical signature used for topic hashing.
    pub fn signature(&self) -> String {
        let types: Vec<&str> = self.fields.iter().map(|f| f.sol_type).collect();
        format!("{}({})", self.name, types.join(","))
    }
}

fn field(name: &'static str, sol_type: &'static str) -> EventField {
    EventField {
        name,
        sol_type,
        indexed: false,
    }
}

fn indexed(name: &'static str, sol_type: &'static str) -> EventField {
    EventField {
        name,
        sol_type,
        indexed: true,
    }
}

/// Events the registry emits during registration. The layout is owned by
/// the collaborating registry deployment and pinned here, in one place.
/// The assigned id is the event's indexed field and arrives as a topic.
pub fn registry_events() -> Vec<EventAbi> {
    vec![EventAbi {
        name: "LogRegistration",
        fields: vec![
            indexed("nftId", "uint96"),
            field("parentNftId", "uint96"),
            field("objectType", "uint8"),
            field("isInterceptor", "bool"),
            field("objectAddress", "address"),
            field("initialOwner", "address"),
        ],
    }]
}

/// [`ChainClient`] over the foundry toolchain.
#[derive(Debug)]
pub struct FoundryClient {
    rpc_url: String,
    project_root: PathBuf,
    events: Vec<EventAbi>,
    topics: Mutex<BTreeMap<String, String>>,
}

impl FoundryClient {
    pub fn new(rpc_url: impl Into<String>, project_root: impl Into<PathBuf>) -> Self {
        Self {
            rpc_url: rpc_url.into(),
            project_root: project_root.into(),
            events: registry_events(),
            topics: Mutex::new(BTreeMap::new()),
        }
    }

    /// Seed a topic hash instead of resolving it through `cast sig-event`.
    pub fn with_event_topic(self, event: &str, topic: &str) -> Self {
        self.topic_cache()
            .insert(event.to_string(), topic.to_string());
        self
    }

    /// Check that the forge and cast binaries are invocable.
    pub fn ensure_toolchain() -> Result<()> {
        for tool in ["forge", "cast"] {
            let output = Command::new(tool)
                .arg("--version")
                .output()
                .map_err(|err| ProvisionError::Toolchain {
                    reason: format!("failed to invoke {tool} --version: {err}"),
                })?;
            if !output.status.success() {
                return Err(ProvisionError::Toolchain {
                    reason: format!("{tool} --version failed"),
                });
            }
        }
        Ok(())
    }

    fn topic_cache(&self) -> MutexGuard<'_, BTreeMap<String, String>> {
        self.topics.lock().unwrap_or_else(|err| err.into_inner())
    }

    fn run(&self, tool: &str, args: &[String]) -> std::result::Result<String, String> {
        let output = Command::new(tool)
            .args(args)
            .current_dir(&self.project_root)
            .output()
            .map_err(|err| format!("failed to invoke {tool}: {err}"))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let verb = args.first().map(String::as_str).unwrap_or_default();
            return Err(format!("{tool} {verb} failed: {}", stderr.trim()));
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    fn contract_path(contract: &str) -> String {
        format!("src/{contract}.sol:{contract}")
    }

    fn library_flag(name: &str, address: &Address) -> String {
        format!("src/{name}.sol:{name}:{address}")
    }

    fn topic_for(&self, abi: &EventAbi) -> Result<String> {
        if let Some(topic) = self.topic_cache().get(abi.name) {
            return Ok(topic.clone());
        }
        let topic = self
            .run("cast", &["sig-event".to_string(), abi.signature()])
            .map_err(|reason| ProvisionError::Toolchain { reason })?;
        self.topic_cache()
            .insert(abi.name.to_string(), topic.clone());
        Ok(topic)
    }

    /// Decode every log that matches a pinned event; others are skipped.
    fn decode_receipt(&self, raw: &RawReceipt) -> Result<Vec<EventRecord>> {
        let mut events = Vec::new();
        for log in &raw.logs {
            let Some(topic0) = log.topics.first() else {
                continue;
            };
            for abi in &self.events {
                if self.topic_for(abi)? == *topic0 {
                    events.push(decode_log(abi, log)?);
                    break;
                }
            }
        }
        Ok(events)
    }
}

impl ChainClient for FoundryClient {
    fn deploy(&self, spec: &ContractSpec) -> Result<DeployedContract> {
        let mut args = vec![
            "create".to_string(),
            Self::contract_path(&spec.contract),
            "--rpc-url".to_string(),
            self.rpc_url.clone(),
            "--from".to_string(),
            spec.deployer.to_string(),
            "--unlocked".to_string(),
            "--broadcast".to_string(),
            "--json".to_string(),
        ];
        for (name, address) in &spec.libraries {
            args.push("--libraries".to_string());
            args.push(Self::library_flag(name, address));
        }
        // --constructor-args is greedy and must come last
        if !spec.args.is_empty() {
            args.push("--constructor-args".to_string());
            args.extend(spec.args.iter().map(|arg| arg.to_string()));
        }

        let stdout = self
            .run("forge", &args)
            .map_err(|reason| ProvisionError::deploy(&spec.contract, reason))?;
        let created: ForgeCreateOutput = serde_json::from_str(last_json_line(&stdout))
            .map_err(|err| ProvisionError::malformed("forge create", err.to_string()))?;
        Ok(DeployedContract {
            address: Address::new(created.deployed_to),
            tx_hash: created.transaction_hash,
        })
    }

    fn call(&self, call: &ContractCall) -> Result<String> {
        let mut args = vec![
            "call".to_string(),
            call.contract.to_string(),
            call.method.clone(),
        ];
        args.extend(call.args.iter().map(|arg| arg.to_string()));
        args.push("--rpc-url".to_string());
        args.push(self.rpc_url.clone());
        self.run("cast", &args)
            .map_err(|reason| ProvisionError::tx(&call.label, reason))
    }

    fn send(&self, call: &ContractCall) -> Result<TxReceipt> {
        let from = call.from.as_ref().ok_or_else(|| {
            ProvisionError::tx(&call.label, "state-changing call has no sender")
        })?;
        let mut args = vec![
            "send".to_string(),
            call.contract.to_string(),
            call.method.clone(),
        ];
        args.extend(call.args.iter().map(|arg| arg.to_string()));
        args.extend([
            "--rpc-url".to_string(),
            self.rpc_url.clone(),
            "--from".to_string(),
            from.to_string(),
            "--unlocked".to_string(),
            "--json".to_string(),
        ]);

        let stdout = self
            .run("cast", &args)
            .map_err(|reason| ProvisionError::tx(&call.label, reason))?;
        let raw: RawReceipt = serde_json::from_str(last_json_line(&stdout))
            .map_err(|err| ProvisionError::malformed("cast send", err.to_string()))?;
        if !raw.is_success() {
            return Err(ProvisionError::tx(
                &call.label,
                format!("transaction {} reverted", raw.transaction_hash),
            ));
        }
        Ok(TxReceipt {
            tx_hash: raw.transaction_hash.clone(),
            events: self.decode_receipt(&raw)?,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ForgeCreateOutput {
    deployed_to: String,
    transaction_hash: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawReceipt {
    transaction_hash: String,
    status: String,
    #[serde(default)]
    logs: Vec<RawLog>,
}

impl RawReceipt {
    fn is_success(&self) -> bool {
        matches!(self.status.as_str(), "0x1" | "1")
    }
}

#[derive(Debug, Deserialize)]
struct RawLog {
    #[serde(default)]
    topics: Vec<String>,
    #[serde(default)]
    data: String,
}

/// Toolchain output may prefix the JSON payload with build noise.
fn last_json_line(stdout: &str) -> &str {
    stdout
        .lines()
        .rev()
        .map(str::trim)
        .find(|line| line.starts_with('{'))
        .unwrap_or(stdout)
}

fn decode_log(abi: &EventAbi, log: &RawLog) -> Result<EventRecord> {
    let data = decode_hex("log data", &log.data)?;
    let mut data_words = data.chunks_exact(32);
    let mut topics = log.topics.iter().skip(1);

    let mut record = EventRecord::new(abi.name);
    for field in &abi.fields {
        let word = if field.indexed {
            let topic = topics.next().ok_or_else(|| {
                ProvisionError::malformed(
                    "cast",
                    format!("missing indexed topic for {}.{}", abi.name, field.name),
                )
            })?;
            decode_hex("log topic", topic)?
        } else {
            data_words
                .next()
                .ok_or_else(|| {
                    ProvisionError::malformed(
                        "cast",
                        format!("log data too short for {}.{}", abi.name, field.name),
                    )
                })?
                .to_vec()
        };
        record = record.field(field.name, render_word(field.sol_type, &word)?);
    }
    Ok(record)
}

fn decode_hex(what: &str, value: &str) -> Result<Vec<u8>> {
    let trimmed = value.trim();
    let digits = trimmed.strip_prefix("0x").unwrap_or(trimmed);
    hex::decode(digits)
        .map_err(|err| ProvisionError::malformed("cast", format!("{what} is not hex: {err}")))
}

fn render_word(sol_type: &str, word: &[u8]) -> Result<String> {
    if word.len() != 32 {
        return Err(ProvisionError::malformed(
            "cast",
            format!("expected a 32-byte word, got {} bytes", word.len()),
        ));
    }
    if sol_type == "address" {
        Ok(format!("0x{}", hex::encode(&word[12..])))
    } else if sol_type == "bool" {
        Ok((word[31] != 0).to_string())
    } else if sol_type.starts_with("uint") {
        if word[..16].iter().any(|byte| *byte != 0) {
            return Err(ProvisionError::malformed(
                "cast",
                format!("{sol_type} value exceeds the supported width"),
            ));
        }
        let mut bytes = [0u8; 16];
        bytes.copy_from_slice(&word[16..]);
        Ok(u128::from_be_bytes(bytes).to_string())
    } else {
        Ok(format!("0x{}", hex::encode(word)))
    }
}
