//! Component catalog: the registrable kinds, their constructor shapes,
//! library links and instance naming.

use std::collections::BTreeMap;
use std::fmt;

use nanoid::nanoid;

use crate::chain::{Arg, ContractSpec};
use crate::config::LibraryAddresses;
use crate::error::{ProvisionError, Result};
use crate::types::{Address, Fee, NftId, ObjectType, RoleId};

/// Contract name of the payment-token mock deployed once per run.
pub const TOKEN_CONTRACT: &str = "UsdcMock";

/// Alphabet for randomized name suffixes.
const SUFFIX_ALPHABET: [char; 16] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f',
];
const SUFFIX_LEN: usize = 9;

/// A registrable component kind and everything the catalog knows about it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ComponentKind {
    Distribution,
    Pool,
    Product,
}

impl ComponentKind {
    /// Declaration order; independent kinds keep this order in a plan.
    pub const ALL: [ComponentKind; 3] = [
        ComponentKind::Distribution,
        ComponentKind::Pool,
        ComponentKind::Product,
    ];

    pub fn object_type(self) -> ObjectType {
        match self {
            ComponentKind::Distribution => ObjectType::Distribution,
            ComponentKind::Pool => ObjectType::Pool,
            ComponentKind::Product => ObjectType::Product,
        }
    }

    /// Compiled contract deployed for this kind.
    pub fn contract_name(self) -> &'static str {
        match self {
            ComponentKind::Distribution => "BasicDistribution",
            ComponentKind::Pool => "BasicPool",
            ComponentKind::Product => "InsuranceProduct",
        }
    }

    /// Role the owner account needs before registration.
    pub fn owner_role(self) -> RoleId {
        match self {
            ComponentKind::Distribution => RoleId(1010),
            ComponentKind::Pool => RoleId(1020),
            ComponentKind::Product => RoleId(1030),
        }
    }

    /// Kinds that must be registered before this one.
    pub fn dependencies(self) -> &'static [ComponentKind] {
        match self {
            ComponentKind::Product => &[ComponentKind::Distribution, ComponentKind::Pool],
            _ => &[],
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.object_type())
    }
}

/// Optional explicit names; anything unset gets a randomized one.
#[derive(Debug, Clone, Default)]
pub struct ComponentNames {
    pub distribution: Option<String>,
    pub pool: Option<String>,
    pub product: Option<String>,
}

impl ComponentNames {
    pub fn resolve(&self, kind: ComponentKind) -> String {
        let explicit = match kind {
            ComponentKind::Distribution => self.distribution.as_deref(),
            ComponentKind::Pool => self.pool.as_deref(),
            ComponentKind::Product => self.product.as_deref(),
        };
        component_name(kind, explicit)
    }
}

/// Instance name for one deployment.
///
/// The randomized suffix avoids collisions across repeated runs; it is
/// best-effort, not a uniqueness guarantee. Callers that need one pass an
/// explicit name instead.
pub fn component_name(kind: ComponentKind, explicit: Option<&str>) -> String {
    match explicit {
        Some(name) => name.to_string(),
        None => format!(
            "{}-{}",
            kind.contract_name(),
            nanoid!(SUFFIX_LEN, &SUFFIX_ALPHABET)
        ),
    }
}

/// Inputs shared by every component deployment in one run.
#[derive(Debug, Clone)]
pub struct DeployInputs {
    pub registry: Address,
    pub instance_nft_id: NftId,
    pub token: Address,
    pub libraries: LibraryAddresses,
}

/// Build the deployment spec for one component.
///
/// `resolved` holds the addresses of already-registered components; kinds
/// with dependencies pull them from there.
pub fn contract_spec(
    kind: ComponentKind,
    name: &str,
    inputs: &DeployInputs,
    owner: &Address,
    resolved: &BTreeMap<ComponentKind, Address>,
) -> Result<ContractSpec> {
    let mut args = vec![
        Arg::Str(name.to_string()),
        Arg::Addr(inputs.registry.clone()),
        Arg::Id(inputs.instance_nft_id.clone()),
        Arg::Addr(inputs.token.clone()),
    ];
    match kind {
        ComponentKind::Distribution => {
            // min distribution owner fee, then distribution fee
            args.push(Arg::Fee(Fee::ZERO));
            args.push(Arg::Fee(Fee::ZERO));
        }
        ComponentKind::Pool => {
            // not intercepting nft transfers
            args.push(Arg::Bool(false));
        }
        ComponentKind::Product => {
            args.push(Arg::Bool(false));
            args.push(Arg::Addr(dependency_address(kind, ComponentKind::Pool, resolved)?));
            args.push(Arg::Addr(dependency_address(
                kind,
                ComponentKind::Distribution,
                resolved,
            )?));
            // product fee, then processing fee
            args.push(Arg::Fee(Fee::ZERO));
            args.push(Arg::Fee(Fee::ZERO));
        }
    }
    args.push(Arg::Addr(owner.clone()));

    Ok(ContractSpec {
        contract: kind.contract_name().to_string(),
        deployer: owner.clone(),
        args,
        libraries: library_links(kind, &inputs.libraries),
    })
}

/// Deployment spec for the payment-token mock: no arguments, no libraries.
pub fn token_spec(deployer: &Address) -> ContractSpec {
    ContractSpec {
        contract: TOKEN_CONTRACT.to_string(),
        deployer: deployer.clone(),
        args: Vec::new(),
        libraries: BTreeMap::new(),
    }
}

fn dependency_address(
    kind: ComponentKind,
    dependency: ComponentKind,
    resolved: &BTreeMap<ComponentKind, Address>,
) -> Result<Address> {
    resolved
        .get(&dependency)
        .cloned()
        .ok_or_else(|| ProvisionError::DependencyUnresolved {
            component: kind.to_string(),
            dependency: dependency.to_string(),
        })
}

fn library_links(kind: ComponentKind, libraries: &LibraryAddresses) -> BTreeMap<String, Address> {
    let mut links = BTreeMap::new();
    links.insert("NftIdLib".to_string(), libraries.nft_id.clone());
    match kind {
        ComponentKind::Distribution => {
            links.insert("ReferralLib".to_string(), libraries.referral.clone());
        }
        ComponentKind::Pool => {
            links.insert("AmountLib".to_string(), libraries.amount.clone());
            links.insert("FeeLib".to_string(), libraries.fee.clone());
            links.insert("RoleIdLib".to_string(), libraries.role_id.clone());
            links.insert("UFixedLib".to_string(), libraries.ufixed.clone());
        }
        ComponentKind::Product => {}
    }
    links
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_names_carry_the_contract_prefix() {
        let name = component_name(ComponentKind::Pool, None);
        assert!(name.starts_with("BasicPool-"), "{name}");
        assert_eq!(name.len(), "BasicPool-".len() + SUFFIX_LEN);
    }

    #[test]
    fn explicit_names_are_used_verbatim() {
        let name = component_name(ComponentKind::Product, Some("MainProduct"));
        assert_eq!(name, "MainProduct");
    }

    #[test]
    fn product_spec_requires_resolved_dependencies() {
        let inputs = DeployInputs {
            registry: Address::from("0x0000000000000000000000000000000000000010"),
            instance_nft_id: NftId::new("1"),
            token: Address::from("0x0000000000000000000000000000000000000020"),
            libraries: LibraryAddresses {
                amount: Address::from("0x00000000000000000000000000000000000000a1"),
                fee: Address::from("0x00000000000000000000000000000000000000a2"),
                nft_id: Address::from("0x00000000000000000000000000000000000000a3"),
                referral: Address::from("0x00000000000000000000000000000000000000a4"),
                role_id: Address::from("0x00000000000000000000000000000000000000a5"),
                ufixed: Address::from("0x00000000000000000000000000000000000000a6"),
            },
        };
        let owner = Address::from("0x0000000000000000000000000000000000000030");

        let err = contract_spec(
            ComponentKind::Product,
            "P",
            &inputs,
            &owner,
            &BTreeMap::new(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("depends on"));
    }
}
