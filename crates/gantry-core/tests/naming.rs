//! Component naming across repeated runs.

mod support;

use gantry_core::component::{ComponentKind, ComponentNames};

use support::mock_chain::{self, MockChain};

#[test]
fn repeated_runs_produce_distinct_component_names() {
    let first = MockChain::new();
    let second = MockChain::new();

    let outcome_a = mock_chain::run(&first).unwrap();
    let outcome_b = mock_chain::run(&second).unwrap();

    for kind in ComponentKind::ALL {
        let name_a = &outcome_a.component(kind).unwrap().name;
        let name_b = &outcome_b.component(kind).unwrap().name;
        assert_ne!(name_a, name_b, "{kind} reused a name across runs");
    }
}

#[test]
fn generated_names_carry_the_contract_prefix() {
    let chain = MockChain::new();
    let outcome = mock_chain::run(&chain).unwrap();

    assert!(
        outcome
            .component(ComponentKind::Distribution)
            .unwrap()
            .name
            .starts_with("BasicDistribution-")
    );
    assert!(
        outcome
            .component(ComponentKind::Pool)
            .unwrap()
            .name
            .starts_with("BasicPool-")
    );
    assert!(
        outcome
            .component(ComponentKind::Product)
            .unwrap()
            .name
            .starts_with("InsuranceProduct-")
    );
}

#[test]
fn explicit_names_override_the_generator() {
    let chain = MockChain::new();
    let names = ComponentNames {
        distribution: Some("MainDistribution".to_string()),
        pool: None,
        product: Some("MainProduct".to_string()),
    };
    let outcome = mock_chain::run_named(&chain, names).unwrap();

    assert_eq!(
        outcome.component(ComponentKind::Distribution).unwrap().name,
        "MainDistribution"
    );
    assert!(
        outcome
            .component(ComponentKind::Pool)
            .unwrap()
            .name
            .starts_with("BasicPool-")
    );
    assert_eq!(
        outcome.component(ComponentKind::Product).unwrap().name,
        "MainProduct"
    );

    // the deployed contract is constructed with the same name
    let deploys = chain.deploys();
    let product_spec = deploys
        .iter()
        .find(|spec| spec.contract == "InsuranceProduct")
        .unwrap();
    assert_eq!(
        product_spec.args[0],
        gantry_core::chain::Arg::Str("MainProduct".to_string())
    );
}
