//! Dependency-ordered deployment plan.
//!
//! The dependency graph over component kinds is explicit (Distribution and
//! Pool stand alone, Product needs both) and the execution order is derived
//! from it, so adding a kind means declaring its dependencies, not editing
//! a hand-written sequence.

use crate::component::ComponentKind;

/// Execution order over a set of component kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployPlan {
    order: Vec<ComponentKind>,
}

impl DeployPlan {
    /// The standard three-component plan.
    pub fn standard() -> Self {
        Self::for_kinds(&ComponentKind::ALL)
    }

    /// Plan for `kinds` plus any dependencies they pull in.
    ///
    /// Ordering is a stable topological sort: among kinds whose
    /// dependencies are satisfied, declaration order wins, which fixes
    /// Distribution before Pool.
    pub fn for_kinds(kinds: &[ComponentKind]) -> Self {
        let mut pending: Vec<ComponentKind> = ComponentKind::ALL
            .into_iter()
            .filter(|kind| {
                kinds.contains(kind)
                    || kinds.iter().any(|k| k.dependencies().contains(kind))
            })
            .collect();

        let mut order = Vec::with_capacity(pending.len());
        while let Some(pos) = pending
            .iter()
            .position(|kind| kind.dependencies().iter().all(|dep| order.contains(dep)))
        {
            order.push(pending.remove(pos));
        }
        debug_assert!(pending.is_empty(), "component dependency graph is acyclic");

        Self { order }
    }

    pub fn ordered(&self) -> &[ComponentKind] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_plan_orders_product_last() {
        let plan = DeployPlan::standard();
        assert_eq!(
            plan.ordered(),
            [
                ComponentKind::Distribution,
                ComponentKind::Pool,
                ComponentKind::Product
            ]
        );
    }

    #[test]
    fn requesting_product_pulls_in_its_dependencies() {
        let plan = DeployPlan::for_kinds(&[ComponentKind::Product]);
        assert_eq!(
            plan.ordered(),
            [
                ComponentKind::Distribution,
                ComponentKind::Pool,
                ComponentKind::Product
            ]
        );
    }

    #[test]
    fn independent_kinds_keep_declaration_order() {
        let plan = DeployPlan::for_kinds(&[ComponentKind::Pool, ComponentKind::Distribution]);
        assert_eq!(
            plan.ordered(),
            [ComponentKind::Distribution, ComponentKind::Pool]
        );
    }
}
