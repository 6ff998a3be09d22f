//! Cell recycling for picker columns.
//!
//! Retired cells are kept per reuse identifier in LIFO order and handed back
//! out by [`CellReusePool::dequeue`] before any new cell is constructed.
//! The pool never touches the scene graph; attaching and detaching cells is
//! the caller's job.

use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::cell::{CellNode, ReusableCell};
use crate::collections::map::HashMap;
use crate::error::PickerError;

/// Constructor registered for a reuse identifier.
pub type CellFactory<C> = Rc<dyn Fn() -> C>;

/// Policy for keeping retired cells around.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellReusePolicy {
    /// Maximum number of retired cells kept for each identifier.
    pub max_cells_per_identifier: usize,

    /// Whether retired cells are kept at all.
    pub enabled: bool,
}

impl Default for CellReusePolicy {
    fn default() -> Self {
        Self {
            max_cells_per_identifier: usize::MAX,
            enabled: true,
        }
    }
}

impl CellReusePolicy {
    /// Creates a policy keeping at most `max_cells_per_identifier` cells per queue.
    pub fn new(max_cells_per_identifier: usize) -> Self {
        Self {
            max_cells_per_identifier,
            enabled: true,
        }
    }

    /// Disables reuse; every dequeue constructs a new cell.
    pub fn disabled() -> Self {
        Self {
            max_cells_per_identifier: 0,
            enabled: false,
        }
    }
}

/// Counters describing pool traffic.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReuseStats {
    /// Cells currently waiting in free lists.
    pub cells_in_pool: usize,

    /// Cells built through a registered factory.
    pub total_created: usize,

    /// Dequeues served from a free list.
    pub reuse_count: usize,
}

/// Free lists of retired cells keyed by reuse identifier.
pub struct CellReusePool<C: CellNode> {
    /// Registered factories, in registration order.
    factories: IndexMap<Rc<str>, CellFactory<C>>,

    /// Retired cells per identifier; the back of each list is reused first.
    free_cells: HashMap<Rc<str>, Vec<C>>,

    policy: CellReusePolicy,
    stats: ReuseStats,
}

impl<C: CellNode> CellReusePool<C> {
    /// Creates an empty pool with the default policy.
    pub fn new() -> Self {
        Self::with_policy(CellReusePolicy::default())
    }

    /// Creates an empty pool with the given policy.
    pub fn with_policy(policy: CellReusePolicy) -> Self {
        Self {
            factories: IndexMap::new(),
            free_cells: HashMap::default(),
            policy,
            stats: ReuseStats::default(),
        }
    }

    pub fn policy(&self) -> &CellReusePolicy {
        &self.policy
    }

    /// Replaces the policy, trimming free lists that now exceed it.
    pub fn set_policy(&mut self, policy: CellReusePolicy) {
        self.policy = policy;
        let limit = if self.policy.enabled {
            self.policy.max_cells_per_identifier
        } else {
            0
        };
        for cells in self.free_cells.values_mut() {
            cells.truncate(limit);
        }
        self.refresh_pool_count();
    }

    /// Associates `identifier` with a cell constructor.
    ///
    /// Registering an identifier again replaces its factory but keeps the
    /// cells already retired under it.
    pub fn register_identifier<F>(&mut self, identifier: impl Into<String>, factory: F)
    where
        F: Fn() -> C + 'static,
    {
        let identifier: Rc<str> = Rc::from(identifier.into());
        self.factories.insert(identifier, Rc::new(factory));
    }

    /// Whether `identifier` has a registered factory.
    pub fn is_registered(&self, identifier: &str) -> bool {
        self.factories.contains_key(identifier)
    }

    /// Registered identifiers in registration order.
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(|id| id.as_ref())
    }

    /// Returns a cell for `identifier`, reusing the most recently retired one.
    ///
    /// # Panics
    ///
    /// Panics when no identifier is registered at all, or when `identifier`
    /// is not registered. Both indicate a misconfigured picker.
    pub fn dequeue(&mut self, identifier: &str) -> ReusableCell<C> {
        match self.try_dequeue(identifier) {
            Ok(cell) => cell,
            Err(err) => panic!("{err}"),
        }
    }

    /// Fallible form of [`dequeue`](Self::dequeue).
    pub fn try_dequeue(&mut self, identifier: &str) -> Result<ReusableCell<C>, PickerError> {
        if self.factories.is_empty() {
            return Err(PickerError::NoIdentifiersRegistered);
        }
        let Some((key, factory)) = self.factories.get_key_value(identifier) else {
            return Err(PickerError::UnknownIdentifier(identifier.to_string()));
        };
        let key = Rc::clone(key);

        if let Some(mut node) = self.free_cells.get_mut(identifier).and_then(Vec::pop) {
            node.prepare_for_reuse();
            self.stats.reuse_count += 1;
            self.stats.cells_in_pool -= 1;
            return Ok(ReusableCell::tagged(node, key));
        }

        let node = factory();
        self.stats.total_created += 1;
        Ok(ReusableCell::tagged(node, key))
    }

    /// Returns a cell to the free list of its identifier.
    ///
    /// Untagged cells, and cells over the policy limit, are dropped.
    pub fn enqueue(&mut self, cell: ReusableCell<C>) {
        if !self.policy.enabled {
            return;
        }
        let Some(identifier) = cell.identifier_rc() else {
            return;
        };
        let cells = self.free_cells.entry(identifier).or_default();
        if cells.len() < self.policy.max_cells_per_identifier {
            cells.push(cell.into_node());
            self.stats.cells_in_pool += 1;
        }
    }

    /// Number of retired cells waiting under `identifier`.
    pub fn available_count(&self, identifier: &str) -> usize {
        self.free_cells.get(identifier).map_or(0, Vec::len)
    }

    pub fn stats(&self) -> ReuseStats {
        self.stats.clone()
    }

    /// Drops every retired cell. Registrations are kept.
    pub fn clear(&mut self) {
        self.free_cells.clear();
        self.stats.cells_in_pool = 0;
    }

    fn refresh_pool_count(&mut self) {
        self.stats.cells_in_pool = self.free_cells.values().map(Vec::len).sum();
    }
}

impl<C: CellNode> Default for CellReusePool<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: CellNode> fmt::Debug for CellReusePool<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CellReusePool")
            .field("identifiers", &self.factories.keys().collect::<Vec<_>>())
            .field("policy", &self.policy)
            .field("stats", &self.stats)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics::Point;
    use std::cell::Cell;

    #[derive(Debug, Default)]
    struct Probe {
        serial: u32,
        actions: Vec<&'static str>,
        child_actions: Vec<&'static str>,
    }

    impl CellNode for Probe {
        fn set_position(&mut self, _position: Point) {}
        fn set_alpha(&mut self, _alpha: f32) {}
        fn prepare_for_reuse(&mut self) {
            self.actions.clear();
            self.child_actions.clear();
        }
    }

    fn counting_pool() -> CellReusePool<Probe> {
        let next = Rc::new(Cell::new(0));
        let mut pool = CellReusePool::new();
        pool.register_identifier("cell", move || {
            next.set(next.get() + 1);
            Probe {
                serial: next.get(),
                ..Probe::default()
            }
        });
        pool
    }

    #[test]
    fn test_dequeue_constructs_when_empty() {
        let mut pool = counting_pool();

        let a = pool.dequeue("cell");
        let b = pool.dequeue("cell");

        assert_eq!(a.node().serial, 1);
        assert_eq!(b.node().serial, 2);
        assert_eq!(a.identifier(), Some("cell"));
        assert_eq!(pool.stats().total_created, 2);
        assert_eq!(pool.stats().reuse_count, 0);
    }

    #[test]
    fn test_reuse_returns_same_instance_prepared() {
        let mut pool = counting_pool();

        let mut cell = pool.dequeue("cell");
        cell.node_mut().actions.push("fade");
        cell.node_mut().child_actions.push("pulse");
        pool.enqueue(cell);
        assert_eq!(pool.available_count("cell"), 1);

        let reused = pool.dequeue("cell");
        assert_eq!(reused.node().serial, 1);
        assert!(reused.node().actions.is_empty());
        assert!(reused.node().child_actions.is_empty());
        assert_eq!(pool.stats().reuse_count, 1);
        assert_eq!(pool.available_count("cell"), 0);
    }

    #[test]
    fn test_free_list_is_lifo() {
        let mut pool = counting_pool();
        let first = pool.dequeue("cell");
        let second = pool.dequeue("cell");

        pool.enqueue(first);
        pool.enqueue(second);

        assert_eq!(pool.dequeue("cell").node().serial, 2);
        assert_eq!(pool.dequeue("cell").node().serial, 1);
    }

    #[test]
    fn test_untagged_cells_are_dropped() {
        let mut pool = counting_pool();
        pool.enqueue(ReusableCell::untagged(Probe::default()));

        assert_eq!(pool.stats().cells_in_pool, 0);
        assert_eq!(pool.available_count("cell"), 0);
    }

    #[test]
    fn test_policy_limit() {
        let mut pool = counting_pool();
        pool.set_policy(CellReusePolicy::new(2));

        let cells: Vec<_> = (0..5).map(|_| pool.dequeue("cell")).collect();
        for cell in cells {
            pool.enqueue(cell);
        }

        assert_eq!(pool.available_count("cell"), 2);
        assert_eq!(pool.stats().cells_in_pool, 2);
    }

    #[test]
    fn test_disabled_policy_never_reuses() {
        let mut pool = counting_pool();
        pool.set_policy(CellReusePolicy::disabled());

        let cell = pool.dequeue("cell");
        pool.enqueue(cell);

        assert_eq!(pool.dequeue("cell").node().serial, 2);
    }

    #[test]
    fn test_identifiers_keep_registration_order() {
        let mut pool = counting_pool();
        pool.register_identifier("header", Probe::default);

        assert_eq!(pool.identifiers().collect::<Vec<_>>(), vec!["cell", "header"]);
        assert!(pool.is_registered("header"));
    }

    #[test]
    fn test_try_dequeue_reports_configuration_errors() {
        let mut empty: CellReusePool<Probe> = CellReusePool::new();
        assert_eq!(
            empty.try_dequeue("cell").unwrap_err(),
            PickerError::NoIdentifiersRegistered
        );

        let mut pool = counting_pool();
        assert_eq!(
            pool.try_dequeue("missing").unwrap_err(),
            PickerError::UnknownIdentifier("missing".into())
        );
    }

    #[test]
    #[should_panic(expected = "no identifier is registered")]
    fn test_dequeue_without_registration_panics() {
        let mut pool: CellReusePool<Probe> = CellReusePool::new();
        let _ = pool.dequeue("cell");
    }
}
