use std::sync::atomic::{AtomicU64, Ordering};

use spinwheel_foundation::{CellNode, Point};

static NEXT_CELL_ID: AtomicU64 = AtomicU64::new(1);

/// A scene-graph stand-in that records everything the picker does to it.
#[derive(Debug, Clone, PartialEq)]
pub struct TestCell {
    /// Unique per constructed cell; survives reuse.
    pub id: u64,
    pub label: String,
    pub position: Point,
    pub alpha: f32,
    pub z_position: f32,
    pub attached_to: Option<usize>,
    pub attach_count: usize,
    pub reuse_count: usize,

    /// Running actions, cleared by reuse.
    pub actions: Vec<String>,
    pub children: Vec<TestCell>,
}

impl TestCell {
    pub fn new() -> Self {
        Self {
            id: NEXT_CELL_ID.fetch_add(1, Ordering::Relaxed),
            label: String::new(),
            position: Point::ZERO,
            alpha: 1.0,
            z_position: 0.0,
            attached_to: None,
            attach_count: 0,
            reuse_count: 0,
            actions: Vec::new(),
            children: Vec::new(),
        }
    }

    /// A cell with one child, so reuse can be checked to reach descendants.
    pub fn with_child() -> Self {
        let mut cell = Self::new();
        cell.children.push(Self::new());
        cell
    }

    pub fn run_action(&mut self, name: impl Into<String>) {
        self.actions.push(name.into());
    }

    /// Whether this cell or any descendant still has a running action.
    pub fn has_actions(&self) -> bool {
        !self.actions.is_empty() || self.children.iter().any(TestCell::has_actions)
    }
}

impl Default for TestCell {
    fn default() -> Self {
        Self::new()
    }
}

impl CellNode for TestCell {
    fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.alpha = alpha;
    }

    fn set_z_position(&mut self, z_position: f32) {
        self.z_position = z_position;
    }

    fn prepare_for_reuse(&mut self) {
        self.actions.clear();
        for child in &mut self.children {
            child.prepare_for_reuse();
        }
        self.reuse_count += 1;
    }

    fn on_attach(&mut self, component: usize) {
        self.attached_to = Some(component);
        self.attach_count += 1;
    }

    fn on_detach(&mut self) {
        self.attached_to = None;
    }
}
