//! Selection store: base and current colors of every point, plus the
//! single highlighted point.

use std::collections::HashMap;

use scattercube_core::{Category, Color, Error, NodeHandle, PointId, Point3f, Result, SceneHost};
use serde::Serialize;
use tracing::debug;

/// The renderable object representing one normalized point
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointPrimitive {
    id: PointId,
    handle: NodeHandle,
    position: Point3f,
    category: Category,
    base_color: Color,
    current_color: Color,
}

impl PointPrimitive {
    pub(crate) fn new(
        id: PointId,
        handle: NodeHandle,
        position: Point3f,
        category: Category,
        base_color: Color,
    ) -> Self {
        Self {
            id,
            handle,
            position,
            category,
            base_color,
            current_color: base_color,
        }
    }

    pub fn id(&self) -> PointId {
        self.id
    }

    pub fn handle(&self) -> NodeHandle {
        self.handle
    }

    pub fn position(&self) -> Point3f {
        self.position
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn base_color(&self) -> Color {
        self.base_color
    }

    pub fn current_color(&self) -> Color {
        self.current_color
    }

    pub fn is_highlighted(&self) -> bool {
        self.current_color != self.base_color
    }
}

/// Which point, if any, is highlighted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum SelectionState {
    #[default]
    Idle,
    Highlighted(PointId),
}

/// Owns the point primitives' colors and enforces the one-highlight rule
#[derive(Debug, Clone)]
pub struct SelectionStore {
    primitives: Vec<PointPrimitive>,
    lookup: HashMap<NodeHandle, PointId>,
    state: SelectionState,
    highlight_color: Color,
}

impl SelectionStore {
    /// Take ownership of the primitives; ids must equal their index
    pub(crate) fn new(primitives: Vec<PointPrimitive>, highlight_color: Color) -> Self {
        debug_assert!(primitives.iter().enumerate().all(|(i, p)| p.id.index() == i));
        let lookup = primitives.iter().map(|p| (p.handle, p.id)).collect();
        Self {
            primitives,
            lookup,
            state: SelectionState::Idle,
            highlight_color,
        }
    }

    pub fn primitives(&self) -> &[PointPrimitive] {
        &self.primitives
    }

    pub fn get(&self, id: PointId) -> Option<&PointPrimitive> {
        self.primitives.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    pub fn highlighted(&self) -> Option<PointId> {
        match self.state {
            SelectionState::Idle => None,
            SelectionState::Highlighted(id) => Some(id),
        }
    }

    pub fn highlight_color(&self) -> Color {
        self.highlight_color
    }

    /// The point registered under a host node, if it is one of ours
    pub fn resolve(&self, handle: NodeHandle) -> Option<PointId> {
        self.lookup.get(&handle).copied()
    }

    /// Highlight `id`, restoring the previously highlighted point first
    pub fn highlight<H: SceneHost + ?Sized>(&mut self, host: &mut H, id: PointId) -> Result<()> {
        if id.index() >= self.primitives.len() {
            return Err(Error::InvalidData(format!(
                "Point {} does not exist ({} points)",
                id,
                self.primitives.len()
            )));
        }

        if let SelectionState::Highlighted(previous) = self.state {
            if previous != id {
                self.restore(host, previous);
            }
        }

        let color = self.highlight_color;
        let primitive = &mut self.primitives[id.index()];
        primitive.current_color = color;
        host.set_color(primitive.handle, color);
        self.state = SelectionState::Highlighted(id);

        debug!(point = %id, category = %primitive.category, "highlighted point");
        Ok(())
    }

    /// Restore every point to its base color and clear the selection
    pub fn reset_all<H: SceneHost + ?Sized>(&mut self, host: &mut H) {
        for primitive in &mut self.primitives {
            primitive.current_color = primitive.base_color;
            host.set_color(primitive.handle, primitive.base_color);
        }
        self.state = SelectionState::Idle;
        debug!(points = self.primitives.len(), "reset selection");
    }

    fn restore<H: SceneHost + ?Sized>(&mut self, host: &mut H, id: PointId) {
        if let Some(primitive) = self.primitives.get_mut(id.index()) {
            primitive.current_color = primitive.base_color;
            host.set_color(primitive.handle, primitive.base_color);
        }
    }

    /// Drain the primitives for teardown
    pub(crate) fn into_primitives(self) -> Vec<PointPrimitive> {
        self.primitives
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::HeadlessHost;
    use scattercube_core::Shape;

    fn store_with(host: &mut HeadlessHost, colors: &[Color]) -> SelectionStore {
        let primitives = colors
            .iter()
            .enumerate()
            .map(|(i, &color)| {
                let handle = host.add_primitive(Shape::Sphere { radius: 0.02 });
                host.set_color(handle, color);
                PointPrimitive::new(PointId(i), handle, Point3f::origin(), Category(i), color)
            })
            .collect();
        SelectionStore::new(primitives, Color::YELLOW)
    }

    fn highlighted_count(store: &SelectionStore) -> usize {
        store.primitives().iter().filter(|p| p.is_highlighted()).count()
    }

    #[test]
    fn test_highlight_twice_is_idempotent() {
        let mut host = HeadlessHost::new();
        let mut store = store_with(&mut host, &[Color::RED, Color::GREEN, Color::BLUE]);

        store.highlight(&mut host, PointId(1)).unwrap();
        store.highlight(&mut host, PointId(1)).unwrap();

        assert_eq!(store.state(), SelectionState::Highlighted(PointId(1)));
        assert_eq!(highlighted_count(&store), 1);
        assert_eq!(store.get(PointId(1)).unwrap().current_color(), Color::YELLOW);
        assert_eq!(store.get(PointId(0)).unwrap().current_color(), Color::RED);
    }

    #[test]
    fn test_highlight_moves_between_points() {
        let mut host = HeadlessHost::new();
        let mut store = store_with(&mut host, &[Color::RED, Color::GREEN, Color::BLUE]);

        store.highlight(&mut host, PointId(0)).unwrap();
        store.highlight(&mut host, PointId(2)).unwrap();

        let first = store.get(PointId(0)).unwrap();
        assert_eq!(first.current_color(), Color::RED);
        assert_eq!(host.color(first.handle()), Some(Color::RED));

        let second = store.get(PointId(2)).unwrap();
        assert_eq!(host.color(second.handle()), Some(Color::YELLOW));
        assert_eq!(highlighted_count(&store), 1);
    }

    #[test]
    fn test_reset_all_restores_base_colors() {
        let mut host = HeadlessHost::new();
        let mut store = store_with(&mut host, &[Color::RED, Color::GREEN, Color::BLUE]);

        for id in [0, 2, 1, 2] {
            store.highlight(&mut host, PointId(id)).unwrap();
        }
        store.reset_all(&mut host);

        assert_eq!(store.state(), SelectionState::Idle);
        for p in store.primitives() {
            assert_eq!(p.current_color(), p.base_color());
            assert_eq!(host.color(p.handle()), Some(p.base_color()));
        }
    }

    #[test]
    fn test_unknown_point_is_rejected() {
        let mut host = HeadlessHost::new();
        let mut store = store_with(&mut host, &[Color::RED]);
        assert!(store.highlight(&mut host, PointId(5)).is_err());
        assert_eq!(store.state(), SelectionState::Idle);
    }

    #[test]
    fn test_resolve_only_registered_handles() {
        let mut host = HeadlessHost::new();
        let store = store_with(&mut host, &[Color::RED, Color::GREEN]);
        let stranger = host.add_primitive(Shape::Sphere { radius: 1.0 });

        let handle = store.get(PointId(1)).unwrap().handle();
        assert_eq!(store.resolve(handle), Some(PointId(1)));
        assert_eq!(store.resolve(stranger), None);
    }
}
