//! Element hit-testing for resolving the diff under the pointer.

use std::collections::{HashMap, HashSet};

use super::{Rect, Side};

/// Opaque handle to a laid-out element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u64);

/// What an element is, as far as scrolling cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementRole {
    /// Root of a diff view.
    DiffRoot,
    /// One of the twin content panes.
    Pane(Side),
    /// Anything else (headings, rows, gutters).
    Other,
}

/// Read access to the element tree of the last painted frame.
pub trait HitTester {
    /// Topmost element containing the point.
    fn element_from_point(&self, x: f64, y: f64) -> Option<ElementId>;

    /// Parent of an element.
    fn parent_of(&self, element: ElementId) -> Option<ElementId>;

    /// Role of an element.
    fn role_of(&self, element: ElementId) -> Option<ElementRole>;
}

/// Nearest diff root at or above the topmost element under the point.
///
/// A parent chain that loops back on itself ends the walk with `None`.
pub fn closest_diff_root(hit: &dyn HitTester, x: f64, y: f64) -> Option<ElementId> {
    let mut seen = HashSet::new();
    let mut current = hit.element_from_point(x, y);
    while let Some(element) = current {
        if !seen.insert(element) {
            log::warn!("element {:?} is its own ancestor", element);
            return None;
        }
        if hit.role_of(element) == Some(ElementRole::DiffRoot) {
            return Some(element);
        }
        current = hit.parent_of(element);
    }
    None
}

/// First id handed out to elements without a caller-chosen id.
const ANONYMOUS_BASE: u64 = 1 << 48;

#[derive(Debug, Clone)]
struct SceneNode {
    id: ElementId,
    parent: Option<ElementId>,
    rect: Rect,
    role: ElementRole,
}

/// Element tree rebuilt on every paint, in paint order.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    nodes: Vec<SceneNode>,
    index: HashMap<ElementId, usize>,
    next_anonymous: u64,
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every element before repainting.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.index.clear();
        self.next_anonymous = 0;
    }

    /// Add an element with a caller-chosen id. Later elements paint on top.
    pub fn insert(
        &mut self,
        id: ElementId,
        parent: Option<ElementId>,
        rect: Rect,
        role: ElementRole,
    ) -> ElementId {
        self.index.insert(id, self.nodes.len());
        self.nodes.push(SceneNode {
            id,
            parent,
            rect,
            role,
        });
        id
    }

    /// Add an element with a fresh id.
    pub fn push(&mut self, parent: Option<ElementId>, rect: Rect, role: ElementRole) -> ElementId {
        let id = ElementId(ANONYMOUS_BASE + self.next_anonymous);
        self.next_anonymous += 1;
        self.insert(id, parent, rect, role)
    }

    /// Painted rectangle of an element.
    pub fn rect_of(&self, element: ElementId) -> Option<Rect> {
        self.index.get(&element).map(|&i| self.nodes[i].rect)
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether nothing was painted.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl HitTester for Scene {
    fn element_from_point(&self, x: f64, y: f64) -> Option<ElementId> {
        self.nodes
            .iter()
            .rev()
            .find(|n| n.rect.contains(x, y))
            .map(|n| n.id)
    }

    fn parent_of(&self, element: ElementId) -> Option<ElementId> {
        self.index
            .get(&element)
            .and_then(|&i| self.nodes[i].parent)
    }

    fn role_of(&self, element: ElementId) -> Option<ElementRole> {
        self.index.get(&element).map(|&i| self.nodes[i].role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene_with_diff() -> (Scene, ElementId) {
        let mut scene = Scene::new();
        scene.push(None, Rect::new(0.0, 0.0, 100.0, 100.0), ElementRole::Other);
        let root = scene.insert(
            ElementId(7),
            None,
            Rect::new(0.0, 10.0, 100.0, 20.0),
            ElementRole::DiffRoot,
        );
        let pane = scene.push(
            Some(root),
            Rect::new(0.0, 11.0, 50.0, 19.0),
            ElementRole::Pane(Side::Left),
        );
        scene.push(Some(pane), Rect::new(0.0, 12.0, 50.0, 1.0), ElementRole::Other);
        (scene, root)
    }

    #[test]
    fn walks_up_to_diff_root() {
        let (scene, root) = scene_with_diff();
        assert_eq!(closest_diff_root(&scene, 5.0, 12.5), Some(root));
        assert_eq!(closest_diff_root(&scene, 75.0, 20.0), Some(root));
    }

    #[test]
    fn point_outside_any_diff() {
        let (scene, _) = scene_with_diff();
        assert_eq!(closest_diff_root(&scene, 5.0, 50.0), None);
        assert_eq!(closest_diff_root(&scene, 500.0, 500.0), None);
    }

    #[test]
    fn topmost_element_wins() {
        let (scene, _) = scene_with_diff();
        let top = scene.element_from_point(5.0, 12.5).unwrap();
        assert_eq!(scene.role_of(top), Some(ElementRole::Other));
        assert!(scene.parent_of(top).is_some());
    }

    #[test]
    fn parent_cycle_ends_the_walk() {
        let mut scene = Scene::new();
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        scene.insert(ElementId(1), Some(ElementId(2)), rect, ElementRole::Other);
        scene.insert(ElementId(2), Some(ElementId(1)), rect, ElementRole::Other);
        assert_eq!(closest_diff_root(&scene, 5.0, 5.0), None);

        let mut scene = Scene::new();
        scene.insert(ElementId(3), Some(ElementId(3)), rect, ElementRole::Pane(Side::Left));
        assert_eq!(closest_diff_root(&scene, 5.0, 5.0), None);
    }

    #[test]
    fn clear_empties_scene() {
        let (mut scene, root) = scene_with_diff();
        scene.clear();
        assert!(scene.is_empty());
        assert_eq!(scene.rect_of(root), None);
    }
}
