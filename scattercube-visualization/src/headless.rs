//! In-memory scene host
//!
//! `HeadlessHost` implements the renderer capability traits without a GPU:
//! it keeps a node table, resolves pick queries by ray casting against the
//! primitives' bounds in world space, and records legend and proxy-device
//! registrations. It backs the demo binary and the test suite.

use std::collections::BTreeMap;

use scattercube_algorithms::{ray_aabb, ray_sphere, Aabb};
use scattercube_core::{
    Color, Legend, NodeHandle, PickRequest, PickResult, Point3f, ProxyDevice, Ray, SceneHost,
    Shape, ToolId, Transform3D, Vector3f,
};
use tracing::{trace, warn};

use crate::camera::Camera;
use crate::picker::InputEvent;

/// Parent chains deeper than this are treated as cycles
const MAX_DEPTH: usize = 64;

/// What a node is
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeKind {
    Group,
    Primitive(Shape),
}

/// A node in the headless scene graph
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessNode {
    pub kind: NodeKind,
    pub position: Point3f,
    pub scale: f32,
    pub color: Color,
    pub alpha: f32,
    pub parent: Option<NodeHandle>,
    pub pickable: bool,
}

impl HeadlessNode {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            position: Point3f::origin(),
            scale: 1.0,
            color: Color::WHITE,
            alpha: 1.0,
            parent: None,
            pickable: true,
        }
    }

    fn local_transform(&self) -> Transform3D {
        Transform3D::from_translation_scale(self.position.coords, self.scale)
    }
}

/// A tracked wand that forwards its trigger to the highest-priority tool
#[derive(Debug, Clone, Default)]
pub struct HeadlessProxy {
    pub name: String,
    callbacks: Vec<(ToolId, i32)>,
}

impl HeadlessProxy {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            callbacks: Vec::new(),
        }
    }

    /// Tool that currently receives the trigger
    pub fn active_tool(&self) -> Option<ToolId> {
        self.callbacks
            .iter()
            .max_by_key(|(_, priority)| *priority)
            .map(|(tool, _)| *tool)
    }

    pub fn is_registered(&self, tool: ToolId) -> bool {
        self.callbacks.iter().any(|(t, _)| *t == tool)
    }

    /// Press the trigger while pointing along `ray`.
    /// Yields nothing when no tool is registered.
    pub fn trigger(&self, ray: Ray) -> Option<InputEvent> {
        self.active_tool()
            .map(|tool| InputEvent::ProxyTrigger { tool, ray })
    }
}

impl ProxyDevice for HeadlessProxy {
    fn set_callback(&mut self, tool: ToolId, priority: i32) {
        self.callbacks.retain(|(t, _)| *t != tool);
        self.callbacks.push((tool, priority));
    }

    fn clear(&mut self) {
        self.callbacks.clear();
    }
}

/// Renderer stand-in holding the scene graph in memory
#[derive(Debug, Clone, Default)]
pub struct HeadlessHost {
    nodes: BTreeMap<NodeHandle, HeadlessNode>,
    next_handle: u64,
    camera: Camera,
    legend: Option<Legend>,
    proxies: Vec<HeadlessProxy>,
}

impl HeadlessHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_camera(camera: Camera) -> Self {
        Self {
            camera,
            ..Self::default()
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Connect a proxy device; returns its index
    pub fn add_proxy(&mut self, name: impl Into<String>) -> usize {
        self.proxies.push(HeadlessProxy::new(name));
        self.proxies.len() - 1
    }

    pub fn proxy(&self, index: usize) -> Option<&HeadlessProxy> {
        self.proxies.get(index)
    }

    pub fn proxies(&self) -> &[HeadlessProxy] {
        &self.proxies
    }

    pub fn node(&self, node: NodeHandle) -> Option<&HeadlessNode> {
        self.nodes.get(&node)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn legend(&self) -> Option<&Legend> {
        self.legend.as_ref()
    }

    /// Direct children of `parent`
    pub fn children(&self, parent: NodeHandle) -> Vec<NodeHandle> {
        self.nodes
            .iter()
            .filter(|(_, n)| n.parent == Some(parent))
            .map(|(&h, _)| h)
            .collect()
    }

    /// Local-to-world transform of a node, following its parent chain
    pub fn world_transform(&self, node: NodeHandle) -> Option<Transform3D> {
        let mut chain = Vec::new();
        let mut current = Some(node);
        while let Some(handle) = current {
            if chain.len() >= MAX_DEPTH {
                warn!(%node, "parent chain too deep, treating as detached");
                return None;
            }
            let n = self.nodes.get(&handle)?;
            chain.push(n.local_transform());
            current = n.parent;
        }
        Some(
            chain
                .into_iter()
                .rev()
                .fold(Transform3D::identity(), |acc, local| acc * local),
        )
    }

    /// World-space position of a node's origin
    pub fn world_position(&self, node: NodeHandle) -> Option<Point3f> {
        self.world_transform(node)
            .map(|t| t.transform_point(&Point3f::origin()))
    }

    /// Distance along `ray` to a primitive, if hit
    fn intersect(&self, handle: NodeHandle, node: &HeadlessNode, ray: &Ray) -> Option<f32> {
        let NodeKind::Primitive(shape) = node.kind else {
            return None;
        };
        let world = self.world_transform(handle)?;
        let center = world.transform_point(&Point3f::origin());
        let scale = world.scale_factor();

        match shape {
            Shape::Sphere { radius } => ray_sphere(ray, &center, radius * scale),
            Shape::Box { size } => ray_aabb(ray, &Aabb::from_center(center, size * (0.5 * scale))),
            Shape::Cylinder { height, radius, axis } => {
                let mut half = Vector3f::repeat(radius);
                half[axis.index()] = height / 2.0;
                ray_aabb(ray, &Aabb::from_center(center, half * scale))
            }
        }
    }

    fn request_ray(&self, request: &PickRequest) -> Option<Ray> {
        match request {
            PickRequest::Cursor(cursor) => self.camera.ray_from_cursor(cursor),
            PickRequest::Ray(ray) => Some(*ray),
        }
    }

    fn with_node(&mut self, node: NodeHandle, f: impl FnOnce(&mut HeadlessNode)) {
        match self.nodes.get_mut(&node) {
            Some(n) => f(n),
            None => trace!(%node, "ignoring update for unknown node"),
        }
    }
}

impl SceneHost for HeadlessHost {
    fn add_group(&mut self) -> NodeHandle {
        self.next_handle += 1;
        let handle = NodeHandle(self.next_handle);
        self.nodes.insert(handle, HeadlessNode::new(NodeKind::Group));
        handle
    }

    fn add_primitive(&mut self, shape: Shape) -> NodeHandle {
        self.next_handle += 1;
        let handle = NodeHandle(self.next_handle);
        self.nodes.insert(handle, HeadlessNode::new(NodeKind::Primitive(shape)));
        handle
    }

    fn set_position(&mut self, node: NodeHandle, position: Point3f) {
        self.with_node(node, |n| n.position = position);
    }

    fn set_scale(&mut self, node: NodeHandle, scale: f32) {
        self.with_node(node, |n| n.scale = scale);
    }

    fn set_color(&mut self, node: NodeHandle, color: Color) {
        self.with_node(node, |n| n.color = color);
    }

    fn color(&self, node: NodeHandle) -> Option<Color> {
        self.nodes.get(&node).map(|n| n.color)
    }

    fn set_alpha(&mut self, node: NodeHandle, alpha: f32) {
        self.with_node(node, |n| n.alpha = alpha);
    }

    fn set_parent(&mut self, node: NodeHandle, parent: NodeHandle) {
        if node == parent || !self.nodes.contains_key(&parent) {
            warn!(%node, %parent, "rejecting invalid parent");
            return;
        }
        self.with_node(node, |n| n.parent = Some(parent));
    }

    fn set_pickable(&mut self, node: NodeHandle, pickable: bool) {
        self.with_node(node, |n| n.pickable = pickable);
    }

    fn remove(&mut self, node: NodeHandle) {
        let mut pending = vec![node];
        while let Some(handle) = pending.pop() {
            if self.nodes.remove(&handle).is_some() {
                pending.extend(self.children(handle));
            }
        }
    }

    fn pick(&self, request: &PickRequest) -> PickResult {
        let Some(ray) = self.request_ray(request) else {
            return PickResult::miss();
        };

        self.nodes
            .iter()
            .filter(|(_, n)| n.pickable)
            .filter_map(|(&h, n)| self.intersect(h, n, &ray).map(|t| (h, t)))
            .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map_or_else(PickResult::miss, |(h, _)| PickResult::hit(h))
    }

    fn show_legend(&mut self, legend: &Legend) {
        self.legend = Some(legend.clone());
    }

    fn proxy_devices(&mut self) -> Vec<&mut dyn ProxyDevice> {
        self.proxies
            .iter_mut()
            .map(|p| p as &mut dyn ProxyDevice)
            .collect()
    }
}
