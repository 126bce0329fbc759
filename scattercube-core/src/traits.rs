//! Capability traits implemented by a host renderer

use crate::color::Color;
use crate::legend::Legend;
use crate::point::{Point2f, Point3f, Ray, Vector3f};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque handle to a node owned by the host renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeHandle(pub u64);

impl fmt::Display for NodeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node:{}", self.0)
    }
}

/// Identifier of a tool registered on a proxy device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ToolId(pub u32);

/// Principal axis a cylinder is aligned with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisDirection {
    X,
    Y,
    Z,
}

impl AxisDirection {
    pub const ALL: [AxisDirection; 3] = [AxisDirection::X, AxisDirection::Y, AxisDirection::Z];

    pub fn index(self) -> usize {
        match self {
            AxisDirection::X => 0,
            AxisDirection::Y => 1,
            AxisDirection::Z => 2,
        }
    }

    pub fn unit(self) -> Vector3f {
        let mut v = Vector3f::zeros();
        v[self.index()] = 1.0;
        v
    }
}

/// Primitive shapes the host can instantiate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Box { size: Vector3f },
    Cylinder { height: f32, radius: f32, axis: AxisDirection },
    Sphere { radius: f32 },
}

/// Neutral pick request produced by an input adapter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PickRequest {
    /// Cursor position in normalized device coordinates (`[-1, 1]` on both axes)
    Cursor(Point2f),
    /// World-space ray, e.g. from a tracked wand
    Ray(Ray),
}

/// Result of a pick query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickResult {
    pub valid: bool,
    pub object: Option<NodeHandle>,
}

impl PickResult {
    pub fn hit(object: NodeHandle) -> Self {
        Self {
            valid: true,
            object: Some(object),
        }
    }

    pub fn miss() -> Self {
        Self {
            valid: false,
            object: None,
        }
    }

    /// The hit object, only when the query is valid
    pub fn hit_object(&self) -> Option<NodeHandle> {
        if self.valid {
            self.object
        } else {
            None
        }
    }
}

/// Secondary spatial input device exposing tool-keyed callback registration
pub trait ProxyDevice {
    /// Route this device's trigger to `tool` with the given priority
    fn set_callback(&mut self, tool: ToolId, priority: i32);

    /// Drop every registered callback
    fn clear(&mut self);
}

/// Scene-graph operations the scatter plot needs from a renderer
pub trait SceneHost {
    /// Create an empty transform group
    fn add_group(&mut self) -> NodeHandle;

    /// Create a primitive shape
    fn add_primitive(&mut self, shape: Shape) -> NodeHandle;

    fn set_position(&mut self, node: NodeHandle, position: Point3f);

    fn set_scale(&mut self, node: NodeHandle, scale: f32);

    fn set_color(&mut self, node: NodeHandle, color: Color);

    fn color(&self, node: NodeHandle) -> Option<Color>;

    fn set_alpha(&mut self, node: NodeHandle, alpha: f32);

    fn set_parent(&mut self, node: NodeHandle, parent: NodeHandle);

    /// Include or exclude a node from pick queries
    fn set_pickable(&mut self, node: NodeHandle, pickable: bool);

    /// Destroy a node
    fn remove(&mut self, node: NodeHandle);

    /// Resolve a cursor or ray to the frontmost pickable node
    fn pick(&self, request: &PickRequest) -> PickResult;

    /// Display a static legend panel
    fn show_legend(&mut self, _legend: &Legend) {}

    /// Proxy devices currently connected to the host
    fn proxy_devices(&mut self) -> Vec<&mut dyn ProxyDevice> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_pick_has_no_hit_object() {
        let result = PickResult {
            valid: false,
            object: Some(NodeHandle(3)),
        };
        assert_eq!(result.hit_object(), None);
        assert_eq!(PickResult::hit(NodeHandle(3)).hit_object(), Some(NodeHandle(3)));
    }

    #[test]
    fn test_axis_unit_vectors() {
        assert_eq!(AxisDirection::Y.unit(), Vector3f::new(0.0, 1.0, 0.0));
        assert_eq!(AxisDirection::ALL[2].index(), 2);
    }
}
