//! Pick dispatch
//!
//! Mouse clicks and proxy-device triggers are translated into neutral
//! [`PickRequest`]s by two thin adapters and funnel into a single
//! [`PointSelector::select`] entry point.

use scattercube_core::{NodeHandle, PickRequest, PointId, Point2f, Ray, SceneHost, ToolId};
use tracing::{debug, trace, warn};

use crate::config::{MissPolicy, SceneConfig};
use crate::scene::Scene;

/// Mouse buttons the pointer channel distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

#[cfg(feature = "winit")]
impl From<winit::event::MouseButton> for PointerButton {
    fn from(button: winit::event::MouseButton) -> Self {
        use winit::event::MouseButton;
        match button {
            MouseButton::Left => PointerButton::Left,
            MouseButton::Right => PointerButton::Right,
            MouseButton::Middle => PointerButton::Middle,
            MouseButton::Back => PointerButton::Other(3),
            MouseButton::Forward => PointerButton::Other(4),
            MouseButton::Other(n) => PointerButton::Other(n),
        }
    }
}

/// Input delivered by the host's event loop
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Mouse button pressed with the cursor at normalized device coordinates
    PointerDown { button: PointerButton, cursor: Point2f },
    /// Proxy device trigger routed to `tool`
    ProxyTrigger { tool: ToolId, ray: Ray },
}

/// What a selection attempt did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// A data point is now highlighted
    Highlighted(PointId),
    /// The pick was invalid
    Miss,
    /// The pick hit geometry that is not a data point
    NonData(NodeHandle),
    /// Nothing hit and the selection was cleared
    Cleared,
    /// The event was not a selection gesture
    Ignored,
}

/// Pointer adapter: only the left button selects
pub fn pointer_request(button: PointerButton, cursor: Point2f) -> Option<PickRequest> {
    (button == PointerButton::Left).then_some(PickRequest::Cursor(cursor))
}

/// Proxy adapter: the device's pointing ray
pub fn proxy_request(ray: Ray) -> PickRequest {
    PickRequest::Ray(ray)
}

/// Routes input events to point highlighting
#[derive(Debug, Clone)]
pub struct PointSelector {
    tool: ToolId,
    priority: i32,
    miss_policy: MissPolicy,
    proxy_attached: bool,
}

impl PointSelector {
    /// Default tool id the selector registers under
    pub const DEFAULT_TOOL: ToolId = ToolId(1);

    pub fn new(config: &SceneConfig) -> Self {
        Self {
            tool: Self::DEFAULT_TOOL,
            priority: config.proxy_priority,
            miss_policy: config.miss_policy,
            proxy_attached: false,
        }
    }

    pub fn with_tool(mut self, tool: ToolId) -> Self {
        self.tool = tool;
        self
    }

    pub fn tool(&self) -> ToolId {
        self.tool
    }

    pub fn is_proxy_attached(&self) -> bool {
        self.proxy_attached
    }

    /// Register the selector on every proxy device of the host
    pub fn show<H: SceneHost + ?Sized>(&mut self, host: &mut H) {
        let mut devices = host.proxy_devices();
        for device in devices.iter_mut() {
            device.set_callback(self.tool, self.priority);
        }
        self.proxy_attached = true;
        debug!(devices = devices.len(), "proxy selection attached");
    }

    /// Clear every proxy device of the host
    pub fn hide<H: SceneHost + ?Sized>(&mut self, host: &mut H) {
        let mut devices = host.proxy_devices();
        for device in devices.iter_mut() {
            device.clear();
        }
        self.proxy_attached = false;
        debug!(devices = devices.len(), "proxy selection detached");
    }

    /// Translate an input event and run a selection if it is a selection gesture
    pub fn handle_event<H: SceneHost + ?Sized>(
        &self,
        scene: &mut Scene,
        host: &mut H,
        event: &InputEvent,
    ) -> SelectOutcome {
        let request = match *event {
            InputEvent::PointerDown { button, cursor } => pointer_request(button, cursor),
            InputEvent::ProxyTrigger { tool, ray } => {
                if !self.proxy_attached {
                    warn!("proxy trigger received while selection is hidden");
                    None
                } else if tool != self.tool {
                    trace!(?tool, "proxy trigger for another tool");
                    None
                } else {
                    Some(proxy_request(ray))
                }
            }
        };

        match request {
            Some(request) => self.select(scene, host, &request),
            None => SelectOutcome::Ignored,
        }
    }

    /// Pick along `request` and highlight the hit point, if any
    pub fn select<H: SceneHost + ?Sized>(
        &self,
        scene: &mut Scene,
        host: &mut H,
        request: &PickRequest,
    ) -> SelectOutcome {
        let result = host.pick(request);

        let outcome = match result.hit_object() {
            Some(object) => match scene.resolve(object) {
                Some(id) => match scene.highlight(host, id) {
                    Ok(()) => SelectOutcome::Highlighted(id),
                    Err(e) => {
                        warn!(error = %e, "failed to highlight resolved point");
                        SelectOutcome::Miss
                    }
                },
                None => SelectOutcome::NonData(object),
            },
            None => SelectOutcome::Miss,
        };

        match outcome {
            SelectOutcome::Miss | SelectOutcome::NonData(_)
                if self.miss_policy == MissPolicy::Clear =>
            {
                scene.reset_all(host);
                debug!("pick missed, selection cleared");
                SelectOutcome::Cleared
            }
            SelectOutcome::Highlighted(id) => {
                debug!(point = %id, "selected point");
                outcome
            }
            _ => {
                trace!(?outcome, "pick did not hit a data point");
                outcome
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_left_button_selects() {
        let cursor = Point2f::new(0.1, -0.2);
        assert_eq!(
            pointer_request(PointerButton::Left, cursor),
            Some(PickRequest::Cursor(cursor))
        );
        assert_eq!(pointer_request(PointerButton::Right, cursor), None);
        assert_eq!(pointer_request(PointerButton::Other(7), cursor), None);
    }

    #[test]
    fn test_selector_defaults_from_config() {
        let selector = PointSelector::new(&SceneConfig::default());
        assert_eq!(selector.tool(), PointSelector::DEFAULT_TOOL);
        assert!(!selector.is_proxy_attached());
    }
}
