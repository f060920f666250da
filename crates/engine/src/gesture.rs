//! Drag lifecycle: pointer events in, committed transfers out.

use std::mem;

use shared::domain::{AtomId, Point};
use tracing::debug;

use crate::{session::Session, transfer::TargetResolution};

pub const LOGICAL_WIDTH: f64 = 800.0;
pub const LOGICAL_HEIGHT: f64 = 500.0;

/// Device surface size. Maps device pixels onto the logical space with
/// uniform scaling, centred on the long axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub const LOGICAL: Viewport = Viewport {
        width: LOGICAL_WIDTH,
        height: LOGICAL_HEIGHT,
    };

    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn to_logical(&self, device: Point) -> Point {
        let scale = (self.width / LOGICAL_WIDTH).min(self.height / LOGICAL_HEIGHT);
        if !scale.is_finite() || scale <= 0.0 {
            return device;
        }
        let offset_x = (self.width - LOGICAL_WIDTH * scale) / 2.0;
        let offset_y = (self.height - LOGICAL_HEIGHT * scale) / 2.0;
        Point::new((device.x - offset_x) / scale, (device.y - offset_y) / scale)
    }

    /// Inverse of [`Viewport::to_logical`].
    pub fn to_device(&self, logical: Point) -> Point {
        let scale = (self.width / LOGICAL_WIDTH).min(self.height / LOGICAL_HEIGHT);
        if !scale.is_finite() || scale <= 0.0 {
            return logical;
        }
        let offset_x = (self.width - LOGICAL_WIDTH * scale) / 2.0;
        let offset_y = (self.height - LOGICAL_HEIGHT * scale) / 2.0;
        Point::new(logical.x * scale + offset_x, logical.y * scale + offset_y)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::LOGICAL
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerDevice {
    Mouse,
    Touch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    /// Pointer left the interaction surface.
    Leave,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    pub device: PointerDevice,
    /// Device-space position.
    pub position: Point,
}

impl PointerEvent {
    pub fn mouse(phase: PointerPhase, x: f64, y: f64) -> Self {
        Self {
            phase,
            device: PointerDevice::Mouse,
            position: Point::new(x, y),
        }
    }

    pub fn touch(phase: PointerPhase, x: f64, y: f64) -> Self {
        Self {
            phase,
            device: PointerDevice::Touch,
            position: Point::new(x, y),
        }
    }
}

/// Host-side move/release listener registration. Held only while dragging;
/// every `acquire` is followed by exactly one `release`.
pub trait PointerCapture {
    fn acquire(&mut self);
    fn release(&mut self);
}

/// For hosts that deliver every pointer event regardless of capture.
#[derive(Debug, Default)]
pub struct NoCapture;

impl PointerCapture for NoCapture {
    fn acquire(&mut self) {}
    fn release(&mut self) {}
}

#[derive(Debug, Clone, PartialEq)]
pub enum GestureState {
    Idle,
    Dragging { source: AtomId, current: Point },
}

#[derive(Debug, Clone, PartialEq)]
pub enum GestureOutcome {
    Ignored,
    DragStarted {
        source: AtomId,
    },
    DragMoved {
        point: Point,
    },
    Transferred {
        from: AtomId,
        to: AtomId,
        completed: bool,
    },
    /// Drag ended without landing on an open target.
    Abandoned {
        source: AtomId,
    },
}

pub struct GestureController<C: PointerCapture> {
    capture: C,
    viewport: Viewport,
    state: GestureState,
}

impl<C: PointerCapture> GestureController<C> {
    pub fn new(capture: C) -> Self {
        Self {
            capture,
            viewport: Viewport::default(),
            state: GestureState::Idle,
        }
    }

    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn state(&self) -> &GestureState {
        &self.state
    }

    pub fn capture(&self) -> &C {
        &self.capture
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, GestureState::Dragging { .. })
    }

    /// Logical position of the electron being dragged, if any.
    pub fn ghost(&self) -> Option<Point> {
        match &self.state {
            GestureState::Dragging { current, .. } => Some(*current),
            GestureState::Idle => None,
        }
    }

    pub fn handle(&mut self, session: &mut Session, event: PointerEvent) -> GestureOutcome {
        let point = self.viewport.to_logical(event.position);
        match event.phase {
            PointerPhase::Down => self.pointer_down(session, point),
            PointerPhase::Move => self.pointer_move(point),
            PointerPhase::Up => {
                // touch-end carries no coordinates; keep the last move
                if event.device == PointerDevice::Mouse {
                    self.pointer_move(point);
                }
                self.pointer_up(session)
            }
            PointerPhase::Leave | PointerPhase::Cancel => self.pointer_up(session),
        }
    }

    /// Drops the active drag without resolving it, e.g. on scenario change.
    pub fn cancel(&mut self) -> GestureOutcome {
        match mem::replace(&mut self.state, GestureState::Idle) {
            GestureState::Idle => GestureOutcome::Ignored,
            GestureState::Dragging { source, .. } => {
                self.capture.release();
                debug!(%source, "drag cancelled");
                GestureOutcome::Abandoned { source }
            }
        }
    }

    fn pointer_down(&mut self, session: &Session, point: Point) -> GestureOutcome {
        if self.is_dragging() {
            return GestureOutcome::Ignored;
        }
        let Some(source) = session.engine().drag_source_at(session.state(), point) else {
            return GestureOutcome::Ignored;
        };

        self.capture.acquire();
        debug!(%source, x = point.x, y = point.y, "drag started");
        self.state = GestureState::Dragging {
            source: source.clone(),
            current: point,
        };
        GestureOutcome::DragStarted { source }
    }

    fn pointer_move(&mut self, point: Point) -> GestureOutcome {
        match &mut self.state {
            GestureState::Idle => GestureOutcome::Ignored,
            GestureState::Dragging { current, .. } => {
                *current = point;
                GestureOutcome::DragMoved { point }
            }
        }
    }

    fn pointer_up(&mut self, session: &mut Session) -> GestureOutcome {
        let GestureState::Dragging { source, current } =
            mem::replace(&mut self.state, GestureState::Idle)
        else {
            return GestureOutcome::Ignored;
        };
        self.capture.release();

        let target = match session.engine().resolve_drop(session.state(), &source, current) {
            TargetResolution::Matched(target) => target,
            TargetResolution::NoMatch => {
                debug!(%source, x = current.x, y = current.y, "drop missed");
                return GestureOutcome::Abandoned { source };
            }
        };

        match session.commit(&source, &target) {
            Ok(state) => GestureOutcome::Transferred {
                completed: state.is_complete,
                from: source,
                to: target,
            },
            Err(err) => {
                debug!(error = %err, "drop not committed");
                GestureOutcome::Abandoned { source }
            }
        }
    }
}

impl<C: PointerCapture> Drop for GestureController<C> {
    fn drop(&mut self) {
        if self.is_dragging() {
            self.capture.release();
        }
    }
}

#[cfg(test)]
#[path = "tests/gesture_tests.rs"]
mod tests;
