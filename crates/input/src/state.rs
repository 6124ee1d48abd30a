use glam::Vec2;
use std::collections::BTreeSet;

/// Logical keys the viewer responds to.
///
/// Raw platform key events are mapped to these before they reach shared
/// state; anything without a mapping never enters the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Key {
    MoveForward,
    MoveBack,
    StrafeLeft,
    StrafeRight,
    Ascend,
    Descend,
    YawLeft,
    YawRight,
    PitchUp,
    PitchDown,
    LeaveScene,
}

impl Key {
    /// Map a key name (the browser-style `event.key` vocabulary) to a
    /// logical key. Unrecognized names are simply `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "w" => Self::MoveForward,
            "s" => Self::MoveBack,
            "a" => Self::StrafeLeft,
            "d" => Self::StrafeRight,
            "q" => Self::Ascend,
            "e" => Self::Descend,
            "ArrowLeft" => Self::YawLeft,
            "ArrowRight" => Self::YawRight,
            "ArrowUp" => Self::PitchUp,
            "ArrowDown" => Self::PitchDown,
            "Escape" => Self::LeaveScene,
            _ => return None,
        })
    }
}

/// Convert a pixel position to normalized device coordinates in [-1, 1],
/// with +Y up. Uses the viewport dimensions at event time, so a resize
/// mid-interaction rescales correctly.
pub fn ndc_from_pixels(px: Vec2, viewport: Vec2) -> Vec2 {
    let w = viewport.x.max(1.0);
    let h = viewport.y.max(1.0);
    Vec2::new((px.x / w) * 2.0 - 1.0, 1.0 - (px.y / h) * 2.0)
}

/// Current input snapshot: pressed keys, mouse position, drag state.
///
/// Mutated only by the event application methods below; read once per frame
/// by the camera controller and pick resolver.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    keys: BTreeSet<Key>,
    mouse_ndc: Vec2,
    mouse_px: Vec2,
    last_px: Vec2,
    button_down: bool,
    drag_delta: Vec2,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key transition.
    pub fn on_key(&mut self, key: Key, pressed: bool) {
        tracing::trace!(?key, pressed, "key");
        if pressed {
            self.keys.insert(key);
        } else {
            self.keys.remove(&key);
        }
    }

    pub fn is_pressed(&self, key: Key) -> bool {
        self.keys.contains(&key)
    }

    pub fn pressed_count(&self) -> usize {
        self.keys.len()
    }

    /// Record a pointer move. While the primary button is held, the pixel
    /// delta since the previous event accumulates into the pending drag.
    pub fn on_pointer_move(&mut self, px: Vec2, viewport: Vec2) {
        if self.button_down {
            self.drag_delta += px - self.last_px;
        }
        self.last_px = px;
        self.mouse_px = px;
        self.mouse_ndc = ndc_from_pixels(px, viewport);
    }

    /// Record a primary-button transition. Pressing re-anchors the drag so
    /// stale movement is not attributed to the new drag.
    pub fn on_button(&mut self, pressed: bool) {
        self.button_down = pressed;
        if pressed {
            self.last_px = self.mouse_px;
            self.drag_delta = Vec2::ZERO;
        }
    }

    /// Drain the accumulated drag delta. Called once per frame.
    pub fn take_drag_delta(&mut self) -> Vec2 {
        std::mem::take(&mut self.drag_delta)
    }

    pub fn mouse_ndc(&self) -> Vec2 {
        self.mouse_ndc
    }

    pub fn mouse_px(&self) -> Vec2 {
        self.mouse_px
    }

    pub fn button_down(&self) -> bool {
        self.button_down
    }
}
