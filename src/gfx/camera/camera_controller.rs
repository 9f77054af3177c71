use winit::{
    event::{DeviceEvent, ElementState, KeyEvent, MouseButton},
    keyboard::{KeyCode, PhysicalKey},
};

/// Polled state of the four directional movement keys.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct KeyState {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

impl KeyState {
    pub fn any(&self) -> bool {
        self.forward || self.backward || self.left || self.right
    }
}

/// The capability the camera reads its input from once per tick.
///
/// Implementations store the latest event state; nothing is queued. Mouse
/// movement accumulates between ticks and is drained by `take_mouse_delta`.
pub trait InputSource {
    fn key_state(&self) -> KeyState;

    /// Returns the mouse movement since the previous call and resets it.
    fn take_mouse_delta(&mut self) -> (f32, f32);
}

/// Turns winit keyboard, mouse button and raw mouse motion events into an
/// [`InputSource`].
///
/// Movement uses WASD or the arrow keys. Mouse look is active while a mouse
/// button is held or while the cursor is grabbed by the window.
pub struct CameraController {
    keys: KeyState,
    mouse_delta: (f32, f32),
    is_mouse_pressed: bool,
    is_cursor_grabbed: bool,
    pub invert_mouse_y: bool,
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new(false)
    }
}

impl CameraController {
    pub fn new(invert_mouse_y: bool) -> Self {
        Self {
            keys: KeyState::default(),
            mouse_delta: (0.0, 0.0),
            is_mouse_pressed: false,
            is_cursor_grabbed: false,
            invert_mouse_y,
        }
    }

    /// Routes a keyboard event; returns true if it was a movement key.
    pub fn process_keyboard(&mut self, event: &KeyEvent) -> bool {
        match event.physical_key {
            PhysicalKey::Code(code) => self.set_key(code, event.state == ElementState::Pressed),
            PhysicalKey::Unidentified(_) => false,
        }
    }

    /// Records the pressed state of `code`; returns true if it is a movement key.
    pub fn set_key(&mut self, code: KeyCode, pressed: bool) -> bool {
        let slot = match code {
            KeyCode::KeyW | KeyCode::ArrowUp => &mut self.keys.forward,
            KeyCode::KeyS | KeyCode::ArrowDown => &mut self.keys.backward,
            KeyCode::KeyA | KeyCode::ArrowLeft => &mut self.keys.left,
            KeyCode::KeyD | KeyCode::ArrowRight => &mut self.keys.right,
            _ => return false,
        };
        *slot = pressed;
        true
    }

    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        if matches!(button, MouseButton::Left | MouseButton::Right) {
            self.is_mouse_pressed = state == ElementState::Pressed;
        }
    }

    pub fn process_device_event(&mut self, event: &DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.add_mouse_motion(delta.0 as f32, delta.1 as f32);
        }
    }

    /// Accumulates raw mouse motion while mouse look is active.
    pub fn add_mouse_motion(&mut self, dx: f32, dy: f32) {
        if !self.is_looking() {
            return;
        }
        self.mouse_delta.0 += dx;
        self.mouse_delta.1 += dy;
    }

    pub fn set_cursor_grabbed(&mut self, grabbed: bool) {
        self.is_cursor_grabbed = grabbed;
    }

    pub fn is_cursor_grabbed(&self) -> bool {
        self.is_cursor_grabbed
    }

    pub fn is_looking(&self) -> bool {
        self.is_mouse_pressed || self.is_cursor_grabbed
    }

    /// Drops all held keys and pending motion, e.g. when the window loses focus.
    pub fn reset(&mut self) {
        self.keys = KeyState::default();
        self.mouse_delta = (0.0, 0.0);
        self.is_mouse_pressed = false;
    }
}

impl InputSource for CameraController {
    fn key_state(&self) -> KeyState {
        self.keys
    }

    fn take_mouse_delta(&mut self) -> (f32, f32) {
        let (dx, dy) = std::mem::take(&mut self.mouse_delta);
        if self.invert_mouse_y {
            (dx, -dy)
        } else {
            (dx, dy)
        }
    }
}
