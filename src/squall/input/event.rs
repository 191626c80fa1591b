// Input event representation
//
// This is our internal representation of input. It is translated
// from the window system's events, and allows us to map codes to
// any input without modifying other subsystems.
//
// Austin Shafer - 2024
extern crate sdl2;

bitflags! {
    /// The active keyboard modifiers
    ///
    /// The bit layout matches SDL's keymod values so translation
    /// is a passthrough.
    pub struct Mods: u16 {
        const NONE = 0x0000;
        const LSHIFT = 0x0001;
        const RSHIFT = 0x0002;
        const LCTRL = 0x0040;
        const RCTRL = 0x0080;
        const LALT = 0x0100;
        const RALT = 0x0200;
        const LGUI = 0x0400;
        const RGUI = 0x0800;
        const NUM = 0x1000;
        const CAPS = 0x2000;
        const MODE = 0x4000;
        const RESERVED = 0x8000;
    }
}

pub fn convert_sdl_mods(keymods: sdl2::keyboard::Mod) -> Mods {
    Mods::from_bits(keymods.bits()).expect("Invalid mod bits")
}

/// Keycodes for mouse buttons.
///
/// Names are self explanitory, `LEFT` for left click and etc.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    UNKNOWN = 0,
    LEFT,
    MIDDLE,
    RIGHT,
    EXTRA,
    SIDE,
}

pub fn convert_sdl_mouse(button: sdl2::mouse::MouseButton) -> MouseButton {
    match button {
        sdl2::mouse::MouseButton::Left => MouseButton::LEFT,
        sdl2::mouse::MouseButton::Middle => MouseButton::MIDDLE,
        sdl2::mouse::MouseButton::Right => MouseButton::RIGHT,
        sdl2::mouse::MouseButton::X1 => MouseButton::SIDE,
        sdl2::mouse::MouseButton::X2 => MouseButton::EXTRA,
        _ => MouseButton::UNKNOWN,
    }
}

/// Pressing or releasing a button or key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonState {
    Pressed,
    Released,
}

pub enum InputEvent {
    pointer_move(PointerMove),
    pointer_button(PointerButton),
    keyboard(Keyboard),
}

/// Movement of the pointer, in output-local coordinates
pub struct PointerMove {
    pub pm_x: f32,
    pub pm_y: f32,
}

/// Pressing or unpressing a mouse button
pub struct PointerButton {
    pub pb_button: MouseButton,
    pub pb_state: ButtonState,
    pub pb_x: f32,
    pub pb_y: f32,
}

/// A raw keystroke
///
/// The code is the window system's scancode, passed through to
/// the seat untranslated.
pub struct Keyboard {
    pub k_code: u32,
    pub k_state: ButtonState,
    pub k_mods: Mods,
}
