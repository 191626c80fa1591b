// The seat: a collection of input foci
//
// This does not represent a physical seat made of real input
// devices, but rather the sink that input events are delivered
// to once the input subsystem has decided which view they
// belong to. Since our demo views have no wire to receive
// events on, delivery is structured logging plus focus
// bookkeeping.
//
// Austin Shafer - 2024
use super::view::ViewId;
use crate::squall::input::event::{ButtonState, MouseButton};
use utils::log;

pub struct Seat {
    /// the serial number for this set of input events
    s_serial: u32,
    /// the view keystrokes are delivered to
    s_kbd_focus: Option<ViewId>,
    /// the view pointer events are delivered to
    s_pointer_focus: Option<ViewId>,
}

impl Seat {
    pub fn new() -> Seat {
        Seat {
            s_serial: 0,
            s_kbd_focus: None,
            s_pointer_focus: None,
        }
    }

    fn next_serial(&mut self) -> u32 {
        self.s_serial += 1;
        self.s_serial
    }

    pub fn keyboard_focus(&self) -> Option<ViewId> {
        self.s_kbd_focus
    }

    pub fn pointer_focus(&self) -> Option<ViewId> {
        self.s_pointer_focus
    }

    /// Move keyboard focus to this view
    ///
    /// The leave event must be delivered before the enter event.
    pub fn keyboard_enter(&mut self, id: ViewId) {
        if self.s_kbd_focus == Some(id) {
            return;
        }
        self.keyboard_leave();

        let serial = self.next_serial();
        log::debug!("seat: keyboard enter view {} (serial {})", id, serial);
        self.s_kbd_focus = Some(id);
    }

    pub fn keyboard_leave(&mut self) {
        if let Some(prev) = self.s_kbd_focus.take() {
            let serial = self.next_serial();
            log::debug!("seat: keyboard leave view {} (serial {})", prev, serial);
        }
    }

    /// Deliver a key to the keyboard focus
    ///
    /// `code` is the raw scancode from the window system, passed
    /// through untranslated.
    pub fn send_key(&mut self, code: u32, state: ButtonState) {
        match self.s_kbd_focus {
            Some(id) => {
                let serial = self.next_serial();
                log::debug!(
                    "seat: key {} {:?} -> view {} (serial {})",
                    code,
                    state,
                    id,
                    serial
                );
            }
            None => log::debug!("seat: key {} dropped, no keyboard focus", code),
        }
    }

    /// Move pointer focus to this view
    pub fn pointer_enter(&mut self, id: ViewId, x: f32, y: f32) {
        if self.s_pointer_focus == Some(id) {
            return;
        }
        self.clear_pointer_focus();

        let serial = self.next_serial();
        log::debug!(
            "seat: pointer enter view {} at ({}, {}) (serial {})",
            id,
            x,
            y,
            serial
        );
        self.s_pointer_focus = Some(id);
    }

    pub fn clear_pointer_focus(&mut self) {
        if let Some(prev) = self.s_pointer_focus.take() {
            let serial = self.next_serial();
            log::debug!("seat: pointer leave view {} (serial {})", prev, serial);
        }
    }

    /// Deliver a button to the pointer focus
    pub fn send_button(&mut self, button: MouseButton, state: ButtonState) {
        if let Some(id) = self.s_pointer_focus {
            let serial = self.next_serial();
            log::debug!(
                "seat: button {:?} {:?} -> view {} (serial {})",
                button,
                state,
                id,
                serial
            );
        }
    }

    /// Deliver surface-local motion to the pointer focus
    pub fn send_motion(&mut self, x: f32, y: f32) {
        if let Some(id) = self.s_pointer_focus {
            log::info!("seat: motion ({}, {}) -> view {}", x, y, id);
        }
    }
}
