//! # The input subsystem
//!
//! Translated events from the window system land here. This owns the
//! grab state machine: every pointer motion is interpreted according
//! to the current grab, either forwarded to the view under the cursor,
//! or consumed to move, resize, or drag a view.
//!
//! Grabs begin in one of two ways: a task queued by a demo client
//! (move/resize/drag requests answering a forwarded press), or
//! implicitly when a view is pressed with Alt or a GUI modifier held.
//! They end when the last mouse button is released.

// Austin Shafer - 2024
pub mod event;

use crate::squall::desktop::task::Task;
use crate::squall::desktop::view::{ResizeEdge, ViewId};
use crate::squall::desktop::{Desktop, SurfaceEvent};
use event::{ButtonState, InputEvent, Keyboard, Mods, MouseButton, PointerButton, PointerMove};
use utils::log;

/// The current input-interaction mode
///
/// While a grab is held, pointer motion is locked to the grabbed
/// view and ordinary event forwarding stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrabState {
    NoGrab,
    MoveGrab,
    ResizeGrab,
    DragGrab,
}

pub struct Input {
    i_grab: GrabState,
    /// the view the mouse is interacting with, if any
    ///
    /// Set on the first press over a view and held until every
    /// button is released.
    i_mouse_view: Option<ViewId>,
    /// mouse buttons currently held down
    i_buttons: Vec<MouseButton>,
    /// the active keyboard modifiers
    i_mods: Mods,
    /// last known cursor position
    i_cursor: (f32, f32),
    /// cursor position when the current interaction began
    i_initial_cursor: (f32, f32),
    /// cursor offset from the grabbed view's origin
    i_mouse_offset: (f32, f32),
    /// size of the view when the resize grab started
    i_initial_size: (f32, f32),
    i_resize_edge: ResizeEdge,
    i_resize_anchored: bool,
    /// the corner that must not move during an anchored resize
    i_resize_anchor: (f32, f32),
    /// the drag icon view, skipped by hit tests
    i_drag_icon: Option<ViewId>,
}

impl Input {
    pub fn new() -> Input {
        Input {
            i_grab: GrabState::NoGrab,
            i_mouse_view: None,
            i_buttons: Vec::new(),
            i_mods: Mods::NONE,
            i_cursor: (0.0, 0.0),
            i_initial_cursor: (0.0, 0.0),
            i_mouse_offset: (0.0, 0.0),
            i_initial_size: (0.0, 0.0),
            i_resize_edge: ResizeEdge::empty(),
            i_resize_anchored: false,
            i_resize_anchor: (0.0, 0.0),
            i_drag_icon: None,
        }
    }

    #[allow(dead_code)]
    pub fn grab_state(&self) -> GrabState {
        self.i_grab
    }

    #[allow(dead_code)]
    pub fn mouse_view(&self) -> Option<ViewId> {
        self.i_mouse_view
    }

    fn mouse_grabbed(&self) -> bool {
        self.i_grab != GrabState::NoGrab && self.i_mouse_view.is_some()
    }

    /// Find the topmost view containing the point
    ///
    /// This is a linear scan over the desktop's stacking order, the
    /// last view containing the point wins. The drag icon rides under
    /// the cursor and is never a hit-test target.
    pub fn view_at(&self, desktop: &Desktop, x: f32, y: f32) -> Option<ViewId> {
        let mut ret = None;
        for view in desktop.views() {
            if Some(view.v_id) == self.i_drag_icon {
                continue;
            }
            if view.contains(x, y) {
                ret = Some(view.v_id);
            }
        }
        return ret;
    }

    /// The desktop position of the corner a resize is anchored to
    ///
    /// Resizing by the top or left edge moves the view's origin, so
    /// the anchor is offset by the view size along those edges.
    pub fn anchor_position(pos: (f32, f32), edge: ResizeEdge, size: (f32, f32)) -> (f32, f32) {
        let mut x = pos.0;
        if edge.contains(ResizeEdge::LEFT) {
            x += size.0;
        }

        let mut y = pos.1;
        if edge.contains(ResizeEdge::TOP) {
            y += size.1;
        }

        (x, y)
    }

    /// Inverse of `anchor_position`: the origin that keeps the anchor
    /// fixed for a view of the given size
    pub fn anchored_position(anchor: (f32, f32), edge: ResizeEdge, size: (f32, f32)) -> (f32, f32) {
        let offset = Self::anchor_position((0.0, 0.0), edge, size);
        (anchor.0 - offset.0, anchor.1 - offset.1)
    }

    pub fn handle_input_event(&mut self, desktop: &mut Desktop, ev: &InputEvent) {
        match ev {
            InputEvent::pointer_move(m) => self.handle_pointer_move(desktop, m),
            InputEvent::pointer_button(b) => match b.pb_state {
                ButtonState::Pressed => self.handle_button_press(desktop, b),
                ButtonState::Released => self.handle_button_release(desktop, b),
            },
            InputEvent::keyboard(k) => self.handle_keyboard(desktop, k),
        }
    }

    /// Process one grab-start request from the desktop's queue
    pub fn handle_task(&mut self, desktop: &mut Desktop, task: Task) {
        log::debug!("input: handling task {:?}", task);
        match task {
            Task::start_move(id) => self.start_move(desktop, id),
            Task::start_resize { id, edge, anchored } => {
                self.start_resize(desktop, id, edge, anchored)
            }
            Task::start_drag { icon } => self.start_drag(desktop, icon),
        }
    }

    pub fn start_move(&mut self, desktop: &Desktop, id: ViewId) {
        let view = match desktop.get_view(id) {
            Some(v) => v,
            None => return,
        };

        self.i_mouse_view = Some(id);
        self.i_mouse_offset = (
            self.i_cursor.0 - view.v_pos.0,
            self.i_cursor.1 - view.v_pos.1,
        );
        self.i_grab = GrabState::MoveGrab;
    }

    pub fn start_resize(&mut self, desktop: &Desktop, id: ViewId, edge: ResizeEdge, anchored: bool) {
        let view = match desktop.get_view(id) {
            Some(v) => v,
            None => return,
        };

        self.i_mouse_view = Some(id);
        self.i_initial_cursor = self.i_cursor;
        self.i_initial_size = view.v_size;
        self.i_resize_edge = edge;
        self.i_resize_anchored = anchored;
        self.i_resize_anchor = Self::anchor_position(view.v_pos, edge, view.v_size);
        self.i_grab = GrabState::ResizeGrab;
    }

    pub fn start_drag(&mut self, desktop: &mut Desktop, icon: ViewId) {
        self.i_grab = GrabState::DragGrab;
        self.i_drag_icon = Some(icon);
        desktop.raise(icon);
    }

    fn handle_button_press(&mut self, desktop: &mut Desktop, ev: &PointerButton) {
        self.i_cursor = (ev.pb_x, ev.pb_y);
        if !self.i_buttons.contains(&ev.pb_button) {
            self.i_buttons.push(ev.pb_button);
        }

        // presses during a grab are swallowed
        if self.mouse_grabbed() {
            return;
        }

        if self.i_mouse_view.is_none() {
            let target = match self.view_at(desktop, ev.pb_x, ev.pb_y) {
                Some(t) => t,
                None => {
                    // a click on the background dismisses popups
                    desktop.close_popups();
                    return;
                }
            };
            self.i_mouse_view = Some(target);

            let vpos = desktop.get_view(target).unwrap().v_pos;
            if self
                .i_mods
                .intersects(Mods::LALT | Mods::RALT | Mods::LGUI | Mods::RGUI)
            {
                // move the view instead of delivering the click
                self.i_grab = GrabState::MoveGrab;
            } else {
                desktop.focus_on(Some(target));
            }
            self.i_initial_cursor = (ev.pb_x, ev.pb_y);
            self.i_mouse_offset = (ev.pb_x - vpos.0, ev.pb_y - vpos.1);

            // the view first learns where the pointer is, then that
            // it was pressed
            self.send_mouse_motion(desktop, Some(target), ev.pb_x, ev.pb_y);
        }
        self.send_mouse_button(desktop, self.i_mouse_view, ev);
    }

    fn handle_button_release(&mut self, desktop: &mut Desktop, ev: &PointerButton) {
        self.i_cursor = (ev.pb_x, ev.pb_y);
        self.i_buttons.retain(|b| *b != ev.pb_button);

        if !self.mouse_grabbed() {
            self.send_mouse_button(desktop, self.i_mouse_view, ev);
        }

        // The interaction ends when the last button comes up
        if self.i_buttons.is_empty() {
            if self.i_grab == GrabState::DragGrab {
                let target = self.view_at(desktop, ev.pb_x, ev.pb_y);
                desktop.handle_drag(target, ev.pb_x, ev.pb_y, true);
                self.i_drag_icon = None;
            }
            self.i_mouse_view = None;
            self.i_grab = GrabState::NoGrab;
        }
    }

    fn handle_pointer_move(&mut self, desktop: &mut Desktop, ev: &PointerMove) {
        let (x, y) = (ev.pm_x, ev.pm_y);
        self.i_cursor = (x, y);

        match self.i_grab {
            GrabState::NoGrab => {
                // While buttons are held the pressed view keeps
                // receiving motion, even if the cursor leaves it
                let view = self.i_mouse_view.or_else(|| self.view_at(desktop, x, y));
                self.send_mouse_motion(desktop, view, x, y);
            }
            GrabState::MoveGrab => {
                if let Some(id) = self.i_mouse_view {
                    desktop.set_view_pos(id, x - self.i_mouse_offset.0, y - self.i_mouse_offset.1);
                }
            }
            GrabState::ResizeGrab => {
                let id = match self.i_mouse_view {
                    Some(id) => id,
                    None => return,
                };
                let delta = (x - self.i_initial_cursor.0, y - self.i_initial_cursor.1);
                desktop.handle_resize(id, self.i_initial_size, delta, self.i_resize_edge);

                if self.i_resize_anchored {
                    let new_size = desktop.get_view(id).unwrap().v_size;
                    let pos =
                        Self::anchored_position(self.i_resize_anchor, self.i_resize_edge, new_size);
                    desktop.set_view_pos(id, pos.0, pos.1);
                }
            }
            GrabState::DragGrab => {
                let target = self.view_at(desktop, x, y);
                desktop.handle_drag(target, x, y, false);

                if let Some(icon) = self.i_drag_icon {
                    if let Some(offset) = desktop.get_view(icon).map(|v| v.v_offset) {
                        desktop.set_view_pos(icon, x + offset.0, y + offset.1);
                    }
                }
            }
        }
    }

    fn handle_keyboard(&mut self, desktop: &mut Desktop, ev: &Keyboard) {
        self.i_mods = ev.k_mods;
        desktop.send_key(ev.k_code, ev.k_state);
    }

    /// Forward motion to a view in surface-local coordinates
    ///
    /// A target of None clears the pointer focus, the cursor is over
    /// the background.
    fn send_mouse_motion(&self, desktop: &mut Desktop, target: Option<ViewId>, x: f32, y: f32) {
        let pos = target.and_then(|id| desktop.get_view(id)).map(|v| v.v_pos);
        match (target, pos) {
            (Some(id), Some(pos)) => desktop.handle_mouse_event(
                Some(id),
                SurfaceEvent::motion {
                    sm_x: x - pos.0,
                    sm_y: y - pos.1,
                },
            ),
            _ => desktop.handle_mouse_event(None, SurfaceEvent::motion { sm_x: x, sm_y: y }),
        }
    }

    /// Forward a button to a view in surface-local coordinates
    fn send_mouse_button(&self, desktop: &mut Desktop, target: Option<ViewId>, ev: &PointerButton) {
        let pos = target.and_then(|id| desktop.get_view(id)).map(|v| v.v_pos);
        match (target, pos) {
            (Some(id), Some(pos)) => desktop.handle_mouse_event(
                Some(id),
                SurfaceEvent::button {
                    sb_button: ev.pb_button,
                    sb_state: ev.pb_state,
                    sb_x: ev.pb_x - pos.0,
                    sb_y: ev.pb_y - pos.1,
                },
            ),
            _ => desktop.handle_mouse_event(
                None,
                SurfaceEvent::button {
                    sb_button: ev.pb_button,
                    sb_state: ev.pb_state,
                    sb_x: ev.pb_x,
                    sb_y: ev.pb_y,
                },
            ),
        }
    }
}
