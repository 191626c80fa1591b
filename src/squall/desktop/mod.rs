//! # The desktop database
//!
//! The desktop is the shared state the other subsystems communicate
//! through. It owns every view in stacking order, the seat that input
//! events are delivered to, and a queue of work orders for the input
//! subsystem. `input` updates it in response to the user, and `swcomp`
//! reads it back out to composite the next frame.
//!
//! The demo-client reaction lives here too: when a forwarded press
//! lands on a view's titlebar or resize band, the "client" answers by
//! queueing the matching grab-start task, the same round trip a real
//! client would make over the wire.

// Austin Shafer - 2024
pub mod seat;
pub mod task;
pub mod view;

use crate::squall::input::event::{ButtonState, MouseButton};
use seat::Seat;
use task::Task;
use utils::{log, partial_max};
use view::{Color, ResizeEdge, Role, View, ViewId};

use std::collections::VecDeque;

/// Fill colors handed to demo views in creation order
const PALETTE: [Color; 5] = [
    Color { r: 0.63, g: 0.76, b: 0.85, a: 1.0 },
    Color { r: 0.85, g: 0.69, b: 0.54, a: 1.0 },
    Color { r: 0.68, g: 0.82, b: 0.62, a: 1.0 },
    Color { r: 0.84, g: 0.63, b: 0.74, a: 1.0 },
    Color { r: 0.77, g: 0.75, b: 0.58, a: 1.0 },
];

const POPUP_SIZE: (f32, f32) = (96.0, 64.0);
const POPUP_COLOR: Color = Color { r: 0.93, g: 0.93, b: 0.82, a: 1.0 };

const DRAG_ICON_SIZE: (f32, f32) = (24.0, 24.0);
const DRAG_ICON_COLOR: Color = Color { r: 0.35, g: 0.35, b: 0.4, a: 1.0 };
/// Keeps the icon from sitting exactly under the hotspot
const DRAG_ICON_OFFSET: (f32, f32) = (-12.0, -12.0);

/// A pointer event delivered to a view
///
/// The position is in surface-local coordinates, already mapped
/// by the input subsystem.
#[derive(Debug, Clone, Copy)]
pub enum SurfaceEvent {
    button {
        sb_button: MouseButton,
        sb_state: ButtonState,
        sb_x: f32,
        sb_y: f32,
    },
    motion {
        sm_x: f32,
        sm_y: f32,
    },
}

pub struct Desktop {
    d_resolution: (u32, u32),
    /// All views, bottom to top in stacking order
    d_views: Vec<View>,
    d_seat: Seat,
    /// Work orders for the input subsystem
    d_tasks: VecDeque<Task>,
    /// the next view id to mint
    d_next_id: ViewId,
    d_changed: bool,
}

impl Desktop {
    pub fn new(resolution: (u32, u32)) -> Desktop {
        Desktop {
            d_resolution: resolution,
            d_views: Vec::new(),
            d_seat: Seat::new(),
            d_tasks: VecDeque::new(),
            d_next_id: 0,
            d_changed: false,
        }
    }

    /// Has the desktop been updated since the last frame
    ///
    /// swcomp uses this to know if it should recomposite
    pub fn is_changed(&self) -> bool {
        self.d_changed
    }
    pub fn clear_changed(&mut self) {
        self.d_changed = false;
    }
    pub fn mark_changed(&mut self) {
        self.d_changed = true;
    }

    #[allow(dead_code)]
    pub fn resolution(&self) -> (u32, u32) {
        self.d_resolution
    }
    pub fn set_resolution(&mut self, resolution: (u32, u32)) {
        self.d_resolution = resolution;
        self.mark_changed();
    }

    #[allow(dead_code)]
    pub fn seat(&self) -> &Seat {
        &self.d_seat
    }

    /// Deliver a key to the keyboard focus
    pub fn send_key(&mut self, code: u32, state: ButtonState) {
        self.d_seat.send_key(code, state);
    }

    fn mint_view_id(&mut self) -> ViewId {
        let id = self.d_next_id;
        self.d_next_id += 1;
        return id;
    }

    /// Place a new application window on the desktop
    ///
    /// The new view is raised and takes keyboard focus.
    pub fn spawn_toplevel(&mut self, pos: (f32, f32), size: (f32, f32)) -> ViewId {
        let id = self.mint_view_id();
        let color = PALETTE[id as usize % PALETTE.len()];
        log::debug!("spawning toplevel {} at {:?} size {:?}", id, pos, size);

        self.d_views
            .push(View::new(id, Role::toplevel, pos, size, color));
        self.focus_on(Some(id));
        self.mark_changed();
        return id;
    }

    fn spawn_popup(&mut self, pos: (f32, f32)) -> ViewId {
        let id = self.mint_view_id();
        log::debug!("spawning popup {} at {:?}", id, pos);

        self.d_views
            .push(View::new(id, Role::popup, pos, POPUP_SIZE, POPUP_COLOR));
        self.mark_changed();
        return id;
    }

    fn spawn_drag_icon(&mut self, pos: (f32, f32)) -> ViewId {
        let id = self.mint_view_id();
        let mut view = View::new(
            id,
            Role::drag_icon,
            (pos.0 + DRAG_ICON_OFFSET.0, pos.1 + DRAG_ICON_OFFSET.1),
            DRAG_ICON_SIZE,
            DRAG_ICON_COLOR,
        );
        view.v_offset = DRAG_ICON_OFFSET;

        self.d_views.push(view);
        self.mark_changed();
        return id;
    }

    /// Iterate the views from the bottom of the stack to the top
    pub fn views(&self) -> impl Iterator<Item = &View> {
        self.d_views.iter()
    }

    pub fn get_view(&self, id: ViewId) -> Option<&View> {
        self.d_views.iter().find(|v| v.v_id == id)
    }

    fn get_view_mut(&mut self, id: ViewId) -> Option<&mut View> {
        self.d_views.iter_mut().find(|v| v.v_id == id)
    }

    pub fn set_view_pos(&mut self, id: ViewId, x: f32, y: f32) {
        match self.get_view_mut(id) {
            Some(view) => view.v_pos = (x, y),
            None => return,
        }
        self.mark_changed();
    }

    /// Move a view to the top of the stacking order
    pub fn raise(&mut self, id: ViewId) {
        if let Some(i) = self.d_views.iter().position(|v| v.v_id == id) {
            // Already on top, don't generate an update
            if i == self.d_views.len() - 1 {
                return;
            }
            let view = self.d_views.remove(i);
            self.d_views.push(view);
            self.mark_changed();
        }
    }

    /// Set the view currently in focus
    ///
    /// This raises the view and moves keyboard focus onto it. The
    /// seat handles the leave/enter event ordering.
    pub fn focus_on(&mut self, id: Option<ViewId>) {
        log::debug!("focusing on view {:?}", id);
        match id {
            Some(id) => {
                self.raise(id);
                self.d_seat.keyboard_enter(id);
            }
            None => self.d_seat.keyboard_leave(),
        }
    }

    /// Dismiss every popup on the desktop
    pub fn close_popups(&mut self) {
        let popups: Vec<ViewId> = self
            .d_views
            .iter()
            .filter(|v| v.v_role == Role::popup)
            .map(|v| v.v_id)
            .collect();
        if popups.is_empty() {
            return;
        }

        log::debug!("closing {} popups", popups.len());
        for id in popups.iter() {
            if self.d_seat.keyboard_focus() == Some(*id) {
                self.d_seat.keyboard_leave();
            }
            if self.d_seat.pointer_focus() == Some(*id) {
                self.d_seat.clear_pointer_focus();
            }
        }
        self.d_views.retain(|v| v.v_role != Role::popup);
        self.mark_changed();
    }

    /// Adds a one-time task to the queue
    pub fn add_task(&mut self, task: Task) {
        self.d_tasks.push_back(task);
    }

    /// pulls a one-time task off the queue
    pub fn get_next_task(&mut self) -> Option<Task> {
        self.d_tasks.pop_front()
    }

    /// Apply an interactive resize to a view
    ///
    /// The new size is computed against the size the view had when
    /// the grab started, with each axis only moving if the matching
    /// edge was grabbed. Views never shrink below 1x1.
    pub fn handle_resize(
        &mut self,
        id: ViewId,
        initial_size: (f32, f32),
        delta: (f32, f32),
        edge: ResizeEdge,
    ) {
        let mut w = initial_size.0;
        let mut h = initial_size.1;

        if edge.contains(ResizeEdge::LEFT) {
            w -= delta.0;
        } else if edge.contains(ResizeEdge::RIGHT) {
            w += delta.0;
        }
        if edge.contains(ResizeEdge::TOP) {
            h -= delta.1;
        } else if edge.contains(ResizeEdge::BOTTOM) {
            h += delta.1;
        }

        let size = (partial_max(w, 1.0), partial_max(h, 1.0));
        match self.get_view_mut(id) {
            Some(view) => view.v_size = size,
            None => return,
        }
        self.mark_changed();
    }

    /// Route drag-and-drop motion to the view under the cursor
    ///
    /// On release the target receives the drop and any drag icons
    /// are destroyed.
    pub fn handle_drag(&mut self, target: Option<ViewId>, x: f32, y: f32, released: bool) {
        if released {
            match target {
                Some(id) => log::debug!("view {} received the drop at ({}, {})", id, x, y),
                None => log::debug!("drop at ({}, {}) landed on the desktop", x, y),
            }
            self.d_views.retain(|v| v.v_role != Role::drag_icon);
            self.mark_changed();
            return;
        }

        if let Some(id) = target {
            log::info!("drag motion over view {} at ({}, {})", id, x, y);
        }
    }

    /// Deliver a pointer event to a view
    ///
    /// A target of None means the cursor is over the background, which
    /// clears the pointer focus. Presses additionally run the demo
    /// client's reaction.
    pub fn handle_mouse_event(&mut self, target: Option<ViewId>, ev: SurfaceEvent) {
        let id = match target {
            Some(id) => id,
            None => {
                self.d_seat.clear_pointer_focus();
                return;
            }
        };

        match ev {
            SurfaceEvent::motion { sm_x, sm_y } => {
                self.d_seat.pointer_enter(id, sm_x, sm_y);
                self.d_seat.send_motion(sm_x, sm_y);
            }
            SurfaceEvent::button {
                sb_button,
                sb_state,
                sb_x,
                sb_y,
            } => {
                self.d_seat.pointer_enter(id, sb_x, sb_y);
                self.d_seat.send_button(sb_button, sb_state);
                if sb_state == ButtonState::Pressed {
                    self.client_reaction(id, sb_button, sb_x, sb_y);
                }
            }
        }
    }

    /// What the demo client owning this view does with a press
    ///
    /// A real client would make these requests over the wire. Edges
    /// win over the titlebar so that corner grabs resize instead of
    /// moving.
    fn client_reaction(&mut self, id: ViewId, button: MouseButton, x: f32, y: f32) {
        let (role, edge, on_titlebar, pos) = match self.get_view(id) {
            Some(view) => (
                view.v_role,
                view.resize_edge_at(x, y),
                view.local_is_on_titlebar(x, y),
                view.v_pos,
            ),
            None => return,
        };
        if role != Role::toplevel {
            log::info!("view {} has no reaction to the press", id);
            return;
        }

        match button {
            MouseButton::LEFT => {
                if !edge.is_empty() {
                    self.add_task(Task::start_resize {
                        id: id,
                        edge: edge,
                        anchored: true,
                    });
                } else if on_titlebar {
                    self.add_task(Task::start_move(id));
                }
            }
            MouseButton::MIDDLE => {
                let icon = self.spawn_drag_icon((pos.0 + x, pos.1 + y));
                self.add_task(Task::start_drag { icon: icon });
            }
            MouseButton::RIGHT => {
                self.spawn_popup((pos.0 + x, pos.1 + y));
            }
            _ => {}
        }
    }
}
