// Demo client views
//
// A view is one rectangle on the desktop standing in for a
// client surface. The desktop owns them, input hit-tests them,
// and swcomp draws them.
//
// Austin Shafer - 2024
use utils::region::Rect;

/// Height of the titlebar strip drawn across the top of toplevels
pub const TITLEBAR_HEIGHT: f32 = 16.0;

/// Distance from a view edge that still procs a resize
const RESIZE_PROX: f32 = 3.0;

pub type ViewId = u32;

bitflags! {
    /// Which edge(s) of a view a resize acts on.
    ///
    /// The values match the xdg_toplevel resize_edge encoding.
    pub struct ResizeEdge: u32 {
        const TOP = 1;
        const BOTTOM = 2;
        const LEFT = 4;
        const RIGHT = 8;
        const TOP_LEFT = Self::TOP.bits | Self::LEFT.bits;
        const TOP_RIGHT = Self::TOP.bits | Self::RIGHT.bits;
        const BOTTOM_LEFT = Self::BOTTOM.bits | Self::LEFT.bits;
        const BOTTOM_RIGHT = Self::BOTTOM.bits | Self::RIGHT.bits;
    }
}

/// The role this view plays on the desktop
///
/// Toplevels are the normal application windows. Popups are
/// transient and live until the user clicks somewhere else.
/// Drag icons ride along under the cursor during a drag and
/// are skipped by hit tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    toplevel,
    popup,
    drag_icon,
}

/// An rgba fill color
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// Quantize to the 8-bit channels the output surface uses
    pub fn as_rgb8(&self) -> (u8, u8, u8) {
        (
            (self.r * 255.0) as u8,
            (self.g * 255.0) as u8,
            (self.b * 255.0) as u8,
        )
    }
}

pub struct View {
    pub v_id: ViewId,
    pub v_role: Role,
    /// position of the upper left corner on the desktop
    pub v_pos: (f32, f32),
    pub v_size: (f32, f32),
    /// offset of the attach point relative to the cursor
    ///
    /// Only drag icons set this, it keeps the icon from sitting
    /// exactly under the hotspot.
    pub v_offset: (f32, f32),
    pub v_color: Color,
}

impl View {
    pub fn new(id: ViewId, role: Role, pos: (f32, f32), size: (f32, f32), color: Color) -> View {
        View {
            v_id: id,
            v_role: role,
            v_pos: pos,
            v_size: size,
            v_offset: (0.0, 0.0),
            v_color: color,
        }
    }

    pub fn bounds(&self) -> Rect<f32> {
        Rect::new(self.v_pos.0, self.v_pos.1, self.v_size.0, self.v_size.1)
    }

    /// Checks if the desktop point (x, y) overlaps with this view
    pub fn contains(&self, x: f32, y: f32) -> bool {
        self.bounds().intersects(x, y)
    }

    /// Is the surface-local point (x, y) over the titlebar strip
    pub fn local_is_on_titlebar(&self, x: f32, y: f32) -> bool {
        x > 0.0 && x < self.v_size.0 && y > 0.0 && y < TITLEBAR_HEIGHT
    }

    /// calculates if a surface-local position is over the part of
    /// the view that procs a resize
    pub fn resize_edge_at(&self, x: f32, y: f32) -> ResizeEdge {
        let (ww, wh) = self.v_size;
        let prox = RESIZE_PROX;

        // is (x,y) inside each dimension of the view
        let x_contained = x > 0.0 && x < ww;
        let y_contained = y > 0.0 && y < wh;

        // closures for helping us with overlap calculations
        // p is val to check, a is axis location
        let near_edge = |p: f32, a: f32| p > (a - prox) && p < (a + prox);
        // same thing but for corners
        // (vx, vy) is the point and (cx, cy) is the corner
        let near_corner =
            |vx: f32, vy: f32, cx: f32, cy: f32| near_edge(vx, cx) && near_edge(vy, cy);

        // first check if we are over a corner
        if near_corner(x, y, 0.0, 0.0) {
            ResizeEdge::TOP_LEFT
        } else if near_corner(x, y, ww, 0.0) {
            ResizeEdge::TOP_RIGHT
        } else if near_corner(x, y, 0.0, wh) {
            ResizeEdge::BOTTOM_LEFT
        } else if near_corner(x, y, ww, wh) {
            ResizeEdge::BOTTOM_RIGHT
        } else if near_edge(x, 0.0) && y_contained {
            ResizeEdge::LEFT
        } else if near_edge(x, ww) && y_contained {
            ResizeEdge::RIGHT
        } else if near_edge(y, 0.0) && x_contained {
            ResizeEdge::TOP
        } else if near_edge(y, wh) && x_contained {
            ResizeEdge::BOTTOM
        } else {
            ResizeEdge::empty()
        }
    }
}
