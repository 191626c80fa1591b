/// Desktop and input subsystem tests
///
/// These drive the grab state machine with synthetic press/move/release
/// sequences and check what happened to the views, no window system
/// needed.
use super::desktop::view::{ResizeEdge, Role};
use super::desktop::Desktop;
use super::input::event::{
    ButtonState, InputEvent, Keyboard, Mods, MouseButton, PointerButton, PointerMove,
};
use super::input::{GrabState, Input};

/// Common initialization
///
/// Two overlapping toplevels:
///   view 0 at (100, 100) size 200x150
///   view 1 at (200, 150) size 200x150, on top
fn setup_desktop() -> (Desktop, Input) {
    let mut desktop = Desktop::new((1280, 720));
    desktop.spawn_toplevel((100.0, 100.0), (200.0, 150.0));
    desktop.spawn_toplevel((200.0, 150.0), (200.0, 150.0));

    (desktop, Input::new())
}

fn press(input: &mut Input, desktop: &mut Desktop, button: MouseButton, x: f32, y: f32) {
    input.handle_input_event(
        desktop,
        &InputEvent::pointer_button(PointerButton {
            pb_button: button,
            pb_state: ButtonState::Pressed,
            pb_x: x,
            pb_y: y,
        }),
    );
}

fn release(input: &mut Input, desktop: &mut Desktop, button: MouseButton, x: f32, y: f32) {
    input.handle_input_event(
        desktop,
        &InputEvent::pointer_button(PointerButton {
            pb_button: button,
            pb_state: ButtonState::Released,
            pb_x: x,
            pb_y: y,
        }),
    );
}

fn motion(input: &mut Input, desktop: &mut Desktop, x: f32, y: f32) {
    input.handle_input_event(
        desktop,
        &InputEvent::pointer_move(PointerMove { pm_x: x, pm_y: y }),
    );
}

fn key(input: &mut Input, desktop: &mut Desktop, code: u32, mods: Mods) {
    input.handle_input_event(
        desktop,
        &InputEvent::keyboard(Keyboard {
            k_code: code,
            k_state: ButtonState::Pressed,
            k_mods: mods,
        }),
    );
}

/// Relay queued grab requests, like the event loop does after
/// each translated event
fn drain_tasks(input: &mut Input, desktop: &mut Desktop) {
    while let Some(task) = desktop.get_next_task() {
        input.handle_task(desktop, task);
    }
}

#[test]
fn view_at_prefers_topmost() {
    let (desktop, input) = setup_desktop();

    // (250, 200) is inside both views, the last in stacking
    // order wins
    assert_eq!(input.view_at(&desktop, 250.0, 200.0), Some(1));
    // only view 0 is under this one
    assert_eq!(input.view_at(&desktop, 150.0, 120.0), Some(0));
    // the background
    assert_eq!(input.view_at(&desktop, 50.0, 50.0), None);
}

#[test]
fn anchor_offset_reversibility() {
    let pos = (123.0, 77.0);
    let size = (200.0, 150.0);
    let edges = [
        ResizeEdge::empty(),
        ResizeEdge::TOP,
        ResizeEdge::BOTTOM,
        ResizeEdge::LEFT,
        ResizeEdge::RIGHT,
        ResizeEdge::TOP_LEFT,
        ResizeEdge::TOP_RIGHT,
        ResizeEdge::BOTTOM_LEFT,
        ResizeEdge::BOTTOM_RIGHT,
    ];

    for edge in edges.iter() {
        let anchor = Input::anchor_position(pos, *edge, size);
        assert_eq!(Input::anchored_position(anchor, *edge, size), pos);
    }
}

#[test]
fn anchor_position_offsets_by_size() {
    let size = (200.0, 150.0);

    assert_eq!(
        Input::anchor_position((10.0, 20.0), ResizeEdge::TOP_LEFT, size),
        (210.0, 170.0)
    );
    assert_eq!(
        Input::anchor_position((10.0, 20.0), ResizeEdge::BOTTOM_RIGHT, size),
        (10.0, 20.0)
    );
}

#[test]
fn resize_applies_delta_per_edge() {
    let (mut desktop, _input) = setup_desktop();

    desktop.handle_resize(1, (200.0, 150.0), (30.0, 20.0), ResizeEdge::BOTTOM_RIGHT);
    assert_eq!(desktop.get_view(1).unwrap().v_size, (230.0, 170.0));

    // top/left edges move against the delta
    desktop.handle_resize(1, (200.0, 150.0), (30.0, 20.0), ResizeEdge::TOP_LEFT);
    assert_eq!(desktop.get_view(1).unwrap().v_size, (170.0, 130.0));

    // a single edge only touches its own axis
    desktop.handle_resize(1, (200.0, 150.0), (30.0, 20.0), ResizeEdge::BOTTOM);
    assert_eq!(desktop.get_view(1).unwrap().v_size, (200.0, 170.0));
}

#[test]
fn resize_clamps_to_min_size() {
    let (mut desktop, _input) = setup_desktop();

    desktop.handle_resize(1, (200.0, 150.0), (-500.0, -500.0), ResizeEdge::BOTTOM_RIGHT);
    assert_eq!(desktop.get_view(1).unwrap().v_size, (1.0, 1.0));
}

#[test]
fn titlebar_press_starts_move_grab() {
    let (mut desktop, mut input) = setup_desktop();

    // (300, 158) is on view 1's titlebar strip
    press(&mut input, &mut desktop, MouseButton::LEFT, 300.0, 158.0);
    drain_tasks(&mut input, &mut desktop);
    assert_eq!(input.grab_state(), GrabState::MoveGrab);
    assert_eq!(input.mouse_view(), Some(1));

    // the view follows the cursor, keeping the press offset
    motion(&mut input, &mut desktop, 310.0, 170.0);
    assert_eq!(desktop.get_view(1).unwrap().v_pos, (210.0, 162.0));

    release(&mut input, &mut desktop, MouseButton::LEFT, 310.0, 170.0);
    assert_eq!(input.grab_state(), GrabState::NoGrab);
    assert_eq!(input.mouse_view(), None);
}

#[test]
fn modifier_click_starts_move_without_raising() {
    let (mut desktop, mut input) = setup_desktop();

    key(&mut input, &mut desktop, 0, Mods::LALT);
    press(&mut input, &mut desktop, MouseButton::LEFT, 150.0, 200.0);
    drain_tasks(&mut input, &mut desktop);

    assert_eq!(input.grab_state(), GrabState::MoveGrab);
    assert_eq!(input.mouse_view(), Some(0));
    // the click was consumed by the grab, view 1 keeps the top spot
    // and the keyboard focus
    assert_eq!(desktop.views().last().unwrap().v_id, 1);
    assert_eq!(desktop.seat().keyboard_focus(), Some(1));

    motion(&mut input, &mut desktop, 160.0, 210.0);
    assert_eq!(desktop.get_view(0).unwrap().v_pos, (110.0, 110.0));

    release(&mut input, &mut desktop, MouseButton::LEFT, 160.0, 210.0);
    assert_eq!(input.grab_state(), GrabState::NoGrab);
}

#[test]
fn plain_press_raises_and_focuses() {
    let (mut desktop, mut input) = setup_desktop();
    assert_eq!(desktop.seat().keyboard_focus(), Some(1));

    // body of view 0, away from the titlebar and the resize bands
    press(&mut input, &mut desktop, MouseButton::LEFT, 150.0, 220.0);
    drain_tasks(&mut input, &mut desktop);

    assert_eq!(input.grab_state(), GrabState::NoGrab);
    assert_eq!(desktop.views().last().unwrap().v_id, 0);
    assert_eq!(desktop.seat().keyboard_focus(), Some(0));

    release(&mut input, &mut desktop, MouseButton::LEFT, 150.0, 220.0);
}

#[test]
fn edge_press_starts_anchored_resize() {
    let (mut desktop, mut input) = setup_desktop();

    // one pixel inside view 1's left edge
    press(&mut input, &mut desktop, MouseButton::LEFT, 201.0, 220.0);
    drain_tasks(&mut input, &mut desktop);
    assert_eq!(input.grab_state(), GrabState::ResizeGrab);

    // drag 20px to the left, the view grows and its right edge
    // stays anchored at x = 400
    motion(&mut input, &mut desktop, 181.0, 220.0);
    let view = desktop.get_view(1).unwrap();
    assert_eq!(view.v_size, (220.0, 150.0));
    assert_eq!(view.v_pos, (180.0, 150.0));
    assert_eq!(view.v_pos.0 + view.v_size.0, 400.0);

    release(&mut input, &mut desktop, MouseButton::LEFT, 181.0, 220.0);
    assert_eq!(input.grab_state(), GrabState::NoGrab);
}

#[test]
fn drag_icon_follows_cursor_and_drops() {
    let (mut desktop, mut input) = setup_desktop();

    press(&mut input, &mut desktop, MouseButton::MIDDLE, 250.0, 200.0);
    drain_tasks(&mut input, &mut desktop);
    assert_eq!(input.grab_state(), GrabState::DragGrab);
    assert!(desktop.views().any(|v| v.v_role == Role::drag_icon));

    // the icon rides along under the cursor, offset by its hotspot
    motion(&mut input, &mut desktop, 500.0, 90.0);
    let icon = desktop
        .views()
        .find(|v| v.v_role == Role::drag_icon)
        .unwrap();
    assert_eq!(icon.v_pos, (488.0, 78.0));

    // it is never a hit-test target
    assert_eq!(input.view_at(&desktop, 490.0, 80.0), None);

    // dropping destroys it
    release(&mut input, &mut desktop, MouseButton::MIDDLE, 500.0, 90.0);
    assert_eq!(input.grab_state(), GrabState::NoGrab);
    assert!(!desktop.views().any(|v| v.v_role == Role::drag_icon));
}

#[test]
fn background_press_closes_popups() {
    let (mut desktop, mut input) = setup_desktop();

    // right click spawns a popup
    press(&mut input, &mut desktop, MouseButton::RIGHT, 250.0, 200.0);
    drain_tasks(&mut input, &mut desktop);
    release(&mut input, &mut desktop, MouseButton::RIGHT, 250.0, 200.0);
    assert!(desktop.views().any(|v| v.v_role == Role::popup));

    // clicking the background dismisses it
    press(&mut input, &mut desktop, MouseButton::LEFT, 50.0, 50.0);
    assert!(!desktop.views().any(|v| v.v_role == Role::popup));
    release(&mut input, &mut desktop, MouseButton::LEFT, 50.0, 50.0);
}

#[test]
fn presses_during_grab_are_swallowed() {
    let (mut desktop, mut input) = setup_desktop();

    press(&mut input, &mut desktop, MouseButton::LEFT, 300.0, 158.0);
    drain_tasks(&mut input, &mut desktop);
    assert_eq!(input.grab_state(), GrabState::MoveGrab);

    // a right click mid-grab must not reach the demo client, so no
    // popup appears
    press(&mut input, &mut desktop, MouseButton::RIGHT, 300.0, 158.0);
    drain_tasks(&mut input, &mut desktop);
    assert!(!desktop.views().any(|v| v.v_role == Role::popup));

    // the grab holds until the last button comes up
    release(&mut input, &mut desktop, MouseButton::RIGHT, 300.0, 158.0);
    assert_eq!(input.grab_state(), GrabState::MoveGrab);
    release(&mut input, &mut desktop, MouseButton::LEFT, 300.0, 158.0);
    assert_eq!(input.grab_state(), GrabState::NoGrab);
}

#[test]
fn motion_updates_pointer_focus() {
    let (mut desktop, mut input) = setup_desktop();

    motion(&mut input, &mut desktop, 150.0, 200.0);
    assert_eq!(desktop.seat().pointer_focus(), Some(0));

    motion(&mut input, &mut desktop, 250.0, 200.0);
    assert_eq!(desktop.seat().pointer_focus(), Some(1));

    // over the background the focus clears
    motion(&mut input, &mut desktop, 50.0, 50.0);
    assert_eq!(desktop.seat().pointer_focus(), None);
}

#[test]
fn keys_go_to_the_focused_view() {
    let (mut desktop, mut input) = setup_desktop();

    // focus follows the last press
    press(&mut input, &mut desktop, MouseButton::LEFT, 150.0, 220.0);
    release(&mut input, &mut desktop, MouseButton::LEFT, 150.0, 220.0);
    assert_eq!(desktop.seat().keyboard_focus(), Some(0));

    // key delivery should not disturb focus or grab state
    key(&mut input, &mut desktop, 30, Mods::NONE);
    assert_eq!(desktop.seat().keyboard_focus(), Some(0));
    assert_eq!(input.grab_state(), GrabState::NoGrab);
}
