// Tasks are work orders passed from the desktop's demo clients
// to the input subsystem for processing. This describes those
// units of work.
//
// Austin Shafer - 2024
use super::view::{ResizeEdge, ViewId};

/// A unit of work to be handled by the input subsystem
///
/// These are the grab-start requests a client would make over
/// the wire after receiving a button press. The input subsystem
/// drains them once the triggering event has been handled.
#[derive(Debug)]
pub enum Task {
    start_move(ViewId),
    start_resize {
        id: ViewId,
        edge: ResizeEdge,
        anchored: bool,
    },
    start_drag {
        icon: ViewId,
    },
}
