//! # Squall
//!
//! Squall is a demonstration desktop: one OS-level window acts as the
//! screen of a miniature compositor. A handful of demo views are stacked
//! inside it and can be clicked, moved, resized, and dragged around, all
//! composited in software onto the window's backing surface.
//!
//! * `desktop` - the shared database of views, focus, and pending work.
//! * `input` - the grab state machine. It reacts to user input and
//!   updates the views.
//! * `swcomp` - the software compositor. It blits the background and the
//!   view stack onto the output window each frame.

// Austin Shafer - 2024
#![allow(non_camel_case_types)]
#[macro_use]
extern crate bitflags;

extern crate utils;

mod squall;
use squall::Squall;

use std::time::SystemTime;

fn main() {
    // If the user passes an argument 'timed', then we should
    // exit after a short bit and print the FPS
    let args: Vec<String> = std::env::args().collect();
    let timed = args.contains(&String::from("timed"));

    // The background image is optional, the gray fill stands
    // alone without it
    let background = args
        .iter()
        .position(|a| a == "--background")
        .and_then(|i| args.get(i + 1).cloned())
        .or_else(|| std::env::var("SQUALL_BACKGROUND").ok());

    let mut storm = Squall::spin(background, timed);

    println!("Begin render loop...");
    let start = SystemTime::now();
    storm.run_forever();
    let end = SystemTime::now();

    println!(
        "uptime: {}",
        end.duration_since(start).unwrap().as_secs_f32()
    );
}
