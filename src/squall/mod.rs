//! # The Squall desktop
//!
//! Here we define the toplevel struct for our demo desktop. It owns
//! the three subsystems and runs the event loop that ties them
//! together:
//!
//! * `desktop` - the shared view database.
//! * `input` - the grab state machine reacting to user input.
//! * `swcomp` - the software compositor presenting it all.

// Austin Shafer - 2024
extern crate sdl2;

pub mod desktop;
pub mod input;
pub mod swcomp;

#[cfg(test)]
mod tests;

use desktop::Desktop;
use input::event::{
    convert_sdl_mods, convert_sdl_mouse, ButtonState, InputEvent, Keyboard, PointerButton,
    PointerMove,
};
use input::Input;
use swcomp::Output;
use utils::log;
use utils::timing::StopWatch;

use sdl2::event::{Event, WindowEvent};
use sdl2::keyboard::Keycode;

/// Demo views placed on the desktop at startup
const VIEW_COUNT: u32 = 4;
/// How long to block waiting for the next event, in ms
const FRAME_PERIOD: u32 = 16;
/// Frames rendered by the `timed` benchmark mode
const TIMED_FRAMES: u32 = 1000;

// The squall desktop
pub struct Squall {
    sq_ev: EventManager,
}

impl Squall {
    // This is a cooler way of saying new
    pub fn spin(background: Option<String>, timed: bool) -> Squall {
        Squall {
            sq_ev: EventManager::new(background, timed),
        }
    }

    // This is the main loop of the entire system
    pub fn run_forever(&mut self) {
        self.sq_ev.worker_thread();
    }
}

/// The event manager
///
/// This is the launching point of the desktop. It owns the SDL
/// context, listens for events, and dispatches them to the
/// subsystems.
pub struct EventManager {
    // Keeps the SDL context alive for the lifetime of the desktop
    _em_sdl: sdl2::Sdl,
    em_pump: sdl2::EventPump,
    em_desktop: Desktop,
    em_input: Input,
    em_output: Output,
    em_timed: bool,
}

impl EventManager {
    /// Returns a new struct in charge of running the main event loop
    ///
    /// This sets up the window system, creates the output window, and
    /// populates the desktop with the demo views.
    pub fn new(background: Option<String>, timed: bool) -> EventManager {
        let sdl = sdl2::init().expect("Could not initialize SDL");
        let video = sdl.video().expect("Could not initialize the video subsystem");
        let pump = sdl
            .event_pump()
            .expect("Could not initialize the event pump");

        let output = Output::new(&video, background.as_deref())
            .expect("Could not create the output window");

        let mut desktop = Desktop::new(output.resolution());
        for i in 0..VIEW_COUNT {
            desktop.spawn_toplevel(
                (140.0 + (i as f32) * 80.0, 100.0 + (i as f32) * 60.0),
                (320.0, 240.0),
            );
        }

        EventManager {
            _em_sdl: sdl,
            em_pump: pump,
            em_desktop: desktop,
            em_input: Input::new(),
            em_output: output,
            em_timed: timed,
        }
    }

    /// Each subsystem has a function that implements its main
    /// loop. This is that function
    pub fn worker_thread(&mut self) {
        // first frame, before any input arrives
        self.render();

        if self.em_timed {
            return self.run_timed();
        }

        loop {
            // Block until something happens, but wake up once a frame
            if let Some(ev) = self.em_pump.wait_event_timeout(FRAME_PERIOD) {
                if self.handle_sdl_event(ev) {
                    return;
                }
                self.drain_tasks();
            }

            // Now drain anything else pending so one frame batches
            // all available updates
            let pending: Vec<Event> = self.em_pump.poll_iter().collect();
            for ev in pending {
                if self.handle_sdl_event(ev) {
                    return;
                }
                self.drain_tasks();
            }

            if self.em_desktop.is_changed() {
                self.render();
            }
        }
    }

    /// Relay grab requests made by the demo views
    ///
    /// These were queued while the triggering event was delivered.
    fn drain_tasks(&mut self) {
        while let Some(task) = self.em_desktop.get_next_task() {
            self.em_input.handle_task(&mut self.em_desktop, task);
        }
    }

    fn render(&mut self) {
        if let Err(e) = self.em_output.render(&self.em_pump, &self.em_desktop) {
            log::error!("Could not render frame: {:?}", e);
        }
        self.em_desktop.clear_changed();
    }

    /// Translate one SDL event and feed it to the input subsystem
    ///
    /// Returns true if the desktop should exit.
    fn handle_sdl_event(&mut self, ev: Event) -> bool {
        match ev {
            // Tell the desktop to exit if the user closed it
            Event::Quit { .. }
            | Event::KeyDown {
                keycode: Some(Keycode::Escape),
                ..
            } => return true,
            Event::KeyDown {
                scancode, keymod, ..
            } => {
                self.em_input.handle_input_event(
                    &mut self.em_desktop,
                    &InputEvent::keyboard(Keyboard {
                        k_code: scancode.map(|s| s as u32).unwrap_or(0),
                        k_state: ButtonState::Pressed,
                        k_mods: convert_sdl_mods(keymod),
                    }),
                );
            }
            Event::KeyUp {
                scancode, keymod, ..
            } => {
                self.em_input.handle_input_event(
                    &mut self.em_desktop,
                    &InputEvent::keyboard(Keyboard {
                        k_code: scancode.map(|s| s as u32).unwrap_or(0),
                        k_state: ButtonState::Released,
                        k_mods: convert_sdl_mods(keymod),
                    }),
                );
            }
            // handle pointer inputs. This just looks like the above
            Event::MouseButtonDown {
                mouse_btn, x, y, ..
            } => {
                self.em_input.handle_input_event(
                    &mut self.em_desktop,
                    &InputEvent::pointer_button(PointerButton {
                        pb_button: convert_sdl_mouse(mouse_btn),
                        pb_state: ButtonState::Pressed,
                        pb_x: x as f32,
                        pb_y: y as f32,
                    }),
                );
            }
            Event::MouseButtonUp {
                mouse_btn, x, y, ..
            } => {
                self.em_input.handle_input_event(
                    &mut self.em_desktop,
                    &InputEvent::pointer_button(PointerButton {
                        pb_button: convert_sdl_mouse(mouse_btn),
                        pb_state: ButtonState::Released,
                        pb_x: x as f32,
                        pb_y: y as f32,
                    }),
                );
            }
            Event::MouseMotion { x, y, .. } => {
                self.em_input.handle_input_event(
                    &mut self.em_desktop,
                    &InputEvent::pointer_move(PointerMove {
                        pm_x: x as f32,
                        pm_y: y as f32,
                    }),
                );
            }
            Event::Window { win_event, .. } => match win_event {
                WindowEvent::Close => return true,
                WindowEvent::Resized(w, h) | WindowEvent::SizeChanged(w, h) => {
                    self.em_desktop.set_resolution((w as u32, h as u32));
                }
                WindowEvent::Exposed => self.em_desktop.mark_changed(),
                _ => {}
            },
            _ => {}
        }

        return false;
    }

    /// Render a fixed number of frames and report the rate
    fn run_timed(&mut self) {
        let mut stop = StopWatch::new();

        stop.start();
        for _ in 0..TIMED_FRAMES {
            self.render();
        }
        stop.end();

        println!(
            "Rendering {} iterations took {:?}",
            TIMED_FRAMES,
            stop.get_duration()
        );
        println!(
            "FPS: {}",
            TIMED_FRAMES as f32 / stop.get_duration().as_secs_f32()
        );
    }
}
