// Helpers to handle budgeting subsystems based on time
//
// Austin Shafer - 2024
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Helper to get the current time in milliseconds
pub fn get_current_millis() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Error getting system time")
        .as_millis() as u32
}

/// A reusable timer for measuring how long an operation took
///
/// Call `start` before the section to measure and `end` after
/// it, then read the elapsed time with `get_duration`.
pub struct StopWatch {
    sw_start: SystemTime,
    sw_end: SystemTime,
}

impl StopWatch {
    pub fn new() -> StopWatch {
        StopWatch {
            sw_start: SystemTime::now(),
            sw_end: SystemTime::now(),
        }
    }

    pub fn start(&mut self) {
        self.sw_start = SystemTime::now();
    }

    pub fn end(&mut self) {
        self.sw_end = SystemTime::now();
    }

    pub fn get_duration(&self) -> Duration {
        self.sw_end
            .duration_since(self.sw_start)
            .expect("Error getting system time")
    }
}
