//! Per-note pressed styling with delayed clears.
//!
//! Clears are deadline-based rather than immediate so a fast retrigger
//! keeps a key continuously lit instead of flashing off and on. A new
//! press cancels any pending clear for that note.

use std::time::{Duration, Instant};

use crate::core::notes::NOTE_COUNT;

pub struct PressedKeys {
    pressed: [bool; NOTE_COUNT],
    clear_at: [Option<Instant>; NOTE_COUNT],
}

impl Default for PressedKeys {
    fn default() -> Self {
        Self::new()
    }
}

impl PressedKeys {
    pub fn new() -> Self {
        PressedKeys {
            pressed: [false; NOTE_COUNT],
            clear_at: [None; NOTE_COUNT],
        }
    }

    /// Mark a note pressed, immediately. Cancels a pending clear so the
    /// key stays lit across retriggers.
    pub fn press(&mut self, index: usize) {
        self.pressed[index] = true;
        self.clear_at[index] = None;
    }

    /// Arm a clear deadline for a note. Replaces any earlier deadline.
    pub fn schedule_clear(&mut self, index: usize, delay: Duration, now: Instant) {
        self.clear_at[index] = Some(now + delay);
    }

    /// Clear every note whose deadline has passed. Called once per
    /// frame.
    pub fn tick(&mut self, now: Instant) {
        for index in 0..NOTE_COUNT {
            if let Some(deadline) = self.clear_at[index] {
                if now >= deadline {
                    self.pressed[index] = false;
                    self.clear_at[index] = None;
                }
            }
        }
    }

    pub fn is_pressed(&self, index: usize) -> bool {
        self.pressed[index]
    }

    /// Earliest pending clear deadline, if any. The UI uses this to
    /// schedule its next repaint instead of repainting continuously.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.clear_at.iter().flatten().min().copied()
    }

    pub fn any_pressed(&self) -> bool {
        self.pressed.iter().any(|&p| p)
    }
}
