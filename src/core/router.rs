//! Input routing: turn raw pointer and keyboard input into note
//! triggers and visual-state actions.
//!
//! Unresolved input (an unbound key, an unknown note name) routes to
//! nothing. That is the normal case for most of the keyboard and is
//! never an error.

use std::time::Duration;

use crate::core::{keymap, notes};

/// How long a clicked key stays visually pressed. Clicks have no
/// release event, so the clear is scheduled at trigger time.
pub const POINTER_CLEAR_DELAY: Duration = Duration::from_millis(200);

/// Delay between a key-up and the visual clear, to keep fast repeated
/// taps from flickering.
pub const KEY_UP_CLEAR_DELAY: Duration = Duration::from_millis(100);

/// Raw platform input, already stripped of any UI detail.
#[derive(Debug, Clone, Copy)]
pub enum RawInput<'a> {
    /// A click on the on-screen key bound to `note`.
    PointerDown { note: &'a str },
    /// A physical key press. Key-repeat events arrive here too and each
    /// one triggers a fresh voice.
    KeyDown { key: &'a str },
    KeyUp { key: &'a str },
}

/// A resolved input event. The app applies these in order: audio first,
/// then the visual press, with audio failure never blocking the visual.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Routed {
    Trigger {
        note: &'static str,
        frequency: f32,
        /// Set for pointer triggers, which have no matching release.
        clear_after: Option<Duration>,
    },
    ReleaseVisual {
        note: &'static str,
        clear_after: Duration,
    },
}

/// Resolve one raw input to an action, or to nothing.
pub fn route(input: RawInput<'_>) -> Option<Routed> {
    match input {
        RawInput::PointerDown { note } => {
            let index = notes::index_of(note)?;
            let (name, frequency) = notes::NOTES[index];
            Some(Routed::Trigger {
                note: name,
                frequency,
                clear_after: Some(POINTER_CLEAR_DELAY),
            })
        }
        RawInput::KeyDown { key } => {
            let note = keymap::note_for_key(key)?;
            let frequency = notes::frequency_of(note)?;
            Some(Routed::Trigger {
                note,
                frequency,
                clear_after: None,
            })
        }
        RawInput::KeyUp { key } => {
            let note = keymap::note_for_key(key)?;
            Some(Routed::ReleaseVisual {
                note,
                clear_after: KEY_UP_CLEAR_DELAY,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_click_triggers_with_scheduled_clear() {
        let routed = route(RawInput::PointerDown { note: "C3" });
        assert_eq!(
            routed,
            Some(Routed::Trigger {
                note: "C3",
                frequency: 130.81,
                clear_after: Some(POINTER_CLEAR_DELAY),
            })
        );
    }

    #[test]
    fn key_down_triggers_without_scheduled_clear() {
        let routed = route(RawInput::KeyDown { key: "q" });
        assert_eq!(
            routed,
            Some(Routed::Trigger {
                note: "C4",
                frequency: 261.63,
                clear_after: None,
            })
        );
    }

    #[test]
    fn key_up_releases_visual_only() {
        let routed = route(RawInput::KeyUp { key: "q" });
        assert_eq!(
            routed,
            Some(Routed::ReleaseVisual {
                note: "C4",
                clear_after: KEY_UP_CLEAR_DELAY,
            })
        );
    }

    #[test]
    fn uppercase_key_resolves_like_lowercase() {
        assert_eq!(
            route(RawInput::KeyDown { key: "Y" }),
            route(RawInput::KeyDown { key: "y" })
        );
    }

    #[test]
    fn unbound_key_routes_to_nothing() {
        assert_eq!(route(RawInput::KeyDown { key: "k" }), None);
        assert_eq!(route(RawInput::KeyUp { key: "k" }), None);
        assert_eq!(route(RawInput::KeyDown { key: "escape" }), None);
    }

    #[test]
    fn unknown_note_routes_to_nothing() {
        assert_eq!(route(RawInput::PointerDown { note: "C9" }), None);
        assert_eq!(route(RawInput::PointerDown { note: "" }), None);
    }

    #[test]
    fn a4_triggers_at_exactly_440() {
        match route(RawInput::KeyDown { key: "y" }) {
            Some(Routed::Trigger { note, frequency, .. }) => {
                assert_eq!(note, "A4");
                assert_eq!(frequency, 440.0);
            }
            other => panic!("expected a trigger, got {:?}", other),
        }
    }
}
