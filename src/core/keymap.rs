//! Physical-keyboard bindings for the on-screen keys.
//!
//! One binding per note, covering all three octaves. Lookups are
//! normalized to ASCII lowercase, so the Enter binding is stored as
//! "enter" and shift state never matters.

/// Key identifier -> note name, in pitch order.
pub static KEY_BINDINGS: [(&str, &str); 36] = [
    // First octave (C3-B3)
    ("z", "C3"),
    ("s", "C#3"),
    ("x", "D3"),
    ("d", "D#3"),
    ("c", "E3"),
    ("v", "F3"),
    ("g", "F#3"),
    ("b", "G3"),
    ("h", "G#3"),
    ("n", "A3"),
    ("j", "A#3"),
    ("m", "B3"),
    // Second octave (C4-B4)
    ("q", "C4"),
    ("2", "C#4"),
    ("w", "D4"),
    ("3", "D#4"),
    ("e", "E4"),
    ("r", "F4"),
    ("5", "F#4"),
    ("t", "G4"),
    ("6", "G#4"),
    ("y", "A4"),
    ("7", "A#4"),
    ("u", "B4"),
    // Third octave (C5-B5)
    ("i", "C5"),
    ("9", "C#5"),
    ("o", "D5"),
    ("0", "D#5"),
    ("p", "E5"),
    ("[", "F5"),
    ("=", "F#5"),
    ("]", "G5"),
    ("\\", "G#5"),
    (";", "A5"),
    ("'", "A#5"),
    ("enter", "B5"),
];

/// Resolve a physical key to its note. Most keys are legitimately
/// unbound, so None is the common case and never an error.
pub fn note_for_key(key: &str) -> Option<&'static str> {
    let key = key.to_ascii_lowercase();
    KEY_BINDINGS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, note)| *note)
}

/// Reverse lookup, used by the key-map reference panel and key labels.
pub fn key_for_note(note: &str) -> Option<&'static str> {
    KEY_BINDINGS
        .iter()
        .find(|(_, n)| *n == note)
        .map(|(k, _)| *k)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::notes;

    #[test]
    fn every_note_has_exactly_one_binding() {
        for (name, _) in notes::NOTES.iter() {
            let bindings = KEY_BINDINGS.iter().filter(|(_, n)| n == name).count();
            assert_eq!(bindings, 1, "note {} should have one binding", name);
        }
        assert_eq!(KEY_BINDINGS.len(), notes::NOTE_COUNT);
    }

    #[test]
    fn every_binding_targets_a_known_note() {
        for (key, note) in KEY_BINDINGS.iter() {
            assert!(
                notes::frequency_of(note).is_some(),
                "binding {} -> {} should hit the note table",
                key,
                note
            );
        }
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(note_for_key("q"), Some("C4"));
        assert_eq!(note_for_key("Q"), Some("C4"));
        assert_eq!(note_for_key("Enter"), Some("B5"));
        assert_eq!(note_for_key("enter"), Some("B5"));
    }

    #[test]
    fn punctuation_layout() {
        assert_eq!(note_for_key("["), Some("F5"));
        assert_eq!(note_for_key("="), Some("F#5"));
        assert_eq!(note_for_key("]"), Some("G5"));
        assert_eq!(note_for_key("\\"), Some("G#5"));
        assert_eq!(note_for_key(";"), Some("A5"));
        assert_eq!(note_for_key("'"), Some("A#5"));
    }

    #[test]
    fn unbound_keys_resolve_to_none() {
        assert_eq!(note_for_key("k"), None);
        assert_eq!(note_for_key(","), None);
        assert_eq!(note_for_key("."), None);
        assert_eq!(note_for_key("/"), None);
        assert_eq!(note_for_key("space"), None);
    }

    #[test]
    fn reverse_lookup() {
        assert_eq!(key_for_note("C4"), Some("q"));
        assert_eq!(key_for_note("B5"), Some("enter"));
        assert_eq!(key_for_note("C6"), None);
    }
}
