/// The fixed note set: three chromatic octaves, C3 through B5.
/// Frequencies are equal-tempered values in Hz, listed in pitch order.
pub const NOTE_COUNT: usize = 36;

pub static NOTES: [(&str, f32); NOTE_COUNT] = [
    // First octave (C3-B3)
    ("C3", 130.81),
    ("C#3", 138.59),
    ("D3", 146.83),
    ("D#3", 155.56),
    ("E3", 164.81),
    ("F3", 174.61),
    ("F#3", 185.0),
    ("G3", 196.0),
    ("G#3", 207.65),
    ("A3", 220.0),
    ("A#3", 233.08),
    ("B3", 246.94),
    // Second octave (C4-B4)
    ("C4", 261.63),
    ("C#4", 277.18),
    ("D4", 293.66),
    ("D#4", 311.13),
    ("E4", 329.63),
    ("F4", 349.23),
    ("F#4", 369.99),
    ("G4", 392.0),
    ("G#4", 415.3),
    ("A4", 440.0),
    ("A#4", 466.16),
    ("B4", 493.88),
    // Third octave (C5-B5)
    ("C5", 523.25),
    ("C#5", 554.37),
    ("D5", 587.33),
    ("D#5", 622.25),
    ("E5", 659.25),
    ("F5", 698.46),
    ("F#5", 739.99),
    ("G5", 783.99),
    ("G#5", 830.61),
    ("A5", 880.0),
    ("A#5", 932.33),
    ("B5", 987.77),
];

/// Look up the frequency for a note name. Unknown names return None and
/// callers treat that as a no-op, not an error.
pub fn frequency_of(note: &str) -> Option<f32> {
    NOTES.iter().find(|(name, _)| *name == note).map(|(_, f)| *f)
}

/// Stable index of a note in pitch order, used to key per-note state.
pub fn index_of(note: &str) -> Option<usize> {
    NOTES.iter().position(|(name, _)| *name == note)
}

pub fn name_of(index: usize) -> &'static str {
    NOTES[index].0
}

/// Black-key test for keyboard layout.
pub fn is_sharp(note: &str) -> bool {
    note.contains('#')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_reference_frequencies() {
        assert_eq!(frequency_of("C3"), Some(130.81));
        assert_eq!(frequency_of("F#3"), Some(185.0));
        assert_eq!(frequency_of("C4"), Some(261.63));
        assert_eq!(frequency_of("A4"), Some(440.0));
        assert_eq!(frequency_of("G#4"), Some(415.3));
        assert_eq!(frequency_of("C5"), Some(523.25));
        assert_eq!(frequency_of("B5"), Some(987.77));
    }

    #[test]
    fn covers_three_octaves_in_pitch_order() {
        assert_eq!(NOTES.len(), 36);
        for window in NOTES.windows(2) {
            assert!(
                window[1].1 > window[0].1,
                "{} should be above {}",
                window[1].0,
                window[0].0
            );
        }
        for octave in ["3", "4", "5"] {
            let count = NOTES.iter().filter(|(n, _)| n.ends_with(octave)).count();
            assert_eq!(count, 12, "octave {} should hold 12 notes", octave);
        }
    }

    #[test]
    fn unknown_note_is_none() {
        assert_eq!(frequency_of("C6"), None);
        assert_eq!(frequency_of(""), None);
        assert_eq!(index_of("H3"), None);
    }

    #[test]
    fn index_matches_table_order() {
        assert_eq!(index_of("C3"), Some(0));
        assert_eq!(index_of("B5"), Some(35));
        for (i, (name, _)) in NOTES.iter().enumerate() {
            assert_eq!(index_of(name), Some(i));
            assert_eq!(name_of(i), *name);
        }
    }

    #[test]
    fn sharp_detection() {
        assert!(is_sharp("C#3"));
        assert!(!is_sharp("C3"));
    }
}
