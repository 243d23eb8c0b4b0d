use crate::core::voice::Voice;

/// The voice scheduler. Owns every live voice and mixes them down for
/// the audio callback. There is no polyphony cap: voices are short-lived
/// and drop themselves at their stop deadline, so the list stays small
/// in practice.
pub struct Engine {
    pub sample_rate: f32,
    pub volume: f32,
    voices: Vec<Voice>,
}

impl Engine {
    pub fn new(sample_rate: f32) -> Self {
        Engine {
            sample_rate,
            volume: 1.0,
            voices: Vec::new(),
        }
    }

    /// Start a new independent voice at the given frequency. Every call
    /// spawns a fresh voice, including rapid retriggers of the same
    /// note; nothing is suppressed, merged, or queued.
    pub fn trigger(&mut self, frequency: f32) {
        self.voices.push(Voice::new(frequency, self.sample_rate));
    }

    /// Generate one output sample: sum all live voices, drop the ones
    /// past their deadline, apply master volume. Called from the audio
    /// callback only.
    pub fn get_sample(&mut self) -> f32 {
        let mut sample = 0.0;
        for voice in &mut self.voices {
            sample += voice.next_sample();
        }
        self.voices.retain(|voice| !voice.is_finished());

        sample * self.volume
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    pub fn voice_count(&self) -> usize {
        self.voices.len()
    }

    pub fn voice_frequencies(&self) -> Vec<f32> {
        self.voices.iter().map(|v| v.frequency).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::voice::VOICE_SECS;

    const SAMPLE_RATE: f32 = 44100.0;

    #[test]
    fn trigger_starts_a_voice_at_the_exact_frequency() {
        let mut engine = Engine::new(SAMPLE_RATE);
        engine.trigger(440.0);
        assert_eq!(engine.voice_count(), 1);
        assert_eq!(engine.voice_frequencies(), vec![440.0]);
    }

    #[test]
    fn rapid_retriggers_are_independent_voices() {
        let mut engine = Engine::new(SAMPLE_RATE);
        engine.trigger(261.63);
        // 50ms of audio between the two triggers.
        for _ in 0..(SAMPLE_RATE * 0.05) as usize {
            engine.get_sample();
        }
        engine.trigger(261.63);
        assert_eq!(engine.voice_count(), 2);
        assert_eq!(engine.voice_frequencies(), vec![261.63, 261.63]);
    }

    #[test]
    fn distinct_notes_start_in_call_order() {
        let mut engine = Engine::new(SAMPLE_RATE);
        engine.trigger(130.81);
        engine.trigger(440.0);
        assert_eq!(engine.voice_frequencies(), vec![130.81, 440.0]);
    }

    #[test]
    fn finished_voices_are_dropped() {
        let mut engine = Engine::new(SAMPLE_RATE);
        engine.trigger(440.0);
        let samples_past_deadline = (VOICE_SECS * SAMPLE_RATE) as usize + 1;
        for _ in 0..samples_past_deadline {
            engine.get_sample();
        }
        assert_eq!(engine.voice_count(), 0);
    }

    #[test]
    fn no_polyphony_cap() {
        let mut engine = Engine::new(SAMPLE_RATE);
        for _ in 0..64 {
            engine.trigger(440.0);
        }
        assert_eq!(engine.voice_count(), 64);
    }

    #[test]
    fn silent_when_idle() {
        let mut engine = Engine::new(SAMPLE_RATE);
        assert_eq!(engine.get_sample(), 0.0);
    }

    #[test]
    fn volume_is_clamped() {
        let mut engine = Engine::new(SAMPLE_RATE);
        engine.set_volume(2.0);
        assert_eq!(engine.volume, 1.0);
        engine.set_volume(-1.0);
        assert_eq!(engine.volume, 0.0);
    }
}
