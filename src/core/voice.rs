//! A single fire-and-forget voice: triangle wave at a fixed frequency
//! with the keytone amplitude envelope.
//!
//! Envelope, all times relative to the trigger: silence at 0, linear
//! attack to 0.5 by 10ms, exponential decay to 0.1 by 0.5s, exponential
//! decay to 0.01 by 1.5s, hard stop at exactly 1.5s.

/// Attack duration in seconds.
pub const ATTACK_SECS: f32 = 0.01;
/// Peak amplitude reached at the end of the attack.
pub const PEAK_LEVEL: f32 = 0.5;
/// Level at the end of the first decay segment.
pub const DECAY_MID_LEVEL: f32 = 0.1;
/// End of the first decay segment in seconds.
pub const DECAY_MID_SECS: f32 = 0.5;
/// Floor the second decay segment asymptotes toward.
pub const FLOOR_LEVEL: f32 = 0.01;
/// Hard stop deadline: the voice is dead at this time regardless of
/// where the envelope is.
pub const VOICE_SECS: f32 = 1.5;

/// Envelope amplitude at time `t` seconds after the trigger.
pub fn amplitude_at(t: f32) -> f32 {
    if t < 0.0 || t >= VOICE_SECS {
        0.0
    } else if t < ATTACK_SECS {
        PEAK_LEVEL * t / ATTACK_SECS
    } else if t < DECAY_MID_SECS {
        let progress = (t - ATTACK_SECS) / (DECAY_MID_SECS - ATTACK_SECS);
        PEAK_LEVEL * (DECAY_MID_LEVEL / PEAK_LEVEL).powf(progress)
    } else {
        let progress = (t - DECAY_MID_SECS) / (VOICE_SECS - DECAY_MID_SECS);
        DECAY_MID_LEVEL * (FLOOR_LEVEL / DECAY_MID_LEVEL).powf(progress)
    }
}

/// One independent sound instance. Once started it runs to completion;
/// nothing can cancel, retarget, or query it beyond `is_finished`.
pub struct Voice {
    pub frequency: f32,
    phase: f32,
    phase_increment: f32,
    seconds_per_sample: f32,
    // Elapsed time is counted in whole samples so the stop deadline
    // lands exactly, without accumulated float drift.
    samples_elapsed: u32,
    samples_total: u32,
}

impl Voice {
    pub fn new(frequency: f32, sample_rate: f32) -> Self {
        Self {
            frequency,
            phase: 0.0,
            phase_increment: frequency / sample_rate,
            seconds_per_sample: 1.0 / sample_rate,
            samples_elapsed: 0,
            samples_total: (VOICE_SECS * sample_rate) as u32,
        }
    }

    /// Produce the next sample and advance the voice by one sample period.
    pub fn next_sample(&mut self) -> f32 {
        if self.is_finished() {
            return 0.0;
        }

        let elapsed_secs = self.samples_elapsed as f32 * self.seconds_per_sample;
        let sample = triangle(self.phase) * amplitude_at(elapsed_secs);

        self.phase = (self.phase + self.phase_increment) % 1.0;
        self.samples_elapsed += 1;

        sample
    }

    /// True once the 1.5s stop deadline has passed.
    pub fn is_finished(&self) -> bool {
        self.samples_elapsed >= self.samples_total
    }
}

/// Triangle waveform over a 0..1 phase.
fn triangle(phase: f32) -> f32 {
    if phase < 0.25 {
        4.0 * phase
    } else if phase < 0.75 {
        2.0 - 4.0 * phase
    } else {
        -4.0 + 4.0 * phase
    }
}
