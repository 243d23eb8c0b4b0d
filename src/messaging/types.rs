/// Message types for communication between the UI and the audio engine
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EngineMessage {
    /// Start a new voice at the given frequency in Hz.
    Trigger { frequency: f32 },
    SetVolume(f32),
}
