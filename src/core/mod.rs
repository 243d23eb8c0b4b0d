pub mod engine;
pub mod keymap;
pub mod notes;
pub mod pressed;
pub mod router;
pub mod voice;

pub use engine::Engine;
