pub mod keyboard;

pub use keyboard::KeyboardView;
