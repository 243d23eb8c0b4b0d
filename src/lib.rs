//! keytone - a virtual three-octave musical keyboard.
//!
//! Clicking on-screen keys or typing on the physical keyboard triggers
//! fire-and-forget triangle-wave voices with a fixed amplitude
//! envelope. The core lives under [`core`]; [`app`] and [`ui`] wrap it
//! in an egui surface and [`audio`] owns the cpal output stream.

pub mod app;
pub mod audio;
pub mod core;
pub mod messaging;
pub mod ui;
