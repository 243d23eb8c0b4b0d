use anyhow::Result;
use eframe::egui;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::PathBuf;
use std::sync::{Arc, RwLock};
use std::time::Instant;

use crate::audio::{self, AudioOutput};
use crate::core::notes;
use crate::core::pressed::PressedKeys;
use crate::core::router::{route, RawInput, Routed};
use crate::core::Engine;
use crate::messaging::{EngineMessage, MessageBus};
use crate::ui::KeyboardView;

// Main app state
pub struct KeytoneApp {
    engine: Arc<RwLock<Engine>>,
    message_bus: MessageBus,
    audio: Option<AudioOutput>,
    audio_failed: bool,
    pressed: PressedKeys,
    current_tab: Tab,
    available_output_devices: Vec<String>,
    app_settings: AppSettings,
    should_exit: bool,
}

#[derive(PartialEq)]
enum Tab {
    Keyboard,
    KeyMap,
    Audio,
}

impl eframe::App for KeytoneApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Route physical keyboard input before drawing, then expire any
        // pending visual clears.
        self.handle_keyboard_events(ctx);
        self.pressed.tick(Instant::now());

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Keytone");
                ui.label("🎹");

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("❌ Exit").clicked() {
                        self.should_exit = true;
                    }
                    let mut show_labels = self.app_settings.show_labels;
                    if ui.checkbox(&mut show_labels, "Note labels").changed() {
                        self.app_settings.show_labels = show_labels;
                        self.save_app_settings().ok();
                    }
                });
            });

            ui.add_space(8.0);

            ui.horizontal(|ui| {
                ui.selectable_value(&mut self.current_tab, Tab::Keyboard, "Keyboard");
                ui.selectable_value(&mut self.current_tab, Tab::KeyMap, "Key Map");
                ui.selectable_value(&mut self.current_tab, Tab::Audio, "Audio Settings");
            });

            ui.separator();

            match self.current_tab {
                Tab::Keyboard => self.render_keyboard(ui),
                Tab::KeyMap => self.render_key_map(ui),
                Tab::Audio => self.render_audio_settings(ui),
            }
        });

        // Hand queued triggers to the engine under the write lock.
        self.message_bus.process_messages();

        if self.should_exit {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }

        // Input events repaint on their own; an extra repaint is only
        // needed for the nearest pending visual clear.
        if let Some(deadline) = self.pressed.next_deadline() {
            ctx.request_repaint_after(deadline.saturating_duration_since(Instant::now()));
        }
    }
}

impl KeytoneApp {
    pub fn new() -> Result<Self> {
        println!("[APP] Creating KeytoneApp instance");

        // The engine starts at a nominal rate; the real rate comes from
        // the device config when the stream is lazily started.
        let engine = Arc::new(RwLock::new(Engine::new(44100.0)));
        let message_bus = MessageBus::new(Arc::clone(&engine));

        let app_settings = Self::load_app_settings().unwrap_or_default();
        message_bus.send(EngineMessage::SetVolume(app_settings.volume)).ok();
        message_bus.process_messages();

        let available_output_devices = audio::output_device_names();
        println!("[APP] Found {} output devices", available_output_devices.len());

        Ok(KeytoneApp {
            engine,
            message_bus,
            audio: None,
            audio_failed: false,
            pressed: PressedKeys::new(),
            current_tab: Tab::Keyboard,
            available_output_devices,
            app_settings,
            should_exit: false,
        })
    }

    /// Start the output stream if it is not running yet. Idempotent: at
    /// most one stream is ever created, and a startup failure is final
    /// for the session.
    fn ensure_audio(&mut self) {
        self.ensure_audio_with(AudioOutput::start);
    }

    fn ensure_audio_with<F>(&mut self, start: F)
    where
        F: FnOnce(Arc<RwLock<Engine>>, Option<&str>) -> Result<AudioOutput>,
    {
        if self.audio.is_some() || self.audio_failed {
            return;
        }

        match start(
            Arc::clone(&self.engine),
            self.app_settings.selected_output_device.as_deref(),
        ) {
            Ok(output) => self.audio = Some(output),
            Err(e) => {
                eprintln!("[APP] Failed to start audio output: {}", e);
                self.audio_failed = true;
            }
        }
    }

    fn set_preferred_device(&mut self, name: Option<String>) {
        // Takes effect when the stream is next started.
        self.app_settings.selected_output_device = name;
    }

    /// Apply one routed input: audio first, visual second. A missing or
    /// failed audio engine silences the trigger but the key still
    /// lights up.
    fn apply_routed(&mut self, routed: Routed) {
        let now = Instant::now();
        match routed {
            Routed::Trigger {
                note,
                frequency,
                clear_after,
            } => {
                self.ensure_audio();
                if self.audio.is_some() {
                    self.message_bus
                        .send(EngineMessage::Trigger { frequency })
                        .ok();
                }

                if let Some(index) = notes::index_of(note) {
                    self.pressed.press(index);
                    if let Some(delay) = clear_after {
                        self.pressed.schedule_clear(index, delay, now);
                    }
                }
            }
            Routed::ReleaseVisual { note, clear_after } => {
                if let Some(index) = notes::index_of(note) {
                    self.pressed.schedule_clear(index, clear_after, now);
                }
            }
        }
    }

    fn handle_keyboard_events(&mut self, ctx: &egui::Context) {
        let events = ctx.input(|i| i.events.clone());
        for event in events {
            if let egui::Event::Key { key, pressed, .. } = event {
                // Key-repeat events arrive here as fresh presses and
                // each one spawns its own voice.
                let Some(identifier) = key_identifier(key) else {
                    continue;
                };
                let raw = if pressed {
                    RawInput::KeyDown { key: identifier }
                } else {
                    RawInput::KeyUp { key: identifier }
                };
                if let Some(routed) = route(raw) {
                    self.apply_routed(routed);
                }
            }
        }
    }

    fn render_keyboard(&mut self, ui: &mut egui::Ui) {
        ui.add_space(10.0);
        let clicked = KeyboardView::new(&self.pressed)
            .show_labels(self.app_settings.show_labels)
            .show(ui);

        if let Some(note) = clicked {
            if let Some(routed) = route(RawInput::PointerDown { note }) {
                self.apply_routed(routed);
            }
        }

        if self.audio_failed {
            ui.add_space(6.0);
            ui.colored_label(
                egui::Color32::LIGHT_RED,
                "Audio output unavailable - keys light up but stay silent",
            );
        }
    }

    fn render_key_map(&mut self, ui: &mut egui::Ui) {
        ui.heading("Keyboard Bindings");
        ui.add_space(4.0);

        egui::Grid::new("key_map_grid")
            .striped(true)
            .min_col_width(90.0)
            .show(ui, |ui| {
                ui.strong("Octave 3");
                ui.strong("Octave 4");
                ui.strong("Octave 5");
                ui.end_row();

                for row in 0..12 {
                    for octave in 0..3 {
                        let index = octave * 12 + row;
                        let note = notes::name_of(index);
                        let key = crate::core::keymap::key_for_note(note).unwrap_or("-");
                        ui.label(format!("{}  →  {}", key, note));
                    }
                    ui.end_row();
                }
            });
    }

    fn render_audio_settings(&mut self, ui: &mut egui::Ui) {
        ui.heading("Audio Settings");

        match (&self.audio, self.audio_failed) {
            (Some(output), _) => {
                ui.label(format!(
                    "Audio engine running on '{}' at {} Hz",
                    output.device_name, output.sample_rate
                ));
            }
            (None, true) => {
                ui.colored_label(egui::Color32::LIGHT_RED, "Audio engine failed to start");
            }
            (None, false) => {
                ui.label("Audio engine not started yet - it starts on the first key press");
            }
        }

        ui.add_space(8.0);

        ui.group(|ui| {
            ui.label("Output Device:");

            let using_default = self.app_settings.selected_output_device.is_none();
            if ui.radio(using_default, "System default").clicked() && !using_default {
                self.set_preferred_device(None);
                self.save_app_settings().ok();
            }

            for i in 0..self.available_output_devices.len() {
                let name = self.available_output_devices[i].clone();
                let selected = self.app_settings.selected_output_device.as_deref() == Some(name.as_str());
                if ui.radio(selected, &name).clicked() && !selected {
                    self.set_preferred_device(Some(name));
                    self.save_app_settings().ok();
                }
            }

            if ui.button("Refresh Devices").clicked() {
                self.available_output_devices = audio::output_device_names();
            }
        });

        ui.horizontal(|ui| {
            ui.label("Master Volume:");
            let mut volume = self.app_settings.volume;
            if ui.add(egui::Slider::new(&mut volume, 0.0..=1.0)).changed() {
                self.app_settings.volume = volume;
                self.message_bus.send(EngineMessage::SetVolume(volume)).ok();
                self.save_app_settings().ok();
            }
        });
    }

    fn save_app_settings(&self) -> Result<()> {
        let settings_dir = Self::get_settings_dir()?;
        fs::create_dir_all(&settings_dir)?;

        let path = settings_dir.join("settings.json");
        let file = File::create(path)?;

        serde_json::to_writer_pretty(file, &self.app_settings)?;
        Ok(())
    }

    fn get_settings_dir() -> Result<PathBuf> {
        let mut path = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        path.push("keytone");
        Ok(path)
    }

    fn load_app_settings() -> Result<AppSettings> {
        let path = Self::get_settings_dir()?.join("settings.json");
        if path.exists() {
            let file = File::open(path)?;
            Ok(serde_json::from_reader(file)?)
        } else {
            Ok(AppSettings::default())
        }
    }
}

/// Map an egui key to the identifier the binding table uses. Everything
/// the table could bind is mapped; the router ignores the rest.
fn key_identifier(key: egui::Key) -> Option<&'static str> {
    use egui::Key;
    let identifier = match key {
        Key::A => "a",
        Key::B => "b",
        Key::C => "c",
        Key::D => "d",
        Key::E => "e",
        Key::F => "f",
        Key::G => "g",
        Key::H => "h",
        Key::I => "i",
        Key::J => "j",
        Key::K => "k",
        Key::L => "l",
        Key::M => "m",
        Key::N => "n",
        Key::O => "o",
        Key::P => "p",
        Key::Q => "q",
        Key::R => "r",
        Key::S => "s",
        Key::T => "t",
        Key::U => "u",
        Key::V => "v",
        Key::W => "w",
        Key::X => "x",
        Key::Y => "y",
        Key::Z => "z",
        Key::Num0 => "0",
        Key::Num1 => "1",
        Key::Num2 => "2",
        Key::Num3 => "3",
        Key::Num4 => "4",
        Key::Num5 => "5",
        Key::Num6 => "6",
        Key::Num7 => "7",
        Key::Num8 => "8",
        Key::Num9 => "9",
        Key::OpenBracket => "[",
        Key::CloseBracket => "]",
        Key::Backslash => "\\",
        Key::Semicolon => ";",
        Key::Quote => "'",
        Key::Equals => "=",
        Key::Enter => "enter",
        _ => return None,
    };
    Some(identifier)
}

// App settings structure
#[derive(Debug, Clone, Serialize, Deserialize)]
struct AppSettings {
    volume: f32,
    show_labels: bool,
    selected_output_device: Option<String>,
}

impl Default for AppSettings {
    fn default() -> Self {
        AppSettings {
            volume: 1.0,
            show_labels: false,
            selected_output_device: None,
        }
    }
}
