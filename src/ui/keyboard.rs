use egui::{Align2, Color32, CornerRadius, FontId, Rect, Sense, Stroke, StrokeKind};

use crate::core::notes::{self, NOTES};
use crate::core::pressed::PressedKeys;

const WHITE_KEY_COUNT: usize = 21;
const WHITE_KEY_ASPECT_RATIO: f32 = 5.5;
const BLACK_KEY_WIDTH_RATIO: f32 = 0.6;
const BLACK_KEY_HEIGHT_RATIO: f32 = 0.62;

const WHITE_KEY_COLOR: Color32 = Color32::WHITE;
const BLACK_KEY_COLOR: Color32 = Color32::from_rgb(25, 25, 25);
const PRESSED_COLOR: Color32 = Color32::from_rgb(100, 150, 255);

/// Painter-drawn three-octave keyboard. Reports the note whose key was
/// clicked this frame; pressed styling comes from `PressedKeys`.
pub struct KeyboardView<'a> {
    pressed: &'a PressedKeys,
    show_labels: bool,
}

impl<'a> KeyboardView<'a> {
    pub fn new(pressed: &'a PressedKeys) -> Self {
        Self {
            pressed,
            show_labels: false,
        }
    }

    pub fn show_labels(mut self, on: bool) -> Self {
        self.show_labels = on;
        self
    }

    pub fn show(self, ui: &mut egui::Ui) -> Option<&'static str> {
        let available = ui.available_size();
        let white_key_width = (available.x / WHITE_KEY_COUNT as f32).max(12.0);
        let white_key_height =
            (white_key_width * WHITE_KEY_ASPECT_RATIO).min(available.y.max(120.0));
        let size = egui::vec2(
            white_key_width * WHITE_KEY_COUNT as f32,
            white_key_height,
        );

        let (response, painter) = ui.allocate_painter(size, Sense::click());
        let origin = response.rect.min;

        let black_key_width = white_key_width * BLACK_KEY_WIDTH_RATIO;
        let black_key_height = white_key_height * BLACK_KEY_HEIGHT_RATIO;

        // Lay out all 36 keys. A sharp key straddles the boundary after
        // the white key it follows.
        let mut white_rects: Vec<(usize, Rect)> = Vec::new();
        let mut black_rects: Vec<(usize, Rect)> = Vec::new();
        let mut white_count = 0usize;
        for (index, (name, _)) in NOTES.iter().enumerate() {
            if notes::is_sharp(name) {
                let x = origin.x + white_count as f32 * white_key_width - black_key_width / 2.0;
                let rect = Rect::from_min_size(
                    egui::pos2(x, origin.y),
                    egui::vec2(black_key_width, black_key_height),
                );
                black_rects.push((index, rect));
            } else {
                let x = origin.x + white_count as f32 * white_key_width;
                let rect = Rect::from_min_size(
                    egui::pos2(x, origin.y),
                    egui::vec2(white_key_width - 1.0, white_key_height),
                );
                white_rects.push((index, rect));
                white_count += 1;
            }
        }

        // White keys first so the black keys paint on top.
        for (index, rect) in &white_rects {
            let color = if self.pressed.is_pressed(*index) {
                PRESSED_COLOR
            } else {
                WHITE_KEY_COLOR
            };
            painter.rect_filled(*rect, CornerRadius::same(2), color);
            painter.rect_stroke(
                *rect,
                CornerRadius::same(2),
                Stroke::new(1.0, Color32::BLACK),
                StrokeKind::Middle,
            );
            if self.show_labels {
                painter.text(
                    egui::pos2(rect.center().x, rect.max.y - 6.0),
                    Align2::CENTER_BOTTOM,
                    notes::name_of(*index),
                    FontId::proportional(11.0),
                    Color32::DARK_GRAY,
                );
            }
        }

        for (index, rect) in &black_rects {
            let color = if self.pressed.is_pressed(*index) {
                PRESSED_COLOR
            } else {
                BLACK_KEY_COLOR
            };
            painter.rect_filled(*rect, CornerRadius::same(2), color);
            painter.rect_stroke(
                *rect,
                CornerRadius::same(2),
                Stroke::new(1.0, Color32::BLACK),
                StrokeKind::Middle,
            );
            if self.show_labels {
                painter.text(
                    egui::pos2(rect.center().x, rect.max.y - 4.0),
                    Align2::CENTER_BOTTOM,
                    notes::name_of(*index),
                    FontId::proportional(9.0),
                    Color32::LIGHT_GRAY,
                );
            }
        }

        // Hit-test on click: black keys sit on top, so they win.
        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                for (index, rect) in &black_rects {
                    if rect.contains(pos) {
                        return Some(notes::name_of(*index));
                    }
                }
                for (index, rect) in &white_rects {
                    if rect.contains(pos) {
                        return Some(notes::name_of(*index));
                    }
                }
            }
        }

        None
    }
}
