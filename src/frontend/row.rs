//! Variable list row rendering
//!
//! One row per discovered variable: name and collection on the left,
//! kind badge and value on the right. Colors get a swatch next to the
//! hex value.

use crate::types::{VariableKind, VariableRecord, VariableValue};
use egui::{Color32, Ui};

/// Width reserved for the name column
const NAME_COLUMN_WIDTH: f32 = 220.0;

/// Side length of the color swatch square
const SWATCH_SIZE: f32 = 12.0;

/// Render one variable record as a list row
pub fn render(ui: &mut Ui, record: &VariableRecord) {
    ui.horizontal(|ui| {
        ui.scope(|ui| {
            ui.set_width(NAME_COLUMN_WIDTH);
            ui.vertical(|ui| {
                ui.label(egui::RichText::new(&record.name).strong());
                ui.label(
                    egui::RichText::new(collection_label(record))
                        .small()
                        .color(Color32::GRAY),
                );
            });
        });

        ui.separator();

        ui.label(
            egui::RichText::new(record.kind.to_string())
                .small()
                .color(kind_color(record.kind)),
        );

        render_value(ui, &record.value);

        if record.usage_count > 1 {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(
                    egui::RichText::new(format!("x{}", record.usage_count))
                        .small()
                        .color(Color32::DARK_GRAY),
                )
                .on_hover_text(format!("Used by {} layers", record.usage_count));
            });
        }
    });
}

/// Render the value cell, with a swatch for colors
fn render_value(ui: &mut Ui, value: &VariableValue) {
    if let VariableValue::Color { r, g, b, a } = value {
        let to_byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        let color =
            Color32::from_rgba_unmultiplied(to_byte(*r), to_byte(*g), to_byte(*b), to_byte(*a));
        let (rect, _) = ui.allocate_exact_size(
            egui::vec2(SWATCH_SIZE, SWATCH_SIZE),
            egui::Sense::hover(),
        );
        ui.painter().rect_filled(rect, 2.0, color);
    }
    ui.label(value.to_string());
}

/// Collection label for the row subtitle
fn collection_label(record: &VariableRecord) -> String {
    record
        .collection_name
        .clone()
        .unwrap_or_else(|| crate::types::CollectionEntry::fallback_label(&record.collection_id))
}

/// Accent color for a kind badge
fn kind_color(kind: VariableKind) -> Color32 {
    match kind {
        VariableKind::Boolean => Color32::from_rgb(0xB4, 0x8E, 0xAD),
        VariableKind::String => Color32::from_rgb(0x8F, 0xBC, 0x8F),
        VariableKind::Number => Color32::from_rgb(0x87, 0xAF, 0xD7),
        VariableKind::Color => Color32::from_rgb(0xD7, 0x87, 0x5F),
    }
}
