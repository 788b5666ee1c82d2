use crate::model::sync::ItemEdit;
use crate::model::{coords, GridAnchor, RoadmapItem, ViewMode};
use crate::ui::theme;
use egui::{Color32, RichText, Ui};

/// Actions the editor can request.
pub enum EditorAction {
    None,
    /// A field changed; the host routes the edit through the sync pass.
    Edited(ItemEdit),
}

/// Render an inline editor for the selected roadmap item.
///
/// The editor never writes to the item: every change is staged on an
/// `ItemEdit` and handed back, so direct date edits reach the grid through
/// the same synchronization path as drag and resize commits.
pub fn show_item_editor(
    item: &RoadmapItem,
    mode: ViewMode,
    anchor: GridAnchor,
    ui: &mut Ui,
) -> EditorAction {
    let mut action = EditorAction::None;
    let mut edit = ItemEdit::from_item(item);
    let mut changed = false;

    ui.add_space(6.0);
    ui.horizontal(|ui| {
        ui.label(
            RichText::new("Edit Item")
                .strong()
                .size(13.0)
                .color(theme::TEXT_PRIMARY),
        );
    });
    ui.add_space(4.0);

    let frame = egui::Frame {
        fill: theme::BG_DARK,
        rounding: egui::Rounding::same(6.0),
        inner_margin: egui::Margin::same(8.0),
        outer_margin: egui::Margin::ZERO,
        stroke: egui::Stroke::new(1.0, theme::BORDER_SUBTLE),
        shadow: egui::epaint::Shadow::NONE,
    };

    frame.show(ui, |ui| {
        ui.spacing_mut().item_spacing.y = 6.0;
        ui.visuals_mut().extreme_bg_color = theme::BG_FIELD;

        // ── Title ─────────────────────────────────────────────────────
        ui.label(
            RichText::new("Title")
                .size(10.0)
                .color(theme::TEXT_DIM)
                .strong(),
        );
        let title_edit = ui.add_sized(
            [ui.available_width(), 24.0],
            egui::TextEdit::singleline(&mut edit.title)
                .font(egui::FontId::proportional(12.0))
                .text_color(theme::TEXT_PRIMARY),
        );
        if title_edit.changed() {
            changed = true;
        }

        ui.add_space(2.0);

        // ── Dates ─────────────────────────────────────────────────────
        ui.label(
            RichText::new("Dates")
                .size(10.0)
                .color(theme::TEXT_DIM)
                .strong(),
        );
        if let (Some(mut start_date), Some(mut end_date)) = (edit.start_date, edit.end_date) {
            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.label(RichText::new("Start").size(10.0).color(theme::TEXT_DIM));
                    let resp = ui.add(
                        egui_extras::DatePickerButton::new(&mut start_date).id_salt("dp_start"),
                    );
                    if resp.changed() {
                        if start_date > end_date {
                            end_date = start_date;
                        }
                        changed = true;
                    }
                });

                ui.add_space(8.0);

                ui.vertical(|ui| {
                    ui.label(RichText::new("End").size(10.0).color(theme::TEXT_DIM));
                    let resp = ui
                        .add(egui_extras::DatePickerButton::new(&mut end_date).id_salt("dp_end"));
                    if resp.changed() {
                        if end_date < start_date {
                            start_date = end_date;
                        }
                        changed = true;
                    }
                });
            });
            edit.start_date = Some(start_date);
            edit.end_date = Some(end_date);

            if ui
                .add(
                    egui::Button::new(
                        RichText::new("Remove dates").size(10.0).color(theme::TEXT_DIM),
                    )
                    .frame(false),
                )
                .clicked()
            {
                edit.start_date = None;
                edit.end_date = None;
                changed = true;
            }
        } else {
            ui.label(
                RichText::new("No dates — grid position is the source of truth")
                    .size(9.5)
                    .color(theme::TEXT_DIM),
            );
            if ui
                .button(RichText::new("Schedule from grid position").size(11.0))
                .clicked()
            {
                let (start_date, end_date) =
                    coords::date_range_of(item.start, item.duration, mode, anchor);
                edit.start_date = Some(start_date);
                edit.end_date = Some(end_date);
                changed = true;
            }
        }

        ui.add_space(2.0);

        // ── Progress ──────────────────────────────────────────────────
        ui.label(
            RichText::new("Progress")
                .size(10.0)
                .color(theme::TEXT_DIM)
                .strong(),
        );
        ui.horizontal(|ui| {
            let slider = egui::Slider::new(&mut edit.progress, 0..=100)
                .custom_formatter(|v, _| format!("{:.0}%", v))
                .custom_parser(|s| s.trim().trim_end_matches('%').parse::<f64>().ok());
            let resp = ui.add_sized([ui.available_width(), 20.0], slider);
            if resp.changed() {
                changed = true;
            }
        });

        ui.add_space(2.0);

        // ── Description ───────────────────────────────────────────────
        ui.label(
            RichText::new("Notes")
                .size(10.0)
                .color(theme::TEXT_DIM)
                .strong(),
        );
        let notes_resp = ui.add_sized(
            [ui.available_width(), 60.0],
            egui::TextEdit::multiline(&mut edit.description)
                .font(egui::FontId::proportional(11.0))
                .text_color(theme::TEXT_SECONDARY)
                .hint_text("Add notes or description..."),
        );
        if notes_resp.changed() {
            changed = true;
        }

        ui.add_space(2.0);

        // ── Category ──────────────────────────────────────────────────
        ui.label(
            RichText::new("Category")
                .size(10.0)
                .color(theme::TEXT_DIM)
                .strong(),
        );
        let mut category = edit.category.clone().unwrap_or_default();
        let cat_resp = ui.add_sized(
            [ui.available_width(), 22.0],
            egui::TextEdit::singleline(&mut category)
                .font(egui::FontId::proportional(11.0))
                .hint_text("e.g. Career, Health..."),
        );
        if cat_resp.changed() {
            edit.category = if category.trim().is_empty() {
                None
            } else {
                Some(category.clone())
            };
            changed = true;
        }

        ui.add_space(2.0);

        // ── Color ─────────────────────────────────────────────────────
        ui.label(
            RichText::new("Color")
                .size(10.0)
                .color(theme::TEXT_DIM)
                .strong(),
        );
        ui.horizontal_wrapped(|ui| {
            ui.spacing_mut().item_spacing = egui::vec2(4.0, 4.0);
            for color in theme::ITEM_COLORS {
                let is_current = edit.color == *color;
                let size = if is_current { 20.0 } else { 16.0 };
                let (rect, resp) =
                    ui.allocate_exact_size(egui::vec2(size, size), egui::Sense::click());

                ui.painter()
                    .rect_filled(rect, egui::Rounding::same(3.0), *color);
                if is_current {
                    ui.painter().rect_stroke(
                        rect.expand(1.0),
                        egui::Rounding::same(4.0),
                        egui::Stroke::new(2.0, Color32::WHITE),
                    );
                }

                if resp.on_hover_text("Click to set color").clicked() {
                    edit.color = *color;
                    changed = true;
                }
            }
        });
    });

    if changed {
        action = EditorAction::Edited(edit);
    }
    action
}
