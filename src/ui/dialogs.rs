use crate::app::RoadmapApp;
use crate::ui::theme;
use egui::{Color32, Context, RichText, Window};

/// Render the "Add Goal" dialog.
pub fn show_add_item_dialog(app: &mut RoadmapApp, ctx: &Context) {
    let mut should_close = false;
    Window::new(RichText::new("Add Goal").strong().size(14.0))
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([300.0, 0.0])
        .show(ctx, |ui| {
            ui.visuals_mut().extreme_bg_color = theme::BG_FIELD;
            ui.visuals_mut().faint_bg_color = Color32::TRANSPARENT;
            ui.visuals_mut().striped = false;

            ui.add_space(4.0);

            egui::Grid::new("add_item_grid")
                .num_columns(2)
                .striped(false)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    ui.label(RichText::new("Title").color(theme::TEXT_SECONDARY));
                    ui.add_sized(
                        [220.0, 24.0],
                        egui::TextEdit::singleline(&mut app.new_item_title)
                            .hint_text("Goal title...")
                            .text_color(theme::TEXT_PRIMARY),
                    );
                    ui.end_row();

                    ui.label(RichText::new("Category").color(theme::TEXT_SECONDARY));
                    ui.add_sized(
                        [220.0, 24.0],
                        egui::TextEdit::singleline(&mut app.new_item_category)
                            .hint_text("Optional...")
                            .text_color(theme::TEXT_PRIMARY),
                    );
                    ui.end_row();

                    ui.label("");
                    ui.checkbox(&mut app.new_item_has_dates, "Schedule with dates");
                    ui.end_row();

                    if app.new_item_has_dates {
                        ui.label(RichText::new("Start").color(theme::TEXT_SECONDARY));
                        ui.add(
                            egui_extras::DatePickerButton::new(&mut app.new_item_start_date)
                                .id_salt("dlg_dp_start"),
                        );
                        ui.end_row();

                        ui.label(RichText::new("End").color(theme::TEXT_SECONDARY));
                        ui.add(
                            egui_extras::DatePickerButton::new(&mut app.new_item_end_date)
                                .id_salt("dlg_dp_end"),
                        );
                        ui.end_row();
                    }
                });

            ui.add_space(6.0);
            ui.separator();
            ui.add_space(4.0);

            ui.horizontal(|ui| {
                let create_btn = egui::Button::new(
                    RichText::new("Create").color(Color32::WHITE).size(12.0),
                )
                .fill(theme::ACCENT)
                .rounding(egui::Rounding::same(4.0));
                if ui.add_sized([80.0, 26.0], create_btn).clicked() {
                    app.create_item_from_dialog();
                    should_close = true;
                }
                if ui.add_sized([80.0, 26.0], egui::Button::new("Cancel")).clicked() {
                    should_close = true;
                }
            });
        });

    if should_close {
        app.show_add_item = false;
    }
}

/// Render the "About" dialog.
pub fn show_about_dialog(app: &mut RoadmapApp, ctx: &Context) {
    let mut should_close = false;
    Window::new(RichText::new("About").strong().size(14.0))
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.add_space(4.0);
            ui.label(
                RichText::new("Goal Roadmap")
                    .strong()
                    .size(15.0)
                    .color(theme::TEXT_PRIMARY),
            );
            ui.label(
                RichText::new(format!("Version {}", env!("CARGO_PKG_VERSION")))
                    .size(10.5)
                    .color(theme::TEXT_DIM),
            );
            ui.add_space(6.0);
            ui.label(
                RichText::new(
                    "Plan goals on a timeline: drag bars to move them, \
                     drag the trailing edge to resize, switch between month \
                     and year zoom.",
                )
                .size(11.0)
                .color(theme::TEXT_SECONDARY),
            );
            ui.add_space(8.0);
            if ui.button("Close").clicked() {
                should_close = true;
            }
        });
    if should_close {
        app.show_about = false;
    }
}
