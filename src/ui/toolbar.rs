use crate::app::RoadmapApp;
use crate::model::ViewMode;
use crate::ui::theme;
use egui::{menu, RichText, Ui};

/// Render the top toolbar / menu bar.
pub fn show_toolbar(app: &mut RoadmapApp, ui: &mut Ui) {
    menu::bar(ui, |ui| {
        ui.menu_button(RichText::new("  File  ").font(theme::font_menu()), |ui| {
            if ui.button("  New Roadmap").clicked() {
                app.new_roadmap();
                ui.close_menu();
            }
            if ui.button("  Open...").clicked() {
                app.open_roadmap();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Save          Ctrl+S").clicked() {
                app.save_roadmap();
                ui.close_menu();
            }
            if ui.button("  Save As...").clicked() {
                app.save_roadmap_as();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Export CSV...").clicked() {
                app.export_csv();
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  View  ").font(theme::font_menu()), |ui| {
            ui.label(RichText::new("Zoom").small().weak());
            if ui
                .radio(app.view_mode() == ViewMode::Month, "Month (day cells)")
                .clicked()
            {
                app.set_view_mode(ViewMode::Month);
                ui.close_menu();
            }
            if ui
                .radio(app.view_mode() == ViewMode::Year, "Year (month cells)")
                .clicked()
            {
                app.set_view_mode(ViewMode::Year);
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Jump to Today").clicked() {
                app.anchor_today();
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  Help  ").font(theme::font_menu()), |ui| {
            if ui.button("  About").clicked() {
                app.show_about = true;
                ui.close_menu();
            }
        });

        // Window navigation, right aligned: ◀ [anchor label] ▶
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui
                .button(RichText::new(egui_phosphor::regular::CARET_RIGHT).size(13.0))
                .on_hover_text("Next window")
                .clicked()
            {
                app.shift_anchor(1);
            }
            ui.label(
                RichText::new(app.anchor_label())
                    .font(theme::font_menu())
                    .color(theme::TEXT_PRIMARY),
            );
            if ui
                .button(RichText::new(egui_phosphor::regular::CARET_LEFT).size(13.0))
                .on_hover_text("Previous window")
                .clicked()
            {
                app.shift_anchor(-1);
            }
        });
    });
}
