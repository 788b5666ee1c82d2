use crate::model::RoadmapItem;
use crate::ui::theme;
use egui::{Color32, RichText, Ui};

/// Actions that the item list can request.
pub enum ItemListAction {
    None,
    Select(String),
    Delete(String),
    Add,
}

/// Render the left-side item list panel.
pub fn show_item_list(
    items: &[RoadmapItem],
    selected_item: Option<&str>,
    ui: &mut Ui,
) -> ItemListAction {
    let mut action = ItemListAction::None;

    ui.add_space(2.0);
    ui.horizontal(|ui| {
        ui.label(
            RichText::new("Goals")
                .strong()
                .size(15.0)
                .color(theme::TEXT_PRIMARY),
        );
        ui.add_space(4.0);
        ui.label(
            RichText::new(format!("({})", items.len()))
                .size(11.0)
                .color(theme::TEXT_DIM),
        );
    });
    ui.add_space(4.0);

    let btn = egui::Button::new(
        RichText::new("＋  Add Goal").color(Color32::WHITE).size(12.0),
    )
    .fill(theme::ACCENT)
    .rounding(egui::Rounding::same(5.0));
    if ui.add_sized([ui.available_width(), 30.0], btn).clicked() {
        action = ItemListAction::Add;
    }

    ui.add_space(6.0);
    ui.separator();
    ui.add_space(2.0);

    egui::ScrollArea::vertical()
        .auto_shrink([false, true])
        .show(ui, |ui| {
            for item in items {
                let is_selected = selected_item == Some(item.id.as_str());

                let row = ui.horizontal(|ui| {
                    // Color dot
                    let (dot, _) =
                        ui.allocate_exact_size(egui::vec2(10.0, 10.0), egui::Sense::hover());
                    ui.painter()
                        .circle_filled(dot.center(), 4.0, item.color);

                    ui.vertical(|ui| {
                        let title_color = if is_selected {
                            theme::TEXT_PRIMARY
                        } else {
                            theme::TEXT_SECONDARY
                        };
                        let mut title = RichText::new(&item.title).size(12.0).color(title_color);
                        if is_selected {
                            title = title.strong();
                        }
                        let title_response = ui
                            .add(egui::Label::new(title).sense(egui::Sense::click()))
                            .on_hover_cursor(egui::CursorIcon::PointingHand);
                        if title_response.clicked() {
                            action = ItemListAction::Select(item.id.clone());
                        }

                        let sub = match (item.start_date, item.end_date) {
                            (Some(start), Some(end)) => format!(
                                "{} → {} · {}%",
                                start.format("%d/%m"),
                                end.format("%d/%m"),
                                item.progress
                            ),
                            _ => format!("row {} · {}%", item.row + 1, item.progress),
                        };
                        ui.label(RichText::new(sub).size(9.5).color(theme::TEXT_DIM));
                    });

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let del = ui.add(
                            egui::Button::new(
                                RichText::new(egui_phosphor::regular::TRASH)
                                    .size(11.0)
                                    .color(theme::TEXT_DIM),
                            )
                            .frame(false),
                        );
                        if del.on_hover_text("Delete item").clicked() {
                            action = ItemListAction::Delete(item.id.clone());
                        }
                    });
                });

                if is_selected {
                    ui.painter().rect_filled(
                        row.response.rect.expand(2.0),
                        egui::Rounding::same(4.0),
                        theme::BG_SELECTED,
                    );
                }

                ui.add_space(2.0);
                ui.separator();
                ui.add_space(2.0);
            }

            if items.is_empty() {
                ui.add_space(8.0);
                ui.label(
                    RichText::new("No goals yet — add one to start the roadmap")
                        .size(10.5)
                        .color(theme::TEXT_DIM),
                );
            }
        });

    action
}
