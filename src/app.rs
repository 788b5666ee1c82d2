use chrono::NaiveDate;
use std::path::PathBuf;

use crate::model::{coords, sync, GridAnchor, Roadmap, RoadmapItem, ViewMode};
use crate::ui;
use crate::ui::roadmap_grid::GridState;

/// Main application state: the host that owns the item array.
///
/// The grid and the editor never mutate items — they propose replacement
/// arrays, and everything funnels through `apply_items`, which updates the
/// in-memory roadmap first and then fires a save it does not wait on.
pub struct RoadmapApp {
    pub roadmap: Roadmap,
    pub file_path: Option<PathBuf>,
    pub selected_item: Option<String>,

    view_mode: ViewMode,
    anchor: GridAnchor,
    pub grid: GridState,

    // Dialog state
    pub show_add_item: bool,
    pub show_about: bool,
    pub new_item_title: String,
    pub new_item_category: String,
    pub new_item_has_dates: bool,
    pub new_item_start_date: NaiveDate,
    pub new_item_end_date: NaiveDate,

    // Status message
    pub status_message: String,
}

impl RoadmapApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        // Register Phosphor icon font as a fallback so icons render inline with text
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        let anchor = GridAnchor::today();
        let view_mode = ViewMode::Month;
        let roadmap = Self::sample_roadmap(anchor, view_mode);

        let today = chrono::Local::now().date_naive();

        Self {
            roadmap,
            file_path: None,
            selected_item: None,
            view_mode,
            anchor,
            grid: GridState::default(),
            show_add_item: false,
            show_about: false,
            new_item_title: String::new(),
            new_item_category: String::new(),
            new_item_has_dates: true,
            new_item_start_date: today,
            new_item_end_date: today + chrono::Duration::days(7),
            status_message: "Ready".to_string(),
        }
    }

    /// Generate a sample roadmap for demonstration.
    fn sample_roadmap(anchor: GridAnchor, view_mode: ViewMode) -> Roadmap {
        let origin = anchor.origin(ViewMode::Month);
        let day = |d: u32| origin + chrono::Duration::days(d as i64 - 1);

        let mut roadmap = Roadmap::new("My Goals");

        let dated = |title: &str, category: &str, row: u32, from: u32, to: u32, progress: u8| {
            let mut item = RoadmapItem::new(title, row, 0, 1);
            item.category = Some(category.to_string());
            item.color = ui::theme::item_color(row as usize);
            item.start_date = Some(day(from));
            item.end_date = Some(day(to));
            item.progress = progress;
            item
        };

        let mut undated = RoadmapItem::new("Meditation streak", 4, 0, 14);
        undated.category = Some("Health".to_string());
        undated.color = ui::theme::item_color(4);
        undated.progress = 50;

        roadmap.items = vec![
            dated("Morning runs", "Health", 0, 2, 8, 40),
            dated("Read The Rust Book", "Learning", 1, 5, 19, 25),
            dated("Portfolio website", "Career", 2, 10, 24, 10),
            dated("Budget review", "Finance", 3, 20, 22, 0),
            undated,
        ];
        roadmap.items = sync::sync_items(&roadmap.items, view_mode, anchor);
        roadmap
    }

    // --- View window ---

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn anchor_label(&self) -> String {
        self.anchor.label(self.view_mode)
    }

    /// Switch zoom level. Dates are the source of truth across the switch,
    /// so a full synchronization pass runs before the next frame renders.
    pub fn set_view_mode(&mut self, mode: ViewMode) {
        if self.view_mode == mode {
            return;
        }
        self.view_mode = mode;
        self.resync_items();
        self.status_message = match mode {
            ViewMode::Month => "Month view".to_string(),
            ViewMode::Year => "Year view".to_string(),
        };
    }

    /// Move the visible window backward or forward one month/year.
    pub fn shift_anchor(&mut self, delta: i32) {
        self.anchor = if delta < 0 {
            self.anchor.prev(self.view_mode)
        } else {
            self.anchor.next(self.view_mode)
        };
        self.resync_items();
        self.status_message = self.anchor_label();
    }

    pub fn anchor_today(&mut self) {
        self.anchor = GridAnchor::today();
        self.resync_items();
        self.status_message = self.anchor_label();
    }

    fn resync_items(&mut self) {
        self.roadmap.items = sync::sync_items(&self.roadmap.items, self.view_mode, self.anchor);
    }

    // --- Item array ownership ---

    /// Accept a replacement item array proposed by the grid or the editor.
    ///
    /// The in-memory roadmap updates unconditionally; the follow-up save is
    /// fire-and-forget, so a failed write shows up in the status bar without
    /// rolling the items back.
    pub fn apply_items(&mut self, items: Vec<RoadmapItem>) {
        self.roadmap.items = items;
        self.roadmap.touch();
        self.autosave();
    }

    fn autosave(&mut self) {
        if let Some(path) = self.file_path.clone() {
            self.promote_ids();
            if let Err(e) = crate::io::save_roadmap(&self.roadmap, &path) {
                self.status_message = format!("Autosave failed: {}", e);
            }
        }
    }

    /// Promote provisional ids without losing track of the selected item.
    fn promote_ids(&mut self) {
        let selected_index = self
            .selected_item
            .as_deref()
            .and_then(|id| self.roadmap.items.iter().position(|item| item.id == id));
        self.roadmap.promote_provisional_ids();
        if let Some(index) = selected_index {
            self.selected_item = Some(self.roadmap.items[index].id.clone());
        }
    }

    // --- File operations ---

    pub fn new_roadmap(&mut self) {
        self.roadmap = Roadmap::default();
        self.file_path = None;
        self.selected_item = None;
        self.grid.cancel_sessions();
        self.status_message = "New roadmap created".to_string();
    }

    pub fn open_roadmap(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Roadmap", &["roadmap.json", "json"])
            .pick_file()
        {
            match crate::io::load_roadmap(&path) {
                Ok(roadmap) => {
                    self.roadmap = roadmap;
                    self.file_path = Some(path);
                    self.selected_item = None;
                    self.grid.cancel_sessions();
                    self.resync_items();
                    self.status_message = "Roadmap loaded".to_string();
                }
                Err(e) => {
                    self.status_message = format!("Error loading: {}", e);
                }
            }
        }
    }

    pub fn save_roadmap(&mut self) {
        if let Some(ref path) = self.file_path.clone() {
            self.promote_ids();
            self.roadmap.touch();
            match crate::io::save_roadmap(&self.roadmap, path) {
                Ok(()) => self.status_message = "Roadmap saved".to_string(),
                Err(e) => self.status_message = format!("Error saving: {}", e),
            }
        } else {
            self.save_roadmap_as();
        }
    }

    pub fn save_roadmap_as(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Roadmap", &["roadmap.json", "json"])
            .set_file_name(format!("{}.roadmap.json", self.roadmap.name))
            .save_file()
        {
            self.file_path = Some(path.clone());
            self.promote_ids();
            self.roadmap.touch();
            match crate::io::save_roadmap(&self.roadmap, &path) {
                Ok(()) => self.status_message = "Roadmap saved".to_string(),
                Err(e) => self.status_message = format!("Error saving: {}", e),
            }
        }
    }

    pub fn export_csv(&mut self) {
        if self.roadmap.items.is_empty() {
            self.status_message = "Nothing to export — roadmap has no items".to_string();
            return;
        }

        let default_name = format!("{}.csv", self.roadmap.name);
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .set_file_name(&default_name)
            .save_file()
        {
            match crate::io::csv_export::export_csv(&self.roadmap.items, &path) {
                Ok(count) => {
                    self.status_message = format!("Exported {} items to CSV", count);
                }
                Err(e) => {
                    self.status_message = format!("CSV export failed: {}", e);
                }
            }
        }
    }

    // --- Item operations ---

    pub fn create_item_from_dialog(&mut self) {
        let title = if self.new_item_title.is_empty() {
            "New Goal".to_string()
        } else {
            self.new_item_title.clone()
        };

        let row = self.roadmap.items.len() as u32;
        let mut item = RoadmapItem::new_provisional(title, row);
        item.color = ui::theme::item_color(self.roadmap.items.len());
        let category = self.new_item_category.trim();
        if !category.is_empty() {
            item.category = Some(category.to_string());
        }

        if self.new_item_has_dates {
            let start = self.new_item_start_date;
            let end = self.new_item_end_date.max(start);
            item.start_date = Some(start);
            item.end_date = Some(end);
            item.duration = coords::duration_of(start, end, self.view_mode);
            if let Some(cell) = coords::position_of(start, self.view_mode, self.anchor) {
                item.start = cell;
            }
        }

        self.selected_item = Some(item.id.clone());
        self.roadmap.items.push(item);
        self.roadmap.touch();
        self.autosave();
        self.reset_dialog_fields();
        self.status_message = "Goal added".to_string();
    }

    pub fn delete_item(&mut self, id: &str) {
        self.roadmap.items.retain(|item| item.id != id);
        if self.selected_item.as_deref() == Some(id) {
            self.selected_item = None;
        }
        self.roadmap.touch();
        self.autosave();
        self.status_message = "Goal deleted".to_string();
    }

    fn reset_dialog_fields(&mut self) {
        let today = chrono::Local::now().date_naive();
        self.new_item_title = String::new();
        self.new_item_category = String::new();
        self.new_item_has_dates = true;
        self.new_item_start_date = today;
        self.new_item_end_date = today + chrono::Duration::days(7);
    }
}

impl eframe::App for RoadmapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ui::theme::apply_theme(ctx);

        // Handle keyboard shortcuts outside closures to avoid borrow issues
        let should_save = ctx.input(|i| i.modifiers.ctrl && i.key_pressed(egui::Key::S));
        if should_save {
            self.save_roadmap();
        }

        // Top panel: toolbar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui::toolbar::show_toolbar(self, ui);
        });

        // Bottom panel: status bar
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(22.0)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_HEADER)
                    .inner_margin(egui::Margin::symmetric(10.0, 0.0)),
            )
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new(&self.status_message)
                            .font(ui::theme::font_status())
                            .color(ui::theme::TEXT_SECONDARY),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            egui::RichText::new(format!("Items: {}", self.roadmap.items.len()))
                                .size(10.5)
                                .color(ui::theme::TEXT_DIM),
                        );
                        ui.label(
                            egui::RichText::new(" · ")
                                .size(10.5)
                                .color(ui::theme::TEXT_DIM),
                        );
                        ui.label(
                            egui::RichText::new(self.anchor_label())
                                .size(10.5)
                                .color(ui::theme::TEXT_DIM),
                        );
                    });
                });
            });

        // Left panel: item editor + list
        let mut list_action = ui::item_list::ItemListAction::None;
        let mut pending_edit = None;
        egui::SidePanel::left("item_panel")
            .default_width(260.0)
            .min_width(200.0)
            .max_width(420.0)
            .resizable(true)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_PANEL)
                    .inner_margin(egui::Margin::same(8.0))
                    .stroke(egui::Stroke::new(1.0, ui::theme::BORDER_SUBTLE)),
            )
            .show(ctx, |ui| {
                if let Some(sel_id) = self.selected_item.clone() {
                    if let Some(item) =
                        self.roadmap.items.iter().find(|item| item.id == sel_id)
                    {
                        match ui::item_editor::show_item_editor(
                            item,
                            self.view_mode,
                            self.anchor,
                            ui,
                        ) {
                            ui::item_editor::EditorAction::Edited(edit) => {
                                pending_edit = Some(edit);
                            }
                            ui::item_editor::EditorAction::None => {}
                        }
                    }
                    ui.add_space(4.0);
                    ui.separator();
                    ui.add_space(2.0);
                }

                list_action = ui::item_list::show_item_list(
                    &self.roadmap.items,
                    self.selected_item.as_deref(),
                    ui,
                );
            });

        // Route the form edit through the synchronization pass.
        if let Some(edit) = pending_edit {
            if let Some(items) =
                sync::apply_edit(&self.roadmap.items, &edit, self.view_mode, self.anchor)
            {
                self.status_message = "Goal updated".to_string();
                self.apply_items(items);
            }
        }

        match list_action {
            ui::item_list::ItemListAction::Select(id) => {
                self.selected_item = Some(id);
            }
            ui::item_list::ItemListAction::Delete(id) => {
                self.delete_item(&id);
            }
            ui::item_list::ItemListAction::Add => {
                self.show_add_item = true;
            }
            ui::item_list::ItemListAction::None => {}
        }

        // Central panel: roadmap grid
        let chart_frame = egui::Frame::default()
            .fill(ui::theme::BG_DARK)
            .inner_margin(egui::Margin::ZERO);
        egui::CentralPanel::default().frame(chart_frame).show(ctx, |ui| {
            let interaction = ui::roadmap_grid::show_roadmap_grid(
                &self.roadmap.items,
                self.view_mode,
                self.anchor,
                &mut self.grid,
                &mut self.selected_item,
                ui,
            );
            if let Some(items) = interaction.items_changed {
                // Compose the status first so an autosave failure can win.
                self.status_message = self
                    .selected_item
                    .as_deref()
                    .and_then(|selected| items.iter().find(|item| item.id == selected))
                    .map(|item| match (item.start_date, item.end_date) {
                        (Some(start), Some(end)) => format!(
                            "Updated '{}' ({} → {})",
                            item.title,
                            start.format("%Y-%m-%d"),
                            end.format("%Y-%m-%d")
                        ),
                        _ => format!("Updated '{}'", item.title),
                    })
                    .unwrap_or_else(|| "Roadmap updated".to_string());
                self.apply_items(items);
            }
        });

        // Dialogs
        if self.show_add_item {
            ui::dialogs::show_add_item_dialog(self, ctx);
        }
        if self.show_about {
            ui::dialogs::show_about_dialog(self, ctx);
        }
    }
}
