use chrono::{Datelike, Duration};
use egui::{Color32, Pos2, Rect, Rounding, Sense, Stroke, Ui, Vec2};

use crate::model::{coords, GridAnchor, GridGeometry, RoadmapItem, ViewMode};
use crate::ui::autoscroll::AutoScroll;
use crate::ui::drag::DragSession;
use crate::ui::layout;
use crate::ui::resize::ResizeSession;
use crate::ui::theme;

const ROW_HEIGHT: f32 = theme::ROW_HEIGHT;
const ROW_PADDING: f32 = theme::ROW_GAP;
const HEADER_HEIGHT: f32 = theme::HEADER_HEIGHT;

/// Transient interaction state the grid keeps between frames.
///
/// At most one session exists at a time; starting one while the other is in
/// flight is blocked at the input layer. Dropping this state mid-session is
/// a clean cancellation: sessions and the auto-scroll tick die with it and
/// the committed items are untouched.
#[derive(Default)]
pub struct GridState {
    drag: Option<DragSession>,
    resize: Option<ResizeSession>,
    autoscroll: AutoScroll,
    scroll: Vec2,
}

impl GridState {
    pub fn session_active(&self) -> bool {
        self.drag.is_some() || self.resize.is_some()
    }

    /// Shared exit path for Escape, pointer loss, and teardown: discard the
    /// ghost and preview, stop the auto-scroll tick, commit nothing.
    pub fn cancel_sessions(&mut self) {
        self.drag = None;
        self.resize = None;
        self.autoscroll.stop();
    }
}

/// Result details from interactions in the roadmap grid.
#[derive(Debug, Clone, Default)]
pub struct GridInteraction {
    /// Replacement item array proposed by a committed drag or resize. The
    /// host owns the items; the grid only ever proposes.
    pub items_changed: Option<Vec<RoadmapItem>>,
}

/// Render the roadmap grid (central panel) and run the interaction sessions.
pub fn show_roadmap_grid(
    items: &[RoadmapItem],
    mode: ViewMode,
    anchor: GridAnchor,
    state: &mut GridState,
    selected_item: &mut Option<String>,
    ui: &mut Ui,
) -> GridInteraction {
    let mut interaction = GridInteraction::default();
    let available = ui.available_size();
    let viewport = ui.available_rect_before_wrap();
    let geom = GridGeometry::new(mode, anchor, items, available.x);
    let content_width = geom.content_width().max(available.x);
    let chart_height =
        HEADER_HEIGHT + (geom.row_count as f32 * (ROW_HEIGHT + ROW_PADDING)) + 40.0;

    if ui.input(|i| i.key_pressed(egui::Key::Escape)) && state.session_active() {
        state.cancel_sessions();
    }

    // Advance the auto-scroll tick before the scroll area is built so the
    // nudge lands this frame.
    let now = ui.input(|i| i.time);
    let mut force_offset = false;
    if state.drag.is_some() {
        let next = state
            .autoscroll
            .tick(state.scroll.x, viewport.width(), content_width, now);
        if (next - state.scroll.x).abs() > f32::EPSILON {
            state.scroll.x = next;
            force_offset = true;
        }
        // Keep frames coming while the assistant is armed, with or without
        // fresh pointer events.
        if state.autoscroll.is_active() {
            ui.ctx().request_repaint();
        }
    } else {
        state.autoscroll.stop();
    }

    let mut scroll_area = egui::ScrollArea::both().auto_shrink([false, false]);
    if force_offset {
        scroll_area = scroll_area.scroll_offset(state.scroll);
    }

    let output = scroll_area.show(ui, |ui| {
        let (response, painter) = ui.allocate_painter(
            Vec2::new(content_width, chart_height.max(available.y)),
            Sense::click(),
        );
        let origin = response.rect.min;
        let lanes_origin = Pos2::new(origin.x, origin.y + HEADER_HEIGHT);
        let mut consumed_click = false;

        painter.rect_filled(response.rect, 0.0, theme::BG_DARK);

        draw_row_backgrounds(&painter, origin, &geom, content_width);
        draw_grid_header(&painter, origin, &geom, chart_height.max(available.y));
        draw_today_line(&painter, origin, &geom, chart_height.max(available.y));

        let layouts = layout::compute_layout(
            items,
            &geom,
            lanes_origin,
            state.drag.as_ref(),
            state.resize.as_ref(),
        );

        // Committed bars first; the ghost floats on top afterwards.
        for item_layout in &layouts {
            if item_layout.ghost {
                continue;
            }
            let item = &items[item_layout.index];
            let is_selected = selected_item.as_deref() == Some(item.id.as_str());
            draw_item_bar(&painter, item, item_layout.rect, is_selected, false);
            if item_layout.resizing {
                draw_span_readout(&painter, item_layout.rect, &geom, state.resize.as_ref());
            }
        }

        if let Some(session) = &state.drag {
            if let Some(item_layout) = layouts.iter().find(|l| l.ghost) {
                let item = &items[item_layout.index];
                let (row, start) = session.target(&geom, lanes_origin);
                let target_rect = Rect::from_min_size(
                    Pos2::new(
                        lanes_origin.x + geom.cell_x(start),
                        lanes_origin.y + row as f32 * theme::row_pitch() + theme::BAR_INSET,
                    ),
                    item_layout.rect.size(),
                );
                painter.rect_stroke(
                    target_rect,
                    Rounding::same(theme::BAR_ROUNDING),
                    Stroke::new(1.5, theme::DROP_TARGET),
                );
                draw_item_bar(&painter, item, item_layout.rect, true, true);
            }
        }

        // Pointer wiring: clicks select, pointer-down on a bar or its
        // trailing handle opens a session. Sessions are exclusive.
        for item_layout in &layouts {
            let item = &items[item_layout.index];
            let bar_rect = item_layout.rect;

            let bar_response = ui.interact(
                bar_rect,
                ui.make_persistent_id(("item-bar", &item.id)),
                Sense::click_and_drag(),
            );
            let handle_rect = layout::trailing_handle_rect(bar_rect);
            let handle_response = ui.interact(
                handle_rect.expand(4.0),
                ui.make_persistent_id(("item-resize", &item.id)),
                Sense::drag(),
            );

            if bar_response.clicked() {
                *selected_item = Some(item.id.clone());
                consumed_click = true;
            }

            if handle_response.drag_started() && !state.session_active() {
                let x = handle_response
                    .interact_pointer_pos()
                    .map(|p| p.x)
                    .unwrap_or(handle_rect.center().x);
                state.resize = Some(ResizeSession::begin(item, x));
                *selected_item = Some(item.id.clone());
                consumed_click = true;
            } else if bar_response.drag_started() && !state.session_active() {
                let pointer = bar_response.interact_pointer_pos().unwrap_or(bar_rect.min);
                state.drag = Some(DragSession::begin(item, bar_rect.min, pointer));
                *selected_item = Some(item.id.clone());
                consumed_click = true;
            }

            // Handle affordance for the selected or hovered bar.
            if handle_response.hovered() {
                ui.ctx().set_cursor_icon(egui::CursorIcon::ResizeHorizontal);
            } else if bar_response.hovered() && !state.session_active() {
                ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
            }
            if selected_item.as_deref() == Some(item.id.as_str()) || handle_response.hovered() {
                let handle_h = bar_rect.height() * 0.55;
                let pill = Rect::from_min_size(
                    Pos2::new(bar_rect.right() - 2.5, bar_rect.center().y - handle_h / 2.0),
                    Vec2::new(4.0, handle_h),
                );
                painter.rect_filled(pill, Rounding::same(2.0), theme::HANDLE_COLOR);
            }

            if (bar_response.hovered() || handle_response.hovered()) && !state.session_active() {
                egui::show_tooltip_at_pointer(
                    ui.ctx(),
                    ui.layer_id(),
                    egui::Id::new(("item-tip", &item.id)),
                    |ui| {
                        ui.strong(&item.title);
                        ui.label(span_label(item, geom.mode));
                        ui.label(format!("Progress: {}%", item.progress));
                    },
                );
            }
        }

        // Session upkeep: track the pointer, commit on release, cancel when
        // the pointer vanishes without one (window blur, capture loss).
        let pointer_pos = ui.input(|i| i.pointer.latest_pos());
        let any_down = ui.input(|i| i.pointer.any_down());
        let any_released = ui.input(|i| i.pointer.any_released());

        let mut drag_done = false;
        if let Some(session) = &mut state.drag {
            if any_released {
                if let Some(pos) = pointer_pos {
                    session.update(pos);
                }
                interaction.items_changed = session.commit(items, &geom, lanes_origin);
                drag_done = true;
            } else if any_down {
                if let Some(pos) = pointer_pos {
                    session.update(pos);
                    state.autoscroll.update(pos.x, viewport, now);
                }
                ui.ctx().set_cursor_icon(egui::CursorIcon::Grabbing);
            } else {
                drag_done = true;
            }
        }
        if drag_done {
            state.drag = None;
            state.autoscroll.stop();
        }

        let mut resize_done = false;
        if let Some(session) = &mut state.resize {
            if any_released {
                if let Some(pos) = pointer_pos {
                    session.update(pos.x);
                }
                interaction.items_changed = session.commit(items, &geom);
                resize_done = true;
            } else if any_down {
                if let Some(pos) = pointer_pos {
                    session.update(pos.x);
                }
                ui.ctx().set_cursor_icon(egui::CursorIcon::ResizeHorizontal);
            } else {
                resize_done = true;
            }
        }
        if resize_done {
            state.resize = None;
        }

        // Empty click on the background clears the selection.
        if response.clicked() && !consumed_click {
            *selected_item = None;
        }
    });

    state.scroll = output.state.offset;
    interaction
}

/// Human span for the tooltip: dates when the item has them, cells otherwise.
fn span_label(item: &RoadmapItem, mode: ViewMode) -> String {
    match (item.start_date, item.end_date) {
        (Some(start), Some(end)) => format!(
            "{} → {}",
            start.format("%d/%m/%Y"),
            end.format("%d/%m/%Y")
        ),
        _ => match mode {
            ViewMode::Month => format!("{} day(s)", item.duration),
            ViewMode::Year => format!("{} month(s)", item.duration),
        },
    }
}

fn draw_row_backgrounds(
    painter: &egui::Painter,
    origin: Pos2,
    geom: &GridGeometry,
    width: f32,
) {
    for row in 0..geom.row_count {
        let y = origin.y + HEADER_HEIGHT + row as f32 * (ROW_HEIGHT + ROW_PADDING);
        let row_bg = if row % 2 == 0 {
            theme::BG_PANEL
        } else {
            theme::BG_DARK
        };
        painter.rect_filled(
            Rect::from_min_size(
                Pos2::new(origin.x, y),
                Vec2::new(width, ROW_HEIGHT + ROW_PADDING),
            ),
            0.0,
            row_bg,
        );
        painter.line_segment(
            [
                Pos2::new(origin.x, y + ROW_HEIGHT + ROW_PADDING),
                Pos2::new(origin.x + width, y + ROW_HEIGHT + ROW_PADDING),
            ],
            Stroke::new(0.5, theme::BORDER_SUBTLE),
        );
    }
}

fn draw_grid_header(painter: &egui::Painter, origin: Pos2, geom: &GridGeometry, height: f32) {
    painter.rect_filled(
        Rect::from_min_size(origin, Vec2::new(geom.content_width(), HEADER_HEIGHT)),
        0.0,
        theme::BG_HEADER,
    );
    painter.line_segment(
        [
            Pos2::new(origin.x, origin.y + HEADER_HEIGHT),
            Pos2::new(origin.x + geom.content_width(), origin.y + HEADER_HEIGHT),
        ],
        Stroke::new(1.0, theme::BORDER_SUBTLE),
    );

    let window_origin = geom.anchor.origin(geom.mode);

    match geom.mode {
        ViewMode::Month => {
            for cell in 0..geom.cell_count {
                let date = window_origin + Duration::days(cell as i64);
                let x = origin.x + geom.cell_x(cell);

                painter.line_segment(
                    [
                        Pos2::new(x, origin.y + HEADER_HEIGHT),
                        Pos2::new(x, origin.y + height),
                    ],
                    Stroke::new(0.5, theme::GRID_LINE),
                );

                if geom.cell_width >= 20.0 {
                    let in_anchor_month = date.month() == geom.anchor.month;
                    let is_weekend = date.weekday().num_days_from_monday() >= 5;
                    let day_color = if !in_anchor_month || is_weekend {
                        theme::TEXT_DIM
                    } else {
                        theme::TEXT_SECONDARY
                    };
                    painter.text(
                        Pos2::new(x + 3.0, origin.y + 28.0),
                        egui::Align2::LEFT_CENTER,
                        date.format("%d").to_string(),
                        theme::font_sub(),
                        day_color,
                    );
                }

                if date.day() == 1 {
                    painter.text(
                        Pos2::new(x + 3.0, origin.y + 12.0),
                        egui::Align2::LEFT_CENTER,
                        date.format("%b %Y").to_string(),
                        theme::font_header(),
                        theme::TEXT_PRIMARY,
                    );
                }
            }
        }
        ViewMode::Year => {
            for cell in 0..geom.cell_count {
                let date = window_origin
                    .checked_add_months(chrono::Months::new(cell))
                    .unwrap_or(window_origin);
                let x = origin.x + geom.cell_x(cell);

                painter.line_segment(
                    [
                        Pos2::new(x, origin.y + HEADER_HEIGHT),
                        Pos2::new(x, origin.y + height),
                    ],
                    Stroke::new(0.5, theme::GRID_LINE),
                );

                let in_anchor_year = date.year() == geom.anchor.year;
                painter.text(
                    Pos2::new(x + 5.0, origin.y + 28.0),
                    egui::Align2::LEFT_CENTER,
                    date.format("%b").to_string(),
                    theme::font_sub(),
                    if in_anchor_year {
                        theme::TEXT_SECONDARY
                    } else {
                        theme::TEXT_DIM
                    },
                );
                if date.month() == 1 {
                    painter.text(
                        Pos2::new(x + 5.0, origin.y + 12.0),
                        egui::Align2::LEFT_CENTER,
                        date.format("%Y").to_string(),
                        theme::font_header(),
                        theme::TEXT_PRIMARY,
                    );
                }
            }
        }
    }
}

fn draw_today_line(painter: &egui::Painter, origin: Pos2, geom: &GridGeometry, height: f32) {
    let today = chrono::Local::now().date_naive();
    let Some(cell) = coords::position_of(today, geom.mode, geom.anchor) else {
        return;
    };
    // Year view places the marker proportionally inside the month cell.
    let within = match geom.mode {
        ViewMode::Month => 0.0,
        ViewMode::Year => {
            (today.day0() as f32 / coords::days_in_month(today.year(), today.month()) as f32)
                * geom.cell_width
        }
    };
    let x = origin.x + geom.cell_x(cell) + within;

    painter.line_segment(
        [
            Pos2::new(x, origin.y + HEADER_HEIGHT),
            Pos2::new(x, origin.y + height),
        ],
        Stroke::new(1.5, theme::TODAY_LINE),
    );

    let badge_w = 42.0;
    let badge_rect = Rect::from_min_size(
        Pos2::new(x - badge_w / 2.0, origin.y + HEADER_HEIGHT - 1.0),
        Vec2::new(badge_w, 14.0),
    );
    painter.rect_filled(badge_rect, Rounding::same(3.0), theme::TODAY_LINE);
    painter.text(
        badge_rect.center(),
        egui::Align2::CENTER_CENTER,
        "Today",
        theme::font_small(),
        Color32::WHITE,
    );
}

fn draw_item_bar(
    painter: &egui::Painter,
    item: &RoadmapItem,
    bar_rect: Rect,
    is_selected: bool,
    is_ghost: bool,
) {
    let rounding = Rounding::same(theme::BAR_ROUNDING);
    let fill = if is_ghost {
        item.color.gamma_multiply(0.8)
    } else {
        item.color
    };

    if !is_ghost {
        let shadow_rect = bar_rect.translate(Vec2::new(1.0, 2.0));
        painter.rect_filled(shadow_rect, rounding, Color32::from_black_alpha(35));
    }

    painter.rect_filled(bar_rect, rounding, fill);
    let highlight_rect = Rect::from_min_size(
        bar_rect.min,
        Vec2::new(bar_rect.width(), (bar_rect.height() * 0.45).max(4.0)),
    );
    painter.rect_filled(
        highlight_rect,
        Rounding {
            nw: theme::BAR_ROUNDING,
            ne: theme::BAR_ROUNDING,
            sw: 0.0,
            se: 0.0,
        },
        Color32::from_white_alpha(25),
    );

    if item.progress > 0 {
        let fraction = (item.progress.min(100) as f32) / 100.0;
        let progress_width = bar_rect.width() * fraction;
        let progress_rect =
            Rect::from_min_size(bar_rect.min, Vec2::new(progress_width, bar_rect.height()));
        painter.rect_filled(progress_rect, rounding, theme::PROGRESS_OVERLAY);

        if item.progress < 98 {
            let tick_x = bar_rect.left() + progress_width;
            painter.line_segment(
                [
                    Pos2::new(tick_x, bar_rect.top() + 2.0),
                    Pos2::new(tick_x, bar_rect.bottom() - 2.0),
                ],
                Stroke::new(1.0, Color32::from_white_alpha(60)),
            );
        }
    }

    if is_selected && !is_ghost {
        painter.rect_stroke(
            bar_rect.expand(1.5),
            Rounding::same(theme::BAR_ROUNDING + 1.5),
            Stroke::new(2.0, theme::BORDER_ACCENT),
        );
    }

    if bar_rect.width() > 30.0 {
        let galley = painter.layout_no_wrap(
            item.title.clone(),
            theme::font_bar(),
            theme::TEXT_ON_BAR,
        );
        let clipped = painter.with_clip_rect(bar_rect);
        let text_y = bar_rect.top() + (bar_rect.height() - galley.size().y) / 2.0;
        clipped.galley(
            Pos2::new(bar_rect.left() + 6.0, text_y),
            galley,
            Color32::TRANSPARENT,
        );
    }
}

/// Candidate span readout shown next to the bar while a resize is in flight.
fn draw_span_readout(
    painter: &egui::Painter,
    bar_rect: Rect,
    geom: &GridGeometry,
    resize: Option<&ResizeSession>,
) {
    let Some(session) = resize else { return };
    let duration = session.preview_duration(geom.cell_width);
    let label = match geom.mode {
        ViewMode::Month => format!("{}d", duration),
        ViewMode::Year => format!("{}mo", duration),
    };
    painter.text(
        Pos2::new(bar_rect.right() + 6.0, bar_rect.center().y),
        egui::Align2::LEFT_CENTER,
        label,
        theme::font_small(),
        theme::TEXT_PRIMARY,
    );
}
