use egui::{Pos2, Rect, Vec2};

use crate::model::{GridGeometry, RoadmapItem};
use crate::ui::drag::DragSession;
use crate::ui::resize::ResizeSession;
use crate::ui::theme;

/// Where one item's bar is drawn this frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemLayout {
    /// Index into the item slice the layout was computed from.
    pub index: usize,
    pub rect: Rect,
    /// The bar is the uncommitted ghost of an active drag.
    pub ghost: bool,
    /// The bar width previews an active resize.
    pub resizing: bool,
}

/// Rect of an item's committed grid position.
fn committed_rect(item: &RoadmapItem, geom: &GridGeometry, lanes_origin: Pos2) -> Rect {
    let x = lanes_origin.x + geom.cell_x(item.start);
    let y = lanes_origin.y + item.row as f32 * theme::row_pitch() + theme::BAR_INSET;
    Rect::from_min_size(
        Pos2::new(x, y),
        Vec2::new(
            item.duration as f32 * geom.cell_width,
            theme::ROW_HEIGHT - theme::BAR_INSET * 2.0,
        ),
    )
}

/// Pure layout pass: committed positions for every item, with the active
/// session applied — the dragged bar at its ghost position, the resized bar
/// at its preview width. The painter consumes this; no visual node is ever
/// written to directly.
pub fn compute_layout(
    items: &[RoadmapItem],
    geom: &GridGeometry,
    lanes_origin: Pos2,
    drag: Option<&DragSession>,
    resize: Option<&ResizeSession>,
) -> Vec<ItemLayout> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let mut rect = committed_rect(item, geom, lanes_origin);
            let mut ghost = false;
            let mut resizing = false;

            if let Some(session) = drag {
                if session.item_id() == item.id {
                    rect = Rect::from_min_size(session.ghost_origin(), rect.size());
                    ghost = true;
                }
            }
            if let Some(session) = resize {
                if session.item_id() == item.id {
                    let width = session.preview_duration(geom.cell_width) as f32 * geom.cell_width;
                    rect.set_width(width);
                    resizing = true;
                }
            }

            ItemLayout {
                index,
                rect,
                ghost,
                resizing,
            }
        })
        .collect()
}

/// Hit area of a bar's trailing-edge resize handle.
pub fn trailing_handle_rect(bar: Rect) -> Rect {
    Rect::from_min_max(
        Pos2::new(bar.right() - theme::HANDLE_WIDTH * 0.5, bar.top()),
        Pos2::new(bar.right() + theme::HANDLE_WIDTH * 0.5, bar.bottom()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GridAnchor, ViewMode};
    use egui::pos2;

    fn geom() -> GridGeometry {
        GridGeometry::new(ViewMode::Month, GridAnchor::new(2024, 3), &[], 38.0 * 30.0)
    }

    fn item(id: &str, row: u32, start: u32, duration: u32) -> RoadmapItem {
        let mut item = RoadmapItem::new(id, row, start, duration);
        item.id = id.to_string();
        item
    }

    #[test]
    fn bars_land_on_their_cells_and_lanes() {
        let items = vec![item("a", 0, 0, 2), item("b", 2, 5, 3)];
        let layout = compute_layout(&items, &geom(), pos2(10.0, 20.0), None, None);

        assert_eq!(layout[0].rect.min.x, 10.0);
        assert_eq!(layout[0].rect.min.y, 20.0 + theme::BAR_INSET);
        assert_eq!(layout[0].rect.width(), 60.0);

        assert_eq!(layout[1].rect.min.x, 10.0 + 5.0 * 30.0);
        assert_eq!(
            layout[1].rect.min.y,
            20.0 + 2.0 * theme::row_pitch() + theme::BAR_INSET
        );
        assert_eq!(layout[1].rect.width(), 90.0);
    }

    #[test]
    fn the_dragged_bar_floats_at_the_ghost_position() {
        let items = vec![item("a", 0, 0, 2), item("b", 1, 4, 1)];
        let origin = pos2(0.0, 0.0);
        let bar = committed_rect(&items[0], &geom(), origin);
        let mut session = DragSession::begin(&items[0], bar.min, bar.min);
        session.update(bar.min + Vec2::new(100.0, 50.0));

        let layout = compute_layout(&items, &geom(), origin, Some(&session), None);
        assert!(layout[0].ghost);
        assert_eq!(layout[0].rect.min, bar.min + Vec2::new(100.0, 50.0));
        assert_eq!(layout[0].rect.size(), bar.size());
        assert!(!layout[1].ghost);
        assert_eq!(layout[1].rect, committed_rect(&items[1], &geom(), origin));
    }

    #[test]
    fn the_resized_bar_previews_its_candidate_width() {
        let items = vec![item("a", 0, 2, 3)];
        let origin = pos2(0.0, 0.0);
        let mut session = ResizeSession::begin(&items[0], 150.0);
        session.update(150.0 + 2.0 * 30.0);

        let layout = compute_layout(&items, &geom(), origin, None, Some(&session));
        assert!(layout[0].resizing);
        assert_eq!(layout[0].rect.width(), 5.0 * 30.0);
        // Left edge stays put: only the trailing edge moves.
        assert_eq!(layout[0].rect.min.x, 2.0 * 30.0);
    }

    #[test]
    fn trailing_handle_straddles_the_right_edge() {
        let bar = Rect::from_min_size(pos2(100.0, 10.0), Vec2::new(60.0, 24.0));
        let handle = trailing_handle_rect(bar);
        assert_eq!(handle.center().x, bar.right());
        assert_eq!(handle.top(), bar.top());
        assert_eq!(handle.bottom(), bar.bottom());
    }
}
