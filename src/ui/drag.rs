use egui::{Pos2, Vec2};

use crate::model::{coords, GridGeometry, RoadmapItem};
use crate::ui::theme;

/// Pointer travel below this is treated as a click, not a move.
pub const DRAG_DEAD_ZONE: f32 = 4.0;

/// One in-progress bar drag, from pointer-down to commit or cancellation.
///
/// The session owns all transient drag state; the items it was started over
/// stay untouched until `commit` returns a replacement array. Dropping the
/// session without calling `commit` is a complete cancellation.
#[derive(Debug, Clone)]
pub struct DragSession {
    item_id: String,
    /// Pointer position relative to the bar origin at pointer-down.
    grab_offset: Vec2,
    origin_row: u32,
    origin_start: u32,
    pressed_at: Pos2,
    pointer: Pos2,
}

impl DragSession {
    /// Start a session over a bar whose top-left corner is `bar_origin`.
    pub fn begin(item: &RoadmapItem, bar_origin: Pos2, pointer: Pos2) -> Self {
        Self {
            item_id: item.id.clone(),
            grab_offset: pointer - bar_origin,
            origin_row: item.row,
            origin_start: item.start,
            pressed_at: pointer,
            pointer,
        }
    }

    pub fn item_id(&self) -> &str {
        &self.item_id
    }

    /// Track the latest pointer position.
    pub fn update(&mut self, pointer: Pos2) {
        self.pointer = pointer;
    }

    /// Top-left corner of the uncommitted ghost bar, in screen space.
    pub fn ghost_origin(&self) -> Pos2 {
        self.pointer - self.grab_offset
    }

    /// Whether the pointer has traveled far enough to count as a move.
    pub fn past_dead_zone(&self) -> bool {
        (self.pointer - self.pressed_at).length() > DRAG_DEAD_ZONE
    }

    /// The clamped (row, cell) the ghost currently points at.
    ///
    /// `lanes_origin` is the screen position of lane 0, cell 0 (the grid
    /// content just below the header). Cell and lane come from plain integer
    /// division of the ghost offset, then clamp to the addressable window.
    pub fn target(&self, geom: &GridGeometry, lanes_origin: Pos2) -> (u32, u32) {
        let ghost = self.ghost_origin();
        let local = ghost - lanes_origin;
        let row = geom.clamp_row((local.y / theme::row_pitch()).floor() as i64);
        let start = geom.clamp_cell(geom.cell_at(local.x));
        (row, start)
    }

    /// Finish the session: produce the replacement item array, or `None`
    /// when nothing effectively moved (dead zone, or same row and cell).
    ///
    /// Duration is held fixed; when the item carries dates, both are
    /// re-derived for the new start so grid and calendar stay in agreement.
    pub fn commit(
        &self,
        items: &[RoadmapItem],
        geom: &GridGeometry,
        lanes_origin: Pos2,
    ) -> Option<Vec<RoadmapItem>> {
        if !self.past_dead_zone() {
            return None;
        }
        let (row, start) = self.target(geom, lanes_origin);
        if row == self.origin_row && start == self.origin_start {
            return None;
        }
        let index = items.iter().position(|item| item.id == self.item_id)?;

        let mut next = items.to_vec();
        let item = &mut next[index];
        item.row = row;
        item.start = start;
        if item.has_dates() {
            let (start_date, end_date) =
                coords::date_range_of(start, item.duration, geom.mode, geom.anchor);
            item.start_date = Some(start_date);
            item.end_date = Some(end_date);
        }
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::GridAnchor;
    use crate::model::ViewMode;
    use chrono::NaiveDate;
    use egui::pos2;

    fn geom() -> GridGeometry {
        // 38 cells at exactly 30 px each.
        GridGeometry::new(ViewMode::Month, GridAnchor::new(2024, 3), &[], 38.0 * 30.0)
    }

    fn item_at(row: u32, start: u32) -> RoadmapItem {
        let mut item = RoadmapItem::new("goal", row, start, 3);
        item.id = "goal".to_string();
        item
    }

    fn bar_origin(row: u32, start: u32) -> Pos2 {
        pos2(start as f32 * 30.0, row as f32 * theme::row_pitch())
    }

    #[test]
    fn ghost_follows_the_pointer_minus_the_grab_offset() {
        let item = item_at(1, 5);
        let origin = bar_origin(1, 5);
        let mut session = DragSession::begin(&item, origin, origin + Vec2::new(10.0, 8.0));
        session.update(pos2(300.0, 100.0));
        assert_eq!(session.ghost_origin(), pos2(290.0, 92.0));
    }

    #[test]
    fn release_inside_the_dead_zone_commits_nothing() {
        let item = item_at(1, 5);
        let items = vec![item.clone()];
        let origin = bar_origin(1, 5);
        let mut session = DragSession::begin(&item, origin, origin);
        session.update(origin + Vec2::new(2.0, 1.0));
        assert!(session.commit(&items, &geom(), Pos2::ZERO).is_none());
    }

    #[test]
    fn release_over_the_original_cell_commits_nothing() {
        let item = item_at(1, 5);
        let items = vec![item.clone()];
        let origin = bar_origin(1, 5);
        let mut session = DragSession::begin(&item, origin, origin);
        // Far enough to leave the dead zone, not far enough to change cells.
        session.update(origin + Vec2::new(8.0, 0.0));
        assert!(session.commit(&items, &geom(), Pos2::ZERO).is_none());
    }

    #[test]
    fn commit_moves_exactly_one_item_and_leaves_the_rest_alone() {
        let dragged = item_at(1, 5);
        let mut other = RoadmapItem::new("other", 3, 10, 2);
        other.id = "other".to_string();
        let items = vec![dragged.clone(), other.clone()];

        let origin = bar_origin(1, 5);
        let mut session = DragSession::begin(&dragged, origin, origin);
        // Two cells right, one lane down.
        session.update(origin + Vec2::new(60.0, theme::row_pitch()));

        let next = session.commit(&items, &geom(), Pos2::ZERO).unwrap();
        assert_eq!(next.len(), items.len());
        assert_eq!(next[0].start, 7);
        assert_eq!(next[0].row, 2);
        assert_eq!(next[0].duration, dragged.duration);
        assert_eq!(next[1], other);
        // The input array was not touched.
        assert_eq!(items[0], dragged);
    }

    #[test]
    fn commit_clamps_to_the_grid_edges() {
        let g = geom();
        let item = item_at(1, 5);
        let items = vec![item.clone()];
        let origin = bar_origin(1, 5);

        // Five cells left of cell 0.
        let mut session = DragSession::begin(&item, origin, origin);
        session.update(pos2(origin.x - 10.0 * 30.0, origin.y));
        let next = session.commit(&items, &g, Pos2::ZERO).unwrap();
        assert_eq!(next[0].start, 0);

        // Way below the deepest lane.
        let mut session = DragSession::begin(&item, origin, origin);
        session.update(pos2(origin.x, 99.0 * theme::row_pitch()));
        let next = session.commit(&items, &g, Pos2::ZERO).unwrap();
        assert_eq!(next[0].row, g.max_row());
    }

    #[test]
    fn commit_rederives_dates_with_duration_held_fixed() {
        let mut item = item_at(0, 4);
        item.start_date = Some(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        item.end_date = Some(NaiveDate::from_ymd_opt(2024, 3, 7).unwrap());
        let items = vec![item.clone()];

        let origin = bar_origin(0, 4);
        let mut session = DragSession::begin(&item, origin, origin);
        session.update(origin + Vec2::new(5.0 * 30.0, 0.0));

        let next = session.commit(&items, &geom(), Pos2::ZERO).unwrap();
        assert_eq!(next[0].start, 9);
        assert_eq!(next[0].duration, 3);
        assert_eq!(
            next[0].start_date,
            Some(NaiveDate::from_ymd_opt(2024, 3, 10).unwrap())
        );
        assert_eq!(
            next[0].end_date,
            Some(NaiveDate::from_ymd_opt(2024, 3, 12).unwrap())
        );
    }

    #[test]
    fn undated_items_move_without_growing_dates() {
        let item = item_at(0, 4);
        let items = vec![item.clone()];
        let origin = bar_origin(0, 4);
        let mut session = DragSession::begin(&item, origin, origin);
        session.update(origin + Vec2::new(3.0 * 30.0, 0.0));

        let next = session.commit(&items, &geom(), Pos2::ZERO).unwrap();
        assert_eq!(next[0].start, 7);
        assert_eq!(next[0].start_date, None);
        assert_eq!(next[0].end_date, None);
    }
}
