use crate::model::{coords, GridGeometry, RoadmapItem};

/// One in-progress trailing-edge resize, from pointer-down on the handle to
/// commit or cancellation.
///
/// Only the horizontal pointer delta matters: it is rounded to whole cells
/// and added to the duration recorded at pointer-down. The candidate is a
/// visual preview until release; nothing is written mid-session, and a
/// dropped session reverts the preview for free.
#[derive(Debug, Clone)]
pub struct ResizeSession {
    item_id: String,
    initial_duration: u32,
    press_x: f32,
    pointer_x: f32,
}

impl ResizeSession {
    pub fn begin(item: &RoadmapItem, pointer_x: f32) -> Self {
        Self {
            item_id: item.id.clone(),
            initial_duration: item.duration,
            press_x: pointer_x,
            pointer_x,
        }
    }

    pub fn item_id(&self) -> &str {
        &self.item_id
    }

    /// Track the latest pointer x-coordinate.
    pub fn update(&mut self, pointer_x: f32) {
        self.pointer_x = pointer_x;
    }

    /// Live candidate duration: rounded cell delta on top of the recorded
    /// duration, clamped so it can never fall below one cell.
    pub fn preview_duration(&self, cell_width: f32) -> u32 {
        let delta_cells = ((self.pointer_x - self.press_x) / cell_width).round() as i64;
        (self.initial_duration as i64 + delta_cells).max(1) as u32
    }

    /// Finish the session: produce the replacement item array, or `None`
    /// when the duration ends up where it started.
    ///
    /// The start date is held fixed; the end date is re-derived from it so a
    /// resize can never produce an end before the start.
    pub fn commit(&self, items: &[RoadmapItem], geom: &GridGeometry) -> Option<Vec<RoadmapItem>> {
        let duration = self.preview_duration(geom.cell_width);
        if duration == self.initial_duration {
            return None;
        }
        let index = items.iter().position(|item| item.id == self.item_id)?;

        let mut next = items.to_vec();
        let item = &mut next[index];
        item.duration = duration;
        if let Some(start_date) = item.start_date {
            item.end_date = Some(coords::end_date_for(start_date, duration, geom.mode));
        }
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GridAnchor, ViewMode};
    use chrono::NaiveDate;

    fn geom() -> GridGeometry {
        // 38 cells at exactly 30 px each.
        GridGeometry::new(ViewMode::Month, GridAnchor::new(2024, 3), &[], 38.0 * 30.0)
    }

    fn dated_item(duration: u32) -> RoadmapItem {
        let mut item = RoadmapItem::new("goal", 0, 0, duration);
        item.id = "goal".to_string();
        item.start_date = Some(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        item.end_date = Some(coords::end_date_for(
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            duration,
            ViewMode::Month,
        ));
        item
    }

    #[test]
    fn preview_rounds_the_pointer_delta_to_whole_cells() {
        let item = dated_item(3);
        let mut session = ResizeSession::begin(&item, 200.0);
        session.update(200.0 + 44.0); // 1.47 cells → 1
        assert_eq!(session.preview_duration(30.0), 4);
        session.update(200.0 + 46.0); // 1.53 cells → 2
        assert_eq!(session.preview_duration(30.0), 5);
    }

    #[test]
    fn preview_never_falls_below_one_cell() {
        let item = dated_item(3);
        let mut session = ResizeSession::begin(&item, 200.0);
        session.update(200.0 - 10.0 * 30.0); // ten cells leftward
        assert_eq!(session.preview_duration(30.0), 1);
    }

    #[test]
    fn commit_clamps_a_shrinking_resize_to_duration_one() {
        let item = dated_item(3);
        let items = vec![item.clone()];
        let mut session = ResizeSession::begin(&item, 200.0);
        session.update(200.0 - 10.0 * 30.0);

        let next = session.commit(&items, &geom()).unwrap();
        assert_eq!(next[0].duration, 1);
        assert_eq!(next[0].end_date, next[0].start_date);
    }

    #[test]
    fn commit_extends_the_end_date_with_the_start_held_fixed() {
        let item = dated_item(3); // Mar 1 – Mar 3
        let items = vec![item.clone()];
        let mut session = ResizeSession::begin(&item, 200.0);
        session.update(200.0 + 2.0 * 30.0);

        let next = session.commit(&items, &geom()).unwrap();
        assert_eq!(next[0].duration, 5);
        assert_eq!(
            next[0].start_date,
            Some(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
        );
        assert_eq!(
            next[0].end_date,
            Some(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap())
        );
    }

    #[test]
    fn unchanged_duration_commits_nothing() {
        let item = dated_item(3);
        let items = vec![item.clone()];
        let mut session = ResizeSession::begin(&item, 200.0);
        session.update(207.0); // under half a cell
        assert!(session.commit(&items, &geom()).is_none());
    }

    #[test]
    fn commit_changes_only_the_resized_item() {
        let resized = dated_item(3);
        let mut other = RoadmapItem::new("other", 2, 8, 4);
        other.id = "other".to_string();
        let items = vec![resized.clone(), other.clone()];

        let mut session = ResizeSession::begin(&resized, 100.0);
        session.update(100.0 + 30.0);
        let next = session.commit(&items, &geom()).unwrap();
        assert_eq!(next.len(), items.len());
        assert_eq!(next[0].duration, 4);
        assert_eq!(next[1], other);
        assert_eq!(items[0], resized);
    }
}
