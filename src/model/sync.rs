use chrono::NaiveDate;

use super::coords::{self, GridAnchor, ViewMode};
use super::item::RoadmapItem;

/// Reconcile one item's grid position with its calendar dates.
///
/// Items without both dates, and items whose start date the anchored window
/// cannot address, pass through untouched — their grid position stays the
/// only source of truth until a window that contains them comes around.
pub fn sync_item(item: &RoadmapItem, mode: ViewMode, anchor: GridAnchor) -> RoadmapItem {
    let (Some(start_date), Some(end_date)) = (item.start_date, item.end_date) else {
        return item.clone();
    };
    let Some(start) = coords::position_of(start_date, mode, anchor) else {
        return item.clone();
    };
    RoadmapItem {
        start,
        duration: coords::duration_of(start_date, end_date, mode),
        ..item.clone()
    }
}

/// Run the synchronization pass over a whole item list.
///
/// Never mutates its input; applying it twice yields the same result as
/// applying it once.
pub fn sync_items(items: &[RoadmapItem], mode: ViewMode, anchor: GridAnchor) -> Vec<RoadmapItem> {
    items
        .iter()
        .map(|item| sync_item(item, mode, anchor))
        .collect()
}

/// A structured edit coming out of the item form.
#[derive(Debug, Clone)]
pub struct ItemEdit {
    pub id: String,
    pub title: String,
    pub description: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub progress: u8,
    pub category: Option<String>,
    pub color: egui::Color32,
}

impl ItemEdit {
    /// Snapshot an item's editable fields.
    pub fn from_item(item: &RoadmapItem) -> Self {
        Self {
            id: item.id.clone(),
            title: item.title.clone(),
            description: item.description.clone(),
            start_date: item.start_date,
            end_date: item.end_date,
            progress: item.progress,
            category: item.category.clone(),
            color: item.color,
        }
    }
}

/// Merge a form edit into a fresh item array.
///
/// A reversed date pair is normalized by snapping the end to the start, then
/// the edited item goes through the same synchronization pass a drag or
/// resize commit uses, so direct date edits land on the grid identically.
/// Returns `None` when the id matches no item.
pub fn apply_edit(
    items: &[RoadmapItem],
    edit: &ItemEdit,
    mode: ViewMode,
    anchor: GridAnchor,
) -> Option<Vec<RoadmapItem>> {
    let index = items.iter().position(|item| item.id == edit.id)?;
    let mut next: Vec<RoadmapItem> = items.to_vec();

    let item = &mut next[index];
    item.title = edit.title.clone();
    item.description = edit.description.clone();
    item.progress = edit.progress.min(100);
    item.category = edit.category.clone();
    item.color = edit.color;
    item.start_date = edit.start_date;
    item.end_date = edit.end_date;
    if let (Some(start_date), Some(end_date)) = (item.start_date, item.end_date) {
        if end_date < start_date {
            item.end_date = Some(start_date);
        }
    }

    next[index] = sync_item(&next[index], mode, anchor);
    Some(next)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn dated_item(id: &str, start_date: NaiveDate, end_date: NaiveDate) -> RoadmapItem {
        let mut item = RoadmapItem::new(id, 0, 99, 99);
        item.id = id.to_string();
        item.start_date = Some(start_date);
        item.end_date = Some(end_date);
        item
    }

    #[test]
    fn sync_recomputes_grid_position_from_dates() {
        let anchor = GridAnchor::new(2024, 3);
        let item = dated_item("a", date(2024, 3, 5), date(2024, 3, 9));
        let synced = sync_item(&item, ViewMode::Month, anchor);
        assert_eq!(synced.start, 4);
        assert_eq!(synced.duration, 5);
    }

    #[test]
    fn sync_is_idempotent() {
        let anchor = GridAnchor::new(2024, 3);
        let items = vec![
            dated_item("a", date(2024, 3, 1), date(2024, 3, 10)),
            dated_item("b", date(2024, 3, 20), date(2024, 4, 2)),
            RoadmapItem::new("undated", 2, 7, 3),
        ];
        let once = sync_items(&items, ViewMode::Month, anchor);
        let twice = sync_items(&once, ViewMode::Month, anchor);
        assert_eq!(once, twice);
    }

    #[test]
    fn items_without_dates_pass_through_unchanged() {
        let anchor = GridAnchor::new(2024, 3);
        let item = RoadmapItem::new("undated", 3, 12, 4);
        let synced = sync_item(&item, ViewMode::Month, anchor);
        assert_eq!(synced, item);
    }

    #[test]
    fn items_outside_the_window_keep_their_grid_position() {
        let anchor = GridAnchor::new(2024, 3);
        let item = dated_item("early", date(2024, 1, 5), date(2024, 1, 10));
        let synced = sync_item(&item, ViewMode::Month, anchor);
        assert_eq!(synced.start, item.start);
        assert_eq!(synced.duration, item.duration);
        // The same item resolves once the mode can address its dates.
        let year_synced = sync_item(&item, ViewMode::Year, anchor);
        assert_eq!(year_synced.start, 0);
        assert_eq!(year_synced.duration, 1);
    }

    #[test]
    fn view_mode_switch_reinterprets_the_same_dates() {
        let anchor = GridAnchor::new(2024, 1);
        let item = dated_item("a", date(2024, 1, 15), date(2024, 3, 10));
        let month = sync_item(&item, ViewMode::Month, anchor);
        assert_eq!(month.start, 14);
        assert_eq!(month.duration, 56);
        let year = sync_item(&item, ViewMode::Year, anchor);
        assert_eq!(year.start, 0);
        assert_eq!(year.duration, 3);
    }

    #[test]
    fn apply_edit_changes_exactly_one_item() {
        let anchor = GridAnchor::new(2024, 3);
        let items = vec![
            dated_item("a", date(2024, 3, 1), date(2024, 3, 3)),
            dated_item("b", date(2024, 3, 10), date(2024, 3, 12)),
        ];
        let mut edit = ItemEdit::from_item(&items[0]);
        edit.title = "Renamed".to_string();
        edit.start_date = Some(date(2024, 3, 2));
        edit.end_date = Some(date(2024, 3, 6));

        let next = apply_edit(&items, &edit, ViewMode::Month, anchor).unwrap();
        assert_eq!(next.len(), items.len());
        assert_eq!(next[0].title, "Renamed");
        assert_eq!(next[0].start, 1);
        assert_eq!(next[0].duration, 5);
        assert_eq!(next[1], items[1]);
    }

    #[test]
    fn apply_edit_normalizes_a_reversed_date_pair() {
        let anchor = GridAnchor::new(2024, 3);
        let items = vec![dated_item("a", date(2024, 3, 1), date(2024, 3, 3))];
        let mut edit = ItemEdit::from_item(&items[0]);
        edit.start_date = Some(date(2024, 3, 10));
        edit.end_date = Some(date(2024, 3, 4));

        let next = apply_edit(&items, &edit, ViewMode::Month, anchor).unwrap();
        assert_eq!(next[0].end_date, Some(date(2024, 3, 10)));
        assert_eq!(next[0].duration, 1);
    }

    #[test]
    fn apply_edit_rejects_unknown_ids() {
        let items = vec![dated_item("a", date(2024, 3, 1), date(2024, 3, 3))];
        let mut edit = ItemEdit::from_item(&items[0]);
        edit.id = "missing".to_string();
        assert!(apply_edit(&items, &edit, ViewMode::Month, GridAnchor::new(2024, 3)).is_none());
    }
}
