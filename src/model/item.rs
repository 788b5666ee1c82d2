use chrono::NaiveDate;
use egui::Color32;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Id prefix for items created in-app that have not been saved yet.
pub const PROVISIONAL_ID_PREFIX: &str = "new-";

/// A single item on the roadmap grid.
///
/// Grid position (`row`, `start`, `duration`) and the optional date pair are
/// two representations of the same interval; when both dates are present they
/// are the source of truth and a synchronization pass keeps the grid fields
/// in agreement (see `model::sync`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadmapItem {
    /// Opaque identifier. Minted as a uuid on first save; interactive adds
    /// carry a `new-` prefixed provisional id until then.
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Vertical lane, top lane is 0. Items may share a lane.
    pub row: u32,
    /// Index of the first occupied cell, in the unit of the active view mode
    /// (days for month view, months for year view).
    pub start: u32,
    /// Number of contiguous cells occupied. Never below 1.
    pub duration: u32,
    /// Completion 0–100. Display only.
    pub progress: u8,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub category: Option<String>,
    /// Display color for the bar (stored as RGBA).
    #[serde(with = "color_serde")]
    pub color: Color32,
    pub parent_id: Option<String>,
    pub original_sub_goal_id: Option<String>,
}

impl RoadmapItem {
    /// Create an item at a grid position, without dates.
    pub fn new(title: impl Into<String>, row: u32, start: u32, duration: u32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            description: String::new(),
            row,
            start,
            duration: duration.max(1),
            progress: 0,
            start_date: None,
            end_date: None,
            category: None,
            color: Color32::from_rgb(70, 130, 180), // Steel blue
            parent_id: None,
            original_sub_goal_id: None,
        }
    }

    /// Create an item with a provisional id, marking it as not yet saved.
    pub fn new_provisional(title: impl Into<String>, row: u32) -> Self {
        let mut item = Self::new(title, row, 0, 1);
        item.id = format!("{}{}", PROVISIONAL_ID_PREFIX, Uuid::new_v4());
        item
    }

    /// True when the item carries an unsaved provisional id.
    pub fn is_provisional(&self) -> bool {
        self.id.starts_with(PROVISIONAL_ID_PREFIX)
    }

    /// Replace a provisional id with a permanent one.
    pub fn promote_id(&mut self) {
        if self.is_provisional() {
            self.id = Uuid::new_v4().to_string();
        }
    }

    /// True when both calendar dates are set.
    pub fn has_dates(&self) -> bool {
        self.start_date.is_some() && self.end_date.is_some()
    }
}

/// Serde helper for `Color32`.
mod color_serde {
    use egui::Color32;
    use serde::{self, Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(color: &Color32, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let rgba = [color.r(), color.g(), color.b(), color.a()];
        rgba.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Color32, D::Error>
    where
        D: Deserializer<'de>,
    {
        let rgba: [u8; 4] = Deserialize::deserialize(deserializer)?;
        Ok(Color32::from_rgba_premultiplied(
            rgba[0], rgba[1], rgba[2], rgba[3],
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provisional_id_is_detected_and_promoted() {
        let mut item = RoadmapItem::new_provisional("Learn Rust", 0);
        assert!(item.is_provisional());
        item.promote_id();
        assert!(!item.is_provisional());
        assert!(Uuid::parse_str(&item.id).is_ok());
    }

    #[test]
    fn new_item_never_has_zero_duration() {
        let item = RoadmapItem::new("x", 0, 0, 0);
        assert_eq!(item.duration, 1);
    }
}
