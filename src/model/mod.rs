pub mod coords;
pub mod geometry;
pub mod item;
pub mod roadmap;
pub mod sync;

pub use coords::{GridAnchor, ViewMode};
pub use geometry::GridGeometry;
pub use item::RoadmapItem;
pub use roadmap::Roadmap;
