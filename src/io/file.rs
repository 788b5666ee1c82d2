use crate::model::Roadmap;
use std::path::Path;

/// Save a roadmap to a JSON file.
pub fn save_roadmap(roadmap: &Roadmap, path: &Path) -> Result<(), String> {
    let json = serde_json::to_string_pretty(roadmap).map_err(|e| e.to_string())?;
    std::fs::write(path, json).map_err(|e| e.to_string())
}

/// Load a roadmap from a JSON file.
pub fn load_roadmap(path: &Path) -> Result<Roadmap, String> {
    let json = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
    serde_json::from_str(&json).map_err(|e| e.to_string())
}
