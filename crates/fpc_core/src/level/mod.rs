mod document;
mod loader;

pub use document::{demo_level_document, LevelDocument, ObstacleDocument, LEVEL_FORMAT_VERSION};
pub use loader::{load_level, parse_level, Level, LevelLoadError, LevelLoadReport, Obstacle};
