use atlunch_core::AppConfig;
use atlunch_store::{JsonFileStore, Persistence};

use crate::render;

/// Print the snapshot persisted under the configured data directory.
///
/// Needs neither the API key nor connectivity.
pub(crate) fn run_replay(config: &AppConfig) {
    let persistence = Persistence::new(JsonFileStore::new(&config.data_dir));
    let snapshot = persistence.load_snapshot();
    for line in render::snapshot_lines(&snapshot) {
        println!("{line}");
    }
}
