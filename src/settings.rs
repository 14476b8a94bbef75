use rfd::FileDialog;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};

use crate::render::RenderMode;

/// Tweakables that are worth keeping between runs. Saved as pretty JSON
/// through a file dialog.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Settings {
    pub brightness: f32,
    pub mode: RenderMode,
    pub substeps: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            brightness: 1.0,
            mode: RenderMode::Flow,
            substeps: 3,
        }
    }
}

pub fn save_to_json(settings: &Settings) {
    if let Some(path) = FileDialog::new().add_filter("json", &["json"]).save_file() {
        let json = serde_json::to_string_pretty(settings).unwrap();
        let mut file = File::create(path).unwrap();
        file.write_all(json.as_bytes()).unwrap();
    }
}

pub fn load_from_json() -> Option<Settings> {
    let path = FileDialog::new().add_filter("json", &["json"]).pick_file()?;
    let mut file = File::open(path).unwrap();
    let mut contents = String::new();
    file.read_to_string(&mut contents).unwrap();
    Some(serde_json::from_str(&contents).unwrap())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_round_trip_through_json() {
        let settings = Settings {
            brightness: 1.4,
            mode: RenderMode::Energy,
            substeps: 5,
        };
        let json = serde_json::to_string_pretty(&settings).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, settings);
    }
}
