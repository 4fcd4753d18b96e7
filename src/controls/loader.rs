//! CSV-based control range loader
//!
//! Loads slider ranges from data/control_ranges.csv

use std::fs::File;
use std::path::Path;

use super::{ControlConfig, ControlId, ControlRange};
use crate::error::Result;

/// Default path to the control range table
pub const DEFAULT_CONTROLS_PATH: &str = "data/control_ranges.csv";

/// Load control ranges from a CSV file.
/// Controls missing from the file keep their default range.
pub fn load_control_config(path: &Path) -> Result<ControlConfig> {
    let file = File::open(path)?;
    load_control_config_from_reader(file)
}

/// Raw CSV row: `control,min,max,default,scale`
#[derive(Debug, serde::Deserialize)]
struct ControlRow {
    control: String,
    min: i64,
    max: i64,
    default: i64,
    scale: f64,
}

impl ControlRow {
    fn into_range(self) -> Result<(ControlId, ControlRange)> {
        let control: ControlId = self.control.parse()?;
        Ok((control, ControlRange::new(self.min, self.max, self.default, self.scale)))
    }
}

/// Load control ranges from any reader (`control,min,max,default,scale`)
pub fn load_control_config_from_reader<R: std::io::Read>(reader: R) -> Result<ControlConfig> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut config = ControlConfig::default();

    for result in reader.deserialize() {
        let row: ControlRow = result?;
        let (control, range) = row.into_range()?;
        *config.range_mut(control) = range;
    }

    config.validate()?;
    Ok(config)
}

impl ControlConfig {
    /// Load ranges from the default location (data/control_ranges.csv)
    pub fn from_csv() -> Result<Self> {
        Self::from_csv_path(Path::new(DEFAULT_CONTROLS_PATH))
    }

    /// Load ranges from a specific CSV file
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        load_control_config(path)
    }
}
