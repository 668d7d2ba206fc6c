use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};

use crate::jets::JetDefinition;
use crate::row::ColumnOrder;
use crate::selection::Cuts;

/// Analysis settings
///
/// Missing entries in a configuration file take their default values.
#[derive(Copy, Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub jet_def: JetDefinition,
    pub cuts: Cuts,
    pub column_order: ColumnOrder,
}

impl Settings {
    /// Read settings from a JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open {path:?}"))?;
        serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to read settings from {path:?}"))
    }

    /// Check that the settings describe a meaningful selection
    ///
    /// Non-negative transverse momentum thresholds guarantee that
    /// selected jets have strictly positive transverse momenta.
    pub fn validate(&self) -> Result<()> {
        let JetDefinition {
            radius,
            min_pt,
            max_abs_eta,
            max_particle_abs_eta,
            ..
        } = self.jet_def;
        ensure!(radius > 0., "Jet radius has to be positive, got {radius}");
        ensure!(
            min_pt >= 0.,
            "Minimum jet transverse momentum must not be negative, got {min_pt}"
        );
        ensure!(
            max_abs_eta > 0.,
            "Maximum jet pseudorapidity has to be positive, got {max_abs_eta}"
        );
        ensure!(
            max_particle_abs_eta > 0.,
            "Maximum particle pseudorapidity has to be positive, got {max_particle_abs_eta}"
        );
        let Cuts { lead_min_pt, back_to_back_window } = self.cuts;
        ensure!(
            lead_min_pt >= 0.,
            "Minimum leading jet transverse momentum must not be negative, got {lead_min_pt}"
        );
        ensure!(
            back_to_back_window > 0.,
            "Back-to-back window has to be positive, got {back_to_back_window}"
        );
        Ok(())
    }
}
