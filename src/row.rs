use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};
use thiserror::Error;

/// Columns of the event table, in their declared order
#[derive(
    Display,
    EnumIter,
    Copy,
    Clone,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Debug,
)]
pub enum Column {
    /// Event plane angle
    Polar,
    /// Eccentricity
    JProdR,
    #[strum(to_string = "Jet1_pT")]
    Jet1Pt,
    #[strum(to_string = "Jet2_pT")]
    Jet2Pt,
    /// Azimuthal separation of the two jets in degrees
    JetAngle,
    #[strum(to_string = "Jet1_Ang")]
    Jet1Ang,
    /// Dijet asymmetry
    Aj,
    Weight,
}

#[derive(
    Display,
    EnumIter,
    Copy,
    Clone,
    Default,
    Eq,
    PartialEq,
    Hash,
    Debug,
    Deserialize,
    Serialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum ColumnOrder {
    /// The order in which the columns are declared
    #[default]
    #[strum(to_string = "declared")]
    Declared,
    /// Byte-wise ordering of the column names
    #[strum(to_string = "alphabetical")]
    Alphabetical,
}

#[derive(Debug, Clone, Error)]
#[error("Unknown column order: {0}")]
pub struct UnknownColumnOrder(String);

impl FromStr for ColumnOrder {
    type Err = UnknownColumnOrder;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ColumnOrder::iter()
            .find(|order| order.to_string() == s)
            .ok_or_else(|| UnknownColumnOrder(s.to_owned()))
    }
}

impl ColumnOrder {
    pub fn columns(self) -> Vec<Column> {
        let mut columns = Vec::from_iter(Column::iter());
        if self == ColumnOrder::Alphabetical {
            columns.sort_by_cached_key(|c| c.to_string());
        }
        columns
    }
}

/// The quantities extracted from one accepted event
#[derive(Copy, Clone, Debug, Default, PartialEq, PartialOrd, Deserialize, Serialize)]
pub struct Row {
    pub polar: Option<f64>,
    pub jprod_r: Option<f64>,
    pub jet1_pt: f64,
    pub jet2_pt: f64,
    pub jet_angle: f64,
    pub jet1_ang: f64,
    pub aj: f64,
    pub weight: f64,
}

impl Row {
    /// Value in the given column, `None` if the event had no such information
    pub fn get(&self, column: Column) -> Option<f64> {
        use Column::*;
        match column {
            Polar => self.polar,
            JProdR => self.jprod_r,
            Jet1Pt => Some(self.jet1_pt),
            Jet2Pt => Some(self.jet2_pt),
            JetAngle => Some(self.jet_angle),
            Jet1Ang => Some(self.jet1_ang),
            Aj => Some(self.aj),
            Weight => Some(self.weight),
        }
    }
}
