use std::f64::consts::PI;

use serde::{Deserialize, Serialize};
use strum::Display;

use crate::event::HeavyIonGeometry;
use crate::jets::Jet;
use crate::row::Row;

/// Thresholds of the dijet selection
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd, Deserialize, Serialize)]
#[serde(default)]
pub struct Cuts {
    /// Minimum transverse momentum of the leading jet in GeV
    pub lead_min_pt: f64,
    /// Maximum deviation from π of the azimuthal separation between
    /// the leading and the recoiling jet
    pub back_to_back_window: f64,
}

impl Default for Cuts {
    fn default() -> Self {
        Self {
            lead_min_pt: 80.,
            back_to_back_window: PI / 8.,
        }
    }
}

/// Why an event was rejected
#[derive(
    Display,
    Copy,
    Clone,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Debug,
)]
pub enum Veto {
    #[strum(to_string = "fewer than two jets")]
    TooFewJets,
    #[strum(to_string = "soft leading jet")]
    SoftLeadingJet,
    #[strum(to_string = "no recoiling jet")]
    NoRecoilJet,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Selection {
    Rejected(Veto),
    Accepted(Row),
}

impl Selection {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Selection::Accepted(_))
    }
}

/// Select an event with a hard leading jet and a back-to-back partner
///
/// `jets` has to be ordered by decreasing transverse momentum. The
/// partner is the first jet in that order whose azimuthal separation
/// from the leading jet lies within `cuts.back_to_back_window` of π.
/// The separation is the plain difference of the azimuthal angles,
/// without mapping it back into [0, π].
pub fn select(
    jets: &[Jet],
    heavy_ion: Option<HeavyIonGeometry>,
    weight: f64,
    cuts: &Cuts,
) -> Selection {
    use Selection::Rejected;

    if jets.len() < 2 {
        return Rejected(Veto::TooFewJets);
    }
    let j1 = &jets[0];
    if j1.pt < cuts.lead_min_pt {
        return Rejected(Veto::SoftLeadingJet);
    }
    let recoil = jets.iter().find(
        |j| ((j1.phi - j.phi).abs() - PI).abs() < cuts.back_to_back_window
    );
    let Some(j2) = recoil else {
        return Rejected(Veto::NoRecoilJet)
    };

    Selection::Accepted(Row {
        polar: heavy_ion.map(|hi| hi.event_plane_angle),
        jprod_r: heavy_ion.map(|hi| hi.eccentricity),
        jet1_pt: j1.pt,
        jet2_pt: j2.pt,
        jet_angle: (j1.phi - j2.phi).abs().to_degrees(),
        jet1_ang: j1.phi,
        aj: (j1.pt - j2.pt) / (j1.pt + j2.pt),
        weight,
    })
}
