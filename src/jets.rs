use std::str::FromStr;

use jetty::{anti_kt_f, cambridge_aachen_f, kt_f, Cluster, PseudoJet};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};
use thiserror::Error;

use crate::event::Event;
use crate::particle::{eta, phi, pt};

#[derive(
    Display,
    EnumIter,
    Copy,
    Clone,
    Default,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Debug,
    Deserialize,
    Serialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum JetAlgorithm {
    #[default]
    #[strum(to_string = "anti-kt")]
    AntiKt,
    #[strum(to_string = "kt")]
    Kt,
    #[strum(to_string = "cambridge-aachen")]
    CambridgeAachen,
}

#[derive(Debug, Clone, Error)]
#[error("Unknown jet algorithm: {0}")]
pub struct UnknownJetAlgorithm(String);

impl FromStr for JetAlgorithm {
    type Err = UnknownJetAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "anti_kt" | "antikt" | "anti-kt" => Ok(Self::AntiKt),
            "kt" => Ok(Self::Kt),
            "Cambridge/Aachen" | "Cambridge-Aachen" | "Cambridge_Aachen"
            | "cambridge/aachen" | "cambridge-aachen" | "cambridge_aachen" => {
                Ok(Self::CambridgeAachen)
            }
            _ => Err(UnknownJetAlgorithm(s.to_string())),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, PartialOrd, Deserialize, Serialize)]
#[serde(default)]
pub struct JetDefinition {
    pub algorithm: JetAlgorithm,
    pub radius: f64,
    /// Minimum jet transverse momentum in GeV
    pub min_pt: f64,
    /// Jets have to be strictly inside this pseudorapidity range
    pub max_abs_eta: f64,
    /// Only particles with |η| below this value are clustered
    pub max_particle_abs_eta: f64,
}

impl Default for JetDefinition {
    fn default() -> Self {
        Self {
            algorithm: JetAlgorithm::AntiKt,
            radius: 0.4,
            min_pt: 20.,
            max_abs_eta: 2.0,
            max_particle_abs_eta: 3.0,
        }
    }
}

/// A reconstructed jet, reduced to what the dijet selection needs
#[derive(Copy, Clone, Debug, Default, PartialEq, PartialOrd, Deserialize, Serialize)]
pub struct Jet {
    pub pt: f64,
    /// Azimuthal angle in [0, 2π)
    pub phi: f64,
    pub eta: f64,
}

impl Jet {
    pub fn new(pt: f64, phi: f64) -> Self {
        Self { pt, phi, eta: 0. }
    }
}

impl From<&PseudoJet> for Jet {
    fn from(jet: &PseudoJet) -> Self {
        let p = [
            f64::from(jet.e()),
            f64::from(jet.px()),
            f64::from(jet.py()),
            f64::from(jet.pz()),
        ];
        Self {
            pt: pt(&p),
            phi: phi(&p),
            eta: eta(&p),
        }
    }
}

impl JetDefinition {
    /// Cluster the visible final state of an event
    ///
    /// The returned jets pass the transverse momentum and
    /// pseudorapidity cuts and are ordered by decreasing transverse
    /// momentum.
    pub fn find_jets(&self, event: &Event) -> Vec<Jet> {
        let particles: Vec<PseudoJet> = event.out.iter()
            .filter(|p| !p.is_invisible() && p.eta.abs() < self.max_particle_abs_eta)
            .map(|p| p.p.into())
            .collect();
        let mut jets: Vec<Jet> = self.cluster(particles)
            .iter()
            .map(Jet::from)
            .filter(|jet| jet.pt > self.min_pt && jet.eta.abs() < self.max_abs_eta)
            .collect();
        jets.sort_by(|a, b| b.pt.total_cmp(&a.pt));
        jets
    }

    fn cluster(&self, particles: Vec<PseudoJet>) -> Vec<PseudoJet> {
        let minpt2 = self.min_pt * self.min_pt;
        let cut = |jet: PseudoJet| jet.pt2() > minpt2;
        let r = self.radius;
        match self.algorithm {
            JetAlgorithm::AntiKt => particles.cluster_if(anti_kt_f(r), cut),
            JetAlgorithm::Kt => particles.cluster_if(kt_f(r), cut),
            JetAlgorithm::CambridgeAachen => {
                particles.cluster_if(cambridge_aachen_f(r), cut)
            }
        }
    }
}
