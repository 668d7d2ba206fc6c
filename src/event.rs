use avery::event::Status;
use hepmc2::event::EnergyUnit;
use particle_id::ParticleID;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::particle::Particle;

const OUTGOING_STATUS: i32 = 1;

/// Collision geometry from the heavy-ion record of an event
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Default, Deserialize, Serialize)]
pub struct HeavyIonGeometry {
    /// Event plane angle in radians
    pub event_plane_angle: f64,
    pub eccentricity: f64,
}

#[derive(Clone, PartialEq, PartialOrd, Debug)]
pub struct Event {
    /// Outgoing particles
    pub out: Vec<Particle>,
    pub weight: f64,
    pub heavy_ion: Option<HeavyIonGeometry>,
}

impl Default for Event {
    fn default() -> Self {
        Self {
            out: Vec::new(),
            weight: 1.,
            heavy_ion: None,
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EventError {
    #[error("Event has no weight")]
    MissingWeight,
}

impl TryFrom<avery::Event> for Event {
    type Error = EventError;

    fn try_from(event: avery::Event) -> Result<Self, Self::Error> {
        let weight = event.weights.first()
            .and_then(|w| w.weight)
            .ok_or(EventError::MissingWeight)?;
        let heavy_ion = event.heavy_ion_info.and_then(
            |info| info.event_plane_angle.zip(info.eccentricity)
        ).map(|(event_plane_angle, eccentricity)| HeavyIonGeometry {
            event_plane_angle,
            eccentricity,
        });
        let out = event.particles.into_iter()
            .filter(|p| p.status == Some(Status::Outgoing))
            .filter_map(|p| match (p.id, p.p) {
                (Some(id), Some(p)) => Some(Particle::new(id, p)),
                _ => None
            })
            .collect();
        Ok(Event { out, weight, heavy_ion })
    }
}

/// Conversion straight from HepMC2 records
///
/// The weights on the `E` line are used whether or not they are named.
impl TryFrom<hepmc2::Event> for Event {
    type Error = EventError;

    fn try_from(event: hepmc2::Event) -> Result<Self, Self::Error> {
        let weight = *event.weights.first().ok_or(EventError::MissingWeight)?;
        let heavy_ion = event.heavy_ion_info.map(|info| HeavyIonGeometry {
            event_plane_angle: info.event_plane_angle,
            eccentricity: info.eccentricity,
        });
        let efact = if event.energy_unit == EnergyUnit::MEV {
            1e-3
        } else {
            1.
        };
        let out = event.vertices.iter()
            .flat_map(|vx| vx.particles_out.iter())
            .filter(|p| p.status == OUTGOING_STATUS)
            .map(|out| {
                let p = out.p.0.map(|p| efact * p);
                Particle::new(ParticleID::new(out.id), p)
            })
            .collect();
        Ok(Event { out, weight, heavy_ion })
    }
}
