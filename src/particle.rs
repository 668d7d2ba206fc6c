use std::f64::consts::TAU;

use particle_id::ParticleID;

#[derive(Copy, Clone, PartialEq, PartialOrd, Debug)]
pub struct Particle {
    pub id: ParticleID,
    /// Four-momentum (E, px, py, pz)
    pub p: [f64; 4],
    pub eta: f64,
    pub phi: f64,
    pub pt: f64,
}

impl Particle {
    pub fn new(id: ParticleID, p: [f64; 4]) -> Self {
        Particle {
            id,
            p,
            eta: eta(&p),
            phi: phi(&p),
            pt: pt(&p)
        }
    }

    /// Neutrinos leave no trace in the detector
    pub fn is_invisible(&self) -> bool {
        matches!(self.id.id().abs(), 12 | 14 | 16)
    }
}

/// Pseudorapidity
///
/// Particles along the beam axis have infinite (or undefined)
/// pseudorapidity and fail any finite |η| cut.
pub(crate) fn eta(p: &[f64; 4]) -> f64 {
    (p[3] / pt(p)).asinh()
}

/// Azimuthal angle in [0, 2π)
pub(crate) fn phi(p: &[f64; 4]) -> f64 {
    let phi = p[2].atan2(p[1]);
    if phi < 0. {
        phi + TAU
    } else {
        phi
    }
}

fn pt2(p: &[f64; 4]) -> f64 {
    p[1] * p[1] + p[2] * p[2]
}

pub(crate) fn pt(p: &[f64; 4]) -> f64 {
    pt2(p).sqrt()
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use approx::assert_relative_eq;
    use particle_id::sm_elementary_particles::{gluon, photon};

    use super::*;

    #[test]
    fn kinematics() {
        let p = Particle::new(photon, [5., 0., -3., 4.]);
        assert_relative_eq!(p.pt, 3.);
        assert_relative_eq!(p.phi, 1.5 * PI);
        assert_relative_eq!(p.eta, (4f64 / 3.).asinh());
    }

    #[test]
    fn phi_is_never_negative() {
        for py in [-1., -1e-12, 0., 1e-12, 1.] {
            let phi = phi(&[2., -1., py, 0.]);
            assert!((0. ..TAU).contains(&phi), "phi = {phi}");
        }
    }

    #[test]
    fn beam_axis_fails_eta_cut() {
        let p = Particle::new(gluon, [10., 0., 0., 10.]);
        assert!(p.eta.is_infinite());
    }

    #[test]
    fn neutrinos_are_invisible() {
        for id in [12, -12, 14, -14, 16, -16] {
            let p = Particle::new(ParticleID::new(id), [1., 1., 0., 0.]);
            assert!(p.is_invisible());
        }
        assert!(!Particle::new(photon, [1., 1., 0., 0.]).is_invisible());
        assert!(!Particle::new(gluon, [1., 1., 0., 0.]).is_invisible());
    }
}
