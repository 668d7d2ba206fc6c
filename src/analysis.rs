use std::collections::BTreeMap;
use std::io::{self, Write};

use log::{debug, info, trace};

use crate::config::Settings;
use crate::event::Event;
use crate::selection::{select, Selection, Veto};
use crate::writer::TableWriter;

/// Event counts of a run
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub events: usize,
    pub accepted: usize,
    pub vetoes: BTreeMap<Veto, usize>,
}

impl Summary {
    pub fn rejected(&self) -> usize {
        self.vetoes.values().sum()
    }
}

/// Runs the dijet selection on a sequence of events and tabulates
/// the accepted ones
pub struct Analysis<W: Write> {
    settings: Settings,
    writer: TableWriter<W>,
    summary: Summary,
}

impl<W: Write> Analysis<W> {
    pub fn new(settings: Settings, writer: TableWriter<W>) -> Self {
        debug!("settings: {settings:#?}");
        Self {
            settings,
            writer,
            summary: Summary::default(),
        }
    }

    pub fn analyze(&mut self, event: &Event) -> io::Result<Selection> {
        self.summary.events += 1;
        let jets = self.settings.jet_def.find_jets(event);
        trace!("event {}: {} jets", self.summary.events, jets.len());
        let selection = select(
            &jets,
            event.heavy_ion,
            event.weight,
            &self.settings.cuts
        );
        match &selection {
            Selection::Accepted(row) => {
                self.summary.accepted += 1;
                self.writer.write(row)?;
            }
            Selection::Rejected(veto) => {
                *self.summary.vetoes.entry(*veto).or_default() += 1;
            }
        }
        Ok(selection)
    }

    pub fn summary(&self) -> &Summary {
        &self.summary
    }

    /// Flush the output and report event counts
    pub fn finalize(self) -> io::Result<(Summary, Option<W>)> {
        let Self { writer, summary, .. } = self;
        let written = writer.rows();
        let sink = writer.finish()?;
        info!(
            "{} events analysed, {} accepted, {} rows written",
            summary.events, summary.accepted, written
        );
        for (veto, count) in &summary.vetoes {
            info!("{count} events rejected: {veto}");
        }
        Ok((summary, sink))
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use particle_id::sm_elementary_particles::gluon;

    use super::*;
    use crate::event::HeavyIonGeometry;
    use crate::particle::Particle;
    use crate::row::ColumnOrder;

    fn event(jets: &[(f64, f64)], heavy_ion: Option<HeavyIonGeometry>) -> Event {
        let out = jets.iter()
            .map(|&(pt, phi)| {
                Particle::new(gluon, [pt, pt * phi.cos(), pt * phi.sin(), 0.])
            })
            .collect();
        Event { out, weight: 0.5, heavy_ion }
    }

    fn analysis() -> Analysis<Vec<u8>> {
        let writer = TableWriter::new(Some(Vec::new()), ColumnOrder::Declared);
        Analysis::new(Settings::default(), writer)
    }

    #[test]
    fn counts() {
        let mut analysis = analysis();
        let hi = HeavyIonGeometry { event_plane_angle: 0.7, eccentricity: 0.2 };
        let events = [
            event(&[(100., 1.)], None),
            event(&[(70., 1.), (60., 1. + PI)], None),
            event(&[(100., 1.), (60., 2.)], None),
            event(&[(100., 1.), (60., 1. + PI)], Some(hi)),
            event(&[(100., 1.), (60., 1. + PI)], None),
        ];
        for event in &events {
            analysis.analyze(event).unwrap();
        }
        assert_eq!(analysis.summary().events, 5);
        assert_eq!(analysis.summary().accepted, 2);

        let (summary, out) = analysis.finalize().unwrap();
        assert_eq!(summary.rejected(), 3);
        assert_eq!(summary.vetoes[&Veto::TooFewJets], 1);
        assert_eq!(summary.vetoes[&Veto::SoftLeadingJet], 1);
        assert_eq!(summary.vetoes[&Veto::NoRecoilJet], 1);

        let out = String::from_utf8(out.unwrap()).unwrap();
        let lines = Vec::from_iter(out.lines());
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("0.7\t0.2\t"));
        // no geometry carried over from the previous event
        assert!(lines[2].starts_with("nan\tnan\t"));
        assert!(lines[2].ends_with("\t0.5"));
    }

    #[test]
    fn rejected_only() {
        let mut analysis = analysis();
        let selection = analysis.analyze(&event(&[(50., 0.), (50., PI)], None)).unwrap();
        assert_eq!(selection, Selection::Rejected(Veto::SoftLeadingJet));
        let (summary, out) = analysis.finalize().unwrap();
        assert_eq!(summary.accepted, 0);
        assert!(out.unwrap().is_empty());
    }
}
