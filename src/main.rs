//! Tabulate back-to-back dijets in heavy-ion collision events.
//!
//! # How to use
//!
//!     gbias -o TABLE EVENTFILES...
//!
//! The event files should be in the LHEF or version 2 of the HepMC
//! format and can be compressed. For each event whose leading jet
//! has a partner roughly opposite in azimuth, one line with the
//! jet kinematics, the collision geometry from the HepMC heavy-ion
//! record, and the event weight is written to the tab-separated
//! output table.
mod opt;

use crate::opt::Opt;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use gbias::analysis::Analysis;
use gbias::import::import;
use gbias::writer::TableWriter;
use log::{debug, info};

fn main() -> Result<()> {
    let opt = Opt::parse();

    let env = Env::default().filter_or("GBIAS_LOG", opt.verbosity.as_str());
    env_logger::init_from_env(env);

    debug!("options: {opt:#?}");
    let settings = opt.settings()?;
    let outfile = opt.outfile();
    let writer = TableWriter::create(&outfile, settings.column_order);
    let is_open = writer.is_open();

    let mut analysis = Analysis::new(settings, writer);
    for file in &opt.files {
        for event in import(file)? {
            analysis.analyze(&event?)
                .with_context(|| format!("Failed to write to {outfile:?}"))?;
        }
    }
    analysis.finalize()
        .with_context(|| format!("Failed to write to {outfile:?}"))?;
    if is_open {
        info!("Everything written to {outfile:?}");
    }
    Ok(())
}
