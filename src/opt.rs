use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use gbias::config::Settings;
use gbias::jets::JetAlgorithm;
use gbias::row::ColumnOrder;

pub const DEFAULT_OUTFILE: &str = "eventdata.dat";

#[derive(Debug, Parser)]
#[command(
    name = "gbias",
    about = "Tabulate back-to-back dijets and collision geometry in heavy-ion events"
)]
pub struct Opt {
    /// Verbosity level: 'off', 'error', 'warn', 'info', 'debug', 'trace'
    #[arg(short, long, default_value = "info")]
    pub verbosity: String,

    /// Output file for the event table. 'e' selects the default name
    #[arg(short, long, default_value = DEFAULT_OUTFILE)]
    pub outfile: PathBuf,

    /// JSON file with analysis settings
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Jet algorithm: 'anti-kt', 'kt', or 'cambridge-aachen'
    #[arg(long)]
    pub jet_algorithm: Option<JetAlgorithm>,

    /// Jet radius parameter
    #[arg(long)]
    pub jet_radius: Option<f64>,

    /// Minimum jet transverse momentum in GeV
    #[arg(long)]
    pub jet_min_pt: Option<f64>,

    /// Maximum absolute jet pseudorapidity
    #[arg(long)]
    pub jet_max_eta: Option<f64>,

    /// Maximum absolute pseudorapidity of clustered particles
    #[arg(long)]
    pub particle_max_eta: Option<f64>,

    /// Minimum transverse momentum of the leading jet in GeV
    #[arg(long)]
    pub lead_min_pt: Option<f64>,

    /// Maximum deviation from π of the azimuthal angle between the two jets
    #[arg(long)]
    pub back_to_back_window: Option<f64>,

    /// Column order in the event table: 'declared' or 'alphabetical'
    #[arg(long)]
    pub column_order: Option<ColumnOrder>,

    /// Event files to analyse
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

impl Opt {
    pub fn outfile(&self) -> PathBuf {
        if self.outfile.as_os_str() == "e" {
            PathBuf::from(DEFAULT_OUTFILE)
        } else {
            self.outfile.clone()
        }
    }

    /// Settings from the configuration file, overridden by the
    /// command line
    pub fn settings(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(file) => Settings::from_file(file)?,
            None => Settings::default(),
        };
        let jet_def = &mut settings.jet_def;
        override_with(&mut jet_def.algorithm, self.jet_algorithm);
        override_with(&mut jet_def.radius, self.jet_radius);
        override_with(&mut jet_def.min_pt, self.jet_min_pt);
        override_with(&mut jet_def.max_abs_eta, self.jet_max_eta);
        override_with(&mut jet_def.max_particle_abs_eta, self.particle_max_eta);
        let cuts = &mut settings.cuts;
        override_with(&mut cuts.lead_min_pt, self.lead_min_pt);
        override_with(&mut cuts.back_to_back_window, self.back_to_back_window);
        override_with(&mut settings.column_order, self.column_order);
        settings.validate()?;
        Ok(settings)
    }
}

fn override_with<T>(val: &mut T, new: Option<T>) {
    if let Some(new) = new {
        *val = new;
    }
}
