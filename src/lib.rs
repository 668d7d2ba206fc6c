#![warn(clippy::all, rust_2018_idioms)]

pub mod analysis;
pub mod config;
pub mod event;
pub mod import;
pub mod jets;
pub mod particle;
pub mod row;
pub mod selection;
pub mod writer;

pub use analysis::{Analysis, Summary};
pub use event::{Event, HeavyIonGeometry};
pub use jets::{Jet, JetDefinition};
pub use selection::{select, Cuts, Selection, Veto};
