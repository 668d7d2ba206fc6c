use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::event::Event;

use anyhow::{anyhow, Context, Result};
use audec::auto_decompress;
use event_file_reader::EventFileReader as Reader;
use log::{debug, info};

pub type Events = Box<dyn Iterator<Item = Result<Event>>>;

/// Iterate over the events in a (possibly compressed) LHEF or HepMC file
///
/// HepMC2 files are read directly, so that event weights are found
/// even without a weight names (`N`) line. All other formats go
/// through the generic event file reader.
pub fn import(filename: &Path) -> Result<Events> {
    info!("Reading events from {filename:?}");
    let file = File::open(filename)
        .with_context(|| format!("Failed to open {filename:?}"))?;
    let mut reader = auto_decompress(BufReader::new(file));
    let buf = reader.fill_buf()
        .with_context(|| format!("Failed to read from {filename:?}"))?;

    if starts_with(trim_start(buf), b"HepMC") {
        debug!("trying to import {:?} as HepMC file", filename);
        Ok(import_hepmc(reader, filename.to_owned()))
    } else {
        import_generic(filename)
    }
}

fn import_hepmc<R: BufRead + 'static>(reader: R, filename: PathBuf) -> Events {
    let reader = hepmc2::Reader::new(reader);
    let events = reader.enumerate().map(move |(n, event)| {
        let event = event.map_err(
            |err| anyhow!("Error reading event {} from {:?}: {}", n + 1, filename, err)
        )?;
        Event::try_from(event).with_context(
            || format!("Failed to import event {} from {:?}", n + 1, filename)
        )
    });
    Box::new(events)
}

fn import_generic(filename: &Path) -> Result<Events> {
    let reader = Reader::new(filename).map_err(
        |err| anyhow!("Failed to open {:?}: {}", filename, err)
    )?;
    let filename = filename.to_owned();
    let events = reader.enumerate().map(move |(n, event)| {
        let event: avery::Event = event.map_err(
            |err| anyhow!("Error reading event {} from {:?}: {}", n + 1, filename, err)
        )?;
        Event::try_from(event).with_context(
            || format!("Failed to import event {} from {:?}", n + 1, filename)
        )
    });
    Ok(Box::new(events))
}

fn trim_start(buf: &[u8]) -> &[u8] {
    let start = buf.iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(buf.len());
    &buf[start..]
}

fn starts_with<T: std::cmp::PartialEq>(slice: &[T], prefix: &[T]) -> bool {
    if prefix.len() > slice.len() {
        return false;
    }
    &slice[..prefix.len()] == prefix
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(import(&dir.path().join("events.hepmc")).is_err());
    }

    #[test]
    fn unknown_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.txt");
        std::fs::write(&path, "not an event file\n").unwrap();
        assert!(import(&path).is_err());
    }

    #[test]
    fn leading_whitespace() {
        assert_eq!(trim_start(b" \n\tHepMC"), b"HepMC");
        assert!(trim_start(b"  ").is_empty());
        assert!(starts_with(trim_start(b"\nHepMC::Version"), b"HepMC"));
        assert!(!starts_with(b"Hep", b"HepMC"));
    }
}
