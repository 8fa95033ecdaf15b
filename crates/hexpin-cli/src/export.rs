//! Pin data and id mapping writers.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use hexpin_lattice::{IdMapping, PinRecord};

use crate::error::Result;

/// Header of the pin data table.
pub const RECORD_HEADER: &str = "spiral_id,raster_id,ring,position,x,y,value";

/// Header of the id mapping table.
pub const MAPPING_HEADER: &str = "spiral_id,raster_id";

pub const PIN_DATA_STEM: &str = "pin_data";
pub const MAPPING_FILE: &str = "id_mapping.csv";

/// Writes pin records in one output format.
pub trait PinExporter {
    /// File extension, without the dot.
    fn extension(&self) -> &'static str;

    fn write_records(&self, w: &mut dyn Write, records: &[PinRecord]) -> Result<()>;
}

/// Comma separated values with a header row. Missing values are empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvExporter;

impl PinExporter for CsvExporter {
    fn extension(&self) -> &'static str {
        "csv"
    }

    fn write_records(&self, w: &mut dyn Write, records: &[PinRecord]) -> Result<()> {
        writeln!(w, "{}", RECORD_HEADER)?;
        for r in records {
            write!(
                w,
                "{},{},{},{},{},{},",
                r.spiral_id, r.raster_id, r.ring, r.position, r.x, r.y
            )?;
            if let Some(value) = r.value {
                write!(w, "{}", value)?;
            }
            writeln!(w)?;
        }
        Ok(())
    }
}

/// A JSON array of record objects.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonExporter;

impl PinExporter for JsonExporter {
    fn extension(&self) -> &'static str {
        "json"
    }

    fn write_records(&self, w: &mut dyn Write, records: &[PinRecord]) -> Result<()> {
        serde_json::to_writer_pretty(&mut *w, records)?;
        writeln!(w)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Format {
    #[default]
    Csv,
    Json,
}

impl Format {
    pub fn exporter(&self) -> &'static dyn PinExporter {
        match self {
            Format::Csv => &CsvExporter,
            Format::Json => &JsonExporter,
        }
    }
}

/// Write the spiral to raster id table.
pub fn write_mapping_csv(w: &mut dyn Write, mapping: &[IdMapping]) -> Result<()> {
    writeln!(w, "{}", MAPPING_HEADER)?;
    for m in mapping {
        writeln!(w, "{},{}", m.spiral_id, m.raster_id)?;
    }
    Ok(())
}

/// Files produced by [`write_outputs`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Written {
    pub pin_data: PathBuf,
    pub mapping: PathBuf,
}

/// Write `pin_data.<ext>` and `id_mapping.csv` into `dir`, creating it if needed.
pub fn write_outputs(
    dir: &Path,
    format: Format,
    records: &[PinRecord],
    mapping: &[IdMapping],
) -> Result<Written> {
    fs::create_dir_all(dir)?;

    let exporter = format.exporter();
    let pin_data = dir.join(format!("{}.{}", PIN_DATA_STEM, exporter.extension()));
    let mut w = BufWriter::new(File::create(&pin_data)?);
    exporter.write_records(&mut w, records)?;
    w.flush()?;

    let mapping_path = dir.join(MAPPING_FILE);
    let mut w = BufWriter::new(File::create(&mapping_path)?);
    write_mapping_csv(&mut w, mapping)?;
    w.flush()?;

    Ok(Written {
        pin_data,
        mapping: mapping_path,
    })
}
