//! Hexpin binary
//!
//! Builds a hexagonal pin lattice, numbers it both ways, optionally assigns
//! values with an interpolation strategy and writes the results to disk.

mod error;
mod export;

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use hexpin_lattice::{AssignmentConfig, ControlValues, Layout, PinAssignment, RowTolerance, StrategyKind};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::{Error, Result};
use crate::export::{write_outputs, Format, Written};

#[derive(Parser, Debug)]
#[command(name = "hexpin")]
#[command(about = "Hexagonal pin lattice numbering and value assignment")]
#[command(version)]
struct Cli {
    /// Interpolation strategy. Without one only ids and coordinates are written.
    #[command(subcommand)]
    command: Option<Commands>,

    /// Number of rings, center pin included
    #[arg(short, long, conflicts_with = "total_pins")]
    rings: Option<u64>,

    /// Minimum total pin count; rounded up to whole rings
    #[arg(short = 'n', long)]
    total_pins: Option<i64>,

    /// Center-to-center pin spacing
    #[arg(short, long)]
    pitch: Option<f64>,

    /// Vertical tolerance for grouping pins into raster rows
    #[arg(long, conflicts_with = "row_digits")]
    row_epsilon: Option<f64>,

    /// Row tolerance as a number of decimal places (6 means 1e-6)
    #[arg(long)]
    row_digits: Option<u8>,

    /// Pin data output format
    #[arg(short, long, value_enum, default_value_t = Format::Csv)]
    format: Format,

    /// Directory receiving pin_data and id_mapping.csv
    #[arg(short, long, env = "HEXPIN_OUTPUT_DIR", default_value = "output")]
    output_dir: PathBuf,

    /// JSON file with named control values, overridden by strategy flags
    #[arg(short, long)]
    controls: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Center peak blended towards an outer peak/minimum by angle
    ThreePoint(ThreePointArgs),
    /// Center peak blended towards six hexagon vertex values
    SevenPoint(SevenPointArgs),
}

#[derive(Args, Debug)]
struct ThreePointArgs {
    #[arg(long)]
    center_peak: Option<f64>,

    #[arg(long)]
    outer_peak: Option<f64>,

    #[arg(long)]
    outer_min: Option<f64>,
}

#[derive(Args, Debug)]
struct SevenPointArgs {
    #[arg(long)]
    center_peak: Option<f64>,

    /// Vertex values counter-clockwise from the 0° vertex (repeat or comma separate)
    #[arg(long = "vertex", value_delimiter = ',', allow_negative_numbers = true)]
    vertices: Vec<f64>,
}

impl Cli {
    /// Environment defaults overlaid with command line flags.
    fn assignment_config(&self) -> Result<AssignmentConfig> {
        let mut config = AssignmentConfig::from_env();

        if let Some(rings) = self.rings {
            config.layout = Layout::Rings(rings);
        }
        if let Some(total) = self.total_pins {
            config.layout = Layout::TotalPins(total);
        }
        if let Some(pitch) = self.pitch {
            config.pitch = pitch;
        }
        if let Some(epsilon) = self.row_epsilon {
            config.row_tolerance = RowTolerance::new(epsilon)?;
        }
        if let Some(digits) = self.row_digits {
            config.row_tolerance = RowTolerance::from_decimal_digits(digits);
        }

        let mut controls = match &self.controls {
            Some(path) => load_controls(path)?,
            None => ControlValues::new(),
        };

        config.strategy = match &self.command {
            None => None,
            Some(Commands::ThreePoint(args)) => {
                let flags = [
                    (ControlValues::CENTER_PEAK, args.center_peak),
                    (ControlValues::OUTER_PEAK, args.outer_peak),
                    (ControlValues::OUTER_MIN, args.outer_min),
                ];
                for (name, value) in flags {
                    if let Some(value) = value {
                        controls.set(name, value);
                    }
                }
                Some(StrategyKind::ThreePoint)
            }
            Some(Commands::SevenPoint(args)) => {
                if let Some(value) = args.center_peak {
                    controls.set(ControlValues::CENTER_PEAK, value);
                }
                if !args.vertices.is_empty() {
                    controls = controls.with_vertices(args.vertices.clone());
                }
                Some(StrategyKind::SevenPoint)
            }
        };
        config.controls = controls;

        Ok(config)
    }
}

fn load_controls(path: &Path) -> Result<ControlValues> {
    let controls_error = |reason: String| Error::Controls {
        path: path.to_path_buf(),
        reason,
    };
    let text = std::fs::read_to_string(path).map_err(|e| controls_error(e.to_string()))?;
    serde_json::from_str(&text).map_err(|e| controls_error(e.to_string()))
}

/// Run the pipeline and write its outputs.
fn run(cli: &Cli) -> Result<Written> {
    let config = cli.assignment_config()?;
    let assignment = PinAssignment::run(&config)?;

    if let Some(size) = assignment.sizing() {
        println!(
            "{} pins requested -> {} rings, {} pins ({} extra)",
            size.requested,
            size.rings,
            size.actual_pins,
            size.overshoot()
        );
    }

    let records = assignment.records()?;
    let mapping = assignment.id_mapping()?;
    let written = write_outputs(&cli.output_dir, cli.format, &records, &mapping)?;

    info!(
        pins = records.len(),
        strategy = assignment.strategy().map(|s| s.kind().as_str()).unwrap_or("none"),
        "wrote {} and {}",
        written.pin_data.display(),
        written.mapping.display()
    );
    Ok(written)
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hexpin=info,hexpin_lattice=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    run(&cli)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexpin_lattice::{ConfigurationError, StrategyError};

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("hexpin").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn rings_and_total_pins_conflict() {
        let err = Cli::try_parse_from(["hexpin", "--rings", "3", "--total-pins", "10"]);
        assert!(err.is_err());
    }

    #[test]
    fn flags_override_config() {
        let cli = parse(&["--total-pins", "10", "--pitch", "2.5", "--row-epsilon", "1e-4"]);
        let config = cli.assignment_config().unwrap();
        assert_eq!(config.layout, Layout::TotalPins(10));
        assert_eq!(config.pitch, 2.5);
        assert_eq!(config.row_tolerance.epsilon(), 1e-4);
        assert_eq!(config.strategy, None);
    }

    #[test]
    fn row_digits_set_the_tolerance() {
        let cli = parse(&["--rings", "3", "--row-digits", "3"]);
        let config = cli.assignment_config().unwrap();
        assert_eq!(config.row_tolerance.epsilon(), 1e-3);

        let both = Cli::try_parse_from(["hexpin", "--row-digits", "3", "--row-epsilon", "1e-3"]);
        assert!(both.is_err());
    }

    #[test]
    fn bad_row_epsilon_is_a_configuration_error() {
        let cli = parse(&["--rings", "3", "--row-epsilon", "0"]);
        assert!(matches!(
            cli.assignment_config(),
            Err(Error::Lattice(hexpin_lattice::Error::Configuration(
                ConfigurationError::InvalidRowTolerance { .. }
            )))
        ));
    }

    #[test]
    fn three_point_flags_become_controls() {
        let cli = parse(&["--rings", "3", "three-point", "--center-peak", "120", "--outer-min", "40"]);
        let config = cli.assignment_config().unwrap();
        assert_eq!(config.strategy, Some(StrategyKind::ThreePoint));
        assert_eq!(config.controls.get(ControlValues::CENTER_PEAK), Some(120.0));
        assert_eq!(config.controls.get(ControlValues::OUTER_MIN), Some(40.0));
        assert_eq!(config.controls.get(ControlValues::OUTER_PEAK), None);
    }

    #[test]
    fn seven_point_vertices_accept_lists_and_repeats() {
        let cli = parse(&["seven-point", "--vertex", "90,85,80", "--vertex", "75", "--vertex", "-1"]);
        let config = cli.assignment_config().unwrap();
        assert_eq!(config.strategy, Some(StrategyKind::SevenPoint));
        assert_eq!(config.controls.vertex_values(), Some(&[90.0, 85.0, 80.0, 75.0, -1.0][..]));
    }

    #[test]
    fn controls_file_is_merged_under_flags() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("controls.json");
        std::fs::write(&path, r#"{"center_peak": 150, "outer_peak": 90}"#).unwrap();

        let cli = parse(&[
            "--controls",
            path.to_str().unwrap(),
            "three-point",
            "--center-peak",
            "110",
        ]);
        let config = cli.assignment_config().unwrap();
        assert_eq!(config.controls.get(ControlValues::CENTER_PEAK), Some(110.0));
        assert_eq!(config.controls.get(ControlValues::OUTER_PEAK), Some(90.0));
    }

    #[test]
    fn unreadable_controls_file_names_the_path() {
        let cli = parse(&["--controls", "/nonexistent/controls.json"]);
        let err = cli.assignment_config().unwrap_err();
        assert!(err.to_string().contains("/nonexistent/controls.json"));
    }

    #[test]
    fn end_to_end_writes_values_and_mapping() {
        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("out");
        let cli = parse(&[
            "--rings",
            "3",
            "--output-dir",
            out.to_str().unwrap(),
            "three-point",
        ]);

        let written = run(&cli).unwrap();
        assert_eq!(written.pin_data, out.join("pin_data.csv"));

        let data = std::fs::read_to_string(&written.pin_data).unwrap();
        let mut lines = data.lines();
        assert_eq!(lines.next(), Some(export::RECORD_HEADER));
        let rows: Vec<&str> = lines.collect();
        assert_eq!(rows.len(), 19);
        // center pin first, spiral 0, with the default center peak
        assert!(rows[0].starts_with("0,"));
        assert!(rows[0].ends_with(",100"));

        let mapping = std::fs::read_to_string(&written.mapping).unwrap();
        assert_eq!(mapping.lines().count(), 20);
    }

    #[test]
    fn unknown_control_fails_before_writing() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("controls.json");
        std::fs::write(&path, r#"{"outer_peak": 90}"#).unwrap();
        let out = tmp.path().join("out");

        let cli = parse(&[
            "--rings",
            "2",
            "--controls",
            path.to_str().unwrap(),
            "--output-dir",
            out.to_str().unwrap(),
            "seven-point",
        ]);
        let err = run(&cli).unwrap_err();
        assert!(matches!(
            err,
            Error::Lattice(hexpin_lattice::Error::Strategy(StrategyError::UnknownControl { .. }))
        ));
        assert!(!out.exists());
    }
}
