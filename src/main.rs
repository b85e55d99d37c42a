use anyhow::{Context, Result};
use clap::Parser;
use ctg_scan::classifier::{load_schema, ModelInput};
use ctg_scan::extraction::{CalibrationConfig, CalibrationOverrides};
use ctg_scan::pipeline::CtgPipeline;
use ctg_scan::source::{FileSource, ImageSource};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Scanned CTG strip image
    #[arg(short, long)]
    image: PathBuf,

    /// JSON calibration profile; flags below override its fields
    #[arg(short, long)]
    calibration: Option<PathBuf>,

    /// Fraction of image height (from the top) holding the FHR trace
    #[arg(long)]
    top_ratio: Option<f64>,

    /// FHR scale of the paper grid
    #[arg(long)]
    bpm_per_cm: Option<f64>,

    /// UC scale of the paper grid
    #[arg(long)]
    toco_per_cm: Option<f64>,

    /// Paper feed speed
    #[arg(long)]
    paper_speed_cm_per_min: Option<f64>,

    /// FHR value at the bottom of the FHR band
    #[arg(long)]
    fhr_baseline_floor: Option<f64>,

    /// Physical height of paper covered by the image
    #[arg(long)]
    paper_height_cm: Option<f64>,

    /// Intensities above this (after polarity normalization) count as ink
    #[arg(long)]
    ink_threshold: Option<u8>,

    /// JSON list of the classifier's input columns; emits the aligned row
    #[arg(long)]
    schema: Option<PathBuf>,

    /// Include the calibrated FHR/UC/time series in the output
    #[arg(long)]
    signals: bool,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

impl Args {
    fn calibration(&self) -> Result<CalibrationConfig> {
        let profile = match &self.calibration {
            Some(path) => {
                tracing::info!("Loading calibration profile {}", path.display());
                CalibrationConfig::from_json_file(path)?
            }
            None => CalibrationConfig::default(),
        };

        Ok(profile.with_overrides(&self.overrides()))
    }

    fn overrides(&self) -> CalibrationOverrides {
        CalibrationOverrides {
            top_ratio: self.top_ratio,
            bpm_per_cm: self.bpm_per_cm,
            toco_per_cm: self.toco_per_cm,
            paper_speed_cm_per_min: self.paper_speed_cm_per_min,
            fhr_baseline_floor: self.fhr_baseline_floor,
            paper_height_cm: self.paper_height_cm,
            ink_threshold: self.ink_threshold,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Output<'a> {
    record: ctg_scan::ScanRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    model_input: Option<ModelInput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    signals: Option<&'a ctg_scan::CtgSignals>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging; stdout carries only the JSON result
    let log_level = if args.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = args.calibration()?;
    tracing::debug!("Calibration: {:?}", config);

    let pipeline = CtgPipeline::new(config).context("Invalid calibration")?;

    let mut source = FileSource::new(&args.image);
    let image = source.load().context("Failed to load strip image")?;

    let analysis = pipeline
        .analyze(&image)
        .with_context(|| format!("Failed to analyze {}", args.image.display()))?;

    let model_input = match &args.schema {
        Some(path) => {
            let columns = load_schema(path)?;
            Some(ModelInput::align(&analysis.features, &columns))
        }
        None => None,
    };

    let output = Output {
        record: analysis.to_record(source.reference()),
        model_input,
        signals: args.signals.then_some(&analysis.signals),
    };

    let json = if args.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{}", json);

    Ok(())
}
