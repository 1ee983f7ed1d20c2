#![forbid(unsafe_code)]

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use field_tiling::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

pub const MAIN_FIELDS_FILE: &str = "MainFields.csv";
pub const SUB_FIELDS_FILE: &str = "SubFields.csv";

/// Installs a `tracing` subscriber honoring `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum DiagonalArg {
    XExtent,
    Euclidean,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum AssignmentArg {
    Direct,
    FirstOverlap,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum TilingArg {
    Overshoot,
    Clip,
}

impl From<DiagonalArg> for DiagonalMode {
    fn from(value: DiagonalArg) -> Self {
        match value {
            DiagonalArg::XExtent => DiagonalMode::XExtent,
            DiagonalArg::Euclidean => DiagonalMode::Euclidean,
        }
    }
}

impl From<AssignmentArg> for AssignmentStrategy {
    fn from(value: AssignmentArg) -> Self {
        match value {
            AssignmentArg::Direct => AssignmentStrategy::Direct,
            AssignmentArg::FirstOverlap => AssignmentStrategy::FirstOverlap,
        }
    }
}

impl From<TilingArg> for TileMode {
    fn from(value: TilingArg) -> Self {
        match value {
            TilingArg::Overshoot => TileMode::Overshoot,
            TilingArg::Clip => TileMode::Clip,
        }
    }
}

#[derive(Debug, Parser)]
#[command(author, version, about = "Generate main fields and subfields for care areas")]
pub struct Cli {
    /// Headerless CSV of care areas: ID,Xmin,Xmax,Ymin,Ymax
    #[arg(long)]
    pub care_areas: PathBuf,

    /// CSV with "Main Field Size" and "Sub Field size" columns
    #[arg(long)]
    pub metadata: Option<PathBuf>,

    /// Override the minimum main field size from the metadata file
    #[arg(long)]
    pub main_field_size: Option<f64>,

    /// Override the subfield size from the metadata file
    #[arg(long)]
    pub sub_field_size: Option<f64>,

    /// Directory for MainFields.csv and SubFields.csv
    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,

    #[arg(long, value_enum, default_value_t = DiagonalArg::XExtent)]
    pub diagonal: DiagonalArg,

    #[arg(long, value_enum, default_value_t = AssignmentArg::Direct)]
    pub assignment: AssignmentArg,

    #[arg(long, value_enum, default_value_t = TilingArg::Overshoot)]
    pub tiling: TilingArg,

    /// Fail instead of reporting care areas that get no subfields
    #[arg(long)]
    pub strict: bool,
}

impl Cli {
    /// Builds the run configuration from the metadata file and command-line overrides.
    pub fn plan_config(&self) -> Result<PlanConfig> {
        let metadata = match &self.metadata {
            Some(path) => Some(
                read_metadata(open(path)?)
                    .with_context(|| format!("reading metadata {}", path.display()))?,
            ),
            None => None,
        };

        let main_field_size = match (self.main_field_size, metadata) {
            (Some(size), _) => size,
            (None, Some(m)) => m.main_field_size,
            (None, None) => bail!("--main-field-size is required without --metadata"),
        };
        let sub_field_size = match (self.sub_field_size, metadata) {
            (Some(size), _) => size,
            (None, Some(m)) => m.sub_field_size,
            (None, None) => bail!("--sub-field-size is required without --metadata"),
        };

        let policy = if self.strict {
            UnassignedPolicy::Fail
        } else {
            UnassignedPolicy::Report
        };
        let config = PlanConfig::new(main_field_size, sub_field_size)
            .with_diagonal(self.diagonal.into())
            .with_assignment(self.assignment.into())
            .with_tiling(self.tiling.into())
            .with_unassigned_policy(policy);
        config.validate()?;
        Ok(config)
    }
}

fn open(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    Ok(BufReader::new(file))
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    Ok(BufWriter::new(file))
}

/// Reads the inputs, runs the pipeline and writes both output tables.
pub fn run(cli: &Cli) -> Result<PlanResult> {
    let config = cli.plan_config()?;
    let care_areas = read_care_areas(open(&cli.care_areas)?)
        .with_context(|| format!("reading care areas {}", cli.care_areas.display()))?;
    info!(
        "Loaded {} care areas from {}.",
        care_areas.len(),
        cli.care_areas.display()
    );

    let result = PlanRunner::try_new(config)?.run(&care_areas)?;

    std::fs::create_dir_all(&cli.out_dir)
        .with_context(|| format!("creating {}", cli.out_dir.display()))?;
    let main_path = cli.out_dir.join(MAIN_FIELDS_FILE);
    write_main_fields(create(&main_path)?, &result.main_fields)
        .with_context(|| format!("writing {}", main_path.display()))?;
    let sub_path = cli.out_dir.join(SUB_FIELDS_FILE);
    write_sub_fields(create(&sub_path)?, &result.sub_fields)
        .with_context(|| format!("writing {}", sub_path.display()))?;

    Ok(result)
}
