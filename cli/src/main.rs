//! Create MRIcroGL `.clut` lookup tables from colormaps.

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

use color2clut::{colormap, max_error, reduce, sample, Clut, Error,
                 DEFAULT_COLORMAPS};

/// Number of dense samples taken from every colormap.
const SAMPLES: usize = 256;

#[derive(Parser)]
#[command(name = "color2clut",
          about = "Create MRIcroGL .clut lookup tables from colormaps")]
struct Cli {
    /// Colormap name (e.g. viridis); converts the default list when
    /// omitted
    name: Option<String>,

    /// Output directory for .clut files
    #[arg(short, long, default_value = ".")]
    outdir: PathBuf,

    /// Maximum allowed per-channel interpolation error
    #[arg(short, long, default_value_t = 2)]
    tol: u8,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("setting default subscriber failed");
}

/// Convert one colormap and report the written file.
fn process_one(name: &str, outdir: &Path, tol: u8) -> Result<()> {
    let curve = colormap(name)?;
    let samples = sample(curve.as_ref(), SAMPLES)?;
    let kept = reduce(&samples, tol);
    debug!("{name}: residual error {}", max_error(&samples, &kept));
    let path = outdir.join(format!("{name}.clut"));
    let mut out = BufWriter::new(File::create(&path)
        .with_context(|| format!("cannot create {}", path.display()))?);
    Clut::from_samples(&samples, &kept).write(&mut out)?;
    out.flush()?;
    println!("Wrote {}  (sampled={SAMPLES} -> nodes={})",
             path.display(), kept.len());
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    if let Err(e) = fs::create_dir_all(&cli.outdir) {
        eprintln!("cannot create {}: {e}", cli.outdir.display());
        return ExitCode::FAILURE;
    }

    match &cli.name {
        Some(name) => match process_one(name, &cli.outdir, cli.tol) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("{name}: {e:#}");
                // An unknown name is the caller's mistake and gets a
                // distinct exit code.
                match e.downcast_ref::<Error>() {
                    Some(Error::UnknownColormap(_)) => ExitCode::from(2),
                    _ => ExitCode::FAILURE,
                }
            }
        },
        None => {
            info!("no name given, converting the default list");
            for name in DEFAULT_COLORMAPS {
                if let Err(e) = process_one(name, &cli.outdir, cli.tol) {
                    println!("Skipping '{name}': {e:#}");
                }
            }
            ExitCode::SUCCESS
        }
    }
}
