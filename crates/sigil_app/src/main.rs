//! Sigil - MIME type and image dimension detection by magic bytes.

mod report;

use anyhow::{Context, Result};
use clap::Parser;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use report::Report;
use sigil_core::{DetectError, Detector, DetectorConfig, PrefixPolicy, Source, StreamSource};

#[derive(Parser, Debug)]
#[command(name = "sigil")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Files to inspect; `-` reads standard input
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Also report pixel dimensions of image inputs
    #[arg(short, long, default_value_t = false)]
    dimensions: bool,

    /// Fail instead of skipping signatures longer than the input
    #[arg(long, default_value_t = false)]
    strict: bool,

    /// Print one JSON object per input
    #[arg(long, default_value_t = false)]
    json: bool,

    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let detector = Detector::with_config(DetectorConfig {
        prefix_policy: if args.strict {
            PrefixPolicy::Strict
        } else {
            PrefixPolicy::Lenient
        },
    });

    let mut failures = 0;
    for input in &args.inputs {
        let report = inspect(&detector, input, args.dimensions);
        if report.error.is_some() {
            failures += 1;
        }

        if args.json {
            println!("{}", serde_json::to_string(&report)?);
        } else {
            println!("{report}");
        }
    }

    if failures > 0 {
        anyhow::bail!("{} of {} inputs could not be inspected", failures, args.inputs.len());
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn inspect(detector: &Detector, input: &Path, want_dimensions: bool) -> Report {
    let name = input.display().to_string();

    let mut source = match open(input) {
        Ok(source) => source,
        Err(e) => return Report::failed(name, &e),
    };

    match detect(detector, source.as_mut(), want_dimensions) {
        Ok((mime, dimensions)) => Report::detected(name, mime, dimensions),
        Err(e) => Report::failed(name, &e),
    }
}

fn open(input: &Path) -> Result<Box<dyn Source>> {
    if input.as_os_str() == "-" {
        let mut data = Vec::new();
        std::io::stdin()
            .lock()
            .read_to_end(&mut data)
            .context("Failed to read standard input")?;
        tracing::debug!(bytes = data.len(), "buffered standard input");
        return Ok(Box::new(StreamSource::from_bytes(data)));
    }

    sigil_io::open_source(input).with_context(|| format!("Failed to open {}", input.display()))
}

fn detect(
    detector: &Detector,
    source: &mut dyn Source,
    want_dimensions: bool,
) -> Result<(sigil_core::MimeType, Option<sigil_core::Dimensions>)> {
    let mime = detector.determine_mime_type(source).map_err(annotate)?;

    let dimensions = if want_dimensions && mime.is_image() {
        Some(detector.determine_dimensions(source).map_err(annotate)?)
    } else {
        None
    };

    Ok((mime, dimensions))
}

/// Flags errors that leave the source at an unknown position.
fn annotate(err: DetectError) -> anyhow::Error {
    if err.is_fatal() {
        tracing::warn!(error = %err, "source left at an unknown position");
        anyhow::Error::new(err).context("Source left at an unknown position")
    } else {
        anyhow::Error::new(err)
    }
}
