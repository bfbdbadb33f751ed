//! Read a DXF file, report its diagnostics and write it back.
//!
//! ```text
//! dxf_roundtrip <input.dxf> [output.dxf] [--version R14] [--flatland] [--skip-invalid] [--trace]
//! ```

use anyhow::{bail, Context};
use dxf_codec::{
    Drawing, DxfConfiguration, DxfVersion, DxfWriter, InvalidEntityPolicy, NotificationCollection,
    NotificationType,
};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

struct Options {
    input: PathBuf,
    output: Option<PathBuf>,
    version: Option<DxfVersion>,
    flatland: bool,
    skip_invalid: bool,
    trace: bool,
}

fn parse_args() -> anyhow::Result<Options> {
    let mut args = std::env::args().skip(1);
    let mut positional = Vec::new();
    let mut options = Options {
        input: PathBuf::new(),
        output: None,
        version: None,
        flatland: false,
        skip_invalid: false,
        trace: false,
    };

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" => {
                let Some(value) = args.next() else {
                    bail!("`--version` needs a release name such as R12 or AC1015");
                };
                match DxfVersion::from_version_string(&value) {
                    Some(version) => options.version = Some(version),
                    None => bail!("unknown DXF version '{}'", value),
                }
            }
            "--flatland" => options.flatland = true,
            "--skip-invalid" => options.skip_invalid = true,
            "--trace" => options.trace = true,
            other if other.starts_with("--") => bail!("unknown option {}", other),
            _ => positional.push(PathBuf::from(arg)),
        }
    }

    let mut positional = positional.into_iter();
    match positional.next() {
        Some(input) => options.input = input,
        None => bail!(
            "usage: dxf_roundtrip <input.dxf> [output.dxf] [--version R14] [--flatland] [--skip-invalid] [--trace]"
        ),
    }
    options.output = positional.next();
    Ok(options)
}

fn init_logging(trace: bool) {
    let default = if trace { "dxf_codec=trace" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    fmt().with_env_filter(filter).with_target(false).init();
}

fn report(notifications: &NotificationCollection) {
    for notification in notifications {
        match notification.notification_type {
            NotificationType::Error | NotificationType::Warning => warn!("{}", notification),
            _ => info!("{}", notification),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let options = parse_args()?;
    init_logging(options.trace);

    let read_config = DxfConfiguration::default().with_debug_trace(options.trace);
    let drawing = Drawing::read_file(&options.input, read_config)
        .with_context(|| format!("reading {}", options.input.display()))?;

    info!(
        path = %options.input.display(),
        version = %drawing.version,
        entities = drawing.entities.len(),
        objects = drawing.objects.len(),
        "read drawing"
    );
    report(&drawing.notifications);

    if let Some(output) = &options.output {
        let write_config = DxfConfiguration::new(options.version.unwrap_or(drawing.version))
            .with_flatland(options.flatland)
            .with_debug_trace(options.trace);
        let policy = if options.skip_invalid {
            InvalidEntityPolicy::Skip
        } else {
            InvalidEntityPolicy::Abort
        };
        let notifications = DxfWriter::new(write_config)
            .with_invalid_entity_policy(policy)
            .write_to_file(&drawing, output)
            .with_context(|| format!("writing {}", output.display()))?;
        report(&notifications);
        info!(path = %output.display(), version = %write_config.version, "wrote drawing");
    }
    Ok(())
}
