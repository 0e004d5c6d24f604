//! This is the main entry point for the `wheel2conda` binary.

use clap::Parser;
use miette::IntoDiagnostic;
use tracing_subscriber::{fmt, prelude::*};
use wheel2conda::{
    console_utils::{IndicatifWriter, TracingFormatter, get_default_env_filter},
    convert_wheel,
    opt::App,
};

fn main() -> miette::Result<()> {
    let args = App::parse();
    let config = args.configuration();

    tracing_subscriber::registry()
        .with(get_default_env_filter(args.verbose.tracing_level_filter()).into_diagnostic()?)
        .with(
            fmt::layer()
                .with_writer(IndicatifWriter::new(config.multi_progress.clone()))
                .event_format(TracingFormatter),
        )
        .init();

    let packages = convert_wheel(&args.wheel_file, &config)?;
    tracing::debug!("wrote {} packages", packages.len());

    Ok(())
}
