//! Log output that plays well with progress bars

use std::io;

use indicatif::MultiProgress;
use tracing_core::{Event, Subscriber};
use tracing_subscriber::{
    EnvFilter,
    filter::{LevelFilter, ParseError},
    fmt::{
        FmtContext, FormatEvent, FormatFields, MakeWriter,
        format::{self, Format},
    },
    registry::LookupSpan,
};

/// Writes log lines to stdout above the progress bars
#[derive(Clone)]
pub struct IndicatifWriter {
    progress_bars: MultiProgress,
}

impl IndicatifWriter {
    /// Create a writer that suspends `pb` while printing
    pub fn new(pb: MultiProgress) -> Self {
        Self { progress_bars: pb }
    }
}

impl io::Write for IndicatifWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.progress_bars.suspend(|| io::stdout().write(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.progress_bars.suspend(|| io::stdout().flush())
    }
}

impl<'a> MakeWriter<'a> for IndicatifWriter {
    type Writer = IndicatifWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Prints our own INFO events as bare messages and everything else in the
/// default format
pub struct TracingFormatter;

impl<S, N> FormatEvent<S, N> for TracingFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: format::Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let metadata = event.metadata();

        if *metadata.level() == tracing_core::metadata::Level::INFO
            && metadata.target().starts_with("wheel2conda")
        {
            ctx.format_fields(writer.by_ref(), event)?;
            writeln!(writer)
        } else {
            Format::default().format_event(ctx, writer, event)
        }
    }
}

/// The log filter for a verbosity level. A `RUST_LOG` environment variable
/// replaces it entirely.
pub fn get_default_env_filter(verbose: LevelFilter) -> Result<EnvFilter, ParseError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => verbosity_filter(verbose),
    }
}

fn verbosity_filter(verbose: LevelFilter) -> Result<EnvFilter, ParseError> {
    // other crates stay at warnings unless tracing everything
    let others = if verbose == LevelFilter::TRACE {
        verbose
    } else {
        verbose.min(LevelFilter::WARN)
    };

    // also covers the wheel2conda_* library crates
    EnvFilter::builder()
        .with_default_directive(others.into())
        .parse(format!("wheel2conda={verbose}"))
}
