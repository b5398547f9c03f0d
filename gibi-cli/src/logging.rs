use std::{
    fs::File,
    io::{self, IsTerminal},
    path::Path,
    sync::Mutex,
};

use anyhow::{Context, Result};
use chrono::Local;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{
    EnvFilter,
    fmt::{
        FmtContext,
        format::{FormatEvent, FormatFields, Writer},
    },
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
};

// --- Formatter ---

/// `<time of day> <LEVEL> [<module>] <fields>`, colored on a terminal. The
/// module is the last path segment of the event target.
struct CompactFmt;

/// Last `::` segment of a tracing target, e.g. `common` for
/// `gibi_core::calculations::common`.
fn short_target(target: &str) -> &str {
    target.rsplit("::").next().unwrap_or(target)
}

fn level_color(level: Level) -> &'static str {
    match level {
        Level::ERROR => "\x1b[1;31m",
        Level::WARN => "\x1b[1;33m",
        Level::INFO => "\x1b[1;32m",
        Level::DEBUG => "\x1b[1;34m",
        Level::TRACE => "\x1b[1;35m",
    }
}

impl<S, N> FormatEvent<S, N> for CompactFmt
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        let time = Local::now().format("%H:%M:%S%.3f");
        let module = short_target(meta.target());

        if writer.has_ansi_escapes() {
            write!(
                writer,
                "\x1b[2m{time}\x1b[0m {}{:<5}\x1b[0m \x1b[2m[{module}]\x1b[0m ",
                level_color(*meta.level()),
                meta.level()
            )?;
        } else {
            write!(writer, "{time} {:<5} [{module}] ", meta.level())?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

// --- Public API ---

/// Picks the log filter: `--log-level` first, then `RUST_LOG`, then the
/// configuration file.
///
/// Accepts a bare level (`"warn"`) or any full `EnvFilter` directive.
pub fn resolve_filter(
    cli_level: Option<&str>,
    config_level: &str,
) -> Result<EnvFilter> {
    if let Some(level) = cli_level {
        return EnvFilter::try_new(level)
            .map_err(|e| anyhow::anyhow!("invalid log level '{level}': {e}"));
    }
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(config_level)
        .map_err(|e| anyhow::anyhow!("invalid log level '{config_level}' in config: {e}"))
}

/// Initializes logging. Call once at startup.
///
/// - Stderr: colored when attached to a terminal, plain when piped. Stdout
///   stays reserved for results.
/// - File: appended to when `file` is given. The directory must exist.
///
/// A second call is a no-op.
pub fn init_logging(
    filter: EnvFilter,
    file: Option<&Path>,
) -> Result<()> {
    let stderr_layer = tracing_subscriber::fmt::layer()
        .event_format(CompactFmt)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr);

    let file_layer = file
        .map(|path| {
            File::options()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("cannot open log file '{}'", path.display()))
        })
        .transpose()?
        .map(|file| {
            tracing_subscriber::fmt::layer()
                .event_format(CompactFmt)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
        });

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_target_keeps_the_last_module() {
        assert_eq!(short_target("gibi_core::calculations::common"), "common");
        assert_eq!(short_target("gibi_cli::csv_loader"), "csv_loader");
        assert_eq!(short_target("gibi"), "gibi");
    }

    #[test]
    fn cli_level_wins() {
        let filter = resolve_filter(Some("debug"), "error").unwrap();

        assert_eq!(filter.to_string(), "debug");
    }

    #[test]
    fn full_directives_are_accepted() {
        assert!(resolve_filter(Some("info,gibi_core=trace"), "info").is_ok());
    }

    #[test]
    fn invalid_cli_level_is_rejected() {
        let err = resolve_filter(Some("gibi_core=loud"), "info").unwrap_err();

        assert!(err.to_string().contains("invalid log level"));
    }
}
