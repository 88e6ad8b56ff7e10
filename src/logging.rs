//! Tracing setup for the binary.
//!
//! One registry with an EnvFilter derived from `LogLevel` (RUST_LOG is not read),
//! a stdout layer and, when `--log-file` is given and safe to open, a
//! non-blocking file layer. `--json` switches both layers to JSON events.
//! A log path below a symlinked folder is refused with a warning.

use anyhow::Result;
use batch_mover::output as out;
use batch_mover::{LogLevel, open_log_file_append, path_has_symlink_ancestor};
use chrono::Local;
use std::fmt as stdfmt;
use std::path::Path;
use tracing::Subscriber;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::Layer;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::fmt as tsfmt;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;

/// Human-friendly timestamp formatter (DD/MM/YY HH:MM:SS)
struct LocalHumanTime;
impl FormatTime for LocalHumanTime {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> stdfmt::Result {
        let now = Local::now();
        write!(w, "{}", now.format("%d/%m/%y %H:%M:%S"))
    }
}

/// Level for our own crate: each LogLevel maps one step more verbose, so
/// `info` shows the per-file debug events.
fn crate_level(lvl: &LogLevel) -> LevelFilter {
    match lvl {
        LogLevel::Quiet => LevelFilter::ERROR,
        LogLevel::Normal => LevelFilter::INFO,
        LogLevel::Info => LevelFilter::DEBUG,
        LogLevel::Debug => LevelFilter::TRACE,
    }
}

/// Dependencies stay at WARN whatever the level.
fn env_filter_for(lvl: &LogLevel) -> EnvFilter {
    let level = crate_level(lvl).to_string().to_ascii_lowercase();
    EnvFilter::new(format!("warn,batch_mover={level}"))
}

/// Open the log file behind a non-blocking writer, or say why not.
fn open_log_writer(path: &Path) -> Result<(NonBlocking, WorkerGuard), String> {
    match path_has_symlink_ancestor(path) {
        Ok(false) => {}
        Ok(true) => return Err("a parent folder is a symlink".into()),
        Err(e) => return Err(format!("cannot check parent folders: {e}")),
    }
    open_log_file_append(path)
        .map(tracing_appender::non_blocking)
        .map_err(|e| format!("cannot open file: {e}"))
}

/// Console layer: compact text, or JSON with targets when `json` is set.
fn stdout_layer<S>(json: bool) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'a> LookupSpan<'a> + 'static,
{
    let base = tsfmt::layer().with_timer(LocalHumanTime);
    if json {
        base.event_format(tsfmt::format().json().with_timer(LocalHumanTime))
            .boxed()
    } else {
        base.with_target(false).compact().boxed()
    }
}

/// File layer: same format choice as stdout, always with targets and no ANSI codes.
fn file_layer<S>(json: bool, writer: NonBlocking) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'a> LookupSpan<'a> + 'static,
{
    let base = tsfmt::layer()
        .with_timer(LocalHumanTime)
        .with_ansi(false)
        .with_writer(writer);
    if json {
        base.event_format(tsfmt::format().json().with_timer(LocalHumanTime))
            .boxed()
    } else {
        base.compact().boxed()
    }
}

/// Initialize tracing based on LogLevel and format. Returns a WorkerGuard when a
/// file layer was added; hold it until exit so buffered lines are flushed.
pub fn init_tracing(
    lvl: &LogLevel,
    log_file: Option<&Path>,
    json: bool,
) -> Result<Option<WorkerGuard>> {
    let env_filter = env_filter_for(lvl);

    let writer = log_file.and_then(|path| match open_log_writer(path) {
        Ok(w) => Some(w),
        Err(why) => {
            out::print_warn(&format!(
                "File logging to '{}' disabled ({why}); logging to stdout only.",
                path.display()
            ));
            None
        }
    });
    let (file, guard) = match writer {
        Some((w, g)) => (Some(file_layer(json, w)), Some(g)),
        None => (None, None),
    };

    registry()
        .with(env_filter)
        .with(stdout_layer(json))
        .with(file)
        .try_init()?;
    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_map_one_step_more_verbose() {
        assert_eq!(crate_level(&LogLevel::Quiet), LevelFilter::ERROR);
        assert_eq!(crate_level(&LogLevel::Normal), LevelFilter::INFO);
        assert_eq!(crate_level(&LogLevel::Info), LevelFilter::DEBUG);
        assert_eq!(crate_level(&LogLevel::Debug), LevelFilter::TRACE);
    }

    #[test]
    fn filter_scopes_to_crate() {
        let f = env_filter_for(&LogLevel::Info);
        assert!(f.to_string().contains("batch_mover=debug"), "got: {f}");
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_log_folder_is_refused() {
        use std::os::unix::fs::symlink;
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("real")).unwrap();
        symlink(dir.path().join("real"), dir.path().join("link")).unwrap();
        let why = open_log_writer(&dir.path().join("link/run.log")).unwrap_err();
        assert!(why.contains("symlink"), "got: {why}");
        assert!(!dir.path().join("real/run.log").exists());
    }
}
