//! tracing setup: console layer (pretty or JSON) plus an optional rotating file.

use std::path::Path;

use eyre::{Result, WrapErr};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Install the global subscriber. `RUST_LOG` overrides `--log-level` on the console.
/// Logs go to stderr so stdout stays machine-readable.
///
/// The returned guard flushes the file writer on drop; hold it until exit.
pub fn init_tracing(
    json: bool,
    level: &str,
    cfg: &aqi_config::Logging,
) -> Result<Option<WorkerGuard>> {
    let console_filter = match EnvFilter::try_from_default_env() {
        Ok(f) => f,
        Err(_) => EnvFilter::try_new(level)
            .wrap_err_with(|| format!("invalid log level {level:?}"))?,
    };
    let console: BoxedLayer = if json {
        fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_filter(console_filter)
            .boxed()
    } else {
        fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
            .with_filter(console_filter)
            .boxed()
    };

    let mut layers = vec![console];
    let mut guard = None;
    if let Some(path) = cfg.file.as_deref() {
        let (layer, g) = file_layer(Path::new(path), cfg)?;
        layers.push(layer);
        guard = Some(g);
    }

    tracing_subscriber::registry()
        .with(layers)
        .try_init()
        .wrap_err("install tracing subscriber")?;
    Ok(guard)
}

/// JSON lines to `path`, rotated per `logging.rotation` (never|daily|hourly).
fn file_layer(path: &Path, cfg: &aqi_config::Logging) -> Result<(BoxedLayer, WorkerGuard)> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let name = path
        .file_name()
        .ok_or_else(|| eyre::eyre!("logging.file {:?} has no file name", path))?;
    std::fs::create_dir_all(dir).wrap_err_with(|| format!("create log directory {dir:?}"))?;

    let appender = match cfg.rotation.as_deref().unwrap_or("never") {
        "daily" => tracing_appender::rolling::daily(dir, name),
        "hourly" => tracing_appender::rolling::hourly(dir, name),
        _ => tracing_appender::rolling::never(dir, name),
    };
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_new(cfg.level.as_deref().unwrap_or("info"))
        .wrap_err("invalid logging.level")?;
    let layer = fmt::layer()
        .json()
        .with_ansi(false)
        .with_writer(writer)
        .with_filter(filter)
        .boxed();
    Ok((layer, guard))
}
