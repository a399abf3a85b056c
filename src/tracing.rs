use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::{Mutex, OnceLock};

use tracing_subscriber::{
    fmt::{self, format},
    prelude::*,
    reload, EnvFilter, Registry,
};

type FileLayer = fmt::Layer<Registry, format::DefaultFields, format::Format, Mutex<File>>;
type FileHandle = reload::Handle<Option<FileLayer>, Registry>;

/// Swaps the file layer in and out after the subscriber is installed.
static FILE_LAYER: OnceLock<FileHandle> = OnceLock::new();

/// Install the global subscriber: stderr always, plus an empty slot for a
/// log file. `RUST_LOG` overrides the default `info` level, and `log`
/// records are forwarded into it.
pub fn init() {
    let _ = tracing_log::LogTracer::init();

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let (file_layer, handle) = reload::Layer::new(None::<FileLayer>);

    // Only the first call installs anything; later handles would point at
    // layers that never become live.
    if FILE_LAYER.set(handle).is_err() {
        return;
    }
    let _ = tracing_subscriber::registry()
        .with(file_layer)
        .with(fmt::layer().with_writer(io::stderr))
        .with(env_filter)
        .try_init();
}

fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Start (or stop, with `None`) writing logs to `log_file` as well.
pub fn set_log_file(log_file: Option<&Path>) -> io::Result<()> {
    let Some(handle) = FILE_LAYER.get() else {
        return Ok(());
    };
    let layer = match log_file {
        Some(path) => Some(
            fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(open_log_file(path)?)),
        ),
        None => None,
    };
    handle.reload(layer).map_err(io::Error::other)
}
