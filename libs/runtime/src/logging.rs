use crate::config::{LoggingConfig, Section};
use crate::paths::resolve_under;
use std::{
    io::Write,
    path::Path,
    sync::{Arc, Mutex},
};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    filter::Targets, fmt, layer::SubscriberExt, util::SubscriberInitExt, Layer,
};

use file_rotate::{
    compression::Compression,
    suffix::{AppendTimestamp, FileLimit},
    ContentLimit, FileRotate,
};

// -------- level helpers --------

fn parse_level_filter(s: &str) -> LevelFilter {
    match s.to_ascii_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        "off" | "none" => LevelFilter::OFF,
        _ => LevelFilter::INFO,
    }
}

// -------- rotating writer for files --------

#[derive(Clone)]
struct RotWriter(Arc<Mutex<FileRotate<AppendTimestamp>>>);

impl<'a> fmt::MakeWriter<'a> for RotWriter {
    type Writer = RotWriterHandle;
    fn make_writer(&'a self) -> Self::Writer {
        RotWriterHandle(self.0.clone())
    }
}

#[derive(Clone)]
struct RotWriterHandle(Arc<Mutex<FileRotate<AppendTimestamp>>>);

impl Write for RotWriterHandle {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match self.0.lock() {
            Ok(mut w) => w.write(buf),
            // A poisoned lock means a panic mid-write; drop the record.
            Err(_) => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match self.0.lock() {
            Ok(mut w) => w.flush(),
            Err(_) => Ok(()),
        }
    }
}

fn create_rotating_writer(log_path: &Path, max_bytes: usize, max_backups: usize) -> Option<RotWriter> {
    if let Some(parent) = log_path.parent() {
        if std::fs::create_dir_all(parent).is_err() {
            return None;
        }
    }

    let rot = FileRotate::new(
        log_path,
        AppendTimestamp::default(FileLimit::MaxFiles(max_backups.max(1))),
        ContentLimit::BytesSurpassed(max_bytes),
        Compression::None,
        #[cfg(unix)]
        None, // file permissions (Unix only)
    );

    Some(RotWriter(Arc::new(Mutex::new(rot))))
}

// -------- target filters --------

/// Build a `Targets` filter from the "default" section plus per-crate overrides.
fn build_targets(
    cfg: &LoggingConfig,
    level_of: impl Fn(&Section) -> LevelFilter,
) -> Targets {
    let default_level = cfg
        .get("default")
        .map(|s| level_of(s))
        .unwrap_or(LevelFilter::INFO);

    let mut targets = Targets::new().with_default(default_level);
    for (name, section) in cfg {
        if name == "default" {
            continue;
        }
        targets = targets.with_target(name.clone(), level_of(section));
    }
    targets
}

// -------- public init --------

/// Initialize logging from a configuration.
/// - `cfg`: logging sections ("default" plus optional per-crate overrides)
/// - `base_dir`: base directory used to resolve relative log file paths (usually server.home_dir)
///
/// Safe to call more than once; only the first call installs the subscriber.
pub fn init_logging_from_config(cfg: &LoggingConfig, base_dir: &Path) {
    // Bridge `log` → `tracing` *before* installing the subscriber
    let _ = tracing_log::LogTracer::init();

    if cfg.is_empty() {
        init_default_logging();
        return;
    }

    let console = fmt::layer()
        .with_target(true)
        .with_filter(build_targets(cfg, |s| parse_level_filter(&s.console_level)));

    let file_layer = cfg.get("default").and_then(|section| {
        if section.file.trim().is_empty() {
            return None;
        }
        let path = resolve_under(base_dir, &section.file);
        let max_bytes = section.max_size_mb.unwrap_or(100).saturating_mul(1024 * 1024) as usize;
        let writer = create_rotating_writer(&path, max_bytes, section.max_backups.unwrap_or(3))?;
        let file_level = if section.file_level.trim().is_empty() {
            section.console_level.as_str()
        } else {
            section.file_level.as_str()
        };
        Some(
            fmt::layer()
                .with_target(true)
                .with_ansi(false)
                .with_writer(writer)
                .with_filter(build_targets(cfg, move |_s| parse_level_filter(file_level))),
        )
    });

    let _ = tracing_subscriber::registry()
        .with(console)
        .with(file_layer)
        .try_init();
}

fn init_default_logging() {
    let _ = tracing_subscriber::fmt()
        .with_target(true)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_levels() {
        assert_eq!(parse_level_filter("trace"), LevelFilter::TRACE);
        assert_eq!(parse_level_filter("DEBUG"), LevelFilter::DEBUG);
        assert_eq!(parse_level_filter("off"), LevelFilter::OFF);
        // Unknown strings fall back to info
        assert_eq!(parse_level_filter("verbose"), LevelFilter::INFO);
    }

    #[test]
    fn targets_respect_per_crate_overrides() {
        let mut cfg = LoggingConfig::new();
        cfg.insert(
            "default".into(),
            Section {
                console_level: "info".into(),
                file: String::new(),
                file_level: String::new(),
                max_backups: None,
                max_size_mb: None,
            },
        );
        cfg.insert(
            "ifs".into(),
            Section {
                console_level: "debug".into(),
                file: String::new(),
                file_level: String::new(),
                max_backups: None,
                max_size_mb: None,
            },
        );

        let targets = build_targets(&cfg, |s| parse_level_filter(&s.console_level));
        assert!(targets.would_enable("ifs::domain", &tracing::Level::DEBUG));
        assert!(!targets.would_enable("other", &tracing::Level::DEBUG));
        assert!(targets.would_enable("other", &tracing::Level::INFO));
    }
}
