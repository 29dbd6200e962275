//! Observability setup: structured logging.
//!
//! stdout is reserved for the computed version (scripts capture it), so
//! logging never writes there. Records go to a JSONL file, falling back to
//! stderr; with `-v` a human-readable copy is also written to stderr.

use anyhow::Result;
use serde_json::{Map, Value};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::Event;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::layer::{Context as LayerContext, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;

const ENV_LOG_PATH: &str = "UPCOMING_LOG_PATH";
const ENV_LOG_DIR: &str = "UPCOMING_LOG_DIR";
const DEFAULT_LOG_DIR_UNIX: &str = "/var/log";
const LOG_FILE_SUFFIX: &str = ".jsonl";

/// Configuration for observability setup.
#[derive(Clone, Debug)]
pub struct ObservabilityConfig {
    /// The service name used in log entries and the log file name.
    pub service: String,
    /// Directory for JSONL log files. Falls back to platform defaults if unset.
    pub log_dir: Option<PathBuf>,
    /// Mirror events to stderr in human-readable form.
    pub echo_stderr: bool,
}

impl ObservabilityConfig {
    /// Create config from environment variables with optional overrides.
    pub fn from_env_with_overrides(log_dir: Option<PathBuf>, echo_stderr: bool) -> Self {
        Self {
            service: env!("CARGO_PKG_NAME").to_string(),
            log_dir,
            echo_stderr,
        }
    }
}

#[derive(Clone, Debug)]
struct LogTarget {
    dir: PathBuf,
    file_name: String,
}

impl LogTarget {
    #[cfg(test)]
    fn path(&self) -> PathBuf {
        self.dir.join(&self.file_name)
    }
}

/// Guard that must be held for the lifetime of the application so buffered
/// log lines are flushed on exit.
pub struct ObservabilityGuard {
    _log_guard: tracing_appender::non_blocking::WorkerGuard,
}

/// Initialize logging.
///
/// Returns a guard that must be held for the application lifetime.
pub fn init_observability(
    cfg: &ObservabilityConfig,
    env_filter: EnvFilter,
) -> Result<ObservabilityGuard> {
    let (log_writer, log_guard) = match build_log_writer(&cfg.service, cfg.log_dir.as_deref()) {
        Ok(result) => result,
        Err(err) => {
            // Fall back to stderr, never stdout.
            eprintln!("Warning: {err}. Falling back to stderr logging.");
            tracing_appender::non_blocking(std::io::stderr())
        }
    };

    let json_layer = JsonLogLayer::new(log_writer, cfg.service.clone());
    let stderr_layer = cfg.echo_stderr.then(|| {
        tracing_subscriber::fmt::layer()
            .compact()
            .with_target(false)
            .with_writer(std::io::stderr)
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(stderr_layer)
        .try_init()?;

    tracing::debug!("observability initialized");

    Ok(ObservabilityGuard {
        _log_guard: log_guard,
    })
}

/// Build an `EnvFilter` based on CLI flags and environment.
///
/// Priority: quiet flag > verbose flag > RUST_LOG env > default_level
pub fn env_filter(quiet: bool, verbose: u8, default_level: &str) -> EnvFilter {
    if quiet {
        return EnvFilter::new("error");
    }

    if verbose > 0 {
        let level = match verbose {
            1 => "debug",
            _ => "trace",
        };
        return EnvFilter::new(level);
    }

    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

// ============================================================================
// JSON Log Layer
// ============================================================================

/// Writes one JSON object per event, with the fields of every enclosing span.
struct JsonLogLayer<W> {
    writer: W,
    service: String,
}

impl<W> JsonLogLayer<W> {
    const fn new(writer: W, service: String) -> Self {
        Self { writer, service }
    }
}

impl<S, W> tracing_subscriber::Layer<S> for JsonLogLayer<W>
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    W: for<'writer> tracing_subscriber::fmt::MakeWriter<'writer> + Send + Sync + 'static,
{
    fn on_new_span(
        &self,
        attrs: &tracing::span::Attributes<'_>,
        id: &tracing::span::Id,
        ctx: LayerContext<'_, S>,
    ) {
        if let Some(span) = ctx.span(id) {
            let mut visitor = JsonVisitor::default();
            attrs.record(&mut visitor);
            span.extensions_mut().insert(SpanFields {
                values: visitor.values,
            });
        }
    }

    fn on_record(
        &self,
        id: &tracing::span::Id,
        values: &tracing::span::Record<'_>,
        ctx: LayerContext<'_, S>,
    ) {
        if let Some(span) = ctx.span(id) {
            let mut visitor = JsonVisitor::default();
            values.record(&mut visitor);
            let mut extensions = span.extensions_mut();
            if let Some(fields) = extensions.get_mut::<SpanFields>() {
                fields.values.extend(visitor.values);
            } else {
                extensions.insert(SpanFields {
                    values: visitor.values,
                });
            }
        }
    }

    fn on_event(&self, event: &Event<'_>, ctx: LayerContext<'_, S>) {
        let mut map = Map::new();
        map.insert("timestamp".into(), Value::String(format_timestamp()));
        map.insert("service".into(), Value::String(self.service.clone()));
        map.insert(
            "level".into(),
            Value::String(event.metadata().level().as_str().to_lowercase()),
        );
        map.insert(
            "target".into(),
            Value::String(event.metadata().target().to_string()),
        );

        if let Some(scope) = ctx.event_scope(event) {
            let spans: Vec<Value> = scope
                .from_root()
                .map(|span| {
                    if let Some(fields) = span.extensions().get::<SpanFields>() {
                        map.extend(fields.values.clone());
                    }
                    Value::String(span.name().to_string())
                })
                .collect();
            map.insert("spans".into(), Value::Array(spans));
        }

        let mut visitor = JsonVisitor::default();
        event.record(&mut visitor);
        map.extend(visitor.values);

        let mut writer = self.writer.make_writer();
        if serde_json::to_writer(&mut writer, &Value::Object(map)).is_ok() {
            let _ = writer.write_all(b"\n");
        }
    }
}

#[derive(Clone, Debug)]
struct SpanFields {
    values: Map<String, Value>,
}

#[derive(Default)]
struct JsonVisitor {
    values: Map<String, Value>,
}

impl JsonVisitor {
    fn insert(&mut self, field: &tracing::field::Field, value: Value) {
        self.values.insert(field.name().to_string(), value);
    }
}

impl tracing::field::Visit for JsonVisitor {
    fn record_bool(&mut self, field: &tracing::field::Field, value: bool) {
        self.insert(field, Value::Bool(value));
    }

    fn record_i64(&mut self, field: &tracing::field::Field, value: i64) {
        self.insert(field, Value::Number(value.into()));
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.insert(field, Value::Number(value.into()));
    }

    fn record_f64(&mut self, field: &tracing::field::Field, value: f64) {
        if let Some(number) = serde_json::Number::from_f64(value) {
            self.insert(field, Value::Number(number));
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.insert(field, Value::String(value.to_string()));
    }

    fn record_error(
        &mut self,
        field: &tracing::field::Field,
        value: &(dyn std::error::Error + 'static),
    ) {
        self.insert(field, Value::String(value.to_string()));
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.insert(field, Value::String(format!("{value:?}")));
    }
}

/// Format the current time as RFC 3339 UTC with millisecond precision.
fn format_timestamp() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();

    let secs = now.as_secs();
    let secs_of_day = secs % 86400;
    let (year, month, day) = days_to_ymd((secs / 86400) as i64);

    format!(
        "{year:04}-{month:02}-{day:02}T{:02}:{:02}:{:02}.{:03}Z",
        secs_of_day / 3600,
        (secs_of_day % 3600) / 60,
        secs_of_day % 60,
        now.subsec_millis()
    )
}

/// Convert days since Unix epoch to (year, month, day).
const fn days_to_ymd(days: i64) -> (i32, u32, u32) {
    // Howard Hinnant's civil_from_days
    let z = days + 719468;
    let era = if z >= 0 { z } else { z - 146096 } / 146097;
    let doe = (z - era * 146097) as u32;
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365;
    let y = yoe as i64 + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = doy - (153 * mp + 2) / 5 + 1;
    let m = if mp < 10 { mp + 3 } else { mp - 9 };
    let y = if m <= 2 { y + 1 } else { y };
    (y as i32, m, d)
}

// ============================================================================
// Log Target Resolution
// ============================================================================

fn build_log_writer(
    service: &str,
    config_log_dir: Option<&Path>,
) -> Result<(
    tracing_appender::non_blocking::NonBlocking,
    tracing_appender::non_blocking::WorkerGuard,
)> {
    let target = resolve_log_target(service, config_log_dir).map_err(|e| anyhow::anyhow!("{e}"))?;

    let appender = tracing_appender::rolling::daily(&target.dir, &target.file_name);
    Ok(tracing_appender::non_blocking(appender))
}

fn resolve_log_target(service: &str, config_log_dir: Option<&Path>) -> Result<LogTarget, String> {
    resolve_log_target_with(
        service,
        std::env::var_os(ENV_LOG_PATH).map(PathBuf::from),
        std::env::var_os(ENV_LOG_DIR).map(PathBuf::from),
        config_log_dir.map(PathBuf::from),
    )
}

/// Precedence: explicit path > env dir > configured dir > platform defaults.
fn resolve_log_target_with(
    service: &str,
    path_override: Option<PathBuf>,
    dir_override: Option<PathBuf>,
    config_dir: Option<PathBuf>,
) -> Result<LogTarget, String> {
    if let Some(path) = path_override {
        return log_target_from_path(path);
    }

    if let Some(dir) = dir_override.or(config_dir) {
        return log_target_from_dir(dir, service);
    }

    let mut candidates = Vec::new();

    if cfg!(unix) {
        candidates.push(PathBuf::from(DEFAULT_LOG_DIR_UNIX));
    }

    if let Some(proj_dirs) = directories::ProjectDirs::from("", "", service) {
        candidates.push(proj_dirs.data_local_dir().join("logs"));
    }

    let file_name = format!("{service}{LOG_FILE_SUFFIX}");

    candidates
        .into_iter()
        .find(|dir| ensure_writable(dir, &file_name).is_ok())
        .map(|dir| LogTarget {
            dir,
            file_name: file_name.clone(),
        })
        .ok_or_else(|| "No writable log directory found".to_string())
}

fn log_target_from_dir(dir: PathBuf, service: &str) -> Result<LogTarget, String> {
    let file_name = format!("{service}{LOG_FILE_SUFFIX}");
    ensure_writable(&dir, &file_name)?;
    Ok(LogTarget { dir, file_name })
}

fn log_target_from_path(path: PathBuf) -> Result<LogTarget, String> {
    let file_name = path
        .file_name()
        .ok_or_else(|| format!("{ENV_LOG_PATH} must include a file name"))
        .and_then(|name| {
            name.to_str()
                .map(str::to_string)
                .ok_or_else(|| format!("{ENV_LOG_PATH} must be valid UTF-8"))
        })?;

    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    ensure_writable(dir, &file_name)?;

    Ok(LogTarget {
        dir: dir.to_path_buf(),
        file_name,
    })
}

fn ensure_writable(dir: &Path, file_name: &str) -> Result<(), String> {
    std::fs::create_dir_all(dir)
        .map_err(|e| format!("Failed to create log directory {}: {e}", dir.display()))?;

    let path = dir.join(file_name);
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|e| format!("Failed to open log file {}: {e}", path.display()))?;

    Ok(())
}
