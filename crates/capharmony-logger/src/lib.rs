//! Console and file logging for the capharmony CLI
//!
//! Every message is appended to `~/.config/capharmony/capharmony.log` with a
//! timestamp. Console output depends on the verbosity set at startup and can
//! be switched off entirely with `--no-stdout`.

use colored::{ColoredString, Colorize};
use indicatif::{ProgressBar, ProgressStyle};
use std::fmt::Display;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};

const LOG_FILE_NAME: &str = "capharmony.log";
const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

#[derive(Debug)]
struct LoggerState {
    verbosity: u8,
    no_stdout: bool,
    log_file: Option<PathBuf>,
}

static STATE: Mutex<LoggerState> = Mutex::new(LoggerState {
    verbosity: 0,
    no_stdout: false,
    log_file: None,
});
static SPINNER: Mutex<Option<ProgressBar>> = Mutex::new(None);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Level {
    Step,
    Debug,
    Info,
    Warn,
    Error,
    Success,
}

impl Level {
    fn tag(self) -> &'static str {
        match self {
            Level::Step => "STEP",
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::Success => "SUCCESS",
        }
    }

    /// Lowest verbosity at which the message reaches the console
    fn min_verbosity(self) -> u8 {
        match self {
            Level::Step => 2,
            Level::Debug | Level::Info => 1,
            Level::Warn | Level::Error | Level::Success => 0,
        }
    }

    fn prefix(self) -> Option<ColoredString> {
        match self {
            Level::Step => Some("TRACE:".normal()),
            Level::Debug => Some("DEBUG:".blue().bold()),
            Level::Info => None,
            Level::Warn => Some("warning:".yellow().bold()),
            Level::Error => Some("Error:".red().bold()),
            Level::Success => Some("\u{2714}".green().bold()),
        }
    }
}

fn with_state<T>(read: impl FnOnce(&LoggerState) -> T) -> Option<T> {
    STATE.lock().ok().map(|state| read(&state))
}

/// Get the current verbosity level
pub fn get_verbosity() -> u8 {
    with_state(|s| s.verbosity).unwrap_or(0)
}

/// Get whether console output is disabled
pub fn get_no_stdout() -> bool {
    with_state(|s| s.no_stdout).unwrap_or(false)
}

/// Set whether console output is disabled
pub fn set_no_stdout(disabled: bool) {
    if let Ok(mut state) = STATE.lock() {
        state.no_stdout = disabled;
    }
}

/// Default `tracing` directive for the current verbosity:
/// 0 = warn, 1 = debug (-v), 2+ = trace (-vv)
pub fn verbosity_to_filter() -> &'static str {
    match get_verbosity() {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    }
}

fn config_dir() -> Result<PathBuf, String> {
    #[cfg(not(target_os = "windows"))]
    let base = dirs::home_dir()
        .ok_or("Could not determine home directory")?
        .join(".config");

    #[cfg(target_os = "windows")]
    let base = dirs::config_dir().ok_or("Could not determine config directory")?;

    Ok(base.join("capharmony"))
}

/// Set the verbosity and console switch, then start a fresh log file
pub fn init_with_verbosity(verbosity: u8, no_stdout: bool) -> Result<(), String> {
    let mut state = STATE
        .lock()
        .map_err(|e| format!("Failed to lock logger state: {}", e))?;
    state.verbosity = verbosity;
    state.no_stdout = no_stdout;

    let dir = config_dir()?;
    fs::create_dir_all(&dir).map_err(|e| format!("Failed to create {}: {}", dir.display(), e))?;
    let log_file = dir.join(LOG_FILE_NAME);
    if log_file.exists() {
        let _ = fs::remove_file(&log_file);
    }
    state.log_file = Some(log_file);
    Ok(())
}

fn append_to_file(tag: &str, message: &str) {
    let Some(Some(path)) = with_state(|s| s.log_file.clone()) else {
        return;
    };
    if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(path) {
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        let _ = writeln!(file, "[{}] {} {}", timestamp, tag, message);
    }
}

fn console(line: &str) {
    if !get_no_stdout() {
        eprintln!("{}", line);
    }
}

fn emit(level: Level, message: &str) {
    append_to_file(level.tag(), message);
    if get_verbosity() < level.min_verbosity() {
        return;
    }
    match level.prefix() {
        Some(prefix) => console(&format!("{} {}", prefix, message)),
        None => console(message),
    }
}

/// Verbose-only informational message
pub fn info(message: &str) {
    emit(Level::Info, message);
}

pub fn debug(message: &str) {
    emit(Level::Debug, message);
}

pub fn warn(message: &str) {
    emit(Level::Warn, message);
}

pub fn error(message: &str) {
    emit(Level::Error, message);
}

pub fn success(message: &str) {
    emit(Level::Success, message);
}

/// Trace-level progress message, shown on the console with `-vv`
pub fn step(message: &str) {
    emit(Level::Step, message);
}

pub fn get_log_path() -> Option<PathBuf> {
    with_state(|s| s.log_file.clone()).flatten()
}

/// Print where the log file is written
pub fn show_log_path() {
    match get_log_path().map_or_else(|| config_dir().map(|d| d.join(LOG_FILE_NAME)), Ok) {
        Ok(path) => eprintln!("Log file: {}", path.display()),
        Err(_) => eprintln!("Log file location not available"),
    }
}

/// Start a spinner; skipped when verbose or when console output is off
pub fn spinner_start(message: &str) {
    append_to_file("TASK", message);
    if get_verbosity() > 0 || get_no_stdout() {
        return;
    }

    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_strings(&SPINNER_FRAMES)
        .template("{spinner:.cyan} {msg}")
    {
        spinner.set_style(style);
    }
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner.set_message(message.to_string());

    if let Ok(mut slot) = SPINNER.lock() {
        *slot = Some(spinner);
    }
}

pub fn spinner_stop() {
    if let Ok(mut slot) = SPINNER.lock() {
        if let Some(spinner) = slot.take() {
            spinner.finish_and_clear();
        }
    }
}

pub fn spinner_success(message: &str) {
    spinner_stop();
    success(message);
}

pub fn spinner_error(message: &str) {
    spinner_stop();
    append_to_file("FAILED", message);
    console(&format!("  {} {}", "\u{2717}".red().bold(), message));
}

/// Run `task` behind a spinner labelled `label`.
///
/// The result is returned unchanged; the spinner is finished with a check mark
/// and the elapsed time on success, or a cross and the error on failure.
pub fn run_task<T, E, F>(label: &str, task: F) -> Result<T, E>
where
    F: FnOnce() -> Result<T, E>,
    E: Display,
{
    spinner_start(label);
    let started = Instant::now();
    let result = task();
    match &result {
        Ok(_) => spinner_success(&format!(
            "{} {}",
            label,
            format!("in {:.2}s", started.elapsed().as_secs_f64()).dimmed()
        )),
        Err(e) => spinner_error(&format!("{}: {}", label, e)),
    }
    result
}
