use clap::{CommandFactory, Parser};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the per-user state directory under `$HOME`.
pub const APP_DIR_NAME: &str = ".solar-pile";

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Record planned vs. installed solar pile positions and check tolerances
#[derive(Parser, Debug, Clone)]
#[command(
    name = "solar-pile",
    about = "Record planned vs. installed solar pile positions and check tolerances",
    version
)]
pub struct Settings {
    /// Display theme
    #[arg(long, default_value = "auto", value_parser = ["light", "dark", "classic", "auto"])]
    pub theme: String,

    /// Directory the CSV report is written to (defaults to the working directory)
    #[arg(long, env = "SOLAR_PILE_EXPORT_DIR")]
    pub export_dir: Option<PathBuf>,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path (defaults to ~/.solar-pile/logs/solar-pile.log)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Clear saved preferences
    #[arg(long)]
    pub clear: bool,
}

// ── LastUsedParams ─────────────────────────────────────────────────────────────

/// UI preferences saved to `~/.solar-pile/last_used.json`.
///
/// Only preferences live here; measurements are never written between runs.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct LastUsedParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<PathBuf>,
}

impl LastUsedParams {
    /// Default path of the preferences file.
    pub fn config_path() -> PathBuf {
        Self::config_path_in(&dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
    }

    /// Preferences path rooted at `base_dir`.
    pub fn config_path_in(base_dir: &Path) -> PathBuf {
        base_dir.join(APP_DIR_NAME).join("last_used.json")
    }

    /// Returns `Default` when the file is absent or cannot be parsed.
    pub fn load_from(path: &Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        match serde_json::from_str(&content) {
            Ok(params) => params,
            Err(e) => {
                tracing::warn!(path = %path.display(), "Ignoring unreadable preferences: {e}");
                Self::default()
            }
        }
    }

    /// Atomically write params to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;

        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, &json)?;
        std::fs::rename(&tmp, path)?;

        Ok(())
    }

    /// Delete the preferences file at `path` if it exists.
    pub fn clear_at(path: &Path) -> Result<(), std::io::Error> {
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse process arguments and merge saved preferences.
    pub fn load_with_last_used() -> Self {
        Self::load_with_last_used_impl(
            std::env::args_os().collect(),
            &LastUsedParams::config_path(),
        )
    }

    /// Parse `args`, merge preferences from `config_path` for anything not
    /// given on the command line, apply `--debug`, and persist the result.
    pub fn load_with_last_used_impl(args: Vec<std::ffi::OsString>, config_path: &Path) -> Self {
        let matches = Settings::command().get_matches_from(args.clone());
        let mut settings = Settings::parse_from(args);

        if settings.clear {
            if let Err(e) = LastUsedParams::clear_at(config_path) {
                tracing::warn!("Could not clear saved preferences: {e}");
            }
            return settings.apply_debug_flag();
        }

        let last = LastUsedParams::load_from(config_path);

        if !is_arg_explicitly_set(&matches, "theme") {
            if let Some(v) = last.theme.clone() {
                settings.theme = v;
            }
        }
        let export_dir_from_cli = is_arg_explicitly_set(&matches, "export_dir");
        if !export_dir_from_cli && settings.export_dir.is_none() {
            settings.export_dir = last.export_dir.clone();
        }

        settings = settings.apply_debug_flag();

        if let Err(e) = settings
            .params_to_persist(export_dir_from_cli, &last)
            .save_to(config_path)
        {
            tracing::warn!("Could not save preferences: {e}");
        }

        settings
    }

    /// Directory the report is exported to, falling back to `fallback`.
    pub fn resolved_export_dir(&self, fallback: &Path) -> PathBuf {
        self.export_dir
            .clone()
            .unwrap_or_else(|| fallback.to_path_buf())
    }

    fn apply_debug_flag(mut self) -> Self {
        if self.debug {
            self.log_level = "DEBUG".to_string();
        }
        self
    }

    /// Preferences to save after this run.  Only a command-line export
    /// directory replaces the saved one; an environment value is not kept.
    fn params_to_persist(&self, export_dir_from_cli: bool, last: &LastUsedParams) -> LastUsedParams {
        let export_dir = if export_dir_from_cli {
            self.export_dir.clone()
        } else {
            last.export_dir.clone()
        };
        LastUsedParams {
            theme: Some(self.theme.clone()),
            export_dir,
        }
    }
}

/// Returns `true` when `name` was supplied on the command line rather than by
/// a default value or environment variable.
fn is_arg_explicitly_set(matches: &clap::ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(clap::parser::ValueSource::CommandLine)
}

// ── Tests ──────────────────────────────────────────────────────────────────────
