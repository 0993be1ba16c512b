//! Demo host configuration.
//!
//! Settings for the frame loop of the `gamedelay` binary, loaded from an INI
//! file. Defaults are safe to run with when the file is missing.
//!
//! # Configuration File Format
//!
//! ```ini
//! [clock]
//! target_fps = 60
//! realtime = false
//!
//! [demo]
//! run_ms = 3000
//! pause_at_ms = 1000
//! pause_for_ms = 500
//! ```

use configparser::ini::Ini;
use log::{info, warn};
use std::path::PathBuf;

const DEFAULT_TARGET_FPS: u32 = 60;
const DEFAULT_REALTIME: bool = false;
const DEFAULT_RUN_MS: u64 = 3000;
const DEFAULT_PAUSE_AT_MS: u64 = 1000;
const DEFAULT_PAUSE_FOR_MS: u64 = 500;
pub const DEFAULT_CONFIG_PATH: &str = "./delay.ini";

/// Frame loop settings.
#[derive(Debug, Clone, PartialEq)]
pub struct DemoConfig {
    /// Frames per second of the host loop.
    pub target_fps: u32,
    /// Use the system clock and sleep between frames instead of simulated time.
    pub realtime: bool,
    /// How long the demo runs (ms of loop time, pauses included).
    pub run_ms: u64,
    /// When the pause window starts, relative to the first frame.
    pub pause_at_ms: u64,
    /// Length of the pause window. Zero disables it.
    pub pause_for_ms: u64,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl DemoConfig {
    pub fn new() -> Self {
        Self {
            target_fps: DEFAULT_TARGET_FPS,
            realtime: DEFAULT_REALTIME,
            run_ms: DEFAULT_RUN_MS,
            pause_at_ms: DEFAULT_PAUSE_AT_MS,
            pause_for_ms: DEFAULT_PAUSE_FOR_MS,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Milliseconds per frame, never zero.
    pub fn frame_ms(&self) -> u64 {
        (1000 / u64::from(self.target_fps.max(1))).max(1)
    }

    /// Whether the pause window covers loop time `t`.
    pub fn in_pause_window(&self, t: u64) -> bool {
        self.pause_for_ms > 0
            && t >= self.pause_at_ms
            && t < self.pause_at_ms.saturating_add(self.pause_for_ms)
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current values.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;

        // [clock] section
        if let Some(fps) = config.getuint("clock", "target_fps").ok().flatten() {
            match u32::try_from(fps) {
                Ok(fps) => self.target_fps = fps,
                Err(_) => warn!("Ignoring out of range target_fps = {}", fps),
            }
        }
        if let Some(realtime) = config.getbool("clock", "realtime").ok().flatten() {
            self.realtime = realtime;
        }

        // [demo] section
        if let Some(run_ms) = config.getuint("demo", "run_ms").ok().flatten() {
            self.run_ms = run_ms;
        }
        if let Some(at) = config.getuint("demo", "pause_at_ms").ok().flatten() {
            self.pause_at_ms = at;
        }
        if let Some(length) = config.getuint("demo", "pause_for_ms").ok().flatten() {
            self.pause_for_ms = length;
        }

        info!(
            "Loaded config: fps={}, realtime={}, run={}ms, pause at {}ms for {}ms",
            self.target_fps, self.realtime, self.run_ms, self.pause_at_ms, self.pause_for_ms
        );

        Ok(())
    }

    /// Save configuration to the INI file.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        config.set("clock", "target_fps", Some(self.target_fps.to_string()));
        config.set("clock", "realtime", Some(self.realtime.to_string()));

        config.set("demo", "run_ms", Some(self.run_ms.to_string()));
        config.set("demo", "pause_at_ms", Some(self.pause_at_ms.to_string()));
        config.set("demo", "pause_for_ms", Some(self.pause_for_ms.to_string()));

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }
}
