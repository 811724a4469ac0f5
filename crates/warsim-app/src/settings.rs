//! Host settings read from the environment (a `.env` file is honored).

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use warsim_core::constants::DEFAULT_TICK_MS;

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub tick_interval: Duration,
    pub seed: u64,
    pub config_dir: PathBuf,
    /// How long to run before shutting down; `None` runs until killed.
    pub run_for: Option<Duration>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(DEFAULT_TICK_MS),
            seed: 42,
            config_dir: PathBuf::from("data/configs"),
            run_for: Some(Duration::from_secs(30)),
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from any key lookup. Unparseable values fall back to
    /// the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let parsed = |key: &str| lookup(key).and_then(|value| value.trim().parse::<u64>().ok());

        let tick_ms = parsed("WARSIM_TICK_MS").filter(|ms| *ms > 0);
        let run_secs = parsed("WARSIM_RUN_SECS");

        Self {
            tick_interval: tick_ms.map_or(defaults.tick_interval, Duration::from_millis),
            seed: parsed("WARSIM_SEED").unwrap_or(defaults.seed),
            config_dir: lookup("WARSIM_CONFIG_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.config_dir),
            run_for: match run_secs {
                Some(0) => None,
                Some(secs) => Some(Duration::from_secs(secs)),
                None => defaults.run_for,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        assert_eq!(Settings::from_lookup(|_| None), Settings::default());
    }

    #[test]
    fn test_overrides() {
        let settings = Settings::from_lookup(lookup(&[
            ("WARSIM_TICK_MS", "50"),
            ("WARSIM_SEED", "7"),
            ("WARSIM_CONFIG_DIR", "/etc/warsim"),
            ("WARSIM_RUN_SECS", "0"),
        ]));
        assert_eq!(settings.tick_interval, Duration::from_millis(50));
        assert_eq!(settings.seed, 7);
        assert_eq!(settings.config_dir, PathBuf::from("/etc/warsim"));
        assert_eq!(settings.run_for, None);
    }

    #[test]
    fn test_garbage_falls_back() {
        let settings = Settings::from_lookup(lookup(&[
            ("WARSIM_TICK_MS", "0"),
            ("WARSIM_SEED", "many"),
        ]));
        assert_eq!(settings.tick_interval, Duration::from_millis(100));
        assert_eq!(settings.seed, 42);
    }
}
