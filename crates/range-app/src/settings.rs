//! Application settings loaded from an optional TOML file.
//!
//! Every field has a default, so a settings file only needs to name what it
//! changes:
//!
//! ```toml
//! seed = 7
//! tick_rate = 60
//!
//! [session]
//! session_duration_secs = 30.0
//! spawn_slot_count = 6
//! ```

use std::fs;
use std::path::Path;

use anyhow::{ensure, Context};
use serde::{Deserialize, Serialize};

use range_core::config::SessionConfig;
use range_core::constants::TICK_RATE;
use range_sim::SimConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// RNG seed handed to the engine.
    pub seed: u64,
    /// Ticks per second for the real-time loop.
    pub tick_rate: u32,
    pub session: SessionConfig,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            seed: 42,
            tick_rate: TICK_RATE,
            session: SessionConfig::default(),
        }
    }
}

impl AppSettings {
    /// Read and validate settings from `path`.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file {}", path.display()))?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("invalid settings in {}", path.display()))
    }

    pub fn from_toml_str(contents: &str) -> anyhow::Result<Self> {
        let settings: Self =
            toml::from_str(contents).context("failed to parse settings toml contents")?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(self.tick_rate > 0, "tick_rate must be at least 1");
        self.session.validate()?;
        Ok(())
    }

    /// Seconds advanced per real-time tick.
    pub fn dt(&self) -> f64 {
        1.0 / f64::from(self.tick_rate.max(1))
    }

    pub fn sim_config(&self) -> SimConfig {
        SimConfig {
            seed: self.seed,
            session: self.session.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use range_core::enums::SlotPolicy;

    #[test]
    fn test_empty_file_gives_defaults() {
        let settings = AppSettings::from_toml_str("").unwrap();
        assert_eq!(settings, AppSettings::default());
        assert!((settings.dt() - range_core::constants::DT).abs() < 1e-12);
    }

    #[test]
    fn test_partial_session_table() {
        let settings = AppSettings::from_toml_str(
            r#"
            seed = 7
            tick_rate = 60

            [session]
            session_duration_secs = 30.0
            slot_policy = "WithoutReplacement"
            "#,
        )
        .unwrap();
        assert_eq!(settings.seed, 7);
        assert_eq!(settings.tick_rate, 60);
        assert_eq!(settings.session.session_duration_secs, 30.0);
        assert_eq!(settings.session.slot_policy, SlotPolicy::WithoutReplacement);
        assert_eq!(settings.session.ammo_max, 10, "unnamed fields keep defaults");
    }

    #[test]
    fn test_target_variants_table() {
        let settings = AppSettings::from_toml_str(
            r#"
            [[session.target_variants]]
            name = "bullseye"
            max_health = 50.0
            score_value = 30
            "#,
        )
        .unwrap();
        assert_eq!(settings.session.target_variants.len(), 1);
        assert_eq!(settings.session.target_variants[0].score_value, 30);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(AppSettings::from_toml_str("tick_rate = 0").is_err());
        let err = AppSettings::from_toml_str("[session]\nspawn_interval_secs = -1.0").unwrap_err();
        assert!(
            format!("{err:#}").contains("spawn_interval_secs"),
            "error should name the field: {err:#}"
        );
        assert!(AppSettings::from_toml_str("seed = \"abc\"").is_err());
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = AppSettings::load(Path::new("/nonexistent/range.toml")).unwrap_err();
        assert!(format!("{err}").contains("/nonexistent/range.toml"));
    }
}
