use pronunciation_score::{CharClass, MatchPredicate, ScoringParams, DEFAULT_PASS_THRESHOLD};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq)]
pub struct ScoringSettings {
    pub params: ScoringParams,
    pub pass_threshold: u8,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            params: ScoringParams::default(),
            pass_threshold: DEFAULT_PASS_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct ScoringToml {
    #[serde(default)]
    predicate: Option<MatchPredicate>,
    #[serde(default)]
    fuzzy_threshold: Option<f64>,
    #[serde(default)]
    short_response_ratio: Option<f64>,
    #[serde(default)]
    short_response_penalty: Option<f64>,
    #[serde(default)]
    substring_bonus: Option<f64>,
    #[serde(default)]
    unicode_letters: bool,
    #[serde(default = "default_pass_threshold")]
    pass_threshold: u32,
}

fn default_pass_threshold() -> u32 {
    DEFAULT_PASS_THRESHOLD as u32
}

impl Default for ScoringToml {
    fn default() -> Self {
        Self {
            predicate: None,
            fuzzy_threshold: None,
            short_response_ratio: None,
            short_response_penalty: None,
            substring_bonus: None,
            unicode_letters: false,
            pass_threshold: default_pass_threshold(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct RootConfigToml {
    #[serde(default)]
    scoring: Option<ScoringToml>,
}

const CONFIG_PATHS: [&str; 2] = ["configs/scoring.toml", "../../configs/scoring.toml"];

/// Try the workspace-relative and crate-relative locations of `configs/scoring.toml`.
pub fn read_scoring_toml_text() -> anyhow::Result<String> {
    for p in &CONFIG_PATHS {
        if let Ok(c) = fs::read_to_string(p) {
            log::info!("scoring config: {}", p);
            return Ok(c);
        }
    }
    anyhow::bail!("Could not load scoring.toml from {:?}", CONFIG_PATHS);
}

pub fn parse_scoring_settings(text: &str) -> anyhow::Result<ScoringSettings> {
    let root: RootConfigToml =
        toml::from_str(text).map_err(|e| anyhow::anyhow!("Failed to parse scoring.toml: {e}"))?;
    let cfg = root.scoring.unwrap_or_default();
    let ScoringToml {
        predicate,
        fuzzy_threshold,
        short_response_ratio,
        short_response_penalty,
        substring_bonus,
        unicode_letters,
        pass_threshold,
    } = cfg;

    let defaults = ScoringParams::default();
    let params = ScoringParams {
        predicate: predicate.unwrap_or(defaults.predicate),
        fuzzy_threshold: fuzzy_threshold.unwrap_or(defaults.fuzzy_threshold),
        short_response_ratio: short_response_ratio.unwrap_or(defaults.short_response_ratio),
        short_response_penalty: short_response_penalty.unwrap_or(defaults.short_response_penalty),
        substring_bonus: substring_bonus.unwrap_or(defaults.substring_bonus),
        char_class: if unicode_letters {
            CharClass::Unicode
        } else {
            CharClass::Ascii
        },
    };
    validate_params(&params)?;

    if pass_threshold > 100 {
        anyhow::bail!("scoring.pass_threshold must be within 0..=100 (got {pass_threshold})");
    }
    Ok(ScoringSettings {
        params,
        pass_threshold: pass_threshold as u8,
    })
}

pub fn validate_params(p: &ScoringParams) -> anyhow::Result<()> {
    let finite = [
        ("fuzzy_threshold", p.fuzzy_threshold),
        ("short_response_ratio", p.short_response_ratio),
        ("short_response_penalty", p.short_response_penalty),
        ("substring_bonus", p.substring_bonus),
    ];
    for (name, v) in finite {
        if !v.is_finite() {
            anyhow::bail!("scoring.{name} must be a finite number (got {v})");
        }
    }
    if p.fuzzy_threshold <= 0.0 || p.fuzzy_threshold > 1.0 {
        anyhow::bail!(
            "scoring.fuzzy_threshold must be in (0, 1] (got {})",
            p.fuzzy_threshold
        );
    }
    if p.short_response_ratio < 0.0 {
        anyhow::bail!(
            "scoring.short_response_ratio must not be negative (got {})",
            p.short_response_ratio
        );
    }
    if !(0.0..=1.0).contains(&p.short_response_penalty) {
        anyhow::bail!(
            "scoring.short_response_penalty must be in [0, 1] (got {})",
            p.short_response_penalty
        );
    }
    if p.substring_bonus < 0.0 {
        anyhow::bail!(
            "scoring.substring_bonus must not be negative (got {})",
            p.substring_bonus
        );
    }
    Ok(())
}

pub fn load_scoring_settings_from(path: &Path) -> anyhow::Result<ScoringSettings> {
    let text = fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", path.display()))?;
    parse_scoring_settings(&text)
}

pub fn load_scoring_settings() -> anyhow::Result<ScoringSettings> {
    let text = read_scoring_toml_text()?;
    parse_scoring_settings(&text)
}

/// Like [`load_scoring_settings`], but falls back to built-in defaults when
/// no config file exists. A file that exists but is invalid is still an error.
pub fn load_scoring_settings_or_default() -> anyhow::Result<ScoringSettings> {
    match read_scoring_toml_text() {
        Ok(text) => parse_scoring_settings(&text),
        Err(_) => {
            log::info!("no scoring.toml found; using built-in scoring defaults");
            Ok(ScoringSettings::default())
        }
    }
}
