mod dataset;
mod eval;

use anyhow::Context;
use chrono::Local;
use clap::{Parser, ValueEnum};
use pronunciation_config::ScoringSettings;
use pronunciation_score::{MatchPredicate, PronunciationScorer};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, ValueEnum)]
enum Mode {
    /// Generate `manifest.jsonl` and exit.
    Manifest,
    /// Score only a small deterministic sample of the manifest.
    Smoke,
    /// Score the full manifest.
    Full,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Predicate {
    Fuzzy,
    Substring,
}

impl From<Predicate> for MatchPredicate {
    fn from(p: Predicate) -> Self {
        match p {
            Predicate::Fuzzy => MatchPredicate::Fuzzy,
            Predicate::Substring => MatchPredicate::Substring,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub(crate) struct Args {
    /// Dataset directory scanned recursively for `<name>.expected.txt` (+ sibling `<name>.recognized.txt`).
    #[arg(long, required_unless_present = "expected")]
    dataset: Option<PathBuf>,

    /// Score a single expected sentence (requires --recognized) and print the result as JSON.
    #[arg(long, requires = "recognized", conflicts_with = "dataset")]
    expected: Option<String>,

    /// Recognized transcript paired with --expected.
    #[arg(long, requires = "expected")]
    recognized: Option<String>,

    #[arg(long, value_enum, default_value_t = Mode::Smoke)]
    mode: Mode,

    /// Number of entries to score in smoke mode.
    #[arg(long, default_value_t = 20)]
    smoke_n: usize,

    /// Smoke selection seed (0 = time-based for varied samples).
    #[arg(long, default_value_t = 0)]
    smoke_seed: u64,

    /// Max entries to score (0 = no limit). Overrides mode defaults.
    #[arg(long, default_value_t = 0)]
    limit: usize,

    /// Comma-separated entry IDs to score (overrides smoke sampling).
    #[arg(long, value_delimiter = ',')]
    ids: Vec<String>,

    /// Output directory for manifest + results (default: target/score_eval).
    #[arg(long, default_value = "target/score_eval")]
    out_dir: PathBuf,

    /// Scoring config file (default: configs/scoring.toml if present, else built-in defaults).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the configured word-matching predicate.
    #[arg(long, value_enum)]
    predicate: Option<Predicate>,

    /// Override the configured pass threshold (0-100).
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pass_threshold: Option<u8>,

    /// Fail when the mean score falls below this value.
    #[arg(long)]
    min_mean_score: Option<f32>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let settings = resolve_settings(&args)?;
    let scorer = PronunciationScorer::new(settings.params.clone());

    if let (Some(expected), Some(recognized)) = (&args.expected, &args.recognized) {
        let result = scorer.score(expected, recognized);
        println!("{}", serde_json::to_string_pretty(&result)?);
        eprintln!(
            "[score_eval] {} ({:?})",
            result.band().message(),
            result.progression(settings.pass_threshold)
        );
        return Ok(());
    }

    let dataset_dir = args
        .dataset
        .as_ref()
        .context("--dataset is required unless --expected/--recognized are given")?;

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("Failed to create out dir {}", args.out_dir.display()))?;

    let dataset_root = dataset_dir
        .canonicalize()
        .with_context(|| format!("Failed to canonicalize dataset {}", dataset_dir.display()))?;

    let mut manifest = dataset::build_manifest(&dataset_root)?;
    manifest.sort_by(|a, b| a.id.cmp(&b.id).then_with(|| a.source.cmp(&b.source)));

    let manifest_path = args.out_dir.join("manifest.jsonl");
    dataset::write_manifest_jsonl(&manifest_path, &manifest)?;
    eprintln!(
        "[score_eval] manifest: {} entries -> {}",
        manifest.len(),
        manifest_path.display()
    );

    if matches!(args.mode, Mode::Manifest) {
        return Ok(());
    }

    let default_n = match args.mode {
        Mode::Smoke => args.smoke_n,
        Mode::Full => usize::MAX,
        Mode::Manifest => 0,
    };
    let n = if args.limit > 0 { args.limit } else { default_n };

    let selected = if !args.ids.is_empty() {
        select_by_ids(&manifest, &args.ids, args.limit)?
    } else {
        if matches!(args.mode, Mode::Smoke) {
            let seed = if args.smoke_seed == 0 {
                std::time::SystemTime::now()
                    .duration_since(std::time::UNIX_EPOCH)
                    .unwrap_or_default()
                    .as_nanos() as u64
            } else {
                args.smoke_seed
            };
            eprintln!("[score_eval] smoke_seed={}", seed);
            manifest.sort_by_key(|entry| smoke_hash(seed, &entry.id, &entry.source));
        }
        let n = n.min(manifest.len());
        manifest.into_iter().take(n).collect::<Vec<_>>()
    };

    eprintln!(
        "[score_eval] predicate={:?} fuzzy_threshold={} pass_threshold={} selected={}",
        settings.params.predicate,
        settings.params.fuzzy_threshold,
        settings.pass_threshold,
        selected.len()
    );

    let results = eval::run_manifest(&selected, &scorer, settings.pass_threshold);

    let results_path = args.out_dir.join("results.jsonl");
    eval::write_results_jsonl(&results_path, &results)?;

    let summary = eval::summarize(&results, settings.pass_threshold);
    let summary_path = args.out_dir.join("summary.json");
    std::fs::write(&summary_path, serde_json::to_string_pretty(&summary)?)
        .with_context(|| format!("Failed to write {}", summary_path.display()))?;

    write_run_info(&args.out_dir, dataset_dir, &settings, selected.len())?;

    eval::print_summary_table(&summary, &results, args.min_mean_score);

    if let Some(min) = args.min_mean_score {
        if summary.mean_score < min {
            anyhow::bail!(
                "mean score {:.2} is below minimum {:.2}",
                summary.mean_score,
                min
            );
        }
    }

    Ok(())
}

fn resolve_settings(args: &Args) -> anyhow::Result<ScoringSettings> {
    let mut settings = match &args.config {
        Some(path) => pronunciation_config::load_scoring_settings_from(path)?,
        None => pronunciation_config::load_scoring_settings_or_default()?,
    };
    if let Some(p) = args.predicate {
        settings.params.predicate = p.into();
    }
    if let Some(t) = args.pass_threshold {
        settings.pass_threshold = t;
    }
    Ok(settings)
}

fn smoke_hash(seed: u64, id: &str, source: &str) -> u64 {
    use std::hash::{Hash, Hasher};
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    seed.hash(&mut hasher);
    id.hash(&mut hasher);
    source.hash(&mut hasher);
    hasher.finish()
}

fn select_by_ids(
    manifest: &[dataset::ManifestEntry],
    ids: &[String],
    limit: usize,
) -> anyhow::Result<Vec<dataset::ManifestEntry>> {
    let mut selected = Vec::with_capacity(ids.len());
    for id in ids.iter().take(if limit > 0 { limit } else { ids.len() }) {
        let entry = manifest
            .iter()
            .find(|e| e.id == *id)
            .with_context(|| format!("Unknown entry id {}", id))?;
        selected.push(entry.clone());
    }
    Ok(selected)
}

#[derive(Debug, Serialize, Deserialize)]
struct RunInfo {
    dataset: String,
    finished_at: String,
    scored: usize,
    predicate: MatchPredicate,
    fuzzy_threshold: f64,
    short_response_ratio: f64,
    short_response_penalty: f64,
    substring_bonus: f64,
    pass_threshold: u8,
}

fn write_run_info(
    out_dir: &Path,
    dataset: &Path,
    settings: &ScoringSettings,
    scored: usize,
) -> anyhow::Result<()> {
    let path = out_dir.join("run_info.json");
    let p = &settings.params;
    let data = RunInfo {
        dataset: dataset.to_string_lossy().to_string(),
        finished_at: Local::now().to_rfc3339(),
        scored,
        predicate: p.predicate,
        fuzzy_threshold: p.fuzzy_threshold,
        short_response_ratio: p.short_response_ratio,
        short_response_penalty: p.short_response_penalty,
        substring_bonus: p.substring_bonus,
        pass_threshold: settings.pass_threshold,
    };
    std::fs::write(&path, serde_json::to_string_pretty(&data)?)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
