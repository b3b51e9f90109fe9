use crate::dataset::ManifestEntry;
use anyhow::Context;
use pronunciation_score::{wer, Progression, PronunciationScorer, ScoreBand};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryResult {
    pub id: String,
    pub source: String,
    pub expected: String,
    pub recognized: String,
    pub score: u8,
    pub band: ScoreBand,
    pub progression: Progression,
    pub wer: f32,

    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub missing_words: Vec<String>,

    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub matched_flags: Vec<bool>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub generated_at: String,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub empty_recognized: usize,
    pub pass_threshold: u8,
    pub mean_score: f32,
    pub aggregate_wer: f32,
    pub sum_edits: usize,
    pub sum_ref_words: usize,
    pub bands: BTreeMap<ScoreBand, usize>,
}

pub fn run_manifest(
    entries: &[ManifestEntry],
    scorer: &PronunciationScorer,
    pass_threshold: u8,
) -> Vec<EntryResult> {
    entries
        .iter()
        .map(|entry| {
            let result = scorer.score(&entry.expected, &entry.recognized);
            let ws = wer(&entry.expected, &entry.recognized);
            log::debug!(
                "{} score={} missing={:?}",
                entry.id,
                result.score,
                result.missing_words
            );
            EntryResult {
                id: entry.id.clone(),
                source: entry.source.clone(),
                expected: entry.expected.clone(),
                recognized: entry.recognized.clone(),
                score: result.score,
                band: result.band(),
                progression: result.progression(pass_threshold),
                wer: ws.wer,
                missing_words: result.missing_words,
                matched_flags: result.matched_flags,
            }
        })
        .collect()
}

pub fn write_results_jsonl(path: &Path, results: &[EntryResult]) -> anyhow::Result<()> {
    let mut out = String::new();
    for r in results {
        out.push_str(&serde_json::to_string(r)?);
        out.push('\n');
    }
    std::fs::write(path, out).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

pub fn summarize(results: &[EntryResult], pass_threshold: u8) -> Summary {
    let total = results.len();
    let mut passed = 0usize;
    let mut empty_recognized = 0usize;
    let mut sum_score = 0u64;
    let mut sum_edits = 0usize;
    let mut sum_ref_words = 0usize;
    let mut bands = BTreeMap::new();

    for r in results {
        if r.progression == Progression::Continue {
            passed += 1;
        }
        if r.recognized.trim().is_empty() {
            empty_recognized += 1;
        }
        sum_score += r.score as u64;
        *bands.entry(r.band).or_insert(0) += 1;
        let ws = wer(&r.expected, &r.recognized);
        sum_edits += ws.edits;
        sum_ref_words += ws.ref_words;
    }
    let mean_score = if total == 0 {
        0.0
    } else {
        sum_score as f32 / total as f32
    };
    let aggregate_wer = if sum_ref_words == 0 {
        0.0
    } else {
        sum_edits as f32 / sum_ref_words as f32
    };

    Summary {
        generated_at: chrono::Local::now().to_rfc3339(),
        total,
        passed,
        failed: total - passed,
        empty_recognized,
        pass_threshold,
        mean_score,
        aggregate_wer,
        sum_edits,
        sum_ref_words,
        bands,
    }
}

pub fn print_summary_table(summary: &Summary, results: &[EntryResult], min_mean_score: Option<f32>) {
    eprintln!();
    eprintln!("=== Pronunciation Score Summary ===");
    eprintln!("total       : {}", summary.total);
    eprintln!("passed      : {} (score >= {})", summary.passed, summary.pass_threshold);
    eprintln!("failed      : {}", summary.failed);
    eprintln!("empty_rec   : {}", summary.empty_recognized);
    eprintln!("mean score  : {:.2}", summary.mean_score);
    eprintln!(
        "agg WER     : {:.4} (edits={} / ref_words={})",
        summary.aggregate_wer, summary.sum_edits, summary.sum_ref_words
    );
    if let Some(t) = min_mean_score {
        eprintln!("min mean    : {:.2}", t);
    }
    eprintln!();
    eprintln!("bands:");
    for band in ScoreBand::ALL {
        let n = summary.bands.get(&band).copied().unwrap_or(0);
        eprintln!("  {:<18} {}", band.message(), n);
    }

    let mut worst = results.iter().collect::<Vec<_>>();
    worst.sort_by(|a, b| a.score.cmp(&b.score).then_with(|| a.id.cmp(&b.id)));
    eprintln!();
    eprintln!("lowest_scores:");
    for r in worst.into_iter().take(10) {
        eprintln!("  {:>3}  {}  missing=[{}]", r.score, r.id, r.missing_words.join(" "));
    }
}
