use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const EXPECTED_SUFFIX: &str = ".expected.txt";
const RECOGNIZED_SUFFIX: &str = ".recognized.txt";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub id: String,
    pub source: String,
    pub expected: String,
    pub recognized: String,
}

fn expected_stem(p: &Path) -> Option<&str> {
    p.file_name()
        .and_then(|n| n.to_str())
        .and_then(|n| n.strip_suffix(EXPECTED_SUFFIX))
        .filter(|stem| !stem.is_empty())
}

fn recognized_path_for(expected: &Path, stem: &str) -> anyhow::Result<PathBuf> {
    Ok(expected
        .parent()
        .ok_or_else(|| anyhow::anyhow!("Expected file has no parent dir: {}", expected.display()))?
        .join(format!("{stem}{RECOGNIZED_SUFFIX}")))
}

/// Parse `ID TEXT` lines. Blank lines are skipped; TEXT may be empty only
/// when `allow_empty_text` is set (an attempt where nothing was recognized).
fn parse_id_text_file(path: &Path, allow_empty_text: bool) -> anyhow::Result<HashMap<String, String>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let mut map = HashMap::new();
    for (lineno, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let (id, rest) = match line.split_once(char::is_whitespace) {
            Some((id, rest)) => (id, rest.trim()),
            None => (line, ""),
        };
        if rest.is_empty() && !allow_empty_text {
            anyhow::bail!(
                "Invalid line {} in {}: missing text for id {}",
                lineno + 1,
                path.display(),
                id
            );
        }
        if map.insert(id.to_string(), rest.to_string()).is_some() {
            anyhow::bail!("Duplicate id {} in {} (line {})", id, path.display(), lineno + 1);
        }
    }
    Ok(map)
}

fn source_path_string(repo_root: Option<&Path>, p: &Path) -> String {
    if let Some(root) = repo_root {
        if let Ok(rel) = p.strip_prefix(root) {
            return rel.to_string_lossy().to_string();
        }
    }
    p.to_string_lossy().to_string()
}

/// Walk `dataset_root` for `<name>.expected.txt` files and pair each line
/// with the same id in the sibling `<name>.recognized.txt`.
///
/// A missing recognized file or id means nothing was transcribed; the entry
/// is kept with an empty transcript so it scores through the degenerate path.
pub fn build_manifest(dataset_root: &Path) -> anyhow::Result<Vec<ManifestEntry>> {
    let repo_root = std::env::current_dir().ok();
    let mut manifest = Vec::new();

    for ent in WalkDir::new(dataset_root)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if !ent.file_type().is_file() {
            continue;
        }
        let p = ent.path();
        let Some(stem) = expected_stem(p) else {
            continue;
        };
        let expected = parse_id_text_file(p, false)?;
        let rec_path = recognized_path_for(p, stem)?;
        let recognized = if rec_path.exists() {
            parse_id_text_file(&rec_path, true)?
        } else {
            log::warn!("no transcripts for {} (expected {})", p.display(), rec_path.display());
            HashMap::new()
        };

        for id in recognized.keys() {
            if !expected.contains_key(id) {
                log::warn!("{}: id {} has no expected sentence; ignored", rec_path.display(), id);
            }
        }

        let source = source_path_string(repo_root.as_deref(), p);
        for (id, text) in expected {
            let recognized = recognized.get(&id).cloned().unwrap_or_default();
            manifest.push(ManifestEntry {
                id,
                source: source.clone(),
                expected: text,
                recognized,
            });
        }
    }

    if manifest.is_empty() {
        anyhow::bail!("No *{} files found under {}", EXPECTED_SUFFIX, dataset_root.display());
    }

    Ok(manifest)
}

pub fn write_manifest_jsonl(path: &Path, entries: &[ManifestEntry]) -> anyhow::Result<()> {
    let mut out = String::new();
    for e in entries {
        out.push_str(&serde_json::to_string(e)?);
        out.push('\n');
    }
    fs::write(path, out).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expected_stem() {
        assert_eq!(expected_stem(Path::new("/d/lesson1.expected.txt")), Some("lesson1"));
        assert_eq!(expected_stem(Path::new("/d/lesson1.recognized.txt")), None);
        assert_eq!(expected_stem(Path::new("/d/.expected.txt")), None);
        let rec = recognized_path_for(Path::new("/d/lesson1.expected.txt"), "lesson1").unwrap();
        assert_eq!(rec, PathBuf::from("/d/lesson1.recognized.txt"));
    }

    #[test]
    fn test_parse_id_text_file() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let p = dir.path().join("a.expected.txt");
        fs::write(&p, "c1-s1 Can I see the menu?\n\nc1-s2   Thank you.\n")?;
        let m = parse_id_text_file(&p, false)?;
        assert_eq!(m["c1-s1"], "Can I see the menu?");
        assert_eq!(m["c1-s2"], "Thank you.");

        fs::write(&p, "c1-s1\n")?;
        assert!(parse_id_text_file(&p, false).is_err());
        assert_eq!(parse_id_text_file(&p, true)?["c1-s1"], "");

        fs::write(&p, "x one\nx two\n")?;
        assert!(parse_id_text_file(&p, false).is_err());
        Ok(())
    }

    #[test]
    fn test_build_manifest_pairs_and_fills_gaps() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let sub = dir.path().join("lesson1");
        fs::create_dir_all(&sub)?;
        fs::write(sub.join("conv1.expected.txt"), "s1 Hello there\ns2 Good morning\n")?;
        fs::write(sub.join("conv1.recognized.txt"), "s1 hello their\n")?;
        fs::write(dir.path().join("conv2.expected.txt"), "s3 See you soon\n")?;

        let mut m = build_manifest(dir.path())?;
        m.sort_by(|a, b| a.id.cmp(&b.id));
        assert_eq!(m.len(), 3);
        assert_eq!(m[0].id, "s1");
        assert_eq!(m[0].recognized, "hello their");
        assert_eq!(m[1].recognized, "");
        assert_eq!(m[2].expected, "See you soon");
        assert_eq!(m[2].recognized, "");
        Ok(())
    }

    #[test]
    fn test_build_manifest_empty_dir() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        assert!(build_manifest(dir.path()).is_err());
        Ok(())
    }
}
