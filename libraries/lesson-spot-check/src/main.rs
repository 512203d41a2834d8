//! Spot check lesson content files before they ship.
//!
//! Takes one or more lesson-set JSON files, runs each through the content
//! validator, and prints the summary plus a few derived stats. Exits
//! non-zero if any file fails validation, so it can gate content updates in
//! CI.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use content_utils::validation::validate_and_flatten;
use content_utils::{AnnotatedWord, LessonSet, filter_for_one_character_mode, lesson_has_content};

struct SpotCheckReport {
    summary: String,
    total_words: usize,
    lessons_with_content: usize,
    one_character_words: usize,
    words_missing_pinyin: Vec<String>,
}

fn spot_check(path: &Path) -> Result<SpotCheckReport> {
    let raw = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let lessons: LessonSet =
        serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))?;

    let (content, summary) = validate_and_flatten(&lessons)?;

    let words: Vec<_> = content
        .iter()
        .map(|entry: &AnnotatedWord| entry.word.clone())
        .collect();

    let words_missing_pinyin = words
        .iter()
        .filter(|word| word.pinyin.trim().is_empty())
        .map(|word| word.traditional.clone())
        .collect();

    Ok(SpotCheckReport {
        summary,
        total_words: content.len(),
        lessons_with_content: lessons.iter().filter(|lesson| lesson_has_content(lesson)).count(),
        one_character_words: filter_for_one_character_mode(&words).len(),
        words_missing_pinyin,
    })
}

fn print_report(report: &SpotCheckReport) {
    println!("{}", report.summary);
    println!();
    println!("  Lessons with content: {}", report.lessons_with_content);
    println!("  Flattened words: {}", report.total_words);
    println!("  One-character words: {}", report.one_character_words);

    if !report.words_missing_pinyin.is_empty() {
        log::warn!(
            "{count} words are missing pinyin: {words:?}",
            count = report.words_missing_pinyin.len(),
            words = report.words_missing_pinyin,
        );
        println!(
            "  Words missing pinyin: {:?}",
            report.words_missing_pinyin
        );
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let paths: Vec<PathBuf> = std::env::args().skip(1).map(PathBuf::from).collect();
    if paths.is_empty() {
        return Err(anyhow!("Usage: lesson-spot-check <lesson-set.json>..."));
    }

    let mut failures = 0;
    for path in &paths {
        println!("\n=== Spot checking {} ===", path.display());

        match spot_check(path) {
            Ok(report) => print_report(&report),
            Err(e) => {
                failures += 1;
                eprintln!("Failed: {e:#}");
            }
        }
    }

    if failures > 0 {
        return Err(anyhow!(
            "{failures} of {total} lesson sets failed the spot check",
            total = paths.len()
        ));
    }

    println!("\nAll lesson sets passed the spot check.");
    Ok(())
}
