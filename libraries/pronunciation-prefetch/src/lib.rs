//! Batched prefetching of word pronunciation audio.
//!
//! The pronunciation API answers one word at a time and starts refusing
//! requests once the daily rate limit is hit, so lesson audio is fetched in
//! small batches: each batch runs concurrently, batches run one after
//! another, and the whole run stops early as soon as any response reports
//! the rate limit. The actual HTTP call is injected by the caller, which
//! keeps this crate free of any network client and makes the batching logic
//! testable with a canned fetcher.
//!
//! # Example
//!
//! ```
//! use pronunciation_prefetch::{SoundFileResponse, prefetch_words_list};
//!
//! # futures::executor::block_on(async {
//! let words = vec!["你好".to_string(), "謝謝".to_string()];
//! let outcome = prefetch_words_list(&words, |_word| async {
//!     Ok::<_, std::convert::Infallible>(SoundFileResponse::Items { items: vec![] })
//! })
//! .await;
//! assert_eq!(outcome.processed, 2);
//! # });
//! ```

use std::collections::HashMap;
use std::future::Future;

use futures::future::join_all;
use serde::{Deserialize, Serialize};

/// One pronunciation recording, as returned by the audio API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioItem {
    pub word: String,
    pub hits: u32,
    pub pathmp3: String,
    #[serde(default)]
    pub pathogg: String,
}

/// Raw response shape for a pronunciation lookup. The API signals rate
/// limiting by returning a bare array of messages instead of the usual
/// object, hence the untagged enum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SoundFileResponse {
    RateLimited(Vec<String>),
    Items { items: Vec<AudioItem> },
}

/// A parsed pronunciation lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PronunciationLookup {
    /// Recordings for the word, most played first.
    Found(Vec<AudioItem>),
    /// The API rate limit was hit; no more requests will succeed today.
    RateLimited,
}

/// Parse a pronunciation response, sorting recordings by play count so the
/// most popular recording comes first.
pub fn transform_sound_file_response(response: SoundFileResponse) -> PronunciationLookup {
    match response {
        SoundFileResponse::RateLimited(_) => PronunciationLookup::RateLimited,
        SoundFileResponse::Items { items } => {
            let mut sorted = items;
            sorted.sort_by(|a, b| b.hits.cmp(&a.hits));
            PronunciationLookup::Found(sorted)
        }
    }
}

/// Words fetched per batch. Kept small so a rate-limit response wastes at
/// most one batch of requests.
pub const PREFETCH_BATCH_SIZE: usize = 2;

/// Split a list into consecutive batches of at most `batch_size` items.
pub fn batch_list<T: Clone>(data: &[T], batch_size: usize) -> Vec<Vec<T>> {
    data.chunks(batch_size.max(1))
        .map(|chunk| chunk.to_vec())
        .collect()
}

/// Result of one batch: everything it found, and whether it tripped the
/// rate limit.
struct BatchOutcome {
    found: Vec<(String, Vec<AudioItem>)>,
    rate_limit_reached: bool,
}

/// What a full prefetch run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrefetchOutcome {
    /// Sound data per word, most played recording first.
    pub sound_data: HashMap<String, Vec<AudioItem>>,
    /// Words that came back with usable sound data.
    pub processed: usize,
    /// Words requested in total.
    pub total: usize,
    /// Whether the run stopped early on a rate-limit response.
    pub rate_limit_reached: bool,
}

async fn process_batch<F, Fut, E>(batch: &[String], fetch: &F) -> BatchOutcome
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = Result<SoundFileResponse, E>>,
    E: std::fmt::Display,
{
    let results = join_all(batch.iter().map(|word| fetch(word.clone()))).await;

    let mut outcome = BatchOutcome {
        found: Vec::new(),
        rate_limit_reached: false,
    };

    for (word, result) in batch.iter().zip(results) {
        match result {
            Ok(response) => match transform_sound_file_response(response) {
                PronunciationLookup::Found(items) => outcome.found.push((word.clone(), items)),
                PronunciationLookup::RateLimited => outcome.rate_limit_reached = true,
            },
            // A single failed lookup is not fatal; the word just has no
            // prefetched audio this session.
            Err(e) => log::warn!("Failed to fetch pronunciation for {word}: {e}"),
        }
    }

    outcome
}

/// Prefetch pronunciation audio for a list of words.
///
/// Batches run sequentially; the requests inside one batch run
/// concurrently. As soon as any response reports rate limiting, the
/// remaining batches are skipped and the outcome says so. Each batch hands
/// its results back as a value that is folded into the outcome, so there is
/// no shared in-flight state between batches.
pub async fn prefetch_words_list<F, Fut, E>(words: &[String], fetch: F) -> PrefetchOutcome
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = Result<SoundFileResponse, E>>,
    E: std::fmt::Display,
{
    let total = words.len();
    let batches = batch_list(words, PREFETCH_BATCH_SIZE);

    log::info!(
        "Processing {total} words in {batch_count} batches",
        batch_count = batches.len()
    );

    let mut outcome = PrefetchOutcome {
        total,
        ..PrefetchOutcome::default()
    };

    for (index, batch) in batches.iter().enumerate() {
        if outcome.rate_limit_reached {
            break;
        }

        log::info!("Processing batch {batch_number}...", batch_number = index + 1);
        let batch_outcome = process_batch(batch, &fetch).await;

        outcome.rate_limit_reached |= batch_outcome.rate_limit_reached;
        for (word, items) in batch_outcome.found {
            outcome.processed += 1;
            outcome.sound_data.insert(word, items);
        }
    }

    log::info!(
        "Processed a total of {processed} out of {total} words - (API rate limit reached: {rate_limited})",
        processed = outcome.processed,
        rate_limited = outcome.rate_limit_reached,
    );

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn make_item(word: &str, hits: u32) -> AudioItem {
        AudioItem {
            word: word.to_string(),
            hits,
            pathmp3: format!("https://audio.example/{word}.mp3"),
            pathogg: String::new(),
        }
    }

    #[test]
    fn test_response_parses_item_payload() {
        let raw = r#"{"items": [{"word": "你好", "hits": 12, "pathmp3": "a.mp3"}]}"#;
        let response: SoundFileResponse = serde_json::from_str(raw).unwrap();

        assert!(matches!(response, SoundFileResponse::Items { ref items } if items.len() == 1));
    }

    #[test]
    fn test_response_parses_rate_limit_payload() {
        let raw = r#"["Limit/day reached."]"#;
        let response: SoundFileResponse = serde_json::from_str(raw).unwrap();

        assert_eq!(
            transform_sound_file_response(response),
            PronunciationLookup::RateLimited
        );
    }

    #[test]
    fn test_transform_sorts_by_hits_descending() {
        let response = SoundFileResponse::Items {
            items: vec![make_item("a", 3), make_item("b", 17), make_item("c", 9)],
        };

        let PronunciationLookup::Found(items) = transform_sound_file_response(response) else {
            panic!("expected items");
        };

        let hits: Vec<u32> = items.iter().map(|item| item.hits).collect();
        assert_eq!(hits, vec![17, 9, 3]);
    }

    #[test]
    fn test_batch_list_chunks_with_remainder() {
        let data: Vec<usize> = (0..5).collect();

        let batches = batch_list(&data, 2);

        assert_eq!(batches, vec![vec![0, 1], vec![2, 3], vec![4]]);
    }

    #[tokio::test]
    async fn test_prefetch_collects_sound_data_for_every_word() {
        let words: Vec<String> = ["你", "好", "貓"].map(String::from).to_vec();

        let outcome = prefetch_words_list(&words, |word| async move {
            Ok::<_, std::convert::Infallible>(SoundFileResponse::Items {
                items: vec![make_item(&word, 1)],
            })
        })
        .await;

        assert_eq!(outcome.processed, 3);
        assert_eq!(outcome.total, 3);
        assert!(!outcome.rate_limit_reached);
        assert!(outcome.sound_data.contains_key("貓"));
    }

    #[tokio::test]
    async fn test_prefetch_stops_issuing_batches_after_rate_limit() {
        let words: Vec<String> = ["一", "二", "三", "四", "五", "六"].map(String::from).to_vec();
        let calls = AtomicUsize::new(0);

        let outcome = prefetch_words_list(&words, |word| {
            calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if word == "三" {
                    Ok::<_, std::convert::Infallible>(SoundFileResponse::RateLimited(vec![
                        "Limit/day reached.".to_string(),
                    ]))
                } else {
                    Ok(SoundFileResponse::Items {
                        items: vec![make_item(&word, 1)],
                    })
                }
            }
        })
        .await;

        // The batch containing the rate-limited word still completes (its
        // requests were already in flight), but the final batch never runs.
        assert_eq!(calls.load(Ordering::SeqCst), 4);
        assert_eq!(outcome.processed, 3);
        assert!(outcome.rate_limit_reached);
        assert!(!outcome.sound_data.contains_key("五"));
        assert!(!outcome.sound_data.contains_key("六"));
    }

    #[tokio::test]
    async fn test_prefetch_skips_failed_lookups_without_aborting() {
        let words: Vec<String> = ["一", "二"].map(String::from).to_vec();

        let outcome = prefetch_words_list(&words, |word| async move {
            if word == "一" {
                Err("connection reset")
            } else {
                Ok(SoundFileResponse::Items {
                    items: vec![make_item(&word, 1)],
                })
            }
        })
        .await;

        assert_eq!(outcome.processed, 1);
        assert!(!outcome.rate_limit_reached);
        assert!(outcome.sound_data.contains_key("二"));
    }
}
