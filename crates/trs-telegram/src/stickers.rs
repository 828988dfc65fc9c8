use std::collections::HashSet;

use rand::seq::SliceRandom;

/// Cached sticker pool answered to inline queries: Telegram file ids plus
/// the lowercase tags they can be searched by.
const BUILTIN_STICKERS: &[(&str, &[&str])] = &[
    (
        "CAACAgIAAxkBAAIBOWRwb2xhX2hvbGFfMDEaAnESAAKHcRVKo2PyZxJ9wzEvBA",
        &["hola", "hi", "saludo", "wave"],
    ),
    (
        "CAACAgIAAxkBAAIBOmRwb2xhX3Jpc2FfMDIaAnESAAKIcRVKW3q1nE0m2GovBA",
        &["risa", "jaja", "lol", "laugh"],
    ),
    (
        "CAACAgIAAxkBAAIBO2Rwb2xhX2dhdG9fMDMaAnESAAKJcRVKpW5qH3BvWCkvBA",
        &["gato", "cat", "michi"],
    ),
    (
        "CAACAgIAAxkBAAIBPGRwb2xhX3RyaXN0ZV8wNBoCcRIAAopxFUrtQ0S2d1xOKS8E",
        &["triste", "sad", "llorar"],
    ),
    (
        "CAACAgIAAxkBAAIBPWRwb2xhX2ZpZXN0YV8wNRoCcRIAAotxFUpAvXo1a4DHNS8E",
        &["fiesta", "party", "baile", "dance"],
    ),
    (
        "CAACAgIAAxkBAAIBPmRwb2xhX29rXzA2GgJxEgACjHEVSvG3pBlTSL0kLwQ",
        &["ok", "vale", "thumbsup", "bien"],
    ),
    (
        "CAACAgIAAxkBAAIBP2Rwb2xhX25vXzA3GgJxEgACjXEVSmFqK8jEh9A9LwQ",
        &["no", "nope", "nel"],
    ),
    (
        "CAACAgIAAxkBAAIBQGRwb2xhX2Ftb3JfMDgaAnESAAKOcRVKEY5cPUnDUjQvBA",
        &["amor", "love", "corazon", "heart"],
    ),
];

#[derive(Clone, Debug)]
pub struct Sticker {
    pub file_id: String,
    pub tags: Vec<String>,
}

/// In-memory index over the fixed sticker pool.
#[derive(Clone, Debug, Default)]
pub struct StickerIndex {
    stickers: Vec<Sticker>,
}

impl StickerIndex {
    pub fn builtin() -> Self {
        Self::new(
            BUILTIN_STICKERS
                .iter()
                .map(|(file_id, tags)| Sticker {
                    file_id: file_id.to_string(),
                    tags: tags.iter().map(|t| t.to_string()).collect(),
                })
                .collect(),
        )
    }

    pub fn new(stickers: Vec<Sticker>) -> Self {
        Self { stickers }
    }

    /// Up to `n` file ids in random order.
    pub fn random(&self, n: usize) -> Vec<String> {
        self.stickers
            .choose_multiple(&mut rand::thread_rng(), n)
            .map(|s| s.file_id.clone())
            .collect()
    }

    /// File ids whose tags contain `query` (case-insensitive substring),
    /// in pool order.
    pub fn search(&self, query: &str) -> Vec<String> {
        let query = query.to_lowercase();
        self.stickers
            .iter()
            .filter(|s| s.tags.iter().any(|t| t.contains(&query)))
            .map(|s| s.file_id.clone())
            .collect()
    }
}

/// Drop repeated file ids, keeping the first occurrence's position.
pub fn dedupe_preserving_order(ids: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    ids.into_iter().filter(|id| seen.insert(id.clone())).collect()
}
