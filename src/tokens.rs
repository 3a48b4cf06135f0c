// src/tokens.rs
use std::sync::LazyLock;
use tiktoken_rs::CoreBPE;

/// Maps text to a token count. Counts must not shrink as text grows.
pub trait TokenCounter {
    fn count(&self, text: &str) -> usize;
}

/// The tokenizer encoding (`cl100k_base`, used by GPT-4/3.5-turbo).
/// Loaded on first use. If it fails to load, counts are 0 and an error is logged.
static BPE: LazyLock<Option<CoreBPE>> = LazyLock::new(|| {
    tiktoken_rs::cl100k_base()
        .map_err(|e| tracing::error!("failed to load cl100k_base tokenizer: {e}"))
        .ok()
});

/// tiktoken-backed counter.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tokenizer;

impl Tokenizer {
    /// Counts the number of tokens in the given text.
    /// Returns 0 if the tokenizer failed to initialize.
    #[must_use]
    pub fn count(text: &str) -> usize {
        BPE.as_ref()
            .map_or(0, |bpe| bpe.encode_ordinary(text).len())
    }

    /// False when the encoding failed to load and every count is 0.
    #[must_use]
    pub fn is_available() -> bool {
        BPE.is_some()
    }
}

impl TokenCounter for Tokenizer {
    fn count(&self, text: &str) -> usize {
        Self::count(text)
    }
}

/// Approximates tokens as characters divided by four, rounded up.
#[derive(Debug, Clone, Copy, Default)]
pub struct CharEstimate;

impl TokenCounter for CharEstimate {
    fn count(&self, text: &str) -> usize {
        text.chars().count().div_ceil(4)
    }
}
