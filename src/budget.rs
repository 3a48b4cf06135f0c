// src/budget.rs
//! Largest ranked prefix whose rendering fits a token budget.

use std::convert::Infallible;

use crate::tokens::TokenCounter;

/// The selected prefix, its rendering, and that rendering's token count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetFit<T> {
    pub items: Vec<T>,
    pub output: String,
    pub tokens_used: usize,
}

impl<T> BudgetFit<T> {
    fn empty() -> Self {
        Self {
            items: Vec::new(),
            output: String::new(),
            tokens_used: 0,
        }
    }
}

/// Binary-searches the longest prefix of `items` whose rendering costs at
/// most `max_tokens`.
///
/// `counter` must not decrease as the rendered text grows. When no prefix
/// fits (not even the empty one) the result is empty with zero tokens.
pub fn fit_to_budget<T, F, C>(items: &[T], render: F, counter: &C, max_tokens: usize) -> BudgetFit<T>
where
    T: Clone,
    F: Fn(&[T]) -> String,
    C: TokenCounter + ?Sized,
{
    match try_fit_to_budget(items, |prefix| Ok::<_, Infallible>(render(prefix)), counter, max_tokens) {
        Ok(fit) => fit,
        Err(never) => match never {},
    }
}

/// [`fit_to_budget`] with a fallible renderer.
///
/// # Errors
/// Returns the first error `render` produces.
pub fn try_fit_to_budget<T, E, F, C>(
    items: &[T],
    render: F,
    counter: &C,
    max_tokens: usize,
) -> Result<BudgetFit<T>, E>
where
    T: Clone,
    F: Fn(&[T]) -> Result<String, E>,
    C: TokenCounter + ?Sized,
{
    if items.is_empty() {
        return Ok(BudgetFit::empty());
    }

    let mut best: Option<(usize, String, usize)> = None;
    let mut low = 0usize;
    let mut high = items.len();
    let mut probes = 0usize;

    while low <= high {
        let mid = low + (high - low) / 2;
        let output = render(&items[..mid])?;
        let tokens = counter.count(&output);
        probes += 1;

        if tokens <= max_tokens {
            // Fits only move `low` up, so this prefix beats any earlier fit.
            best = Some((mid, output, tokens));
            low = mid + 1;
        } else if mid == 0 {
            break;
        } else {
            high = mid - 1;
        }
    }

    let Some((k, output, tokens_used)) = best else {
        tracing::debug!(max_tokens, probes, "nothing fits the budget");
        return Ok(BudgetFit::empty());
    };

    tracing::debug!(selected = k, of = items.len(), tokens_used, max_tokens, probes, "fitted to budget");
    Ok(BudgetFit {
        items: items[..k].to_vec(),
        output,
        tokens_used,
    })
}
