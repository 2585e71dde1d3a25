//! Terminal rendering of correction state.
//! Used by the `grammarfix` binary; kept free of I/O so it can be tested.

use crate::correction::result::CorrectionResult;
use crate::feature::CorrectionState;

const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";
const STRIKETHROUGH: &str = "\x1b[9m";

/// Above this many word pairs the diff degrades to "replace everything".
const MAX_DIFF_CELLS: usize = 4_000_000;

/// What a panel shows for a given published state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelState<'a> {
    /// Request issued, no result yet.
    Loading,
    Ready { corrected: &'a str },
    Failed { message: &'a str },
}

impl<'a> PanelState<'a> {
    pub fn from_state(state: &'a CorrectionState) -> Self {
        match state {
            None => Self::Loading,
            Some(result) => Self::from_result(result),
        }
    }

    pub fn from_result(result: &'a CorrectionResult) -> Self {
        match (result.corrected_text(), result.error_message()) {
            (Some(corrected), _) if result.is_success() => Self::Ready { corrected },
            (_, Some(message)) => Self::Failed { message },
            // Unreachable given the result invariant; treat as a failure with no detail.
            _ => Self::Failed {
                message: crate::defaults::UNKNOWN_ERROR_MESSAGE,
            },
        }
    }
}

/// Compute the longest common subsequence of two word slices.
/// Returns a list of (old_idx, new_idx) pairs for matched words.
fn lcs_indices(old_words: &[&str], new_words: &[&str]) -> Vec<(usize, usize)> {
    let m = old_words.len();
    let n = new_words.len();

    let mut table = vec![vec![0u32; n + 1]; m + 1];
    for i in 1..=m {
        for j in 1..=n {
            if old_words[i - 1] == new_words[j - 1] {
                table[i][j] = table[i - 1][j - 1] + 1;
            } else {
                table[i][j] = table[i - 1][j].max(table[i][j - 1]);
            }
        }
    }

    let mut matches = Vec::new();
    let (mut i, mut j) = (m, n);
    while i > 0 && j > 0 {
        if old_words[i - 1] == new_words[j - 1] {
            matches.push((i - 1, j - 1));
            i -= 1;
            j -= 1;
        } else if table[i - 1][j] >= table[i][j - 1] {
            i -= 1;
        } else {
            j -= 1;
        }
    }
    matches.reverse();
    matches
}

/// Diff operation for word-level diff.
#[derive(Debug, PartialEq)]
pub enum DiffOp<'a> {
    /// Word present in both texts.
    Equal(&'a str),
    /// Word only in the original.
    Delete(&'a str),
    /// Word only in the correction.
    Insert(&'a str),
}

/// Produce a word-level diff between the original and corrected text.
pub fn word_diff<'a>(original: &'a str, corrected: &'a str) -> Vec<DiffOp<'a>> {
    let old_words: Vec<&str> = original.split_whitespace().collect();
    let new_words: Vec<&str> = corrected.split_whitespace().collect();

    if old_words.len().saturating_mul(new_words.len()) > MAX_DIFF_CELLS {
        return old_words
            .into_iter()
            .map(DiffOp::Delete)
            .chain(new_words.into_iter().map(DiffOp::Insert))
            .collect();
    }

    let matches = lcs_indices(&old_words, &new_words);
    let mut ops = Vec::new();
    let (mut oi, mut ni) = (0, 0);

    for &(om, nm) in &matches {
        while oi < om {
            ops.push(DiffOp::Delete(old_words[oi]));
            oi += 1;
        }
        while ni < nm {
            ops.push(DiffOp::Insert(new_words[ni]));
            ni += 1;
        }
        ops.push(DiffOp::Equal(new_words[nm]));
        oi = om + 1;
        ni = nm + 1;
    }

    ops.extend(old_words[oi..].iter().copied().map(DiffOp::Delete));
    ops.extend(new_words[ni..].iter().copied().map(DiffOp::Insert));
    ops
}

/// Render a correction diff: removed words in strikethrough brackets,
/// followed by their replacement.
pub fn render_diff(original: &str, corrected: &str, color: bool) -> String {
    let mut out = String::new();
    let mut prev_was_delete = false;

    for (idx, op) in word_diff(original, corrected).iter().enumerate() {
        // No space between Delete->Insert (they form a replacement pair)
        if idx > 0 && !(prev_was_delete && matches!(op, DiffOp::Insert(_))) {
            out.push(' ');
        }
        prev_was_delete = matches!(op, DiffOp::Delete(_));
        match (op, color) {
            (DiffOp::Equal(w), _) => out.push_str(w),
            (DiffOp::Delete(w), true) => {
                out.push_str(&format!("{STRIKETHROUGH}{DIM}{RED}[{w}]{RESET}"))
            }
            (DiffOp::Delete(w), false) => out.push_str(&format!("[-{w}-]")),
            (DiffOp::Insert(w), true) => out.push_str(&format!("{GREEN}{w}{RESET}")),
            (DiffOp::Insert(w), false) => out.push_str(&format!("{{+{w}+}}")),
        }
    }

    out
}

/// One-line description of a panel state for status output.
pub fn render_panel(state: &PanelState<'_>) -> String {
    match state {
        PanelState::Loading => "Correcting...".to_string(),
        PanelState::Ready { corrected } => (*corrected).to_string(),
        PanelState::Failed { message } => format!("Correction failed: {message}"),
    }
}
