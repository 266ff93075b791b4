//! Keyword matching with a block-similarity fallback.
//!
//! A keyword matches an utterance when it occurs in it verbatim, or when the
//! two strings are similar enough as a whole. Similarity is the
//! Ratcliff/Obershelp ratio `2*M / (|a| + |b|)`, where `M` is the number of
//! characters covered by recursively found longest common blocks.
//!
//! Callers are expected to case-fold both sides; nothing else is normalized.

use std::collections::HashMap;

/// Threshold for single keyword-list checks when the caller has no opinion.
pub const DEFAULT_THRESHOLD: f64 = 0.8;

/// True if any keyword is a substring of `text` or is similar to it at `threshold` or above.
pub fn fuzzy_match<S: AsRef<str>>(text: &str, keywords: &[S], threshold: f64) -> bool {
    keywords.iter().any(|kw| {
        let kw = kw.as_ref();
        text.contains(kw) || similarity_ratio(text, kw) >= threshold
    })
}

/// Similarity of `a` and `b` in `[0.0, 1.0]`. Two empty strings are identical.
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    let matched = matching_chars(&a, &b);
    2.0 * matched as f64 / total as f64
}

/// Count characters covered by matching blocks.
fn matching_chars(a: &[char], b: &[char]) -> usize {
    let mut positions: HashMap<char, Vec<usize>> = HashMap::new();
    for (j, c) in b.iter().enumerate() {
        positions.entry(*c).or_default().push(j);
    }

    let mut matched = 0;
    let mut queue = vec![(0, a.len(), 0, b.len())];
    while let Some((alo, ahi, blo, bhi)) = queue.pop() {
        let (i, j, size) = longest_match(a, &positions, alo, ahi, blo, bhi);
        if size == 0 {
            continue;
        }
        matched += size;
        if alo < i && blo < j {
            queue.push((alo, i, blo, j));
        }
        if i + size < ahi && j + size < bhi {
            queue.push((i + size, ahi, j + size, bhi));
        }
    }
    matched
}

/// Longest common block of `a[alo..ahi]` and `b[blo..bhi]`.
///
/// Ties go to the block starting earliest in `a`, then earliest in `b`.
fn longest_match(
    a: &[char],
    positions: &HashMap<char, Vec<usize>>,
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0);
    // run length of the match ending at b[j], for the previous row of a
    let mut prev: HashMap<usize, usize> = HashMap::new();
    for (i, c) in a.iter().enumerate().take(ahi).skip(alo) {
        let mut current: HashMap<usize, usize> = HashMap::new();
        if let Some(js) = positions.get(c) {
            for &j in js {
                if j < blo {
                    continue;
                }
                if j >= bhi {
                    break;
                }
                let k = j
                    .checked_sub(1)
                    .and_then(|p| prev.get(&p))
                    .copied()
                    .unwrap_or(0)
                    + 1;
                current.insert(j, k);
                if k > best_size {
                    best_i = i + 1 - k;
                    best_j = j + 1 - k;
                    best_size = k;
                }
            }
        }
        prev = current;
    }
    (best_i, best_j, best_size)
}
