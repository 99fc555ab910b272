//! Hyphenation services.
//!
//! A [`Hyphenator`] returns the character offsets at which a word may be split
//! with a hyphen. Breaks right after a literal `-` are always reported.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;
use smallvec::SmallVec;
use std::collections::HashMap;

/// Valid break offsets inside one word.
///
/// Offset `i` splits the word into chars `[0, i)` and `[i, len)`; offsets are
/// strictly inside the word and sorted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HyphenationInfo {
    len: usize,
    breaks: SmallVec<[u16; 8]>,
}

impl HyphenationInfo {
    /// Info with no break points.
    pub fn none(len: usize) -> Self {
        Self {
            len,
            breaks: SmallVec::new(),
        }
    }

    /// Info from arbitrary offsets; out-of-word offsets are dropped.
    pub fn from_offsets(len: usize, offsets: impl IntoIterator<Item = usize>) -> Self {
        let mut breaks: SmallVec<[u16; 8]> = offsets
            .into_iter()
            .filter(|offset| *offset > 0 && *offset < len)
            .filter_map(|offset| u16::try_from(offset).ok())
            .collect();
        breaks.sort_unstable();
        breaks.dedup();
        Self { len, breaks }
    }

    /// Word length in characters.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.breaks.is_empty()
    }

    /// True if the word may be split before char `offset`.
    pub fn is_possible(&self, offset: usize) -> bool {
        u16::try_from(offset)
            .map(|offset| self.breaks.binary_search(&offset).is_ok())
            .unwrap_or(false)
    }

    /// First break strictly after `offset`.
    pub fn first_after(&self, offset: usize) -> Option<usize> {
        self.offsets().find(|candidate| *candidate > offset)
    }

    pub fn offsets(&self) -> impl Iterator<Item = usize> + '_ {
        self.breaks.iter().map(|offset| usize::from(*offset))
    }
}

/// Source of hyphenation points.
pub trait Hyphenator: Send + Sync {
    /// Break offsets for `word`.
    fn hyphenate(&self, word: &str) -> HyphenationInfo;
}

/// Hyphenator that never splits words.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoHyphenation;

impl Hyphenator for NoHyphenation {
    fn hyphenate(&self, word: &str) -> HyphenationInfo {
        HyphenationInfo::none(word.chars().count())
    }
}

fn literal_hyphen_breaks(chars: &[char]) -> impl Iterator<Item = usize> + '_ {
    chars
        .iter()
        .enumerate()
        .filter(|(_, ch)| **ch == '-')
        .map(|(idx, _)| idx + 1)
}

/// Lightweight English hyphenator.
///
/// Words of at least [`Self::MIN_WORD`] letters split where a vowel run meets
/// a consonant run and before common suffixes. Neither fragment is shorter
/// than [`Self::EDGE`] letters. A few words carry fixed breaks, written in the
/// same `ex-am-ple` notation as [`PatternHyphenator`] exceptions.
#[derive(Clone, Copy, Debug, Default)]
pub struct EnglishHeuristicHyphenator;

impl EnglishHeuristicHyphenator {
    pub const MIN_WORD: usize = 7;
    pub const EDGE: usize = 3;

    const SUFFIXES: &'static [&'static str] = &[
        "ingly", "edly", "tion", "sion", "ment", "ness", "less", "able", "ible", "ally", "ing",
        "ed", "ly",
    ];

    const KNOWN: &'static [&'static str] = &[
        "ac-ces-si-bil-i-ty",
        "ap-par-ent-ly",
        "char-ac-ter-is-tic-al-ly",
        "de-ter-mined",
        "en-coun-ter",
        "ex-tra-or-di-nary",
        "func-tion-al-i-ty",
        "fun-da-men-tal",
        "lan-guage",
        "nav-i-ga-tor",
        "pag-i-na-tion",
        "par-a-graph",
        "pub-li-ca-tion",
        "re-spon-si-bil-i-ty",
        "ty-pog-ra-phy",
    ];

    fn known_breaks(lower: &[char]) -> Option<SmallVec<[usize; 4]>> {
        Self::KNOWN
            .iter()
            .find_map(|token| marked_breaks(token, lower))
    }

    fn is_vowel(ch: char) -> bool {
        matches!(ch, 'a' | 'e' | 'i' | 'o' | 'u' | 'y')
    }
}

impl Hyphenator for EnglishHeuristicHyphenator {
    fn hyphenate(&self, word: &str) -> HyphenationInfo {
        let chars: Vec<char> = word.chars().collect();
        let mut candidates: Vec<usize> = literal_hyphen_breaks(&chars).collect();
        let len = chars.len();
        if len < Self::MIN_WORD {
            return HyphenationInfo::from_offsets(len, candidates);
        }
        let lower: Vec<char> = chars
            .iter()
            .map(|ch| ch.to_lowercase().next().unwrap_or(*ch))
            .collect();

        let mut inner: Vec<usize> = Self::known_breaks(&lower)
            .map(|breaks| breaks.into_vec())
            .unwrap_or_default();

        // None marks chars outside the ASCII alphabet; no break touches them.
        let class: SmallVec<[Option<bool>; 24]> = lower
            .iter()
            .map(|ch| ch.is_ascii_alphabetic().then(|| Self::is_vowel(*ch)))
            .collect();
        inner.extend(
            class
                .windows(2)
                .enumerate()
                .filter_map(|(idx, pair)| match pair {
                    [Some(left), Some(right)] if left != right => Some(idx + 1),
                    _ => None,
                }),
        );

        let tail: String = lower.iter().collect();
        inner.extend(
            Self::SUFFIXES
                .iter()
                .filter(|suffix| tail.ends_with(**suffix))
                .map(|suffix| len - suffix.len()),
        );

        let edges = Self::EDGE..=len - Self::EDGE;
        candidates.extend(inner.into_iter().filter(|offset| edges.contains(offset)));
        HyphenationInfo::from_offsets(len, candidates)
    }
}

/// Breaks of a `ex-am-ple` token if its letters spell `word`.
fn marked_breaks(token: &str, word: &[char]) -> Option<SmallVec<[usize; 4]>> {
    let mut breaks = SmallVec::new();
    let mut letters = word.iter();
    let mut seen = 0usize;
    for ch in token.chars() {
        if ch == '-' {
            breaks.push(seen);
        } else if letters.next() == Some(&ch) {
            seen += 1;
        } else {
            return None;
        }
    }
    letters.next().is_none().then_some(breaks)
}

/// Liang/TeX pattern hyphenator.
///
/// Built from whitespace-separated pattern text in TeX notation (`hy3ph`,
/// `.ach4`). Tokens containing `-` are exception words with explicit breaks
/// (`ta-ble`).
#[derive(Clone, Debug, Default)]
pub struct PatternHyphenator {
    patterns: HashMap<String, SmallVec<[u8; 8]>>,
    exceptions: HashMap<String, SmallVec<[usize; 4]>>,
    max_pattern_chars: usize,
    left_min: usize,
    right_min: usize,
}

impl PatternHyphenator {
    /// Parse TeX pattern text. Minimums default to 2 leading and 3 trailing chars.
    pub fn from_patterns(text: &str) -> Self {
        let mut out = Self {
            left_min: 2,
            right_min: 3,
            ..Self::default()
        };
        for token in text.split_whitespace() {
            if token.contains('-') {
                out.add_exception(token);
            } else {
                out.add_pattern(token);
            }
        }
        log::debug!(
            "pattern hyphenator loaded patterns={} exceptions={}",
            out.patterns.len(),
            out.exceptions.len()
        );
        out
    }

    /// Override the minimum fragment lengths on each side of a break.
    pub fn with_minimums(mut self, left_min: usize, right_min: usize) -> Self {
        self.left_min = left_min.max(1);
        self.right_min = right_min.max(1);
        self
    }

    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    fn add_pattern(&mut self, token: &str) {
        let mut letters = String::with_capacity(token.len());
        let mut values: SmallVec<[u8; 8]> = SmallVec::new();
        values.push(0);
        for ch in token.chars() {
            if let Some(digit) = ch.to_digit(10) {
                if let Some(last) = values.last_mut() {
                    *last = digit as u8;
                }
            } else {
                letters.extend(ch.to_lowercase());
                values.push(0);
            }
        }
        if letters.is_empty() {
            return;
        }
        self.max_pattern_chars = self.max_pattern_chars.max(letters.chars().count());
        self.patterns.insert(letters, values);
    }

    fn add_exception(&mut self, token: &str) {
        let mut word = String::with_capacity(token.len());
        let mut breaks = SmallVec::new();
        let mut chars = 0usize;
        for ch in token.chars() {
            if ch == '-' {
                breaks.push(chars);
            } else {
                word.extend(ch.to_lowercase());
                chars += 1;
            }
        }
        self.exceptions.insert(word, breaks);
    }

    fn pattern_breaks(&self, lower: &[char]) -> Vec<usize> {
        let len = lower.len();
        if len < self.left_min + self.right_min {
            return Vec::with_capacity(0);
        }
        let mut dotted: Vec<char> = Vec::with_capacity(len + 2);
        dotted.push('.');
        dotted.extend_from_slice(lower);
        dotted.push('.');

        // points[p] scores the gap before dotted[p].
        let mut points = vec![0u8; dotted.len() + 1];
        let mut key = String::with_capacity(self.max_pattern_chars * 4);
        for start in 0..dotted.len() {
            key.clear();
            let max_end = (start + self.max_pattern_chars).min(dotted.len());
            for end in start..max_end {
                key.push(dotted[end]);
                if let Some(values) = self.patterns.get(key.as_str()) {
                    for (offset, value) in values.iter().enumerate() {
                        let slot = &mut points[start + offset];
                        *slot = (*slot).max(*value);
                    }
                }
            }
        }

        (self.left_min..=len.saturating_sub(self.right_min))
            .filter(|offset| points[offset + 1] % 2 == 1)
            .collect()
    }
}

impl Hyphenator for PatternHyphenator {
    fn hyphenate(&self, word: &str) -> HyphenationInfo {
        let chars: Vec<char> = word.chars().collect();
        let mut candidates: Vec<usize> = literal_hyphen_breaks(&chars).collect();
        let lower: Vec<char> = chars
            .iter()
            .map(|ch| ch.to_lowercase().next().unwrap_or(*ch))
            .collect();
        if lower.iter().all(|ch| ch.is_alphabetic()) {
            let key: String = lower.iter().collect();
            match self.exceptions.get(&key) {
                Some(breaks) => candidates.extend(breaks.iter().copied()),
                None => candidates.extend(self.pattern_breaks(&lower)),
            }
        }
        HyphenationInfo::from_offsets(chars.len(), candidates)
    }
}
