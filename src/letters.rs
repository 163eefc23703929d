//! Board letter multisets and the word feasibility check
//!
//! The board has a single two-letter tile, "qu". How that tile is encoded is
//! chosen with a [`QuRule`] and must be the same for the board and for the
//! dictionary words checked against it.

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

use crate::{WordError, BOARD_TILES};

const ALPHABET: usize = 26;
const Q: usize = (b'q' - b'a') as usize;
const U: usize = (b'u' - b'a') as usize;

/// How the fused "qu" tile is represented and matched
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuRule {
    /// "qu" is collapsed to the single symbol `q` on the board and in words.
    /// A lone `q` always stands for the fused tile.
    Fused,
    /// "qu" stays literal. Each board "qu" pair is one fused tile that is
    /// either used whole or not at all, so a bare `u` in a word can only be
    /// taken from a free-standing `u` tile.
    Guarded,
    /// "qu" stays literal and letters are counted one by one with no
    /// exclusivity check. A fused tile can lend its `u` to another part of
    /// the word.
    Unguarded,
}

impl Default for QuRule {
    fn default() -> Self {
        QuRule::Fused
    }
}

impl QuRule {
    /// Single byte tag used by compiled dictionaries
    pub fn tag(self) -> u8 {
        match self {
            QuRule::Fused => 0,
            QuRule::Guarded => 1,
            QuRule::Unguarded => 2,
        }
    }

    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(QuRule::Fused),
            1 => Some(QuRule::Guarded),
            2 => Some(QuRule::Unguarded),
            _ => None,
        }
    }

    /// Converts a lowercase word into this rule's encoding
    pub fn encode(self, word: &str) -> String {
        match self {
            QuRule::Fused => word.replace("qu", "q"),
            QuRule::Guarded | QuRule::Unguarded => word.to_string(),
        }
    }

    /// Converts an encoded word back into the letters a player would read
    pub fn display(self, word: &str) -> String {
        match self {
            QuRule::Fused => word.replace('q', "qu"),
            QuRule::Guarded | QuRule::Unguarded => word.to_string(),
        }
    }
}

impl FromStr for QuRule {
    type Err = WordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fused" => Ok(QuRule::Fused),
            "guarded" => Ok(QuRule::Guarded),
            "unguarded" => Ok(QuRule::Unguarded),
            _ => Err(WordError::UnknownQuRule(s.to_string())),
        }
    }
}

impl fmt::Display for QuRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            QuRule::Fused => "fused",
            QuRule::Guarded => "guarded",
            QuRule::Unguarded => "unguarded",
        };
        write!(f, "{}", name)
    }
}

/// Returns true if every character of `word` is a lowercase ASCII letter
pub fn is_well_formed(word: &str) -> bool {
    !word.is_empty() && word.bytes().all(|b| b.is_ascii_lowercase())
}

/// Cleans up raw OCR text of a board into tile letters
///
/// Separator glyphs and tile countdown digits are dropped, a zero is read as
/// the letter `o`, and under [`QuRule::Fused`] every "qu" is collapsed.
pub fn clean_board_text(raw: &str, rule: QuRule) -> String {
    let cleaned: String = raw
        .trim()
        .to_lowercase()
        .chars()
        .filter_map(|c| match c {
            ' ' | '|' | '/' => None,
            '0' => Some('o'),
            '1'..='9' => None,
            c => Some(c),
        })
        .collect();
    rule.encode(&cleaned)
}

/// Splits text into one symbol per tile
///
/// Under the literal rules a "qu" pair is one tile and becomes `q`. Under
/// [`QuRule::Fused`] the text is already encoded, so every character is a
/// tile and a `u` after `q` is a free `u` tile.
pub fn tile_symbols(text: &str, rule: QuRule) -> Vec<char> {
    let mut symbols = Vec::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if rule != QuRule::Fused && c == 'q' && chars.peek() == Some(&'u') {
            chars.next();
        }
        symbols.push(c);
    }
    symbols
}

/// Per-letter counts of a word or a board
///
/// `fused` counts literal "qu" pairs and is only used by the literal rules;
/// under [`QuRule::Fused`] the count of `q` is already the fused tile count.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub struct LetterCounts {
    letters: [u8; ALPHABET],
    fused: u8,
}

impl LetterCounts {
    /// Counts the letters of `text` under `rule`, ignoring anything outside `a`-`z`
    ///
    /// `text` must already be in the rule's encoding. Encoded text is never
    /// collapsed again, so under [`QuRule::Fused`] a `u` after the `q` tile
    /// counts as a free `u`.
    pub fn of(text: &str, rule: QuRule) -> Self {
        let mut counts = Self::default();
        let bytes = text.as_bytes();
        for (i, &b) in bytes.iter().enumerate() {
            if !b.is_ascii_lowercase() {
                continue;
            }
            let idx = (b - b'a') as usize;
            counts.letters[idx] = counts.letters[idx].saturating_add(1);
            if rule != QuRule::Fused && b == b'q' && bytes.get(i + 1) == Some(&b'u') {
                counts.fused = counts.fused.saturating_add(1);
            }
        }
        counts
    }

    /// The count of a single letter, zero for anything outside `a`-`z`
    pub fn count(&self, letter: char) -> u8 {
        if letter.is_ascii_lowercase() {
            self.letters[(letter as u8 - b'a') as usize]
        } else {
            0
        }
    }

    /// The number of literal "qu" pairs
    pub fn fused(&self) -> u8 {
        self.fused
    }

    /// The total number of letters counted
    pub fn total(&self) -> usize {
        self.letters.iter().map(|&c| c as usize).sum()
    }
}

/// The multiset of letters available on one board sample
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LetterInventory {
    counts: LetterCounts,
    rule: QuRule,
}

impl LetterInventory {
    /// Builds the inventory of an OCR-resolved board string
    ///
    /// `letters` must already be in the rule's encoding, as returned by
    /// [`clean_board_text`]. Characters other than lowercase letters never
    /// satisfy any word.
    pub fn from_board<S: AsRef<str>>(letters: S, rule: QuRule) -> Self {
        let letters = letters.as_ref();
        let inventory = Self {
            counts: LetterCounts::of(letters, rule),
            rule,
        };
        if inventory.tiles() > BOARD_TILES {
            log::warn!(
                "board '{}' has {} tiles, more than the {} a board can hold",
                letters,
                inventory.tiles(),
                BOARD_TILES
            );
        }
        inventory
    }

    pub fn rule(&self) -> QuRule {
        self.rule
    }

    pub fn counts(&self) -> &LetterCounts {
        &self.counts
    }

    /// The number of physical tiles, counting a literal "qu" pair once
    pub fn tiles(&self) -> usize {
        self.counts.total() - self.counts.fused as usize
    }

    pub fn is_empty(&self) -> bool {
        self.counts.total() == 0
    }

    /// Returns true if `required` can be taken from this inventory
    pub fn contains(&self, required: &LetterCounts) -> bool {
        let have = &self.counts;
        match self.rule {
            QuRule::Fused | QuRule::Unguarded => have
                .letters
                .iter()
                .zip(required.letters.iter())
                .all(|(have, need)| have >= need),
            QuRule::Guarded => {
                if required.fused > have.fused {
                    return false;
                }
                (0..ALPHABET).all(|idx| {
                    if idx == Q || idx == U {
                        // letters bound into a fused pair are not available on their own
                        let free_have = have.letters[idx].saturating_sub(have.fused);
                        let free_need = required.letters[idx].saturating_sub(required.fused);
                        free_have >= free_need
                    } else {
                        have.letters[idx] >= required.letters[idx]
                    }
                })
            }
        }
    }
}

/// Returns true if `word` can be spelled from the tiles in `inventory`
///
/// `word` must be in the inventory's [`QuRule`] encoding, as produced by
/// [`QuRule::encode`]. Words containing anything other than lowercase ASCII
/// letters never match.
pub fn matches(word: &str, inventory: &LetterInventory) -> bool {
    is_well_formed(word) && inventory.contains(&LetterCounts::of(word, inventory.rule))
}
