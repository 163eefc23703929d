//! Ranks the playable dictionary words of a board by damage

use rayon::prelude::*;

use std::cmp::Ordering;

use crate::{
    damage::damage,
    gems::GemAssignment,
    letters::{is_well_formed, matches, LetterInventory, QuRule},
    DEFAULT_DISPLAY_LIMIT,
};

/// A playable word and the damage it deals
#[derive(Clone, Debug, PartialEq)]
pub struct ScoredWord {
    /// The word in the dictionary's encoding
    pub word: String,
    pub damage: f64,
}

impl ScoredWord {
    /// The word as the player reads it on the board
    pub fn display_word(&self, rule: QuRule) -> String {
        rule.display(&self.word)
    }
}

/// Orders candidate words by descending damage for one board sample
///
/// # Notes
/// The inventory and gems are borrowed for a single board sample, a new
/// `Ranker` is made for every sample. Words with equal damage keep their
/// dictionary order.
#[derive(Clone)]
pub struct Ranker<'a> {
    inventory: &'a LetterInventory,
    gems: Option<&'a GemAssignment>,
    limit: usize,

    /// The number of candidates that matched on the last pass, before truncation
    pub matched_count: usize,
}

impl<'a> Ranker<'a> {
    /// Creates a new `Ranker` with no gems and the default display limit
    pub fn new(inventory: &'a LetterInventory) -> Self {
        Self {
            inventory,
            gems: None,
            limit: DEFAULT_DISPLAY_LIMIT,
            matched_count: 0,
        }
    }

    /// Applies the board's gem multipliers when scoring
    pub fn with_gems(mut self, gems: &'a GemAssignment) -> Self {
        self.gems = Some(gems);
        self
    }

    /// Sets the maximum number of results, 0 meaning no limit
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Filters, scores and sorts `candidates`
    pub fn rank<S>(&mut self, candidates: &[S]) -> Vec<ScoredWord>
    where
        S: AsRef<str> + Sync,
    {
        self.matched_count = 0;
        if self.inventory.is_empty() || candidates.is_empty() {
            return Vec::new();
        }

        let inventory = self.inventory;
        let rule = inventory.rule();
        let gems = self.gems;

        // collect keeps dictionary order, which the stable sort below relies on
        let mut scored: Vec<ScoredWord> = candidates
            .par_iter()
            .map(|word| AsRef::<str>::as_ref(word))
            .filter(|word| {
                if !is_well_formed(word) {
                    log::debug!("skipping malformed candidate '{}'", word);
                    return false;
                }
                matches(word, inventory)
            })
            .map(|word| ScoredWord {
                word: word.to_string(),
                damage: damage(word, rule, gems),
            })
            .collect();

        self.matched_count = scored.len();
        scored.sort_by(|a, b| b.damage.partial_cmp(&a.damage).unwrap_or(Ordering::Equal));

        if self.limit != 0 {
            scored.truncate(self.limit);
        }
        log::debug!(
            "{} of {} candidates playable, keeping {}",
            self.matched_count,
            candidates.len(),
            scored.len()
        );
        scored
    }
}

/// Ranks `candidates` against one board sample
///
/// Shorthand for building a [`Ranker`] and calling [`Ranker::rank`].
pub fn rank<S>(
    candidates: &[S],
    inventory: &LetterInventory,
    gems: Option<&GemAssignment>,
    limit: usize,
) -> Vec<ScoredWord>
where
    S: AsRef<str> + Sync,
{
    let mut ranker = Ranker::new(inventory).with_limit(limit);
    if let Some(gems) = gems {
        ranker = ranker.with_gems(gems);
    }
    ranker.rank(candidates)
}
