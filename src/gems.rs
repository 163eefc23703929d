//! Gem modifiers attached to board tiles

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use crate::letters::{tile_symbols, QuRule};
use crate::WordError;

/// One of the fixed gem categories a tile can carry
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GemCategory {
    Amethyst,
    Emerald,
    Sapphire,
    Garnet,
    Ruby,
    Crystal,
    Diamond,
}

impl GemCategory {
    /// Every category, in ascending order of multiplier
    pub const ALL: [GemCategory; 7] = [
        GemCategory::Amethyst,
        GemCategory::Emerald,
        GemCategory::Sapphire,
        GemCategory::Garnet,
        GemCategory::Ruby,
        GemCategory::Crystal,
        GemCategory::Diamond,
    ];

    /// The damage multiplier applied when a word uses a tile of this category
    pub fn multiplier(self) -> f64 {
        match self {
            GemCategory::Amethyst => 1.15,
            GemCategory::Emerald => 1.20,
            GemCategory::Sapphire => 1.25,
            GemCategory::Garnet => 1.30,
            GemCategory::Ruby => 1.35,
            GemCategory::Crystal => 1.50,
            GemCategory::Diamond => 2.00,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            GemCategory::Amethyst => "Amethyst",
            GemCategory::Emerald => "Emerald",
            GemCategory::Sapphire => "Sapphire",
            GemCategory::Garnet => "Garnet",
            GemCategory::Ruby => "Ruby",
            GemCategory::Crystal => "Crystal",
            GemCategory::Diamond => "Diamond",
        }
    }
}

impl FromStr for GemCategory {
    type Err = WordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        GemCategory::ALL
            .iter()
            .copied()
            .find(|gem| gem.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| WordError::UnknownGem(s.to_string()))
    }
}

impl fmt::Display for GemCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Decides which gem, if any, a single tile carries
///
/// The tile representation is up to the caller, typically a cropped image.
pub trait GemClassifier<T> {
    fn classify_gem(&self, tile: &T) -> Option<GemCategory>;
}

impl<T, F> GemClassifier<T> for F
where
    F: Fn(&T) -> Option<GemCategory>,
{
    fn classify_gem(&self, tile: &T) -> Option<GemCategory> {
        self(tile)
    }
}

/// The letters carrying each gem category on one board sample
///
/// A letter belongs to at most one category. The fused "qu" tile is
/// identified by its `q` under every [`QuRule`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GemAssignment {
    gems: BTreeMap<GemCategory, BTreeSet<char>>,
}

impl GemAssignment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks every letter of `letters` as carrying `gem`
    ///
    /// A letter that already belongs to another category is moved. A "qu"
    /// in `letters` names the fused tile.
    pub fn insert(&mut self, gem: GemCategory, letters: &str) {
        for letter in tile_symbols(&letters.to_lowercase(), QuRule::Guarded) {
            if !letter.is_ascii_lowercase() {
                continue;
            }
            if let Some(previous) = self.category_of(letter) {
                if previous == gem {
                    continue;
                }
                log::warn!(
                    "letter '{}' moved from {} to {}, a tile carries one gem",
                    letter,
                    previous,
                    gem
                );
                if let Some(set) = self.gems.get_mut(&previous) {
                    set.remove(&letter);
                    if set.is_empty() {
                        self.gems.remove(&previous);
                    }
                }
            }
            self.gems.entry(gem).or_default().insert(letter);
        }
    }

    /// Pairs each tile of `letters`, read in `rule`'s encoding, with its gem,
    /// skipping plain tiles
    pub fn from_categories(letters: &str, rule: QuRule, gems: &[Option<GemCategory>]) -> Self {
        let mut assignment = Self::new();
        for (letter, gem) in tile_symbols(letters, rule).into_iter().zip(gems.iter()) {
            if let Some(gem) = gem {
                assignment.insert(*gem, &letter.to_string());
            }
        }
        assignment
    }

    /// Classifies every tile image and pairs the results with the board letters
    pub fn from_tiles<T, C>(letters: &str, rule: QuRule, tiles: &[T], classifier: &C) -> Self
    where
        C: GemClassifier<T>,
    {
        let gems: Vec<Option<GemCategory>> =
            tiles.iter().map(|tile| classifier.classify_gem(tile)).collect();
        Self::from_categories(letters, rule, &gems)
    }

    pub fn letters(&self, gem: GemCategory) -> Option<&BTreeSet<char>> {
        self.gems.get(&gem)
    }

    pub fn category_of(&self, letter: char) -> Option<GemCategory> {
        self.gems
            .iter()
            .find(|(_, letters)| letters.contains(&letter))
            .map(|(gem, _)| *gem)
    }

    pub fn is_empty(&self) -> bool {
        self.gems.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (GemCategory, &BTreeSet<char>)> {
        self.gems.iter().map(|(gem, letters)| (*gem, letters))
    }

    /// The product of the multipliers of every category that `word` touches
    ///
    /// `word` is split into tiles under `rule`, so the `u` of a fused tile
    /// never picks up a gem sitting on a free `u`. Each category counts once
    /// no matter how many of its letters appear.
    pub fn multiplier(&self, word: &str, rule: QuRule) -> f64 {
        let symbols = tile_symbols(word, rule);
        self.gems
            .iter()
            .filter(|(_, letters)| symbols.iter().any(|c| letters.contains(c)))
            .map(|(gem, _)| gem.multiplier())
            .product()
    }
}

impl FromStr for GemAssignment {
    type Err = WordError;

    /// Parses `gem=letters` pairs separated by commas, e.g. `ruby=t,diamond=ab`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut assignment = Self::new();
        for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (gem, letters) = part
                .split_once('=')
                .ok_or_else(|| WordError::MalformedGemSpec(part.to_string()))?;
            assignment.insert(gem.parse()?, letters.trim());
        }
        Ok(assignment)
    }
}

impl fmt::Display for GemAssignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .gems
            .iter()
            .map(|(gem, letters)| format!("{}={}", gem, letters.iter().collect::<String>()))
            .collect();
        write!(f, "{}", parts.join(","))
    }
}
