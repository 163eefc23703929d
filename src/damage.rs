//! Word damage under the game's letter values and gem multipliers

use crate::gems::GemAssignment;
use crate::letters::{tile_symbols, QuRule};

/// Damage of the fused "qu" tile, scored once for the pair
pub const QU_DAMAGE: f64 = 2.75;

/// Base damage per letter, from the community letter value guide
const LETTER_DAMAGE: [(f64, &str); 6] = [
    (1.00, "adegilnorstu"),
    (1.25, "bcfhmp"),
    (1.50, "vwy"),
    (1.75, "jk"),
    (2.00, "xz"),
    (QU_DAMAGE, "q"),
];

/// Base damage of a single letter, zero for anything outside the alphabet
pub fn letter_value(letter: char) -> f64 {
    let letter = letter.to_ascii_lowercase();
    LETTER_DAMAGE
        .iter()
        .find(|(_, letters)| letters.contains(letter))
        .map(|&(value, _)| value)
        .unwrap_or(0.0)
}

/// Sum of the tile values of `word` before any gem multiplier
///
/// `word` is read in `rule`'s encoding: a literal "qu" pair under the literal
/// rules and the `q` symbol under [`QuRule::Fused`] both score [`QU_DAMAGE`]
/// once. Any other `u` scores as a plain letter.
pub fn base_damage(word: &str, rule: QuRule) -> f64 {
    tile_symbols(&word.to_ascii_lowercase(), rule)
        .into_iter()
        .map(letter_value)
        .sum()
}

/// Rounds to hundredths, halves away from zero
pub fn round_damage(damage: f64) -> f64 {
    (damage * 100.0).round() / 100.0
}

/// Calculates the damage that `word` deals, with the board's gems if known
pub fn damage(word: &str, rule: QuRule, gems: Option<&GemAssignment>) -> f64 {
    let multiplier = match gems {
        Some(gems) => gems.multiplier(&word.to_ascii_lowercase(), rule),
        None => 1.0,
    };
    round_damage(base_damage(word, rule) * multiplier)
}
