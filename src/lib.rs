//! A damage ranker for tile-based word games played on a 4x4 letter board
//!
//! Given the letters currently on the board and the gem modifiers attached to
//! some of them, this crate finds every dictionary word that can be spelled
//! and orders them by the damage they would deal.
//!
//! # Basic Usage
//!
//! ```
//! use wordmg::{letters::{clean_board_text, LetterInventory, QuRule}, ranker::Ranker};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! let words: Vec<String> = ["rat", "start", "quart"]
//!     .iter()
//!     .map(|w| QuRule::Fused.encode(w))
//!     .collect();
//! let board = clean_board_text("rtasqu", QuRule::Fused);
//! let inventory = LetterInventory::from_board(&board, QuRule::Fused);
//!
//! let ranked = Ranker::new(&inventory).rank(&words);
//!
//! assert_eq!(ranked[0].display_word(QuRule::Fused), "quart");
//! assert_eq!(ranked[0].damage, 5.75);
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use anyhow;

pub mod letters;

pub mod damage;

pub mod gems;

pub mod dictionary;

pub mod ranker;

pub mod config;

pub mod error;

mod test;

pub use error::WordError;

/// The number of tiles on the board
pub const BOARD_TILES: usize = 16;

/// The width of the board in tiles
pub const BOARD_WIDTH: usize = 4;

/// Words must be strictly longer than this to be worth loading
pub const MIN_WORD_LEN: usize = 5;

/// The longest word that fits on the board
pub const MAX_WORD_LEN: usize = BOARD_TILES;

/// The number of results shown when no limit is configured
pub const DEFAULT_DISPLAY_LIMIT: usize = 50;

// the board is square and a word can never use more tiles than the board holds
const_assert_eq!(BOARD_WIDTH * BOARD_WIDTH, BOARD_TILES);
const_assert!(MIN_WORD_LEN < MAX_WORD_LEN);
// word lengths are stored in a single byte in compiled dictionaries
const_assert!(MAX_WORD_LEN <= u8::MAX as usize);
