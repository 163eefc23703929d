use anyhow::{Context, Result};
use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use indicatif::*;
use serde::Deserialize;

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::letters::{is_well_formed, QuRule};
use crate::{WordError, MAX_WORD_LEN, MIN_WORD_LEN};

/// Leading bytes of a compiled dictionary file
pub const COMPILED_MAGIC: &[u8; 4] = b"WDMG";

// below this many words a progress bar is just noise
const PROGRESS_THRESHOLD: usize = 50_000;

/// Word list layout shipped with the game's dictionary
#[derive(Deserialize)]
struct WordList {
    words: Vec<String>,
}

/// Settings applied while loading a word list
#[derive(Copy, Clone, Debug)]
pub struct LoadOptions {
    /// Words must be strictly longer than this
    pub min_len: usize,
    /// Words must be at most this long
    pub max_len: usize,
    pub rule: QuRule,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            min_len: MIN_WORD_LEN,
            max_len: MAX_WORD_LEN,
            rule: QuRule::default(),
        }
    }
}

/// The candidate words, filtered and encoded once at startup
#[derive(Clone, Debug)]
pub struct Dictionary {
    words: Vec<String>,
    rule: QuRule,
}

impl Dictionary {
    /// Filters a raw word list by length and encodes it for matching
    ///
    /// Entries that are not lowercase ASCII are skipped with a warning.
    pub fn from_words<I, S>(words: I, options: &LoadOptions) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words: Vec<S> = words.into_iter().collect();

        let progress = if words.len() >= PROGRESS_THRESHOLD {
            let progress = ProgressBar::new(words.len() as u64);
            progress.set_style(
                ProgressStyle::default_bar()
                    .template("Filtering dictionary: {bar:40.cyan/blue} {pos}/{len}")
                    .progress_chars("█▓▒░  "),
            );
            progress
        } else {
            ProgressBar::hidden()
        };

        let mut kept = Vec::new();
        let mut skipped = 0usize;
        for word in words.iter() {
            progress.inc(1);
            let word = word.as_ref().trim();
            if !is_well_formed(word) {
                log::warn!("skipping dictionary entry '{}', not lowercase ASCII", word);
                skipped += 1;
                continue;
            }
            // length bounds apply to the word as spelled, before any qu collapse
            if word.len() > options.min_len && word.len() <= options.max_len {
                kept.push(options.rule.encode(word));
            }
        }
        progress.finish_and_clear();

        log::info!(
            "loaded {} of {} words ({} malformed)",
            kept.len(),
            words.len(),
            skipped
        );
        Self {
            words: kept,
            rule: options.rule,
        }
    }

    /// Loads a dictionary file, picking the format from its extension
    ///
    /// `.json` files hold `{"words": [...]}`, `.bin` files are compiled
    /// dictionaries and anything else is read as one word per line.
    pub fn load<P: AsRef<Path>>(path: P, options: &LoadOptions) -> Result<Self> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => {
                let file = BufReader::new(File::open(path)?);
                let list: WordList = serde_json::from_reader(file)
                    .with_context(|| format!("could not parse {}", path.display()))?;
                Ok(Self::from_words(list.words, options))
            }
            Some("bin") => Ok(Self::load_compiled(path, options.rule)?),
            _ => {
                let file = BufReader::new(File::open(path)?);
                let mut lines = Vec::new();
                for line in file.lines() {
                    let line = line?;
                    if !line.trim().is_empty() {
                        lines.push(line);
                    }
                }
                Ok(Self::from_words(lines, options))
            }
        }
    }

    /// Writes this dictionary out in the compiled format
    pub fn save_compiled<P: AsRef<Path>>(&self, path: P) -> Result<(), WordError> {
        let mut file = BufWriter::new(
            OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(path)?,
        );

        file.write_all(COMPILED_MAGIC)?;
        file.write_u8(self.rule.tag())?;
        file.write_u32::<BigEndian>(self.words.len() as u32)?;
        for word in self.words.iter() {
            file.write_u8(word.len() as u8)?;
            file.write_all(word.as_bytes())?;
        }
        file.flush()?;
        Ok(())
    }

    /// Reads a compiled dictionary, which must have been built with `rule`
    pub fn load_compiled<P: AsRef<Path>>(path: P, rule: QuRule) -> Result<Self, WordError> {
        let mut file = BufReader::new(File::open(path)?);

        let mut magic = [0; 4];
        file.read_exact(&mut magic)?;
        if &magic != COMPILED_MAGIC {
            return Err(WordError::CompiledFormat("bad magic bytes".to_string()));
        }

        let tag = file.read_u8()?;
        let stored = QuRule::from_tag(tag)
            .ok_or_else(|| WordError::CompiledFormat(format!("unknown qu rule tag {}", tag)))?;
        if stored != rule {
            return Err(WordError::CompiledFormat(format!(
                "compiled with the {} qu rule, {} requested",
                stored, rule
            )));
        }

        let count = file.read_u32::<BigEndian>()? as usize;
        let mut words = Vec::with_capacity(count);
        for i in 0..count {
            let len = file.read_u8()? as usize;
            let mut bytes = vec![0; len];
            file.read_exact(&mut bytes)?;
            let word = String::from_utf8(bytes)
                .ok()
                .filter(|word| is_well_formed(word))
                .ok_or_else(|| WordError::CompiledFormat(format!("malformed word at index {}", i)))?;
            words.push(word);
        }
        Ok(Self { words, rule })
    }

    pub fn rule(&self) -> QuRule {
        self.rule
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }
}

impl std::ops::Deref for Dictionary {
    type Target = [String];

    fn deref(&self) -> &Self::Target {
        &self.words
    }
}
