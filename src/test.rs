#[cfg(test)]
pub mod test {
    use anyhow::{anyhow, Result};
    use std::io::Write;

    use crate::{
        config::Config,
        damage::{base_damage, damage, letter_value},
        dictionary::{Dictionary, LoadOptions},
        gems::{GemAssignment, GemCategory},
        letters::{clean_board_text, matches, tile_symbols, LetterCounts, LetterInventory, QuRule},
        ranker::{rank, Ranker},
        WordError,
    };

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    fn encoded(list: &[&str], rule: QuRule) -> Vec<String> {
        list.iter().map(|w| rule.encode(w)).collect()
    }

    fn board(raw: &str, rule: QuRule) -> LetterInventory {
        LetterInventory::from_board(clean_board_text(raw, rule), rule)
    }

    #[test]
    pub fn letter_values() {
        assert_eq!(letter_value('a'), 1.0);
        assert_eq!(letter_value('U'), 1.0);
        assert_eq!(letter_value('m'), 1.25);
        assert_eq!(letter_value('w'), 1.5);
        assert_eq!(letter_value('j'), 1.75);
        assert_eq!(letter_value('x'), 2.0);
        assert_eq!(letter_value('q'), 2.75);
        assert_eq!(letter_value('#'), 0.0);
        assert_eq!(damage("box", QuRule::Fused, None), 4.25);
    }

    #[test]
    pub fn qu_tile_scored_once() {
        // 2.75 for the pair, 1.00 for i, 2.00 for z
        assert_eq!(damage("quiz", QuRule::Guarded, None), 5.75);
        assert_eq!(damage("qiz", QuRule::Fused, None), 5.75);
        assert_eq!(damage("QUIZ", QuRule::Unguarded, None), 5.75);
        assert_eq!(base_damage("quinqu", QuRule::Guarded), 2.75 + 1.0 + 1.0 + 2.75);
    }

    #[test]
    pub fn encoded_words_score_per_symbol() {
        // s + qu + u + s + h, the second u is its own tile
        let dictionary = Dictionary::from_words(["squush"].iter(), &LoadOptions::default());
        assert_eq!(dictionary.words(), &["sqush".to_string()][..]);
        assert_eq!(damage("sqush", QuRule::Fused, None), 7.0);
        assert_eq!(damage("squush", QuRule::Guarded, None), 7.0);

        // an encoded q followed by u is the qu tile and a free u
        assert_eq!(damage("quiz", QuRule::Fused, None), 6.75);
        assert_eq!(base_damage("qu", QuRule::Fused), 3.75);
        assert_eq!(base_damage("qu", QuRule::Unguarded), 2.75);

        let inventory = board("squush", QuRule::Fused);
        let ranked = rank(dictionary.words(), &inventory, None, 0);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].display_word(QuRule::Fused), "squush");
        assert_eq!(ranked[0].damage, 7.0);

        // without the free u the word is out of reach
        assert!(!matches("sqush", &board("sqush", QuRule::Fused)));
    }

    #[test]
    pub fn gem_multiplier() -> Result<()> {
        let gems: GemAssignment = "ruby=t".parse()?;
        assert_eq!(damage("test", QuRule::Fused, None), 4.0);
        assert_eq!(damage("test", QuRule::Fused, Some(&gems)), 5.4);

        // a category applies once however many of its letters are used
        let gems: GemAssignment = "ruby=ta".parse()?;
        assert_eq!(damage("tatt", QuRule::Fused, Some(&gems)), 5.4);

        let gems: GemAssignment = "diamond=z,emerald=i".parse()?;
        assert_eq!(damage("qiz", QuRule::Fused, Some(&gems)), 13.8);
        assert_eq!(damage("quiz", QuRule::Guarded, Some(&gems)), 13.8);

        // gems on letters the word does not use change nothing
        let gems: GemAssignment = "crystal=xy,sapphire=b".parse()?;
        assert_eq!(
            damage("qiz", QuRule::Fused, Some(&gems)),
            damage("qiz", QuRule::Fused, None)
        );
        Ok(())
    }

    #[test]
    pub fn gem_on_free_u_next_to_fused_tile() -> Result<()> {
        let gems: GemAssignment = "diamond=u".parse()?;

        // the u inside qu is not the diamond tile
        assert_eq!(damage("quart", QuRule::Guarded, Some(&gems)), 5.75);
        assert_eq!(damage("quart", QuRule::Unguarded, Some(&gems)), 5.75);
        assert_eq!(damage("qart", QuRule::Fused, Some(&gems)), 5.75);

        // a word that also uses the free u picks up the multiplier
        assert_eq!(damage("quartu", QuRule::Guarded, Some(&gems)), 13.5);
        assert_eq!(damage("qartu", QuRule::Fused, Some(&gems)), 13.5);

        let inventory = board("quartu", QuRule::Guarded);
        let ranked = rank(&words(&["quart", "quartu"]), &inventory, Some(&gems), 0);
        let ranked: Vec<(&str, f64)> = ranked.iter().map(|s| (s.word.as_str(), s.damage)).collect();
        assert_eq!(ranked, vec![("quartu", 13.5), ("quart", 5.75)]);
        Ok(())
    }

    #[test]
    pub fn gem_parsing() -> Result<()> {
        let gems: GemAssignment = " Ruby=T , DIAMOND=ab ".parse()?;
        assert_eq!(gems.category_of('t'), Some(GemCategory::Ruby));
        assert_eq!(gems.category_of('b'), Some(GemCategory::Diamond));
        assert_eq!(gems.category_of('z'), None);
        assert_eq!(gems.to_string(), "Ruby=t,Diamond=ab");

        assert!("".parse::<GemAssignment>()?.is_empty());

        match "topaz=a".parse::<GemAssignment>() {
            Err(WordError::UnknownGem(name)) => assert_eq!(name, "topaz"),
            other => return Err(anyhow!("expected unknown gem error, got {:?}", other)),
        }
        match "ruby".parse::<GemAssignment>() {
            Err(WordError::MalformedGemSpec(_)) => {}
            other => return Err(anyhow!("expected malformed spec error, got {:?}", other)),
        }
        Ok(())
    }

    #[test]
    pub fn gem_letters_are_exclusive() {
        let mut gems = GemAssignment::new();
        gems.insert(GemCategory::Ruby, "t");
        gems.insert(GemCategory::Diamond, "t");

        assert_eq!(gems.category_of('t'), Some(GemCategory::Diamond));
        assert_eq!(gems.letters(GemCategory::Ruby), None);
        assert_eq!(gems.multiplier("t", QuRule::Fused), 2.0);
    }

    #[test]
    pub fn gems_from_classified_tiles() {
        let tiles = [0u8, 1, 0, 0, 2];
        let classifier = |tile: &u8| match tile {
            1 => Some(GemCategory::Ruby),
            2 => Some(GemCategory::Diamond),
            _ => None,
        };
        let gems = GemAssignment::from_tiles("rtasqu", QuRule::Guarded, &tiles, &classifier);

        assert_eq!(tile_symbols("rtasqu", QuRule::Guarded), vec!['r', 't', 'a', 's', 'q']);
        assert_eq!(gems.category_of('t'), Some(GemCategory::Ruby));
        assert_eq!(gems.category_of('q'), Some(GemCategory::Diamond));
        assert_eq!(gems.category_of('r'), None);

        // fused text already has one symbol per tile
        let fused = GemAssignment::from_tiles("rtasq", QuRule::Fused, &tiles, &classifier);
        assert_eq!(fused, gems);
        assert_eq!(tile_symbols("qu", QuRule::Fused), vec!['q', 'u']);
    }

    #[test]
    pub fn board_text_cleanup() {
        assert_eq!(clean_board_text(" Rt|a/s0 3qu ", QuRule::Fused), "rtasoq");
        assert_eq!(clean_board_text(" Rt|a/s0 3qu ", QuRule::Guarded), "rtasoqu");
    }

    #[test]
    pub fn multiset_containment() {
        let inventory = board("rtastqu", QuRule::Fused);
        assert_eq!(inventory.tiles(), 6);
        assert!(matches("start", &inventory));
        assert!(matches("qart", &inventory));
        assert!(matches(&QuRule::Fused.encode("quart"), &inventory));
        // unencoded, the word asks for a free u the board does not have
        assert!(!matches("quart", &inventory));
        assert!(!matches("starts", &inventory));
        assert!(!matches("tart!", &inventory));
        assert!(!matches("Start", &inventory));
        assert!(!matches("", &inventory));

        // junk on the board never satisfies anything
        let inventory = LetterInventory::from_board("r#t@", QuRule::Fused);
        assert_eq!(inventory.counts().total(), 2);
        assert!(!matches("rat", &inventory));
    }

    #[test]
    pub fn fused_tile_cannot_be_split() {
        let guarded = LetterInventory::from_board("qurst", QuRule::Guarded);
        let unguarded = LetterInventory::from_board("qurst", QuRule::Unguarded);
        let fused = board("qurst", QuRule::Fused);

        // the only u belongs to the qu tile
        assert!(!matches("rust", &guarded));
        assert!(matches("rust", &unguarded));
        assert!(!matches("rust", &fused));

        assert!(matches("qurt", &guarded));
        assert!(matches("qurt", &unguarded));
        assert!(matches("qrt", &fused));
    }

    #[test]
    pub fn free_u_next_to_fused_tile() {
        let inventory = LetterInventory::from_board("quuu", QuRule::Guarded);
        assert_eq!(inventory.counts().fused(), 1);
        assert_eq!(inventory.tiles(), 3);

        assert!(matches("quuu", &inventory));
        assert!(matches("uu", &inventory));
        assert!(!matches("uuu", &inventory));
        assert!(!matches("ququ", &inventory));

        let inventory = board("quuu", QuRule::Fused);
        assert_eq!(inventory.tiles(), 3);
        assert!(matches(&QuRule::Fused.encode("quuu"), &inventory));
        assert!(matches("uu", &inventory));
        assert!(!matches("uuu", &inventory));
        assert!(!matches("qq", &inventory));
    }

    #[test]
    pub fn cleaned_board_keeps_free_u() {
        // the qu tile is read first and a free u tile right after it
        let letters = clean_board_text("quurst", QuRule::Fused);
        assert_eq!(letters, "qurst");

        let inventory = LetterInventory::from_board(&letters, QuRule::Fused);
        assert_eq!(inventory.tiles(), 5);
        assert_eq!(inventory.counts().count('u'), 1);
        assert!(matches("rust", &inventory));
        assert!(matches(&QuRule::Fused.encode("quurst"), &inventory));

        let inventory = board("quurst", QuRule::Guarded);
        assert_eq!(inventory.tiles(), 5);
        assert!(matches("rust", &inventory));

        let dictionary = encoded(&["rust", "quart", "trust"], QuRule::Fused);
        let ranked = rank(&dictionary, &board("quurst", QuRule::Fused), None, 0);
        let ranked: Vec<&str> = ranked.iter().map(|s| s.word.as_str()).collect();
        assert_eq!(ranked, vec!["rust"]);
    }

    #[test]
    pub fn separate_q_and_u_tiles() {
        // no fused tile on this board, only loose q and u
        let guarded = LetterInventory::from_board("qxuart", QuRule::Guarded);
        let unguarded = LetterInventory::from_board("qxuart", QuRule::Unguarded);
        assert!(!matches("quart", &guarded));
        assert!(matches("quart", &unguarded));

        // a fused board never has a bare q, so its q is taken as the tile
        let fused = board("qxuart", QuRule::Fused);
        assert!(matches("qart", &fused));
    }

    #[test]
    pub fn letter_counts_per_rule() {
        let fused = LetterCounts::of("qiqu", QuRule::Fused);
        assert_eq!(fused.count('q'), 2);
        assert_eq!(fused.count('u'), 1);
        assert_eq!(fused.fused(), 0);

        // encoded text is never collapsed a second time
        let fused = LetterCounts::of("quiquu", QuRule::Fused);
        assert_eq!(fused.count('u'), 3);
        assert_eq!(fused.fused(), 0);

        let literal = LetterCounts::of("quiquu", QuRule::Guarded);
        assert_eq!(literal.count('q'), 2);
        assert_eq!(literal.count('u'), 3);
        assert_eq!(literal.fused(), 2);
    }

    #[test]
    pub fn rank_end_to_end() {
        let raw = ["rat", "start", "quart"];

        for &rule in &[QuRule::Fused, QuRule::Guarded, QuRule::Unguarded] {
            let dictionary = encoded(&raw, rule);
            let ranked = rank(&dictionary, &board("rtasqu", rule), None, 0);

            let ranked: Vec<(String, f64)> = ranked
                .iter()
                .map(|s| (s.display_word(rule), s.damage))
                .collect();
            let expected = vec![("quart".to_string(), 5.75), ("rat".to_string(), 3.0)];
            assert_eq!(ranked, expected, "{} rule", rule);
        }

        // with a second t the board can spell start as well
        let dictionary = encoded(&raw, QuRule::Fused);
        let ranked = rank(&dictionary, &board("rtastqu", QuRule::Fused), None, 0);
        let ranked: Vec<String> = ranked.iter().map(|s| s.display_word(QuRule::Fused)).collect();
        assert_eq!(ranked, vec!["quart", "start", "rat"]);
    }

    #[test]
    pub fn rank_with_gems() -> Result<()> {
        let dictionary = encoded(&["quart", "star", "rats"], QuRule::Fused);
        let inventory = board("rtasqu", QuRule::Fused);
        let gems: GemAssignment = "diamond=s".parse()?;

        let mut ranker = Ranker::new(&inventory).with_gems(&gems);
        let ranked = ranker.rank(&dictionary);

        assert_eq!(ranker.matched_count, 3);
        assert_eq!(ranked[0].word, "star");
        assert_eq!(ranked[0].damage, 8.0);
        assert_eq!(ranked[1].word, "rats");
        assert_eq!(ranked[2].word, "qart");
        Ok(())
    }

    #[test]
    pub fn rank_ties_keep_dictionary_order() {
        let dictionary = words(&["tars", "zzz", "rats", "arts", "star", "tsar"]);
        let inventory = LetterInventory::from_board("rats", QuRule::Fused);

        let ranked = Ranker::new(&inventory).rank(&dictionary);
        let ranked: Vec<&str> = ranked.iter().map(|s| s.word.as_str()).collect();
        assert_eq!(ranked, vec!["tars", "rats", "arts", "star", "tsar"]);
    }

    #[test]
    pub fn rank_limit_and_empty_inputs() {
        let dictionary = words(&["rat", "tar", "art", "at"]);
        let inventory = LetterInventory::from_board("rat", QuRule::Fused);

        assert_eq!(rank(&dictionary, &inventory, None, 2).len(), 2);
        assert_eq!(rank(&dictionary, &inventory, None, 0).len(), 4);
        assert_eq!(Ranker::new(&inventory).rank(&dictionary).len(), 4);

        let empty = LetterInventory::from_board("", QuRule::Fused);
        assert!(empty.is_empty());
        assert!(rank(&dictionary, &empty, None, 0).is_empty());
        assert!(rank::<String>(&[], &inventory, None, 0).is_empty());
    }

    #[test]
    pub fn rank_skips_malformed_candidates() {
        let dictionary = words(&["Rat", "r-at", "rat", "rät"]);
        let inventory = LetterInventory::from_board("rat-", QuRule::Fused);

        let mut ranker = Ranker::new(&inventory);
        let ranked = ranker.rank(&dictionary);
        assert_eq!(ranker.matched_count, 1);
        assert_eq!(ranked[0].word, "rat");
    }

    #[test]
    pub fn dictionary_filters_and_encodes() {
        let raw = ["apple", "banana", "Cherry", "quotient", "", "abcdefghijklmnopq"];
        let dictionary = Dictionary::from_words(raw.iter(), &LoadOptions::default());
        assert_eq!(dictionary.words(), &["banana".to_string(), "qotient".to_string()][..]);
        assert_eq!(dictionary.rule(), QuRule::Fused);

        let options = LoadOptions {
            rule: QuRule::Guarded,
            ..LoadOptions::default()
        };
        let dictionary = Dictionary::from_words(raw.iter(), &options);
        assert_eq!(dictionary.words(), &["banana".to_string(), "quotient".to_string()][..]);
    }

    #[test]
    pub fn dictionary_json_file() -> Result<()> {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile()?;
        write!(file, r#"{{"words": ["squirt", "quarter", "aardvark", "tiny"]}}"#)?;
        file.flush()?;

        let dictionary = Dictionary::load(file.path(), &LoadOptions::default())?;
        assert_eq!(&dictionary[..], &words(&["sqirt", "qarter", "aardvark"])[..]);
        Ok(())
    }

    #[test]
    pub fn dictionary_text_file() -> Result<()> {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile()?;
        writeln!(file, "wizards\n\nzebras\nox")?;
        file.flush()?;

        let dictionary = Dictionary::load(file.path(), &LoadOptions::default())?;
        assert_eq!(&dictionary[..], &words(&["wizards", "zebras"])[..]);
        Ok(())
    }

    #[test]
    pub fn compiled_dictionary() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("words.bin");

        let dictionary = Dictionary::from_words(
            ["sequoia", "quixotic", "jukebox"].iter(),
            &LoadOptions::default(),
        );
        dictionary.save_compiled(&path)?;

        let loaded = Dictionary::load(&path, &LoadOptions::default())?;
        assert_eq!(loaded.words(), dictionary.words());

        match Dictionary::load_compiled(&path, QuRule::Guarded) {
            Err(WordError::CompiledFormat(_)) => {}
            other => return Err(anyhow!("expected rule mismatch, got {:?}", other)),
        }

        let junk = dir.path().join("junk.bin");
        std::fs::write(&junk, b"nope, not a dictionary")?;
        match Dictionary::load_compiled(&junk, QuRule::Fused) {
            Err(WordError::CompiledFormat(_)) => {}
            other => return Err(anyhow!("expected bad magic, got {:?}", other)),
        }
        Ok(())
    }

    #[test]
    pub fn config_defaults_and_overrides() -> Result<()> {
        let config: Config = serde_json::from_str(r#"{"display_limit": 30, "qu_rule": "guarded"}"#)?;
        assert_eq!(config.display_limit, 30);
        assert_eq!(config.qu_rule, QuRule::Guarded);
        assert_eq!(config.columns, Config::default().columns);

        let options = config.load_options();
        assert_eq!(options.min_len, 5);
        assert_eq!(options.max_len, 16);
        assert_eq!(options.rule, QuRule::Guarded);

        assert_eq!("Unguarded".parse::<QuRule>()?, QuRule::Unguarded);
        assert!("half".parse::<QuRule>().is_err());
        Ok(())
    }
}
