use anyhow::Result;
use crossterm::{
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};

use std::io::{stdout, Write};

use wordmg::{
    gems::{GemAssignment, GemCategory},
    letters::{tile_symbols, QuRule},
    ranker::ScoredWord,
    BOARD_WIDTH,
};

// width of a word column, long enough for the longest playable word
const WORD_COLUMN: usize = 16;

fn gem_color(gem: GemCategory) -> Color {
    match gem {
        GemCategory::Amethyst => Color::DarkMagenta,
        GemCategory::Emerald => Color::Green,
        GemCategory::Sapphire => Color::Blue,
        GemCategory::Garnet => Color::DarkYellow,
        GemCategory::Ruby => Color::Red,
        GemCategory::Crystal => Color::Magenta,
        GemCategory::Diamond => Color::White,
    }
}

/// Draws the board tiles in a grid, each tile colored by its gem
pub fn display_board(letters: &str, rule: QuRule, gems: &GemAssignment) -> Result<()> {
    let mut stdout = stdout();

    for (idx, symbol) in tile_symbols(letters, rule).into_iter().enumerate() {
        let label = match symbol {
            'q' => "Qu".to_string(),
            other => other.to_ascii_uppercase().to_string(),
        };
        let content = match gems.category_of(symbol) {
            Some(gem) => style(format!(" {:<2} ", label))
                .attribute(Attribute::Bold)
                .with(Color::Black)
                .on(gem_color(gem)),
            None => style(format!(" {:<2} ", label)).attribute(Attribute::Bold),
        };
        stdout.queue(PrintStyledContent(content))?;
        if (idx + 1) % BOARD_WIDTH == 0 {
            stdout.queue(PrintStyledContent(style("\n".to_string())))?;
        }
    }
    stdout.queue(PrintStyledContent(style("\n".to_string())))?;

    if !gems.is_empty() {
        for (gem, letters) in gems.iter() {
            let letters: String = letters.iter().collect();
            stdout.queue(PrintStyledContent(
                style(format!("{:<9}", gem.name())).with(gem_color(gem)),
            ))?;
            stdout.queue(PrintStyledContent(style(format!(
                "x{:.2}  {}\n",
                gem.multiplier(),
                letters
            ))))?;
        }
    }
    stdout.flush()?;
    Ok(())
}

/// Prints ranked words in rows of `columns`, followed by a separator
pub fn display_results(results: &[ScoredWord], rule: QuRule, columns: usize) -> Result<()> {
    let mut stdout = stdout();
    let columns = columns.max(1);

    if results.is_empty() {
        writeln!(stdout, "No playable words found")?;
    }
    for (index, scored) in results.iter().enumerate() {
        stdout.queue(PrintStyledContent(style(format!(
            "{:width$}",
            scored.display_word(rule),
            width = WORD_COLUMN
        ))))?;
        stdout.queue(PrintStyledContent(
            style(format!("->[{:4}]  ", scored.damage)).attribute(Attribute::Bold),
        ))?;
        if (index + 1) % columns == 0 {
            stdout.queue(PrintStyledContent(style("\n".to_string())))?;
        }
    }
    writeln!(stdout, "\n{}", "- ".repeat(30))?;
    stdout.flush()?;
    Ok(())
}
