use crate::db::core::FloorplanDB;
use anyhow::{Context, Result, bail};
use std::path::Path;

/// Parses a block file:
///
/// ```text
/// Outline: <width> <height>
/// NumBlocks: <n>
/// NumTerminals: <m>
/// <name> <width> <height>          (n lines)
/// <name> terminal <x> <y>          (m lines)
/// ```
pub fn parse(filename: &str) -> Result<FloorplanDB> {
    let text = std::fs::read_to_string(Path::new(filename))
        .context(format!("Failed to open block file: {}", filename))?;
    parse_text(&text).context(format!("Failed to parse block file: {}", filename))
}

pub fn parse_text(text: &str) -> Result<FloorplanDB> {
    let mut outline: Option<(u64, u64)> = None;
    let mut num_blocks: Option<usize> = None;
    let mut num_terminals: Option<usize> = None;
    let mut db: Option<FloorplanDB> = None;

    for (lineno, line) in text.lines().enumerate() {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.is_empty() {
            continue;
        }

        match tokens[0] {
            "Outline:" => {
                let (w, h) = parse_pair(&tokens[1..])
                    .context(format!("line {}: bad Outline", lineno + 1))?;
                outline = Some((w, h));
            }
            "NumBlocks:" => {
                num_blocks = Some(
                    parse_count(&tokens[1..])
                        .context(format!("line {}: bad NumBlocks", lineno + 1))?,
                );
            }
            "NumTerminals:" => {
                num_terminals = Some(
                    parse_count(&tokens[1..])
                        .context(format!("line {}: bad NumTerminals", lineno + 1))?,
                );
                let (w, h) = outline.context("NumTerminals before Outline")?;
                db = Some(FloorplanDB::new(w, h));
            }
            name => {
                let db = db
                    .as_mut()
                    .context(format!("line {}: entity before header", lineno + 1))?;
                if tokens.len() == 4 && tokens[1] == "terminal" {
                    let (x, y) = parse_pair(&tokens[2..])
                        .context(format!("line {}: bad terminal '{}'", lineno + 1, name))?;
                    db.add_terminal(name.to_string(), x, y);
                } else if tokens.len() == 3 {
                    let (w, h) = parse_pair(&tokens[1..])
                        .context(format!("line {}: bad block '{}'", lineno + 1, name))?;
                    if w == 0 || h == 0 {
                        bail!("line {}: block '{}' has a zero dimension", lineno + 1, name);
                    }
                    db.add_block(name.to_string(), w, h);
                } else {
                    bail!("line {}: unrecognized entity line '{}'", lineno + 1, line);
                }
            }
        }
    }

    let db = db.context("block file has no header")?;
    let num_blocks = num_blocks.context("block file is missing NumBlocks")?;
    let num_terminals = num_terminals.context("block file is missing NumTerminals")?;

    if db.num_blocks() != num_blocks {
        bail!(
            "declared {} blocks but parsed {}",
            num_blocks,
            db.num_blocks()
        );
    }
    if db.num_terminals() != num_terminals {
        bail!(
            "declared {} terminals but parsed {}",
            num_terminals,
            db.num_terminals()
        );
    }

    log::info!(
        "Parsed outline {}x{}, {} blocks, {} terminals",
        db.outline_width,
        db.outline_height,
        db.num_blocks(),
        db.num_terminals()
    );
    Ok(db)
}

fn parse_pair(tokens: &[&str]) -> Result<(u64, u64)> {
    if tokens.len() < 2 {
        bail!("expected two integers");
    }
    Ok((tokens[0].parse()?, tokens[1].parse()?))
}

fn parse_count(tokens: &[&str]) -> Result<usize> {
    if tokens.is_empty() {
        bail!("expected a count");
    }
    Ok(tokens[0].parse()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Outline: 600 600
NumBlocks: 3
NumTerminals: 2
bk1 200 300
bk2 100 100
bk3 300 200
VSS terminal 0 0
VDD terminal 600 600
";

    #[test]
    fn parses_sample_file() {
        let db = parse_text(SAMPLE).unwrap();
        assert_eq!(db.outline(), (600, 600));
        assert_eq!(db.num_blocks(), 3);
        assert_eq!(db.num_terminals(), 2);
        assert_eq!(db.blocks[0].name, "bk1");
        assert_eq!(db.blocks[0].width, 200);
        assert_eq!(db.blocks[0].height, 300);
        assert_eq!(db.terminals[1].x, 600);
    }

    #[test]
    fn rejects_count_mismatch() {
        let text = "Outline: 10 10\nNumBlocks: 2\nNumTerminals: 0\nbk1 1 1\n";
        assert!(parse_text(text).is_err());
    }

    #[test]
    fn rejects_zero_dimension_block() {
        let text = "Outline: 10 10\nNumBlocks: 1\nNumTerminals: 0\nbk1 0 5\n";
        assert!(parse_text(text).is_err());
    }
}
