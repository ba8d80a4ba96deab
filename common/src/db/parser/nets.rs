use crate::db::core::{FloorplanDB, NetData, PinRef};
use anyhow::{Context, Result, bail};
use std::path::Path;

/// Parses a net file:
///
/// ```text
/// NumNets: <k>
/// NetDegree: <d>
/// <member name>                    (d lines)
/// ...
/// ```
pub fn parse(db: &mut FloorplanDB, filename: &str) -> Result<()> {
    let text = std::fs::read_to_string(Path::new(filename))
        .context(format!("Failed to open net file: {}", filename))?;
    parse_text(db, &text).context(format!("Failed to parse net file: {}", filename))
}

pub fn parse_text(db: &mut FloorplanDB, text: &str) -> Result<()> {
    let mut tokens = text.split_whitespace();

    let mut num_nets: Option<usize> = None;
    while let Some(token) = tokens.next() {
        match token {
            "NumNets:" => {
                let count = tokens.next().context("NumNets without a count")?;
                num_nets = Some(count.parse().context("bad NumNets count")?);
            }
            "NetDegree:" => {
                let degree: usize = tokens
                    .next()
                    .context("NetDegree without a count")?
                    .parse()
                    .context("bad NetDegree count")?;
                if degree < 2 {
                    bail!("net with degree {} (minimum is 2)", degree);
                }

                let mut net = NetData::default();
                for _ in 0..degree {
                    let name = tokens.next().context("net member list ended early")?;
                    match db.lookup(name) {
                        Some(PinRef::Block(id)) => net.blocks.push(id),
                        Some(PinRef::Terminal(id)) => net.terminals.push(id),
                        None => bail!("net references unknown member '{}'", name),
                    }
                }
                db.add_net(net);
            }
            other => bail!("unexpected token '{}'", other),
        }
    }

    let num_nets = num_nets.context("net file is missing NumNets")?;
    if db.num_nets() != num_nets {
        bail!("declared {} nets but parsed {}", num_nets, db.num_nets());
    }

    log::info!("Parsed {} nets", db.num_nets());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_db() -> FloorplanDB {
        let mut db = FloorplanDB::new(600, 600);
        db.add_block("bk1".to_string(), 200, 300);
        db.add_block("bk2".to_string(), 100, 100);
        db.add_terminal("VSS".to_string(), 0, 0);
        db
    }

    #[test]
    fn parses_blocks_and_terminals() {
        let mut db = sample_db();
        let text = "NumNets: 2\nNetDegree: 2\nbk1\nbk2\nNetDegree: 2\nbk2\nVSS\n";
        parse_text(&mut db, text).unwrap();
        assert_eq!(db.num_nets(), 2);
        assert_eq!(db.nets[0].blocks.len(), 2);
        assert_eq!(db.nets[1].terminals.len(), 1);
    }

    #[test]
    fn rejects_unknown_member() {
        let mut db = sample_db();
        let text = "NumNets: 1\nNetDegree: 2\nbk1\nghost\n";
        assert!(parse_text(&mut db, text).is_err());
    }

    #[test]
    fn rejects_net_count_mismatch() {
        let mut db = sample_db();
        let text = "NumNets: 3\nNetDegree: 2\nbk1\nbk2\n";
        assert!(parse_text(&mut db, text).is_err());
    }
}
