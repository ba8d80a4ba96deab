use rand::Rng;
use std::fs::File;
use std::io::Write;

/// Writes a random block/net benchmark pair in the floorplanner's input
/// format. The outline is sized from the total block area and the target
/// utilization, so low utilization yields an easy instance.
pub fn generate_random_benchmark(
    block_file: &str,
    net_file: &str,
    num_blocks: usize,
    num_nets: usize,
    target_utilization: f64,
) -> std::io::Result<()> {
    if num_blocks == 0 {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "benchmark needs at least one block",
        ));
    }
    let mut rng = rand::thread_rng();

    let dims: Vec<(u64, u64)> = (0..num_blocks)
        .map(|_| (rng.gen_range(20..200), rng.gen_range(20..200)))
        .collect();

    let total_area: u64 = dims.iter().map(|&(w, h)| w * h).sum();
    let util = target_utilization.clamp(0.05, 0.95);
    let side = ((total_area as f64 / util).sqrt()).ceil() as u64;

    let num_terminals = (num_blocks / 10).max(2);

    log::info!(
        "Generating Benchmark: {} blocks, {} nets, Outline: {}x{} (Target Util: {:.0}%)",
        num_blocks,
        num_nets,
        side,
        side,
        util * 100.0
    );

    let mut file = File::create(block_file)?;
    writeln!(file, "Outline: {} {}", side, side)?;
    writeln!(file, "NumBlocks: {}", num_blocks)?;
    writeln!(file, "NumTerminals: {}", num_terminals)?;
    for (i, (w, h)) in dims.iter().enumerate() {
        writeln!(file, "bk{} {} {}", i, w, h)?;
    }
    for i in 0..num_terminals {
        // Terminals sit on the outline boundary.
        let (x, y) = if rng.gen_bool(0.5) {
            (rng.gen_range(0..=side), if rng.gen_bool(0.5) { 0 } else { side })
        } else {
            (if rng.gen_bool(0.5) { 0 } else { side }, rng.gen_range(0..=side))
        };
        writeln!(file, "p{} terminal {} {}", i, x, y)?;
    }

    let mut file = File::create(net_file)?;
    writeln!(file, "NumNets: {}", num_nets)?;
    let pool_size = num_blocks + num_terminals;
    for _ in 0..num_nets {
        let degree = rng.gen_range(2..=4.min(pool_size));
        writeln!(file, "NetDegree: {}", degree)?;

        let mut members: Vec<String> = Vec::with_capacity(degree);
        while members.len() < degree {
            let idx = rng.gen_range(0..pool_size);
            let name = if idx < num_blocks {
                format!("bk{}", idx)
            } else {
                format!("p{}", idx - num_blocks)
            };
            if !members.contains(&name) {
                members.push(name);
            }
        }
        for name in members {
            writeln!(file, "{}", name)?;
        }
    }

    Ok(())
}
