use crate::anneal::AnnealEngine;
use crate::compact;
use crate::cost::{Normalization, total_wirelength};
use crate::error::FloorplanError;
use crate::result::{BlockPlacement, FloorplanResult};
use eda_common::db::core::FloorplanDB;
use eda_common::geom::rect::Rect;
use eda_common::util::config::FloorplanConfig;
use rayon::prelude::*;
use std::time::Instant;

// Engine seeds derive from the base seed by this odd stride so workers
// never share a stream.
const SEED_STRIDE: u64 = 0x9e37_79b9_7f4a_7c15;

/// Owns the annealing engines and runs the synchronized restart rounds.
///
/// Each round fans every engine out through a full cooling schedule
/// (rayon fork-join; engines only touch their own state, the design is
/// shared read-only), then sequentially scans the per-engine incumbents
/// and broadcasts the global best into every engine before the next round.
pub struct Floorplanner {
    db: FloorplanDB,
    cfg: FloorplanConfig,
    engines: Vec<AnnealEngine>,
}

impl Floorplanner {
    pub fn new(db: FloorplanDB, cfg: FloorplanConfig) -> Result<Self, FloorplanError> {
        validate_config(&cfg)?;
        validate_design(&db)?;

        let base_seed = cfg.seed.unwrap_or_else(rand::random::<u64>);
        log::info!(
            "Constructing {} annealing engines (base seed {})",
            cfg.workers,
            base_seed
        );

        let mut engines: Vec<AnnealEngine> = (0..cfg.workers)
            .map(|i| {
                let seed = base_seed.wrapping_add(SEED_STRIDE.wrapping_mul(i as u64 + 1));
                AnnealEngine::new(&db, cfg.clone(), seed)
            })
            .collect();

        // Equalize the warm-up baselines so all engines normalize their
        // cost terms by the same constants.
        let baselines: Vec<Normalization> = engines.iter().map(|e| e.baseline()).collect();
        let shared = Normalization::mean_of(&baselines);
        for engine in &mut engines {
            engine.set_normalization(&db, shared);
        }

        Ok(Self { db, cfg, engines })
    }

    pub fn db(&self) -> &FloorplanDB {
        &self.db
    }

    pub fn run(&mut self) -> Result<FloorplanResult, FloorplanError> {
        let start = Instant::now();
        let (outline_w, outline_h) = self.db.outline();

        let mut legal = false;
        let mut round = 0;
        while !legal && round < self.cfg.max_rounds {
            let db = &self.db;
            self.engines
                .par_iter_mut()
                .for_each(|engine| engine.run_schedule(db));

            // Barrier reached: every engine has finished writing its own
            // best-ever. Scan them sequentially; ties go to the lowest
            // engine index, keeping seeded runs reproducible.
            let mut best_idx = 0;
            for (i, engine) in self.engines.iter().enumerate() {
                if engine.best_cost() < self.engines[best_idx].best_cost() {
                    best_idx = i;
                }
            }
            let incumbent = self.engines[best_idx].best().clone();
            incumbent.seq.validate()?;

            let db = &self.db;
            for engine in &mut self.engines {
                engine.overwrite_state(db, &incumbent);
            }

            legal = incumbent.chip.0 <= outline_w && incumbent.chip.1 <= outline_h;
            round += 1;
            log::info!(
                "Round {}: best cost {:.4}, chip {}x{}, legal: {}",
                round,
                incumbent.cost.cost,
                incumbent.chip.0,
                incumbent.chip.1,
                legal
            );
        }

        Ok(self.finalize(start, legal))
    }

    /// Builds the result from the incumbent (every engine now holds it):
    /// compaction tightens the realized coordinates, then wirelength and
    /// the bounding box are recomputed on the final rectangles.
    fn finalize(&mut self, start: Instant, legal_before_compaction: bool) -> FloorplanResult {
        let engine = &self.engines[0];
        let mut rects: Vec<Rect> = engine.rects().to_vec();
        let cost = engine.best_cost();

        compact::compact(
            &mut rects,
            self.cfg.compaction_sweeps,
            self.cfg.compaction_step,
        );

        let chip_width = rects.iter().map(|r| r.max.x).max().unwrap_or(0);
        let chip_height = rects.iter().map(|r| r.max.y).max().unwrap_or(0);
        let mut net_lengths = vec![0.0; self.db.num_nets()];
        let wirelength = total_wirelength(&self.db, &rects, &mut net_lengths);

        let legal = legal_before_compaction
            || (chip_width <= self.db.outline_width && chip_height <= self.db.outline_height);
        if !legal {
            log::warn!(
                "Round budget exhausted before a legal packing was found; \
                 reporting best effort ({}x{} vs outline {}x{})",
                chip_width,
                chip_height,
                self.db.outline_width,
                self.db.outline_height
            );
        }

        let placements = self
            .db
            .blocks
            .iter()
            .zip(&rects)
            .map(|(block, rect)| BlockPlacement {
                name: block.name.clone(),
                x1: rect.min.x,
                y1: rect.min.y,
                x2: rect.max.x,
                y2: rect.max.y,
            })
            .collect();

        FloorplanResult {
            cost,
            wirelength,
            chip_area: chip_width * chip_height,
            chip_width,
            chip_height,
            runtime_seconds: start.elapsed().as_secs_f64(),
            legal,
            placements,
        }
    }
}

fn validate_config(cfg: &FloorplanConfig) -> Result<(), FloorplanError> {
    if !(0.0..=1.0).contains(&cfg.alpha) {
        return Err(FloorplanError::InvalidParameter(format!(
            "alpha {} outside [0, 1]",
            cfg.alpha
        )));
    }
    if cfg.workers == 0 {
        return Err(FloorplanError::InvalidParameter(
            "worker count must be at least 1".to_string(),
        ));
    }
    if !(cfg.cooling_rate > 0.0 && cfg.cooling_rate < 1.0) {
        return Err(FloorplanError::InvalidParameter(format!(
            "cooling rate {} outside (0, 1)",
            cfg.cooling_rate
        )));
    }
    // With either budget at zero the search never runs and the warm-up
    // random state would be reported as the result.
    if cfg.max_rounds == 0 {
        return Err(FloorplanError::InvalidParameter(
            "max_rounds must be at least 1".to_string(),
        ));
    }
    if cfg.max_cooling_steps == 0 {
        return Err(FloorplanError::InvalidParameter(
            "max_cooling_steps must be at least 1".to_string(),
        ));
    }
    Ok(())
}

/// Rejects degenerate inputs before any engine is built: an empty design,
/// a block that fits the outline in neither orientation, or an outline
/// with less area than the blocks themselves.
fn validate_design(db: &FloorplanDB) -> Result<(), FloorplanError> {
    if db.num_blocks() == 0 {
        return Err(FloorplanError::EmptyDesign);
    }

    let (outline_w, outline_h) = db.outline();
    for block in &db.blocks {
        let upright = block.width <= outline_w && block.height <= outline_h;
        let rotated = block.height <= outline_w && block.width <= outline_h;
        if !upright && !rotated {
            return Err(FloorplanError::BlockTooLarge {
                name: block.name.clone(),
                width: block.width,
                height: block.height,
                outline_width: outline_w,
                outline_height: outline_h,
            });
        }
    }

    let block_area: u64 = db.blocks.iter().map(|b| b.width * b.height).sum();
    let outline_area = outline_w * outline_h;
    if block_area > outline_area {
        return Err(FloorplanError::OutlineTooSmall {
            block_area,
            outline_area,
        });
    }
    Ok(())
}
