use eda_common::db::core::FloorplanDB;
use eda_common::geom::rect::Rect;

/// Raw and normalized cost terms of one evaluation.
#[derive(Clone, Copy, Debug, Default)]
pub struct CostBreakdown {
    pub area: f64,
    pub wirelength: f64,
    pub penalty: f64,
    /// Normalized scalar driving the Metropolis test.
    pub cost: f64,
}

/// Per-engine normalization baselines. Established from the warm-up
/// evaluation and equalized across engines before the search so that
/// `alpha` trades off area against wirelength on comparable scales.
#[derive(Clone, Copy, Debug)]
pub struct Normalization {
    pub area_avg: f64,
    pub wire_avg: f64,
    pub penalty_avg: f64,
}

impl Normalization {
    pub fn unit() -> Self {
        Self {
            area_avg: 1.0,
            wire_avg: 1.0,
            penalty_avg: 1.0,
        }
    }

    pub fn from_baseline(baseline: &CostBreakdown) -> Self {
        Self {
            area_avg: positive_or_one(baseline.area),
            wire_avg: positive_or_one(baseline.wirelength),
            penalty_avg: positive_or_one(baseline.penalty),
        }
    }

    pub fn mean_of(norms: &[Normalization]) -> Self {
        let n = norms.len().max(1) as f64;
        Self {
            area_avg: norms.iter().map(|x| x.area_avg).sum::<f64>() / n,
            wire_avg: norms.iter().map(|x| x.wire_avg).sum::<f64>() / n,
            penalty_avg: norms.iter().map(|x| x.penalty_avg).sum::<f64>() / n,
        }
    }
}

fn positive_or_one(x: f64) -> f64 {
    if x > 0.0 { x } else { 1.0 }
}

pub struct CostModel {
    pub alpha: f64,
}

impl CostModel {
    pub fn new(alpha: f64) -> Self {
        Self { alpha }
    }

    pub fn evaluate(
        &self,
        db: &FloorplanDB,
        rects: &[Rect],
        chip_width: u64,
        chip_height: u64,
        net_lengths: &mut [f64],
        norm: &Normalization,
    ) -> CostBreakdown {
        let area = (chip_width * chip_height) as f64;
        let wirelength = total_wirelength(db, rects, net_lengths);
        let penalty = outline_penalty(db, rects, chip_width, chip_height);

        let cost = self.alpha * area / norm.area_avg
            + (1.0 - self.alpha) * wirelength / norm.wire_avg
            + penalty / norm.penalty_avg;

        CostBreakdown {
            area,
            wirelength,
            penalty,
            cost,
        }
    }
}

/// Sum over nets of the half-perimeter of the bounding box of member block
/// centers and terminal positions. Per-net lengths are cached into the
/// caller's buffer.
pub fn total_wirelength(db: &FloorplanDB, rects: &[Rect], net_lengths: &mut [f64]) -> f64 {
    let mut total = 0.0;
    for (i, net) in db.nets.iter().enumerate() {
        let mut min_x = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_y = f64::NEG_INFINITY;

        for &block in &net.blocks {
            let c = rects[block.index()].center();
            min_x = min_x.min(c.x);
            max_x = max_x.max(c.x);
            min_y = min_y.min(c.y);
            max_y = max_y.max(c.y);
        }
        for &terminal in &net.terminals {
            let t = &db.terminals[terminal.index()];
            min_x = min_x.min(t.x as f64);
            max_x = max_x.max(t.x as f64);
            min_y = min_y.min(t.y as f64);
            max_y = max_y.max(t.y as f64);
        }

        let hpwl = if net.degree() == 0 {
            0.0
        } else {
            (max_x - min_x) + (max_y - min_y)
        };
        net_lengths[i] = hpwl;
        total += hpwl;
    }
    total
}

/// Out-of-outline penalty: per-block squared excess in x and y, plus one
/// aggregate term comparing the packed chip bounding box to the outline.
pub fn outline_penalty(db: &FloorplanDB, rects: &[Rect], chip_width: u64, chip_height: u64) -> f64 {
    let (outline_w, outline_h) = db.outline();

    let mut penalty = 0.0;
    for rect in rects {
        let excess_x = rect.max.x.saturating_sub(outline_w) as f64;
        let excess_y = rect.max.y.saturating_sub(outline_h) as f64;
        penalty += excess_x * excess_x + excess_y * excess_y;
    }

    let over_w = chip_width > outline_w;
    let over_h = chip_height > outline_h;
    penalty += match (over_w, over_h) {
        (true, false) => ((chip_width - outline_w) * outline_h) as f64,
        (false, true) => ((chip_height - outline_h) * outline_w) as f64,
        (true, true) => (chip_width * chip_height - outline_w * outline_h) as f64,
        (false, false) => 0.0,
    };
    penalty
}

#[cfg(test)]
mod tests {
    use super::*;
    use eda_common::db::core::NetData;
    use eda_common::db::indices::{BlockId, TerminalId};

    fn db_with_net() -> FloorplanDB {
        let mut db = FloorplanDB::new(10, 10);
        db.add_block("a".to_string(), 2, 2);
        db.add_block("b".to_string(), 2, 2);
        db.add_terminal("p".to_string(), 10, 0);
        db.add_net(NetData {
            blocks: vec![BlockId::new(0), BlockId::new(1)],
            terminals: vec![],
        });
        db
    }

    #[test]
    fn hpwl_over_block_centers() {
        let db = db_with_net();
        let rects = vec![Rect::from_extent(0, 0, 2, 2), Rect::from_extent(4, 4, 2, 2)];
        let mut lengths = vec![0.0; 1];
        let wl = total_wirelength(&db, &rects, &mut lengths);
        // Centers (1,1) and (5,5): hpwl = 4 + 4.
        assert_eq!(wl, 8.0);
        assert_eq!(lengths[0], 8.0);
    }

    #[test]
    fn terminals_extend_the_bounding_box() {
        let mut db = db_with_net();
        db.nets[0].terminals.push(TerminalId::new(0));
        let rects = vec![Rect::from_extent(0, 0, 2, 2), Rect::from_extent(4, 4, 2, 2)];
        let mut lengths = vec![0.0; 1];
        // Terminal at (10, 0) stretches x to [1, 10] and y to [0, 5].
        assert_eq!(total_wirelength(&db, &rects, &mut lengths), 14.0);
    }

    #[test]
    fn penalty_is_zero_inside_the_outline() {
        let db = db_with_net();
        let rects = vec![Rect::from_extent(0, 0, 2, 2), Rect::from_extent(2, 0, 2, 2)];
        assert_eq!(outline_penalty(&db, &rects, 4, 2), 0.0);
    }

    #[test]
    fn penalty_width_only_excess() {
        let db = db_with_net(); // outline 10x10
        let rects = vec![Rect::from_extent(0, 0, 12, 2), Rect::from_extent(0, 2, 2, 2)];
        // Block excess: (12-10)^2 = 4; aggregate: (12-10)*10 = 20.
        assert_eq!(outline_penalty(&db, &rects, 12, 4), 24.0);
    }

    #[test]
    fn penalty_both_dimensions_exceeded() {
        let db = db_with_net();
        let rects = vec![
            Rect::from_extent(0, 0, 11, 11),
            Rect::from_extent(0, 0, 1, 1),
        ];
        // Block excess: 1 + 1; aggregate: 11*12 - 100 = 32.
        assert_eq!(outline_penalty(&db, &rects, 11, 12), 34.0);
    }

    #[test]
    fn normalization_means_and_clamps() {
        let norm = Normalization::from_baseline(&CostBreakdown {
            area: 100.0,
            wirelength: 50.0,
            penalty: 0.0,
            cost: 0.0,
        });
        assert_eq!(norm.penalty_avg, 1.0);

        let mean = Normalization::mean_of(&[
            norm,
            Normalization {
                area_avg: 200.0,
                wire_avg: 150.0,
                penalty_avg: 3.0,
            },
        ]);
        assert_eq!(mean.area_avg, 150.0);
        assert_eq!(mean.wire_avg, 100.0);
        assert_eq!(mean.penalty_avg, 2.0);
    }
}
