use crate::cost::{CostBreakdown, CostModel, Normalization};
use crate::graph::{ConstraintGraphs, Relaxation};
use crate::moves;
use crate::seqpair::SequencePair;
use eda_common::db::core::FloorplanDB;
use eda_common::geom::rect::Rect;
use eda_common::util::config::FloorplanConfig;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// One generation of search state: everything needed to restore or
/// broadcast a solution. Coordinates are not included; they are a pure
/// function of the sequence pair and dimensions and are re-derived by
/// evaluation.
#[derive(Clone, Debug)]
pub struct Snapshot {
    pub seq: SequencePair,
    /// Per-block (width, height) with rotations applied.
    pub dims: Vec<(u64, u64)>,
    pub cost: CostBreakdown,
    pub chip: (u64, u64),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Init,
    Annealing,
    Converged,
}

/// Single-threaded Metropolis search over the sequence-pair encoding.
/// One instance per parallel worker; owns a private seeded random source
/// and all evaluation buffers.
pub struct AnnealEngine {
    cfg: FloorplanConfig,
    model: CostModel,
    rng: StdRng,
    phase: Phase,

    // Current working state, mutated in place by moves.
    seq: SequencePair,
    dims: Vec<(u64, u64)>,
    cost: CostBreakdown,
    chip: (u64, u64),

    prev: Snapshot,
    best: Snapshot,

    // Reusable evaluation buffers.
    graphs: ConstraintGraphs,
    relax: Relaxation,
    len_h: Vec<u64>,
    len_v: Vec<u64>,
    dist_h: Vec<u64>,
    dist_v: Vec<u64>,
    rects: Vec<Rect>,
    net_lengths: Vec<f64>,

    norm: Normalization,
}

impl AnnealEngine {
    /// Builds the engine and runs the warm-up packing pass: a random
    /// sequence pair is evaluated and accepted as both previous and best,
    /// and its raw terms become the normalization baseline.
    pub fn new(db: &FloorplanDB, cfg: FloorplanConfig, seed: u64) -> Self {
        let n = db.num_blocks();
        let nodes = n + 2;
        let mut rng = StdRng::seed_from_u64(seed);

        let seq = SequencePair::random(n, &mut rng);
        let dims: Vec<(u64, u64)> = db.blocks.iter().map(|b| (b.width, b.height)).collect();

        let placeholder = Snapshot {
            seq: seq.clone(),
            dims: dims.clone(),
            cost: CostBreakdown::default(),
            chip: (0, 0),
        };

        let mut engine = Self {
            model: CostModel::new(cfg.alpha),
            cfg,
            rng,
            phase: Phase::Init,
            seq,
            dims,
            cost: CostBreakdown::default(),
            chip: (0, 0),
            prev: placeholder.clone(),
            best: placeholder,
            graphs: ConstraintGraphs::new(n),
            relax: Relaxation::new(nodes),
            len_h: vec![0; nodes],
            len_v: vec![0; nodes],
            dist_h: vec![0; nodes],
            dist_v: vec![0; nodes],
            rects: vec![Rect::default(); n],
            net_lengths: vec![0.0; db.num_nets()],
            norm: Normalization::unit(),
        };

        engine.evaluate(db);
        engine.norm = Normalization::from_baseline(&engine.cost);
        engine.evaluate(db);
        engine.prev = engine.snapshot();
        engine.best = engine.prev.clone();
        engine
    }

    pub fn baseline(&self) -> Normalization {
        self.norm
    }

    /// Installs the shared normalization constants and re-baselines the
    /// three state generations under them.
    pub fn set_normalization(&mut self, db: &FloorplanDB, norm: Normalization) {
        self.norm = norm;
        self.evaluate(db);
        self.prev = self.snapshot();
        self.best = self.prev.clone();
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn best(&self) -> &Snapshot {
        &self.best
    }

    pub fn best_cost(&self) -> f64 {
        self.best.cost.cost
    }

    pub fn chip(&self) -> (u64, u64) {
        self.chip
    }

    pub fn rects(&self) -> &[Rect] {
        &self.rects
    }

    pub fn breakdown(&self) -> &CostBreakdown {
        &self.cost
    }

    /// Replaces current, previous-accepted and best-ever wholesale with the
    /// broadcast incumbent, then re-derives coordinates. This accessor is
    /// the coordinator's only write path into an engine.
    pub fn overwrite_state(&mut self, db: &FloorplanDB, snapshot: &Snapshot) {
        self.seq.clone_from(&snapshot.seq);
        self.dims.clone_from(&snapshot.dims);
        self.prev = snapshot.clone();
        self.best = snapshot.clone();
        self.evaluate(db);
    }

    /// Rebuilds the constraint graphs, solves both longest-path problems
    /// and evaluates the cost model for the current state. Returns the
    /// normalized cost scalar.
    pub fn evaluate(&mut self, db: &FloorplanDB) -> f64 {
        let n = self.dims.len();
        self.graphs.rebuild(&self.seq);

        for (i, &(w, h)) in self.dims.iter().enumerate() {
            self.len_h[i] = w;
            self.len_v[i] = h;
        }
        self.len_h[n] = 0;
        self.len_v[n] = 0;
        self.len_h[n + 1] = 0;
        self.len_v[n + 1] = 0;

        let source = self.graphs.source();
        self.relax
            .run(&self.graphs.h_succ, &self.len_h, source, &mut self.dist_h);
        self.relax
            .run(&self.graphs.v_succ, &self.len_v, source, &mut self.dist_v);

        let sink = self.graphs.sink();
        self.chip = (self.dist_h[sink], self.dist_v[sink]);

        for (i, &(w, h)) in self.dims.iter().enumerate() {
            self.rects[i] = Rect::from_extent(self.dist_h[i], self.dist_v[i], w, h);
        }

        self.cost = self.model.evaluate(
            db,
            &self.rects,
            self.chip.0,
            self.chip.1,
            &mut self.net_lengths,
            &self.norm,
        );
        self.cost.cost
    }

    /// One full cooling schedule: fixed trial count per temperature,
    /// geometric cooling until the floor or the step budget, then
    /// convergence back onto the incumbent.
    pub fn run_schedule(&mut self, db: &FloorplanDB) {
        self.phase = Phase::Annealing;
        let trials = (self.cfg.moves_per_block * self.dims.len()).max(1);

        let mut temp = self.cfg.initial_temperature;
        let mut steps = 0;
        while temp > self.cfg.min_temperature && steps < self.cfg.max_cooling_steps {
            let mut accepted = 0usize;
            for _ in 0..trials {
                moves::apply_random_move(
                    &mut self.rng,
                    &mut self.seq,
                    &mut self.dims,
                    self.chip,
                    db.outline(),
                );
                let cost = self.evaluate(db);
                let delta = cost - self.prev.cost.cost;

                if self.accept(delta, temp) {
                    self.prev = self.snapshot();
                    if cost < self.best.cost.cost {
                        self.best = self.prev.clone();
                    }
                    accepted += 1;
                } else {
                    self.rollback();
                }
            }
            log::debug!(
                "temp {:.2}: accepted {}/{}, best cost {:.4}",
                temp,
                accepted,
                trials,
                self.best.cost.cost
            );
            temp *= self.cfg.cooling_rate;
            steps += 1;
        }

        self.converge(db);
    }

    /// Metropolis criterion. Improvements are accepted before any random
    /// draw is taken; a worsening move survives with probability
    /// `exp(-delta * beta / temp)`.
    pub fn accept(&mut self, delta: f64, temp: f64) -> bool {
        if delta < 0.0 {
            return true;
        }
        let probability = (-delta * self.cfg.beta / temp).exp();
        self.rng.gen_range(0.0..1.0) < probability
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            seq: self.seq.clone(),
            dims: self.dims.clone(),
            cost: self.cost,
            chip: self.chip,
        }
    }

    /// Restores the current state from the previous-accepted generation.
    /// Coordinates are left stale; the next evaluation recomputes them.
    fn rollback(&mut self) {
        self.seq.clone_from(&self.prev.seq);
        self.dims.clone_from(&self.prev.dims);
        self.cost = self.prev.cost;
        self.chip = self.prev.chip;
    }

    fn converge(&mut self, db: &FloorplanDB) {
        self.seq.clone_from(&self.best.seq);
        self.dims.clone_from(&self.best.dims);
        self.evaluate(db);
        self.prev = self.snapshot();
        self.phase = Phase::Converged;
    }
}
