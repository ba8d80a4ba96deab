use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub floorplan: FloorplanConfig,
    #[serde(default)]
    pub input: InputConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            floorplan: FloorplanConfig::default(),
            input: InputConfig::default(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct FloorplanConfig {
    /// Area-vs-wirelength trade-off in [0, 1].
    #[serde(default = "default_alpha")]
    pub alpha: f64,
    #[serde(default = "default_workers")]
    pub workers: usize,
    /// Base seed for the per-engine random sources. Drawn from entropy
    /// when absent; set it for reproducible runs.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_initial_temperature")]
    pub initial_temperature: f64,
    #[serde(default = "default_cooling_rate")]
    pub cooling_rate: f64,
    #[serde(default = "default_min_temperature")]
    pub min_temperature: f64,
    /// Trials per temperature step, as a multiplier of the block count.
    #[serde(default = "default_moves_per_block")]
    pub moves_per_block: usize,
    /// Scale constant applied to cost deltas in the Metropolis test.
    #[serde(default = "default_beta")]
    pub beta: f64,
    #[serde(default = "default_max_rounds")]
    pub max_rounds: usize,
    #[serde(default = "default_max_cooling_steps")]
    pub max_cooling_steps: usize,
    #[serde(default = "default_compaction_sweeps")]
    pub compaction_sweeps: usize,
    #[serde(default = "default_compaction_step")]
    pub compaction_step: u64,
}

impl Default for FloorplanConfig {
    fn default() -> Self {
        Self {
            alpha: default_alpha(),
            workers: default_workers(),
            seed: None,
            initial_temperature: default_initial_temperature(),
            cooling_rate: default_cooling_rate(),
            min_temperature: default_min_temperature(),
            moves_per_block: default_moves_per_block(),
            beta: default_beta(),
            max_rounds: default_max_rounds(),
            max_cooling_steps: default_max_cooling_steps(),
            compaction_sweeps: default_compaction_sweeps(),
            compaction_step: default_compaction_step(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct InputConfig {
    #[serde(default = "default_block_file")]
    pub block_file: String,
    #[serde(default = "default_net_file")]
    pub net_file: String,
    #[serde(default = "default_output_file")]
    pub output_file: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            block_file: default_block_file(),
            net_file: default_net_file(),
            output_file: default_output_file(),
        }
    }
}

fn default_alpha() -> f64 {
    0.5
}

fn default_workers() -> usize {
    8
}

fn default_initial_temperature() -> f64 {
    1000.0
}

fn default_cooling_rate() -> f64 {
    0.85
}

fn default_min_temperature() -> f64 {
    5.0
}

fn default_moves_per_block() -> usize {
    10
}

fn default_beta() -> f64 {
    1000.0
}

fn default_max_rounds() -> usize {
    64
}

fn default_max_cooling_steps() -> usize {
    64
}

fn default_compaction_sweeps() -> usize {
    8
}

fn default_compaction_step() -> u64 {
    1
}

fn default_block_file() -> String {
    "inputs/sample.block".to_string()
}

fn default_net_file() -> String {
    "inputs/sample.nets".to_string()
}

fn default_output_file() -> String {
    "output/floorplan.rpt".to_string()
}
