pub mod anneal;
pub mod compact;
pub mod cost;
pub mod error;
pub mod graph;
pub mod moves;
pub mod parallel;
pub mod result;
pub mod seqpair;

use eda_common::db::core::FloorplanDB;
use eda_common::util::config::FloorplanConfig;

/// Runs the full multi-restart annealing flow on a parsed design.
pub fn place(
    db: FloorplanDB,
    config: &FloorplanConfig,
) -> Result<result::FloorplanResult, error::FloorplanError> {
    let mut floorplanner = parallel::Floorplanner::new(db, config.clone())?;
    floorplanner.run()
}
