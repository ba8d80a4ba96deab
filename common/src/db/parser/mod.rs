pub mod blocks;
pub mod nets;
