use thiserror::Error;

#[derive(Debug, Error)]
pub enum FloorplanError {
    #[error("design contains no blocks")]
    EmptyDesign,

    #[error(
        "block '{name}' ({width}x{height}) fits the {outline_width}x{outline_height} outline in neither orientation"
    )]
    BlockTooLarge {
        name: String,
        width: u64,
        height: u64,
        outline_width: u64,
        outline_height: u64,
    },

    #[error("total block area {block_area} exceeds the outline area {outline_area}")]
    OutlineTooSmall { block_area: u64, outline_area: u64 },

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A sequence pair stopped being a bijection over the block ids, or an
    /// inverse map disagrees with its permutation. Indicates corrupted
    /// search state; never recovered.
    #[error("corrupt sequence pair: {0}")]
    CorruptSequencePair(String),
}
