use thiserror::Error;

/// Errors raised while building sheets, fonts and frame sequences.
#[derive(Debug, Error)]
pub enum SheetError {
    #[error("invalid grid dimensions: {columns}x{rows} cells of {sprite_width}x{sprite_height}px")]
    InvalidGridDimensions {
        columns: u32,
        rows: u32,
        sprite_width: u32,
        sprite_height: u32,
    },

    #[error(
        "sheet needs {required_width}x{required_height}px but texture is {texture_width}x{texture_height}px"
    )]
    OutOfBoundsSheet {
        required_width: u64,
        required_height: u64,
        texture_width: u32,
        texture_height: u32,
    },

    #[error("frame index {index} out of range for sheet of {len} sprites")]
    FrameIndexOutOfRange { index: usize, len: usize },

    #[error("alphabet has {alphabet_len} characters but the grid only has {cells} cells")]
    AlphabetTooLong { alphabet_len: usize, cells: usize },

    #[error("pixel buffer has {actual} bytes, expected {expected}")]
    InvalidPixelData { expected: usize, actual: usize },

    #[error("texture of {width}x{height}px does not fit in memory")]
    TextureTooLarge { width: u32, height: u32 },

    #[error("manifest parse error: {0}")]
    Manifest(#[from] serde_json::Error),

    #[error("texture not provided: {0}")]
    MissingTexture(String),

    #[error("name used by both a sheet and a font: {0}")]
    DuplicateGridName(String),

    #[error("unknown sheet: {0}")]
    UnknownSheet(String),

    #[error("unknown animation: {0}")]
    UnknownAnimation(String),
}
