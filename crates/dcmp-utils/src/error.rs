/// Base error type for dcmp-utils operations.
#[derive(Debug, thiserror::Error)]
pub enum UtilError {
    #[error("invalid color mode '{0}' (expected auto, always or never)")]
    InvalidColorMode(String),

    #[error("invalid color slot '{0}' in {var}", var = crate::color::COLORS_ENV)]
    InvalidColorSlot(String),

    #[error("invalid color value '{value}' for slot '{slot}'")]
    InvalidColorValue { slot: String, value: String },
}
