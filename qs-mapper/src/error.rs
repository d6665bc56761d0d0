/// Errors surfaced by mapper construction and transforms. No variant is
/// retryable; all of them are configuration or caller mistakes.
#[derive(Debug, thiserror::Error)]
pub enum MapperError {
    #[error("invalid atlas configuration: {reason}")]
    InvalidAtlasConfig { reason: String },

    #[error("unsupported quad goal {0}, expected 1 or 4")]
    UnsupportedQuadGoal(u32),
}
