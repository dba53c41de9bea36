/// Crate-wide result type; errors are `anyhow::Error` carrying a
/// [`BomError`](crate::shared::error::BomError) where the caller needs to
/// tell fatal failures from per-artifact ones.
pub type Result<T> = anyhow::Result<T>;
