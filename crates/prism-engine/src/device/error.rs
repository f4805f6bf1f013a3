/// Unrecoverable presentation failures.
///
/// Recoverable surface conditions (lost, outdated, timeout) never surface as
/// errors; the affected frame is skipped instead.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum GpuError {
    #[error("GPU device lost")]
    DeviceLost,
    #[error("surface out of memory")]
    OutOfMemory,
}
