/// Crate-wide Result alias. Stage adapters wrap `AuditError` into `anyhow::Error`
/// so the controller can downcast when it needs the failing stage.
pub type Result<T> = std::result::Result<T, anyhow::Error>;
