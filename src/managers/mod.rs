// URLForge state managers
// Managers handle stateful operations: the ordered parameter rows and the
// per-input-stream debounce deadlines.

pub mod debounce;
pub mod param_store;
