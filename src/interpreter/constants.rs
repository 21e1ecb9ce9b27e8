// Constants for the sketch interpreter

/// Memory budget for the step history (8 MB)
pub const DEFAULT_HISTORY_LIMIT: usize = 8 * 1024 * 1024;

/// Tick period of the reference scheduler, in milliseconds (20 Hz)
pub const DEFAULT_TICK_MS: u64 = 50;
