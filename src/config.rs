use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const BANNER_TIMEOUT: Duration = Duration::from_secs(5);
pub const COMMAND_BUFFER: usize = 30;
