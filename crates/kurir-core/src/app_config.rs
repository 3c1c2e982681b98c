use std::path::PathBuf;

/// Immutable application configuration, loaded once at process start and
/// passed into each component constructor. Nothing reads ambient state
/// after this is built.
#[derive(Clone)]
pub struct AppConfig {
    pub api_base_url: String,
    pub api_token: String,
    pub location_code: String,
    pub hubs_path: PathBuf,
    pub drivers_path: PathBuf,
    pub output_dir: PathBuf,
    pub log_level: String,
    pub request_timeout_secs: u64,
    /// Single-request page cap for `/tasks` and `/results`. There is no
    /// pagination loop; rows beyond the cap are dropped.
    pub task_limit: u32,
    /// When false, reports are written but never handed to the OS viewer.
    pub open_after_write: bool,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_base_url", &self.api_base_url)
            .field("api_token", &"[redacted]")
            .field("location_code", &self.location_code)
            .field("hubs_path", &self.hubs_path)
            .field("drivers_path", &self.drivers_path)
            .field("output_dir", &self.output_dir)
            .field("log_level", &self.log_level)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("task_limit", &self.task_limit)
            .field("open_after_write", &self.open_after_write)
            .finish()
    }
}
