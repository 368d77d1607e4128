//! Path utilities for application data

use std::path::PathBuf;

/// Identifier of the application data folder
pub const APP_DATA_FOLDER: &str = "com.codecube.desktop";

/// Gets the application data directory
pub fn get_app_data_dir() -> Result<PathBuf, String> {
    dirs::data_dir()
        .map(|p| p.join(APP_DATA_FOLDER))
        .ok_or_else(|| "Could not find app data directory".to_string())
}

/// Gets the completion service configuration file path
pub fn get_completion_config_path() -> Result<PathBuf, String> {
    get_app_data_dir().map(|p| p.join(".completion_config.json"))
}
