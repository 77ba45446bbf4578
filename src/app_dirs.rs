use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    /// Solve snapshot location under $HOME/.local/state/kubik
    pub fn solves_path() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            let state_dir = PathBuf::from(home)
                .join(".local")
                .join("state")
                .join("kubik");
            Some(state_dir.join("solves.json"))
        } else {
            ProjectDirs::from("", "", "kubik")
                .map(|proj_dirs| proj_dirs.data_local_dir().join("solves.json"))
        }
    }

    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "kubik").map(|proj_dirs| proj_dirs.config_dir().join("config.json"))
    }
}
