//! Dashboard settings. All values are fixed defaults; nothing is read from the environment.

use std::net::{Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

pub const DEFAULT_TITLE: &str = "Passing Defense Dashboard";
pub const DEFAULT_PORT: u16 = 8050;
pub const PLAYS_FILE: &str = "plays.csv";
pub const DEFENSE_FILE: &str = "defense.csv";

#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Directory holding both CSV files.
    pub data_dir: PathBuf,
    pub plays_file: String,
    pub defense_file: String,
    pub bind_addr: SocketAddr,
    pub title: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self::with_data_dir(".")
    }
}

impl DashboardConfig {
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            plays_file: PLAYS_FILE.to_string(),
            defense_file: DEFENSE_FILE.to_string(),
            bind_addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, DEFAULT_PORT)),
            title: DEFAULT_TITLE.to_string(),
        }
    }

    /// Settings for the running binary: data files are looked up next to the
    /// executable first, then in the working directory.
    pub fn locate() -> Self {
        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf));
        let cwd = std::env::current_dir().ok();

        let candidates: Vec<PathBuf> = exe_dir.into_iter().chain(cwd).collect();
        let data_dir = candidates
            .iter()
            .find(|dir| Self::with_data_dir(dir.as_path()).has_data_files())
            .or_else(|| candidates.first())
            .cloned()
            .unwrap_or_else(|| PathBuf::from("."));

        Self::with_data_dir(data_dir)
    }

    pub fn plays_path(&self) -> PathBuf {
        self.data_dir.join(&self.plays_file)
    }

    pub fn defense_path(&self) -> PathBuf {
        self.data_dir.join(&self.defense_file)
    }

    pub fn has_data_files(&self) -> bool {
        self.plays_path().is_file() && self.defense_path().is_file()
    }
}
