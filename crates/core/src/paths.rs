//! Default install locations.

use std::path::PathBuf;

/// Default install root, `~/.local/share/lspup` on Linux.
#[must_use]
pub fn default_root_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from(".local/share"))
        .join("lspup")
}

/// Default bin directory, `~/.local/bin`.
#[must_use]
pub fn default_bin_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".local")
        .join("bin")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_end_in_expected_components() {
        assert!(default_root_dir().ends_with("lspup"));
        assert!(default_bin_dir().ends_with(".local/bin"));
    }
}
