//! Filesystem locations used by photodeck.
//!
//! Trace output goes under the platform data directory and user-supplied
//! config paths may start with `~`.

use std::path::PathBuf;

/// Returns the photodeck data directory.
///
/// Resolves to `$XDG_DATA_HOME/photodeck` on Linux and the platform equivalent
/// elsewhere. Falls back to `./.photodeck` when no data directory is known.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    dirs::data_dir().map_or_else(|| PathBuf::from(".photodeck"), |dir| dir.join("photodeck"))
}

/// Expands a leading `~` to the user's home directory.
///
/// Paths without a leading tilde, and every path when the home directory is
/// unknown, are returned unchanged.
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    let Some(home) = dirs::home_dir() else {
        return PathBuf::from(path);
    };

    if path == "~" {
        home
    } else if let Some(rest) = path.strip_prefix("~/") {
        home.join(rest)
    } else {
        PathBuf::from(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_paths_are_untouched() {
        assert_eq!(expand_tilde("/etc/photodeck.toml"), PathBuf::from("/etc/photodeck.toml"));
        assert_eq!(expand_tilde("rel/~/x"), PathBuf::from("rel/~/x"));
    }

    #[test]
    fn tilde_resolves_under_home() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde("~"), home);
            assert_eq!(expand_tilde("~/a/b.toml"), home.join("a/b.toml"));
        }
    }

    #[test]
    fn data_dir_is_namespaced() {
        assert!(get_data_dir().ends_with("photodeck") || get_data_dir().ends_with(".photodeck"));
    }
}
