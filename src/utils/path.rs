//! Path utilities: expand a leading `~/` in configured or typed paths.

use std::path::PathBuf;

pub fn expand_tilde(path: &str) -> PathBuf {
    if path.starts_with("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(path.trim_start_matches("~/"));
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_leading_tilde_slash_is_expanded() {
        assert_eq!(expand_tilde("/var/db.sqlite"), PathBuf::from("/var/db.sqlite"));
        assert_eq!(expand_tilde("a/~/b"), PathBuf::from("a/~/b"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde("~/x.json"), home.join("x.json"));
        }
    }
}
