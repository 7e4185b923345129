use std::path::{Path, PathBuf};

/// Scratch directory under the system temp dir, removed on drop.
pub(crate) struct TempDir(PathBuf);

impl TempDir {
    pub(crate) fn new(label: &str) -> Self {
        let path = std::env::temp_dir().join(format!("avldb-{label}-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&path);
        Self(path)
    }

    pub(crate) fn path(&self) -> &Path {
        &self.0
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.0);
    }
}

#[cfg(test)]
mod tests {
    use super::TempDir;

    #[test]
    fn removed_on_drop_even_after_panic() {
        let path = TempDir::new("guard").path().to_path_buf();
        let result = std::panic::catch_unwind(|| {
            let dir = TempDir::new("guard");
            std::fs::create_dir_all(dir.path().join("DB")).unwrap();
            std::fs::write(dir.path().join("DB").join("tree.txt"), "1").unwrap();
            panic!("assertion failed inside the test");
        });
        assert!(result.is_err());
        assert!(!path.exists());
    }
}
