use std::fs;
use std::path::{Path, PathBuf};

use avl_tree::{AvlTree, TreeObserver};

use crate::config::{Config, validate_dir};
use crate::error::{Result, StoreError};

/// Tree files kept as comma-separated pre-order keys under one directory.
#[derive(Clone, Debug)]
pub struct Store {
    db_dir: PathBuf,
}

impl Store {
    pub fn new(config: &Config) -> Self {
        Self {
            db_dir: config.db_dir.clone(),
        }
    }

    pub fn db_dir(&self) -> &Path {
        &self.db_dir
    }

    /// Resolves `name` inside the store directory. Only the final path
    /// component is used, so `./DB/tree.txt` and `tree.txt` name the same file.
    pub fn path_for(&self, name: &str) -> Result<PathBuf> {
        let file_name = file_name(name)?;
        Ok(self.db_dir.join(file_name))
    }

    pub fn exists(&self, name: &str) -> Result<bool> {
        Ok(self.path_for(name)?.is_file())
    }

    pub fn write_raw(&self, name: &str, text: &str) -> Result<PathBuf> {
        let file_name = file_name(name)?;
        let path = validate_dir(&self.db_dir, file_name).map_err(|source| StoreError::Io {
            path: self.db_dir.clone(),
            source,
        })?;
        fs::write(&path, text).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }

    pub fn read_raw(&self, name: &str) -> Result<String> {
        let path = self.path_for(name)?;
        log::info!("Opening DB file {}.", path.display());
        fs::read_to_string(&path).map_err(|source| StoreError::Io { path, source })
    }

    pub fn save<O: TreeObserver>(&self, name: &str, tree: &AvlTree<O>) -> Result<PathBuf> {
        let text = avl_tree::encode(&avl_tree::serialize(tree));
        log::info!("Serialized AVL tree: {text}.");
        let path = self.write_raw(name, &text)?;
        log::info!("AVL tree saved in {}.", path.display());
        Ok(path)
    }

    pub fn load(&self, name: &str) -> Result<AvlTree> {
        let path = self.path_for(name)?;
        let text = self.read_raw(name)?;
        let tree = avl_tree::decode(&text)
            .and_then(|keys| avl_tree::deserialize(&keys))
            .map_err(|source| StoreError::Tree { path, source })?;
        log::info!("Deserialized AVL tree with {} nodes.", tree.len());
        Ok(tree)
    }
}

fn file_name(name: &str) -> Result<&str> {
    Path::new(name)
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| StoreError::InvalidName(name.to_owned()))
}

#[cfg(test)]
mod tests {
    use avl_tree::{AvlTree, TreeError};

    use super::Store;
    use crate::config::Config;
    use crate::error::StoreError;
    use crate::test_support::TempDir;

    fn store_in(dir: &TempDir) -> Store {
        Store::new(&Config {
            db_dir: dir.path().join("DB"),
            ..Config::default()
        })
    }

    #[test]
    fn save_writes_comma_separated_pre_order() {
        let dir = TempDir::new("store-save");
        let store = store_in(&dir);
        let mut tree = AvlTree::with_observer(42, ());
        for key in [7, 86, 23, 15, 91, 34] {
            tree.insert(key).unwrap();
        }

        let path = store.save("tree1.txt", &tree).unwrap();
        assert_eq!(path, dir.path().join("DB").join("tree1.txt"));
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "42,15,7,23,34,86,91"
        );

        let loaded = store.load("tree1.txt").unwrap();
        assert_eq!(loaded.in_order(), vec![7, 15, 23, 34, 42, 86, 91]);
    }

    #[test]
    fn names_resolve_to_the_store_dir() {
        let dir = TempDir::new("store-names");
        let store = store_in(&dir);
        let expected = dir.path().join("DB").join("tree.txt");
        assert_eq!(store.path_for("tree.txt").unwrap(), expected);
        assert_eq!(store.path_for("./DB/tree.txt").unwrap(), expected);
        assert!(matches!(
            store.path_for(".."),
            Err(StoreError::InvalidName(_))
        ));
        assert!(!store.exists("tree.txt").unwrap());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = TempDir::new("store-missing");
        let store = store_in(&dir);
        assert!(matches!(store.load("nope.txt"), Err(StoreError::Io { .. })));
    }

    #[test]
    fn corrupt_and_empty_files_are_rejected() {
        let dir = TempDir::new("store-corrupt");
        let store = store_in(&dir);

        store.write_raw("bad.txt", "1,two,3").unwrap();
        match store.load("bad.txt") {
            Err(StoreError::Tree { source, .. }) => assert_eq!(
                source,
                TreeError::InvalidKey {
                    token: "two".to_owned()
                }
            ),
            other => panic!("unexpected {other:?}"),
        }

        store.write_raw("empty.txt", "").unwrap();
        match store.load("empty.txt") {
            Err(StoreError::Tree { source, .. }) => {
                assert_eq!(source, TreeError::EmptySequence)
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
