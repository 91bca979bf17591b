//! JSON snapshot persistence for the raw business records.
//!
//! Only the source entities are persisted; the derived ledger is always
//! recomputed from them and never written to disk.

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{domain::books::Books, errors::SalonError};

/// Writes the provided books to disk atomically by staging to a temporary file.
pub fn save_books_to_file(books: &Books, path: &Path) -> Result<(), SalonError> {
    let tmp = path.with_extension("tmp");
    let json = serde_json::to_string_pretty(books)?;
    fs::write(&tmp, json)?;
    fs::rename(tmp, path)?;
    Ok(())
}

/// Loads a books snapshot from disk, returning structured errors on failure.
pub fn load_books_from_file(path: &Path) -> Result<Books, SalonError> {
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

/// File-system store that keeps named snapshots under a data directory.
pub struct BooksStore {
    root: PathBuf,
}

impl BooksStore {
    /// Opens a store rooted at `root`, defaulting to the user data
    /// directory, and creates the directory if needed.
    pub fn new(root: Option<PathBuf>) -> Result<Self, SalonError> {
        let root = match root {
            Some(path) => path,
            None => dirs::data_dir()
                .ok_or_else(|| {
                    SalonError::Persistence("unable to determine user data directory".into())
                })?
                .join("salon_core"),
        };
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn books_path(&self, name: &str) -> PathBuf {
        self.root.join(format!("{name}.json"))
    }

    pub fn save_named(&self, books: &mut Books, name: &str) -> Result<PathBuf, SalonError> {
        books.touch();
        let path = self.books_path(name);
        save_books_to_file(books, &path)?;
        tracing::info!(name, path = %path.display(), "books snapshot saved");
        Ok(path)
    }

    pub fn load_named(&self, name: &str) -> Result<Books, SalonError> {
        let path = self.books_path(name);
        if !path.exists() {
            return Err(SalonError::Persistence(format!(
                "no snapshot named '{name}' at {}",
                path.display()
            )));
        }
        load_books_from_file(&path)
    }

    /// Names of every snapshot in the store, sorted.
    pub fn list_named(&self) -> Result<Vec<String>, SalonError> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) == Some("json") {
                if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                    names.push(stem.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::Service;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_named_roundtrip() {
        let temp = tempdir().unwrap();
        let store = BooksStore::new(Some(temp.path().to_path_buf())).unwrap();

        let mut books = Books::new("Demo Studio");
        books.add_service(Service::new("Haircut", 80.0));
        let path = store.save_named(&mut books, "demo").expect("save books");
        assert!(path.exists());

        let loaded = store.load_named("demo").expect("load books");
        assert_eq!(loaded.name, "Demo Studio");
        assert_eq!(loaded.services.len(), 1);
        assert_eq!(store.list_named().unwrap(), vec!["demo".to_string()]);
    }

    #[test]
    fn missing_snapshot_is_a_structured_error() {
        let temp = tempdir().unwrap();
        let store = BooksStore::new(Some(temp.path().to_path_buf())).unwrap();
        let err = store.load_named("ghost").expect_err("load must fail");
        match err {
            SalonError::Persistence(message) => {
                assert!(message.contains("ghost"), "unexpected error: {message}");
            }
            other => panic!("expected persistence error, got {other:?}"),
        }
    }
}
