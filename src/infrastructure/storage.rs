use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::domain::database::Database;
use crate::domain::error::{AppError, Result};

/// Single on-disk document holding every saved database.
const DATABASES_FILE: &str = "databases.json";

/// JSON-document store for imported databases.
///
/// The whole collection lives in one file under the data directory and is
/// rewritten atomically on every change, so a crash mid-write never leaves
/// a truncated document behind.
#[derive(Debug, Clone)]
pub struct DatabaseStore {
    path: PathBuf,
}

impl DatabaseStore {
    pub fn open(data_dir: &Path) -> Result<Self> {
        ensure_dir(data_dir)?;
        Ok(Self {
            path: data_dir.join(DATABASES_FILE),
        })
    }

    pub fn get_all(&self) -> Result<Vec<Database>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let data = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&data)?)
    }

    pub fn get(&self, id: &str) -> Result<Option<Database>> {
        Ok(self.get_all()?.into_iter().find(|db| db.id == id))
    }

    /// Insert the database, or replace the stored copy with the same id.
    pub fn save(&self, database: &Database) -> Result<()> {
        let mut databases = self.get_all()?;
        match databases.iter_mut().find(|db| db.id == database.id) {
            Some(existing) => *existing = database.clone(),
            None => databases.push(database.clone()),
        }
        self.persist(&databases)?;
        debug!(id = %database.id, items = database.items.len(), "database saved");
        Ok(())
    }

    /// Remove a database by id. Returns whether anything was removed.
    pub fn delete(&self, id: &str) -> Result<bool> {
        let mut databases = self.get_all()?;
        let before = databases.len();
        databases.retain(|db| db.id != id);
        if databases.len() == before {
            return Ok(false);
        }
        self.persist(&databases)?;
        info!(id = %id, "database deleted");
        Ok(true)
    }

    fn persist(&self, databases: &[Database]) -> Result<()> {
        let json = serde_json::to_string_pretty(databases)?;
        atomic_write(&self.path, json.as_bytes())
    }
}

/// Write a raw database file (e.g. a generated snapshot the browser sends
/// for safekeeping) under the data directory.
///
/// Only the base name of the requested file name is used, so a payload
/// cannot write outside the data directory.
pub fn save_database_file(data_dir: &Path, name: &str, bytes: &[u8]) -> Result<PathBuf> {
    let file_name = Path::new(name)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .filter(|n| !n.is_empty())
        .ok_or_else(|| AppError::ValidationError("Nome de arquivo inválido".to_string()))?;

    ensure_dir(data_dir)?;
    let path = data_dir.join(file_name);
    atomic_write(&path, bytes)?;
    info!(file = %path.display(), size = bytes.len(), "database file saved");
    Ok(path)
}

/// Write via a temp file in the target directory plus rename, so readers
/// never observe a partially written file.
pub fn atomic_write(path: &Path, data: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            ensure_dir(parent)?;
            parent
        }
        _ => Path::new("."),
    };

    let mut temp_file = tempfile::NamedTempFile::new_in(dir)?;
    temp_file.write_all(data)?;
    temp_file.flush()?;
    temp_file
        .persist(path)
        .map_err(|e| AppError::from(e.error))?;
    Ok(())
}

fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::inventory::InventoryRecord;
    use tempfile::tempdir;

    fn sample_database(name: &str) -> Database {
        Database::new(
            name.to_string(),
            vec![InventoryRecord {
                numero: "1".to_string(),
                descricao: "Cadeira".to_string(),
                ..Default::default()
            }],
        )
    }

    #[test]
    fn test_get_all_on_fresh_store_is_empty() {
        let dir = tempdir().unwrap();
        let store = DatabaseStore::open(dir.path()).unwrap();

        assert!(store.get_all().unwrap().is_empty());
    }

    #[test]
    fn test_save_then_get_round_trip() {
        let dir = tempdir().unwrap();
        let store = DatabaseStore::open(dir.path()).unwrap();
        let database = sample_database("Inventário 2024");

        store.save(&database).unwrap();
        let loaded = store.get(&database.id).unwrap().unwrap();

        assert_eq!(loaded, database);
    }

    #[test]
    fn test_save_with_same_id_replaces() {
        let dir = tempdir().unwrap();
        let store = DatabaseStore::open(dir.path()).unwrap();
        let mut database = sample_database("antes");

        store.save(&database).unwrap();
        database.name = "depois".to_string();
        store.save(&database).unwrap();

        let all = store.get_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "depois");
    }

    #[test]
    fn test_delete_reports_whether_something_was_removed() {
        let dir = tempdir().unwrap();
        let store = DatabaseStore::open(dir.path()).unwrap();
        let database = sample_database("para apagar");
        store.save(&database).unwrap();

        assert!(store.delete(&database.id).unwrap());
        assert!(!store.delete(&database.id).unwrap());
        assert!(store.get(&database.id).unwrap().is_none());
    }

    #[test]
    fn test_atomic_write_replaces_existing_content() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("snapshot.json");

        atomic_write(&path, b"primeiro").unwrap();
        atomic_write(&path, b"segundo").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "segundo");
    }

    #[test]
    fn test_save_database_file_strips_path_components() {
        let dir = tempdir().unwrap();

        let path = save_database_file(dir.path(), "../escapou/inventario.db", b"dados").unwrap();

        assert_eq!(path, dir.path().join("inventario.db"));
        assert_eq!(fs::read(&path).unwrap(), b"dados");
    }

    #[test]
    fn test_save_database_file_rejects_empty_name() {
        let dir = tempdir().unwrap();

        let err = save_database_file(dir.path(), "..", b"dados").unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }
}
