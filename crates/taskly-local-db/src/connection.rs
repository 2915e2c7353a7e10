//! Database connection management.

use crate::schema::DB_FILE_NAME;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Environment variable that overrides the data directory.
pub const HOME_ENV: &str = "TASKLY_HOME";

/// How long a connection waits on a file locked by another process.
pub const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const APP_DIR: &str = "taskly";
const FALLBACK_APP_DIR: &str = ".taskly";

/// Pick the data directory from the override, the platform data directory
/// and the home directory, in that order.
///
/// - Linux: `${XDG_DATA_HOME:-~/.local/share}/taskly`
/// - macOS: `~/Library/Application Support/taskly`
/// - Windows: `%APPDATA%\taskly`
/// - elsewhere: `~/.taskly`
pub fn resolve_data_dir(
    override_dir: Option<PathBuf>,
    platform_data_dir: Option<PathBuf>,
    home_dir: Option<PathBuf>,
) -> crate::Result<PathBuf> {
    if let Some(dir) = override_dir.filter(|dir| !dir.as_os_str().is_empty()) {
        return Ok(dir);
    }
    if let Some(dir) = platform_data_dir {
        return Ok(dir.join(APP_DIR));
    }
    home_dir
        .map(|home| home.join(FALLBACK_APP_DIR))
        .ok_or(crate::Error::NoDataDir)
}

/// Create the data directory if it is missing. Safe to call repeatedly.
pub fn ensure_data_dir(path: &Path) -> crate::Result<()> {
    if path.is_dir() {
        return Ok(());
    }

    let mut builder = std::fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o750);
    }

    builder.create(path).map_err(|source| crate::Error::DataDir {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), "created data directory");
    Ok(())
}

/// Handle to the task database.
///
/// The connection is released by [`Database::close`] or on drop.
#[derive(Debug)]
pub struct Database {
    connection: Option<Connection>,
}

impl Database {
    /// Get the data directory based on the TASKLY_HOME environment variable or
    /// platform defaults. Nothing is created.
    pub fn data_dir() -> crate::Result<PathBuf> {
        resolve_data_dir(
            std::env::var_os(HOME_ENV).map(PathBuf::from),
            dirs::data_dir(),
            dirs::home_dir(),
        )
    }

    /// Get the default database path. Nothing is created.
    pub fn default_path() -> crate::Result<PathBuf> {
        Ok(Self::data_dir()?.join(DB_FILE_NAME))
    }

    /// Open the database at the default path, creating the data directory
    /// if needed.
    pub fn open_default() -> crate::Result<Self> {
        let dir = Self::data_dir()?;
        ensure_data_dir(&dir)?;
        Self::open(dir.join(DB_FILE_NAME))
    }
}

impl Database {
    /// Open a new database connection at the specified path.
    ///
    /// If the path doesn't exist, the database will be created.
    pub fn open<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let path = path.as_ref();
        let open_err = |source| crate::Error::Open {
            path: path.to_path_buf(),
            source,
        };

        let conn = Connection::open(path).map_err(open_err)?;
        // Before any pragma that needs a lock
        conn.busy_timeout(BUSY_TIMEOUT).map_err(open_err)?;
        let journal_mode: String = conn
            .pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))
            .map_err(open_err)?;
        debug!(%journal_mode, "journal mode set");
        Self::initialize(conn, path)
    }

    /// Open an in-memory database for testing.
    pub fn open_in_memory() -> crate::Result<Self> {
        let path = Path::new(":memory:");
        let conn = Connection::open_in_memory().map_err(|source| crate::Error::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Self::initialize(conn, path)
    }

    fn initialize(conn: Connection, path: &Path) -> crate::Result<Self> {
        let open_err = |source| crate::Error::Open {
            path: path.to_path_buf(),
            source,
        };
        conn.pragma_update(None, "foreign_keys", "ON")
            .map_err(open_err)?;

        crate::migrations::MigrationManager::migrate(&conn)?;
        debug!(path = %path.display(), "database opened");

        Ok(Self {
            connection: Some(conn),
        })
    }

    /// Whether the connection is still held.
    pub fn is_open(&self) -> bool {
        self.connection.is_some()
    }

    /// Get a reference to the underlying connection.
    pub fn connection(&self) -> crate::Result<&Connection> {
        self.connection.as_ref().ok_or(crate::Error::NotOpen)
    }

    /// Task operations bound to this database.
    pub fn tasks(&self) -> crate::models::TaskStore<'_> {
        crate::models::TaskStore::new(self)
    }

    /// Release the connection. Closing an already closed database is a no-op.
    pub fn close(&mut self) -> crate::Result<()> {
        let Some(conn) = self.connection.take() else {
            return Ok(());
        };
        conn.close().map_err(|(_conn, source)| {
            warn!(error = %source, "failed to close database");
            crate::Error::database("close database", source)
        })?;
        debug!("database closed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_wins_over_platform_dirs() {
        let dir = resolve_data_dir(
            Some(PathBuf::from("/custom")),
            Some(PathBuf::from("/data")),
            Some(PathBuf::from("/home/u")),
        )
        .unwrap();
        assert_eq!(dir, PathBuf::from("/custom"));
    }

    #[test]
    fn empty_override_is_ignored() {
        let dir = resolve_data_dir(Some(PathBuf::new()), Some(PathBuf::from("/data")), None)
            .unwrap();
        assert_eq!(dir, PathBuf::from("/data/taskly"));
    }

    #[test]
    fn home_dotdir_is_the_fallback() {
        let dir = resolve_data_dir(None, None, Some(PathBuf::from("/home/u"))).unwrap();
        assert_eq!(dir, PathBuf::from("/home/u/.taskly"));
    }

    #[test]
    fn no_location_is_a_setup_error() {
        let err = resolve_data_dir(None, None, None).unwrap_err();
        assert!(matches!(err, crate::Error::NoDataDir));
    }

    #[test]
    fn close_is_idempotent() {
        let mut db = Database::open_in_memory().unwrap();
        assert!(db.is_open());
        db.close().unwrap();
        assert!(!db.is_open());
        db.close().unwrap();
        assert!(matches!(db.connection(), Err(crate::Error::NotOpen)));
    }
}
