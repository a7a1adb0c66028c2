//! SQLite-backed store for clubs, events, posts and viewer data.

use std::{
    collections::{BTreeSet, HashMap},
    fmt,
    path::{Path, PathBuf},
    sync::Mutex,
};

use rusqlite::{Connection, OpenFlags, Row};
use thiserror::Error;

use crate::{
    BrowsableItem, Club, Event, InterestProfile, InterestTag, ItemId, ItemKind, ItemRecord, Post,
    UserId,
};

use super::{CatalogueStore, StoreError, ViewerStore};

/// Tables backing [`SqliteStore`].
///
/// Events and posts carry no tags of their own; they inherit
/// `club_interests` through `club_id`.
pub const SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS clubs (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT ''
);
CREATE TABLE IF NOT EXISTS club_interests (
    club_id INTEGER NOT NULL REFERENCES clubs(id),
    interest TEXT NOT NULL,
    PRIMARY KEY (club_id, interest)
);
CREATE TABLE IF NOT EXISTS events (
    id INTEGER PRIMARY KEY,
    club_id INTEGER NOT NULL REFERENCES clubs(id),
    title TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    starts_at TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS posts (
    id INTEGER PRIMARY KEY,
    club_id INTEGER NOT NULL REFERENCES clubs(id),
    title TEXT NOT NULL,
    body TEXT NOT NULL DEFAULT '',
    created_at TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS memberships (
    user_id INTEGER NOT NULL,
    club_id INTEGER NOT NULL REFERENCES clubs(id),
    PRIMARY KEY (user_id, club_id)
);
CREATE TABLE IF NOT EXISTS user_interests (
    user_id INTEGER NOT NULL,
    interest TEXT NOT NULL,
    PRIMARY KEY (user_id, interest)
);
";

const REQUIRED_TABLES: [&str; 6] = [
    "clubs",
    "club_interests",
    "events",
    "posts",
    "memberships",
    "user_interests",
];

const CLUBS_SQL: &str = "SELECT id, name, description FROM clubs ORDER BY id";
const EVENTS_SQL: &str =
    "SELECT id, club_id, title, description, starts_at FROM events ORDER BY id";
const POSTS_SQL: &str = "SELECT id, club_id, title, body, created_at FROM posts ORDER BY id";
const CLUB_INTERESTS_SQL: &str = "SELECT club_id, interest FROM club_interests";
const USER_INTERESTS_SQL: &str = "SELECT interest FROM user_interests WHERE user_id = ?1";
const JOINED_CLUBS_SQL: &str = "SELECT club_id FROM memberships WHERE user_id = ?1";
const JOINED_EVENTS_SQL: &str = "SELECT events.id FROM events \
     JOIN memberships ON memberships.club_id = events.club_id \
     WHERE memberships.user_id = ?1";
const JOINED_POSTS_SQL: &str = "SELECT posts.id FROM posts \
     JOIN memberships ON memberships.club_id = posts.club_id \
     WHERE memberships.user_id = ?1";

/// Error raised when opening or reading the SQLite store.
#[derive(Debug, Error)]
pub enum SqliteStoreError {
    /// Opening the SQLite database failed.
    #[error("failed to open SQLite database at {path}: {source}")]
    OpenDatabase {
        /// Location of the SQLite database on disk.
        path: PathBuf,
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// A table the store reads from is absent.
    #[error("database at {path} is missing the `{table}` table")]
    MissingTable {
        /// Location of the SQLite database on disk.
        path: PathBuf,
        /// Name of the absent table.
        table: &'static str,
    },
    /// Preparing or executing a query failed.
    #[error("failed to {operation}: {source}")]
    Query {
        /// Description of the failed operation.
        operation: &'static str,
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// A stored identifier does not fit the domain's identifier range.
    #[error("identifier {raw} is outside the supported range")]
    IdOutOfRange {
        /// Raw identifier read from or bound to SQLite.
        raw: i128,
    },
    /// A stored interest name was blank.
    #[error("club {club_id} has a blank interest tag")]
    InvalidTag {
        /// Club owning the blank tag.
        club_id: i64,
    },
    /// Another thread panicked while holding the connection.
    #[error("SQLite connection lock was poisoned")]
    Poisoned,
}

impl From<SqliteStoreError> for StoreError {
    fn from(source: SqliteStoreError) -> Self {
        Self::Backend {
            operation: "read from SQLite",
            source: Box::new(source),
        }
    }
}

/// Read-only store backed by a single SQLite database.
///
/// The connection sits behind a mutex so one store can be shared across
/// request handlers.
pub struct SqliteStore {
    path: PathBuf,
    connection: Mutex<Connection>,
}

impl fmt::Debug for SqliteStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteStore")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl SqliteStore {
    /// Open an existing database read-only and check its tables.
    ///
    /// # Errors
    /// Returns [`SqliteStoreError::OpenDatabase`] when SQLite refuses the
    /// file and [`SqliteStoreError::MissingTable`] when the schema is
    /// incomplete.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SqliteStoreError> {
        let path = path.as_ref();
        let connection = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)
            .map_err(|source| SqliteStoreError::OpenDatabase {
                path: path.to_path_buf(),
                source,
            })?;
        for table in REQUIRED_TABLES {
            if !table_exists(&connection, table)? {
                return Err(SqliteStoreError::MissingTable {
                    path: path.to_path_buf(),
                    table,
                });
            }
        }
        log::debug!("opened club store at {}", path.display());
        Ok(Self {
            path: path.to_path_buf(),
            connection: Mutex::new(connection),
        })
    }

    /// Create the store's tables in the database at `path`.
    ///
    /// The database file is created when absent; existing tables are left
    /// untouched.
    ///
    /// # Errors
    /// Returns [`SqliteStoreError`] when the file cannot be opened for
    /// writing or the schema statements fail.
    pub fn initialise_schema(path: impl AsRef<Path>) -> Result<(), SqliteStoreError> {
        let path = path.as_ref();
        let connection =
            Connection::open(path).map_err(|source| SqliteStoreError::OpenDatabase {
                path: path.to_path_buf(),
                source,
            })?;
        connection
            .execute_batch(SCHEMA_SQL)
            .map_err(|source| SqliteStoreError::Query {
                operation: "create schema",
                source,
            })?;
        log::info!("initialised club store schema at {}", path.display());
        Ok(())
    }

    /// Location of the backing database.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn with_connection<T>(
        &self,
        read: impl FnOnce(&Connection) -> Result<T, SqliteStoreError>,
    ) -> Result<T, SqliteStoreError> {
        let connection = self
            .connection
            .lock()
            .map_err(|_| SqliteStoreError::Poisoned)?;
        read(&connection)
    }

    fn load_items(
        &self,
        kind: ItemKind,
    ) -> Result<Vec<BrowsableItem<ItemRecord>>, SqliteStoreError> {
        self.with_connection(|connection| {
            let mut interests = load_club_interests(connection)?;
            let rows = match kind {
                ItemKind::Club => query_rows(connection, CLUBS_SQL, "read clubs", club_row)?,
                ItemKind::Event => query_rows(connection, EVENTS_SQL, "read events", event_row)?,
                ItemKind::Post => query_rows(connection, POSTS_SQL, "read posts", post_row)?,
            };
            rows.into_iter()
                .map(|(raw_id, record)| {
                    let id = item_id(raw_id)?;
                    let owner = record.club_id().map_or(raw_id, club_key);
                    // Clubs consume their own tag set; events and posts share it.
                    let tags = match kind {
                        ItemKind::Club => interests.remove(&owner).unwrap_or_default(),
                        ItemKind::Event | ItemKind::Post => {
                            interests.get(&owner).cloned().unwrap_or_default()
                        }
                    };
                    Ok(BrowsableItem::new(id, tags, record))
                })
                .collect()
        })
    }

    fn load_interests(&self, user: UserId) -> Result<InterestProfile, SqliteStoreError> {
        let user_id = user_param(user)?;
        self.with_connection(|connection| {
            let mut statement =
                connection
                    .prepare_cached(USER_INTERESTS_SQL)
                    .map_err(|source| SqliteStoreError::Query {
                        operation: "prepare viewer interest lookup",
                        source,
                    })?;
            let names = statement
                .query_map([user_id], |row| row.get::<_, String>(0))
                .and_then(Iterator::collect::<Result<Vec<_>, _>>)
                .map_err(|source| SqliteStoreError::Query {
                    operation: "read viewer interests",
                    source,
                })?;
            // Blank viewer tags carry no meaning; skip rather than fail the request.
            Ok(names
                .into_iter()
                .filter_map(|name| InterestTag::new(name).ok())
                .collect())
        })
    }

    fn load_joined(
        &self,
        user: UserId,
        kind: ItemKind,
    ) -> Result<BTreeSet<ItemId>, SqliteStoreError> {
        let user_id = user_param(user)?;
        let sql = match kind {
            ItemKind::Club => JOINED_CLUBS_SQL,
            ItemKind::Event => JOINED_EVENTS_SQL,
            ItemKind::Post => JOINED_POSTS_SQL,
        };
        self.with_connection(|connection| {
            let mut statement =
                connection
                    .prepare_cached(sql)
                    .map_err(|source| SqliteStoreError::Query {
                        operation: "prepare joined item lookup",
                        source,
                    })?;
            let raw_ids = statement
                .query_map([user_id], |row| row.get::<_, i64>(0))
                .and_then(Iterator::collect::<Result<Vec<_>, _>>)
                .map_err(|source| SqliteStoreError::Query {
                    operation: "read joined items",
                    source,
                })?;
            raw_ids.into_iter().map(item_id).collect()
        })
    }
}

impl CatalogueStore for SqliteStore {
    fn items(&self, kind: ItemKind) -> Result<Vec<BrowsableItem<ItemRecord>>, StoreError> {
        Ok(self.load_items(kind)?)
    }
}

impl ViewerStore for SqliteStore {
    fn interests(&self, user: UserId) -> Result<InterestProfile, StoreError> {
        Ok(self.load_interests(user)?)
    }

    fn joined_items(&self, user: UserId, kind: ItemKind) -> Result<BTreeSet<ItemId>, StoreError> {
        Ok(self.load_joined(user, kind)?)
    }
}

fn table_exists(connection: &Connection, table: &str) -> Result<bool, SqliteStoreError> {
    connection
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1)",
            [table],
            |row| row.get(0),
        )
        .map_err(|source| SqliteStoreError::Query {
            operation: "probe schema",
            source,
        })
}

fn query_rows(
    connection: &Connection,
    sql: &str,
    operation: &'static str,
    map: fn(&Row<'_>) -> rusqlite::Result<(i64, ItemRecord)>,
) -> Result<Vec<(i64, ItemRecord)>, SqliteStoreError> {
    let mut statement = connection
        .prepare_cached(sql)
        .map_err(|source| SqliteStoreError::Query { operation, source })?;
    statement
        .query_map([], map)
        .and_then(Iterator::collect::<Result<Vec<_>, _>>)
        .map_err(|source| SqliteStoreError::Query { operation, source })
}

fn load_club_interests(
    connection: &Connection,
) -> Result<HashMap<i64, InterestProfile>, SqliteStoreError> {
    let mut statement = connection
        .prepare_cached(CLUB_INTERESTS_SQL)
        .map_err(|source| SqliteStoreError::Query {
            operation: "prepare club interest lookup",
            source,
        })?;
    let rows = statement
        .query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)))
        .and_then(Iterator::collect::<Result<Vec<_>, _>>)
        .map_err(|source| SqliteStoreError::Query {
            operation: "read club interests",
            source,
        })?;

    let mut by_club: HashMap<i64, InterestProfile> = HashMap::new();
    for (club_id, name) in rows {
        let tag = InterestTag::new(name).map_err(|_| SqliteStoreError::InvalidTag { club_id })?;
        by_club.entry(club_id).or_default().insert(tag);
    }
    Ok(by_club)
}

fn club_row(row: &Row<'_>) -> rusqlite::Result<(i64, ItemRecord)> {
    let club = Club {
        name: row.get(1)?,
        description: row.get(2)?,
    };
    Ok((row.get(0)?, club.into()))
}

fn event_row(row: &Row<'_>) -> rusqlite::Result<(i64, ItemRecord)> {
    let club_id: i64 = row.get(1)?;
    let event = Event {
        club_id: ItemId(club_id.cast_unsigned()),
        title: row.get(2)?,
        description: row.get(3)?,
        starts_at: row.get(4)?,
    };
    Ok((row.get(0)?, event.into()))
}

fn post_row(row: &Row<'_>) -> rusqlite::Result<(i64, ItemRecord)> {
    let club_id: i64 = row.get(1)?;
    let post = Post {
        club_id: ItemId(club_id.cast_unsigned()),
        title: row.get(2)?,
        body: row.get(3)?,
        created_at: row.get(4)?,
    };
    Ok((row.get(0)?, post.into()))
}

fn item_id(raw: i64) -> Result<ItemId, SqliteStoreError> {
    u64::try_from(raw)
        .map(ItemId)
        .map_err(|_| SqliteStoreError::IdOutOfRange {
            raw: i128::from(raw),
        })
}

const fn club_key(club: ItemId) -> i64 {
    club.0.cast_signed()
}

fn user_param(user: UserId) -> Result<i64, SqliteStoreError> {
    i64::try_from(user.0).map_err(|_| SqliteStoreError::IdOutOfRange {
        raw: i128::from(user.0),
    })
}
