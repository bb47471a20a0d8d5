//! # SQLite Message Store / SQLite 消息存储
//!
//! [`MessageStore`] backed by a single SQLite connection. Catalog tables are
//! created on demand by [`SqliteMessageStore::ensure_catalog`]; there is no
//! migration of existing tables.
//!
//! 由单个 SQLite 连接支持的 [`MessageStore`]。目录表通过
//! [`SqliteMessageStore::ensure_catalog`] 按需创建，不会迁移已有的表。

use rusqlite::{Connection, Transaction, TransactionBehavior, params};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::models::{CANONICAL_LOCALE, CanonicalMessage, CatalogName, LanguageCode, Message};
use crate::infra::store::{CatalogTransaction, MessageStore, StoreError};

/// A message catalog stored in SQLite.
#[derive(Debug)]
pub struct SqliteMessageStore {
    /// Path of the database file, or `:memory:`
    path: PathBuf,
    conn: Connection,
}

impl SqliteMessageStore {
    /// Opens (or creates) the database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        debug!("Opening message catalog database {}", path.display());
        let conn = Connection::open(&path)?;
        Ok(Self { path, conn })
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        debug!("Opening in-memory message catalog database");
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            path: PathBuf::from(":memory:"),
            conn,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the catalog table and its identity index when the table is missing.
    ///
    /// An existing table is left exactly as it is, even when it lacks the index
    /// or already holds duplicate canonical rows.
    pub fn ensure_catalog(&self, catalog: &CatalogName) -> Result<(), StoreError> {
        let table = catalog.as_str();
        if self.catalog_exists(catalog)? {
            debug!("Catalog table {table} already exists");
            return Ok(());
        }

        debug!("Creating catalog table {table}");
        self.conn.execute_batch(&format!(
            "CREATE TABLE IF NOT EXISTS {table} (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                domain TEXT NOT NULL,
                locale TEXT NOT NULL DEFAULT '',
                singular TEXT NOT NULL,
                plural TEXT,
                context TEXT,
                value_0 TEXT,
                value_1 TEXT,
                value_2 TEXT
            );
            CREATE UNIQUE INDEX IF NOT EXISTS {table}_identity
                ON {table} (locale, domain, singular, IFNULL(context, ''));"
        ))?;
        Ok(())
    }

    pub fn catalog_exists(&self, catalog: &CatalogName) -> Result<bool, StoreError> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
            params![catalog.as_str()],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Adds a canonical (locale-less) row, the way an extractor populates the catalog.
    pub fn insert_canonical(
        &self,
        catalog: &CatalogName,
        message: &CanonicalMessage,
    ) -> Result<(), StoreError> {
        self.conn.execute(
            &format!(
                "INSERT INTO {} (domain, locale, singular, plural, context)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                catalog.as_str()
            ),
            params![
                message.domain,
                CANONICAL_LOCALE,
                message.singular,
                message.plural,
                message.context
            ],
        )?;
        Ok(())
    }

    /// Counts the rows stored under `locale`.
    pub fn count_locale(&self, catalog: &CatalogName, locale: &str) -> Result<usize, StoreError> {
        let count: i64 = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM {} WHERE locale = ?1", catalog.as_str()),
            params![locale],
            |row| row.get(0),
        )?;
        usize::try_from(count).map_err(|e| StoreError::Backend(e.to_string()))
    }

    /// Returns the rows stored under `locale`, ordered by identity.
    pub fn messages_for_locale(
        &self,
        catalog: &CatalogName,
        locale: &str,
    ) -> Result<Vec<Message>, StoreError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT domain, singular, plural, context, locale FROM {}
             WHERE locale = ?1
             ORDER BY domain, singular, IFNULL(context, '')",
            catalog.as_str()
        ))?;
        let rows = stmt.query_map(params![locale], |row| {
            Ok(Message {
                domain: row.get(0)?,
                singular: row.get(1)?,
                plural: row.get(2)?,
                context: row.get(3)?,
                locale: row.get(4)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Gives direct access to the connection, e.g. to install triggers in tests.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl MessageStore for SqliteMessageStore {
    fn canonical_messages(
        &mut self,
        catalog: &CatalogName,
    ) -> Result<Vec<CanonicalMessage>, StoreError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT domain, singular, plural, context FROM {}
             WHERE locale = ?1
             ORDER BY id",
            catalog.as_str()
        ))?;
        let rows = stmt.query_map(params![CANONICAL_LOCALE], |row| {
            Ok(CanonicalMessage {
                domain: row.get(0)?,
                singular: row.get(1)?,
                plural: row.get(2)?,
                context: row.get(3)?,
            })
        })?;
        let messages = rows.collect::<Result<Vec<_>, _>>()?;
        debug!("Read {} canonical rows from {catalog}", messages.len());
        Ok(messages)
    }

    fn begin(
        &mut self,
        catalog: &CatalogName,
    ) -> Result<Box<dyn CatalogTransaction + '_>, StoreError> {
        // Take the write lock up front so a second writer waits instead of
        // interleaving with the delete.
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        Ok(Box::new(SqliteTransaction {
            tx,
            table: catalog.as_str().to_string(),
        }))
    }
}

struct SqliteTransaction<'conn> {
    tx: Transaction<'conn>,
    table: String,
}

impl CatalogTransaction for SqliteTransaction<'_> {
    fn delete_locale(&mut self, locale: &LanguageCode) -> Result<usize, StoreError> {
        let deleted = self.tx.execute(
            &format!("DELETE FROM {} WHERE locale = ?1", self.table),
            params![locale.as_str()],
        )?;
        Ok(deleted)
    }

    fn insert(&mut self, message: &Message) -> Result<(), StoreError> {
        self.tx.execute(
            &format!(
                "INSERT INTO {} (domain, locale, singular, plural, context)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                self.table
            ),
            params![
                message.domain,
                message.locale,
                message.singular,
                message.plural,
                message.context
            ],
        )?;
        Ok(())
    }

    fn commit(self: Box<Self>) -> Result<(), StoreError> {
        let SqliteTransaction { tx, .. } = *self;
        tx.commit()?;
        Ok(())
    }

    fn rollback(self: Box<Self>) -> Result<(), StoreError> {
        let SqliteTransaction { tx, .. } = *self;
        tx.rollback()?;
        Ok(())
    }
}
