//! # Message Store Module / 消息存储模块
//!
//! The repository abstraction over the message catalog table. Reads return
//! the canonical projection; writes go through an explicit transaction handle
//! that the caller commits or rolls back.
//!
//! 消息目录表的仓库抽象。读取返回规范投影；写入通过显式事务句柄进行，
//! 由调用方提交或回滚。

use thiserror::Error;

use crate::core::models::{CanonicalMessage, CatalogName, LanguageCode, Message};

/// Failures raised by a message store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("store error: {0}")]
    Backend(String),
}

/// Read access and transactional write batches over the message catalog.
/// 对消息目录的读取访问和事务性写入批次。
pub trait MessageStore {
    /// Returns the `(domain, singular, plural, context)` projection of every
    /// canonical row in `catalog`, in store order. Duplicates are allowed.
    fn canonical_messages(&mut self, catalog: &CatalogName)
    -> Result<Vec<CanonicalMessage>, StoreError>;

    /// Opens an atomic write batch against `catalog`.
    fn begin(
        &mut self,
        catalog: &CatalogName,
    ) -> Result<Box<dyn CatalogTransaction + '_>, StoreError>;
}

/// An open write batch. Dropping it without calling [`commit`] discards
/// every change made through it.
///
/// [`commit`]: CatalogTransaction::commit
pub trait CatalogTransaction {
    /// Deletes every row whose locale equals `locale`, returning the count.
    fn delete_locale(&mut self, locale: &LanguageCode) -> Result<usize, StoreError>;

    fn insert(&mut self, message: &Message) -> Result<(), StoreError>;

    fn commit(self: Box<Self>) -> Result<(), StoreError>;

    fn rollback(self: Box<Self>) -> Result<(), StoreError>;
}

impl<T: MessageStore + ?Sized> MessageStore for &mut T {
    fn canonical_messages(
        &mut self,
        catalog: &CatalogName,
    ) -> Result<Vec<CanonicalMessage>, StoreError> {
        (**self).canonical_messages(catalog)
    }

    fn begin(
        &mut self,
        catalog: &CatalogName,
    ) -> Result<Box<dyn CatalogTransaction + '_>, StoreError> {
        (**self).begin(catalog)
    }
}
