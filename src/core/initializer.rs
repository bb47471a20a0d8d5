//! # Language Initializer Module / 语言初始化模块
//!
//! Seeds (or resets) a language's translation rows from the canonical catalog.
//! The canonical messages are read and deduplicated first; then, inside one
//! transaction, every existing row of the language is deleted and one
//! untranslated row per canonical message is inserted. Any failure rolls the
//! whole batch back, so the previous rows of the language survive intact.
//!
//! 从规范目录初始化（或重置）某种语言的翻译行。先读取并去重规范消息；
//! 然后在一个事务中删除该语言的所有现有行，并为每条规范消息插入一行未翻译的记录。
//! 任何失败都会回滚整个批次，因此该语言之前的行保持不变。

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::core::models::{CanonicalMessage, CatalogName, LanguageCode, Message, dedup_canonical};
use crate::infra::store::{CatalogTransaction, MessageStore, StoreError};

/// Reasons a language could not be initialized.
/// 无法初始化语言的原因。
#[derive(Debug, Error)]
pub enum InitError {
    /// The language code is shorter than two characters. No store access happened.
    #[error("invalid language code `{0}`; valid codes look like `en`, `eng`, `en_US`")]
    InvalidLanguage(String),
    /// The catalog name is not a usable table or model name. No store access happened.
    #[error("invalid model name `{0}`")]
    InvalidCatalog(String),
    /// Reading, deleting or inserting failed; the transaction was rolled back.
    #[error("unable to create messages for \"{language}\": {source}")]
    Persistence {
        language: String,
        #[source]
        source: StoreError,
    },
}

impl InitError {
    /// True for input errors detected before the store was touched.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidLanguage(_) | Self::InvalidCatalog(_))
    }
}

/// The result of a committed initialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitReport {
    pub language: LanguageCode,
    pub catalog: CatalogName,
    /// Rows inserted, one per distinct canonical message.
    pub created: usize,
    /// Rows of the language that existed before and were replaced.
    pub deleted: usize,
}

/// Counts produced by [`seed_language`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeedCounts {
    pub deleted: usize,
    pub inserted: usize,
}

/// Seeds or resets a language's rows from the canonical messages of a store.
pub struct LanguageInitializer<S: MessageStore> {
    store: S,
}

impl<S: MessageStore> LanguageInitializer<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Replaces every row of `language` with untranslated copies of the
    /// distinct canonical messages in `catalog` (the default catalog when `None`).
    ///
    /// Existing translations for the language are discarded. Running it twice
    /// against an unchanged canonical set yields the same rows both times.
    ///
    /// # Errors / 错误
    /// - [`InitError::InvalidLanguage`] / [`InitError::InvalidCatalog`] before any store access
    /// - [`InitError::Persistence`] when the read or the transaction fails; nothing is changed
    pub fn initialize(
        &mut self,
        language: &str,
        catalog: Option<&str>,
    ) -> Result<InitReport, InitError> {
        let language = LanguageCode::parse(language)?;
        let catalog = match catalog {
            Some(name) => CatalogName::parse(name)?,
            None => CatalogName::default(),
        };

        let persistence = |source: StoreError| InitError::Persistence {
            language: language.to_string(),
            source,
        };

        let canonical = self
            .store
            .canonical_messages(&catalog)
            .map_err(persistence)?;
        let read = canonical.len();
        let messages = dedup_canonical(canonical);
        debug!(
            "Seeding {} from {} canonical rows ({} distinct) in {}",
            language,
            read,
            messages.len(),
            catalog
        );

        let mut tx = self.store.begin(&catalog).map_err(persistence)?;
        let counts = match seed_language(tx.as_mut(), &language, &messages) {
            Ok(counts) => {
                tx.commit().map_err(persistence)?;
                counts
            }
            Err(source) => {
                if let Err(rollback_err) = tx.rollback() {
                    warn!("Rollback for {language} failed: {rollback_err}");
                }
                return Err(persistence(source));
            }
        };

        info!(
            "Created {} messages for {} in {} (replaced {})",
            counts.inserted, language, catalog, counts.deleted
        );
        Ok(InitReport {
            language,
            catalog,
            created: counts.inserted,
            deleted: counts.deleted,
        })
    }
}

/// Runs the delete-then-insert batch inside an open transaction.
///
/// Stops at the first failing statement. Committing or rolling back is left to
/// the caller.
pub fn seed_language(
    tx: &mut (dyn CatalogTransaction + '_),
    language: &LanguageCode,
    messages: &[CanonicalMessage],
) -> Result<SeedCounts, StoreError> {
    let deleted = tx.delete_locale(language)?;
    for message in messages {
        tx.insert(&Message::for_language(message, language))?;
    }
    Ok(SeedCounts {
        deleted,
        inserted: messages.len(),
    })
}
