// Shared test helpers for integration tests
#![allow(dead_code)]

use std::collections::VecDeque;
use std::io;

use i18n_catalog::infra::console::Console;
use i18n_catalog::infra::extractor::{ExtractError, ExtractReport, Extractor};
use i18n_catalog::infra::sqlite::SqliteMessageStore;
use i18n_catalog::infra::store::{CatalogTransaction, MessageStore, StoreError};
use i18n_catalog::models::{CANONICAL_LOCALE, CanonicalMessage, CatalogName, LanguageCode, Message};

/// A console that answers prompts from a fixed script and records all output.
pub struct ScriptedConsole {
    inputs: VecDeque<String>,
    pub out: Vec<String>,
    pub err: Vec<String>,
    pub prompts: Vec<String>,
}

impl ScriptedConsole {
    pub fn new(inputs: &[&str]) -> Self {
        Self {
            inputs: inputs.iter().map(|s| s.to_string()).collect(),
            out: Vec::new(),
            err: Vec::new(),
            prompts: Vec::new(),
        }
    }

    pub fn out_text(&self) -> String {
        self.out.join("\n")
    }

    pub fn err_text(&self) -> String {
        self.err.join("\n")
    }

    pub fn remaining_inputs(&self) -> usize {
        self.inputs.len()
    }

    fn next_input(&mut self, prompt: &str) -> io::Result<String> {
        self.prompts.push(prompt.to_string());
        self.inputs
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "script exhausted"))
    }
}

impl Console for ScriptedConsole {
    fn out(&mut self, line: &str) {
        self.out.push(line.to_string());
    }

    fn err(&mut self, line: &str) {
        self.err.push(line.to_string());
    }

    fn ask_choice(&mut self, prompt: &str, _choices: &[&str]) -> io::Result<String> {
        self.next_input(prompt)
    }

    fn ask(&mut self, prompt: &str) -> io::Result<String> {
        self.next_input(prompt)
    }
}

/// An in-memory store that counts every operation and can be told to fail.
///
/// Transactions work on a staged copy of the rows; only `commit` publishes it.
/// No uniqueness is enforced, so duplicate canonical identities can be stored.
#[derive(Debug, Default)]
pub struct RecordingStore {
    pub rows: Vec<Message>,
    pub canonical_reads: usize,
    pub begins: usize,
    pub deletes: usize,
    pub inserts: usize,
    pub commits: usize,
    pub rollbacks: usize,
    /// Fail the n-th insert (1-based) of a transaction.
    pub fail_on_insert: Option<usize>,
    pub fail_read: bool,
}

impl RecordingStore {
    pub fn with_canonical(messages: &[CanonicalMessage]) -> Self {
        let rows = messages
            .iter()
            .map(|m| Message {
                domain: m.domain.clone(),
                singular: m.singular.clone(),
                plural: m.plural.clone(),
                context: m.context.clone(),
                locale: CANONICAL_LOCALE.to_string(),
            })
            .collect();
        Self {
            rows,
            ..Self::default()
        }
    }

    pub fn push_row(&mut self, message: Message) {
        self.rows.push(message);
    }

    pub fn locale_rows(&self, locale: &str) -> Vec<Message> {
        self.rows
            .iter()
            .filter(|m| m.locale == locale)
            .cloned()
            .collect()
    }

    pub fn touched(&self) -> bool {
        self.canonical_reads + self.begins + self.deletes + self.inserts > 0
    }
}

impl MessageStore for RecordingStore {
    fn canonical_messages(
        &mut self,
        _catalog: &CatalogName,
    ) -> Result<Vec<CanonicalMessage>, StoreError> {
        self.canonical_reads += 1;
        if self.fail_read {
            return Err(StoreError::Backend("read failed".to_string()));
        }
        Ok(self
            .rows
            .iter()
            .filter(|m| m.locale == CANONICAL_LOCALE)
            .map(|m| CanonicalMessage {
                domain: m.domain.clone(),
                singular: m.singular.clone(),
                plural: m.plural.clone(),
                context: m.context.clone(),
            })
            .collect())
    }

    fn begin(
        &mut self,
        _catalog: &CatalogName,
    ) -> Result<Box<dyn CatalogTransaction + '_>, StoreError> {
        self.begins += 1;
        Ok(Box::new(RecordingTransaction {
            staged: self.rows.clone(),
            inserted: 0,
            store: self,
        }))
    }
}

struct RecordingTransaction<'a> {
    staged: Vec<Message>,
    inserted: usize,
    store: &'a mut RecordingStore,
}

impl CatalogTransaction for RecordingTransaction<'_> {
    fn delete_locale(&mut self, locale: &LanguageCode) -> Result<usize, StoreError> {
        self.store.deletes += 1;
        let before = self.staged.len();
        self.staged.retain(|m| m.locale != locale.as_str());
        Ok(before - self.staged.len())
    }

    fn insert(&mut self, message: &Message) -> Result<(), StoreError> {
        self.store.inserts += 1;
        self.inserted += 1;
        if self.store.fail_on_insert == Some(self.inserted) {
            return Err(StoreError::Backend(format!("insert {} failed", self.inserted)));
        }
        self.staged.push(message.clone());
        Ok(())
    }

    fn commit(self: Box<Self>) -> Result<(), StoreError> {
        let RecordingTransaction { staged, store, .. } = *self;
        store.rows = staged;
        store.commits += 1;
        Ok(())
    }

    fn rollback(mut self: Box<Self>) -> Result<(), StoreError> {
        self.store.rollbacks += 1;
        Ok(())
    }
}

/// What a [`FakeExtractor`] does when invoked.
#[derive(Debug, Clone, Copy)]
pub enum FakeOutcome {
    Completed,
    NotConfigured,
    FailWith(i32),
}

pub struct FakeExtractor {
    pub calls: usize,
    outcome: FakeOutcome,
}

impl FakeExtractor {
    pub fn new(outcome: FakeOutcome) -> Self {
        Self { calls: 0, outcome }
    }
}

impl Extractor for FakeExtractor {
    fn extract(&mut self, console: &mut dyn Console) -> Result<ExtractReport, ExtractError> {
        self.calls += 1;
        match self.outcome {
            FakeOutcome::Completed => {
                console.out("fake extraction done");
                Ok(ExtractReport::Completed)
            }
            FakeOutcome::NotConfigured => Ok(ExtractReport::NotConfigured),
            FakeOutcome::FailWith(code) => Err(ExtractError::Failed {
                command: "fake-extract".to_string(),
                code: Some(code),
            }),
        }
    }
}

/// Four distinct canonical messages.
pub fn sample_canonical() -> Vec<CanonicalMessage> {
    vec![
        CanonicalMessage::new("app", "Hello"),
        CanonicalMessage::new("app", "%d apple").with_plural("%d apples"),
        CanonicalMessage::new("app", "Open").with_context("menu"),
        CanonicalMessage::new("admin", "Hello"),
    ]
}

/// An in-memory SQLite store with the default catalog holding `messages`.
pub fn sqlite_with_canonical(messages: &[CanonicalMessage]) -> SqliteMessageStore {
    let store = SqliteMessageStore::open_in_memory().expect("in-memory database");
    let catalog = CatalogName::default();
    store.ensure_catalog(&catalog).expect("catalog table");
    for message in messages {
        store
            .insert_canonical(&catalog, message)
            .expect("canonical row");
    }
    store
}

/// Adds a translated row directly, bypassing the initializer.
pub fn insert_translated(store: &SqliteMessageStore, locale: &str, singular: &str, value: &str) {
    store
        .connection()
        .execute(
            "INSERT INTO i18n_messages (domain, locale, singular, value_0) VALUES ('app', ?1, ?2, ?3)",
            rusqlite::params![locale, singular, value],
        )
        .expect("translated row");
}

/// Creates an index-less `i18n_messages` table, as an extractor managing its own
/// schema might, holding two canonical `app/Hello` rows that differ only by plural.
pub fn create_unindexed_catalog_with_duplicates(store: &SqliteMessageStore) {
    store
        .connection()
        .execute_batch(
            "CREATE TABLE i18n_messages (
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
            INSERT INTO i18n_messages (domain, locale, singular, plural, context)
                VALUES ('app', '', 'Hello', 'Hellos', '');
            INSERT INTO i18n_messages (domain, locale, singular, plural, context)
                VALUES ('app', '', 'Hello', 'Hi all', '');",
        )
        .expect("unindexed catalog");
}
