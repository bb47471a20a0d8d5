//! # Data Models Module / 数据模型模块
//!
//! This module defines the typed records that flow between the message store,
//! the language initializer and the dispatcher: catalog rows, canonical
//! message projections, and validated language and catalog names.
//!
//! 此模块定义了在消息存储、语言初始化器和分发器之间流转的类型化记录：
//! 目录行、规范消息投影，以及经过验证的语言代码和目录名称。

use std::collections::HashSet;
use std::fmt;

use crate::core::initializer::InitError;

/// Locale value carried by canonical (untranslated, extractor-owned) rows.
/// 规范（未翻译、由提取器维护）行所使用的区域设置值。
pub const CANONICAL_LOCALE: &str = "";

/// Catalog used when no model name is supplied.
/// 未提供模型名称时使用的目录。
pub const DEFAULT_CATALOG: &str = "i18n_messages";

/// The minimum number of characters in a language code (`en`, `eng`, `en_US`).
pub const MIN_LANGUAGE_CODE_LEN: usize = 2;

/// A single row of the message catalog.
///
/// Within one `locale` the triple `(domain, singular, context)` is unique.
///
/// 消息目录中的一行。在同一个 `locale` 内，`(domain, singular, context)` 三元组是唯一的。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Namespace grouping related messages / 分组相关消息的命名空间
    pub domain: String,
    /// Source text, singular form / 源文本（单数形式）
    pub singular: String,
    /// Source text, plural form / 源文本（复数形式）
    pub plural: Option<String>,
    /// Disambiguation string / 消歧义字符串
    pub context: Option<String>,
    /// Language code this row applies to / 此行适用的语言代码
    pub locale: String,
}

impl Message {
    /// Builds the untranslated per-language copy of a canonical message.
    pub fn for_language(message: &CanonicalMessage, language: &LanguageCode) -> Self {
        Self {
            domain: message.domain.clone(),
            singular: message.singular.clone(),
            plural: message.plural.clone(),
            context: message.context.clone(),
            locale: language.as_str().to_string(),
        }
    }

    /// Returns the identity of this row within its locale.
    pub fn identity(&self) -> MessageIdentity<'_> {
        MessageIdentity::new(&self.domain, &self.singular, self.context.as_deref())
    }
}

/// The `(domain, singular, plural, context)` projection of a canonical row.
/// 规范行的 `(domain, singular, plural, context)` 投影。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalMessage {
    pub domain: String,
    pub singular: String,
    pub plural: Option<String>,
    pub context: Option<String>,
}

impl CanonicalMessage {
    pub fn new(domain: impl Into<String>, singular: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            singular: singular.into(),
            plural: None,
            context: None,
        }
    }

    pub fn with_plural(mut self, plural: impl Into<String>) -> Self {
        self.plural = Some(plural.into());
        self
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn identity(&self) -> MessageIdentity<'_> {
        MessageIdentity::new(&self.domain, &self.singular, self.context.as_deref())
    }
}

/// Identity of a translatable message: `(domain, singular, context)`.
///
/// An absent context and an empty context are the same identity, matching how
/// the catalog's unique index treats `NULL` and `''`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageIdentity<'a> {
    pub domain: &'a str,
    pub singular: &'a str,
    pub context: &'a str,
}

impl<'a> MessageIdentity<'a> {
    fn new(domain: &'a str, singular: &'a str, context: Option<&'a str>) -> Self {
        Self {
            domain,
            singular,
            context: context.unwrap_or(""),
        }
    }
}

/// Collapses canonical messages sharing an identity into one representative.
///
/// The first row seen for each `(domain, singular, context)` wins, so the
/// store's ordering decides which `plural` survives. Output order follows
/// the input order of the surviving rows.
///
/// 将共享同一标识的规范消息合并为一个代表。每个 `(domain, singular, context)`
/// 以首次出现的行为准，输出顺序与输入中保留行的顺序一致。
pub fn dedup_canonical(messages: Vec<CanonicalMessage>) -> Vec<CanonicalMessage> {
    let mut seen: HashSet<(String, String, String)> = HashSet::with_capacity(messages.len());
    messages
        .into_iter()
        .filter(|message| {
            let identity = message.identity();
            seen.insert((
                identity.domain.to_string(),
                identity.singular.to_string(),
                identity.context.to_string(),
            ))
        })
        .collect()
}

/// A validated target language code such as `en`, `eng` or `en_US`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LanguageCode(String);

impl LanguageCode {
    /// Validates an operator-supplied language code.
    ///
    /// Surrounding whitespace is ignored; the remainder must be at least
    /// [`MIN_LANGUAGE_CODE_LEN`] characters long.
    pub fn parse(raw: &str) -> Result<Self, InitError> {
        let code = raw.trim();
        if code.chars().count() < MIN_LANGUAGE_CODE_LEN {
            return Err(InitError::InvalidLanguage(raw.to_string()));
        }
        Ok(Self(code.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The name of the catalog table holding message rows.
///
/// Accepts either a table name (`i18n_messages`) or a model-style name
/// (`I18nMessages`), which is converted to snake case. The result is always a
/// plain SQL identifier, so it is safe to splice into statements.
///
/// 保存消息行的目录表名称。接受表名（`i18n_messages`）或模型风格名称
/// （`I18nMessages`，会被转换为蛇形命名）。结果始终是普通 SQL 标识符。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CatalogName(String);

impl CatalogName {
    pub fn parse(raw: &str) -> Result<Self, InitError> {
        let table = to_snake_case(raw.trim());
        let mut chars = table.chars();
        let valid_head = chars
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
        let valid_tail = chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !valid_head || !valid_tail {
            return Err(InitError::InvalidCatalog(raw.to_string()));
        }
        Ok(Self(table))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CatalogName {
    fn default() -> Self {
        Self(DEFAULT_CATALOG.to_string())
    }
}

impl fmt::Display for CatalogName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Converts `I18nMessages` into `i18n_messages`. Names that are already
/// snake case pass through unchanged.
fn to_snake_case(name: &str) -> String {
    let mut snake = String::with_capacity(name.len() + 4);
    let mut prev: Option<char> = None;

    for c in name.chars() {
        if c.is_ascii_uppercase() {
            // A word boundary follows a lowercase letter or a digit
            if prev.is_some_and(|p| p.is_ascii_lowercase() || p.is_ascii_digit()) {
                snake.push('_');
            }
            snake.push(c.to_ascii_lowercase());
        } else {
            snake.push(c);
        }
        prev = Some(c);
    }

    snake
}
