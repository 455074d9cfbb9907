//! # brainyquote-core
//!
//! Базовые типы и разбор страниц для клиента BrainyQuote.
//!
//! Этот крейт содержит:
//!
//! - [`types`] — доменный тип [`Quote`]
//! - [`format`] — отрисовка цитаты в текст, HTML и XML
//! - [`names`] — нормализация имён авторов
//! - [`extract`] — разбор HTML: список цитат, темы, авторы, цитата дня
//! - [`bank`] — локальный банк цитат в YAML
//! - [`error`] — типы ошибок, которые возвращают компоненты `brainyquote-core`
//!
//! ## Быстрый пример: отрисовка
//!
//! ```rust
//! use brainyquote_core::{Format, Quote};
//!
//! let q = Quote::new("Hi there", "A B");
//! assert_eq!(q.render(Format::Tight), "Hi there --- A B");
//! assert_eq!(q.to_string(), "Hi there --- A B");
//! assert_eq!(q.render("content".parse().unwrap()), "Hi there");
//! ```
//!
//! ## Пример: разбор списка цитат
//!
//! ```rust
//! use brainyquote_core::extract::{QuoteSelectors, extract_quotes};
//!
//! let html = r#"<div id="quotesList">
//!   <div><a title="view quote">Hi</a><a title="view author">e. e. cummings</a></div>
//! </div>"#;
//!
//! let selectors = QuoteSelectors::default().compile().unwrap();
//! let quotes = extract_quotes(html, &selectors);
//! assert_eq!(quotes.len(), 1);
//! assert_eq!(quotes[0].author(), "E. E. Cummings");
//! ```
//!
//! ## Дизайн
//!
//! Как и раньше, core - "нулевая" зависимость для остальных крейтов:
//! чистые типы, парсинг и форматирование, без сети и без runtime.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Доменный тип цитаты.
pub mod types;

/// Форматы вывода цитаты.
pub mod format;

/// Нормализация имён авторов.
pub mod names;

/// Разбор HTML-страниц.
pub mod extract;

/// Банк цитат (YAML).
pub mod bank;

/// Ошибки `brainyquote-core`.
pub mod error;

/// Общие константы
mod constants;
pub use constants::{
    DEFAULT_QUOTE_AUTHOR, DEFAULT_QUOTE_CONTENT, DEFAULT_QUOTE_TOPIC, DEFAULT_TOPICS,
    PRETTY_WRAP_WORDS, QUOTE_OF_THE_DAY_SUFFIX, VIEW_AUTHOR_TITLE, VIEW_QUOTE_TITLE,
};

// --- Re-exports (публичный фасад API) ---

pub use crate::error::{BankError, ExtractError};
pub use crate::extract::{CompiledSelectors, QuoteSelectors, TodayLookup};
pub use crate::format::Format;
pub use crate::names::fix;
pub use crate::types::Quote;
