//! # brainyquote-fetch
//!
//! Загрузка страниц BrainyQuote и поиск цитат поверх `brainyquote-core`.
//!
//! - [`transport`] — один GET-запрос ([`HttpTransport`] на `reqwest::blocking`)
//! - [`ratelimit`] — как понять, что сервер нас притормозил
//! - [`fetcher`] — повторы с фиксированной паузой
//! - [`lookup`] — `find_all` / `find` / `random` / `today`
//! - каталоги тем и авторов, параллельный обход тем
//!
//! Всё синхронное: запросы и паузы блокируют вызывающий поток.
//! Прервать ожидание можно флагом shutdown ([`QuoteClient::with_shutdown`]).
//!
//! ```no_run
//! use brainyquote_fetch::{ClientConfig, Query, QuoteClient};
//!
//! let client = QuoteClient::connect(ClientConfig::default())?;
//! let quote = client.random(&Query::topic("love"))?;
//! println!("{quote}");
//! # Ok::<(), brainyquote_fetch::LookupError>(())
//! ```

#![forbid(unsafe_code)]

mod batch;
mod catalog;
mod config;

/// Ошибки `brainyquote-fetch`.
pub mod error;
/// Загрузка страниц с повторами.
pub mod fetcher;
/// Поиск цитат.
pub mod lookup;
/// Детект rate limit.
pub mod ratelimit;
/// HTTP-транспорт.
pub mod transport;

#[cfg(test)]
mod testing;

pub use crate::config::ClientConfig;
pub use crate::error::{ConfigError, FetchError, LookupError, TransportError};
pub use crate::fetcher::{Fetcher, RetryPolicy};
pub use crate::lookup::{Query, QuoteClient, TopicFilter};
pub use crate::ratelimit::{BodyMarker, RateLimitDetector, StatusCode};
pub use crate::transport::{HttpTransport, Page, Transport};
