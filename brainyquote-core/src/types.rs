use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_QUOTE_AUTHOR, DEFAULT_QUOTE_CONTENT, DEFAULT_QUOTE_TOPIC};
use crate::format::Format;

/// Цитата. После создания не меняется: поля закрыты, наружу только чтение.
///
/// Пустая `topic` означает "без категории", пустой `author` - "автор неизвестен".
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Quote {
    content: String,
    topic: String,
    author: String,
    info: String,
}

impl Quote {
    /// Цитата без темы и доп. информации
    pub fn new(content: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            author: author.into(),
            ..Self::default()
        }
    }

    /// Копия с указанной темой
    pub fn with_topic(self, topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            ..self
        }
    }

    /// Копия с указанной доп. информацией
    pub fn with_info(self, info: impl Into<String>) -> Self {
        Self {
            info: info.into(),
            ..self
        }
    }

    /// Запасная цитата, когда ничего найти не удалось
    pub fn default_quote() -> Self {
        Self::new(DEFAULT_QUOTE_CONTENT, DEFAULT_QUOTE_AUTHOR).with_topic(DEFAULT_QUOTE_TOPIC)
    }

    /// Текст цитаты
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Тема
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Автор (уже нормализованный, если цитата пришла из HTML)
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Произвольная доп. информация
    pub fn info(&self) -> &str {
        &self.info
    }

    /// Ключ для дедупликации: `(content, author)`
    pub fn dedup_key(&self) -> (&str, &str) {
        (&self.content, &self.author)
    }

    /// Разбивка на строки по 7 слов
    pub fn pretty(&self) -> String {
        self.render(Format::pretty())
    }
}

/// `{content} --- {author}`
impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(Format::Tight))
    }
}

/// `Quote (topic): {content} --- {author}`
impl fmt::Debug for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Quote ({}): {}", self.topic, self)
    }
}
