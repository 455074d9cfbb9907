use brainyquote_core::extract::{extract_authors, extract_popular_topics, extract_topics};

use crate::error::LookupError;
use crate::lookup::QuoteClient;
use crate::transport::Transport;

impl<T: Transport> QuoteClient<T> {
    /// Все темы
    pub fn topics(&self) -> Result<Vec<String>, LookupError> {
        let body = self.fetcher.fetch(&self.endpoint(&["topics"])?)?;
        Ok(extract_topics(&body)?)
    }

    /// Популярные темы
    pub fn popular_topics(&self) -> Result<Vec<String>, LookupError> {
        let body = self.fetcher.fetch(&self.endpoint(&["topics"])?)?;
        Ok(extract_popular_topics(&body)?)
    }

    /// Все авторы
    pub fn authors(&self) -> Result<Vec<String>, LookupError> {
        let body = self.fetcher.fetch(&self.endpoint(&["authors"])?)?;
        Ok(extract_authors(&body)?)
    }
}
