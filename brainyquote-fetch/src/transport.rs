use log::debug;
use url::Url;

use crate::config::ClientConfig;
use crate::error::TransportError;

/// Ответ сервера: статус и тело как текст.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// HTTP статус
    pub status: u16,
    /// тело ответа
    pub body: String,
}

impl Page {
    /// Ответ 200 с телом
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    /// Статус 2xx
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Один GET-запрос без повторов. Повторы делает [`crate::Fetcher`].
pub trait Transport: Send + Sync {
    /// Выполнить GET и вернуть ответ с любым статусом
    fn get(&self, url: &Url) -> Result<Page, TransportError>;
}

/// Блокирующий HTTP-транспорт на `reqwest`.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    /// Клиент с User-Agent и таймаутом из конфига
    pub fn new(cfg: &ClientConfig) -> Result<Self, TransportError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(cfg.user_agent.as_str())
            .timeout(cfg.http_timeout)
            .build()
            .map_err(TransportError::Build)?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &Url) -> Result<Page, TransportError> {
        let request_err = |source| TransportError::Request {
            url: url.to_string(),
            source,
        };

        let resp = self.client.get(url.clone()).send().map_err(request_err)?;
        let status = resp.status().as_u16();
        let body = resp.text().map_err(request_err)?;

        debug!("GET {url} -> {status} ({} bytes)", body.len());
        Ok(Page { status, body })
    }
}
