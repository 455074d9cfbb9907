use std::time::Duration;

use brainyquote_core::QuoteSelectors;

use crate::fetcher::RetryPolicy;

pub(crate) const DEFAULT_BASE_URL: &str = "http://www.brainyquote.com/";

/// Пауза между попытками при rate limit
pub(crate) const RETRY_INTERVAL: Duration = Duration::from_secs(3);
/// Запросов на один URL, включая первый
pub(crate) const MAX_ATTEMPTS: usize = 10;

/// Вежливая пауза между последовательными запросами разных тем
pub(crate) const COURTESY_DELAY: Duration = Duration::from_secs(2);

pub(crate) const HTTP_TIMEOUT: Duration = Duration::from_secs(30);
pub(crate) const USER_AGENT: &str = concat!("brainyquote-fetch/", env!("CARGO_PKG_VERSION"));

/// Шаг, с которым "спящий" поток проверяет флаг shutdown
pub(crate) const SHUTDOWN_TICK: Duration = Duration::from_millis(100);

/// Маркер ответа "слишком много запросов" в теле страницы
pub(crate) const RATE_LIMIT_MARKER: &str = "Too many requests";

/// Настройки клиента.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Корень сайта, к нему добавляются `topics/...`, `authors/...`
    pub base_url: String,
    /// Политика повторов при rate limit
    pub retry: RetryPolicy,
    /// Пауза между темами при последовательном обходе
    pub courtesy_delay: Duration,
    /// Таймаут одного HTTP-запроса
    pub http_timeout: Duration,
    /// User-Agent
    pub user_agent: String,
    /// Селекторы списка цитат
    pub selectors: QuoteSelectors,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            retry: RetryPolicy::default(),
            courtesy_delay: COURTESY_DELAY,
            http_timeout: HTTP_TIMEOUT,
            user_agent: USER_AGENT.to_string(),
            selectors: QuoteSelectors::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_timings() {
        let cfg = ClientConfig::default();
        assert_eq!(cfg.retry.interval, Duration::from_secs(3));
        assert_eq!(cfg.retry.max_attempts, 10);
        assert_eq!(cfg.courtesy_delay, Duration::from_secs(2));
        assert_eq!(cfg.base_url, "http://www.brainyquote.com/");
        assert!(cfg.user_agent.starts_with("brainyquote-fetch/"));
    }
}
