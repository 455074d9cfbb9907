use brainyquote_core::ExtractError;
use thiserror::Error;

/// Ошибки транспорта (сеть, HTTP-клиент)
#[derive(Debug, Error)]
pub enum TransportError {
    /// Не удалось собрать HTTP-клиент
    #[error("failed to build http client: {0}")]
    Build(#[source] reqwest::Error),

    /// Запрос не выполнен (соединение, таймаут, чтение тела)
    #[error("request to {url} failed: {source}")]
    Request {
        /// адрес запроса
        url: String,
        /// исходная ошибка
        #[source]
        source: reqwest::Error,
    },

    /// Ошибка стороннего транспорта
    #[error("request to {url} failed: {reason}")]
    Other {
        /// адрес запроса
        url: String,
        /// причина
        reason: String,
    },
}

/// Ошибки загрузки страницы
#[derive(Debug, Error)]
pub enum FetchError {
    /// Ошибка транспорта
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Сервер ответил не 2xx (и это не rate limit)
    #[error("unexpected status {status} from {url}")]
    Status {
        /// адрес запроса
        url: String,
        /// HTTP статус
        status: u16,
    },

    /// Поднят флаг shutdown во время ожидания
    #[error("fetch cancelled")]
    Cancelled,
}

/// Ошибки конфигурации клиента
#[derive(Debug, Error)]
pub enum ConfigError {
    /// base url не парсится
    #[error("invalid base url {url:?}: {source}")]
    InvalidBaseUrl {
        /// исходная строка
        url: String,
        /// ошибка парсера
        #[source]
        source: url::ParseError,
    },

    /// base url без иерархического пути (`mailto:`, `data:` и т.п.)
    #[error("base url cannot be a base: {0}")]
    CannotBeABase(String),

    /// Селекторы не компилируются
    #[error(transparent)]
    Selectors(#[from] ExtractError),
}

/// Ошибки поиска цитат
#[derive(Debug, Error)]
pub enum LookupError {
    /// Ошибка загрузки страницы (кроме отмены)
    #[error(transparent)]
    Fetch(FetchError),

    /// Ошибка конфигурации
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Ошибка разбора HTML
    #[error(transparent)]
    Extract(#[from] ExtractError),

    /// Ничего не найдено
    #[error("no quotes found")]
    Empty,

    /// Поиск прерван флагом shutdown
    #[error("lookup cancelled")]
    Cancelled,
}

// Отмена на любом шаге поиска - всегда LookupError::Cancelled
impl From<FetchError> for LookupError {
    fn from(e: FetchError) -> Self {
        match e {
            FetchError::Cancelled => Self::Cancelled,
            other => Self::Fetch(other),
        }
    }
}
