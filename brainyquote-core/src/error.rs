use std::path::PathBuf;

use thiserror::Error;

/// Ошибки разбора HTML
#[derive(Debug, Error)]
pub enum ExtractError {
    /// CSS-селектор не парсится
    #[error("invalid selector {selector:?}: {reason}")]
    InvalidSelector {
        /// исходная строка селектора
        selector: String,
        /// сообщение парсера
        reason: String,
    },
}

/// Ошибки банка цитат (YAML)
#[derive(Debug, Error)]
pub enum BankError {
    /// Не удалось прочитать файл
    #[error("failed to read quote bank: {path:?}")]
    ReadFile {
        /// путь к файлу
        path: PathBuf,
        /// исходная ошибка
        #[source]
        source: std::io::Error,
    },

    /// Некорректный YAML
    #[error("malformed quote bank: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// В банке нет ни одной подходящей цитаты
    #[error("quote bank has no matching quotes")]
    Empty,
}
