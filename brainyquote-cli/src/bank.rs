use std::path::{Path, PathBuf};

use brainyquote_core::bank::{choose_from_bank, filter_topic, read_bank_from_path};
use brainyquote_core::{BankError, Quote};
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum BankCmdError {
    #[error(transparent)]
    Bank(#[from] BankError),

    #[error("no quotes in {path:?}")]
    EmptyFile { path: PathBuf },

    #[error("no quotes with topic {topic:?} in {path:?}")]
    EmptyTopic { path: PathBuf, topic: String },
}

pub(crate) type Result<T> = std::result::Result<T, BankCmdError>;

/// Загружает банк и применяет фильтр по теме; пустой результат - ошибка.
pub(crate) fn load_bank(path: impl AsRef<Path>, topic: Option<&str>) -> Result<Vec<Quote>> {
    let path = path.as_ref().to_path_buf();

    let all = read_bank_from_path(&path)?;
    if all.is_empty() {
        return Err(BankCmdError::EmptyFile { path });
    }

    let quotes = filter_topic(all, topic);
    match topic {
        Some(t) if quotes.is_empty() => Err(BankCmdError::EmptyTopic {
            path,
            topic: t.to_string(),
        }),
        _ => Ok(quotes),
    }
}

/// Одна случайная цитата из банка (с фильтром по теме)
pub(crate) fn pick_random(path: impl AsRef<Path>, topic: Option<&str>) -> Result<Quote> {
    let path = path.as_ref();
    choose_from_bank(path, topic, &mut rand::rng()).map_err(|e| match (e, topic) {
        (BankError::Empty, Some(t)) => BankCmdError::EmptyTopic {
            path: path.to_path_buf(),
            topic: t.to_string(),
        },
        (BankError::Empty, None) => BankCmdError::EmptyFile {
            path: path.to_path_buf(),
        },
        (other, _) => other.into(),
    })
}
