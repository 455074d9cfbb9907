use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use rand::Rng;
use rand::seq::IndexedRandom;

use crate::error::BankError;
use crate::types::Quote;

/// Чтение банка цитат: YAML-список записей `{content, topic, author, info}`.
/// Отсутствующие поля - пустые строки, лишние игнорируются.
pub fn read_bank<R: io::Read>(reader: R) -> Result<Vec<Quote>, BankError> {
    let quotes: Vec<Quote> = serde_yaml::from_reader(BufReader::new(reader))?;
    Ok(quotes)
}

/// Чтение банка цитат из файла
pub fn read_bank_from_path(path: impl AsRef<Path>) -> Result<Vec<Quote>, BankError> {
    let path = path.as_ref();
    let f = File::open(path).map_err(|e| BankError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;
    read_bank(f)
}

/// Оставляет цитаты заданной темы (без учёта регистра). `None` - все.
pub fn filter_topic(quotes: Vec<Quote>, topic: Option<&str>) -> Vec<Quote> {
    match topic {
        Some(t) => quotes
            .into_iter()
            .filter(|q| q.topic().eq_ignore_ascii_case(t))
            .collect(),
        None => quotes,
    }
}

/// Случайная цитата из банка (с опциональным фильтром по теме)
pub fn choose_from_bank<R: Rng + ?Sized>(
    path: impl AsRef<Path>,
    topic: Option<&str>,
    rng: &mut R,
) -> Result<Quote, BankError> {
    let quotes = filter_topic(read_bank_from_path(path)?, topic);
    quotes.choose(rng).cloned().ok_or(BankError::Empty)
}
