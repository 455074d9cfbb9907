use std::convert::Infallible;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Result, bail};
use brainyquote_core::Format;
use brainyquote_fetch::{ClientConfig, Query, TopicFilter};
use clap::{Args as ClapArgs, Parser, Subcommand};

/// bq - цитаты с BrainyQuote и из локального YAML-банка.
///
/// Сетевые команды делают повторы при rate limit (пауза + ограничение попыток),
/// `Ctrl+C` прерывает ожидание.
#[derive(Parser, Debug, Clone)]
#[command(name = "bq", version, about)]
pub(crate) struct Args {
    /// Формат вывода: default, tight, content, signature, N (слов в строке), html, xml
    #[arg(long, short, global = true, default_value = "default")]
    pub(crate) format: OutputFormat,

    /// Экранировать спецсимволы в html/xml
    #[arg(long, global = true)]
    pub(crate) escape: bool,

    #[command(flatten)]
    pub(crate) net: NetArgs,

    #[command(subcommand)]
    pub(crate) command: Command,
}

/// Переопределения сетевых настроек (по умолчанию - из `ClientConfig::default()`)
#[derive(ClapArgs, Debug, Clone)]
pub(crate) struct NetArgs {
    /// Корень сайта, например http://www.brainyquote.com/
    #[arg(long, global = true)]
    pub(crate) base_url: Option<String>,

    /// Пауза между повторами при rate limit, мс
    #[arg(long, global = true)]
    pub(crate) retry_interval_ms: Option<u64>,

    /// Запросов на страницу, включая первый
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    pub(crate) max_attempts: Option<u64>,

    /// Пауза между темами, мс
    #[arg(long, global = true)]
    pub(crate) delay_ms: Option<u64>,

    /// Таймаут HTTP-запроса, с
    #[arg(long, global = true)]
    pub(crate) timeout_s: Option<u64>,
}

#[derive(Subcommand, Debug, Clone)]
pub(crate) enum Command {
    /// Цитата дня (можно уточнить темой)
    Today {
        /// Тема раздела, например Love; можно несколько раз
        #[arg(long)]
        topic: Vec<String>,
    },

    /// Первая цитата по фильтрам
    Find(FilterArgs),

    /// Случайная цитата по фильтрам
    Random(FilterArgs),

    /// Все цитаты по фильтрам
    All {
        #[command(flatten)]
        filter: FilterArgs,

        /// Сколько тем качать параллельно (только для нескольких --topic)
        #[arg(long, default_value_t = 1)]
        workers: usize,
    },

    /// Список тем
    Topics {
        /// Только популярные
        #[arg(long)]
        popular: bool,
    },

    /// Список авторов
    Authors,

    /// Цитаты из локального YAML-файла
    Bank {
        /// Файл банка: список записей {content, topic, author, info}
        #[arg(long)]
        file: PathBuf,

        /// Только цитаты этой темы
        #[arg(long)]
        topic: Option<String>,

        /// Одна случайная цитата
        #[arg(long)]
        random: bool,
    },
}

#[derive(ClapArgs, Debug, Clone)]
pub(crate) struct FilterArgs {
    /// Тема; несколько --topic обходятся по очереди
    #[arg(long)]
    pub(crate) topic: Vec<String>,

    /// Автор (точное совпадение с нормализованным именем; без --topic - страница автора)
    #[arg(long)]
    pub(crate) author: Option<String>,
}

impl FilterArgs {
    pub(crate) fn query(&self) -> Query {
        let topic = match self.topic.as_slice() {
            [] => TopicFilter::Any,
            [one] => TopicFilter::One(one.clone()),
            many => TopicFilter::Many(many.to_vec()),
        };
        Query {
            topic,
            author: self.author.clone(),
        }
    }
}

/// Текстовый [`Format`] или html/xml фрагмент
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OutputFormat {
    Text(Format),
    Html,
    Xml,
}

impl FromStr for OutputFormat {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "html" => Self::Html,
            "xml" => Self::Xml,
            other => Self::Text(other.parse()?),
        })
    }
}

impl Args {
    pub(crate) fn validate(&self) -> Result<()> {
        if let Some(url) = &self.net.base_url {
            if url.trim().is_empty() {
                bail!("--base-url is empty");
            }
        }

        if let Command::Bank { file, .. } = &self.command {
            if file.is_dir() {
                bail!("--file must point to a file: {:?}", file);
            }
        }

        if let Command::All { workers: 0, .. } = &self.command {
            bail!("--workers must be at least 1");
        }

        Ok(())
    }

    pub(crate) fn client_config(&self) -> ClientConfig {
        let mut cfg = ClientConfig::default();
        let net = &self.net;

        if let Some(url) = &net.base_url {
            cfg.base_url = url.clone();
        }
        if let Some(ms) = net.retry_interval_ms {
            cfg.retry.interval = Duration::from_millis(ms);
        }
        if let Some(n) = net.max_attempts {
            cfg.retry.max_attempts = usize::try_from(n).unwrap_or(usize::MAX);
        }
        if let Some(ms) = net.delay_ms {
            cfg.courtesy_delay = Duration::from_millis(ms);
        }
        if let Some(s) = net.timeout_s {
            cfg.http_timeout = Duration::from_secs(s);
        }

        cfg
    }
}
