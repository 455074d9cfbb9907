use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use brainyquote_core::extract::{extract_quotes, parse_today};
use brainyquote_core::{CompiledSelectors, DEFAULT_TOPICS, Quote, TodayLookup};
use log::{debug, info, warn};
use rand::Rng;
use rand::seq::IndexedRandom;
use url::Url;

use crate::config::ClientConfig;
use crate::error::{ConfigError, FetchError, LookupError};
use crate::fetcher::Fetcher;
use crate::ratelimit::RateLimitDetector;
use crate::transport::{HttpTransport, Transport};

/// Фильтр по темам
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TopicFilter {
    /// без фильтра
    #[default]
    Any,
    /// одна тема
    One(String),
    /// несколько тем, результаты склеиваются по порядку
    Many(Vec<String>),
}

/// Запрос для [`QuoteClient::find_all`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    /// фильтр по темам
    pub topic: TopicFilter,
    /// точное совпадение с нормализованным именем автора
    pub author: Option<String>,
}

impl Query {
    /// Без фильтров: обход тем по умолчанию
    pub fn any() -> Self {
        Self::default()
    }

    /// Одна тема
    pub fn topic(topic: impl Into<String>) -> Self {
        Self {
            topic: TopicFilter::One(topic.into()),
            author: None,
        }
    }

    /// Несколько тем
    pub fn topics<I, S>(topics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            topic: TopicFilter::Many(topics.into_iter().map(Into::into).collect()),
            author: None,
        }
    }

    /// Только автор
    pub fn author(author: impl Into<String>) -> Self {
        Self {
            topic: TopicFilter::Any,
            author: Some(author.into()),
        }
    }

    /// Добавить фильтр по автору
    pub fn by(self, author: impl Into<String>) -> Self {
        Self {
            author: Some(author.into()),
            ..self
        }
    }
}

/// Клиент BrainyQuote: поиск цитат, цитата дня, каталоги.
pub struct QuoteClient<T> {
    pub(crate) fetcher: Fetcher<T>,
    base: Url,
    pub(crate) selectors: CompiledSelectors,
    pub(crate) config: ClientConfig,
}

impl QuoteClient<HttpTransport> {
    /// Клиент поверх `reqwest`
    pub fn connect(config: ClientConfig) -> Result<Self, LookupError> {
        let transport = HttpTransport::new(&config).map_err(FetchError::from)?;
        Ok(Self::new(config, transport)?)
    }
}

impl<T: Transport> QuoteClient<T> {
    /// Клиент поверх произвольного транспорта
    pub fn new(config: ClientConfig, transport: T) -> Result<Self, ConfigError> {
        let base = Url::parse(&config.base_url).map_err(|e| ConfigError::InvalidBaseUrl {
            url: config.base_url.clone(),
            source: e,
        })?;
        if base.cannot_be_a_base() {
            return Err(ConfigError::CannotBeABase(config.base_url.clone()));
        }

        let selectors = config.selectors.compile()?;
        let fetcher = Fetcher::new(transport, config.retry);

        Ok(Self {
            fetcher,
            base,
            selectors,
            config,
        })
    }

    /// Флаг отмены: прерывает паузы и оставшиеся запросы
    pub fn with_shutdown(mut self, shutdown: Arc<AtomicBool>) -> Self {
        self.fetcher = self.fetcher.with_shutdown(shutdown);
        self
    }

    /// Заменить способ детекта rate limit
    pub fn with_detector(mut self, detector: impl RateLimitDetector + 'static) -> Self {
        self.fetcher = self.fetcher.with_detector(detector);
        self
    }

    /// `base/seg1/seg2...`, сегменты экранируются
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url, ConfigError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ConfigError::CannotBeABase(self.base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Все цитаты по запросу.
    ///
    /// - несколько тем: каждая тема по очереди, с паузой между ними
    /// - одна тема: страница темы, затем фильтр по автору
    /// - только автор: страница автора
    /// - ничего: все темы из [`DEFAULT_TOPICS`]
    ///
    /// Пустая строка или пустой список считаются отсутствующим фильтром.
    pub fn find_all(&self, query: &Query) -> Result<Vec<Quote>, LookupError> {
        let author = query.author.as_deref().filter(|a| !a.is_empty());

        match &query.topic {
            TopicFilter::Many(topics) if !topics.is_empty() => self.find_in_topics(topics, author),
            TopicFilter::One(topic) if !topic.is_empty() => self.find_in_topic(topic, author),
            _ => match author {
                Some(author) => self.find_by_author(author),
                None => self.find_in_topics(&DEFAULT_TOPICS, None),
            },
        }
    }

    /// Первая цитата по запросу
    pub fn find(&self, query: &Query) -> Result<Quote, LookupError> {
        self.find_all(query)?
            .into_iter()
            .next()
            .ok_or(LookupError::Empty)
    }

    /// Случайная цитата по запросу
    pub fn random(&self, query: &Query) -> Result<Quote, LookupError> {
        self.random_with(query, &mut rand::rng())
    }

    /// Случайная цитата с заданным генератором
    pub fn random_with<R: Rng + ?Sized>(
        &self,
        query: &Query,
        rng: &mut R,
    ) -> Result<Quote, LookupError> {
        self.find_all(query)?
            .choose(rng)
            .cloned()
            .ok_or(LookupError::Empty)
    }

    /// Цитата дня. Никогда не падает: при любой ошибке или если раздел не
    /// найден, возвращается [`Quote::default_quote`].
    pub fn today(&self, topics: &[String]) -> Quote {
        match self.try_today(topics) {
            Ok(found) => found.or_default_quote(),
            Err(e) => {
                warn!("quote of the day lookup failed: {e}; using default quote");
                Quote::default_quote()
            }
        }
    }

    /// Цитата дня без подстановки запасной цитаты
    pub fn try_today(&self, topics: &[String]) -> Result<TodayLookup, LookupError> {
        let url = self.endpoint(&["quote_of_the_day"])?;
        let body = self.fetcher.fetch(&url)?;
        let found = parse_today(&body, topics, &self.selectors)?;
        if matches!(found, TodayLookup::NotFound) {
            debug!("no quote of the day section for {topics:?}");
        }
        Ok(found)
    }

    fn find_in_topics<S: AsRef<str>>(
        &self,
        topics: &[S],
        author: Option<&str>,
    ) -> Result<Vec<Quote>, LookupError> {
        let mut quotes = Vec::new();

        for (i, topic) in topics.iter().enumerate() {
            if i > 0 {
                self.fetcher.pause(self.config.courtesy_delay)?;
            }
            quotes.extend(self.find_in_topic(topic.as_ref(), author)?);
        }

        info!("collected {} quotes from {} topics", quotes.len(), topics.len());
        Ok(quotes)
    }

    pub(crate) fn find_in_topic(
        &self,
        topic: &str,
        author: Option<&str>,
    ) -> Result<Vec<Quote>, LookupError> {
        let url = self.endpoint(&["topics", topic])?;
        let body = self.fetcher.fetch(&url)?;

        let quotes: Vec<Quote> = extract_quotes(&body, &self.selectors)
            .into_iter()
            .map(|q| q.with_topic(topic))
            .filter(|q| author.is_none_or(|a| q.author() == a))
            .collect();

        debug!("topic {topic:?}: {} quotes", quotes.len());
        Ok(quotes)
    }

    fn find_by_author(&self, author: &str) -> Result<Vec<Quote>, LookupError> {
        let url = self.endpoint(&["authors", author])?;
        let body = self.fetcher.fetch(&url)?;

        let quotes = extract_quotes(&body, &self.selectors);
        debug!("author {author:?}: {} quotes", quotes.len());
        Ok(quotes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::RetryPolicy;
    use crate::testing::{RoutedTransport, quotes_page};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::time::Duration;

    fn test_config() -> ClientConfig {
        ClientConfig {
            base_url: "http://quotes.test/".to_string(),
            retry: RetryPolicy {
                interval: Duration::ZERO,
                max_attempts: 3,
            },
            courtesy_delay: Duration::ZERO,
            ..ClientConfig::default()
        }
    }

    fn client(t: RoutedTransport) -> QuoteClient<RoutedTransport> {
        QuoteClient::new(test_config(), t).unwrap()
    }

    fn love_page() -> String {
        quotes_page(&[
            ("Love is patient.", "paul the apostle"),
            ("Love all, trust a few.", "william shakespeare"),
            ("To love oneself is the beginning.", "OSCAR WILDE"),
        ])
    }

    #[test]
    fn endpoint_joins_and_escapes_segments() {
        let c = client(RoutedTransport::new());
        assert_eq!(
            c.endpoint(&["authors", "Mark Twain"]).unwrap().as_str(),
            "http://quotes.test/authors/Mark%20Twain"
        );

        let nested = QuoteClient::new(
            ClientConfig {
                base_url: "http://mirror.test/bq".to_string(),
                ..test_config()
            },
            RoutedTransport::new(),
        )
        .unwrap();
        assert_eq!(
            nested.endpoint(&["topics", "a/b"]).unwrap().as_str(),
            "http://mirror.test/bq/topics/a%2Fb"
        );
    }

    #[test]
    fn invalid_base_url_is_config_error() {
        let cfg = ClientConfig {
            base_url: "not a url".to_string(),
            ..test_config()
        };
        let err = QuoteClient::new(cfg, RoutedTransport::new()).err().unwrap();
        assert!(matches!(err, ConfigError::InvalidBaseUrl { .. }));

        let cfg = ClientConfig {
            base_url: "mailto:someone@example.com".to_string(),
            ..test_config()
        };
        let err = QuoteClient::new(cfg, RoutedTransport::new()).err().unwrap();
        assert!(matches!(err, ConfigError::CannotBeABase(_)));
    }

    #[test]
    fn single_topic_tags_quotes_with_topic() {
        let c = client(RoutedTransport::new().route("/topics/love", love_page()));
        let quotes = c.find_all(&Query::topic("love")).unwrap();

        assert_eq!(quotes.len(), 3);
        assert_eq!(quotes[0].author(), "Paul The Apostle");
        assert_eq!(quotes[2].author(), "Oscar Wilde");
        assert!(quotes.iter().all(|q| q.topic() == "love"));
    }

    #[test]
    fn topic_with_author_filters_exactly() {
        let c = client(RoutedTransport::new().route("/topics/love", love_page()));

        let quotes = c
            .find_all(&Query::topic("love").by("William Shakespeare"))
            .unwrap();
        assert_eq!(quotes.len(), 1);
        assert_eq!(quotes[0].content(), "Love all, trust a few.");

        // сравнение точное, без нормализации запроса
        let none = c
            .find_all(&Query::topic("love").by("william shakespeare"))
            .unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn author_only_uses_author_page() {
        let t = RoutedTransport::new().route(
            "/authors/mark-twain",
            quotes_page(&[("The secret of getting ahead is getting started.", "mark twain")]),
        );
        let c = client(t);

        let quotes = c.find_all(&Query::author("mark-twain")).unwrap();
        assert_eq!(quotes.len(), 1);
        assert_eq!(quotes[0].author(), "Mark Twain");
        assert_eq!(quotes[0].topic(), "");
        assert_eq!(c.fetcher.transport().requested(), vec!["/authors/mark-twain"]);
    }

    #[test]
    fn many_topics_concatenate_in_order() {
        let t = RoutedTransport::new()
            .route("/topics/life", quotes_page(&[("life 1", "a"), ("life 2", "b")]))
            .route("/topics/love", quotes_page(&[("love 1", "c")]));
        let c = client(t);

        let quotes = c.find_all(&Query::topics(["love", "life"])).unwrap();
        let contents: Vec<&str> = quotes.iter().map(|q| q.content()).collect();
        assert_eq!(contents, vec!["love 1", "life 1", "life 2"]);
    }

    #[test]
    fn many_topics_apply_author_filter_per_topic() {
        let t = RoutedTransport::new()
            .route("/topics/life", quotes_page(&[("life 1", "a"), ("life 2", "b")]))
            .route("/topics/love", quotes_page(&[("love 1", "b")]));
        let c = client(t);

        let quotes = c.find_all(&Query::topics(["love", "life"]).by("B")).unwrap();
        let contents: Vec<&str> = quotes.iter().map(|q| q.content()).collect();
        assert_eq!(contents, vec!["love 1", "life 2"]);
    }

    #[test]
    fn no_filter_walks_default_topics_once_each() {
        let mut t = RoutedTransport::new();
        for topic in DEFAULT_TOPICS {
            let content = format!("{topic} quote");
            t = t.route(
                &format!("/topics/{topic}"),
                quotes_page(&[(content.as_str(), "someone")]),
            );
        }
        let c = client(t);

        let quotes = c.find_all(&Query::any()).unwrap();
        assert_eq!(quotes.len(), DEFAULT_TOPICS.len());
        for (q, topic) in quotes.iter().zip(DEFAULT_TOPICS) {
            assert_eq!(q.content(), format!("{topic} quote"));
        }
    }

    #[test]
    fn empty_filters_fall_back_to_defaults() {
        let c = client(RoutedTransport::new().route("/authors/x", quotes_page(&[("q", "x")])));
        let q = Query {
            topic: TopicFilter::One(String::new()),
            author: Some("x".to_string()),
        };
        assert_eq!(c.find_all(&q).unwrap().len(), 1);

        let q = Query {
            topic: TopicFilter::Many(Vec::new()),
            author: Some("x".to_string()),
        };
        assert_eq!(c.find_all(&q).unwrap().len(), 1);
    }

    #[test]
    fn missing_page_surfaces_status_error() {
        let c = client(RoutedTransport::new());
        let err = c.find_all(&Query::topic("nope")).unwrap_err();
        assert!(matches!(
            err,
            LookupError::Fetch(FetchError::Status { status: 404, .. })
        ));
    }

    #[test]
    fn find_returns_first_or_empty() {
        let t = RoutedTransport::new()
            .route("/topics/love", love_page())
            .route("/topics/empty", quotes_page(&[]));
        let c = client(t);

        assert_eq!(
            c.find(&Query::topic("love")).unwrap().content(),
            "Love is patient."
        );
        assert!(matches!(
            c.find(&Query::topic("empty")),
            Err(LookupError::Empty)
        ));
    }

    #[test]
    fn random_returns_member_or_empty() {
        let t = RoutedTransport::new()
            .route("/topics/love", love_page())
            .route("/topics/empty", quotes_page(&[]));
        let c = client(t);
        let all = c.find_all(&Query::topic("love")).unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..10 {
            let q = c.random_with(&Query::topic("love"), &mut rng).unwrap();
            assert!(all.iter().any(|m| m.dedup_key() == q.dedup_key()));
        }
        assert!(matches!(
            c.random(&Query::topic("empty")),
            Err(LookupError::Empty)
        ));
    }

    const TODAY: &str = r#"
        <div class="container bqQOTD">
          <div><h2 class="qotd-h2">Quote of the Day</h2>
            <div class="clearfix"><a title="view quote">Well done is better than well said.</a><a title="view author">benjamin franklin</a></div>
          </div>
          <div><h2 class="qotd-h2">Funny Quote of the Day</h2>
            <div class="clearfix"><a title="view quote">I am free of all prejudice.</a><a title="view author">w. c. fields</a></div>
          </div>
        </div>"#;

    #[test]
    fn today_general_and_topic_sections() {
        let c = client(RoutedTransport::new().route("/quote_of_the_day", TODAY));

        assert_eq!(c.today(&[]).author(), "Benjamin Franklin");
        assert_eq!(c.today(&["funny".to_string()]).author(), "W. C. Fields");
    }

    #[test]
    fn today_unknown_topic_falls_back() {
        let c = client(RoutedTransport::new().route("/quote_of_the_day", TODAY));
        let q = c.today(&["Love".to_string()]);
        assert_eq!(q.content(), "Je pense, donc je suis.");
        assert_eq!(q.author(), "Rene Descartes");
        assert!(matches!(
            c.try_today(&["Love".to_string()]).unwrap(),
            TodayLookup::NotFound
        ));
    }

    #[test]
    fn today_never_fails_on_fetch_error() {
        let c = client(RoutedTransport::new());
        assert!(c.try_today(&[]).is_err());
        assert_eq!(c.today(&[]).author(), "Rene Descartes");
    }

    #[test]
    fn shutdown_cancels_lookup() {
        let flag = Arc::new(AtomicBool::new(true));
        let c = client(RoutedTransport::new().route("/topics/love", love_page()))
            .with_shutdown(flag);
        assert!(matches!(
            c.find_all(&Query::topic("love")),
            Err(LookupError::Cancelled)
        ));
        assert!(matches!(c.find(&Query::author("Mark Twain")), Err(LookupError::Cancelled)));
        assert!(matches!(c.try_today(&[]), Err(LookupError::Cancelled)));
    }
}
