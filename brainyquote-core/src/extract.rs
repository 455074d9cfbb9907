//! Разбор HTML-страниц в цитаты и списки.
//!
//! Парсер терпимый (html5ever через `scraper`): битая разметка даёт
//! частичный результат, а не ошибку. Поиск идёт только по атрибутам и
//! классам, из структуры используется лишь "прямой потомок контейнера".

use scraper::{ElementRef, Html, Selector};

use crate::constants::{QUOTE_OF_THE_DAY_SUFFIX, VIEW_AUTHOR_TITLE, VIEW_QUOTE_TITLE};
use crate::error::ExtractError;
use crate::names::{capitalize, fix};
use crate::types::Quote;

const TOPICS_REGION: &str = "div.row.bq_left";
const TOPIC_NAME: &str = "span.topicContentName";
const AUTHOR_NAME: &str = "span.authorContentName";
const QOTD_CONTAINER: &str = "div.container.bqQOTD";
const QOTD_HEADING: &str = "h2.qotd-h2";
const QOTD_ITEM: &str = "div.clearfix";

/// CSS-селекторы для списка цитат.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteSelectors {
    /// контейнер со всеми цитатами страницы
    pub container: String,
    /// фильтр для прямых потомков контейнера
    pub item: String,
    /// элемент с текстом цитаты внутри потомка
    pub text: String,
    /// элемент с именем автора внутри потомка
    pub author: String,
}

impl Default for QuoteSelectors {
    fn default() -> Self {
        Self {
            container: "div#quotesList".to_string(),
            item: "*".to_string(),
            text: format!("a[title=\"{VIEW_QUOTE_TITLE}\"]"),
            author: format!("a[title=\"{VIEW_AUTHOR_TITLE}\"]"),
        }
    }
}

impl QuoteSelectors {
    /// Скомпилировать строки в селекторы
    pub fn compile(&self) -> Result<CompiledSelectors, ExtractError> {
        Ok(CompiledSelectors {
            container: selector(&self.container)?,
            item: selector(&self.item)?,
            text: selector(&self.text)?,
            author: selector(&self.author)?,
        })
    }
}

/// Готовые к использованию селекторы (см. [`QuoteSelectors::compile`]).
#[derive(Debug, Clone)]
pub struct CompiledSelectors {
    container: Selector,
    item: Selector,
    text: Selector,
    author: Selector,
}

/// Результат поиска цитаты дня
#[derive(Debug, Clone)]
pub enum TodayLookup {
    /// раздел найден и из него извлечена цитата
    Found(Quote),
    /// подходящего раздела нет (или он неполный)
    NotFound,
}

impl TodayLookup {
    /// Цитата или запасная [`Quote::default_quote`]
    pub fn or_default_quote(self) -> Quote {
        match self {
            Self::Found(q) => q,
            Self::NotFound => Quote::default_quote(),
        }
    }
}

fn selector(css: &str) -> Result<Selector, ExtractError> {
    Selector::parse(css).map_err(|e| ExtractError::InvalidSelector {
        selector: css.to_string(),
        reason: e.to_string(),
    })
}

fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect()
}

/// Собирает цитаты из прямых потомков контейнера.
///
/// Потомок без текста или без автора молча пропускается.
/// Нет контейнера - пустой список.
pub fn extract_quotes(markup: &str, selectors: &CompiledSelectors) -> Vec<Quote> {
    let document = Html::parse_document(markup);

    let Some(container) = document.select(&selectors.container).next() else {
        return Vec::new();
    };

    container
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|child| selectors.item.matches(child))
        .filter_map(|child| quote_from_item(child, selectors))
        .collect()
}

fn quote_from_item(item: ElementRef<'_>, selectors: &CompiledSelectors) -> Option<Quote> {
    let text = item.select(&selectors.text).next().map(text_of)?;
    let author = item.select(&selectors.author).next().map(text_of)?;

    if text.trim().is_empty() || author.trim().is_empty() {
        return None;
    }

    Some(Quote::new(text, fix(&author)))
}

fn topic_spans(markup: &str, popular_only: bool) -> Result<Vec<String>, ExtractError> {
    let region_sel = selector(TOPICS_REGION)?;
    let name_sel = selector(TOPIC_NAME)?;

    let document = Html::parse_document(markup);
    // первый такой блок - шапка, темы во втором
    let Some(region) = document.select(&region_sel).nth(1) else {
        return Ok(Vec::new());
    };

    Ok(region
        .select(&name_sel)
        .filter(|span| !popular_only || next_element_is_img(*span))
        .map(text_of)
        .collect())
}

fn next_element_is_img(el: ElementRef<'_>) -> bool {
    el.next_siblings()
        .find_map(ElementRef::wrap)
        .is_some_and(|sib| sib.value().name() == "img")
}

/// Все темы со страницы `topics`
pub fn extract_topics(markup: &str) -> Result<Vec<String>, ExtractError> {
    topic_spans(markup, false)
}

/// Популярные темы: у названия есть соседняя картинка
pub fn extract_popular_topics(markup: &str) -> Result<Vec<String>, ExtractError> {
    topic_spans(markup, true)
}

/// Все авторы со страницы `authors`
pub fn extract_authors(markup: &str) -> Result<Vec<String>, ExtractError> {
    let name_sel = selector(AUTHOR_NAME)?;
    let document = Html::parse_document(markup);

    Ok(document
        .select(&name_sel)
        .map(|span| text_of(span).trim().to_string())
        .collect())
}

/// Ищет на странице "цитата дня" раздел, заголовок которого (без хвоста
/// "Quote of the Day") совпадает с одной из тем. Пустой список тем - общий
/// раздел без префикса.
pub fn parse_today(
    markup: &str,
    topics: &[String],
    selectors: &CompiledSelectors,
) -> Result<TodayLookup, ExtractError> {
    let container_sel = selector(QOTD_CONTAINER)?;
    let heading_sel = selector(QOTD_HEADING)?;
    let item_sel = selector(QOTD_ITEM)?;

    let wanted: Vec<String> = if topics.is_empty() {
        vec![String::new()]
    } else {
        topics.iter().map(|t| capitalize(t)).collect()
    };

    let document = Html::parse_document(markup);
    let Some(container) = document.select(&container_sel).next() else {
        return Ok(TodayLookup::NotFound);
    };

    let section = container
        .descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .find(|el| {
            el.select(&heading_sel).next().is_some_and(|h2| {
                let heading = text_of(h2);
                let prefix = heading
                    .split_once(QUOTE_OF_THE_DAY_SUFFIX)
                    .map_or(heading.as_str(), |(head, _)| head)
                    .trim();
                wanted.iter().any(|w| w == prefix)
            })
        });

    let found = section
        .and_then(|s| s.select(&item_sel).next())
        .and_then(|item| quote_from_item(item, selectors));

    Ok(match found {
        Some(q) => TodayLookup::Found(q),
        None => TodayLookup::NotFound,
    })
}
