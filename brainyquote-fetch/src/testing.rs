//! In-memory транспорты для тестов.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use url::Url;

use crate::error::TransportError;
use crate::transport::{Page, Transport};

/// Отдаёт заранее заданные ответы по очереди, независимо от URL.
pub(crate) struct ScriptedTransport {
    script: Mutex<VecDeque<Result<Page, TransportError>>>,
    calls: AtomicUsize,
}

impl ScriptedTransport {
    pub(crate) fn new(script: Vec<Result<Page, TransportError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Transport for ScriptedTransport {
    fn get(&self, url: &Url) -> Result<Page, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut script = match self.script.lock() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        };
        script.pop_front().unwrap_or_else(|| {
            Err(TransportError::Other {
                url: url.to_string(),
                reason: "script exhausted".to_string(),
            })
        })
    }
}

/// Ответы по пути URL (`/topics/love`); неизвестный путь - 404.
#[derive(Default)]
pub(crate) struct RoutedTransport {
    routes: HashMap<String, String>,
    requested: Mutex<Vec<String>>,
}

impl RoutedTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn route(mut self, path: &str, body: impl Into<String>) -> Self {
        self.routes.insert(path.to_string(), body.into());
        self
    }

    /// Запрошенные пути в порядке запросов
    pub(crate) fn requested(&self) -> Vec<String> {
        match self.requested.lock() {
            Ok(g) => g.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl Transport for RoutedTransport {
    fn get(&self, url: &Url) -> Result<Page, TransportError> {
        let path = url.path().to_string();
        {
            let mut requested = match self.requested.lock() {
                Ok(g) => g,
                Err(poisoned) => poisoned.into_inner(),
            };
            requested.push(path.clone());
        }

        Ok(match self.routes.get(&path) {
            Some(body) => Page::ok(body.clone()),
            None => Page {
                status: 404,
                body: "not found".to_string(),
            },
        })
    }
}

/// Страница со списком цитат `div#quotesList`
pub(crate) fn quotes_page(items: &[(&str, &str)]) -> String {
    let children: String = items
        .iter()
        .map(|(text, author)| {
            format!(
                "<div class=\"clearfix\"><a title=\"view quote\">{text}</a><a title=\"view author\">{author}</a></div>"
            )
        })
        .collect();
    format!("<html><body><div id=\"quotesList\">{children}</div></body></html>")
}
