use crate::config::RATE_LIMIT_MARKER;
use crate::transport::Page;

/// Признак того, что сервер нас притормозил.
///
/// Логика повторов от способа детекта не зависит: можно подставить
/// проверку по телу, по статусу или любую свою функцию.
pub trait RateLimitDetector: Send + Sync {
    /// `true` - ответ надо повторить после паузы
    fn is_rate_limited(&self, page: &Page) -> bool;
}

/// Поиск подстроки в теле ответа (статус не важен).
#[derive(Debug, Clone)]
pub struct BodyMarker(pub String);

impl Default for BodyMarker {
    fn default() -> Self {
        Self(RATE_LIMIT_MARKER.to_string())
    }
}

impl RateLimitDetector for BodyMarker {
    fn is_rate_limited(&self, page: &Page) -> bool {
        page.body.contains(self.0.as_str())
    }
}

/// Детект по HTTP статусу (обычно 429).
#[derive(Debug, Clone, Copy)]
pub struct StatusCode(pub u16);

impl RateLimitDetector for StatusCode {
    fn is_rate_limited(&self, page: &Page) -> bool {
        page.status == self.0
    }
}

impl<F> RateLimitDetector for F
where
    F: Fn(&Page) -> bool + Send + Sync,
{
    fn is_rate_limited(&self, page: &Page) -> bool {
        self(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_marker_ignores_status() {
        let d = BodyMarker::default();
        assert!(d.is_rate_limited(&Page::ok("<p>Too many requests</p>")));
        assert!(!d.is_rate_limited(&Page::ok("<p>fine</p>")));
        assert!(!d.is_rate_limited(&Page {
            status: 429,
            body: "slow down".to_string(),
        }));
    }

    #[test]
    fn status_code_ignores_body() {
        let d = StatusCode(429);
        assert!(d.is_rate_limited(&Page {
            status: 429,
            body: String::new(),
        }));
        assert!(!d.is_rate_limited(&Page::ok("Too many requests")));
    }

    #[test]
    fn closures_are_detectors() {
        let d = |p: &Page| p.body.is_empty();
        assert!(d.is_rate_limited(&Page::ok("")));
        assert!(!d.is_rate_limited(&Page::ok("x")));
    }
}
