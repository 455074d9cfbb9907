use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use log::{debug, warn};
use url::Url;

use crate::config::{MAX_ATTEMPTS, RETRY_INTERVAL, SHUTDOWN_TICK};
use crate::error::FetchError;
use crate::ratelimit::{BodyMarker, RateLimitDetector};
use crate::transport::Transport;

/// Повторы при rate limit: фиксированная пауза, ограниченное число запросов.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// пауза перед повтором
    pub interval: Duration,
    /// всего запросов, включая первый
    pub max_attempts: usize,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            interval: RETRY_INTERVAL,
            max_attempts: MAX_ATTEMPTS,
        }
    }
}

/// Загрузка страниц с повторами при rate limit.
///
/// Если все попытки упёрлись в rate limit, возвращается тело последнего
/// ответа: на этом уровне оно неотличимо от нормального.
/// Ошибки транспорта и "чистые" не-2xx ответы возвращаются как ошибки.
pub struct Fetcher<T> {
    transport: T,
    detector: Box<dyn RateLimitDetector>,
    policy: RetryPolicy,
    shutdown: Option<Arc<AtomicBool>>,
}

impl<T: Transport> Fetcher<T> {
    /// Fetcher с детектом по маркеру в теле
    pub fn new(transport: T, policy: RetryPolicy) -> Self {
        Self {
            transport,
            detector: Box::new(BodyMarker::default()),
            policy,
            shutdown: None,
        }
    }

    /// Заменить способ детекта rate limit
    pub fn with_detector(mut self, detector: impl RateLimitDetector + 'static) -> Self {
        self.detector = Box::new(detector);
        self
    }

    /// Флаг, при поднятии которого ожидание прерывается с [`FetchError::Cancelled`]
    pub fn with_shutdown(mut self, shutdown: Arc<AtomicBool>) -> Self {
        self.shutdown = Some(shutdown);
        self
    }

    /// Текущая политика повторов
    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Загрузить страницу
    pub fn fetch(&self, url: &Url) -> Result<String, FetchError> {
        let max_attempts = self.policy.max_attempts.max(1);
        let mut attempt = 0;

        loop {
            if self.is_shutdown() {
                return Err(FetchError::Cancelled);
            }

            attempt += 1;
            let page = self.transport.get(url)?;

            if !self.detector.is_rate_limited(&page) {
                if !page.is_success() {
                    return Err(FetchError::Status {
                        url: url.to_string(),
                        status: page.status,
                    });
                }
                return Ok(page.body);
            }

            if attempt >= max_attempts {
                warn!("{url}: still rate limited after {attempt} attempts; using last response");
                return Ok(page.body);
            }

            debug!(
                "{url}: rate limited (attempt {attempt}/{max_attempts}), retry in {:?}",
                self.policy.interval
            );
            self.pause(self.policy.interval)?;
        }
    }

    /// Пауза, прерываемая флагом shutdown
    pub(crate) fn pause(&self, duration: Duration) -> Result<(), FetchError> {
        if sleep_unless_shutdown(duration, self.shutdown.as_deref()) {
            Ok(())
        } else {
            Err(FetchError::Cancelled)
        }
    }

    #[cfg(test)]
    pub(crate) fn transport(&self) -> &T {
        &self.transport
    }

    pub(crate) fn is_shutdown(&self) -> bool {
        self.shutdown
            .as_deref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }
}

/// Спит `duration` короткими шагами. `false`, если поднят shutdown.
fn sleep_unless_shutdown(duration: Duration, shutdown: Option<&AtomicBool>) -> bool {
    let Some(flag) = shutdown else {
        thread::sleep(duration);
        return true;
    };

    let mut slept = Duration::ZERO;
    while slept < duration {
        if flag.load(Ordering::Relaxed) {
            return false;
        }
        let step = (duration - slept).min(SHUTDOWN_TICK);
        thread::sleep(step);
        slept += step;
    }
    !flag.load(Ordering::Relaxed)
}
