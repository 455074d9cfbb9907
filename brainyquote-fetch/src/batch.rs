use std::thread;

use brainyquote_core::Quote;
use crossbeam_channel::{Receiver, Sender};
use log::{debug, info, warn};

use crate::error::LookupError;
use crate::lookup::QuoteClient;
use crate::transport::Transport;

type Job<'a> = (usize, &'a str);
type JobResult = (usize, Result<Vec<Quote>, LookupError>);

impl<T: Transport> QuoteClient<T> {
    /// Темы качаются параллельно в `workers` потоках.
    ///
    /// Порядок результата - как в `topics`. У каждого запроса свои повторы
    /// при rate limit; между своими темами поток делает вежливую паузу.
    /// Первая (по порядку тем) ошибка возвращается целиком, частичных
    /// результатов нет. Поднятый shutdown - [`LookupError::Cancelled`].
    pub fn find_all_concurrent(
        &self,
        topics: &[String],
        author: Option<&str>,
        workers: usize,
    ) -> Result<Vec<Quote>, LookupError> {
        if topics.is_empty() {
            return Ok(Vec::new());
        }
        let workers = workers.clamp(1, topics.len());

        let (job_tx, job_rx) = crossbeam_channel::unbounded::<Job<'_>>();
        for (i, topic) in topics.iter().enumerate() {
            // получатель жив до конца функции
            let _ = job_tx.send((i, topic.as_str()));
        }
        drop(job_tx);

        let (res_tx, res_rx) = crossbeam_channel::unbounded::<JobResult>();

        thread::scope(|s| {
            for w in 0..workers {
                let job_rx = job_rx.clone();
                let res_tx = res_tx.clone();
                s.spawn(move || self.run_worker(w, job_rx, res_tx, author));
            }
        });
        drop(res_tx);

        if self.fetcher.is_shutdown() {
            info!("batch of {} topics cancelled", topics.len());
            return Err(LookupError::Cancelled);
        }

        let mut slots: Vec<Option<Result<Vec<Quote>, LookupError>>> =
            (0..topics.len()).map(|_| None).collect();
        for (i, res) in res_rx.iter() {
            slots[i] = Some(res);
        }

        let mut quotes = Vec::new();
        for (slot, topic) in slots.into_iter().zip(topics) {
            match slot {
                Some(Ok(batch)) => quotes.extend(batch),
                Some(Err(e)) => {
                    warn!("topic {topic:?} failed: {e}");
                    return Err(e);
                }
                // воркер ушёл раньше времени - только по shutdown
                None => return Err(LookupError::Cancelled),
            }
        }

        info!(
            "collected {} quotes from {} topics with {workers} workers",
            quotes.len(),
            topics.len()
        );
        Ok(quotes)
    }

    fn run_worker(
        &self,
        worker: usize,
        jobs: Receiver<Job<'_>>,
        results: Sender<JobResult>,
        author: Option<&str>,
    ) {
        let mut first = true;

        for (i, topic) in jobs.iter() {
            if self.fetcher.is_shutdown() {
                debug!("worker {worker}: shutdown, dropping remaining topics");
                return;
            }

            if !first && self.fetcher.pause(self.config.courtesy_delay).is_err() {
                return;
            }
            first = false;

            debug!("worker {worker}: topic {topic:?}");
            let res = self.find_in_topic(topic, author);
            if results.send((i, res)).is_err() {
                return;
            }
        }
    }
}
