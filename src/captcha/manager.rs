//! Pre-generation pool.
//!
//! A background worker keeps a bounded queue of ready challenges so request
//! handlers rarely pay the rendering cost inline.

use crate::captcha::generator::{Captcha, CaptchaGenerator};
use crate::config::{Options, Result};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use tracing::{error, info};

struct PoolShared {
    queue: Mutex<VecDeque<Captcha>>,
    condvar: Condvar,
    capacity: usize,
    shutdown: AtomicBool,
}

pub struct CaptchaPool {
    generator: Arc<CaptchaGenerator>,
    options: Options,
    shared: Arc<PoolShared>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl CaptchaPool {
    /// Creates an empty pool holding at most `capacity` challenges.
    #[must_use]
    pub fn new(generator: Arc<CaptchaGenerator>, options: Options, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            generator,
            options,
            shared: Arc::new(PoolShared {
                queue: Mutex::new(VecDeque::with_capacity(capacity)),
                condvar: Condvar::new(),
                capacity,
                shutdown: AtomicBool::new(false),
            }),
            worker: Mutex::new(None),
        }
    }

    /// Starts the background worker that refills the queue.
    ///
    /// Calling this while a worker is already running does nothing. A worker
    /// that hit a generation error has stopped and is replaced.
    pub fn start_worker(&self) {
        let mut worker = self.worker.lock().unwrap_or_else(PoisonError::into_inner);
        if worker.as_ref().is_some_and(|handle| !handle.is_finished()) {
            return;
        }
        if let Some(handle) = worker.take() {
            let _ = handle.join();
        }

        let generator = self.generator.clone();
        let options = self.options.clone();
        let shared = self.shared.clone();

        info!(capacity = shared.capacity, "Captcha pool worker started");

        *worker = Some(thread::spawn(move || {
            refill(&generator, &options, &shared);
        }));
    }

    /// Returns a pre-generated challenge, or generates one on demand when the
    /// queue is empty.
    ///
    /// # Errors
    ///
    /// Returns the generation error from the on-demand path.
    pub fn take(&self) -> Result<Captcha> {
        let mut queue = self
            .shared
            .queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(captcha) = queue.pop_front() {
            self.shared.condvar.notify_one();
            return Ok(captcha);
        }
        drop(queue);

        self.generator.generate(&self.options)
    }

    /// Number of ready challenges.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shared
            .queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.shared.capacity
    }

    /// True while the background worker is alive.
    #[must_use]
    pub fn is_worker_running(&self) -> bool {
        self.worker
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

fn refill(generator: &CaptchaGenerator, options: &Options, shared: &PoolShared) {
    loop {
        let mut queue = shared.queue.lock().unwrap_or_else(PoisonError::into_inner);
        while queue.len() >= shared.capacity && !shared.shutdown.load(Ordering::SeqCst) {
            queue = shared
                .condvar
                .wait(queue)
                .unwrap_or_else(PoisonError::into_inner);
        }
        drop(queue);

        if shared.shutdown.load(Ordering::SeqCst) {
            return;
        }

        match generator.generate(options) {
            Ok(captcha) => {
                shared
                    .queue
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .push_back(captcha);
            }
            Err(e) => {
                error!(error = %e, "Captcha pool worker stopped");
                return;
            }
        }
    }
}

impl Drop for CaptchaPool {
    fn drop(&mut self) {
        self.shared.shutdown.store(true, Ordering::SeqCst);
        self.shared.condvar.notify_all();

        let handle = self
            .worker
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = handle {
            let _ = handle.join();
        }
    }
}
