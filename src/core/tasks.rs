//! Fork/join of independent units of work.
//!
//! Every unit runs to completion on the rayon pool. The first error reported
//! becomes the result; it does not stop units that are already running.

use crate::config::{CaptchaError, Result};
use std::sync::{Mutex, PoisonError};

/// One independent unit of work.
pub type Task<'a> = Box<dyn FnOnce() -> Result<()> + Send + 'a>;

/// Runs all tasks in parallel and blocks until every one has finished.
///
/// # Errors
///
/// Returns the first error reported by any task.
pub fn run_all(tasks: Vec<Task<'_>>) -> Result<()> {
    let first_error: Mutex<Option<CaptchaError>> = Mutex::new(None);

    rayon::scope(|scope| {
        for task in tasks {
            let first_error = &first_error;
            scope.spawn(move |_| {
                if let Err(e) = task() {
                    let mut slot = first_error.lock().unwrap_or_else(PoisonError::into_inner);
                    if slot.is_none() {
                        *slot = Some(e);
                    }
                }
            });
        }
    });

    match first_error
        .into_inner()
        .unwrap_or_else(PoisonError::into_inner)
    {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
