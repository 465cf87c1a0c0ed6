//! A fixed-size thread pool used by the built-in TCP transport to handle
//! multiple connections at once.

use std::{
    panic,
    sync::{mpsc, Arc, Mutex},
    thread::{self, JoinHandle},
};

type Job = Box<dyn FnOnce() + Send + 'static>;

/// A fixed-size worker pool.
/// Jobs queue on a channel; each worker loops on it until the pool is
/// dropped. A panicking job takes neither the worker nor the server down.
pub struct ThreadPool {
    sender: Option<mpsc::Sender<Job>>,
    workers: Vec<JoinHandle<()>>,
}

impl ThreadPool {
    /// Creates a new thread pool with the specified number of threads.
    /// Panics if `size` is 0.
    pub fn new(size: usize) -> ThreadPool {
        assert!(size > 0);

        let (sender, receiver) = mpsc::channel::<Job>();
        let receiver = Arc::new(Mutex::new(receiver));

        let workers = (0..size)
            .map(|id| {
                let receiver = Arc::clone(&receiver);
                thread::Builder::new()
                    .name(format!("gale worker {id}"))
                    .spawn(move || loop {
                        let job = match receiver.lock().unwrap().recv() {
                            Ok(job) => job,
                            // Channel closed, the pool is shutting down.
                            Err(_) => break,
                        };

                        if panic::catch_unwind(panic::AssertUnwindSafe(job)).is_err() {
                            trace!(Level::Error, "Worker thread #{id} panicked");
                        }
                    })
                    .expect("Error creating worker thread")
            })
            .collect();

        ThreadPool {
            sender: Some(sender),
            workers,
        }
    }

    /// Executes a job on the thread pool.
    pub fn execute(&self, f: impl FnOnce() + Send + 'static) {
        if let Some(sender) = &self.sender {
            let _ = sender.send(Box::new(f));
        }
    }
}

impl Drop for ThreadPool {
    /// Closes the job channel and waits for the workers to drain it.
    fn drop(&mut self) {
        trace!(
            Level::Debug,
            "Shutting down thread pool ({} thread(s))",
            self.workers.len()
        );
        drop(self.sender.take());

        for worker in self.workers.drain(..) {
            let _ = worker.join();
        }
    }
}

#[cfg(test)]
mod test {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    use super::ThreadPool;

    #[test]
    fn test_jobs_run() {
        let counter = Arc::new(AtomicUsize::new(0));
        let pool = ThreadPool::new(4);

        for _ in 0..32 {
            let counter = counter.clone();
            pool.execute(move || {
                counter.fetch_add(1, Ordering::Relaxed);
            });
        }

        // Dropping joins the workers after the queue drains.
        drop(pool);
        assert_eq!(counter.load(Ordering::Relaxed), 32);
    }

    #[test]
    fn test_panicking_job_does_not_kill_worker() {
        let counter = Arc::new(AtomicUsize::new(0));
        let pool = ThreadPool::new(1);

        pool.execute(|| panic!("boom"));
        let c = counter.clone();
        pool.execute(move || {
            c.fetch_add(1, Ordering::Relaxed);
        });

        drop(pool);
        assert_eq!(counter.load(Ordering::Relaxed), 1);
    }
}
