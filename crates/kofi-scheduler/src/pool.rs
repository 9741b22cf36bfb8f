//! A small thread pool for running parse jobs concurrently.
//!
//! Adapted from `weld-scheduler`'s design: a `ThreadPool` owns the
//! sender half of an unbounded MPMC channel; each `Worker` owns a clone
//! of the receiver and its own single-threaded executor, pulling
//! whatever job is next whenever it's idle. Distribution isn't
//! work-stealing, it falls out of the channel itself handing a job to
//! whichever receiver asks for one first.
//!
//! Unlike `weld-scheduler`'s pool, `execute` here returns a future for
//! the job's own output rather than firing and forgetting it: a line
//! parser's result has to make it back to the collector that assembles
//! the document (see [`crate::parse_concurrently`]). The job itself
//! reports its output down a one-shot reply channel before resolving,
//! so the pool's internal job type can stay a plain `Future<Output = ()>`
//! regardless of what any particular caller's `execute` returns.

use std::{
    cmp,
    future::Future,
    io,
    num::NonZeroUsize,
    pin::Pin,
    thread::{self, JoinHandle},
};

use smol::{
    block_on,
    channel::{self, Receiver, RecvError, SendError, Sender},
    Executor,
};

/// What a `Worker` executes.
type Job = Pin<Box<dyn Future<Output = ()> + Send>>;

/// A pool of threads that run `Future`s handed to it via [`ThreadPool::execute`].
pub struct ThreadPool {
    _workers: Vec<Worker>,
    executor: Executor<'static>,
    sender: Sender<Job>,
}

impl ThreadPool {
    /// Create a pool of at most `desired_pool_size` threads, clamped to
    /// [`std::thread::available_parallelism`]. Threads are created
    /// eagerly and are idle and ready when this returns.
    pub fn new(desired_pool_size: NonZeroUsize) -> Result<Self, io::Error> {
        let pool_size = cmp::min(desired_pool_size, thread::available_parallelism()?).get();

        let (sender, receiver) = channel::unbounded::<Job>();
        let mut workers = Vec::with_capacity(pool_size);

        for id in 0..pool_size {
            workers.push(Worker::new(id, receiver.clone())?);
        }

        Ok(Self { _workers: workers, executor: Executor::new(), sender })
    }

    /// Submit `work` to the pool and return a future that resolves to
    /// its output once some worker has run it to completion.
    ///
    /// Submission order across calls is preserved only in the sense
    /// that jobs are handed out to idle workers as submitted; actual
    /// *completion* order is not guaranteed. A caller that needs results
    /// in submission order (as [`crate::parse_concurrently`] does)
    /// should await the returned futures in that same order.
    pub fn execute<F, T>(&self, work: F) -> Result<impl Future<Output = Result<T, RecvError>>, SendError<Job>>
    where
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        let (reply_sender, reply_receiver) = channel::bounded(1);

        let job: Job = Box::pin(async move {
            let output = work.await;
            // The receiver may already be gone if the collector stopped
            // awaiting results after an earlier line failed; that's fine.
            let _ = reply_sender.send(output).await;
        });

        block_on(self.executor.run(self.sender.send(job)))?;

        Ok(async move { reply_receiver.recv().await })
    }
}

/// A `Worker` runs jobs handed to it, on its own thread and its own
/// executor.
struct Worker {
    _thread_handle: JoinHandle<()>,
}

impl Worker {
    fn new(worker_id: usize, receiver: Receiver<Job>) -> Result<Self, io::Error> {
        let thread_handle = thread::Builder::new()
            .name(format!("{prefix}-worker-{worker_id}", prefix = env!("CARGO_PKG_NAME")))
            .spawn(move || {
                let executor = Executor::new();

                block_on(executor.run(async {
                    while let Ok(received_job) = receiver.recv().await {
                        executor.spawn(received_job).detach();
                    }
                }))
            })?;

        Ok(Self { _thread_handle: thread_handle })
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroUsize;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn executes_work_and_returns_its_output() {
        let pool = ThreadPool::new(NonZeroUsize::new(2).unwrap()).unwrap();

        let reply = pool.execute(async { 1 + 1 }).unwrap();
        assert_eq!(block_on(reply), Ok(2));
    }

    #[test]
    fn runs_many_jobs_concurrently() {
        let pool = ThreadPool::new(NonZeroUsize::new(4).unwrap()).unwrap();

        let replies: Vec<_> = (0..16).map(|n| pool.execute(async move { n * 2 }).unwrap()).collect();
        let results: Vec<i32> = replies.into_iter().map(block_on).map(Result::unwrap).collect();

        assert_eq!(results, (0..16).map(|n| n * 2).collect::<Vec<_>>());
    }
}
