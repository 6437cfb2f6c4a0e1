//! Off-thread palette generation.
//!
//! Generation runs on a worker [`Executor`]; the finished [`Palette`] is then
//! handed to a second executor that owns the completion callback, such as a
//! [`MainQueue`] drained by a UI thread. Both are passed in explicitly so
//! tests can run everything inline.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use crate::config::PaletteConfig;
use crate::generator::Palette;
use crate::pipeline::source::PixelSample;

pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// Somewhere a job can run.
pub trait Executor: Send + Sync {
    fn execute(&self, job: Job);
}

/// Runs every job immediately on the calling thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct InlineExecutor;

impl Executor for InlineExecutor {
    fn execute(&self, job: Job) {
        job();
    }
}

/// Fixed set of worker threads pulling jobs from a shared channel.
///
/// Dropping the pool closes the channel and joins the workers after they
/// finish the jobs already queued.
pub struct ThreadExecutor {
    tx: Option<Mutex<Sender<Job>>>,
    workers: Vec<JoinHandle<()>>,
}

impl ThreadExecutor {
    pub fn new(threads: usize) -> std::io::Result<Self> {
        let (tx, rx) = mpsc::channel::<Job>();
        let rx = Arc::new(Mutex::new(rx));
        let workers = (0..threads.max(1))
            .map(|i| {
                let rx = Arc::clone(&rx);
                std::thread::Builder::new()
                    .name(format!("palette-worker-{i}"))
                    .spawn(move || worker_loop(&rx))
            })
            .collect::<std::io::Result<Vec<_>>>()?;
        Ok(Self {
            tx: Some(Mutex::new(tx)),
            workers,
        })
    }
}

fn worker_loop(rx: &Mutex<Receiver<Job>>) {
    loop {
        let job = match rx.lock() {
            Ok(guard) => guard.recv(),
            Err(_) => return,
        };
        match job {
            Ok(job) => job(),
            Err(_) => return,
        }
    }
}

impl Executor for ThreadExecutor {
    fn execute(&self, job: Job) {
        let sent = match self.tx.as_ref().map(Mutex::lock) {
            Some(Ok(tx)) => tx.send(job).map_err(|mpsc::SendError(job)| job),
            _ => Err(job),
        };
        // Workers are gone; run here rather than lose the job.
        if let Err(job) = sent {
            log::warn!("worker pool unavailable; running job inline");
            job();
        }
    }
}

impl Drop for ThreadExecutor {
    fn drop(&mut self) {
        self.tx.take();
        for worker in self.workers.drain(..) {
            if worker.join().is_err() {
                log::warn!("palette worker panicked");
            }
        }
    }
}

/// A queue whose jobs run only when its owning thread drains it.
pub struct MainQueue {
    tx: Sender<Job>,
    rx: Receiver<Job>,
}

/// Sending half of a [`MainQueue`]; safe to share with worker threads.
#[derive(Clone)]
pub struct QueueHandle {
    tx: Sender<Job>,
}

impl MainQueue {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx }
    }

    pub fn handle(&self) -> QueueHandle {
        QueueHandle {
            tx: self.tx.clone(),
        }
    }

    /// Run every job queued so far without blocking. Returns how many ran.
    pub fn run_pending(&self) -> usize {
        let mut ran = 0;
        while let Ok(job) = self.rx.try_recv() {
            job();
            ran += 1;
        }
        ran
    }

    /// Block until one job arrives and run it.
    pub fn run_next(&self) {
        if let Ok(job) = self.rx.recv() {
            job();
        }
    }
}

impl Default for MainQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl Executor for QueueHandle {
    fn execute(&self, job: Job) {
        if let Err(mpsc::SendError(job)) = self.tx.send(job) {
            log::warn!("main queue closed; running completion inline");
            job();
        }
    }
}

/// Generate a palette on `worker` and call `completion` on `deliver`.
///
/// `completion` runs exactly once, after generation finishes, including when
/// the palette is empty.
pub fn generate_async<F>(
    samples: Vec<PixelSample>,
    config: PaletteConfig,
    worker: &dyn Executor,
    deliver: Arc<dyn Executor>,
    completion: F,
) where
    F: FnOnce(Palette) + Send + 'static,
{
    worker.execute(Box::new(move || {
        let palette = Palette::generate(&samples, &config);
        deliver.execute(Box::new(move || completion(palette)));
    }));
}
