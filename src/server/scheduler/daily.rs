use std::{future::Future, sync::Arc, time::Duration};

use chrono::{DateTime, NaiveTime, TimeDelta, Utc};
use tokio::{sync::watch, task::JoinHandle};

use crate::server::{
    error::AppError,
    scheduler::clock::{Clock, SystemClock},
    util::shutdown::Shutdown,
};

/// Runs a job once a day at a fixed UTC time.
///
/// Runs never overlap: the next occurrence is only computed once the previous run has
/// finished. Occurrences missed while the process was down are not made up.
pub struct DailyScheduler {
    name: &'static str,
    at: NaiveTime,
    run_on_startup: bool,
    clock: Arc<dyn Clock>,
}

impl DailyScheduler {
    /// Creates a scheduler firing daily at `at` (UTC) using the system clock.
    ///
    /// # Arguments
    /// - `name` - Job name used in log output
    /// - `at` - UTC wall-clock time to fire at
    pub fn new(name: &'static str, at: NaiveTime) -> Self {
        Self {
            name,
            at,
            run_on_startup: false,
            clock: Arc::new(SystemClock),
        }
    }

    /// Also runs the job once immediately when started.
    pub fn run_on_startup(mut self, run_on_startup: bool) -> Self {
        self.run_on_startup = run_on_startup;
        self
    }

    /// Replaces the clock used to decide when to fire.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Next instant strictly after `now` whose UTC time of day is `at`.
    pub fn next_run_after(now: DateTime<Utc>, at: NaiveTime) -> DateTime<Utc> {
        let today = now.date_naive().and_time(at).and_utc();

        if today > now {
            today
        } else {
            today + TimeDelta::days(1)
        }
    }

    /// Spawns the scheduling loop.
    ///
    /// Each run executes on its own task so a panicking run is logged instead of stopping
    /// the loop. A run returning an error is logged and the loop waits for the next day.
    ///
    /// # Arguments
    /// - `job` - Called with the tick instant and the shutdown signal for every run
    ///
    /// # Returns
    /// - `SchedulerHandle` - Handle used to stop the loop
    pub fn start<F, Fut>(self, job: F) -> SchedulerHandle
    where
        F: Fn(DateTime<Utc>, Shutdown) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), AppError>> + Send + 'static,
    {
        let (tx, shutdown) = Shutdown::channel();
        let task = tokio::spawn(self.run(job, shutdown));

        SchedulerHandle { shutdown: tx, task }
    }

    async fn run<F, Fut>(self, job: F, mut shutdown: Shutdown)
    where
        F: Fn(DateTime<Utc>, Shutdown) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), AppError>> + Send + 'static,
    {
        let mut last_tick = None;

        if self.run_on_startup {
            let now = self.clock.now();
            self.run_once(&job, now, &shutdown).await;
            last_tick = Some(now);
        }

        loop {
            let now = self.clock.now();
            // Never fire twice for the same occurrence if the clock lags the timer.
            let after = last_tick.map_or(now, |tick: DateTime<Utc>| tick.max(now));
            let next = Self::next_run_after(after, self.at);
            let wait = (next - now).to_std().unwrap_or(Duration::ZERO);

            tracing::info!("Next {} run at {}", self.name, next);

            tokio::select! {
                _ = tokio::time::sleep(wait) => {}
                _ = shutdown.triggered() => break,
            }

            if shutdown.is_triggered() {
                break;
            }

            let tick = self.clock.now().max(next);
            self.run_once(&job, tick, &shutdown).await;
            last_tick = Some(tick);
        }

        tracing::info!("{} scheduler stopped", self.name);
    }

    async fn run_once<F, Fut>(&self, job: &F, tick: DateTime<Utc>, shutdown: &Shutdown)
    where
        F: Fn(DateTime<Utc>, Shutdown) -> Fut,
        Fut: Future<Output = Result<(), AppError>> + Send + 'static,
    {
        tracing::info!("Starting {} run", self.name);

        match tokio::spawn(job(tick, shutdown.clone())).await {
            Ok(Ok(())) => tracing::info!("Finished {} run", self.name),
            Ok(Err(e)) => tracing::error!("{} run failed: {}", self.name, e),
            Err(e) => tracing::error!("{} run aborted: {}", self.name, e),
        }
    }
}

/// Handle to a running `DailyScheduler`.
pub struct SchedulerHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl SchedulerHandle {
    /// Signals shutdown and waits for the loop to exit.
    ///
    /// A sleeping loop exits immediately. A run in progress sees the signal between units
    /// of work and is awaited before returning.
    ///
    /// # Returns
    /// - `Ok(())` - Loop exited
    /// - `Err(AppError::JoinErr)` - Loop task panicked
    pub async fn stop(self) -> Result<(), AppError> {
        let _ = self.shutdown.send(true);
        self.task.await?;
        Ok(())
    }

    /// Whether the loop task has exited.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}
