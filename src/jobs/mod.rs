//! Run/backoff job scheduler: drives a pair of injected enable/disable
//! hooks for a bounded duration, then enforces a backoff window before
//! the job may run again. An optional run-once latch blocks re-runs
//! until explicitly cleared.
//!
//! The scheduler keeps no clock of its own; every method takes the
//! current monotonic time in milliseconds. Firmware calls
//! [`JobManager::handle`] from its main loop the way it polls the player.

/// Duration-bounded job with backoff. `E` and `D` are the enable and
/// disable hooks, injected as closures.
pub struct JobManager<E, D>
where
    E: FnMut(),
    D: FnMut(),
{
    enable: E,
    disable: D,
    job_duration_ms: u64,
    backoff_duration_ms: u64,
    job_started_at: u64,
    backoff_started_at: u64,
    running: bool,
    in_backoff: bool,
    run_once: bool,
    has_run: bool,
}

impl<E, D> JobManager<E, D>
where
    E: FnMut(),
    D: FnMut(),
{
    /// Scheduler in the idle state. A zero `backoff_duration_ms` disables
    /// the backoff window entirely.
    pub fn new(
        job_duration_ms: u64,
        backoff_duration_ms: u64,
        enable: E,
        disable: D,
        run_once: bool,
    ) -> Self {
        Self {
            enable,
            disable,
            job_duration_ms,
            backoff_duration_ms,
            job_started_at: 0,
            backoff_started_at: 0,
            running: false,
            in_backoff: false,
            run_once,
            has_run: false,
        }
    }

    /// Start life inside a backoff window instead of idle. In run-once
    /// mode this also latches the job as already run.
    pub fn starting_in_backoff(mut self, now_ms: u64) -> Self {
        if self.run_once {
            self.has_run = true;
        }
        self.backoff_started_at = now_ms;
        self.in_backoff = true;
        self
    }

    /// Start the job if it is not running, not in backoff, and not
    /// blocked by the run-once latch. Fires the enable hook exactly once
    /// per started job.
    pub fn start_job(&mut self, now_ms: u64) {
        if !self.running && !self.in_backoff && (!self.run_once || !self.has_run) {
            self.running = true;
            self.has_run = true;
            (self.enable)();
            self.job_started_at = now_ms;
        }
    }

    /// Clear the run-once latch. Only allowed once the job is idle and
    /// the backoff window has passed.
    pub fn reset_run_once(&mut self) {
        if !self.running && !self.in_backoff {
            self.has_run = false;
        }
    }

    /// Restart the duration countdown of a job that is currently running.
    pub fn restart_job_timer(&mut self, now_ms: u64) {
        if self.running && !self.in_backoff {
            self.job_started_at = now_ms;
        }
    }

    /// Extend an active backoff window from `now_ms`. A window that has
    /// already expired stays expired.
    pub fn renew_backoff(&mut self, now_ms: u64) {
        if self.in_backoff && now_ms < self.backoff_started_at + self.backoff_duration_ms {
            self.backoff_started_at = now_ms;
        }
    }

    /// Stop the job immediately, firing the disable hook, and enter the
    /// backoff window when one is configured.
    pub fn end_job(&mut self, now_ms: u64) {
        if self.running {
            (self.disable)();
            self.running = false;
        }
        if self.backoff_duration_ms != 0 {
            self.in_backoff = true;
            self.backoff_started_at = now_ms;
        }
    }

    /// Advance the state machine: ends an expired job and closes an
    /// expired backoff window. Call from the main loop.
    pub fn handle(&mut self, now_ms: u64) {
        if self.running && now_ms >= self.job_started_at + self.job_duration_ms {
            self.end_job(now_ms);
        }
        if self.in_backoff && now_ms >= self.backoff_started_at + self.backoff_duration_ms {
            self.in_backoff = false;
        }
    }

    /// Milliseconds until the running job expires; zero when idle.
    pub fn remaining_job_time(&self, now_ms: u64) -> u64 {
        if !self.running {
            return 0;
        }
        (self.job_started_at + self.job_duration_ms).saturating_sub(now_ms)
    }

    /// Milliseconds until the backoff window closes; zero when not in
    /// backoff.
    pub fn remaining_backoff_time(&self, now_ms: u64) -> u64 {
        if !self.in_backoff {
            return 0;
        }
        (self.backoff_started_at + self.backoff_duration_ms).saturating_sub(now_ms)
    }

    /// Replace the job duration; applies from the next start or restart.
    pub fn set_job_duration(&mut self, job_duration_ms: u64) {
        self.job_duration_ms = job_duration_ms;
    }

    /// Replace the backoff duration.
    pub fn set_backoff_duration(&mut self, backoff_duration_ms: u64) {
        self.backoff_duration_ms = backoff_duration_ms;
    }

    pub fn job_duration(&self) -> u64 {
        self.job_duration_ms
    }

    pub fn backoff_duration(&self) -> u64 {
        self.backoff_duration_ms
    }

    pub fn is_job_active(&self) -> bool {
        self.running
    }

    pub fn is_backoff_active(&self) -> bool {
        self.in_backoff
    }
}
