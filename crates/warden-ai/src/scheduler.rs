//! Cooperative single-task scheduler.
//!
//! A behavior runs as a resumable task. Each time it is resumed it does some
//! work and returns how long it wants to sleep. The scheduler holds at most
//! one task; starting another one drops the old task on the spot, so any
//! effect the old task had not reached yet never happens.

/// Elapsed-time tolerance when deciding whether a wait is over.
pub const WAIT_TOLERANCE: f32 = 1e-4;

/// What a task asks for when it yields control.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Suspend {
    /// Resume on the very next tick.
    NextTick,
    /// Resume on the first tick at which this many seconds have elapsed.
    After(f32),
    /// The task has finished and must not be resumed again.
    Done,
}

/// A unit of cooperative work.
pub trait Resumable<Ctx: ?Sized> {
    /// Runs until the next suspension point.
    fn resume(&mut self, ctx: &mut Ctx) -> Suspend;
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Wait {
    NextTick,
    Remaining(f32),
}

/// Owns the single active task of an agent.
#[derive(Debug)]
pub struct Scheduler<T> {
    task: Option<T>,
    wait: Option<Wait>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            task: None,
            wait: None,
        }
    }
}

impl<T> Scheduler<T> {
    /// Creates an empty scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a task is alive.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.task.is_some()
    }

    /// The active task, if any.
    #[must_use]
    pub fn task(&self) -> Option<&T> {
        self.task.as_ref()
    }

    /// Seconds left on the current timed wait, if the task is in one.
    #[must_use]
    pub fn remaining_wait(&self) -> Option<f32> {
        match self.wait {
            Some(Wait::Remaining(left)) => Some(left.max(0.0)),
            _ => None,
        }
    }

    /// Drops the active task without running anything.
    pub fn cancel(&mut self) -> Option<T> {
        self.wait = None;
        self.task.take()
    }

    /// Replaces the active task and runs the new one up to its first
    /// suspension point.
    pub fn start<Ctx: ?Sized>(&mut self, task: T, ctx: &mut Ctx)
    where
        T: Resumable<Ctx>,
    {
        self.cancel();
        self.task = Some(task);
        self.run(ctx);
    }

    /// Advances time by `dt` and resumes the task if its wait is over.
    pub fn advance<Ctx: ?Sized>(&mut self, dt: f32, ctx: &mut Ctx)
    where
        T: Resumable<Ctx>,
    {
        let ready = match self.wait {
            None => return,
            Some(Wait::NextTick) => true,
            Some(Wait::Remaining(left)) => {
                let left = left - dt;
                if left <= WAIT_TOLERANCE {
                    true
                } else {
                    self.wait = Some(Wait::Remaining(left));
                    false
                }
            },
        };
        if ready {
            self.run(ctx);
        }
    }

    fn run<Ctx: ?Sized>(&mut self, ctx: &mut Ctx)
    where
        T: Resumable<Ctx>,
    {
        let Some(task) = self.task.as_mut() else {
            self.wait = None;
            return;
        };
        match task.resume(ctx) {
            Suspend::NextTick => self.wait = Some(Wait::NextTick),
            Suspend::After(seconds) => self.wait = Some(Wait::Remaining(seconds)),
            Suspend::Done => {
                self.task = None;
                self.wait = None;
            },
        }
    }
}
