//! Scheduled continuations for a single-threaded event loop
//!
//! Two kinds of suspension exist: timers that become due at a deadline, and
//! work deferred to the next animation frame. Nothing here can be cancelled;
//! a continuation that should not run must check its own staleness.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::time::Duration;

#[derive(Debug)]
struct Scheduled<T> {
    deadline: Duration,
    seq: u64,
    task: T,
}

impl<T> PartialEq for Scheduled<T> {
    fn eq(&self, other: &Self) -> bool {
        self.deadline == other.deadline && self.seq == other.seq
    }
}

impl<T> Eq for Scheduled<T> {}

impl<T> PartialOrd for Scheduled<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Scheduled<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.deadline
            .cmp(&other.deadline)
            .then(self.seq.cmp(&other.seq))
    }
}

/// Deadline-ordered timers plus a next-frame list
///
/// Timers with equal deadlines run in the order they were scheduled.
#[derive(Debug)]
pub struct TaskQueue<T> {
    timers: BinaryHeap<Reverse<Scheduled<T>>>,
    frame: Vec<T>,
    seq: u64,
}

impl<T> Default for TaskQueue<T> {
    fn default() -> Self {
        Self {
            timers: BinaryHeap::new(),
            frame: Vec::new(),
            seq: 0,
        }
    }
}

impl<T> TaskQueue<T> {
    /// Empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `task` once the clock reaches `deadline`
    pub fn schedule_at(&mut self, deadline: Duration, task: T) {
        let seq = self.seq;
        self.seq += 1;
        self.timers.push(Reverse(Scheduled {
            deadline,
            seq,
            task,
        }));
    }

    /// Run `task` on the next animation frame
    pub fn request_frame(&mut self, task: T) {
        self.frame.push(task);
    }

    /// Remove and return the earliest timer due at `now`
    pub fn pop_due(&mut self, now: Duration) -> Option<T> {
        if self.timers.peek()?.0.deadline > now {
            return None;
        }
        self.timers.pop().map(|Reverse(s)| s.task)
    }

    /// Take every frame task requested so far. Tasks requested while these run
    /// belong to the following frame.
    pub fn take_frame(&mut self) -> Vec<T> {
        std::mem::take(&mut self.frame)
    }

    /// Deadline of the earliest pending timer
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.peek().map(|Reverse(s)| s.deadline)
    }

    /// Number of pending timers
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Number of tasks waiting for the next frame
    pub fn pending_frames(&self) -> usize {
        self.frame.len()
    }

    /// Nothing is waiting
    pub fn is_idle(&self) -> bool {
        self.timers.is_empty() && self.frame.is_empty()
    }
}
