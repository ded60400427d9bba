//! Timed progress sequence.

use std::iter::FusedIterator;
use std::time::Duration;

use crate::domain::Progress;
use crate::ports::{Pacer, StepSource};

/// Smallest increment applied per step.
pub const MIN_STEP: u8 = 5;
/// Largest increment applied per step.
pub const MAX_STEP: u8 = 19;
/// Pause before each stepped emission.
pub const DEFAULT_STEP_DELAY: Duration = Duration::from_millis(120);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Stepping,
    Settling,
    Done,
}

/// Lazy, finite sequence of progress values for one run.
///
/// Each stepped value is emitted after the pacer has waited for the step
/// delay. Once 100 is reached, 100 is emitted one more time without a pause,
/// then the stream ends. Steps are clamped into [`MIN_STEP`]..=[`MAX_STEP`],
/// so the stream terminates whatever the step source returns.
pub struct ProgressStream<'a, S: StepSource + ?Sized, P: Pacer + ?Sized> {
    current: Progress,
    phase: Phase,
    steps: &'a mut S,
    pacer: &'a P,
    delay: Duration,
}

impl<'a, S: StepSource + ?Sized, P: Pacer + ?Sized> ProgressStream<'a, S, P> {
    /// Creates a stream starting at zero.
    pub fn new(steps: &'a mut S, pacer: &'a P, delay: Duration) -> Self {
        Self {
            current: Progress::ZERO,
            phase: Phase::Stepping,
            steps,
            pacer,
            delay,
        }
    }

    /// Last emitted value, or zero before the first emission.
    #[must_use]
    pub const fn current(&self) -> Progress {
        self.current
    }
}

impl<S: StepSource + ?Sized, P: Pacer + ?Sized> Iterator for ProgressStream<'_, S, P> {
    type Item = Progress;

    fn next(&mut self) -> Option<Progress> {
        match self.phase {
            Phase::Stepping => {
                let step = self.steps.next_step().clamp(MIN_STEP, MAX_STEP);
                self.pacer.pause(self.delay);
                self.current = self.current.advance(step);
                if self.current.is_complete() {
                    self.phase = Phase::Settling;
                }
                Some(self.current)
            }
            Phase::Settling => {
                self.phase = Phase::Done;
                self.current = Progress::COMPLETE;
                Some(Progress::COMPLETE)
            }
            Phase::Done => None,
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::from(Progress::COMPLETE.value() - self.current.value());
        match self.phase {
            Phase::Stepping => (
                remaining.div_ceil(usize::from(MAX_STEP)) + 1,
                Some(remaining.div_ceil(usize::from(MIN_STEP)) + 1),
            ),
            Phase::Settling => (1, Some(1)),
            Phase::Done => (0, Some(0)),
        }
    }
}

impl<S: StepSource + ?Sized, P: Pacer + ?Sized> FusedIterator for ProgressStream<'_, S, P> {}
