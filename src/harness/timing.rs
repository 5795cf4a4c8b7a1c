use std::io::Write;
use std::time::Instant;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info};

use super::{HarnessError, HarnessResult};
use crate::collections::LinkedList;

/// one timed sort
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub seconds: f64,
    pub size: usize,
}

/// the input sizes to time, `start..end` by `step`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepConfig {
    pub start: usize,
    pub end: usize,
    pub step: usize,
}

impl SweepConfig {
    pub const DEFAULT_START: usize = 2;
    pub const DEFAULT_END: usize = 1_000_000;

    pub fn validate(&self) -> HarnessResult<()> {
        if self.step == 0 || self.start > self.end {
            return Err(HarnessError::InvalidSweep {
                start: self.start,
                end: self.end,
                step: self.step,
            });
        }
        Ok(())
    }

    pub fn sizes(&self) -> impl Iterator<Item = usize> {
        (self.start..self.end).step_by(self.step.max(1))
    }
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            start: Self::DEFAULT_START,
            end: Self::DEFAULT_END,
            step: 1,
        }
    }
}

/// build a list of `0..size` in random order and time only the sort
pub fn time_merge_sort<R: Rng + ?Sized>(size: usize, rng: &mut R) -> HarnessResult<Sample> {
    let mut values: Vec<usize> = (0..size).collect();
    values.shuffle(rng);
    let mut list: LinkedList<usize> = values.into_iter().collect();

    let started = Instant::now();
    list.merge_sort();
    let seconds = started.elapsed().as_secs_f64();

    if !list.is_sorted() || list.len() != size {
        return Err(HarnessError::Unsorted { size });
    }
    Ok(Sample { seconds, size })
}

/// headerless `seconds,size` records, one per line
pub struct TimingLog<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> TimingLog<W> {
    pub fn new(inner: W) -> Self {
        Self {
            writer: csv::WriterBuilder::new()
                .has_headers(false)
                .terminator(csv::Terminator::Any(b'\n'))
                .from_writer(inner),
        }
    }

    pub fn record(&mut self, sample: &Sample) -> HarnessResult<()> {
        self.writer
            .write_record([sample.seconds.to_string(), sample.size.to_string()])?;
        Ok(())
    }

    pub fn flush(&mut self) -> HarnessResult<()> {
        self.writer.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> HarnessResult<W> {
        self.writer
            .into_inner()
            .map_err(|e| HarnessError::Io(e.into_error()))
    }
}

/// time a sort for every size in `config`, logging each sample. returns the
/// number of samples written.
pub fn run_sweep<W: Write, R: Rng + ?Sized>(
    config: &SweepConfig,
    rng: &mut R,
    log: &mut TimingLog<W>,
) -> HarnessResult<usize> {
    config.validate()?;
    info!(
        start = config.start,
        end = config.end,
        step = config.step,
        "starting merge sort sweep"
    );

    let mut written = 0;
    for size in config.sizes() {
        let sample = time_merge_sort(size, rng)?;
        debug!(size, seconds = sample.seconds, "sorted");
        log.record(&sample)?;
        written += 1;
    }

    log.flush()?;
    info!(samples = written, "sweep finished");
    Ok(written)
}
