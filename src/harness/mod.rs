//! drivers that exercise [`LinkedList`](crate::collections::LinkedList) from
//! the outside: the pass/fail demonstration, the timing sweep and the
//! command line that selects between them.

pub mod checks;
pub mod cli;
pub mod timing;

use crate::collections::LinkedListError;

pub type HarnessResult<T> = Result<T, HarnessError>;

#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    List(#[from] LinkedListError),
    #[error("invalid sweep {start}..{end} step {step}")]
    InvalidSweep {
        start: usize,
        end: usize,
        step: usize,
    },
    #[error("merge sort left a list of {size} elements unsorted")]
    Unsorted { size: usize },
}
