use std::fmt;
use std::time::Instant;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use super::HarnessResult;
use crate::collections::LinkedList;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckOutcome {
    pub id: u8,
    pub passed: bool,
}

impl fmt::Display for CheckOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verdict = if self.passed { "Passed" } else { "Failed" };
        write!(f, "Test {} {}", self.id, verdict)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DemoReport {
    pub outcomes: Vec<CheckOutcome>,
    /// time spent in the final check's merge sort
    pub sort_seconds: f64,
}

impl DemoReport {
    pub fn all_passed(&self) -> bool {
        self.outcomes.iter().all(|o| o.passed)
    }

    pub fn failures(&self) -> impl Iterator<Item = &CheckOutcome> {
        self.outcomes.iter().filter(|o| !o.passed)
    }
}

#[derive(Default)]
struct Recorder {
    outcomes: Vec<CheckOutcome>,
}

impl Recorder {
    fn check(&mut self, passed: bool) {
        let id = self.outcomes.len() as u8 + 1;
        debug!(id, passed, "check");
        self.outcomes.push(CheckOutcome { id, passed });
    }
}

/// run the thirteen demonstration checks against [`LinkedList`]
pub fn run_demo<R: Rng + ?Sized>(rng: &mut R) -> HarnessResult<DemoReport> {
    let mut rec = Recorder::default();

    let mut lst: LinkedList<u32> = (0..100).collect();
    let mut lst2: LinkedList<u32> = lst.iter().copied().collect();
    debug!(%lst, %lst2, "built");

    rec.check(lst == lst2);

    let lst3 = &lst + &lst2;
    rec.check(lst3.len() == lst.len() + lst2.len());
    rec.check(lst3.contains(&1));
    rec.check(lst3.contains(&2));

    lst.delete_at(1)?;
    rec.check(!lst.contains(&1));
    rec.check(lst.len() == 99);
    rec.check(lst != lst2);

    lst2.delete_at(2)?;
    rec.check(lst != lst2);

    let lst4: LinkedList<u32> = lst.iter().copied().collect();
    lst.insert(0, 100);
    let mut lst4 = &LinkedList::from([100]) + &lst4;
    rec.check(lst == lst4);

    lst.insert(1000, 333);
    lst4.append(333);
    rec.check(lst == lst4);
    debug!(%lst, %lst4, "after inserts");

    let mut lst5 = LinkedList::from([1, 2, 3, 4, 5, 6, 7, 8]);
    let lst6 = lst5.split(4)?;
    debug!(%lst5, %lst6, "split");
    let lst7 = LinkedList::from([1, 2, 3, 4, 5, 6, 7, 8]);
    lst5.merge(lst6);
    debug!(%lst5, "merged");
    rec.check(lst5 == lst7);

    let lst8 = LinkedList::from([5, 3, 6, 2, 1, 7, 4, 8]);
    rec.check(lst7.is_sorted() && !lst8.is_sorted());

    let mut longlst: Vec<u32> = (0..1000).collect();
    longlst.shuffle(rng);
    let mut lst9: LinkedList<u32> = longlst.into_iter().collect();
    let started = Instant::now();
    lst9.merge_sort();
    let sort_seconds = started.elapsed().as_secs_f64();
    rec.check(lst9.is_sorted() && lst9.len() == 1000);

    Ok(DemoReport {
        outcomes: rec.outcomes,
        sort_seconds,
    })
}
