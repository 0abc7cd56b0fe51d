use std::fmt;
use std::num::NonZeroUsize;

/// Joins part numbers inside one request. The search API splits on it.
pub const DELIMITER: &str = "|";

/// The API accepts at most ten part numbers per request
pub const DEFAULT_BATCH_SIZE: NonZeroUsize = NonZeroUsize::new(10).unwrap();

/// Half-open row range `[start, end)` over the input list.
///
/// Bounds are clamped to the list when applied, so `end` may exceed its
/// length and an out-of-range `start` simply selects nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start: usize,
    pub end: usize,
}

impl Window {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Window covering everything from `start` onwards
    pub fn from_start(start: usize) -> Self {
        Self {
            start,
            end: usize::MAX,
        }
    }

    pub fn apply<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let end = self.end.min(items.len());
        let start = self.start.min(end);
        &items[start..end]
    }
}

/// An ordered group of part numbers sent in a single request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    mpns: Vec<String>,
}

impl Batch {
    pub fn mpns(&self) -> &[String] {
        &self.mpns
    }

    pub fn len(&self) -> usize {
        self.mpns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mpns.is_empty()
    }

    /// Request string: part numbers joined by [`DELIMITER`]
    pub fn query(&self) -> String {
        self.mpns.join(DELIMITER)
    }
}

impl fmt::Display for Batch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.query())
    }
}

/// Split `mpns` into consecutive batches of `max_per_group`, keeping input order.
///
/// The window, if any, is applied first. The last batch holds the remainder.
pub fn group<S: AsRef<str>>(
    mpns: &[S],
    max_per_group: NonZeroUsize,
    window: Option<Window>,
) -> Vec<Batch> {
    let selected = match window {
        Some(window) => window.apply(mpns),
        None => mpns,
    };

    selected
        .chunks(max_per_group.get())
        .map(|chunk| Batch {
            mpns: chunk.iter().map(|mpn| mpn.as_ref().to_string()).collect(),
        })
        .collect()
}
