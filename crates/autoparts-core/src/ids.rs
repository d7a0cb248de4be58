//! # Identifier Generation
//!
//! Time-derived numeric ids for registered users and admin-created products.
//!
//! Ids are milliseconds since the Unix epoch, the same shape the browser
//! storefront produced, so existing stored records keep their ids. A
//! monotonic guard makes every id issued by one generator strictly greater
//! than the previous one, so two creations within the same millisecond
//! still get distinct ids. Ids from separate processes are not coordinated.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;

/// Issues strictly increasing, time-derived ids.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: AtomicI64,
}

impl IdGenerator {
    pub fn new() -> Self {
        IdGenerator {
            last: AtomicI64::new(0),
        }
    }

    /// A generator that never issues an id at or below `floor`.
    ///
    /// Used to stay ahead of ids already present in a loaded catalog.
    pub fn above(floor: i64) -> Self {
        IdGenerator {
            last: AtomicI64::new(floor),
        }
    }

    /// Next id based on the current wall clock.
    pub fn next_id(&self) -> i64 {
        self.next_at(Utc::now().timestamp_millis())
    }

    /// Next id given `now_millis`; at least one greater than the last issued.
    ///
    /// Saturates at `i64::MAX` if a stored id already sits at the top of
    /// the range.
    pub fn next_at(&self, now_millis: i64) -> i64 {
        let next = |last: i64| now_millis.max(last.saturating_add(1));
        let previous = self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| Some(next(last)))
            .unwrap_or_else(|last| last);
        next(previous)
    }

    /// Raises the floor so later ids are above `id`.
    pub fn observe(&self, id: i64) {
        self.last.fetch_max(id, Ordering::SeqCst);
    }
}
