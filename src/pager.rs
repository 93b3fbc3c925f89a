//! Fixed-size windows over a trip collection.
//!
//! The caller owns the [`PageCursor`] and hands it back on every call, so an
//! interactive loop can stop, resume or abandon paging at any point.

use crate::records::{TripCollection, TripRecord};

/// Rows shown per page.
pub const PAGE_SIZE: usize = 5;

/// Position of the next page to read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageCursor {
    offset: usize,
}

impl PageCursor {
    /// Cursor at the first record.
    pub fn start() -> Self {
        Self::default()
    }

    /// Cursor at the start of 0-based page `number`.
    pub fn at_page(number: usize) -> Self {
        Self {
            offset: number.saturating_mul(PAGE_SIZE),
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }
}

/// One window of records and where to continue from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Page<'a> {
    pub records: &'a [TripRecord],
    pub next: PageCursor,
    /// True once no records remain after this page.
    pub exhausted: bool,
}

/// Returns the page at `cursor`. Past the end, the page is empty and
/// `exhausted` is set; this is not an error.
pub fn page(trips: &TripCollection, cursor: PageCursor) -> Page<'_> {
    let records = trips.records();
    let start = cursor.offset.min(records.len());
    let end = start.saturating_add(PAGE_SIZE).min(records.len());

    Page {
        records: &records[start..end],
        next: PageCursor { offset: end },
        exhausted: end >= records.len(),
    }
}
