//! Per-row data for the scrollable text section.
//!
//! Every text row carries two index-aligned words: the distance to the nearest day-header origin
//! at or above it, and either four palette indices (one per color column) or a reference into the
//! day-header sprite.

use crate::{
    codec::schema::ROW_BITS,
    foundation::{
        error::{ScrollcalError, ScrollcalResult},
        style::{PAL_TEXT, PALETTE_LEN},
    },
};

/// Marks a `row_info` word as a header reference.
pub const HEADER_FLAG: u32 = 1 << (ROW_BITS - 1);
/// `prev_day_header` value for rows with no header above them.
pub const NO_PRIOR_HEADER: u32 = (1 << ROW_BITS) - 1;

const PALETTE_BITS: u32 = 3;
const PALETTE_MASK: u32 = (1 << PALETTE_BITS) - 1;

/// Palette indices for rows nothing covers.
pub const DEFAULT_COLUMNS: [u8; 4] = [PAL_TEXT; 4];

/// What a text row shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowKind {
    /// Text tinted per column with palette indices.
    Text([u8; 4]),
    /// Row `offset` of the day-header sprite.
    Header { offset: u32 },
}

impl RowKind {
    /// Flatten to a `row_info` word.
    pub fn to_wire(self) -> ScrollcalResult<u32> {
        match self {
            RowKind::Text(cols) => {
                let mut word = 0;
                for idx in cols {
                    if usize::from(idx) >= PALETTE_LEN {
                        return Err(ScrollcalError::configuration(format!(
                            "palette index {idx} out of range"
                        )));
                    }
                    word = (word << PALETTE_BITS) | u32::from(idx);
                }
                Ok(word)
            }
            RowKind::Header { offset } => {
                if offset >= HEADER_FLAG {
                    return Err(ScrollcalError::configuration(format!(
                        "header offset {offset} does not fit beside the header flag"
                    )));
                }
                Ok(HEADER_FLAG | offset)
            }
        }
    }

    /// Inverse of [`RowKind::to_wire`].
    pub fn from_wire(word: u32) -> ScrollcalResult<Self> {
        if word >= 1 << ROW_BITS {
            return Err(ScrollcalError::configuration(format!(
                "row_info word {word:#x} wider than {ROW_BITS} bits"
            )));
        }
        if word & HEADER_FLAG != 0 {
            return Ok(RowKind::Header {
                offset: word & !HEADER_FLAG,
            });
        }
        if word >> (PALETTE_BITS * 4) != 0 {
            return Err(ScrollcalError::configuration(format!(
                "row_info word {word:#x} has stray bits"
            )));
        }
        let mut cols = [0u8; 4];
        for (i, slot) in cols.iter_mut().enumerate() {
            let shift = PALETTE_BITS * (3 - i as u32);
            *slot = ((word >> shift) & PALETTE_MASK) as u8;
        }
        Ok(RowKind::Text(cols))
    }
}

/// One row of the text section.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RowData {
    /// Rows since the nearest header origin at or above this row.
    pub prior_header: Option<u32>,
    pub kind: RowKind,
}

/// The text section's rows, flattened to two arrays on the wire.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RowArrays {
    rows: Vec<RowData>,
}

impl RowArrays {
    pub fn new(rows: Vec<RowData>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[RowData] {
        &self.rows
    }

    /// The `prev_day_header` array.
    ///
    /// A distance that reaches the sentinel cannot be told apart from "no header" and is rejected.
    pub fn prior_header_words(&self) -> ScrollcalResult<Vec<u32>> {
        self.rows
            .iter()
            .map(|r| match r.prior_header {
                Some(d) if d >= NO_PRIOR_HEADER => Err(ScrollcalError::configuration(format!(
                    "prior header distance {d} does not fit in {ROW_BITS} bits"
                ))),
                Some(d) => Ok(d),
                None => Ok(NO_PRIOR_HEADER),
            })
            .collect()
    }

    /// The `row_info` array.
    pub fn row_info_words(&self) -> ScrollcalResult<Vec<u32>> {
        self.rows.iter().map(|r| r.kind.to_wire()).collect()
    }

    /// Rebuild rows from the two wire arrays.
    pub fn from_wire(prior: &[u32], info: &[u32]) -> ScrollcalResult<Self> {
        if prior.len() != info.len() {
            return Err(ScrollcalError::configuration(format!(
                "row arrays disagree in length: {} vs {}",
                prior.len(),
                info.len()
            )));
        }
        let rows = prior
            .iter()
            .zip(info)
            .map(|(&p, &w)| {
                Ok(RowData {
                    prior_header: (p != NO_PRIOR_HEADER).then_some(p),
                    kind: RowKind::from_wire(w)?,
                })
            })
            .collect::<ScrollcalResult<Vec<_>>>()?;
        Ok(Self { rows })
    }
}

/// What a timeline entry puts on its rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryKind {
    /// A day header; its rows reference the header sprite.
    Header,
    /// Anything else, tinted with the given column palette.
    Body { colors: [u8; 4] },
}

/// A vertical span of the text section.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimelineEntry {
    pub top: u32,
    pub height: u32,
    pub kind: EntryKind,
}

/// Resolve `entries` into `row_count` rows.
///
/// Header rows win over body rows. Where headers overlap, a row belongs to the header whose origin
/// is nearest above it. Body entries later in `entries` win over earlier ones. Uncovered rows use
/// [`DEFAULT_COLUMNS`]. Headers taller than `header_height` are rejected, since their rows would
/// address past the end of the sprite.
#[tracing::instrument(skip(entries), fields(entries = entries.len()))]
pub fn encode_rows(
    entries: &[TimelineEntry],
    row_count: u32,
    header_height: u32,
) -> ScrollcalResult<RowArrays> {
    let n = row_count as usize;
    let mut kinds = vec![RowKind::Text(DEFAULT_COLUMNS); n];

    for entry in entries {
        if let EntryKind::Body { colors } = entry.kind {
            for y in span(entry, row_count) {
                kinds[y] = RowKind::Text(colors);
            }
        }
    }

    let mut headers: Vec<&TimelineEntry> = entries
        .iter()
        .filter(|e| e.kind == EntryKind::Header)
        .collect();
    headers.sort_by_key(|e| e.top);

    for header in &headers {
        if header.height > header_height {
            return Err(ScrollcalError::configuration(format!(
                "header at row {} is {} rows tall; sprite has {header_height}",
                header.top, header.height
            )));
        }
        // Ascending tops: a later header is nearer for every row it shares with an earlier one.
        for y in span(header, row_count) {
            kinds[y] = RowKind::Header {
                offset: y as u32 - header.top,
            };
        }
    }

    let mut rows = Vec::with_capacity(n);
    let mut next = headers.iter().peekable();
    let mut origin = None;
    for (y, kind) in kinds.into_iter().enumerate() {
        while let Some(h) = next.next_if(|h| h.top as usize <= y) {
            origin = Some(h.top);
        }
        rows.push(RowData {
            prior_header: origin.map(|o| y as u32 - o),
            kind,
        });
    }

    tracing::debug!(rows = rows.len(), headers = headers.len(), "encoded rows");
    Ok(RowArrays::new(rows))
}

fn span(entry: &TimelineEntry, row_count: u32) -> std::ops::Range<usize> {
    let top = entry.top.min(row_count);
    let end = entry.top.saturating_add(entry.height).min(row_count);
    top as usize..end as usize
}

#[cfg(test)]
#[path = "../../tests/unit/rows/encoder.rs"]
mod tests;
