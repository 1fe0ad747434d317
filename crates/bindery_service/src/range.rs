//! Byte range parsing for partial content reads.

/// One byte range from an HTTP `Range` header, offsets inclusive.
///
/// # Examples
///
/// ```
/// use bindery_service::ByteRange;
///
/// let range = ByteRange::parse("bytes=6-19").unwrap();
/// assert_eq!(range.to_bounds(27), Some((6, 19)));
///
/// // Open and suffix forms resolve against the stored length.
/// assert_eq!(ByteRange::parse("bytes=6-").unwrap().to_bounds(27), Some((6, 26)));
/// assert_eq!(ByteRange::parse("bytes=-6").unwrap().to_bounds(27), Some((21, 26)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ByteRange {
    /// `bytes=start-end`
    Bounded {
        /// First byte offset, inclusive
        start: u64,
        /// Last byte offset, inclusive
        end: u64,
    },
    /// `bytes=start-`, everything from `start` to the end
    From {
        /// First byte offset, inclusive
        start: u64,
    },
    /// `bytes=-length`, the final `length` bytes
    Suffix {
        /// Number of trailing bytes
        length: u64,
    },
}

impl ByteRange {
    /// Parses a `Range` header rendering.
    ///
    /// Returns `None` for malformed specs and for multi-range specs, which
    /// callers treat as if no range was requested.
    pub fn parse(rendering: &str) -> Option<Self> {
        let spec = rendering.strip_prefix("bytes=")?;
        if spec.contains(',') {
            return None;
        }
        let (start, end) = spec.split_once('-')?;
        match (start.trim(), end.trim()) {
            ("", "") => None,
            ("", length) => Some(Self::Suffix {
                length: length.parse().ok()?,
            }),
            (start, "") => Some(Self::From {
                start: start.parse().ok()?,
            }),
            (start, end) => {
                let start: u64 = start.parse().ok()?;
                let end: u64 = end.parse().ok()?;
                (start <= end).then_some(Self::Bounded { start, end })
            }
        }
    }

    /// Resolves the range against a total stored length.
    ///
    /// The end offset is clamped to the final stored byte. Returns the
    /// inclusive `(start, end)` pair, or `None` when the range selects no
    /// stored bytes.
    pub fn to_bounds(&self, total: u64) -> Option<(u64, u64)> {
        if total == 0 {
            return None;
        }
        let last = total - 1;
        match *self {
            Self::Bounded { start, end } => (start <= last).then(|| (start, end.min(last))),
            Self::From { start } => (start <= last).then_some((start, last)),
            Self::Suffix { length } => {
                (length > 0).then(|| (total.saturating_sub(length), last))
            }
        }
    }
}
