use fnv::FnvHashMap;
use thiserror::Error;

/// A contiguous scroll-ratio range mapped to a theme and optional ambient track.
///
/// Ranges are half-open `[range_start, range_end)`; the table's final zone is
/// closed on top so a ratio of exactly 1.0 still resolves.
#[derive(Clone, Debug, PartialEq)]
pub struct Zone {
    pub id: String,
    pub range_start: f64,
    pub range_end: f64,
    /// `None` marks a deliberate silence zone.
    pub track: Option<String>,
    pub fade_in_sec: f32,
    pub fade_out_sec: f32,
}

impl Zone {
    pub fn new(
        id: &str,
        range_start: f64,
        range_end: f64,
        track: Option<&str>,
        fade_in_sec: f32,
        fade_out_sec: f32,
    ) -> Self {
        Self {
            id: id.to_string(),
            range_start,
            range_end,
            track: track.map(|t| t.to_string()),
            fade_in_sec,
            fade_out_sec,
        }
    }

    /// Midpoint of the range, used as the landing ratio for scroll teleports.
    pub fn mid_ratio(&self) -> f64 {
        (self.range_start + self.range_end) * 0.5
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ZoneTableError {
    #[error("zone `{0}` has an empty or inverted range")]
    InvalidRange(String),
    #[error("zone `{0}` lies outside [0, 1]")]
    OutOfBounds(String),
    #[error("zones `{0}` and `{1}` overlap")]
    Overlap(String, String),
    #[error("duplicate zone id `{0}`")]
    DuplicateId(String),
}

/// Immutable, ordered zone configuration built once at startup.
///
/// Gaps between consecutive ranges are implicit silence zones; `resolve`
/// returns `None` inside them, which callers must treat differently from a
/// zone whose `track` is `None`.
#[derive(Debug)]
pub struct ZoneTable {
    zones: Vec<Zone>,
    index: FnvHashMap<String, usize>,
}

impl ZoneTable {
    pub fn new(mut zones: Vec<Zone>) -> Result<Self, ZoneTableError> {
        zones.sort_by(|a, b| {
            a.range_start
                .partial_cmp(&b.range_start)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        for z in &zones {
            if !(z.range_start < z.range_end) {
                return Err(ZoneTableError::InvalidRange(z.id.clone()));
            }
            if z.range_start < 0.0 || z.range_end > 1.0 {
                return Err(ZoneTableError::OutOfBounds(z.id.clone()));
            }
        }
        for pair in zones.windows(2) {
            if pair[1].range_start < pair[0].range_end {
                return Err(ZoneTableError::Overlap(
                    pair[0].id.clone(),
                    pair[1].id.clone(),
                ));
            }
        }
        let mut index = FnvHashMap::default();
        for (i, z) in zones.iter().enumerate() {
            if index.insert(z.id.clone(), i).is_some() {
                return Err(ZoneTableError::DuplicateId(z.id.clone()));
            }
        }
        Ok(Self { zones, index })
    }

    /// Map a scroll ratio to its zone, or `None` when the ratio falls in a gap.
    pub fn resolve(&self, ratio: f64) -> Option<&Zone> {
        let last = self.zones.len().checked_sub(1)?;
        for (i, z) in self.zones.iter().enumerate() {
            let upper_ok = ratio < z.range_end || (i == last && ratio <= z.range_end);
            if ratio >= z.range_start && upper_ok {
                return Some(z);
            }
        }
        None
    }

    pub fn by_id(&self, id: &str) -> Option<&Zone> {
        self.index.get(id).map(|&i| &self.zones[i])
    }

    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }
}
