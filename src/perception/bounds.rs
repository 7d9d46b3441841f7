/// Parsing of the `bounds` attribute written by `uiautomator dump`.
use std::sync::LazyLock;

use regex::Regex;

use crate::perception::types::Bounds;

static BOUNDS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[(\d+),(\d+)\]\[(\d+),(\d+)\]").expect("bounds pattern is valid")
});

impl Bounds {
    /// Parses `[x1,y1][x2,y2]`. The pattern is matched at the start of the
    /// value; anything after the second bracket pair is ignored.
    ///
    /// Returns `None` for a mismatch or coordinates that overflow `i64`.
    /// Geometry is not validated here, see [`Bounds::is_valid`].
    pub fn parse(raw: &str) -> Option<Self> {
        let caps = BOUNDS_RE.captures(raw)?;
        let coord = |i: usize| caps.get(i)?.as_str().parse::<i64>().ok();
        Some(Self {
            x1: coord(1)?,
            y1: coord(2)?,
            x2: coord(3)?,
            y2: coord(4)?,
        })
    }
}
