//! Target acquisition.
//!
//! Returns the first candidate inside the detection radius in scan order,
//! not the nearest one. Dead candidates are skipped.

use glam::DVec2;

use crate::host::TargetInfo;

/// First live candidate within `detection_range` of `origin`.
pub fn find_target<'a, I>(origin: DVec2, detection_range: f64, candidates: I) -> Option<TargetInfo>
where
    I: IntoIterator<Item = &'a TargetInfo>,
{
    candidates
        .into_iter()
        .find(|t| t.is_alive() && origin.distance(t.position) <= detection_range)
        .copied()
}
