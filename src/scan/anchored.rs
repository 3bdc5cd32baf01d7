// Wed Jan 21 2026 - Alex

use crate::memory::{Address, Region};
use crate::pattern::Pattern;
use crate::scan::compile::ScanPlan;
use crate::scan::find_byte::ByteSearch;
use std::ops::ControlFlow;

/// Anchor-driven engine: hunt for the anchor byte with the SIMD byte
/// search, then verify the candidate tail-first. Verification failures
/// advance by the precomputed good-suffix distance before the hunt
/// resumes, so the anchor column is never re-examined byte by byte.
///
/// Caller guarantees: non-empty trimmed pattern, pattern fits the region,
/// plan has an anchor.
pub(crate) fn scan<F>(
    region: Region<'_>,
    pattern: &Pattern,
    plan: &ScanPlan,
    search: ByteSearch,
    f: &mut F,
) where
    F: FnMut(Address) -> ControlFlow<()>,
{
    let Some(anchor) = plan.anchor else { return };

    if pattern.needs_masks() {
        scan_masked(region, pattern, anchor, &plan.suffix_skips, search, f);
    } else {
        scan_literal(region, pattern, anchor, &plan.suffix_skips, search, f);
    }
}

fn scan_masked<F>(
    region: Region<'_>,
    pattern: &Pattern,
    anchor: usize,
    suffix_skips: &[usize],
    search: ByteSearch,
    f: &mut F,
) where
    F: FnMut(Address) -> ControlFlow<()>,
{
    let data = region.data();
    let bytes = pattern.bytes();
    let masks = pattern.masks();

    let last = pattern.trimmed_size() - 1;
    let end = data.len() - pattern.size() + 1;
    let wanted = bytes[anchor];

    let mut cursor = 0;

    'candidates: while cursor < end {
        match search.find(&data[cursor + anchor..end + anchor], wanted) {
            Some(offset) => cursor += offset,
            None => return,
        }

        if data[cursor + last] & masks[last] != bytes[last] {
            cursor += suffix_skips[last];
            continue;
        }

        for i in (0..last).rev() {
            if data[cursor + i] & masks[i] != bytes[i] {
                cursor += suffix_skips[i];
                continue 'candidates;
            }
        }

        if f(region.address_at(cursor)).is_break() {
            return;
        }
        cursor += 1;
    }
}

fn scan_literal<F>(
    region: Region<'_>,
    pattern: &Pattern,
    anchor: usize,
    suffix_skips: &[usize],
    search: ByteSearch,
    f: &mut F,
) where
    F: FnMut(Address) -> ControlFlow<()>,
{
    let data = region.data();
    let bytes = pattern.bytes();

    let last = pattern.trimmed_size() - 1;
    let end = data.len() - pattern.size() + 1;
    let wanted = bytes[anchor];

    let mut cursor = 0;

    'candidates: while cursor < end {
        match search.find(&data[cursor + anchor..end + anchor], wanted) {
            Some(offset) => cursor += offset,
            None => return,
        }

        if data[cursor + last] != bytes[last] {
            cursor += suffix_skips[last];
            continue;
        }

        for i in (0..last).rev() {
            if data[cursor + i] != bytes[i] {
                cursor += suffix_skips[i];
                continue 'candidates;
            }
        }

        if f(region.address_at(cursor)).is_break() {
            return;
        }
        cursor += 1;
    }
}
