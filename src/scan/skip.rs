// Wed Jan 21 2026 - Alex

use crate::memory::{Address, Region};
use crate::pattern::Pattern;
use crate::scan::compile::ScanPlan;
use std::ops::ControlFlow;

/// Boyer-Moore-Horspool engine: no byte hunt, every advance comes from a
/// table. On any verification failure the cursor moves by the larger of
/// the good-suffix distance and the bad-character distance keyed on the
/// byte observed in the anchor column. Both distances are safe on their
/// own, so their maximum is too.
///
/// Caller guarantees: non-empty trimmed pattern, pattern fits the region,
/// plan has an anchor and a skip table.
pub(crate) fn scan<F>(region: Region<'_>, pattern: &Pattern, plan: &ScanPlan, f: &mut F)
where
    F: FnMut(Address) -> ControlFlow<()>,
{
    let Some(anchor) = plan.anchor else { return };
    let Some(skips) = plan.skip_table.as_deref() else { return };

    if pattern.needs_masks() {
        scan_masked(region, pattern, anchor, skips, &plan.suffix_skips, f);
    } else {
        scan_literal(region, pattern, anchor, skips, &plan.suffix_skips, f);
    }
}

fn scan_masked<F>(
    region: Region<'_>,
    pattern: &Pattern,
    anchor: usize,
    skips: &[usize; 256],
    suffix_skips: &[usize],
    f: &mut F,
) where
    F: FnMut(Address) -> ControlFlow<()>,
{
    let data = region.data();
    let bytes = pattern.bytes();
    let masks = pattern.masks();

    let last = pattern.trimmed_size() - 1;
    let end = data.len() - pattern.size() + 1;

    let mut cursor = 0;

    'candidates: while cursor < end {
        let observed = data[cursor + anchor];

        if data[cursor + last] & masks[last] != bytes[last] {
            cursor += suffix_skips[last].max(skips[observed as usize]);
            continue;
        }

        for i in (0..last).rev() {
            if data[cursor + i] & masks[i] != bytes[i] {
                cursor += suffix_skips[i].max(skips[observed as usize]);
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
    skips: &[usize; 256],
    suffix_skips: &[usize],
    f: &mut F,
) where
    F: FnMut(Address) -> ControlFlow<()>,
{
    let data = region.data();
    let bytes = pattern.bytes();

    let last = pattern.trimmed_size() - 1;
    let end = data.len() - pattern.size() + 1;

    let mut cursor = 0;

    'candidates: while cursor < end {
        let observed = data[cursor + anchor];

        if data[cursor + last] != bytes[last] {
            cursor += suffix_skips[last].max(skips[observed as usize]);
            continue;
        }

        for i in (0..last).rev() {
            if data[cursor + i] != bytes[i] {
                cursor += suffix_skips[i].max(skips[observed as usize]);
                continue 'candidates;
            }
        }

        if f(region.address_at(cursor)).is_break() {
            return;
        }
        cursor += 1;
    }
}
