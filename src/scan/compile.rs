// Tue Jan 20 2026 - Alex

use crate::pattern::{FrequencyTable, Pattern};
use log::debug;

/// Weight of an in-pattern repeat against the global rarity score when
/// ranking anchor candidates. A byte occurring twice in the pattern costs
/// as much as the most common haystack byte.
const REPEAT_WEIGHT: usize = 50;

/// Tables derived from one pattern at scanner construction: the anchor
/// position, the per-byte-value advance applied when the anchor column
/// mismatches, and the per-position good-suffix advances applied when
/// verification fails after the anchor matched.
pub(crate) struct ScanPlan {
    pub(crate) anchor: Option<usize>,
    pub(crate) skip_table: Option<Box<[usize; 256]>>,
    pub(crate) suffix_skips: Vec<usize>,
}

impl ScanPlan {
    pub(crate) fn build(pattern: &Pattern, frequencies: &FrequencyTable) -> Self {
        let anchor = choose_anchor(pattern, frequencies);

        let (skip_table, suffix_skips) = match anchor {
            Some(anchor) => (
                Some(build_skip_table(pattern, anchor)),
                build_suffix_skips(pattern),
            ),
            None => (None, Vec::new()),
        };

        match anchor {
            Some(anchor) => debug!(
                "plan: anchor {:#04x} at {}/{}",
                pattern.bytes()[anchor],
                anchor,
                pattern.trimmed_size()
            ),
            None => debug!("plan: no literal byte, degrading to linear sweep"),
        }

        Self {
            anchor,
            skip_table,
            suffix_skips,
        }
    }
}

/// Picks the literal position whose byte is cheapest to hunt for: rare in
/// the pattern itself, rare in the expected haystack, and late in the
/// pattern (a late anchor drags more of the pattern past the cursor when
/// verification fails). Earliest position wins ties.
fn choose_anchor(pattern: &Pattern, frequencies: &FrequencyTable) -> Option<usize> {
    let trimmed = pattern.trimmed_size();
    let bytes = pattern.bytes();
    let masks = pattern.masks();

    let mut histogram = [0usize; 256];
    for i in 0..trimmed {
        if masks[i] == 0xFF {
            histogram[bytes[i] as usize] += 1;
        }
    }

    let mut best: Option<(usize, usize)> = None;

    for i in 0..trimmed {
        if masks[i] != 0xFF {
            continue;
        }

        let cost = histogram[bytes[i] as usize] * REPEAT_WEIGHT
            + frequencies.score(bytes[i]) as usize
            + (trimmed - i);

        if best.map_or(true, |(lowest, _)| cost < lowest) {
            best = Some((cost, i));
        }
    }

    best.map(|(_, i)| i)
}

/// For every byte value, the smallest pattern shift that could place a
/// matching position under that byte when it was observed at the anchor
/// column. Capped at `anchor + 1` (pattern start moves past the observed
/// byte), so no entry exceeds the trimmed size.
fn build_skip_table(pattern: &Pattern, anchor: usize) -> Box<[usize; 256]> {
    let bytes = pattern.bytes();
    let masks = pattern.masks();

    let mut table = Box::new([0usize; 256]);

    for value in 0..256 {
        let observed = value as u8;

        let mut skip = 1;
        while skip <= anchor && (observed & masks[anchor - skip]) != bytes[anchor - skip] {
            skip += 1;
        }

        table[value] = skip;
    }

    table
}

fn build_suffix_skips(pattern: &Pattern) -> Vec<usize> {
    (0..pattern.trimmed_size())
        .map(|i| suffix_skip(pattern, i))
        .collect()
}

/// Good-suffix advance for a mismatch at position `i`: the smallest shift
/// under which every already-verified position `i+1..` stays compatible
/// and the mismatch itself cannot repeat verbatim. Wildcards make two
/// positions compatible whenever their constrained bits agree, so the
/// check runs on the intersection of both masks; anything looser
/// over-skips and drops matches.
fn suffix_skip(pattern: &Pattern, i: usize) -> usize {
    let trimmed = pattern.trimmed_size();

    for shift in 1..trimmed {
        if shift <= i && subsumes(pattern, i - shift, i) {
            continue;
        }

        if (i + 1..trimmed).all(|j| j < shift || compatible(pattern, j, j - shift)) {
            return shift;
        }
    }

    trimmed
}

fn compatible(pattern: &Pattern, a: usize, b: usize) -> bool {
    let bytes = pattern.bytes();
    let masks = pattern.masks();

    (bytes[a] ^ bytes[b]) & (masks[a] & masks[b]) == 0
}

/// True when every byte accepted at `from` is also accepted at `to`, i.e.
/// a byte that failed `to` can never satisfy `from`.
fn subsumes(pattern: &Pattern, from: usize, to: usize) -> bool {
    let bytes = pattern.bytes();
    let masks = pattern.masks();

    masks[to] & !masks[from] == 0 && bytes[from] & masks[to] == bytes[to]
}
