// Wed Jan 21 2026 - Alex

pub mod anchored;
pub mod compile;
pub mod find_byte;
pub mod linear;
pub mod skip;

pub use find_byte::ByteSearch;

use crate::memory::{Address, MemoryError, ModuleWalker, Region};
use crate::pattern::{FrequencyTable, Pattern};
use compile::ScanPlan;
use log::debug;
use rayon::prelude::*;
use std::ops::ControlFlow;

/// Which engine drives a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanStrategy {
    /// Per pattern: anchored when a literal byte exists, linear otherwise.
    #[default]
    Auto,
    /// Anchor-byte hunt via SIMD or `memchr`, tail-first verification.
    Anchored,
    /// Boyer-Moore-Horspool table advancement, no byte hunt.
    SkipTable,
    /// Byte-by-byte sweep.
    Linear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Empty,
    Anchored,
    SkipTable,
    Linear,
}

/// A pattern compiled against a frequency table, ready to scan.
///
/// Construction does all the derivation work; scanning itself allocates
/// nothing. A scanner is immutable and can serve any number of concurrent
/// scans over shared or disjoint regions.
pub struct Scanner<'p> {
    pattern: &'p Pattern,
    plan: ScanPlan,
    search: ByteSearch,
    mode: Mode,
}

impl<'p> Scanner<'p> {
    /// Compiles `pattern` against the built-in machine-code frequency table.
    pub fn new(pattern: &'p Pattern) -> Self {
        Self::with_frequencies(pattern, &FrequencyTable::default())
    }

    /// Compiles `pattern` against a caller-supplied frequency table, for
    /// haystacks that are not x86 code.
    pub fn with_frequencies(pattern: &'p Pattern, frequencies: &FrequencyTable) -> Self {
        let plan = ScanPlan::build(pattern, frequencies);
        let mode = resolve_mode(pattern, &plan, ScanStrategy::Auto);

        debug!("scanner mode {:?} for pattern `{}`", mode, pattern);

        Self {
            pattern,
            plan,
            search: ByteSearch::detect(),
            mode,
        }
    }

    /// Overrides the engine choice. Strategies that need tables the
    /// pattern cannot provide degrade to the linear sweep.
    pub fn with_strategy(mut self, strategy: ScanStrategy) -> Self {
        self.mode = resolve_mode(self.pattern, &self.plan, strategy);
        self
    }

    /// Overrides the anchor byte-search backend.
    pub fn with_byte_search(mut self, search: ByteSearch) -> Self {
        self.search = search;
        self
    }

    pub fn pattern(&self) -> &Pattern {
        self.pattern
    }

    /// Index of the literal byte driving the anchored engine, if any.
    pub fn anchor(&self) -> Option<usize> {
        self.plan.anchor
    }

    /// Reports every match in ascending address order, stopping early when
    /// the callback breaks. Overlapping matches are all reported.
    pub fn scan_with<F>(&self, region: Region<'_>, mut f: F)
    where
        F: FnMut(Address) -> ControlFlow<()>,
    {
        if self.mode == Mode::Empty || self.pattern.size() > region.len() {
            return;
        }

        match self.mode {
            Mode::Empty => {}
            Mode::Anchored => anchored::scan(region, self.pattern, &self.plan, self.search, &mut f),
            Mode::SkipTable => skip::scan(region, self.pattern, &self.plan, &mut f),
            Mode::Linear => linear::scan(region, self.pattern, &mut f),
        }
    }

    pub fn scan_first(&self, region: Region<'_>) -> Option<Address> {
        let mut found = None;

        self.scan_with(region, |addr| {
            found = Some(addr);
            ControlFlow::Break(())
        });

        found
    }

    pub fn scan_all(&self, region: Region<'_>) -> Vec<Address> {
        let mut results = Vec::new();

        self.scan_with(region, |addr| {
            results.push(addr);
            ControlFlow::Continue(())
        });

        results
    }
}

fn resolve_mode(pattern: &Pattern, plan: &ScanPlan, strategy: ScanStrategy) -> Mode {
    if pattern.trimmed_size() == 0 {
        return Mode::Empty;
    }

    match strategy {
        ScanStrategy::Auto | ScanStrategy::Anchored => match plan.anchor {
            Some(_) => Mode::Anchored,
            None => Mode::Linear,
        },
        ScanStrategy::SkipTable => match plan.skip_table {
            Some(_) => Mode::SkipTable,
            None => Mode::Linear,
        },
        ScanStrategy::Linear => Mode::Linear,
    }
}

/// Scans a set of buffer views, regions in parallel, results merged in
/// ascending address order.
pub fn scan_regions(scanner: &Scanner<'_>, regions: &[Region<'_>]) -> Vec<Address> {
    let mut results: Vec<Address> = regions
        .par_iter()
        .flat_map(|region| scanner.scan_all(*region))
        .collect();

    results.sort_unstable();
    results
}

/// Walks a module and scans every readable region in the current process.
///
/// # Safety
///
/// Every region the walker reports as readable must actually be mapped and
/// readable for the duration of the call; stale walk results make this
/// read unmapped memory.
pub unsafe fn scan_modules(
    scanner: &Scanner<'_>,
    walker: &dyn ModuleWalker,
) -> Result<Vec<Address>, MemoryError> {
    let regions = walker.regions()?;

    let mut results: Vec<Address> = regions
        .into_par_iter()
        .filter(|region| region.is_readable())
        .flat_map(|region| {
            let view = unsafe { Region::from_raw_parts(region.start(), region.size() as usize) };
            scanner.scan_all(view)
        })
        .collect();

    results.sort_unstable();
    Ok(results)
}


#[cfg(test)]
mod prop_tests {
    use super::*;
    use proptest::prelude::*;

    fn naive_scan(data: &[u8], pattern: &Pattern) -> Vec<usize> {
        if pattern.trimmed_size() == 0 || pattern.size() > data.len() {
            return Vec::new();
        }

        (0..=data.len() - pattern.size())
            .filter(|&at| {
                (0..pattern.trimmed_size())
                    .all(|i| data[at + i] & pattern.masks()[i] == pattern.bytes()[i])
            })
            .collect()
    }

    fn engine_offsets(scanner: &Scanner<'_>, data: &[u8]) -> Vec<usize> {
        scanner
            .scan_all(Region::new(Address::zero(), data))
            .into_iter()
            .map(|addr| addr.as_u64() as usize)
            .collect()
    }

    fn mask_strategy() -> impl Strategy<Value = u8> {
        prop_oneof![
            3 => Just(0xFFu8),
            1 => Just(0x00u8),
            1 => Just(0x0Fu8),
            1 => Just(0xF0u8),
            1 => any::<u8>(),
        ]
    }

    fn pattern_strategy() -> impl Strategy<Value = Pattern> {
        proptest::collection::vec((any::<u8>(), mask_strategy()), 1..12).prop_map(|pairs| {
            let bytes: Vec<u8> = pairs.iter().map(|&(b, _)| b).collect();
            let masks: Vec<u8> = pairs.iter().map(|&(_, m)| m).collect();
            Pattern::from_raw(&bytes, Some(&masks))
        })
    }

    proptest! {
        // all engines must agree with the reference sweep on arbitrary input
        #[test]
        fn prop_engines_match_reference(
            data in proptest::collection::vec(any::<u8>(), 0..400),
            pattern in pattern_strategy(),
        ) {
            let expected = naive_scan(&data, &pattern);

            let auto = Scanner::new(&pattern);
            let skip = Scanner::new(&pattern).with_strategy(ScanStrategy::SkipTable);
            let linear = Scanner::new(&pattern).with_strategy(ScanStrategy::Linear);
            let memchr_only = Scanner::new(&pattern).with_byte_search(ByteSearch::Memchr);

            prop_assert_eq!(engine_offsets(&auto, &data), expected.clone());
            prop_assert_eq!(engine_offsets(&skip, &data), expected.clone());
            prop_assert_eq!(engine_offsets(&linear, &data), expected.clone());
            prop_assert_eq!(engine_offsets(&memchr_only, &data), expected);
        }

        // narrow alphabet maximises repeats and overlaps, the worst case
        // for over-eager skip derivation
        #[test]
        fn prop_dense_overlaps_survive_skips(
            data in proptest::collection::vec(0u8..3, 0..300),
            pairs in proptest::collection::vec((0u8..3, prop_oneof![Just(0xFFu8), Just(0x00u8)]), 1..8),
        ) {
            let bytes: Vec<u8> = pairs.iter().map(|&(b, _)| b).collect();
            let masks: Vec<u8> = pairs.iter().map(|&(_, m)| m).collect();
            let pattern = Pattern::from_raw(&bytes, Some(&masks));

            let expected = naive_scan(&data, &pattern);

            let auto = Scanner::new(&pattern);
            let skip = Scanner::new(&pattern).with_strategy(ScanStrategy::SkipTable);

            prop_assert_eq!(engine_offsets(&auto, &data), expected.clone());
            prop_assert_eq!(engine_offsets(&skip, &data), expected);
        }

        // planted copies must always be found, wherever they land
        #[test]
        fn prop_planted_matches_found(
            mut data in proptest::collection::vec(any::<u8>(), 64..256),
            seed in proptest::collection::vec(any::<u8>(), 4..10),
            at in 0usize..200,
        ) {
            prop_assume!(at + seed.len() <= data.len());
            data[at..at + seed.len()].copy_from_slice(&seed);

            let pattern = Pattern::from_raw(&seed, None);
            let scanner = Scanner::new(&pattern);

            prop_assert!(engine_offsets(&scanner, &data).contains(&at));
        }
    }
}
