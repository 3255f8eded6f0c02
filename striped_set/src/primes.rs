//! The fixed bucket-count progression the set grows through.
//!
//! Each entry is prime, chosen so `hash mod p` spreads arbitrary integer
//! hashes well, and the sequence roughly doubles. Exhausting it is the only
//! way `add` can fail with [`crate::Error::OutOfCapacity`].

pub(crate) const PRIME_SIZES: &[u32] = &[
    1_367,
    2_741,
    5_471,
    10_937,
    19_841,
    40_241,
    84_463,
    174_767,
    349_529,
    699_053,
    1_398_107,
    2_796_221,
    5_592_407,
    11_184_829,
    22_369_661,
    44_739_259,
    89_478_503,
    178_956_983,
    357_913_951,
    715_827_947,
    1_431_655_777,
    2_147_483_629,
];

/// Index of the smallest progression entry whose 0.7 load factor admits at
/// least `min_count` elements.
pub(crate) fn index_for_capacity(min_count: usize) -> usize {
    for (idx, &len) in PRIME_SIZES.iter().enumerate() {
        let max_count = (len as u64 * 7) / 10;
        if max_count as usize >= min_count {
            return idx;
        }
    }
    PRIME_SIZES.len() - 1
}
