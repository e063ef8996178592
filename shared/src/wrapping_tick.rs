use crate::types::Tick;

const HALF_RANGE: Tick = 1 << 31;

/// Returns whether tick `s1` comes after `s2`, allowing for wrap-around
/// sequence_greater_than(2, 1) will return true
/// sequence_greater_than(0, u32::MAX) will return true
/// sequence_greater_than(1, 1) will return false
pub fn sequence_greater_than(s1: Tick, s2: Tick) -> bool {
    ((s1 > s2) && (s1 - s2 <= HALF_RANGE)) || ((s1 < s2) && (s2 - s1 > HALF_RANGE))
}

/// Returns whether tick `s1` comes before `s2`, allowing for wrap-around
pub fn sequence_less_than(s1: Tick, s2: Tick) -> bool {
    sequence_greater_than(s2, s1)
}

/// Signed number of ticks from `a` forward to `b`
///
/// wrapping_diff(10, 12) == 2, wrapping_diff(u32::MAX, 0) == 1
pub fn wrapping_diff(a: Tick, b: Tick) -> i32 {
    b.wrapping_sub(a) as i32
}
