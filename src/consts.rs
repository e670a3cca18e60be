/// Contents at or below this magnitude count as zero for the empty-bin skip.
/// Equivalent to rounding at 6 decimal places (`5e-7` itself rounds to zero).
pub const DEFAULT_ZERO_EPSILON: f64 = 5e-7;

/// Number of leading bins left out of a score; none by default.
pub const DEFAULT_OFFSET: usize = 0;
