/// Simulated time - a non-negative real on the market's own time scale
/// Future: could become a newtype with validation (finite, non-negative)
pub type Time = f64;

/// Probability value in [0, 1] (values above 1 behave like 1)
pub type Probability = f64;
