use dynmatch_core::Time;

/// Port for time abstraction
///
/// The market only ever reads simulated time through this trait; how time
/// advances is up to the implementation.
pub trait Clock: Send + Sync {
    /// Get the current time according to this clock
    fn now(&self) -> Time;

    /// Get the clock's name/identifier for debugging
    fn name(&self) -> &str {
        "Clock"
    }
}
