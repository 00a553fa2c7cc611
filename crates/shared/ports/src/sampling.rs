use dynmatch_core::Time;
use rand::RngCore;

/// Port for inter-arrival gap generators
pub trait ArrivalProcess: Send {
    /// Called once when the run starts, before the first gap is drawn
    ///
    /// Lets buffered implementations pre-sample for the given horizon.
    fn prepare(&mut self, _horizon: Time, _rng: &mut dyn RngCore) {}

    /// Time until the next arrival
    fn next_gap(&mut self, rng: &mut dyn RngCore) -> Time;

    fn name(&self) -> &str;
}

/// Port for per-agent sojourn (patience) distributions
pub trait SojournDistribution: Send {
    /// Draw one sojourn duration
    fn sample(&self, rng: &mut dyn RngCore) -> Time;

    /// Expected sojourn, used for logging and sanity checks
    fn mean(&self) -> Time;

    fn name(&self) -> &str;
}
