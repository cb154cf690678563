//! Payoffs and exercise schedules of Bermudan bond options.
//!
//! - [`ExerciseSchedule`]: validated exercise times
//! - [`Payoff`]: exercise value as a function of state
//! - [`CouponBond`]: fixed cash flows valued with the Gaussian model

mod error;
mod exercise;
mod payoff;

pub use error::InstrumentError;
pub use exercise::ExerciseSchedule;
pub use payoff::{CouponBond, Payoff};
