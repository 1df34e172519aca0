//! Core functionality for ErrExplain
//!
//! The classifier and the quota tracker are the two gates in front of the
//! analyzer; they do not depend on each other.

pub mod analysis;
pub mod classifier;
pub mod clock;
pub mod identity;
pub mod quota;
pub mod submissions;
