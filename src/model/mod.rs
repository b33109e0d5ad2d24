pub mod bands;
pub mod gaps;
pub mod record;
pub mod stats;
