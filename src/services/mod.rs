pub mod stats;
pub mod survey;
