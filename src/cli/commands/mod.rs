pub mod audit;
pub mod providers;
