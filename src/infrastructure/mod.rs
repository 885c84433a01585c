pub mod providers;
pub mod tracers;
