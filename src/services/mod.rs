pub mod agent;
pub mod weather;
