pub mod climate;
pub mod coordinate;
pub mod report;
pub mod weather;
