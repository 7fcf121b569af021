pub mod ribbon;
pub mod sma;
