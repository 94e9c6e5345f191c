// Application Layer - the watchdog engine

pub mod watchdog;

pub use watchdog::Watchdog;
