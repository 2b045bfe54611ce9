pub mod logging;
pub mod runner;
pub mod terminal;
