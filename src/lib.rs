pub mod cli;
pub mod commands;
pub mod data;
pub mod math;
pub mod plot;
pub mod screener;
