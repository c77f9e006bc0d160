pub mod config;
pub mod history;
pub mod pause;
pub mod run;
pub mod status;
