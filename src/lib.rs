pub mod config;
pub mod db;
pub mod domain;
pub mod handlers;
pub mod planner;

#[cfg(test)]
pub mod testing;
