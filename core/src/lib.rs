//! Duty-roster assignment core.
//!
//! Given dates that each need a number of leaders, committee members and
//! general members, and a roster of people with their tiers and history,
//! fill the dates greedily with shuffled candidates while keeping a
//! minimum gap between two stints in the same tier and spreading the load
//! evenly. See `engine` for the execution order.

pub mod capacity;
pub mod config;
pub mod eligibility;
pub mod engine;
pub mod error;
pub mod event;
pub mod name_generator;
pub mod person;
pub mod report;
pub mod requirements;
pub mod rng;
pub mod roster_generator;
pub mod source;
pub mod tier;
pub mod types;
pub mod workdate;
