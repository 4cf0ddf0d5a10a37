pub mod config;
pub mod criteria;
pub mod entity;
pub mod report;
