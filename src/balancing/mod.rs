pub mod balancer;
pub mod config;
pub mod verification;
