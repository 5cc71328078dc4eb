pub mod chain;
pub mod motion;
pub mod spring;
