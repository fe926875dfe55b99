pub mod analyze;
pub mod clear;
pub mod dispatch;
pub mod recent;
pub mod shared;
pub mod show;
