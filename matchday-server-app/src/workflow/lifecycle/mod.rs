pub mod cancel;
pub mod complete;
pub mod reopen;
pub mod start;
