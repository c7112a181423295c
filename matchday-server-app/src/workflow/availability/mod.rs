pub mod mark;
pub mod remove;
