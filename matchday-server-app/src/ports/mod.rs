pub mod notification;
pub mod random;
