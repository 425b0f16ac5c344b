pub mod event;
pub mod session;
pub mod source;
pub mod store;
