//! Agent implementations built on the executor

mod delegate;

pub use delegate::DelegateAgent;
