pub mod account;
pub mod poll;
pub mod vote;
