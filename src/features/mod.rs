mod account;
mod command;
mod ledger;
mod session;
mod store;

pub use self::{command::Command, session::Session, store::Store};
