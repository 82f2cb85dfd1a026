pub mod controller;
pub mod events;
pub mod profile;
pub mod service;

#[cfg(test)]
mod tests;

pub use controller::{AppClient, AppController, ChannelSet};
pub use service::VocabService;
