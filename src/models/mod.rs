mod client;
mod phone;

pub use client::{Client, ClientPatch};
pub use phone::Phone;
