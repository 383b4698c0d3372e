mod client;

pub use client::{PortClient, ResourceQuery};
