mod client;
mod model;
mod sampler;

pub use client::FeedClient;
pub use model::{AnomalyRecord, EventFeed, EventQuery};
pub use sampler::EventSampler;
