pub mod channel;
pub mod entry;
pub mod error;
pub mod media;
pub mod model;
pub mod schema;
pub mod service;
pub mod xml;

pub use error::FeedError;
pub use model::{Channel, Entry, FeedUrls, MediaReference, ParsedPage};
pub use service::{FeedService, FeedServiceApi};
