// ABOUTME: OpenAQ clients - the async OpenAq and the thread-blocking BlockingOpenAq.
// ABOUTME: Both expose the same resource handles over a rate-limited transport.

mod async_client;
mod blocking;
mod resources;

pub use async_client::OpenAq;
pub use blocking::BlockingOpenAq;
pub use resources::*;
