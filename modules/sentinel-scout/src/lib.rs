pub mod feed;
pub mod fetcher;
pub mod normalizer;
#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use feed::{FeedError, GoogleNewsFeed, HeadlineFeed};
pub use fetcher::IntelFetcher;
pub use normalizer::HeadlineNormalizer;
