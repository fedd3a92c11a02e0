pub mod accumulator;
pub mod driver;
pub mod error;
mod extract;
mod normalize;
pub mod page;
pub mod session;
pub mod snapshot;
pub mod vendors;

pub use accumulator::ResultAccumulator;
pub use error::{EngineError, ScrapeError};
pub use page::{ArtifactSink, ListingPage};
pub use session::{run_session, SessionOptions};
pub use vendors::{PaginationStrategy, VendorAdapter};

#[cfg(test)]
mod test_support;
