pub mod client;
pub mod errors;

pub use client::PriceClient;
pub use client::PriceQuote;
pub use client::PriceSource;
pub use errors::PriceError;
pub use errors::Result;
