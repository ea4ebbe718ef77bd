//! Message types that cross component boundaries
//!
//! Everything here travels inside an [`Envelope`] in transfer form.

pub mod envelope;
pub mod order;

pub use envelope::Envelope;
pub use order::OrderResult;
