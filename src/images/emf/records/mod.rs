/// EMF Record Definitions
///
/// Fixed-layout record structures based on the [MS-EMF] specification.
/// Every struct derives the `zerocopy` traits, so records are written with
/// `IntoBytes::as_bytes` and read back with `FromBytes::read_from_prefix`
/// without hand-written byte shuffling.
pub mod drawing;
pub mod objects;
pub mod state;
pub mod types;

// Re-export commonly used types
pub use drawing::*;
pub use objects::*;
pub use state::*;
pub use types::*;
