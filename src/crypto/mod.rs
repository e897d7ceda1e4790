/// Modular arithmetic primitives.
pub mod field;
/// Group trait and operations.
pub mod group;
/// Cryptographically secure random number generation.
pub mod rng;

pub use group::Group;
pub use rng::SecureRng;
