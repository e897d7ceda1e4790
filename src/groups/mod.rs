/// RFC 5114 1024-bit MODP group with a 160-bit prime-order subgroup.
pub mod modp1024;

pub use modp1024::{GroupParameters, Modp1024};
