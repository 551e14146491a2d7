pub mod channels;
pub mod decision;
pub mod profile;

pub use channels::{Channel, FlagSet, Grant};
pub use decision::Decision;
pub use profile::{PolicyProfile, ProfileError};
