pub mod backend;
pub mod traits;
pub mod transport;

pub use backend::RodioBackend;
pub use traits::{MediaBackend, PlayerState};
pub use transport::{RepeatMode, Transport, TransportError};
