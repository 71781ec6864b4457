pub mod address;
pub mod props;
pub mod traits;

pub use address::{Address, TOMBSTONE};
pub use props::MatProps;
pub use traits::TreeObserver;
