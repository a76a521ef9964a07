pub mod backend;
pub mod diff;
pub mod history;
pub mod repository;
pub mod status;

pub use backend::{BackendResult, VcsBackend};
pub use repository::Git2Backend;
