//! Named key-value slots, the SQLite counterpart of browser local storage.

mod model;
mod repository;

pub use model::LocalStorageEntryDB;
pub use repository::LocalStorageRepository;
