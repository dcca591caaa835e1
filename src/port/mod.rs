pub mod storage;

pub use storage::PreferenceStore;
