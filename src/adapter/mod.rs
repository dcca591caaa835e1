pub mod storage;

pub use storage::{FilePreferenceStore, InMemoryPreferenceStore, PreferenceStoreFactory, PreferenceStoreType};
