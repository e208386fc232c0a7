//! Traits a type implements to live in a `RecordCollection`.

use serde::de::DeserializeOwned;
use serde::Serialize;
use shared_types::{CompositeKey, RecordId};

/// A persisted entity addressed by a sequence-assigned id.
pub trait Record: Serialize + DeserializeOwned + Clone {
    /// Human-readable kind used in errors and logs.
    const KIND: &'static str;

    fn id(&self) -> RecordId;

    fn set_id(&mut self, id: RecordId);
}

/// A record that is also unique under a normalized secondary key.
pub trait IndexedRecord: Record {
    fn index_key(&self) -> CompositeKey;
}
