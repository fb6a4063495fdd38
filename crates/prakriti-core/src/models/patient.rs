use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub id: i64,
    pub name: String,
    pub age: u32,
    pub gender: String,
    pub contact: String,
    pub created_at: jiff::Timestamp,
}

/// Registry form input. Ids and timestamps are assigned by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPatient {
    pub name: String,
    pub age: u32,
    pub gender: String,
    pub contact: String,
}
