//! Friend edges
//!
//! A friendship is an unordered pair of account ids. It is always stored with
//! the smaller id first so `(a, b)` and `(b, a)` land on the same key.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FriendPair {
    first: Uuid,
    second: Uuid,
}

impl FriendPair {
    pub fn new(a: Uuid, b: Uuid) -> Self {
        if a <= b {
            Self { first: a, second: b }
        } else {
            Self { first: b, second: a }
        }
    }

    pub fn first(&self) -> Uuid {
        self.first
    }

    pub fn second(&self) -> Uuid {
        self.second
    }

    /// The other party of the edge, if `id` is on it
    pub fn other(&self, id: Uuid) -> Option<Uuid> {
        if self.first == id {
            Some(self.second)
        } else if self.second == id {
            Some(self.first)
        } else {
            None
        }
    }
}
