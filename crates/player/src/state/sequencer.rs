//! Request ordering.
//!
//! Each outgoing request gets a tag from a monotonically increasing counter.
//! A response is applied only when its tag is newer than the last one applied,
//! so a slow response can never overwrite the result of a later request.

/// Position of a request in issue order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestTag(u64);

impl RequestTag {
    pub fn get(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default)]
pub struct RequestSequencer {
    issued: u64,
    applied: u64,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self) -> RequestTag {
        self.issued += 1;
        RequestTag(self.issued)
    }

    /// Record `tag` as applied if it is newer than anything applied so far.
    ///
    /// Returns `false` for a superseded response.
    pub fn accept(&mut self, tag: RequestTag) -> bool {
        if tag.0 > self.applied {
            self.applied = tag.0;
            true
        } else {
            false
        }
    }
}
