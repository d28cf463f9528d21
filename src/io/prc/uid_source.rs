//! Sources of 128-bit file structure identifiers.

use crate::types::Uid;

use uuid::Uuid;

/// Supplies fresh identifiers for start headers.
///
/// Uniqueness across documents is best effort; the document itself rejects
/// duplicates within one file.
pub trait UidSource {
    fn next_uid(&mut self) -> Uid;
}

/// Random (UUID v4) identifiers.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomUidSource;

impl UidSource for RandomUidSource {
    fn next_uid(&mut self) -> Uid {
        Uid::from_u128(Uuid::new_v4().as_u128())
    }
}

/// Counting identifiers, for byte-reproducible output.
#[derive(Debug, Clone, Copy)]
pub struct SequentialUidSource {
    next: u128,
}

impl SequentialUidSource {
    pub fn new(start: u128) -> Self {
        Self { next: start }
    }
}

impl Default for SequentialUidSource {
    fn default() -> Self {
        Self::new(1)
    }
}

impl UidSource for SequentialUidSource {
    fn next_uid(&mut self) -> Uid {
        let uid = Uid::from_u128(self.next);
        self.next = self.next.wrapping_add(1);
        uid
    }
}
