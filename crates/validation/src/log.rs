//! Append-only request log

use crate::error::ValidationError;
use crate::request::{RequestId, RequestKind, Validatable};
use serde::{Deserialize, Serialize};

/// Append-only, densely indexed store of requests
///
/// Records are owned by the log and handed out by index only. An index is
/// valid iff it is below `len()`. Nothing is ever removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestLog<T> {
    kind: RequestKind,
    entries: Vec<T>,
}

impl<T> RequestLog<T> {
    pub fn new(kind: RequestKind) -> Self {
        Self {
            kind,
            entries: Vec::new(),
        }
    }

    pub fn kind(&self) -> RequestKind {
        self.kind
    }

    /// Append a record, returning its index
    pub(crate) fn append(&mut self, request: T) -> RequestId {
        let id = self.entries.len() as RequestId;
        self.entries.push(request);
        id
    }

    /// Look up a record by index
    pub fn get(&self, id: RequestId) -> Result<&T, ValidationError> {
        usize::try_from(id)
            .ok()
            .and_then(|i| self.entries.get(i))
            .ok_or(ValidationError::OutOfRange {
                kind: self.kind,
                id,
                total: self.len(),
            })
    }

    pub(crate) fn get_mut(&mut self, id: RequestId) -> Result<&mut T, ValidationError> {
        let total = self.len();
        let kind = self.kind;
        usize::try_from(id)
            .ok()
            .and_then(|i| self.entries.get_mut(i))
            .ok_or(ValidationError::OutOfRange { kind, id, total })
    }

    /// Total number of records ever appended
    pub fn len(&self) -> u64 {
        self.entries.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (RequestId, &T)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, request)| (i as RequestId, request))
    }
}

impl<T: Validatable> RequestLog<T> {
    /// Records still awaiting confirmation, in index order
    pub fn pending(&self) -> impl Iterator<Item = (RequestId, &T)> {
        self.iter().filter(|(_, request)| request.is_pending())
    }

    /// Number of confirmed records
    pub fn confirmed_count(&self) -> u64 {
        self.entries.iter().filter(|r| !r.is_pending()).count() as u64
    }
}
