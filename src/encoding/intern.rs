//! String interning for the wire format.
//!
//! The encode side maps each distinct string to an occurrence count (filled
//! by the scan pass) and, once the probe decides to intern it, a sequential
//! id in first-encounter order. The decode side is the mirror image: a pool
//! of strings indexed by definition order.

use rustc_hash::FxHashMap;

use crate::error::DecodeError;

/// How the probe should emit one string occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StrClass {
    /// Seen once in the whole graph; emit inline.
    Single,
    /// First occurrence of a repeated string; define it with the next id.
    New(u32),
    /// Later occurrence of a repeated string.
    Ref(u32),
}

#[derive(Debug, Default)]
struct Slot {
    seen: u32,
    id: Option<u32>,
}

/// Encode-side intern table, fresh for every pack call.
#[derive(Debug, Default)]
pub(crate) struct Interner<'v> {
    slots: FxHashMap<&'v [u8], Slot>,
    next_id: u32,
}

impl<'v> Interner<'v> {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Records one occurrence during the scan pass.
    pub(crate) fn record(&mut self, s: &'v [u8]) {
        self.slots.entry(s).or_default().seen += 1;
    }

    /// Classifies one occurrence during the probe, assigning ids on the
    /// first occurrence of each repeated string.
    pub(crate) fn classify(&mut self, s: &[u8]) -> StrClass {
        match self.slots.get_mut(s) {
            Some(slot) if slot.seen >= 2 => match slot.id {
                Some(id) => StrClass::Ref(id),
                None => {
                    let id = self.next_id;
                    self.next_id += 1;
                    slot.id = Some(id);
                    StrClass::New(id)
                }
            },
            _ => StrClass::Single,
        }
    }
}

/// Decode-side pool of interned strings, indexed by definition order.
#[derive(Debug, Default)]
pub(crate) struct StringPool {
    strings: Vec<Vec<u8>>,
}

impl StringPool {
    /// Appends a newly defined string.
    pub(crate) fn push(&mut self, s: Vec<u8>) {
        self.strings.push(s);
    }

    /// Resolves an id to a previously defined string.
    pub(crate) fn resolve(&self, id: u64) -> Result<&[u8], DecodeError> {
        usize::try_from(id)
            .ok()
            .and_then(|i| self.strings.get(i))
            .map(Vec::as_slice)
            .ok_or(DecodeError::InvalidStringRef { index: id, table_size: self.strings.len() })
    }
}
