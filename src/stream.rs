//! Streaming artifact reassembly
//!
//! When an agent advertises the `streaming` capability it may emit one
//! artifact as several fragments sharing an `index`. The assembler
//! buffers fragments per index, extends the buffer on `append`, and
//! seals the index on `lastChunk`. Fragments for distinct indices are
//! independent and may interleave.

use std::collections::BTreeMap;

use crate::protocol::{A2AError, A2AResult, Artifact};

/// Reassembles streamed artifact fragments into complete artifacts
///
/// Reassembly is deterministic: replaying the same fragment log through a
/// fresh assembler yields the same sealed artifacts.
#[derive(Debug, Default)]
pub struct ArtifactAssembler {
    slots: BTreeMap<u32, Slot>,
}

#[derive(Debug)]
struct Slot {
    artifact: Artifact,
    sealed: bool,
}

impl ArtifactAssembler {
    /// Create an empty assembler
    pub fn new() -> Self {
        Self::default()
    }

    /// Ingest one fragment
    ///
    /// Returns the fully reassembled artifact when the fragment seals its
    /// index, `None` while the index is still open. Rejects fragments for
    /// a sealed index, an `append` with no open base, and a non-append
    /// opener for an index that is already open.
    pub fn ingest(&mut self, fragment: Artifact) -> A2AResult<Option<Artifact>> {
        fragment.validate()?;

        let index = fragment.index;
        let seal = fragment.is_last_chunk();

        if let Some(slot) = self.slots.get(&index) {
            if slot.sealed {
                return Err(A2AError::stream_order(
                    index,
                    "fragment received after lastChunk",
                ));
            }
        }

        let slot = if fragment.is_append() {
            let slot = self.slots.get_mut(&index).ok_or_else(|| {
                A2AError::stream_order(index, "append fragment with no opening fragment")
            })?;
            slot.artifact.parts.extend(fragment.parts);
            slot
        } else {
            if self.slots.contains_key(&index) {
                return Err(A2AError::stream_order(
                    index,
                    "index reopened by a non-append fragment",
                ));
            }
            let mut artifact = fragment;
            artifact.append = None;
            artifact.last_chunk = None;
            self.slots.entry(index).or_insert(Slot {
                artifact,
                sealed: false,
            })
        };

        if seal {
            slot.sealed = true;
            tracing::debug!(index, parts = slot.artifact.parts.len(), "artifact sealed");
            return Ok(Some(slot.artifact.clone()));
        }

        Ok(None)
    }

    /// Indices that are buffered but not yet sealed
    pub fn pending(&self) -> Vec<u32> {
        self.slots
            .iter()
            .filter(|(_, slot)| !slot.sealed)
            .map(|(index, _)| *index)
            .collect()
    }

    /// Sealed artifacts, in index order
    pub fn sealed(&self) -> Vec<&Artifact> {
        self.slots
            .values()
            .filter(|slot| slot.sealed)
            .map(|slot| &slot.artifact)
            .collect()
    }

    /// Drop every unsealed buffer
    ///
    /// Used on task cancellation so an in-flight streamed artifact is
    /// discarded rather than left half-sealed. Returns the discarded
    /// indices.
    pub fn discard_pending(&mut self) -> Vec<u32> {
        let pending = self.pending();
        for index in &pending {
            self.slots.remove(index);
        }
        if !pending.is_empty() {
            tracing::warn!(?pending, "discarded unsealed artifact fragments");
        }
        pending
    }
}
