pub mod fragment;
pub mod solid;

pub use fragment::{FragmentData, FragmentId};
pub use solid::{SolidData, SolidId};

use crate::error::TopologyError;
use slotmap::SlotMap;

/// Central arena that owns solids and their split fragments.
///
/// Entities reference each other via typed IDs (generational indices),
/// avoiding self-referential structures and enabling safe mutation.
#[derive(Debug, Default)]
pub struct ModelStore {
    solids: SlotMap<SolidId, SolidData>,
    fragments: SlotMap<FragmentId, FragmentData>,
}

impl ModelStore {
    /// Creates a new, empty model store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Solid operations ---

    /// Inserts a solid and returns its ID.
    pub fn add_solid(&mut self, data: SolidData) -> SolidId {
        self.solids.insert(data)
    }

    /// Returns a reference to the solid data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn solid(&self, id: SolidId) -> Result<&SolidData, TopologyError> {
        self.solids
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("solid".into()))
    }

    /// Returns a mutable reference to the solid data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn solid_mut(&mut self, id: SolidId) -> Result<&mut SolidData, TopologyError> {
        self.solids
            .get_mut(id)
            .ok_or_else(|| TopologyError::EntityNotFound("solid".into()))
    }

    /// Iterates over all registered solids.
    pub fn solids(&self) -> impl Iterator<Item = (SolidId, &SolidData)> {
        self.solids.iter()
    }

    // --- Fragment operations ---

    /// Inserts a fragment and returns its ID.
    pub fn add_fragment(&mut self, data: FragmentData) -> FragmentId {
        self.fragments.insert(data)
    }

    /// Returns a reference to the fragment data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn fragment(&self, id: FragmentId) -> Result<&FragmentData, TopologyError> {
        self.fragments
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("fragment".into()))
    }

    /// Returns a mutable reference to the fragment data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn fragment_mut(&mut self, id: FragmentId) -> Result<&mut FragmentData, TopologyError> {
        self.fragments
            .get_mut(id)
            .ok_or_else(|| TopologyError::EntityNotFound("fragment".into()))
    }

    /// Iterates over all fragments.
    pub fn fragments(&self) -> impl Iterator<Item = (FragmentId, &FragmentData)> {
        self.fragments.iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::Solid;

    #[test]
    fn add_and_fetch_solid() {
        let mut store = ModelStore::new();
        let id = store.add_solid(SolidData {
            shape: Solid::from_faces(Vec::new()),
            label: "rock".into(),
            source_index: 0,
        });

        let data = store.solid(id).unwrap();
        assert_eq!(data.label, "rock");
        assert_eq!(data.source_index, 0);
    }

    #[test]
    fn missing_fragment_reports_not_found() {
        let mut store = ModelStore::new();
        let solid = store.add_solid(SolidData {
            shape: Solid::from_faces(Vec::new()),
            label: String::new(),
            source_index: 0,
        });
        let frag = store.add_fragment(FragmentData::new(Solid::from_faces(Vec::new()), solid, true));

        assert!(store.fragment(frag).is_ok());
        let other = ModelStore::new();
        assert!(other.fragment(frag).is_err());
    }
}
