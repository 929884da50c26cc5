use bevy::math::Vec2;

use super::{Quad, QuadId};
use crate::atlas::ExportedQuad;

/// Result of a bulk import.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportOutcome {
    /// The user declined to overwrite the existing quads.
    Declined,
    Imported(usize),
}

/// Ordered collection of quads. Insertion order is the hit-test and export order.
#[derive(Debug, Default)]
pub struct QuadStore {
    quads: Vec<(QuadId, Quad)>,
    next_id: u64,
}

impl QuadStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&mut self, a: Vec2, b: Vec2, apply_padding: bool) -> QuadId {
        self.insert(Quad::new(a, b, apply_padding))
    }

    pub fn insert(&mut self, quad: Quad) -> QuadId {
        let id = QuadId(self.next_id);
        self.next_id += 1;
        self.quads.push((id, quad));
        id
    }

    pub fn delete(&mut self, id: QuadId) -> Option<Quad> {
        let index = self.position(id)?;
        Some(self.quads.remove(index).1)
    }

    pub fn clear(&mut self) {
        self.quads.clear();
    }

    pub fn get(&self, id: QuadId) -> Option<&Quad> {
        self.quads
            .iter()
            .find(|(quad_id, _)| *quad_id == id)
            .map(|(_, quad)| quad)
    }

    pub fn get_mut(&mut self, id: QuadId) -> Option<&mut Quad> {
        self.quads
            .iter_mut()
            .find(|(quad_id, _)| *quad_id == id)
            .map(|(_, quad)| quad)
    }

    pub fn position(&self, id: QuadId) -> Option<usize> {
        self.quads.iter().position(|(quad_id, _)| *quad_id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (QuadId, &Quad)> {
        self.quads.iter().map(|(id, quad)| (*id, quad))
    }

    pub fn len(&self) -> usize {
        self.quads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quads.is_empty()
    }

    /// First quad in insertion order whose rendered rectangle contains `point`.
    pub fn hit_test(&self, point: Vec2) -> Option<QuadId> {
        self.quads
            .iter()
            .find(|(_, quad)| quad.contains(point))
            .map(|(id, _)| *id)
    }

    /// Replace every quad with the given entries.
    ///
    /// When the store is not empty `confirm` is asked first with the number of quads
    /// that would be discarded. Imported quads are unpadded so a later export writes
    /// the same bounds back.
    pub fn import_all(
        &mut self,
        entries: &[ExportedQuad],
        confirm: impl FnOnce(usize) -> bool,
    ) -> ImportOutcome {
        if !self.is_empty() && !confirm(self.len()) {
            return ImportOutcome::Declined;
        }

        self.clear();
        for entry in entries {
            let mut quad = Quad::new(entry.pixel_min, entry.pixel_max, false);
            quad.set_pivot(entry.center);
            quad.rename(&entry.name);
            self.insert(quad);
        }
        ImportOutcome::Imported(entries.len())
    }

    pub fn export_all(&self) -> Vec<ExportedQuad> {
        self.quads
            .iter()
            .map(|(_, quad)| {
                let bounds = quad.export_min_max();
                ExportedQuad {
                    name: quad.name().to_string(),
                    center: quad.pivot(),
                    pixel_min: bounds.min,
                    pixel_max: bounds.max,
                }
            })
            .collect()
    }
}
