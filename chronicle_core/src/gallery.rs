// Bounded, newest-first log of viewed images.

use std::collections::VecDeque;

use crate::types::ImagePair;

pub const DEFAULT_GALLERY_CAPACITY: usize = 50;

#[derive(Debug, Clone)]
pub struct GalleryHistory {
    entries: VecDeque<String>,
    capacity: usize,
}

impl GalleryHistory {
    pub fn new(capacity: usize) -> Self {
        GalleryHistory {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record a viewed pair. Old and modern are each inserted at the front,
    /// in that order, so the modern image ends up first.
    pub fn push(&mut self, pair: &ImagePair) {
        self.entries.push_front(pair.old.clone());
        self.entries.push_front(pair.modern.clone());
        self.entries.truncate(self.capacity);
    }

    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.entries.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for GalleryHistory {
    fn default() -> Self {
        Self::new(DEFAULT_GALLERY_CAPACITY)
    }
}
