// Copyright 2025 the Trailhead Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Generational slot storage backing the navigator's arenas.

use alloc::vec::Vec;

#[derive(Clone, Debug)]
pub(crate) struct Slots<T> {
    items: Vec<Option<T>>,
    // Last generation per slot; persists across frees.
    generations: Vec<u32>,
    free_list: Vec<usize>,
}

impl<T> Default for Slots<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
        }
    }
}

impl<T> Slots<T> {
    /// Store `item`, returning its `(slot, generation)` pair.
    pub(crate) fn insert(&mut self, item: T) -> (u32, u32) {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.items[idx] = Some(item);
            (idx, generation)
        } else {
            self.items.push(Some(item));
            self.generations.push(1);
            (self.items.len() - 1, 1)
        };
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Handles use 32-bit slot indices by design."
        )]
        let idx = idx as u32;
        (idx, generation)
    }

    pub(crate) fn get(&self, idx: usize, generation: u32) -> Option<&T> {
        if self.generations.get(idx) != Some(&generation) {
            return None;
        }
        self.items.get(idx)?.as_ref()
    }

    pub(crate) fn get_mut(&mut self, idx: usize, generation: u32) -> Option<&mut T> {
        if self.generations.get(idx) != Some(&generation) {
            return None;
        }
        self.items.get_mut(idx)?.as_mut()
    }

    pub(crate) fn remove(&mut self, idx: usize, generation: u32) -> Option<T> {
        if self.generations.get(idx) != Some(&generation) {
            return None;
        }
        let item = self.items.get_mut(idx)?.take()?;
        self.free_list.push(idx);
        Some(item)
    }

    /// Live items with their `(slot, generation)` pair.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Handles use 32-bit slot indices by design."
    )]
    pub(crate) fn iter(&self) -> impl Iterator<Item = (u32, u32, &T)> + '_ {
        self.items
            .iter()
            .zip(&self.generations)
            .enumerate()
            .filter_map(|(idx, (item, generation))| {
                item.as_ref().map(|item| (idx as u32, *generation, item))
            })
    }

    pub(crate) fn live(&self) -> usize {
        self.items.iter().filter(|i| i.is_some()).count()
    }
}
