//! Fixed-capacity nibble windows for the LZ77 codec.
//!
//! A [`NibbleWindow`] is an ordered run of 4-bit values addressed by a
//! monotonically increasing stream position. The LZ77 codec uses two of
//! them over one logical nibble stream: a search window holding recent
//! history and a lookahead window holding upcoming, not yet encoded
//! nibbles.
//!
//! # Sizes
//!
//! - Search window: 17 nibbles
//! - Lookahead window: 20 nibbles

use std::collections::VecDeque;

/// Common window sizes.
pub mod sizes {
    /// Capacity of the LZ77 search window.
    pub const SEARCH: usize = 17;
    /// Capacity of the LZ77 lookahead window.
    pub const LOOKAHEAD: usize = 20;
}

/// A bounded window over a nibble stream.
///
/// Slot 0 is the oldest nibble held. [`NibbleWindow::slide`] appends at the
/// tail and drops from the head once the capacity is reached, so the window
/// never holds more than `capacity` nibbles.
#[derive(Debug, Clone)]
pub struct NibbleWindow {
    /// Held nibbles, oldest first.
    slots: VecDeque<u8>,
    /// Stream position of slot 0.
    start: u64,
    /// Maximum number of nibbles held.
    capacity: usize,
}

impl NibbleWindow {
    /// Create an empty window.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "Capacity must be greater than 0");

        Self {
            slots: VecDeque::with_capacity(capacity),
            start: 0,
            capacity,
        }
    }

    /// Create a full window with every slot set to `nibble`.
    pub fn filled(capacity: usize, nibble: u8) -> Self {
        let mut window = Self::new(capacity);
        window.slots.extend(std::iter::repeat_n(nibble & 0x0F, capacity));
        window
    }

    /// Create a search window (17 nibbles) seeded with `nibble`.
    pub fn search(nibble: u8) -> Self {
        Self::filled(sizes::SEARCH, nibble)
    }

    /// Create an empty lookahead window (20 nibbles).
    pub fn lookahead() -> Self {
        Self::new(sizes::LOOKAHEAD)
    }

    /// Get the capacity of the window.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Get the number of nibbles currently held.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Check if the window is empty.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Check if the window is at capacity.
    pub fn is_full(&self) -> bool {
        self.slots.len() == self.capacity
    }

    /// Stream position of the oldest held nibble.
    pub fn start(&self) -> u64 {
        self.start
    }

    /// Get the nibble in `slot` (0 = oldest).
    pub fn get(&self, slot: usize) -> Option<u8> {
        self.slots.get(slot).copied()
    }

    /// Get the nibble at absolute stream `position`, if still held.
    pub fn at(&self, position: u64) -> Option<u8> {
        let slot = position.checked_sub(self.start)?;
        self.slots.get(usize::try_from(slot).ok()?).copied()
    }

    /// Append a nibble, dropping the oldest one when the window is full.
    pub fn slide(&mut self, nibble: u8) {
        if self.is_full() {
            self.slots.pop_front();
            self.start += 1;
        }
        self.slots.push_back(nibble & 0x0F);
    }

    /// Append a nibble only if there is room; returns whether it was stored.
    pub fn try_push(&mut self, nibble: u8) -> bool {
        if self.is_full() {
            return false;
        }
        self.slots.push_back(nibble & 0x0F);
        true
    }

    /// Drop the `count` oldest nibbles (fewer if the window holds less).
    pub fn consume(&mut self, count: usize) {
        let count = count.min(self.slots.len());
        self.slots.drain(..count);
        self.start += count as u64;
    }

    /// Iterate over held nibbles, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.slots.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_filled() {
        let window = NibbleWindow::search(0xA);
        assert_eq!(window.len(), sizes::SEARCH);
        assert!(window.is_full());
        assert!(window.iter().all(|n| n == 0xA));
    }

    #[test]
    fn test_window_slide_drops_oldest() {
        let mut window = NibbleWindow::new(4);
        for n in 1..=6 {
            window.slide(n);
        }

        assert_eq!(window.len(), 4);
        assert_eq!(window.start(), 2);
        assert_eq!(window.iter().collect::<Vec<_>>(), vec![3, 4, 5, 6]);
        assert_eq!(window.at(2), Some(3));
        assert_eq!(window.at(1), None);
        assert_eq!(window.at(6), None);
    }

    #[test]
    fn test_window_try_push_and_consume() {
        let mut window = NibbleWindow::new(3);
        assert!(window.try_push(1));
        assert!(window.try_push(2));
        assert!(window.try_push(3));
        assert!(!window.try_push(4));

        window.consume(2);
        assert_eq!(window.start(), 2);
        assert_eq!(window.get(0), Some(3));

        window.consume(10);
        assert!(window.is_empty());
        assert_eq!(window.start(), 3);
    }

    #[test]
    fn test_window_masks_to_nibble() {
        let mut window = NibbleWindow::new(2);
        window.slide(0xFA);
        assert_eq!(window.get(0), Some(0xA));
    }

    #[test]
    fn test_window_self_referential_copy() {
        // Reading by absolute position stays valid while sliding, which is
        // what an overlapping back-reference needs.
        let mut window = NibbleWindow::new(4);
        for n in [1, 2, 3, 4] {
            window.slide(n);
        }
        let source = window.start() + 2;
        let mut copied = Vec::new();
        for i in 0..5 {
            let n = window.at(source + i).unwrap();
            window.slide(n);
            copied.push(n);
        }
        assert_eq!(copied, vec![3, 4, 3, 4, 3]);
    }
}
