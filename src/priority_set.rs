//! Indexed priority set.
//!
//! A container that supports push, pop-minimum, membership testing,
//! lookup-by-key and priority-update in logarithmic time. Backed by a
//! dense array heap plus a key→index map; swapping two heap positions
//! always swaps their index-map entries too, so any element's current
//! index is recoverable in O(1).

use std::collections::HashMap;

/// Elements stored in an [`IndexedPrioritySet`] must expose a stable
/// 64-bit key. Two elements are "the same" iff their keys are equal -
/// `update` relies on this: it is a precondition violation to pass
/// `update` a value whose key doesn't match anything already present
/// but is meant to replace a different element.
pub trait Keyed {
	fn key(&self) -> u64;
}

/// An indexed, ordered container of elements of type `T`.
///
/// Type Parameters:
/// - `T`: element type, must implement [`Keyed`]
/// - `Less`: strict-less-than comparator defining heap order (the minimum
///   under `Less` is always at the top)
pub struct IndexedPrioritySet<T, Less> {
	data: Vec<T>,
	indices: HashMap<u64, usize>,
	less: Less,
}

impl<T, Less> IndexedPrioritySet<T, Less>
where
	T: Keyed,
	Less: Fn(&T, &T) -> bool,
{
	pub fn new(less: Less) -> Self {
		Self { data: Vec::new(), indices: HashMap::new(), less }
	}

	pub fn len(&self) -> usize {
		self.data.len()
	}

	pub fn is_empty(&self) -> bool {
		self.data.is_empty()
	}

	pub fn clear(&mut self) {
		self.data.clear();
		self.indices.clear();
	}

	/// Whether an element with the same key as `t` is present.
	pub fn contains(&self, t: &T) -> bool {
		self.indices.contains_key(&t.key())
	}

	/// Whether an element with this key is present.
	pub fn contains_key(&self, key: u64) -> bool {
		self.indices.contains_key(&key)
	}

	/// Look up the element with the given key.
	pub fn get(&self, key: u64) -> Option<&T> {
		self.indices.get(&key).map(|&idx| &self.data[idx])
	}

	/// Read the minimum element. Panics if empty (matches the reference's
	/// undefined-on-empty contract by failing loudly instead).
	pub fn top(&self) -> &T {
		&self.data[0]
	}

	/// Insert `t`. No-op if an element with the same key is already present.
	pub fn insert(&mut self, t: T) {
		if self.contains(&t) {
			return;
		}
		self.indices.insert(t.key(), self.data.len());
		self.data.push(t);
		let idx = self.data.len() - 1;
		self.swim(idx);
	}

	/// Remove and return the minimum element. No-op (returns `None`) if empty.
	pub fn pop(&mut self) -> Option<T> {
		if self.is_empty() {
			return None;
		}
		let last = self.data.len() - 1;
		self.swap_elements(0, last);
		self.indices.remove(&self.data[last].key());
		let min = self.data.pop();
		if !self.is_empty() {
			self.sink(0);
		}
		min
	}

	/// Remove the element with the given key. No-op if absent.
	pub fn erase(&mut self, key: u64) {
		let idx = match self.indices.get(&key) {
			Some(&idx) => idx,
			None => return,
		};
		let last = self.data.len() - 1;
		self.swap_elements(idx, last);
		self.indices.remove(&self.data[last].key());
		self.data.pop();
		if idx < self.data.len() {
			self.swim(idx);
			self.sink(idx);
		}
	}

	/// Replace the element sharing `t`'s key with `t`, re-heapifying in
	/// both directions. No-op if no element with that key is present.
	pub fn update(&mut self, t: T) {
		let idx = match self.indices.get(&t.key()) {
			Some(&idx) => idx,
			None => return,
		};
		self.data[idx] = t;
		self.swim(idx);
		self.sink(idx);
	}

	fn parent(idx: usize) -> usize {
		(idx - 1) / 2
	}

	fn left(idx: usize) -> usize {
		idx * 2 + 1
	}

	fn right(idx: usize) -> usize {
		idx * 2 + 2
	}

	fn swap_elements(&mut self, i: usize, j: usize) {
		self.data.swap(i, j);
		let ki = self.data[i].key();
		let kj = self.data[j].key();
		self.indices.insert(ki, i);
		self.indices.insert(kj, j);
	}

	fn swim(&mut self, mut idx: usize) {
		while idx > 0 {
			let par = Self::parent(idx);
			if (self.less)(&self.data[idx], &self.data[par]) {
				self.swap_elements(idx, par);
				idx = par;
			} else {
				break;
			}
		}
	}

	fn sink(&mut self, mut idx: usize) {
		loop {
			let left = Self::left(idx);
			let right = Self::right(idx);
			let mut swap_idx = idx;
			if left < self.data.len() && (self.less)(&self.data[left], &self.data[swap_idx]) {
				swap_idx = left;
			}
			if right < self.data.len() && (self.less)(&self.data[right], &self.data[swap_idx]) {
				swap_idx = right;
			}
			if swap_idx == idx {
				return;
			}
			self.swap_elements(idx, swap_idx);
			idx = swap_idx;
		}
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[derive(Clone, Debug, PartialEq)]
	struct Item {
		id: u64,
		priority: i64,
	}

	impl Keyed for Item {
		fn key(&self) -> u64 {
			self.id
		}
	}

	fn set() -> IndexedPrioritySet<Item, impl Fn(&Item, &Item) -> bool> {
		IndexedPrioritySet::new(|a: &Item, b: &Item| a.priority < b.priority)
	}

	#[test]
	fn round_trip_drains_in_order() {
		let mut pq = set();
		for (id, priority) in [(1, 5), (2, 1), (3, 3), (4, 1), (5, -2)] {
			pq.insert(Item { id, priority });
		}
		let mut drained = Vec::new();
		while let Some(item) = pq.pop() {
			drained.push(item.priority);
		}
		let mut sorted = drained.clone();
		sorted.sort();
		assert_eq!(drained, sorted);
	}

	#[test]
	fn insert_is_noop_if_key_exists() {
		let mut pq = set();
		pq.insert(Item { id: 1, priority: 10 });
		pq.insert(Item { id: 1, priority: 0 });
		assert_eq!(pq.get(1).unwrap().priority, 10);
		assert_eq!(pq.len(), 1);
	}

	#[test]
	fn update_changes_priority_and_position() {
		let mut pq = set();
		pq.insert(Item { id: 1, priority: 10 });
		pq.insert(Item { id: 2, priority: 20 });
		pq.update(Item { id: 2, priority: 0 });
		assert_eq!(pq.top().id, 2);
	}

	#[test]
	fn update_is_noop_if_key_absent() {
		let mut pq = set();
		pq.insert(Item { id: 1, priority: 10 });
		pq.update(Item { id: 99, priority: -100 });
		assert_eq!(pq.len(), 1);
		assert!(!pq.contains_key(99));
	}

	#[test]
	fn erase_removes_and_reheapifies() {
		let mut pq = set();
		for (id, priority) in [(1, 5), (2, 1), (3, 3)] {
			pq.insert(Item { id, priority });
		}
		pq.erase(2);
		assert!(!pq.contains_key(2));
		assert_eq!(pq.len(), 2);
		assert_eq!(pq.pop().unwrap().id, 3);
		assert_eq!(pq.pop().unwrap().id, 1);
	}

	#[test]
	fn keys_never_duplicate() {
		let mut pq = set();
		for priority in [5, 4, 3, 2, 1, 0] {
			pq.insert(Item { id: 1, priority });
		}
		assert_eq!(pq.len(), 1);
	}

	#[test]
	fn pop_on_empty_is_noop() {
		let mut pq = set();
		assert!(pq.pop().is_none());
	}
}
