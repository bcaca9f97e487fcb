//! Handle-keyed storage for mesh elements.

use std::{
    fmt,
    marker::PhantomData,
    ops::{Index, IndexMut},
};

use stable_vec::{core::DefaultCore, iter::Indices, StableVec};

use crate::handle::{hsize, Handle};


/// A map from handles to values that uses a simple contiguous vector to store
/// the values.
///
/// The handle is simply used as an index into the underlying vector. New
/// elements are always pushed to the end, so handles are created with
/// sequentially increasing IDs. Removing an element leaves a hole in the
/// vector (this is what `StableVec` is for): no other element is moved and
/// thus all other handles stay valid. Slots are never reused.
///
/// This is used by the mesh to store its vertices, faces and half edges.
#[derive(Clone)]
pub struct VecMap<H: Handle, T> {
    vec: StableVec<T>,
    _dummy: PhantomData<H>,
}

impl<H: Handle, T> VecMap<H, T> {
    /// Creates an empty `VecMap`.
    pub fn new() -> Self {
        Self {
            vec: StableVec::new(),
            _dummy: PhantomData,
        }
    }

    /// Adds the element at the end and returns its handle.
    pub fn push(&mut self, elem: T) -> H {
        H::from_usize(self.vec.push(elem))
    }

    /// The handle the next `push` will return.
    pub fn next_push_handle(&self) -> H {
        H::from_usize(self.vec.next_push_index())
    }

    pub fn num_elements(&self) -> hsize {
        self.vec.num_elements() as hsize
    }

    pub fn contains_handle(&self, handle: H) -> bool {
        self.vec.has_element_at(handle.to_usize())
    }

    pub fn get(&self, handle: H) -> Option<&T> {
        self.vec.get(handle.to_usize())
    }

    pub fn get_mut(&mut self, handle: H) -> Option<&mut T> {
        self.vec.get_mut(handle.to_usize())
    }

    /// Removes the element with the given handle. All other handles stay
    /// valid.
    pub fn remove(&mut self, handle: H) -> Option<T> {
        let idx = handle.to_usize();
        if idx >= self.vec.capacity() {
            return None;
        }

        self.vec.remove(idx)
    }

    /// Returns the handle of the first existing element with an index equal
    /// to or greater than `start`.
    pub fn first_handle_from(&self, start: H) -> Option<H> {
        let start = start.to_usize();
        if start >= self.vec.next_push_index() {
            return None;
        }

        self.vec.first_filled_slot_from(start).map(H::from_usize)
    }

    /// Iterator over all handles, in increasing order.
    pub fn handles(&self) -> Handles<'_, H, T> {
        Handles {
            iter: self.vec.indices(),
            _dummy: PhantomData,
        }
    }

    pub fn reserve(&mut self, additional: usize) {
        self.vec.reserve(additional);
    }
}

impl<H: Handle, T> Default for VecMap<H, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Handle, T> Index<H> for VecMap<H, T> {
    type Output = T;
    fn index(&self, handle: H) -> &Self::Output {
        match self.get(handle) {
            None => panic!("no element found for handle '{:?}'", handle),
            Some(r) => r,
        }
    }
}

impl<H: Handle, T> IndexMut<H> for VecMap<H, T> {
    fn index_mut(&mut self, handle: H) -> &mut Self::Output {
        match self.get_mut(handle) {
            None => panic!("no element found for handle '{:?}'", handle),
            Some(r) => r,
        }
    }
}

impl<H: Handle, T: fmt::Debug> fmt::Debug for VecMap<H, T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_map()
            .entries(self.vec.indices().map(|k| (H::from_usize(k), &self.vec[k])))
            .finish()
    }
}


/// Iterator over the handles of a [`VecMap`].
#[derive(Debug)]
pub struct Handles<'map, H: Handle, T> {
    iter: Indices<'map, T, DefaultCore<T>>,
    _dummy: PhantomData<H>,
}

impl<'map, H: Handle, T> Iterator for Handles<'map, H, T> {
    type Item = H;
    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(H::from_usize)
    }
}


#[cfg(test)]
mod tests {
    use crate::handle::VertexHandle;
    use super::*;

    #[test]
    fn push_and_index() {
        let mut map = VecMap::<VertexHandle, _>::new();
        let a = map.push("anna");
        let b = map.push("peter");

        assert_eq!(a, VertexHandle::new(0));
        assert_eq!(b, VertexHandle::new(1));
        assert_eq!(map[a], "anna");
        assert_eq!(map[b], "peter");
        assert_eq!(map.num_elements(), 2);
        assert_eq!(map.next_push_handle(), VertexHandle::new(2));
    }

    #[test]
    fn remove_keeps_other_handles() {
        let mut map = VecMap::<VertexHandle, _>::new();
        let a = map.push(10);
        let b = map.push(20);
        let c = map.push(30);

        assert_eq!(map.remove(b), Some(20));
        assert_eq!(map.remove(b), None);
        assert!(!map.contains_handle(b));
        assert_eq!(map[a], 10);
        assert_eq!(map[c], 30);
        assert_eq!(map.handles().collect::<Vec<_>>(), vec![a, c]);

        // Slots are not reused
        assert_eq!(map.push(40), VertexHandle::new(3));
    }

    #[test]
    fn first_handle_from_skips_holes() {
        let mut map = VecMap::<VertexHandle, _>::new();
        let a = map.push('a');
        let b = map.push('b');
        let c = map.push('c');
        map.remove(b);

        assert_eq!(map.first_handle_from(a), Some(a));
        assert_eq!(map.first_handle_from(b), Some(c));
        assert_eq!(map.first_handle_from(VertexHandle::new(3)), None);
        assert_eq!(map.first_handle_from(VertexHandle::new(100)), None);
    }

    #[test]
    #[should_panic(expected = "no element found")]
    fn index_removed_panics() {
        let mut map = VecMap::<VertexHandle, _>::new();
        let a = map.push(1u8);
        map.remove(a);
        let _ = map[a];
    }
}
