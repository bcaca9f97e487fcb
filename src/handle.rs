//! Handles to refer to mesh elements.
//!
//! Handles are plain indices into the arenas of a [`HalfEdgeMesh`][crate::HalfEdgeMesh].
//! They are `Copy` and do not borrow the mesh, so they can be stored freely.
//! A handle stays valid as long as the mesh lives (and the element was not
//! purged via [`purge_removed`][crate::HalfEdgeMesh::purge_removed]).

use std::fmt;

use static_assertions::assert_eq_size;


/// The integer type used for handle indices.
///
/// By default this is `u32`, which is plenty for most meshes and keeps the
/// data structure small. Enable the `large-handle` feature to use `u64`.
#[cfg(not(feature = "large-handle"))]
#[allow(non_camel_case_types)]
pub type hsize = u32;

/// The integer type used for handle indices.
#[cfg(feature = "large-handle")]
#[allow(non_camel_case_types)]
pub type hsize = u64;


/// Types that are handles to mesh elements.
pub trait Handle: 'static + Copy + fmt::Debug + Eq + Ord {
    /// Creates a handle from the given index.
    fn new(idx: hsize) -> Self;

    /// Returns the index of this handle.
    fn idx(&self) -> hsize;

    /// Creates a handle from a `usize` index.
    ///
    /// Panics if the value does not fit into `hsize`.
    #[inline(always)]
    fn from_usize(raw: usize) -> Self {
        assert!(
            raw <= hsize::max_value() as usize,
            "handle index {} does not fit into `hsize` (enable the `large-handle` feature)",
            raw,
        );
        Self::new(raw as hsize)
    }

    /// Returns the index of this handle as `usize`.
    #[inline(always)]
    fn to_usize(&self) -> usize {
        self.idx() as usize
    }
}

macro_rules! make_handle_type {
    ($(#[$attr:meta])* $name:ident, $short:expr) => {
        $(#[$attr])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(hsize);

        impl Handle for $name {
            #[inline(always)]
            fn new(idx: hsize) -> Self {
                $name(idx)
            }

            #[inline(always)]
            fn idx(&self) -> hsize {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "{}{}", $short, self.0)
            }
        }

        // The maximum index is reserved as "none" value. That way,
        // `Optioned<$name>` has the same size as the handle itself.
        impl optional::Noned for $name {
            #[inline(always)]
            fn is_none(&self) -> bool {
                self.0 == hsize::max_value()
            }

            #[inline(always)]
            fn get_none() -> Self {
                $name(hsize::max_value())
            }
        }

        impl optional::OptEq for $name {
            #[inline(always)]
            fn opt_eq(&self, other: &Self) -> bool {
                self == other
            }
        }

        assert_eq_size!($name, optional::Optioned<$name>);
    }
}

make_handle_type!(
    /// Handle to refer to a vertex.
    VertexHandle,
    "V"
);
make_handle_type!(
    /// Handle to refer to a (triangular) face.
    FaceHandle,
    "F"
);
make_handle_type!(
    /// Handle to refer to a directed half edge.
    HalfEdgeHandle,
    "HE"
);


#[cfg(test)]
mod tests {
    use optional::Optioned as Opt;
    use super::*;

    #[test]
    fn debug_output() {
        assert_eq!(format!("{:?}", VertexHandle::new(3)), "V3");
        assert_eq!(format!("{:?}", FaceHandle::new(0)), "F0");
        assert_eq!(format!("{:?}", HalfEdgeHandle::new(17)), "HE17");
    }

    #[test]
    fn optioned_handles() {
        let none = Opt::<HalfEdgeHandle>::none();
        assert!(none.is_none());
        assert_eq!(none.into_option(), None);

        let some = Opt::some(HalfEdgeHandle::new(5));
        assert_eq!(some.into_option(), Some(HalfEdgeHandle::new(5)));
        assert!(some != none);
    }

    #[test]
    fn usize_conversion() {
        let h = FaceHandle::from_usize(42);
        assert_eq!(h.idx(), 42);
        assert_eq!(h.to_usize(), 42);
    }
}
