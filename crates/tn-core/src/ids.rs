//! Intersection and road identifiers.
//!
//! A `RoadGraph` hands out ids sequentially as intersections and roads are
//! added, and every per-node or per-road column is indexed by them.  Ids are
//! ordered, which gives the routers a deterministic tie-break when two
//! intersections sit at the same distance.

use std::fmt;

/// Declare an id newtype over an unsigned index.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Marks "no road" / "no intersection", e.g. the predecessor of a
            /// search root.
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Position in the graph's columns.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            /// `INVALID`, so an unset predecessor never aliases road 0.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Index of a road-network node (an intersection such as `"A"`).
    pub struct NodeId(u32);
}

typed_id! {
    /// Index of a directed road segment, in insertion order.
    pub struct EdgeId(u32);
}
