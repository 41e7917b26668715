//! Arena indices.
//!
//! Each id is a `u32` newtype into one of the [`TemplateArena`](crate::TemplateArena)
//! tables. Ids are only meaningful for the arena that produced them.

use std::fmt;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            #[inline]
            pub const fn new(index: u32) -> Self {
                $name(index)
            }

            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }

            pub(crate) fn from_len(len: usize) -> Self {
                $name(u32::try_from(len).unwrap_or(u32::MAX))
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }
    };
}

define_id!(
    /// Index of a statement node.
    StmtId
);
define_id!(
    /// Index of an expression node.
    ExprId
);
define_id!(
    /// Index of a loop pattern node.
    PatternId
);
define_id!(
    /// Index of a body: the ordered statement list owned by a template or block.
    BodyId
);
