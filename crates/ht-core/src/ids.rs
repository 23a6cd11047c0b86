use core::fmt;
use core::num::NonZeroU32;

/// Position of a cell or boundary patch in its mesh array.
///
/// Held one-based in a `NonZeroU32`, so `Option<Id>` is the same size as
/// `Id`. Valid positions run from 0 to [`Id::MAX_INDEX`]; conversion from
/// `usize` is checked and never wraps.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id(NonZeroU32);

impl Id {
    /// Largest representable position.
    pub const MAX_INDEX: u32 = u32::MAX - 1;

    /// Id for array position `index`, or `None` past [`Id::MAX_INDEX`].
    pub fn new(index: usize) -> Option<Self> {
        let index = u32::try_from(index).ok()?;
        index.checked_add(1).and_then(NonZeroU32::new).map(Self)
    }

    /// Id for a position known to fit, such as a literal.
    ///
    /// # Panics
    ///
    /// If `index` is `u32::MAX`.
    pub fn from_index(index: u32) -> Self {
        match index.checked_add(1).and_then(NonZeroU32::new) {
            Some(stored) => Self(stored),
            None => panic!("mesh position {index} exceeds Id::MAX_INDEX"),
        }
    }

    pub fn index(self) -> u32 {
        self.0.get() - 1
    }

    /// Position as `usize`, for slice access.
    pub fn as_usize(self) -> usize {
        self.index() as usize
    }
}

impl TryFrom<usize> for Id {
    type Error = usize;

    /// Fails with the rejected position.
    fn try_from(index: usize) -> Result<Self, usize> {
        Self::new(index).ok_or(index)
    }
}

impl fmt::Debug for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.index())
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

pub type CellId = Id;
pub type PatchId = Id;
