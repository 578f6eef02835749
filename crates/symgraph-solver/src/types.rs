//! Handles and node data for the symbol graph.
//!
//! Types, members and modules are addressed by `u32` handles. Handles are
//! cheap to copy and compare; the data behind them lives in whatever
//! [`SymbolGraph`](crate::SymbolGraph) produced them.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identity of one symbol graph instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GraphId(pub u64);

impl GraphId {
    /// Allocate an identity never handed out before in this process.
    pub fn fresh() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Handle to a type node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TypeId(pub u32);

/// Handle to a member node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MemberId(pub u32);

/// Handle to the module (assembly) that declares a type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ModuleId(pub u32);

/// Shape of a type node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeKind {
    Class,
    Struct,
    Interface,
    Enum,
    Delegate,
    Array { rank: u8 },
    TypeParameter,
}

impl TypeKind {
    /// Whether values of this kind are references (can be null, box to the
    /// universal root without conversion).
    #[inline]
    pub const fn is_reference(self) -> bool {
        matches!(
            self,
            Self::Class | Self::Interface | Self::Delegate | Self::Array { .. }
        )
    }

    #[inline]
    pub const fn is_value(self) -> bool {
        matches!(self, Self::Struct | Self::Enum)
    }

    /// Generic definitions of these kinds may relate type arguments
    /// through compatibility rather than identity.
    #[inline]
    pub const fn allows_variant_arguments(self) -> bool {
        matches!(self, Self::Interface | Self::Delegate)
    }
}

/// Kind of a member node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MemberKind {
    Field,
    Property,
    Event,
    Method,
    Constructor,
}

bitflags! {
    /// Declaration modifiers that lookups care about.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct MemberFlags: u8 {
        const STATIC   = 1 << 0;
        const INDEXER  = 1 << 1;
        const VIRTUAL  = 1 << 2;
        const ABSTRACT = 1 << 3;
        const OVERRIDE = 1 << 4;
    }
}

/// Name under which indexers are looked up.
///
/// Indexers have no identifier of their own; asking for a property with
/// this name selects the indexer instead of an ordinary property.
pub const INDEXER_NAME: &str = "Item[]";

/// A member node as exposed by the graph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Member {
    pub kind: MemberKind,
    pub name: Arc<str>,
    pub declaring_type: TypeId,
    pub parameter_count: u16,
    pub flags: MemberFlags,
}

impl Member {
    #[inline]
    pub fn is_static(&self) -> bool {
        self.flags.contains(MemberFlags::STATIC)
    }

    #[inline]
    pub fn is_indexer(&self) -> bool {
        self.flags.contains(MemberFlags::INDEXER)
    }

    /// Instance constructor that takes no arguments.
    #[inline]
    pub fn is_default_constructor(&self) -> bool {
        self.kind == MemberKind::Constructor && self.parameter_count == 0 && !self.is_static()
    }
}
