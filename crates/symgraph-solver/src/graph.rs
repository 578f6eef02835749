//! Symbol graph abstraction for the solver.
//!
//! This trait isolates resolution logic from concrete storage: the graph is
//! produced by an external semantic model and the solver only reads it.
//! Implementations must be immutable for the duration of an analysis unit,
//! which is what makes every query here safe to run from many threads.

use smallvec::SmallVec;

use crate::qualified::QualifiedName;
use crate::types::{GraphId, Member, MemberId, ModuleId, TypeId, TypeKind};

/// Query surface over an immutable, nominal type graph.
///
/// Methods taking a [`TypeId`] may assume the id satisfies
/// [`contains_type`](Self::contains_type); resolver entry points check that
/// before walking.
pub trait SymbolGraph: Send + Sync {
    /// Process-unique identity of this graph instance. Memoized queries key
    /// on it so entries from different graphs never mix.
    fn graph_id(&self) -> GraphId;

    fn contains_type(&self, ty: TypeId) -> bool;

    fn type_kind(&self, ty: TypeId) -> TypeKind;

    /// Direct base type; `None` for the universal root, interfaces and
    /// type parameters.
    fn base_type(&self, ty: TypeId) -> Option<TypeId>;

    /// Directly implemented (or, for interfaces, directly inherited)
    /// interfaces in declaration order.
    fn interfaces(&self, ty: TypeId) -> &[TypeId];

    /// Type arguments of a constructed generic type, or type parameters of
    /// an open definition. Arrays report their element type here.
    fn type_arguments(&self, ty: TypeId) -> &[TypeId];

    /// The open definition a constructed type was built from; `ty` itself
    /// when it is not constructed.
    fn original_definition(&self, ty: TypeId) -> TypeId;

    fn is_open_definition(&self, ty: TypeId) -> bool;

    fn is_universal_root(&self, ty: TypeId) -> bool;

    fn universal_root(&self) -> Option<TypeId>;

    fn qualified_name(&self, ty: TypeId) -> &QualifiedName;

    fn module(&self, ty: TypeId) -> ModuleId;

    /// Metadata name of a module. Modules with equal names are the same
    /// module.
    fn module_name(&self, module: ModuleId) -> &str;

    /// Members declared directly on `ty` (inherited members excluded).
    fn members(&self, ty: TypeId) -> &[MemberId];

    fn member(&self, id: MemberId) -> &Member;

    /// Members declared directly on `ty` named `name`.
    fn members_named(&self, ty: TypeId, name: &str) -> SmallVec<[MemberId; 4]> {
        self.members(ty)
            .iter()
            .copied()
            .filter(|&id| &*self.member(id).name == name)
            .collect()
    }

    /// Find a type by metadata name. Constructed types are not indexed.
    fn lookup_type(&self, name: &QualifiedName) -> Option<TypeId>;

    /// Nominal identity: the same handle, or the same qualified name in the
    /// same module with pairwise identical type arguments.
    fn same_symbol(&self, a: TypeId, b: TypeId) -> bool {
        if a == b {
            return true;
        }
        if self.qualified_name(a) != self.qualified_name(b)
            || self.module_name(self.module(a)) != self.module_name(self.module(b))
            || self.is_open_definition(a) != self.is_open_definition(b)
        {
            return false;
        }
        let (args_a, args_b) = (self.type_arguments(a), self.type_arguments(b));
        args_a.len() == args_b.len()
            && args_a
                .iter()
                .zip(args_b)
                .all(|(&x, &y)| x == y || self.same_symbol(x, y))
    }

    #[inline]
    fn is_reference_type(&self, ty: TypeId) -> bool {
        self.type_kind(ty).is_reference()
    }
}
