//! In-memory symbol graph.
//!
//! `SymbolTable` is the reference [`SymbolGraph`] implementation. A semantic
//! model (or a test) declares modules, types and members through the
//! builder methods, then hands out `&SymbolTable` to the resolvers. Once
//! shared, the table is never mutated.
//!
//! Constructed generic types are interned: `construct(List`1, [Int32])`
//! returns the same [`TypeId`] every time, so identity of constructed types
//! is an integer comparison. Base types and interfaces of a constructed type
//! are the definition's, with type parameters substituted; the definition
//! must therefore be complete before it is constructed.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::sync::Arc;
use symgraph_common::limits::MAX_GENERIC_EXPANSION_DEPTH;
use tracing::debug;

use crate::error::{ResolveError, ResolveResult};
use crate::graph::SymbolGraph;
use crate::qualified::QualifiedName;
use crate::types::{GraphId, Member, MemberFlags, MemberId, MemberKind, ModuleId, TypeId, TypeKind};

#[derive(Debug)]
struct TypeData {
    name: QualifiedName,
    kind: TypeKind,
    module: ModuleId,
    base: Option<TypeId>,
    interfaces: Vec<TypeId>,
    type_arguments: Vec<TypeId>,
    definition: TypeId,
    open: bool,
    members: Vec<MemberId>,
}

type ConstructionKey = (TypeId, SmallVec<[TypeId; 2]>);

#[derive(Debug)]
pub struct SymbolTable {
    id: GraphId,
    modules: Vec<Arc<str>>,
    types: Vec<TypeData>,
    members: Vec<Member>,
    by_name: FxHashMap<QualifiedName, TypeId>,
    constructed: FxHashMap<ConstructionKey, TypeId>,
    arrays: FxHashMap<(TypeId, u8), TypeId>,
    root: Option<TypeId>,
    /// Nesting of in-progress constructions.
    expansion_depth: u32,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self {
            id: GraphId::fresh(),
            modules: Vec::new(),
            types: Vec::new(),
            members: Vec::new(),
            by_name: FxHashMap::default(),
            constructed: FxHashMap::default(),
            arrays: FxHashMap::default(),
            root: None,
            expansion_depth: 0,
        }
    }
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_module(&mut self, name: &str) -> ModuleId {
        let id = ModuleId(self.modules.len() as u32);
        self.modules.push(Arc::from(name));
        id
    }

    /// Declare a non-generic (or not-yet-generic) type by metadata name.
    ///
    /// The first declaration of a name wins the name index; later
    /// declarations with the same name (e.g. from another module) are still
    /// reachable by handle.
    pub fn declare_type(
        &mut self,
        module: ModuleId,
        name: &str,
        kind: TypeKind,
    ) -> ResolveResult<TypeId> {
        let name = QualifiedName::parse(name)?;
        Ok(self.push_type(name, kind, module))
    }

    /// Declare a type parameter owned by a generic definition.
    pub fn declare_type_parameter(&mut self, module: ModuleId, name: &str) -> TypeId {
        let id = TypeId(self.types.len() as u32);
        self.types.push(TypeData {
            name: QualifiedName::new(std::iter::empty::<&str>(), name, 0),
            kind: TypeKind::TypeParameter,
            module,
            base: None,
            interfaces: Vec::new(),
            type_arguments: Vec::new(),
            definition: id,
            open: false,
            members: Vec::new(),
        });
        id
    }

    /// Mark `ty` as an open generic definition over `parameters`.
    pub fn set_type_parameters(&mut self, ty: TypeId, parameters: &[TypeId]) {
        let data = &mut self.types[ty.0 as usize];
        data.type_arguments = parameters.to_vec();
        data.open = !parameters.is_empty();
    }

    pub fn set_base(&mut self, ty: TypeId, base: TypeId) {
        self.types[ty.0 as usize].base = Some(base);
    }

    /// Add a directly implemented interface. Duplicates are ignored and
    /// declaration order is preserved.
    pub fn add_interface(&mut self, ty: TypeId, interface: TypeId) {
        let data = &mut self.types[ty.0 as usize];
        if !data.interfaces.contains(&interface) {
            data.interfaces.push(interface);
        }
    }

    /// Designate the universal root. Reference types without an explicit
    /// base are not rewired; set bases explicitly.
    pub fn set_universal_root(&mut self, ty: TypeId) {
        self.root = Some(ty);
    }

    pub fn add_member(
        &mut self,
        ty: TypeId,
        kind: MemberKind,
        name: &str,
        parameter_count: u16,
        flags: MemberFlags,
    ) -> MemberId {
        let id = MemberId(self.members.len() as u32);
        self.members.push(Member {
            kind,
            name: Arc::from(name),
            declaring_type: ty,
            parameter_count,
            flags,
        });
        self.types[ty.0 as usize].members.push(id);
        id
    }

    /// Intern the construction of `definition` over `arguments`.
    pub fn construct(&mut self, definition: TypeId, arguments: &[TypeId]) -> ResolveResult<TypeId> {
        if !self.contains_type(definition) {
            return Err(ResolveError::UnknownType(definition));
        }
        if let Some(&unknown) = arguments.iter().find(|&&arg| !self.contains_type(arg)) {
            return Err(ResolveError::UnknownType(unknown));
        }

        let key: ConstructionKey = (definition, arguments.iter().copied().collect());
        if let Some(&existing) = self.constructed.get(&key) {
            return Ok(existing);
        }

        let def = &self.types[definition.0 as usize];
        let substitution: FxHashMap<TypeId, TypeId> = def
            .type_arguments
            .iter()
            .copied()
            .zip(arguments.iter().copied())
            .collect();
        let (name, kind, module, base, interfaces) = (
            def.name.clone(),
            def.kind,
            def.module,
            def.base,
            def.interfaces.clone(),
        );

        // Interned before its supertypes are substituted: `Foo<T> : IEquatable<Foo<T>>`
        // reaches this same construction again while substituting.
        let id = TypeId(self.types.len() as u32);
        self.types.push(TypeData {
            name,
            kind,
            module,
            base: None,
            interfaces: Vec::new(),
            type_arguments: arguments.to_vec(),
            definition,
            open: false,
            members: Vec::new(),
        });
        self.constructed.insert(key, id);

        if self.expansion_depth >= MAX_GENERIC_EXPANSION_DEPTH {
            debug!(
                definition = definition.0,
                depth = self.expansion_depth,
                "generic expansion limit reached; supertypes left unsubstituted"
            );
            return Ok(id);
        }

        self.expansion_depth += 1;
        let supertypes = self.substitute_supertypes(base, interfaces, &substitution);
        self.expansion_depth -= 1;
        let (base, interfaces) = supertypes?;

        let data = &mut self.types[id.0 as usize];
        data.base = base;
        data.interfaces = interfaces;
        Ok(id)
    }

    fn substitute_supertypes(
        &mut self,
        base: Option<TypeId>,
        interfaces: Vec<TypeId>,
        substitution: &FxHashMap<TypeId, TypeId>,
    ) -> ResolveResult<(Option<TypeId>, Vec<TypeId>)> {
        let base = match base {
            Some(base) => Some(self.substitute(base, substitution)?),
            None => None,
        };
        let mut substituted = Vec::with_capacity(interfaces.len());
        for interface in interfaces {
            substituted.push(self.substitute(interface, substitution)?);
        }
        Ok((base, substituted))
    }

    /// Intern an array type. Its base is the core `System.Array` type when
    /// declared, otherwise the universal root.
    pub fn array_of(&mut self, element: TypeId, rank: u8) -> ResolveResult<TypeId> {
        if !self.contains_type(element) {
            return Err(ResolveError::UnknownType(element));
        }
        let rank = rank.max(1);
        if let Some(&existing) = self.arrays.get(&(element, rank)) {
            return Ok(existing);
        }

        let element_data = &self.types[element.0 as usize];
        let suffix = format!("[{}]", ",".repeat(usize::from(rank) - 1));
        let name = QualifiedName::new(
            element_data.name.namespace(),
            &format!("{}{}", element_data.name.name(), suffix),
            0,
        );
        let module = element_data.module;
        let array_class = QualifiedName::new(["System"], "Array", 0);
        let base = self.by_name.get(&array_class).copied().or(self.root);

        let id = TypeId(self.types.len() as u32);
        self.types.push(TypeData {
            name,
            kind: TypeKind::Array { rank },
            module,
            base,
            interfaces: Vec::new(),
            type_arguments: vec![element],
            definition: id,
            open: false,
            members: Vec::new(),
        });
        self.arrays.insert((element, rank), id);
        Ok(id)
    }

    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    fn push_type(&mut self, name: QualifiedName, kind: TypeKind, module: ModuleId) -> TypeId {
        let id = TypeId(self.types.len() as u32);
        self.by_name.entry(name.clone()).or_insert(id);
        self.types.push(TypeData {
            name,
            kind,
            module,
            base: None,
            interfaces: Vec::new(),
            type_arguments: Vec::new(),
            definition: id,
            open: false,
            members: Vec::new(),
        });
        id
    }

    fn substitute(
        &mut self,
        ty: TypeId,
        substitution: &FxHashMap<TypeId, TypeId>,
    ) -> ResolveResult<TypeId> {
        if let Some(&replacement) = substitution.get(&ty) {
            return Ok(replacement);
        }
        let data = &self.types[ty.0 as usize];
        if let TypeKind::Array { rank } = data.kind {
            let element = data.type_arguments[0];
            let element = self.substitute(element, substitution)?;
            return self.array_of(element, rank);
        }
        if data.type_arguments.is_empty() || (data.definition == ty && !data.open) {
            return Ok(ty);
        }

        let definition = data.definition;
        let arguments = data.type_arguments.clone();
        let mut replaced = Vec::with_capacity(arguments.len());
        for arg in arguments {
            replaced.push(self.substitute(arg, substitution)?);
        }
        self.construct(definition, &replaced)
    }
}

impl SymbolGraph for SymbolTable {
    fn graph_id(&self) -> GraphId {
        self.id
    }

    fn contains_type(&self, ty: TypeId) -> bool {
        (ty.0 as usize) < self.types.len()
    }

    fn type_kind(&self, ty: TypeId) -> TypeKind {
        self.types[ty.0 as usize].kind
    }

    fn base_type(&self, ty: TypeId) -> Option<TypeId> {
        self.types[ty.0 as usize].base
    }

    fn interfaces(&self, ty: TypeId) -> &[TypeId] {
        &self.types[ty.0 as usize].interfaces
    }

    fn type_arguments(&self, ty: TypeId) -> &[TypeId] {
        &self.types[ty.0 as usize].type_arguments
    }

    fn original_definition(&self, ty: TypeId) -> TypeId {
        self.types[ty.0 as usize].definition
    }

    fn is_open_definition(&self, ty: TypeId) -> bool {
        self.types[ty.0 as usize].open
    }

    fn is_universal_root(&self, ty: TypeId) -> bool {
        self.root == Some(ty)
    }

    fn universal_root(&self) -> Option<TypeId> {
        self.root
    }

    fn qualified_name(&self, ty: TypeId) -> &QualifiedName {
        &self.types[ty.0 as usize].name
    }

    fn module(&self, ty: TypeId) -> ModuleId {
        self.types[ty.0 as usize].module
    }

    fn module_name(&self, module: ModuleId) -> &str {
        &self.modules[module.0 as usize]
    }

    fn members(&self, ty: TypeId) -> &[MemberId] {
        let definition = self.types[ty.0 as usize].definition;
        &self.types[definition.0 as usize].members
    }

    fn member(&self, id: MemberId) -> &Member {
        &self.members[id.0 as usize]
    }

    fn lookup_type(&self, name: &QualifiedName) -> Option<TypeId> {
        self.by_name.get(name).copied()
    }
}

#[cfg(test)]
#[path = "../tests/table_tests.rs"]
mod tests;
