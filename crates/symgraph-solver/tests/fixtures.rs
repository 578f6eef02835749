//! A small core library shared by the solver tests.
#![allow(dead_code)]

use crate::table::SymbolTable;
use crate::types::{MemberFlags, MemberId, MemberKind, ModuleId, TypeId, TypeKind};

pub(crate) struct CoreLib {
    pub table: SymbolTable,
    pub corlib: ModuleId,
    pub user: ModuleId,
    pub object: TypeId,
    pub value_type: TypeId,
    pub array: TypeId,
    pub string: TypeId,
    pub int32: TypeId,
    pub int_alias: TypeId,
    pub double: TypeId,
    pub icomparable: TypeId,
    pub icomparable_1: TypeId,
    pub icomparable_int32: TypeId,
    pub ienumerable: TypeId,
    pub ienumerable_1: TypeId,
    pub ienumerable_int32: TypeId,
    pub nullable_1: TypeId,
    pub nullable_int32: TypeId,
}

impl CoreLib {
    pub fn new() -> Self {
        let mut table = SymbolTable::new();
        let corlib = table.add_module("System.Private.CoreLib");
        let user = table.add_module("test");

        let object = table
            .declare_type(corlib, "System.Object", TypeKind::Class)
            .unwrap();
        table.set_universal_root(object);
        let value_type = table
            .declare_type(corlib, "System.ValueType", TypeKind::Class)
            .unwrap();
        table.set_base(value_type, object);

        let icomparable = table
            .declare_type(corlib, "System.IComparable", TypeKind::Interface)
            .unwrap();
        let icomparable_1 = table
            .declare_type(corlib, "System.IComparable`1", TypeKind::Interface)
            .unwrap();
        let t = table.declare_type_parameter(corlib, "T");
        table.set_type_parameters(icomparable_1, &[t]);

        let ienumerable = table
            .declare_type(corlib, "System.Collections.IEnumerable", TypeKind::Interface)
            .unwrap();
        let ienumerable_1 = table
            .declare_type(
                corlib,
                "System.Collections.Generic.IEnumerable`1",
                TypeKind::Interface,
            )
            .unwrap();
        let t = table.declare_type_parameter(corlib, "T");
        table.set_type_parameters(ienumerable_1, &[t]);
        table.add_interface(ienumerable_1, ienumerable);

        let array = table
            .declare_type(corlib, "System.Array", TypeKind::Class)
            .unwrap();
        table.set_base(array, object);
        table.add_interface(array, ienumerable);

        let string = table
            .declare_type(corlib, "System.String", TypeKind::Class)
            .unwrap();
        table.set_base(string, object);
        table.add_interface(string, icomparable);

        let int32 = table
            .declare_type(corlib, "System.Int32", TypeKind::Struct)
            .unwrap();
        table.set_base(int32, value_type);
        table.add_interface(int32, icomparable);
        let icomparable_int32 = table.construct(icomparable_1, &[int32]).unwrap();
        table.add_interface(int32, icomparable_int32);

        let double = table
            .declare_type(corlib, "System.Double", TypeKind::Struct)
            .unwrap();
        table.set_base(double, value_type);
        table.add_interface(double, icomparable);

        let int_alias = table.declare_type(corlib, "int", TypeKind::Struct).unwrap();
        table.set_base(int_alias, value_type);

        let nullable_1 = table
            .declare_type(corlib, "System.Nullable`1", TypeKind::Struct)
            .unwrap();
        let t = table.declare_type_parameter(corlib, "T");
        table.set_type_parameters(nullable_1, &[t]);
        table.set_base(nullable_1, value_type);
        let nullable_int32 = table.construct(nullable_1, &[int32]).unwrap();

        let ienumerable_int32 = table.construct(ienumerable_1, &[int32]).unwrap();

        Self {
            table,
            corlib,
            user,
            object,
            value_type,
            array,
            string,
            int32,
            int_alias,
            double,
            icomparable,
            icomparable_1,
            icomparable_int32,
            ienumerable,
            ienumerable_1,
            ienumerable_int32,
            nullable_1,
            nullable_int32,
        }
    }

    /// Declare a class in the user module deriving from `base` (or the
    /// universal root).
    pub fn class(&mut self, name: &str, base: Option<TypeId>) -> TypeId {
        let ty = self
            .table
            .declare_type(self.user, name, TypeKind::Class)
            .unwrap();
        self.table.set_base(ty, base.unwrap_or(self.object));
        ty
    }

    pub fn interface(&mut self, name: &str) -> TypeId {
        self.table
            .declare_type(self.user, name, TypeKind::Interface)
            .unwrap()
    }

    pub fn member(&mut self, ty: TypeId, kind: MemberKind, name: &str) -> MemberId {
        self.table.add_member(ty, kind, name, 0, MemberFlags::empty())
    }

    pub fn ctor(&mut self, ty: TypeId, parameter_count: u16) -> MemberId {
        self.table.add_member(
            ty,
            MemberKind::Constructor,
            ".ctor",
            parameter_count,
            MemberFlags::empty(),
        )
    }

    /// `interface IEquatable<T>` and `class Foo<T> : IEquatable<Foo<T>>`.
    /// Returns `(foo, iequatable_1)`.
    pub fn self_referential(&mut self) -> (TypeId, TypeId) {
        let iequatable_1 = self
            .table
            .declare_type(self.corlib, "System.IEquatable`1", TypeKind::Interface)
            .unwrap();
        let t = self.table.declare_type_parameter(self.corlib, "T");
        self.table.set_type_parameters(iequatable_1, &[t]);

        let foo = self.class("N.Foo`1", None);
        let t = self.table.declare_type_parameter(self.user, "T");
        self.table.set_type_parameters(foo, &[t]);
        let foo_t = self.table.construct(foo, &[t]).unwrap();
        let iequatable_foo_t = self.table.construct(iequatable_1, &[foo_t]).unwrap();
        self.table.add_interface(foo, iequatable_foo_t);
        (foo, iequatable_1)
    }
}
