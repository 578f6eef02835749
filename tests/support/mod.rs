//! A small C#-flavoured symbol graph shared by the integration tests.
#![allow(dead_code)]

use symgraph::{MemberFlags, MemberKind, SymbolTable, TypeId, TypeKind};

pub struct World {
    pub table: SymbolTable,
    pub object: TypeId,
    pub int32: TypeId,
    pub int_alias: TypeId,
    pub int64: TypeId,
    pub double: TypeId,
    pub string: TypeId,
    pub icomparable_1: TypeId,
    pub ienumerable: TypeId,
    pub ienumerable_1: TypeId,
    pub list_1: TypeId,
    pub list_int32: TypeId,
    pub nullable_int32: TypeId,
    pub animal: TypeId,
    pub dog: TypeId,
    pub puppy: TypeId,
    pub kennel: TypeId,
}

pub fn world() -> World {
    let mut table = SymbolTable::new();
    let corlib = table.add_module("System.Private.CoreLib");
    let user = table.add_module("Kennel");

    let object = table
        .declare_type(corlib, "System.Object", TypeKind::Class)
        .unwrap();
    table.set_universal_root(object);
    let value_type = table
        .declare_type(corlib, "System.ValueType", TypeKind::Class)
        .unwrap();
    table.set_base(value_type, object);

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

    let list_1 = table
        .declare_type(
            corlib,
            "System.Collections.Generic.List`1",
            TypeKind::Class,
        )
        .unwrap();
    let t = table.declare_type_parameter(corlib, "T");
    table.set_type_parameters(list_1, &[t]);
    table.set_base(list_1, object);
    let ienumerable_t = table.construct(ienumerable_1, &[t]).unwrap();
    table.add_interface(list_1, ienumerable_t);
    table.add_member(list_1, MemberKind::Property, "Count", 0, MemberFlags::empty());
    table.add_member(list_1, MemberKind::Property, "Item[]", 1, MemberFlags::INDEXER);
    table.add_member(list_1, MemberKind::Constructor, ".ctor", 0, MemberFlags::empty());

    let mut value = |name: &str| {
        let ty = table.declare_type(corlib, name, TypeKind::Struct).unwrap();
        table.set_base(ty, value_type);
        ty
    };
    let int32 = value("System.Int32");
    let int64 = value("System.Int64");
    let double = value("System.Double");
    let int_alias = value("int");

    let icomparable_int32 = table.construct(icomparable_1, &[int32]).unwrap();
    table.add_interface(int32, icomparable_int32);

    let string = table
        .declare_type(corlib, "System.String", TypeKind::Class)
        .unwrap();
    table.set_base(string, object);

    let nullable_1 = table
        .declare_type(corlib, "System.Nullable`1", TypeKind::Struct)
        .unwrap();
    let t = table.declare_type_parameter(corlib, "T");
    table.set_type_parameters(nullable_1, &[t]);
    table.set_base(nullable_1, value_type);
    let nullable_int32 = table.construct(nullable_1, &[int32]).unwrap();
    let list_int32 = table.construct(list_1, &[int32]).unwrap();

    let animal = table
        .declare_type(user, "Kennel.Animal", TypeKind::Class)
        .unwrap();
    table.set_base(animal, object);
    table.add_member(animal, MemberKind::Property, "Name", 0, MemberFlags::VIRTUAL);
    table.add_member(animal, MemberKind::Method, "Speak", 0, MemberFlags::VIRTUAL);
    table.add_member(animal, MemberKind::Constructor, ".ctor", 0, MemberFlags::empty());

    let dog = table.declare_type(user, "Kennel.Dog", TypeKind::Class).unwrap();
    table.set_base(dog, animal);
    table.add_member(dog, MemberKind::Method, "Speak", 0, MemberFlags::OVERRIDE);
    table.add_member(dog, MemberKind::Field, "owner", 0, MemberFlags::empty());
    table.add_member(dog, MemberKind::Constructor, ".ctor", 1, MemberFlags::empty());

    let puppy = table
        .declare_type(user, "Kennel.Puppy", TypeKind::Class)
        .unwrap();
    table.set_base(puppy, dog);
    table.add_member(puppy, MemberKind::Constructor, ".cctor", 0, MemberFlags::STATIC);

    let kennel = table
        .declare_type(user, "Kennel.Kennel", TypeKind::Class)
        .unwrap();
    table.set_base(kennel, object);
    let ienumerable_dog = table.construct(ienumerable_1, &[dog]).unwrap();
    table.add_interface(kennel, ienumerable_dog);
    table.add_member(kennel, MemberKind::Property, "Dogs", 0, MemberFlags::empty());
    table.add_member(kennel, MemberKind::Method, "Adopt", 1, MemberFlags::empty());

    World {
        table,
        object,
        int32,
        int_alias,
        int64,
        double,
        string,
        icomparable_1,
        ienumerable,
        ienumerable_1,
        list_1,
        list_int32,
        nullable_int32,
        animal,
        dog,
        puppy,
        kennel,
    }
}
