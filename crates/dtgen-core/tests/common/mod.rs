#![allow(dead_code)]

use dtgen_model::{
    DescriptorTable, ElementKind, Field, FieldSet, TableEntry, TransmuteOptions, TypeDescriptor,
};

pub const IMPL_MASTER: &str = include_str!("../data/DoubleDatasetImpl.java");
pub const INTERFACE_MASTER: &str = include_str!("../data/DoubleDataset.java");

/// The interface master only names the primitive and boxed types.
pub fn interface_options() -> TransmuteOptions {
    TransmuteOptions::new().with_required(FieldSet::only(Field::PrimitiveName))
}

pub fn descriptor(fields: [&str; 7]) -> TypeDescriptor {
    let [storage, boxed, primitive, accessor, conversion, format, sentinel] = fields;
    TypeDescriptor::new(storage, boxed, primitive, accessor, conversion, format, sentinel)
        .expect("valid descriptor")
}

pub fn double() -> TypeDescriptor {
    descriptor([
        "FLOAT64",
        "Double",
        "double",
        "getElementDoubleAbs",
        "DTypeUtils.toReal(obj)",
        "%.8g",
        "NaN",
    ])
}

pub fn float() -> TypeDescriptor {
    descriptor([
        "FLOAT32",
        "Float",
        "float",
        "getElementDoubleAbs",
        "(float) DTypeUtils.toReal(obj)",
        "%.8g",
        "NaN",
    ])
}

pub fn integer() -> TypeDescriptor {
    descriptor([
        "INT32",
        "Integer",
        "int",
        "getElementLongAbs",
        "(int) DTypeUtils.toLong(obj)",
        "%d",
        "MIN_VALUE",
    ])
}

pub fn long() -> TypeDescriptor {
    descriptor([
        "INT64",
        "Long",
        "long",
        "getElementLongAbs",
        "DTypeUtils.toLong(obj)",
        "%d",
        "MIN_VALUE",
    ])
}

pub fn boolean() -> TypeDescriptor {
    descriptor([
        "BOOL",
        "Boolean",
        "boolean",
        "getElementBooleanAbs",
        "DTypeUtils.toBoolean(obj)",
        "%b",
        "FALSE",
    ])
}

pub fn string() -> TypeDescriptor {
    descriptor([
        "STRING",
        "String",
        "String",
        "getStringAbs",
        "obj.toString()",
        "%s",
        "FALSE",
    ])
}

pub fn object() -> TypeDescriptor {
    descriptor([
        "OBJECT", "Object", "Object", "getObjectAbs", "obj", "%s", "FALSE",
    ])
}

/// Scalar family with `DoubleDataset` as the default.
pub fn scalar_table() -> DescriptorTable {
    DescriptorTable::new(
        "DoubleDataset",
        vec![
            TableEntry::new("DoubleDataset", double(), ElementKind::Real),
            TableEntry::new("FloatDataset", float(), ElementKind::Real),
            TableEntry::new("LongDataset", long(), ElementKind::Integer),
            TableEntry::new("IntegerDataset", integer(), ElementKind::Integer),
            TableEntry::new("BooleanDatasetBase", boolean(), ElementKind::Boolean),
            TableEntry::new("StringDatasetBase", string(), ElementKind::Object),
            TableEntry::new("ObjectDatasetBase", object(), ElementKind::Object),
        ],
    )
    .expect("valid table")
}
