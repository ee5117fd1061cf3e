//! In-memory class-file builder for tests.
//!
//! Produces version-52 class files with just enough structure to exercise the
//! decoder: a constant pool deduplicated by content, members with attribute
//! tails, and helpers for the attributes the decoder recognizes. Raw hooks
//! allow writing deliberately malformed input.

use std::collections::HashMap;

const ACC_PUBLIC: u16 = 0x0001;
const ACC_SUPER: u16 = 0x0020;
const ACC_INTERFACE: u16 = 0x0200;
const ACC_ABSTRACT: u16 = 0x0400;

/// An annotation element value.
#[derive(Debug, Clone)]
pub enum ElementValue {
    Int(i32),
    String(String),
    /// Enum constant: type descriptor and constant name.
    Enum(String, String),
    /// Class literal by return descriptor.
    Class(String),
    Annotation(Annotation),
    Array(Vec<ElementValue>),
    /// A tag byte with no payload, for malformed input.
    RawTag(u8),
}

#[derive(Debug, Clone)]
pub struct Annotation {
    pub type_descriptor: String,
    pub elements: Vec<(String, ElementValue)>,
}

impl Annotation {
    pub fn new(type_descriptor: &str) -> Self {
        Self {
            type_descriptor: type_descriptor.to_string(),
            elements: Vec::new(),
        }
    }

    pub fn with(mut self, name: &str, value: ElementValue) -> Self {
        self.elements.push((name.to_string(), value));
        self
    }
}

#[derive(Debug, Clone)]
pub struct ClassFileBuilder {
    magic: u32,
    pool: Vec<u8>,
    next_slot: u16,
    utf8: HashMap<String, u16>,
    classes: HashMap<String, u16>,
    access: u16,
    this_class: u16,
    super_class: u16,
    interfaces: Vec<u16>,
    fields: Vec<Vec<u8>>,
    methods: Vec<Vec<u8>>,
    attributes: Vec<Vec<u8>>,
}

impl ClassFileBuilder {
    /// A public concrete class extending `java/lang/Object`.
    pub fn new(internal_name: &str) -> Self {
        let mut builder = Self {
            magic: 0xCAFE_BABE,
            pool: Vec::new(),
            next_slot: 1,
            utf8: HashMap::new(),
            classes: HashMap::new(),
            access: ACC_PUBLIC | ACC_SUPER,
            this_class: 0,
            super_class: 0,
            interfaces: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            attributes: Vec::new(),
        };
        builder.this_class = builder.class(internal_name);
        builder.super_class = builder.class("java/lang/Object");
        builder
    }

    // ------------------------------------------------------------------
    // Class header
    // ------------------------------------------------------------------

    pub fn magic(&mut self, magic: u32) -> &mut Self {
        self.magic = magic;
        self
    }

    pub fn access(&mut self, flags: u16) -> &mut Self {
        self.access = flags;
        self
    }

    pub fn interface(&mut self) -> &mut Self {
        self.access(ACC_PUBLIC | ACC_INTERFACE | ACC_ABSTRACT)
    }

    pub fn abstract_class(&mut self) -> &mut Self {
        self.access(ACC_PUBLIC | ACC_SUPER | ACC_ABSTRACT)
    }

    pub fn extends(&mut self, internal_name: &str) -> &mut Self {
        self.super_class = self.class(internal_name);
        self
    }

    /// Write `index` verbatim as the super class reference.
    pub fn super_class_index(&mut self, index: u16) -> &mut Self {
        self.super_class = index;
        self
    }

    pub fn implements(&mut self, internal_name: &str) -> &mut Self {
        let index = self.class(internal_name);
        self.interfaces.push(index);
        self
    }

    pub fn field(&mut self, name: &str, descriptor: &str) -> &mut Self {
        self.field_with(name, descriptor, Vec::new())
    }

    pub fn field_with(&mut self, name: &str, descriptor: &str, attributes: Vec<Vec<u8>>) -> &mut Self {
        let member = self.member(name, descriptor, attributes);
        self.fields.push(member);
        self
    }

    pub fn method(&mut self, name: &str, descriptor: &str) -> &mut Self {
        self.method_with(name, descriptor, Vec::new())
    }

    pub fn method_with(&mut self, name: &str, descriptor: &str, attributes: Vec<Vec<u8>>) -> &mut Self {
        let member = self.member(name, descriptor, attributes);
        self.methods.push(member);
        self
    }

    /// Append a class-level attribute built by one of the `*_attr` helpers.
    pub fn attribute(&mut self, attribute: Vec<u8>) -> &mut Self {
        self.attributes.push(attribute);
        self
    }

    fn member(&mut self, name: &str, descriptor: &str, attributes: Vec<Vec<u8>>) -> Vec<u8> {
        let mut out = Vec::new();
        put_u16(&mut out, ACC_PUBLIC);
        put_u16(&mut out, self.utf8(name));
        put_u16(&mut out, self.utf8(descriptor));
        put_table(&mut out, &attributes);
        out
    }

    // ------------------------------------------------------------------
    // Constant pool
    // ------------------------------------------------------------------

    pub fn utf8(&mut self, text: &str) -> u16 {
        if let Some(&index) = self.utf8.get(text) {
            return index;
        }
        let mut entry = vec![1];
        put_u16(&mut entry, text.len() as u16);
        entry.extend_from_slice(text.as_bytes());
        let index = self.push_entry(entry, 1);
        self.utf8.insert(text.to_string(), index);
        index
    }

    pub fn class(&mut self, internal_name: &str) -> u16 {
        if let Some(&index) = self.classes.get(internal_name) {
            return index;
        }
        let name = self.utf8(internal_name);
        let index = self.class_entry(name);
        self.classes.insert(internal_name.to_string(), index);
        index
    }

    /// A Class entry whose name index is written verbatim.
    pub fn class_entry(&mut self, name_index: u16) -> u16 {
        let mut entry = vec![7];
        put_u16(&mut entry, name_index);
        self.push_entry(entry, 1)
    }

    pub fn name_and_type(&mut self, name: &str, descriptor: &str) -> u16 {
        let name = self.utf8(name);
        let descriptor = self.utf8(descriptor);
        let mut entry = vec![12];
        put_u16(&mut entry, name);
        put_u16(&mut entry, descriptor);
        self.push_entry(entry, 1)
    }

    pub fn method_ref(&mut self, owner: &str, name: &str, descriptor: &str) -> u16 {
        let class = self.class(owner);
        let name_and_type = self.name_and_type(name, descriptor);
        let mut entry = vec![10];
        put_u16(&mut entry, class);
        put_u16(&mut entry, name_and_type);
        self.push_entry(entry, 1)
    }

    pub fn method_type(&mut self, descriptor: &str) -> u16 {
        let descriptor = self.utf8(descriptor);
        let mut entry = vec![16];
        put_u16(&mut entry, descriptor);
        self.push_entry(entry, 1)
    }

    pub fn integer(&mut self, value: i32) -> u16 {
        let mut entry = vec![3];
        entry.extend_from_slice(&value.to_be_bytes());
        self.push_entry(entry, 1)
    }

    /// A Long entry; it occupies two slots.
    pub fn long(&mut self, value: i64) -> u16 {
        let mut entry = vec![5];
        entry.extend_from_slice(&value.to_be_bytes());
        self.push_entry(entry, 2)
    }

    /// Raw entry bytes (tag included) counted as one slot.
    pub fn raw_constant(&mut self, bytes: &[u8]) -> u16 {
        self.push_entry(bytes.to_vec(), 1)
    }

    fn push_entry(&mut self, entry: Vec<u8>, slots: u16) -> u16 {
        let index = self.next_slot;
        self.pool.extend_from_slice(&entry);
        self.next_slot += slots;
        index
    }

    // ------------------------------------------------------------------
    // Attributes
    // ------------------------------------------------------------------

    /// An attribute with an arbitrary name and payload.
    pub fn raw_attr(&mut self, name: &str, payload: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        put_u16(&mut out, self.utf8(name));
        put_u32(&mut out, payload.len() as u32);
        out.extend_from_slice(payload);
        out
    }

    pub fn source_file_attr(&mut self, file: &str) -> Vec<u8> {
        let index = self.utf8(file);
        self.raw_attr("SourceFile", &index.to_be_bytes())
    }

    pub fn signature_attr(&mut self, signature: &str) -> Vec<u8> {
        let index = self.utf8(signature);
        self.raw_attr("Signature", &index.to_be_bytes())
    }

    pub fn exceptions_attr(&mut self, classes: &[&str]) -> Vec<u8> {
        let mut payload = Vec::new();
        put_u16(&mut payload, classes.len() as u16);
        for class in classes {
            let index = self.class(class);
            put_u16(&mut payload, index);
        }
        self.raw_attr("Exceptions", &payload)
    }

    /// `(inner, outer)` pairs; `None` writes index 0.
    pub fn inner_classes_attr(&mut self, entries: &[(&str, Option<&str>)]) -> Vec<u8> {
        let mut payload = Vec::new();
        put_u16(&mut payload, entries.len() as u16);
        for (inner, outer) in entries {
            let inner_index = self.class(inner);
            let outer_index = outer.map_or(0, |o| self.class(o));
            put_u16(&mut payload, inner_index);
            put_u16(&mut payload, outer_index);
            put_u16(&mut payload, 0);
            put_u16(&mut payload, ACC_PUBLIC);
        }
        self.raw_attr("InnerClasses", &payload)
    }

    pub fn enclosing_method_attr(&mut self, class: &str, method: Option<(&str, &str)>) -> Vec<u8> {
        let class_index = self.class(class);
        let method_index = method.map_or(0, |(name, descriptor)| self.name_and_type(name, descriptor));
        let mut payload = Vec::new();
        put_u16(&mut payload, class_index);
        put_u16(&mut payload, method_index);
        self.raw_attr("EnclosingMethod", &payload)
    }

    pub fn annotations_attr(&mut self, visible: bool, annotations: &[Annotation]) -> Vec<u8> {
        let mut payload = Vec::new();
        self.put_annotations(&mut payload, annotations);
        let name = if visible {
            "RuntimeVisibleAnnotations"
        } else {
            "RuntimeInvisibleAnnotations"
        };
        self.raw_attr(name, &payload)
    }

    /// One annotation list per method parameter.
    pub fn parameter_annotations_attr(&mut self, parameters: &[Vec<Annotation>]) -> Vec<u8> {
        let mut payload = vec![parameters.len() as u8];
        for annotations in parameters {
            self.put_annotations(&mut payload, annotations);
        }
        self.raw_attr("RuntimeVisibleParameterAnnotations", &payload)
    }

    pub fn annotation_default_attr(&mut self, value: &ElementValue) -> Vec<u8> {
        let mut payload = Vec::new();
        self.put_element(&mut payload, value);
        self.raw_attr("AnnotationDefault", &payload)
    }

    /// A `Code` attribute with a single `return`, one handler per catch type
    /// (`None` is a catch-all) and the given nested attributes.
    pub fn code_attr(&mut self, catch_types: &[Option<&str>], nested: Vec<Vec<u8>>) -> Vec<u8> {
        let mut payload = Vec::new();
        put_u16(&mut payload, 1);
        put_u16(&mut payload, 1);
        put_u32(&mut payload, 1);
        payload.push(0xB1);
        put_u16(&mut payload, catch_types.len() as u16);
        for catch_type in catch_types {
            let index = catch_type.map_or(0, |c| self.class(c));
            put_u16(&mut payload, 0);
            put_u16(&mut payload, 1);
            put_u16(&mut payload, 0);
            put_u16(&mut payload, index);
        }
        put_table(&mut payload, &nested);
        self.raw_attr("Code", &payload)
    }

    /// `(name, descriptor)` rows of a `LocalVariableTable`.
    pub fn local_variable_table_attr(&mut self, variables: &[(&str, &str)]) -> Vec<u8> {
        self.local_variables("LocalVariableTable", variables)
    }

    /// `(name, signature)` rows of a `LocalVariableTypeTable`.
    pub fn local_variable_type_table_attr(&mut self, variables: &[(&str, &str)]) -> Vec<u8> {
        self.local_variables("LocalVariableTypeTable", variables)
    }

    fn local_variables(&mut self, attribute: &str, variables: &[(&str, &str)]) -> Vec<u8> {
        let mut payload = Vec::new();
        put_u16(&mut payload, variables.len() as u16);
        for (slot, (name, descriptor)) in variables.iter().enumerate() {
            put_u16(&mut payload, 0);
            put_u16(&mut payload, 1);
            put_u16(&mut payload, self.utf8(name));
            put_u16(&mut payload, self.utf8(descriptor));
            put_u16(&mut payload, slot as u16);
        }
        self.raw_attr(attribute, &payload)
    }

    fn put_annotations(&mut self, out: &mut Vec<u8>, annotations: &[Annotation]) {
        put_u16(out, annotations.len() as u16);
        for annotation in annotations {
            self.put_annotation(out, annotation);
        }
    }

    fn put_annotation(&mut self, out: &mut Vec<u8>, annotation: &Annotation) {
        put_u16(out, self.utf8(&annotation.type_descriptor));
        put_u16(out, annotation.elements.len() as u16);
        for (name, value) in &annotation.elements {
            put_u16(out, self.utf8(name));
            self.put_element(out, value);
        }
    }

    fn put_element(&mut self, out: &mut Vec<u8>, value: &ElementValue) {
        match value {
            ElementValue::Int(v) => {
                out.push(b'I');
                put_u16(out, self.integer(*v));
            }
            ElementValue::String(s) => {
                out.push(b's');
                put_u16(out, self.utf8(s));
            }
            ElementValue::Enum(type_descriptor, constant) => {
                out.push(b'e');
                put_u16(out, self.utf8(type_descriptor));
                put_u16(out, self.utf8(constant));
            }
            ElementValue::Class(descriptor) => {
                out.push(b'c');
                put_u16(out, self.utf8(descriptor));
            }
            ElementValue::Annotation(annotation) => {
                out.push(b'@');
                self.put_annotation(out, annotation);
            }
            ElementValue::Array(values) => {
                out.push(b'[');
                put_u16(out, values.len() as u16);
                for v in values {
                    self.put_element(out, v);
                }
            }
            ElementValue::RawTag(tag) => out.push(*tag),
        }
    }

    // ------------------------------------------------------------------
    // Output
    // ------------------------------------------------------------------

    pub fn build(&self) -> Vec<u8> {
        let mut out = Vec::new();
        put_u32(&mut out, self.magic);
        put_u16(&mut out, 0);
        put_u16(&mut out, 52);
        put_u16(&mut out, self.next_slot);
        out.extend_from_slice(&self.pool);
        put_u16(&mut out, self.access);
        put_u16(&mut out, self.this_class);
        put_u16(&mut out, self.super_class);
        put_u16(&mut out, self.interfaces.len() as u16);
        for &index in &self.interfaces {
            put_u16(&mut out, index);
        }
        put_table(&mut out, &self.fields);
        put_table(&mut out, &self.methods);
        put_table(&mut out, &self.attributes);
        out
    }
}

fn put_u16(out: &mut Vec<u8>, value: u16) {
    out.extend_from_slice(&value.to_be_bytes());
}

fn put_u32(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_be_bytes());
}

fn put_table(out: &mut Vec<u8>, items: &[Vec<u8>]) {
    put_u16(out, items.len() as u16);
    for item in items {
        out.extend_from_slice(item);
    }
}
