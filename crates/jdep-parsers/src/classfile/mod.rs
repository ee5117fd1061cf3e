//! Class-file decoding.
//!
//! [`decode`] turns one compiled class into a [`ClassRecord`]: its name,
//! source file, abstractness, and every package it references through the
//! constant pool, member descriptors, generic signatures, annotations, and the
//! exception tables of its method bodies.

mod attributes;
mod constant_pool;
mod descriptor;
mod reader;

use std::collections::BTreeSet;

use jdep_core::types::ClassRecord;

use constant_pool::{Constant, ConstantPool};
use reader::ByteReader;

const MAGIC: u32 = 0xCAFE_BABE;
const ACC_INTERFACE: u16 = 0x0200;
const ACC_ABSTRACT: u16 = 0x0400;

/// Deepest nesting of element values, `Code` attributes or generic type
/// arguments the decoder descends into. Array types are capped at 255
/// dimensions by the JVM.
pub(crate) const MAX_NESTING: usize = 256;

/// Malformed class-file input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("not a class file: magic is {found:#010x}")]
    BadMagic { found: u32 },

    #[error("truncated at offset {offset}: needed {needed} bytes, {available} available")]
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("constant pool index {index} is not usable (pool size {pool_size})")]
    IndexOutOfRange { index: u16, pool_size: u16 },

    #[error("constant pool entry {index} is not a {expected} entry")]
    UnexpectedConstant { index: u16, expected: &'static str },

    #[error("unknown constant pool tag {tag} at offset {offset}")]
    UnknownTag { tag: u8, offset: usize },

    #[error("unknown annotation element tag {tag:#04x} at offset {offset}")]
    BadElementValue { tag: u8, offset: usize },

    #[error("structure nested deeper than 256 levels at offset {offset}")]
    NestingTooDeep { offset: usize },
}

/// Decode a class file.
///
/// Fails on a bad magic number, truncated input, a dangling or mistyped
/// constant-pool reference, an unknown constant tag, or annotation values and
/// `Code` attributes nested more than 256 levels deep. Unrecognized
/// attributes are skipped by their declared length.
pub fn decode(bytes: &[u8]) -> Result<ClassRecord, DecodeError> {
    let mut r = ByteReader::new(bytes);

    let magic = r.u32()?;
    if magic != MAGIC {
        return Err(DecodeError::BadMagic { found: magic });
    }
    let _minor = r.u16()?;
    let _major = r.u16()?;

    let pool = ConstantPool::parse(&mut r)?;
    let mut refs = Collector::new(&pool);

    let access_flags = r.u16()?;
    let this_class = r.u16()?;
    let internal_name = pool.class_name(this_class)?;
    refs.class(this_class)?;

    let super_class = r.u16()?;
    refs.optional_class(super_class)?;

    let interface_count = r.u16()?;
    for _ in 0..interface_count {
        let interface = r.u16()?;
        refs.class(interface)?;
    }

    // fields, then methods
    for _ in 0..2 {
        let member_count = r.u16()?;
        for _ in 0..member_count {
            let _access = r.u16()?;
            let _name = r.u16()?;
            let descriptor = r.u16()?;
            refs.descriptor(descriptor)?;
            attributes::read_attributes(&mut r, &mut refs, 0)?;
        }
    }

    attributes::read_attributes(&mut r, &mut refs, 0)?;
    refs.sweep_pool()?;

    let Collector {
        packages,
        source_file,
        ..
    } = refs;
    Ok(ClassRecord::new(
        internal_name.replace('/', "."),
        source_file,
        access_flags & (ACC_INTERFACE | ACC_ABSTRACT) != 0,
        packages,
    ))
}

/// Package of a slash-separated internal name, dot-delimited.
fn package_of_internal(name: &str) -> String {
    match name.rsplit_once('/') {
        Some((package, _)) => package.replace('/', "."),
        None => String::new(),
    }
}

/// Accumulates referenced packages while the class is walked.
pub(crate) struct Collector<'p, 'a> {
    pool: &'p ConstantPool<'a>,
    packages: BTreeSet<String>,
    source_file: Option<String>,
}

impl<'p, 'a> Collector<'p, 'a> {
    fn new(pool: &'p ConstantPool<'a>) -> Self {
        Self {
            pool,
            packages: BTreeSet::new(),
            source_file: None,
        }
    }

    pub(crate) fn pool(&self) -> &'p ConstantPool<'a> {
        self.pool
    }

    pub(crate) fn set_source_file(&mut self, utf8_index: u16) -> Result<(), DecodeError> {
        self.source_file = Some(self.pool.utf8(utf8_index)?.to_string());
        Ok(())
    }

    /// Record the class named by a Class constant.
    pub(crate) fn class(&mut self, index: u16) -> Result<(), DecodeError> {
        let pool = self.pool;
        self.internal_name(pool.class_name(index)?);
        Ok(())
    }

    /// Like [`class`](Self::class), where index 0 means "none".
    pub(crate) fn optional_class(&mut self, index: u16) -> Result<(), DecodeError> {
        if index == 0 {
            return Ok(());
        }
        self.class(index)
    }

    /// Record the types of a descriptor or signature held in a Utf8 constant.
    pub(crate) fn descriptor(&mut self, utf8_index: u16) -> Result<(), DecodeError> {
        let pool = self.pool;
        self.descriptor_text(pool.utf8(utf8_index)?);
        Ok(())
    }

    fn internal_name(&mut self, name: &str) {
        // Array classes are named by their descriptor.
        if name.starts_with('[') {
            self.descriptor_text(name);
        } else {
            self.packages.insert(package_of_internal(name));
        }
    }

    pub(crate) fn descriptor_text(&mut self, text: &str) {
        let packages = &mut self.packages;
        descriptor::scan_types(text, &mut |name: &str| {
            packages.insert(package_of_internal(name));
        });
    }

    /// Record every class named by Class, NameAndType and MethodType constants.
    fn sweep_pool(&mut self) -> Result<(), DecodeError> {
        let pool = self.pool;
        for entry in pool.entries() {
            match *entry {
                Constant::Class { name } => self.internal_name(pool.utf8(name)?),
                Constant::NameAndType { descriptor, .. } | Constant::MethodType { descriptor } => {
                    self.descriptor(descriptor)?
                }
                _ => {}
            }
        }
        Ok(())
    }
}
