//! The class-file constant pool.
//!
//! Entries are read in one pass and kept as raw slices and indices. Text is
//! decoded on first use and memoized per slot, since indirect entries may
//! point at entries declared after them.

use std::cell::OnceCell;

use super::reader::ByteReader;
use super::DecodeError;

const TAG_UTF8: u8 = 1;
const TAG_INTEGER: u8 = 3;
const TAG_FLOAT: u8 = 4;
const TAG_LONG: u8 = 5;
const TAG_DOUBLE: u8 = 6;
const TAG_CLASS: u8 = 7;
const TAG_STRING: u8 = 8;
const TAG_FIELD_REF: u8 = 9;
const TAG_METHOD_REF: u8 = 10;
const TAG_INTERFACE_METHOD_REF: u8 = 11;
const TAG_NAME_AND_TYPE: u8 = 12;
const TAG_METHOD_HANDLE: u8 = 15;
const TAG_METHOD_TYPE: u8 = 16;
const TAG_DYNAMIC: u8 = 17;
const TAG_INVOKE_DYNAMIC: u8 = 18;
const TAG_MODULE: u8 = 19;
const TAG_PACKAGE: u8 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Constant<'a> {
    /// Slot 0 and the slot following a long or double.
    Unusable,
    Utf8(&'a [u8]),
    Integer,
    Float,
    Long,
    Double,
    Class { name: u16 },
    String { utf8: u16 },
    FieldRef { class: u16, name_and_type: u16 },
    MethodRef { class: u16, name_and_type: u16 },
    InterfaceMethodRef { class: u16, name_and_type: u16 },
    NameAndType { name: u16, descriptor: u16 },
    MethodHandle { reference: u16 },
    MethodType { descriptor: u16 },
    Dynamic { name_and_type: u16 },
    InvokeDynamic { name_and_type: u16 },
    Module { name: u16 },
    Package { name: u16 },
}

#[derive(Debug)]
pub(crate) struct ConstantPool<'a> {
    entries: Vec<Constant<'a>>,
    text: Vec<OnceCell<String>>,
}

impl<'a> ConstantPool<'a> {
    /// Read the count-prefixed pool and check every cross-reference.
    pub(crate) fn parse(r: &mut ByteReader<'a>) -> Result<Self, DecodeError> {
        let count = r.u16()? as usize;
        let mut entries = Vec::with_capacity(count.max(1));
        entries.push(Constant::Unusable);

        while entries.len() < count {
            let offset = r.offset();
            let tag = r.u8()?;
            let entry = match tag {
                TAG_UTF8 => {
                    let len = r.u16()? as usize;
                    Constant::Utf8(r.bytes(len)?)
                }
                TAG_INTEGER => {
                    r.skip(4)?;
                    Constant::Integer
                }
                TAG_FLOAT => {
                    r.skip(4)?;
                    Constant::Float
                }
                TAG_LONG | TAG_DOUBLE => {
                    r.skip(8)?;
                    entries.push(if tag == TAG_LONG {
                        Constant::Long
                    } else {
                        Constant::Double
                    });
                    // 8-byte constants take two slots; the second is unusable.
                    Constant::Unusable
                }
                TAG_CLASS => Constant::Class { name: r.u16()? },
                TAG_STRING => Constant::String { utf8: r.u16()? },
                TAG_FIELD_REF => Constant::FieldRef {
                    class: r.u16()?,
                    name_and_type: r.u16()?,
                },
                TAG_METHOD_REF => Constant::MethodRef {
                    class: r.u16()?,
                    name_and_type: r.u16()?,
                },
                TAG_INTERFACE_METHOD_REF => Constant::InterfaceMethodRef {
                    class: r.u16()?,
                    name_and_type: r.u16()?,
                },
                TAG_NAME_AND_TYPE => Constant::NameAndType {
                    name: r.u16()?,
                    descriptor: r.u16()?,
                },
                TAG_METHOD_HANDLE => {
                    let _kind = r.u8()?;
                    Constant::MethodHandle {
                        reference: r.u16()?,
                    }
                }
                TAG_METHOD_TYPE => Constant::MethodType {
                    descriptor: r.u16()?,
                },
                TAG_DYNAMIC | TAG_INVOKE_DYNAMIC => {
                    // The bootstrap index points into the BootstrapMethods
                    // attribute, not the pool.
                    let _bootstrap = r.u16()?;
                    let name_and_type = r.u16()?;
                    if tag == TAG_DYNAMIC {
                        Constant::Dynamic { name_and_type }
                    } else {
                        Constant::InvokeDynamic { name_and_type }
                    }
                }
                TAG_MODULE => Constant::Module { name: r.u16()? },
                TAG_PACKAGE => Constant::Package { name: r.u16()? },
                _ => return Err(DecodeError::UnknownTag { tag, offset }),
            };
            entries.push(entry);
        }
        // A trailing long/double may claim one slot past the declared count.
        entries.truncate(count.max(1));

        let text = (0..entries.len()).map(|_| OnceCell::new()).collect();
        let pool = Self { entries, text };
        pool.validate()?;
        Ok(pool)
    }

    fn validate(&self) -> Result<(), DecodeError> {
        for entry in &self.entries {
            match *entry {
                Constant::Class { name }
                | Constant::Module { name }
                | Constant::Package { name } => self.expect(name, "Utf8", is_utf8)?,
                Constant::String { utf8 } => self.expect(utf8, "Utf8", is_utf8)?,
                Constant::MethodType { descriptor } => self.expect(descriptor, "Utf8", is_utf8)?,
                Constant::NameAndType { name, descriptor } => {
                    self.expect(name, "Utf8", is_utf8)?;
                    self.expect(descriptor, "Utf8", is_utf8)?;
                }
                Constant::FieldRef {
                    class,
                    name_and_type,
                }
                | Constant::MethodRef {
                    class,
                    name_and_type,
                }
                | Constant::InterfaceMethodRef {
                    class,
                    name_and_type,
                } => {
                    self.expect(class, "Class", |c| matches!(c, Constant::Class { .. }))?;
                    self.expect(name_and_type, "NameAndType", is_name_and_type)?;
                }
                Constant::MethodHandle { reference } => {
                    self.expect(reference, "member reference", |c| {
                        matches!(
                            c,
                            Constant::FieldRef { .. }
                                | Constant::MethodRef { .. }
                                | Constant::InterfaceMethodRef { .. }
                        )
                    })?;
                }
                Constant::Dynamic { name_and_type } | Constant::InvokeDynamic { name_and_type } => {
                    self.expect(name_and_type, "NameAndType", is_name_and_type)?
                }
                Constant::Unusable
                | Constant::Utf8(_)
                | Constant::Integer
                | Constant::Float
                | Constant::Long
                | Constant::Double => {}
            }
        }
        Ok(())
    }

    fn expect(
        &self,
        index: u16,
        expected: &'static str,
        accept: impl Fn(&Constant<'a>) -> bool,
    ) -> Result<(), DecodeError> {
        let entry = self.get(index)?;
        if accept(entry) {
            Ok(())
        } else {
            Err(DecodeError::UnexpectedConstant { index, expected })
        }
    }

    /// Number of slots, including the unusable slot 0.
    pub(crate) fn size(&self) -> u16 {
        self.entries.len() as u16
    }

    pub(crate) fn get(&self, index: u16) -> Result<&Constant<'a>, DecodeError> {
        match self.entries.get(index as usize) {
            Some(Constant::Unusable) | None => Err(DecodeError::IndexOutOfRange {
                index,
                pool_size: self.size(),
            }),
            Some(entry) => Ok(entry),
        }
    }

    /// Decoded text of a Utf8 entry.
    pub(crate) fn utf8(&self, index: u16) -> Result<&str, DecodeError> {
        match self.get(index)? {
            Constant::Utf8(raw) => Ok(self.text[index as usize].get_or_init(|| decode_text(raw))),
            _ => Err(DecodeError::UnexpectedConstant {
                index,
                expected: "Utf8",
            }),
        }
    }

    /// Internal (slash-separated) name of a Class entry.
    pub(crate) fn class_name(&self, index: u16) -> Result<&str, DecodeError> {
        match *self.get(index)? {
            Constant::Class { name } => self.utf8(name),
            _ => Err(DecodeError::UnexpectedConstant {
                index,
                expected: "Class",
            }),
        }
    }

    /// Descriptor of a NameAndType entry.
    pub(crate) fn name_and_type_descriptor(&self, index: u16) -> Result<&str, DecodeError> {
        match *self.get(index)? {
            Constant::NameAndType { descriptor, .. } => self.utf8(descriptor),
            _ => Err(DecodeError::UnexpectedConstant {
                index,
                expected: "NameAndType",
            }),
        }
    }

    pub(crate) fn entries(&self) -> impl Iterator<Item = &Constant<'a>> {
        self.entries.iter()
    }
}

fn is_utf8(c: &Constant<'_>) -> bool {
    matches!(c, Constant::Utf8(_))
}

fn is_name_and_type(c: &Constant<'_>) -> bool {
    matches!(c, Constant::NameAndType { .. })
}

/// Decode class-file "modified UTF-8": NUL is written as `C0 80` and
/// supplementary characters as surrogate pairs of three-byte sequences.
/// Anything undecodable becomes U+FFFD.
fn decode_text(raw: &[u8]) -> String {
    if let Ok(s) = std::str::from_utf8(raw) {
        return s.to_string();
    }

    let mut units: Vec<u16> = Vec::with_capacity(raw.len());
    let mut i = 0;
    while i < raw.len() {
        let b = raw[i];
        let (unit, width) = if b & 0x80 == 0 {
            (u16::from(b), 1)
        } else if b & 0xE0 == 0xC0 && i + 1 < raw.len() {
            ((u16::from(b & 0x1F) << 6) | u16::from(raw[i + 1] & 0x3F), 2)
        } else if b & 0xF0 == 0xE0 && i + 2 < raw.len() {
            (
                (u16::from(b & 0x0F) << 12)
                    | (u16::from(raw[i + 1] & 0x3F) << 6)
                    | u16::from(raw[i + 2] & 0x3F),
                3,
            )
        } else {
            (0xFFFD, 1)
        };
        units.push(unit);
        i += width;
    }
    String::from_utf16_lossy(&units)
}
