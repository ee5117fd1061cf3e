use super::reader::ByteReader;
use super::{Collector, DecodeError, MAX_NESTING};

/// Walk a count-prefixed attribute table.
///
/// Each attribute body is read through a reader bounded to its declared
/// length, so a recognized attribute that overruns it is reported as
/// truncated. Anything unrecognized is skipped whole. `depth` counts the
/// `Code` attributes enclosing this table.
pub(super) fn read_attributes(
    r: &mut ByteReader<'_>,
    refs: &mut Collector<'_, '_>,
    depth: usize,
) -> Result<(), DecodeError> {
    let count = r.u16()?;
    for _ in 0..count {
        let name_index = r.u16()?;
        let length = r.u32()? as usize;
        let name = refs.pool().utf8(name_index)?;
        let mut body = r.sub_reader(length)?;

        match name {
            "SourceFile" => {
                let index = body.u16()?;
                refs.set_source_file(index)?;
            }
            "Signature" => {
                let index = body.u16()?;
                refs.descriptor(index)?;
            }
            "Exceptions" => {
                let n = body.u16()?;
                for _ in 0..n {
                    let class = body.u16()?;
                    refs.class(class)?;
                }
            }
            "InnerClasses" => {
                let n = body.u16()?;
                for _ in 0..n {
                    let inner = body.u16()?;
                    let outer = body.u16()?;
                    let _simple_name = body.u16()?;
                    let _flags = body.u16()?;
                    refs.optional_class(inner)?;
                    refs.optional_class(outer)?;
                }
            }
            "EnclosingMethod" => {
                let class = body.u16()?;
                let method = body.u16()?;
                refs.class(class)?;
                if method != 0 {
                    let descriptor = refs.pool().name_and_type_descriptor(method)?;
                    refs.descriptor_text(descriptor);
                }
            }
            "RuntimeVisibleAnnotations" | "RuntimeInvisibleAnnotations" => {
                annotations(&mut body, refs, 0)?;
            }
            "RuntimeVisibleParameterAnnotations" | "RuntimeInvisibleParameterAnnotations" => {
                let parameters = body.u8()?;
                for _ in 0..parameters {
                    annotations(&mut body, refs, 0)?;
                }
            }
            "AnnotationDefault" => element_value(&mut body, refs, 0)?,
            "Code" => code(&mut body, refs, depth)?,
            "LocalVariableTable" | "LocalVariableTypeTable" => {
                let n = body.u16()?;
                for _ in 0..n {
                    let _start_pc = body.u16()?;
                    let _length = body.u16()?;
                    let _name = body.u16()?;
                    let descriptor = body.u16()?;
                    let _slot = body.u16()?;
                    refs.descriptor(descriptor)?;
                }
            }
            _ => {}
        }
    }
    Ok(())
}

/// One level deeper, or `NestingTooDeep` once `depth` reaches the limit.
fn deeper(depth: usize, offset: usize) -> Result<usize, DecodeError> {
    if depth >= MAX_NESTING {
        return Err(DecodeError::NestingTooDeep { offset });
    }
    Ok(depth + 1)
}

fn code(
    body: &mut ByteReader<'_>,
    refs: &mut Collector<'_, '_>,
    depth: usize,
) -> Result<(), DecodeError> {
    let depth = deeper(depth, body.offset())?;
    let _max_stack = body.u16()?;
    let _max_locals = body.u16()?;
    let code_length = body.u32()? as usize;
    body.skip(code_length)?;

    let handlers = body.u16()?;
    for _ in 0..handlers {
        let _start_pc = body.u16()?;
        let _end_pc = body.u16()?;
        let _handler_pc = body.u16()?;
        // 0 is a catch-all (finally) handler
        let catch_type = body.u16()?;
        refs.optional_class(catch_type)?;
    }

    read_attributes(body, refs, depth)
}

fn annotations(
    body: &mut ByteReader<'_>,
    refs: &mut Collector<'_, '_>,
    depth: usize,
) -> Result<(), DecodeError> {
    let n = body.u16()?;
    for _ in 0..n {
        annotation(body, refs, depth)?;
    }
    Ok(())
}

fn annotation(
    body: &mut ByteReader<'_>,
    refs: &mut Collector<'_, '_>,
    depth: usize,
) -> Result<(), DecodeError> {
    let type_index = body.u16()?;
    refs.descriptor(type_index)?;
    let pairs = body.u16()?;
    for _ in 0..pairs {
        let _element_name = body.u16()?;
        element_value(body, refs, depth)?;
    }
    Ok(())
}

/// `depth` counts the arrays and annotations enclosing this value.
fn element_value(
    body: &mut ByteReader<'_>,
    refs: &mut Collector<'_, '_>,
    depth: usize,
) -> Result<(), DecodeError> {
    let offset = body.offset();
    let depth = deeper(depth, offset)?;
    let tag = body.u8()?;
    match tag {
        b'B' | b'C' | b'D' | b'F' | b'I' | b'J' | b'S' | b'Z' | b's' => {
            let _const_value = body.u16()?;
        }
        b'e' => {
            let type_name = body.u16()?;
            let _const_name = body.u16()?;
            refs.descriptor(type_name)?;
        }
        b'c' => {
            let class_info = body.u16()?;
            refs.descriptor(class_info)?;
        }
        b'@' => annotation(body, refs, depth)?,
        b'[' => {
            let n = body.u16()?;
            for _ in 0..n {
                element_value(body, refs, depth)?;
            }
        }
        _ => return Err(DecodeError::BadElementValue { tag, offset }),
    }
    Ok(())
}
