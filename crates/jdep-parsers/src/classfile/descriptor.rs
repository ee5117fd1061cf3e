//! Scanner for field/method descriptors and generic signatures.
//!
//! One recursive-descent pass covers all of them, since descriptors are a
//! subset of the signature grammar. Every class type found is reported by its
//! internal (slash-separated) name; for `Lpkg/Outer<..>.Inner;` that is the
//! outer name, which carries the package. Malformed text ends the scan and
//! keeps whatever was already reported, as do type arguments nested more than
//! [`MAX_NESTING`] deep.

use super::MAX_NESTING;

/// Report every class type named in `text` to `sink`.
pub(crate) fn scan_types<F>(text: &str, sink: &mut F)
where
    F: FnMut(&str),
{
    let mut scanner = Scanner {
        text,
        bytes: text.as_bytes(),
        pos: 0,
        depth: 0,
    };
    let _ = scanner.signature(sink);
}

/// Collect the class types of `text` into a vector, in order of appearance.
#[cfg(test)]
pub(crate) fn class_types(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    scan_types(text, &mut |name: &str| out.push(name.to_string()));
    out
}

struct Scanner<'a> {
    text: &'a str,
    bytes: &'a [u8],
    pos: usize,
    /// Open type-argument lists.
    depth: usize,
}

impl<'a> Scanner<'a> {
    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.pos += 1;
        Some(b)
    }

    fn expect(&mut self, want: u8) -> Option<()> {
        (self.bump()? == want).then_some(())
    }

    /// Advance to the next byte in `stops` and return the text skipped over.
    fn take_until(&mut self, stops: &[u8]) -> Option<&'a str> {
        let start = self.pos;
        while !stops.contains(&self.peek()?) {
            self.pos += 1;
        }
        // Stops are ASCII, so both ends lie on char boundaries.
        self.text.get(start..self.pos)
    }

    fn signature<F: FnMut(&str)>(&mut self, sink: &mut F) -> Option<()> {
        if self.peek() == Some(b'<') {
            self.type_parameters(sink)?;
        }
        if self.peek() == Some(b'(') {
            self.bump();
            while self.peek()? != b')' {
                self.type_signature(sink)?;
            }
            self.bump();
            self.type_signature(sink)?;
            while self.peek() == Some(b'^') {
                self.bump();
                self.type_signature(sink)?;
            }
        } else {
            // Field type, or a class signature's superclass and interfaces.
            while self.peek().is_some() {
                self.type_signature(sink)?;
            }
        }
        Some(())
    }

    fn type_parameters<F: FnMut(&str)>(&mut self, sink: &mut F) -> Option<()> {
        self.expect(b'<')?;
        while self.peek()? != b'>' {
            self.take_until(b":")?;
            self.expect(b':')?;
            // The class bound may be empty; interface bounds each start with ':'.
            if matches!(self.peek()?, b'L' | b'T' | b'[') {
                self.type_signature(sink)?;
            }
            while self.peek()? == b':' {
                self.bump();
                self.type_signature(sink)?;
            }
        }
        self.expect(b'>')
    }

    fn type_signature<F: FnMut(&str)>(&mut self, sink: &mut F) -> Option<()> {
        while self.peek() == Some(b'[') {
            self.bump();
        }
        match self.bump()? {
            b'B' | b'C' | b'D' | b'F' | b'I' | b'J' | b'S' | b'Z' | b'V' => Some(()),
            b'L' => self.class_type(sink),
            b'T' => {
                self.take_until(b";")?;
                self.expect(b';')
            }
            _ => None,
        }
    }

    fn class_type<F: FnMut(&str)>(&mut self, sink: &mut F) -> Option<()> {
        let name = self.take_until(b";<.")?;
        if !name.is_empty() {
            sink(name);
        }
        loop {
            match self.peek()? {
                b';' => {
                    self.bump();
                    return Some(());
                }
                b'<' => self.type_arguments(sink)?,
                b'.' => {
                    self.bump();
                    self.take_until(b";<.")?;
                }
                _ => return None,
            }
        }
    }

    fn type_arguments<F: FnMut(&str)>(&mut self, sink: &mut F) -> Option<()> {
        if self.depth >= MAX_NESTING {
            return None;
        }
        self.depth += 1;
        self.expect(b'<')?;
        while self.peek()? != b'>' {
            match self.peek()? {
                b'*' => {
                    self.bump();
                }
                b'+' | b'-' => {
                    self.bump();
                    self.type_signature(sink)?;
                }
                _ => self.type_signature(sink)?,
            }
        }
        self.depth -= 1;
        self.expect(b'>')
    }
}
