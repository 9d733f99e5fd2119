//! Runtime helpers emitted into the preamble on demand.

const ENCODE: &str = r#"const encoder = new TextEncoder();

function encode(v: string): Uint8Array {
  return encoder.encode(v);
}
"#;

const DECODE: &str = r#"const decoder = new TextDecoder();

function decode(v: Uint8Array): string {
  return decoder.decode(v);
}
"#;

const READ_POINTER: &str = r#"function readPointer(v: Deno.PointerValue): Uint8Array {
  const ptr = new Deno.UnsafePointerView(v as Deno.PointerObject);
  const lengthBe = new Uint8Array(4);
  const view = new DataView(lengthBe.buffer);
  ptr.copyInto(lengthBe, 0);
  const buf = new Uint8Array(view.getUint32(0));
  ptr.copyInto(buf, 4);
  return buf;
}
"#;

/// Which helpers the wrappers reference.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Helpers {
    pub encode: bool,
    pub decode: bool,
    pub read_pointer: bool,
}

impl Helpers {
    pub fn merge(&mut self, other: Helpers) {
        self.encode |= other.encode;
        self.decode |= other.decode;
        self.read_pointer |= other.read_pointer;
    }

    pub fn is_empty(&self) -> bool {
        !(self.encode || self.decode || self.read_pointer)
    }

    /// Source of every referenced helper, in a fixed order.
    pub fn sources(&self) -> impl Iterator<Item = &'static str> {
        [
            (self.encode, ENCODE),
            (self.decode, DECODE),
            (self.read_pointer, READ_POINTER),
        ]
        .into_iter()
        .filter_map(|(used, src)| used.then_some(src))
    }
}
