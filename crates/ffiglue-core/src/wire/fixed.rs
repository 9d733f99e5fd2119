//! Packed encoding for fixed-layout structs.

use serde_json::{Map, Number, Value};

use super::{Result, WireError};
use crate::layout::{FieldSlot, Layout};
use crate::module::ByteOrder;
use crate::types::Primitive;

/// Packs and unpacks one fixed-layout struct in a given byte order.
pub struct FixedCodec {
    layout: Layout,
    order: ByteOrder,
}

macro_rules! put {
    ($buf:expr, $offset:expr, $order:expr, $value:expr) => {{
        let value = $value;
        let bytes = match $order {
            ByteOrder::Little => value.to_le_bytes(),
            ByteOrder::Big => value.to_be_bytes(),
        };
        $buf[$offset..$offset + bytes.len()].copy_from_slice(&bytes);
    }};
}

macro_rules! get {
    ($ty:ty, $bytes:expr, $order:expr) => {{
        let mut raw = [0u8; std::mem::size_of::<$ty>()];
        raw.copy_from_slice($bytes);
        match $order {
            ByteOrder::Little => <$ty>::from_le_bytes(raw),
            ByteOrder::Big => <$ty>::from_be_bytes(raw),
        }
    }};
}

impl FixedCodec {
    pub fn new(layout: Layout, order: ByteOrder) -> Self {
        Self { layout, order }
    }

    /// Pack an object holding every field. Padding bytes are zero.
    pub fn pack(&self, value: &Value) -> Result<Vec<u8>> {
        let object = value.as_object().ok_or_else(|| WireError::Shape {
            path: "$".into(),
            expected: "object".into(),
        })?;

        let mut buf = vec![0u8; self.layout.size];
        for slot in &self.layout.fields {
            let field = object.get(&slot.name).ok_or_else(|| mismatch(slot))?;
            self.put(&mut buf, slot, field)?;
        }
        Ok(buf)
    }

    pub fn unpack(&self, bytes: &[u8]) -> Result<Value> {
        if bytes.len() < self.layout.size {
            return Err(WireError::Truncated {
                expected: self.layout.size,
                actual: bytes.len(),
            });
        }

        let mut object = Map::new();
        for slot in &self.layout.fields {
            object.insert(slot.name.clone(), self.get(bytes, slot)?);
        }
        Ok(Value::Object(object))
    }

    fn put(&self, buf: &mut [u8], slot: &FieldSlot, value: &Value) -> Result<()> {
        let at = slot.offset;
        let order = self.order;
        let signed = || value.as_i64().ok_or_else(|| mismatch(slot));
        let unsigned = || value.as_u64().ok_or_else(|| mismatch(slot));
        let narrow = |_: std::num::TryFromIntError| mismatch(slot);

        match slot.primitive {
            Primitive::I8 => put!(buf, at, order, i8::try_from(signed()?).map_err(narrow)?),
            Primitive::I16 => put!(buf, at, order, i16::try_from(signed()?).map_err(narrow)?),
            Primitive::I32 => put!(buf, at, order, i32::try_from(signed()?).map_err(narrow)?),
            Primitive::I64 | Primitive::Isize => put!(buf, at, order, signed()?),
            Primitive::U8 => put!(buf, at, order, u8::try_from(unsigned()?).map_err(narrow)?),
            Primitive::U16 => put!(buf, at, order, u16::try_from(unsigned()?).map_err(narrow)?),
            Primitive::U32 => put!(buf, at, order, u32::try_from(unsigned()?).map_err(narrow)?),
            Primitive::U64 | Primitive::Usize => put!(buf, at, order, unsigned()?),
            Primitive::F32 => {
                let v = value.as_f64().ok_or_else(|| mismatch(slot))?;
                put!(buf, at, order, v as f32)
            }
            Primitive::F64 => {
                let v = value.as_f64().ok_or_else(|| mismatch(slot))?;
                put!(buf, at, order, v)
            }
            Primitive::Void
            | Primitive::Str
            | Primitive::Buffer
            | Primitive::BufferMut
            | Primitive::Ptr => return Err(mismatch(slot)),
        }
        Ok(())
    }

    fn get(&self, bytes: &[u8], slot: &FieldSlot) -> Result<Value> {
        let width = slot.primitive.scalar_width().unwrap_or(0);
        let raw = &bytes[slot.offset..slot.offset + width];
        let order = self.order;

        let value = match slot.primitive {
            Primitive::I8 => Value::from(get!(i8, raw, order)),
            Primitive::I16 => Value::from(get!(i16, raw, order)),
            Primitive::I32 => Value::from(get!(i32, raw, order)),
            Primitive::I64 | Primitive::Isize => Value::from(get!(i64, raw, order)),
            Primitive::U8 => Value::from(get!(u8, raw, order)),
            Primitive::U16 => Value::from(get!(u16, raw, order)),
            Primitive::U32 => Value::from(get!(u32, raw, order)),
            Primitive::U64 | Primitive::Usize => Value::from(get!(u64, raw, order)),
            Primitive::F32 => float(slot, f64::from(get!(f32, raw, order)))?,
            Primitive::F64 => float(slot, get!(f64, raw, order))?,
            Primitive::Void
            | Primitive::Str
            | Primitive::Buffer
            | Primitive::BufferMut
            | Primitive::Ptr => return Err(mismatch(slot)),
        };
        Ok(value)
    }
}

/// NaN and the infinities have no JSON number form.
fn float(slot: &FieldSlot, v: f64) -> Result<Value> {
    Number::from_f64(v)
        .map(Value::Number)
        .ok_or_else(|| WireError::NonFinite(format!("$.{}", slot.name)))
}

fn mismatch(slot: &FieldSlot) -> WireError {
    WireError::Shape {
        path: format!("$.{}", slot.name),
        expected: format!("`{}`", slot.primitive),
    }
}
