//! C-like layout of fixed-layout structs.
//!
//! Each field sits at the next offset aligned to its own width. The total
//! size is rounded up to the widest field so arrays of the struct stay aligned.

use crate::decl::Fields;
use crate::types::Primitive;
use crate::{Error, Result};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldSlot {
    pub name: String,
    pub primitive: Primitive,
    pub offset: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    pub fields: Vec<FieldSlot>,
    pub size: usize,
    pub align: usize,
}

impl Layout {
    /// Compute the layout of `type_name`, rejecting any non-scalar field.
    pub fn of(type_name: &str, fields: &Fields) -> Result<Self> {
        let mut slots = Vec::with_capacity(fields.len());
        let mut offset = 0;
        let mut align = 1;

        for (field, ty) in fields {
            let Some((primitive, width)) = ty
                .as_primitive()
                .and_then(|p| p.scalar_width().map(|w| (p, w)))
            else {
                return Err(Error::FixedLayoutField {
                    type_name: type_name.to_string(),
                    field: field.clone(),
                });
            };

            offset = align_up(offset, width);
            slots.push(FieldSlot {
                name: field.clone(),
                primitive,
                offset,
            });
            offset += width;
            align = align.max(width);
        }

        Ok(Self {
            fields: slots,
            size: align_up(offset, align),
            align,
        })
    }
}

fn align_up(offset: usize, align: usize) -> usize {
    offset.div_ceil(align) * align
}
