//! Result unmarshalling: native return value to host value.

use ffiglue_core::Signature;

use crate::Result;
use crate::emit::Helpers;
use crate::resolve::{Class, Site, TypeResolver};

/// Identifier the raw native return value is bound to.
pub const RAW_RESULT: &str = "rawResult";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResultDecoding<'m> {
    /// Scalar returned as-is.
    Direct,
    /// Length-prefixed bytes.
    Bytes,
    /// Length-prefixed UTF-8 text.
    Text,
    /// Length-prefixed structured text of a declared type.
    Structured(&'m str),
    /// Length-prefixed fixed-layout bytes of a declared type.
    Fixed(&'m str),
}

impl ResultDecoding<'_> {
    /// Expression turning the native value `raw` into the host value.
    pub fn decode_expr(&self, raw: &str) -> String {
        match self {
            ResultDecoding::Direct => raw.to_string(),
            ResultDecoding::Bytes => format!("readPointer({raw})"),
            ResultDecoding::Text => format!("decode(readPointer({raw}))"),
            ResultDecoding::Structured(name) => {
                format!("JSON.parse(decode(readPointer({raw}))) as {name}")
            }
            ResultDecoding::Fixed(name) => format!("__unpack_{name}(readPointer({raw}))"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnmarshalledResult<'m> {
    /// Host type of the decoded value, before any `Promise` wrapping.
    pub host: String,
    pub decoding: ResultDecoding<'m>,
    pub native: &'static str,
    pub non_blocking: bool,
}

impl UnmarshalledResult<'_> {
    /// Wrapper return annotation.
    pub fn annotation(&self) -> String {
        if self.non_blocking {
            format!("Promise<{}>", self.host)
        } else {
            self.host.clone()
        }
    }

    /// The wrapper's return statement.
    ///
    /// Non-blocking calls yield a promise; decoding runs in its continuation.
    pub fn return_stmt(&self) -> String {
        match (self.decoding, self.non_blocking) {
            (ResultDecoding::Direct, _) => format!("return {RAW_RESULT};"),
            (decoding, false) => format!("return {};", decoding.decode_expr(RAW_RESULT)),
            (decoding, true) => format!(
                "return {RAW_RESULT}.then((ptr) => {});",
                decoding.decode_expr("ptr")
            ),
        }
    }

    pub fn helpers(&self) -> Helpers {
        let framed = self.decoding != ResultDecoding::Direct;
        Helpers {
            read_pointer: framed,
            decode: matches!(
                self.decoding,
                ResultDecoding::Text | ResultDecoding::Structured(_)
            ),
            ..Helpers::default()
        }
    }
}

pub struct ResultUnmarshaller<'r, 'm> {
    resolver: &'r TypeResolver<'m>,
}

impl<'r, 'm> ResultUnmarshaller<'r, 'm> {
    pub fn new(resolver: &'r TypeResolver<'m>) -> Self {
        Self { resolver }
    }

    pub fn unmarshal(&self, sig: &Signature) -> Result<UnmarshalledResult<'m>> {
        let resolved = self.resolver.resolve(
            &sig.result,
            Site::Result {
                function: &sig.name,
            },
        )?;
        let decoding = match resolved.class {
            Class::Scalar(_) => ResultDecoding::Direct,
            Class::Text => ResultDecoding::Text,
            Class::Bytes => ResultDecoding::Bytes,
            Class::Declared(decl) if decl.is_fixed_layout() => ResultDecoding::Fixed(&decl.name),
            Class::Declared(decl) => ResultDecoding::Structured(&decl.name),
        };
        Ok(UnmarshalledResult {
            host: resolved.host,
            decoding,
            native: resolved.native.result_token(),
            non_blocking: sig.non_blocking,
        })
    }
}
