//! Parameter marshalling: host argument to native call arguments.

use ffiglue_core::{Primitive, Signature};

use crate::emit::Helpers;
use crate::resolve::{Class, Site, TypeResolver};
use crate::{Error, Result};

/// How one parameter is turned into native arguments.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParamEncoding<'m> {
    /// Scalar passed by value.
    Direct,
    /// UTF-8 encoded text.
    Text,
    /// Bytes passed through as-is.
    Bytes,
    /// Declared type serialized as structured text.
    Structured,
    /// Declared type packed with its fixed layout.
    Fixed(&'m str),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarshalledParam<'m> {
    pub ident: String,
    /// Host type annotation of the wrapper parameter.
    pub host: String,
    pub encoding: ParamEncoding<'m>,
    /// Native symbol table tokens, one per native argument.
    pub native: Vec<&'static str>,
}

impl MarshalledParam<'_> {
    fn buf_ident(&self) -> String {
        format!("{}Buf", self.ident)
    }

    /// Statement preparing the buffer, if the parameter needs one.
    pub fn setup(&self) -> Option<String> {
        let expr = match self.encoding {
            ParamEncoding::Direct | ParamEncoding::Bytes => return None,
            ParamEncoding::Text => format!("encode({})", self.ident),
            ParamEncoding::Structured => format!("encode(JSON.stringify({}))", self.ident),
            ParamEncoding::Fixed(name) => format!("__pack_{name}({})", self.ident),
        };
        Some(format!("const {} = {};", self.buf_ident(), expr))
    }

    /// Native call arguments; buffers expand to the buffer and its length.
    pub fn call_args(&self) -> Vec<String> {
        let buf = match self.encoding {
            ParamEncoding::Direct => return vec![self.ident.clone()],
            ParamEncoding::Bytes => self.ident.clone(),
            ParamEncoding::Text | ParamEncoding::Structured | ParamEncoding::Fixed(_) => {
                self.buf_ident()
            }
        };
        vec![buf.clone(), format!("{buf}.byteLength")]
    }

    pub fn helpers(&self) -> Helpers {
        Helpers {
            encode: matches!(
                self.encoding,
                ParamEncoding::Text | ParamEncoding::Structured
            ),
            ..Helpers::default()
        }
    }
}

pub struct ParameterMarshaller<'r, 'm> {
    resolver: &'r TypeResolver<'m>,
}

impl<'r, 'm> ParameterMarshaller<'r, 'm> {
    pub fn new(resolver: &'r TypeResolver<'m>) -> Self {
        Self { resolver }
    }

    /// Marshal every parameter of `sig`, in declared order.
    pub fn marshal(&self, sig: &Signature) -> Result<Vec<MarshalledParam<'m>>> {
        sig.params
            .iter()
            .enumerate()
            .map(|(index, ty)| {
                let site = Site::Param {
                    function: &sig.name,
                    index,
                };
                let resolved = self.resolver.resolve(ty, site)?;
                let encoding = match resolved.class {
                    Class::Scalar(Primitive::Void) => {
                        return Err(Error::VoidParameter {
                            site: site.to_string(),
                        });
                    }
                    Class::Scalar(_) => ParamEncoding::Direct,
                    Class::Text => ParamEncoding::Text,
                    Class::Bytes => ParamEncoding::Bytes,
                    Class::Declared(decl) if decl.is_fixed_layout() => {
                        ParamEncoding::Fixed(&decl.name)
                    }
                    Class::Declared(_) => ParamEncoding::Structured,
                };
                Ok(MarshalledParam {
                    ident: format!("a{index}"),
                    host: resolved.host,
                    encoding,
                    native: resolved.native.param_tokens(),
                })
            })
            .collect()
    }
}
