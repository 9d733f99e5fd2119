//! Core emitter struct and main emit logic.

use ffiglue_core::utils::variant_type_name;
use ffiglue_core::{BindingModule, DeclKind, Signature};
use tracing::debug;

use super::{Config, Helpers};
use crate::{Error, Result};
use crate::marshal::{MarshalledParam, ParameterMarshaller};
use crate::resolve::TypeResolver;
use crate::unmarshal::{ResultUnmarshaller, UnmarshalledResult};

/// Module-scope names the preamble declares or the wrappers call.
const PREAMBLE_BINDINGS: &[&str] = &[
    "CachePolicy",
    "DataView",
    "Deno",
    "JSON",
    "Promise",
    "TextDecoder",
    "TextEncoder",
    "URL",
    "Uint8Array",
    "_lib",
    "decode",
    "decoder",
    "encode",
    "encoder",
    "load",
    "opts",
    "prepare",
    "readPointer",
    "symbols",
    "uri",
    "url",
];

/// Prefixes of the per-type fixed-layout codecs.
const CODEC_PREFIXES: &[&str] = &["__pack_", "__unpack_"];

/// Glue emitter for one binding module.
pub struct Emitter<'a> {
    pub(super) module: &'a BindingModule,
    pub(super) config: &'a Config,
    pub(super) resolver: TypeResolver<'a>,
    /// Helpers referenced by wrappers
    pub(super) helpers: Helpers,
    /// Output buffer
    pub(super) output: String,
}

/// A signature with every parameter and its result already resolved.
pub(super) struct Wrapper<'a> {
    pub(super) sig: &'a Signature,
    pub(super) params: Vec<MarshalledParam<'a>>,
    pub(super) result: UnmarshalledResult<'a>,
}

impl<'a> Emitter<'a> {
    pub fn new(module: &'a BindingModule, config: &'a Config) -> Self {
        Self {
            module,
            config,
            resolver: TypeResolver::new(module.types()),
            helpers: Helpers::default(),
            output: String::new(),
        }
    }

    /// Emit the glue module.
    ///
    /// Every reference is resolved before any text is produced.
    pub fn emit(mut self) -> Result<String> {
        self.check_bindings()?;
        self.resolver.check_declarations()?;
        let wrappers = self.plan_wrappers()?;
        let declarations = self.render_declarations()?;

        debug!(
            module = self.module.name(),
            types = self.module.types().len(),
            functions = wrappers.len(),
            "emitting glue"
        );

        self.emit_banner();
        self.emit_import();
        self.emit_helpers();
        self.emit_library();
        self.emit_symbols(&wrappers);
        self.output.push_str(&declarations);
        for wrapper in &wrappers {
            self.emit_wrapper(wrapper);
        }

        // Ensure exactly one trailing newline
        self.output.truncate(self.output.trim_end().len());
        self.output.push('\n');
        Ok(self.output)
    }

    /// Every emitted function, interface and alias name against the preamble.
    fn check_bindings(&self) -> Result<()> {
        let functions = self.module.signatures().iter().map(|s| s.name.clone());
        let types = self.module.types().iter().flat_map(|decl| {
            let variants: Vec<String> = match &decl.kind {
                DeclKind::Union(u) => u
                    .variants
                    .iter()
                    .map(|v| variant_type_name(&decl.name, &v.name))
                    .collect(),
                DeclKind::Struct(_) => Vec::new(),
            };
            std::iter::once(decl.name.clone()).chain(variants)
        });

        for name in functions.chain(types) {
            let shadows = PREAMBLE_BINDINGS.contains(&name.as_str())
                || CODEC_PREFIXES.iter().any(|p| name.starts_with(p));
            if shadows {
                return Err(Error::ShadowsBinding(name));
            }
        }
        Ok(())
    }

    fn plan_wrappers(&mut self) -> Result<Vec<Wrapper<'a>>> {
        let module = self.module;
        let marshaller = ParameterMarshaller::new(&self.resolver);
        let unmarshaller = ResultUnmarshaller::new(&self.resolver);

        let mut wrappers = Vec::with_capacity(module.signatures().len());
        for sig in module.signatures() {
            let params = marshaller.marshal(sig)?;
            let result = unmarshaller.unmarshal(sig)?;

            for p in &params {
                self.helpers.merge(p.helpers());
            }
            self.helpers.merge(result.helpers());

            wrappers.push(Wrapper {
                sig,
                params,
                result,
            });
        }
        Ok(wrappers)
    }
}
