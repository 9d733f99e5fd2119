//! Output rendering methods.

use ffiglue_core::utils::{is_js_identifier, property_key, variant_type_name};
use ffiglue_core::{
    ByteOrder, DeclKind, Encoding, Layout, Primitive, StructDecl, TypeDecl, UnionDecl,
};

use super::Emitter;
use super::emitter::Wrapper;
use crate::Result;
use crate::locator::FileName;
use crate::resolve::Site;
use crate::unmarshal::RAW_RESULT;

impl Emitter<'_> {
    fn export(&self) -> &'static str {
        if self.config.export { "export " } else { "" }
    }

    pub(super) fn emit_banner(&mut self) {
        self.output.push_str(&self.config.banner);
        self.output.push_str("\n\n");
    }

    pub(super) fn emit_import(&mut self) {
        self.output.push_str(&format!(
            "import {{ CachePolicy, prepare }} from {};\n\n",
            js_string(&self.config.loader_url)
        ));
    }

    pub(super) fn emit_helpers(&mut self) {
        for src in self.helpers.sources() {
            self.output.push_str(src);
            self.output.push('\n');
        }
    }

    /// Library URL per platform and the cache policy.
    pub(super) fn emit_library(&mut self) {
        let options = self.module.options();
        let lib = self
            .config
            .locator
            .locate(self.module.name(), &options.location, options.profile);
        let out = &mut self.output;

        out.push_str(&format!(
            "const url = new URL({}, import.meta.url);\n",
            js_string(&lib.base)
        ));
        out.push_str("let uri = url.toString();\n");
        out.push_str("if (!uri.endsWith(\"/\")) uri += \"/\";\n\n");

        out.push_str("const opts = {\n");
        out.push_str(&format!("  name: {},\n", js_string(self.module.name())));
        out.push_str("  urls: {\n");
        for platform in &lib.files {
            match &platform.file {
                FileName::Single(file) => {
                    out.push_str(&format!(
                        "    {}: uri + {},\n",
                        platform.os,
                        js_string(file)
                    ));
                }
                FileName::PerArch(files) => {
                    out.push_str(&format!("    {}: {{\n", platform.os));
                    for (arch, file) in files {
                        out.push_str(&format!("      {}: uri + {},\n", arch, js_string(file)));
                    }
                    out.push_str("    },\n");
                }
            }
        }
        out.push_str("  },\n");
        out.push_str(&format!("  policy: {},\n", lib.policy.ts()));
        out.push_str("};\n\n");
    }

    /// Native symbol table and the library handle.
    pub(super) fn emit_symbols(&mut self, wrappers: &[Wrapper<'_>]) {
        let export = self.export();
        let lazy = self.config.lazy_init;
        let out = &mut self.output;

        if wrappers.is_empty() {
            out.push_str("const symbols = {} as const;\n\n");
        } else {
            out.push_str("const symbols = {\n");
            for w in wrappers {
                let params = w
                    .params
                    .iter()
                    .flat_map(|p| p.native.iter())
                    .map(|token| js_string(token))
                    .collect::<Vec<_>>()
                    .join(", ");
                out.push_str(&format!(
                    "  {}: {{ parameters: [{}], result: {}, nonblocking: {} }},\n",
                    property_key(&w.sig.name),
                    params,
                    js_string(w.result.native),
                    w.sig.non_blocking
                ));
            }
            out.push_str("} as const;\n\n");
        }

        if lazy {
            out.push_str("let _lib: Deno.DynamicLibrary<typeof symbols>;\n\n");
            out.push_str("/** Load the native library. Call before any other export. */\n");
            out.push_str(&format!(
                "{export}async function load(): Promise<void> {{\n"
            ));
            out.push_str("  _lib = await prepare(opts, symbols);\n");
            out.push_str("}\n\n");
        } else {
            out.push_str("const _lib = await prepare(opts, symbols);\n\n");
        }
    }

    /// Every declaration in name order, with fixed-layout codecs.
    pub(super) fn render_declarations(&self) -> Result<String> {
        let order = self.module.options().byte_order;
        let mut out = String::new();

        for decl in self.module.types().iter() {
            match (&decl.host_text, &decl.kind) {
                (Some(text), _) => {
                    push_docs(&mut out, decl.docs.as_deref());
                    out.push_str(text.trim_end());
                    out.push_str("\n\n");
                }
                (None, DeclKind::Struct(s)) => self.render_struct(&mut out, decl, s)?,
                (None, DeclKind::Union(u)) => self.render_union(&mut out, decl, u)?,
            }

            let DeclKind::Struct(s) = &decl.kind else {
                continue;
            };
            if s.encoding == Encoding::Fixed {
                let layout = Layout::of(&decl.name, &s.fields)?;
                render_pack(&mut out, &decl.name, &layout, order);
                render_unpack(&mut out, &decl.name, &layout, order);
            }
        }
        Ok(out)
    }

    fn render_struct(&self, out: &mut String, decl: &TypeDecl, s: &StructDecl) -> Result<()> {
        push_docs(out, decl.docs.as_deref());
        if s.fields.is_empty() {
            out.push_str(&format!("{}interface {} {{}}\n\n", self.export(), decl.name));
            return Ok(());
        }

        out.push_str(&format!("{}interface {} {{\n", self.export(), decl.name));
        for (field, ty) in &s.fields {
            let site = Site::Field {
                type_name: &decl.name,
                field: field.as_str(),
            };
            let ts = self.resolver.field_type(ty, s.encoding, site)?;
            out.push_str(&format!("  {}: {};\n", property_key(field), ts));
        }
        out.push_str("}\n\n");
        Ok(())
    }

    /// One interface per variant, then the union of them.
    fn render_union(&self, out: &mut String, decl: &TypeDecl, u: &UnionDecl) -> Result<()> {
        let mut variant_types = Vec::with_capacity(u.variants.len());

        for variant in &u.variants {
            let variant_type = variant_type_name(&decl.name, &variant.name);

            push_docs(out, variant.docs.as_deref());
            out.push_str(&format!("{}interface {} {{\n", self.export(), variant_type));
            out.push_str(&format!(
                "  {}: {};\n",
                property_key(&u.tag),
                js_string(&variant.name)
            ));

            if let Some(fields) = &variant.payload {
                let mut members = Vec::with_capacity(fields.len());
                for (field, ty) in fields {
                    let path = format!("{}.{}", variant.name, field);
                    let site = Site::Field {
                        type_name: &decl.name,
                        field: &path,
                    };
                    let ts = self.resolver.field_type(ty, Encoding::Structured, site)?;
                    members.push(format!("{}: {}", property_key(field), ts));
                }
                let payload = if members.is_empty() {
                    "{}".to_string()
                } else {
                    format!("{{ {} }}", members.join("; "))
                };
                out.push_str(&format!("  {}: {};\n", property_key(&u.content), payload));
            }
            out.push_str("}\n\n");

            variant_types.push(variant_type);
        }

        push_docs(out, decl.docs.as_deref());
        out.push_str(&format!(
            "{}type {} = {};\n\n",
            self.export(),
            decl.name,
            variant_types.join(" | ")
        ));
        Ok(())
    }

    pub(super) fn emit_wrapper(&mut self, w: &Wrapper<'_>) {
        let export = self.export();
        let out = &mut self.output;

        push_docs(out, w.sig.docs.as_deref());
        let params = w
            .params
            .iter()
            .map(|p| format!("{}: {}", p.ident, p.host))
            .collect::<Vec<_>>()
            .join(", ");
        out.push_str(&format!(
            "{}function {}({}): {} {{\n",
            export,
            w.sig.name,
            params,
            w.result.annotation()
        ));

        for p in &w.params {
            if let Some(setup) = p.setup() {
                out.push_str(&format!("  {setup}\n"));
            }
        }

        let args = w
            .params
            .iter()
            .flat_map(|p| p.call_args())
            .collect::<Vec<_>>()
            .join(", ");
        out.push_str(&format!(
            "  const {} = _lib.symbols{}({});\n",
            RAW_RESULT,
            member_access(&w.sig.name),
            args
        ));
        out.push_str(&format!("  {}\n", w.result.return_stmt()));
        out.push_str("}\n\n");
    }
}

fn render_pack(out: &mut String, name: &str, layout: &Layout, order: ByteOrder) {
    out.push_str(&format!("function __pack_{name}(v: {name}): Uint8Array {{\n"));
    out.push_str(&format!("  const buf = new Uint8Array({});\n", layout.size));
    if !layout.fields.is_empty() {
        out.push_str("  const view = new DataView(buf.buffer);\n");
    }
    for slot in &layout.fields {
        out.push_str(&format!(
            "  view.set{}({}, v{}{});\n",
            view_method(slot.primitive),
            slot.offset,
            member_access(&slot.name),
            endian_arg(slot.primitive, order)
        ));
    }
    out.push_str("  return buf;\n}\n\n");
}

fn render_unpack(out: &mut String, name: &str, layout: &Layout, order: ByteOrder) {
    out.push_str(&format!("function __unpack_{name}(buf: Uint8Array): {name} {{\n"));
    if layout.fields.is_empty() {
        out.push_str("  return {};\n}\n\n");
        return;
    }
    out.push_str("  const view = new DataView(buf.buffer, buf.byteOffset, buf.byteLength);\n");
    out.push_str("  return {\n");
    for slot in &layout.fields {
        out.push_str(&format!(
            "    {}: view.get{}({}{}),\n",
            property_key(&slot.name),
            view_method(slot.primitive),
            slot.offset,
            endian_arg(slot.primitive, order)
        ));
    }
    out.push_str("  };\n}\n\n");
}

/// `DataView` accessor suffix for a fixed-width scalar.
fn view_method(p: Primitive) -> &'static str {
    match p {
        Primitive::I8 => "Int8",
        Primitive::U8 => "Uint8",
        Primitive::I16 => "Int16",
        Primitive::U16 => "Uint16",
        Primitive::I32 => "Int32",
        Primitive::U32 => "Uint32",
        Primitive::I64 | Primitive::Isize => "BigInt64",
        Primitive::U64 | Primitive::Usize => "BigUint64",
        Primitive::F32 => "Float32",
        Primitive::F64 => "Float64",
        // Rejected by `Layout::of`.
        Primitive::Void
        | Primitive::Str
        | Primitive::Buffer
        | Primitive::BufferMut
        | Primitive::Ptr => "Uint8",
    }
}

/// Trailing little-endian flag; single bytes have no byte order.
fn endian_arg(p: Primitive, order: ByteOrder) -> &'static str {
    match (p.scalar_width(), order) {
        (Some(1) | None, _) => "",
        (_, ByteOrder::Little) => ", true",
        (_, ByteOrder::Big) => ", false",
    }
}

fn member_access(name: &str) -> String {
    if is_js_identifier(name) {
        format!(".{name}")
    } else {
        format!("[{}]", js_string(name))
    }
}

fn js_string(s: &str) -> String {
    format!("{s:?}")
}

fn push_docs(out: &mut String, docs: Option<&str>) {
    let Some(docs) = docs.map(str::trim).filter(|d| !d.is_empty()) else {
        return;
    };
    out.push_str("/**\n");
    for line in docs.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            out.push_str(" *\n");
        } else {
            out.push_str(&format!(" * {line}\n"));
        }
    }
    out.push_str(" */\n");
}
