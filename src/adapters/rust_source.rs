use crate::domain::model::{Declaration, MarkerArg, MarkerInstance, SourcePosition};
use crate::domain::ports::SymbolSource;
use crate::utils::error::{ExpiryError, Result};
use quote::ToTokens;
use std::path::{Path, PathBuf};
use syn::ext::IdentExt;
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::visit::{self, Visit};
use syn::{Attribute, Expr, Fields, Ident, Lit, Meta, Token, Type};
use walkdir::WalkDir;

/// Rust files under a set of roots, parsed with `syn`.
#[derive(Debug, Clone)]
pub struct RustSourceSet {
    roots: Vec<PathBuf>,
    exclude: Vec<String>,
}

impl RustSourceSet {
    pub fn new<P: Into<PathBuf>>(roots: impl IntoIterator<Item = P>) -> Self {
        Self {
            roots: roots.into_iter().map(Into::into).collect(),
            exclude: vec!["target".to_string()],
        }
    }

    /// Directory or file names to skip anywhere below a root.
    pub fn with_exclude(mut self, exclude: Vec<String>) -> Self {
        self.exclude = exclude;
        self
    }

    fn is_excluded(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| self.exclude.iter().any(|e| e == name))
    }

    /// All `.rs` files, roots in the given order and each root sorted by file name.
    pub fn source_files(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for root in &self.roots {
            if root.is_file() {
                if is_rust_file(root) {
                    files.push(root.clone());
                } else {
                    tracing::debug!("Skipping non-Rust root {}", root.display());
                }
                continue;
            }

            let walker = WalkDir::new(root)
                .sort_by_file_name()
                .into_iter()
                .filter_entry(|entry| entry.depth() == 0 || !self.is_excluded(entry.path()));

            for entry in walker {
                let entry = entry?;
                if entry.file_type().is_file() && is_rust_file(entry.path()) {
                    files.push(entry.into_path());
                }
            }
        }

        Ok(files)
    }
}

fn is_rust_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "rs")
}

impl SymbolSource for RustSourceSet {
    fn find_declarations_with_marker(&self, kind: &str) -> Result<Vec<Declaration>> {
        let files = self.source_files()?;
        tracing::debug!("Scanning {} Rust files for #[{}]", files.len(), kind);

        let mut found = Vec::new();
        for path in files {
            let display = path.display().to_string();
            let source = std::fs::read_to_string(&path).map_err(|source| ExpiryError::ReadError {
                path: display.clone(),
                source,
            })?;
            found.extend(declarations_in_source(&display, &source, kind)?);
        }

        Ok(found)
    }
}

/// Marked declarations of one file, in source order.
pub fn declarations_in_source(path: &str, source: &str, kind: &str) -> Result<Vec<Declaration>> {
    let file = syn::parse_file(source).map_err(|e| ExpiryError::SourceParse {
        path: path.to_string(),
        message: format!("{} at line {}", e, e.span().start().line),
    })?;

    let mut collector = DeclarationCollector {
        path,
        kind,
        scope: Vec::new(),
        found: Vec::new(),
    };
    collector.visit_file(&file);
    Ok(collector.found)
}

struct DeclarationCollector<'a> {
    path: &'a str,
    kind: &'a str,
    scope: Vec<String>,
    found: Vec<Declaration>,
}

impl DeclarationCollector<'_> {
    fn record(&mut self, attrs: &[Attribute], name: &str, line: usize) {
        let markers: Vec<MarkerInstance> = attrs.iter().flat_map(markers_from_attr).collect();
        if !markers.iter().any(|m| m.kind == self.kind) {
            return;
        }

        let display = if self.scope.is_empty() {
            name.to_string()
        } else {
            format!("{}::{}", self.scope.join("::"), name)
        };

        self.found.push(Declaration::new(
            display,
            markers,
            Some(SourcePosition {
                path: self.path.to_string(),
                line,
            }),
        ));
    }

    fn record_ident(&mut self, attrs: &[Attribute], ident: &Ident) {
        self.record(attrs, &ident.unraw().to_string(), ident.span().start().line);
    }

    fn record_fields(&mut self, fields: &Fields) {
        for (index, field) in fields.iter().enumerate() {
            match &field.ident {
                Some(ident) => self.record_ident(&field.attrs, ident),
                None => {
                    let line = field.ty.span().start().line;
                    self.record(&field.attrs, &index.to_string(), line);
                }
            }
        }
    }

    fn scoped(&mut self, name: String, f: impl FnOnce(&mut Self)) {
        self.scope.push(name);
        f(self);
        self.scope.pop();
    }
}

impl<'ast> Visit<'ast> for DeclarationCollector<'_> {
    // `#![expiry(..)]` at the top of a file marks the module the file defines.
    fn visit_file(&mut self, i: &'ast syn::File) {
        if let Some(first) = i.attrs.first() {
            let module = module_name(self.path);
            self.record(&i.attrs, &module, first.span().start().line);
        }
        visit::visit_file(self, i);
    }

    fn visit_item_fn(&mut self, i: &'ast syn::ItemFn) {
        self.record_ident(&i.attrs, &i.sig.ident);
        self.scoped(i.sig.ident.unraw().to_string(), |this| visit::visit_item_fn(this, i));
    }

    fn visit_item_struct(&mut self, i: &'ast syn::ItemStruct) {
        self.record_ident(&i.attrs, &i.ident);
        self.scoped(i.ident.unraw().to_string(), |this| this.record_fields(&i.fields));
    }

    fn visit_item_union(&mut self, i: &'ast syn::ItemUnion) {
        self.record_ident(&i.attrs, &i.ident);
        self.scoped(i.ident.unraw().to_string(), |this| {
            for field in &i.fields.named {
                if let Some(ident) = &field.ident {
                    this.record_ident(&field.attrs, ident);
                }
            }
        });
    }

    fn visit_item_enum(&mut self, i: &'ast syn::ItemEnum) {
        self.record_ident(&i.attrs, &i.ident);
        self.scoped(i.ident.unraw().to_string(), |this| {
            for variant in &i.variants {
                this.record_ident(&variant.attrs, &variant.ident);
                this.scoped(variant.ident.unraw().to_string(), |this| {
                    this.record_fields(&variant.fields)
                });
            }
        });
    }

    fn visit_item_const(&mut self, i: &'ast syn::ItemConst) {
        self.record_ident(&i.attrs, &i.ident);
        visit::visit_item_const(self, i);
    }

    fn visit_item_static(&mut self, i: &'ast syn::ItemStatic) {
        self.record_ident(&i.attrs, &i.ident);
        visit::visit_item_static(self, i);
    }

    fn visit_item_type(&mut self, i: &'ast syn::ItemType) {
        self.record_ident(&i.attrs, &i.ident);
    }

    fn visit_item_mod(&mut self, i: &'ast syn::ItemMod) {
        self.record_ident(&i.attrs, &i.ident);
        if i.content.is_some() {
            self.scoped(i.ident.unraw().to_string(), |this| visit::visit_item_mod(this, i));
        }
    }

    fn visit_item_trait(&mut self, i: &'ast syn::ItemTrait) {
        self.record_ident(&i.attrs, &i.ident);
        self.scoped(i.ident.unraw().to_string(), |this| visit::visit_item_trait(this, i));
    }

    fn visit_item_impl(&mut self, i: &'ast syn::ItemImpl) {
        self.scoped(type_name(&i.self_ty), |this| visit::visit_item_impl(this, i));
    }

    fn visit_impl_item_fn(&mut self, i: &'ast syn::ImplItemFn) {
        self.record_ident(&i.attrs, &i.sig.ident);
        self.scoped(i.sig.ident.unraw().to_string(), |this| visit::visit_impl_item_fn(this, i));
    }

    fn visit_impl_item_const(&mut self, i: &'ast syn::ImplItemConst) {
        self.record_ident(&i.attrs, &i.ident);
    }

    fn visit_impl_item_type(&mut self, i: &'ast syn::ImplItemType) {
        self.record_ident(&i.attrs, &i.ident);
    }

    fn visit_trait_item_fn(&mut self, i: &'ast syn::TraitItemFn) {
        self.record_ident(&i.attrs, &i.sig.ident);
        self.scoped(i.sig.ident.unraw().to_string(), |this| visit::visit_trait_item_fn(this, i));
    }

    fn visit_trait_item_const(&mut self, i: &'ast syn::TraitItemConst) {
        self.record_ident(&i.attrs, &i.ident);
    }

    fn visit_trait_item_type(&mut self, i: &'ast syn::TraitItemType) {
        self.record_ident(&i.attrs, &i.ident);
    }

    fn visit_foreign_item_fn(&mut self, i: &'ast syn::ForeignItemFn) {
        self.record_ident(&i.attrs, &i.sig.ident);
    }

    fn visit_foreign_item_static(&mut self, i: &'ast syn::ForeignItemStatic) {
        self.record_ident(&i.attrs, &i.ident);
    }

    fn visit_foreign_item_type(&mut self, i: &'ast syn::ForeignItemType) {
        self.record_ident(&i.attrs, &i.ident);
    }
}

/// `src/flags.rs` and `src/flags/mod.rs` both define `flags`.
fn module_name(path: &str) -> String {
    let path = Path::new(path);
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
    if stem == "mod" {
        if let Some(parent) = path.parent().and_then(|p| p.file_name()).and_then(|n| n.to_str()) {
            return parent.to_string();
        }
    }
    stem.to_string()
}

fn markers_from_attr(attr: &Attribute) -> Vec<MarkerInstance> {
    markers_from_meta(&attr.meta)
}

/// `cfg_attr(pred, a, b)` yields the markers of `a` and `b`, whatever `pred` says.
fn markers_from_meta(meta: &Meta) -> Vec<MarkerInstance> {
    if let Meta::List(list) = meta {
        if list.path.is_ident("cfg_attr") {
            if let Ok(nested) = list.parse_args_with(Punctuated::<Meta, Token![,]>::parse_terminated) {
                return nested.iter().skip(1).flat_map(markers_from_meta).collect();
            }
        }
    }
    vec![marker_from_meta(meta)]
}

fn marker_from_meta(meta: &Meta) -> MarkerInstance {
    let kind = path_to_string(meta.path());
    let args = match meta {
        Meta::Path(_) => Vec::new(),
        Meta::List(list) => {
            match list.parse_args_with(Punctuated::<Expr, Token![,]>::parse_terminated) {
                Ok(exprs) => exprs.iter().map(arg_from_expr).collect(),
                Err(_) => vec![MarkerArg::Other(list.tokens.to_string())],
            }
        }
        Meta::NameValue(nv) => vec![arg_from_expr(&nv.value)],
    };
    MarkerInstance::new(kind, args)
}

fn arg_from_expr(expr: &Expr) -> MarkerArg {
    match expr {
        Expr::Lit(lit) => match &lit.lit {
            Lit::Str(s) => MarkerArg::Text(s.value()),
            Lit::Int(i) => i
                .base10_parse::<i64>()
                .map(MarkerArg::Integer)
                .unwrap_or_else(|_| MarkerArg::Other(i.to_string())),
            Lit::Bool(b) => MarkerArg::Bool(b.value),
            other => MarkerArg::Other(other.to_token_stream().to_string()),
        },
        Expr::Group(group) => arg_from_expr(&group.expr),
        other => MarkerArg::Other(other.to_token_stream().to_string()),
    }
}

fn path_to_string(path: &syn::Path) -> String {
    let segments: Vec<String> = path.segments.iter().map(|s| s.ident.to_string()).collect();
    let joined = segments.join("::");
    if path.leading_colon.is_some() {
        format!("::{}", joined)
    } else {
        joined
    }
}

fn type_name(ty: &Type) -> String {
    match ty {
        Type::Path(p) => p
            .path
            .segments
            .last()
            .map(|s| s.ident.unraw().to_string())
            .unwrap_or_else(|| p.to_token_stream().to_string()),
        Type::Reference(r) => type_name(&r.elem),
        other => other.to_token_stream().to_string(),
    }
}
