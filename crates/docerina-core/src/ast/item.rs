//! Top-level declarations of a source module

use crate::lexer::Span;

use super::{Annotation, Ident, Spanned, TypeName};

/// Package assumed for modules without a `package` declaration
pub const DEFAULT_PACKAGE: &str = "default";

/// A named, typed parameter or struct field: `string key`
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: Ident,
    pub ty: TypeName,
}

impl Param {
    #[must_use]
    pub fn new(name: Ident, ty: TypeName) -> Self {
        Self { name, ty }
    }
}

/// A return parameter; the name is optional (`(string value)` or `(message)`)
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnParam {
    pub name: Option<Ident>,
    pub ty: TypeName,
}

impl ReturnParam {
    /// The return name, or "" when unnamed
    #[must_use]
    pub fn name_str(&self) -> &str {
        self.name.as_ref().map_or("", |n| n.name.as_str())
    }
}

/// An import declaration: `import foo.bar.xyz as xyz;`
#[derive(Debug, Clone, PartialEq)]
pub struct Import {
    /// Dotted package path
    pub path: String,
    /// Explicit alias, if any
    pub alias: Option<Ident>,
    pub span: Span,
}

impl Import {
    /// The name the importing module uses for this package
    ///
    /// Without an alias this is the last path segment.
    #[must_use]
    pub fn local_name(&self) -> &str {
        match &self.alias {
            Some(alias) => &alias.name,
            None => self.path.rsplit('.').next().unwrap_or(&self.path),
        }
    }
}

/// A function declaration
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub name: Ident,
    pub params: Vec<Param>,
    pub returns: Vec<ReturnParam>,
    pub annotations: Vec<Annotation>,
    /// Declared `native` (no body)
    pub is_native: bool,
    pub span: Span,
}

impl Function {
    /// Anchor id: `function-name`
    ///
    /// Kept apart from struct and connector anchors, which use the bare name.
    #[must_use]
    pub fn anchor(&self) -> String {
        format!("function-{}", self.name.name)
    }
}

/// A struct declaration with its fields
#[derive(Debug, Clone, PartialEq)]
pub struct StructDef {
    pub name: Ident,
    pub fields: Vec<Param>,
    pub annotations: Vec<Annotation>,
    pub span: Span,
}

/// A connector declaration bundling its actions
#[derive(Debug, Clone, PartialEq)]
pub struct Connector {
    pub name: Ident,
    pub params: Vec<Param>,
    pub actions: Vec<Action>,
    pub annotations: Vec<Annotation>,
    pub is_native: bool,
    pub span: Span,
}

/// An action declared inside a connector
#[derive(Debug, Clone, PartialEq)]
pub struct Action {
    pub name: Ident,
    /// Name of the owning connector
    pub connector: String,
    pub params: Vec<Param>,
    pub returns: Vec<ReturnParam>,
    pub annotations: Vec<Annotation>,
    pub is_native: bool,
    pub span: Span,
}

impl Action {
    /// Anchor id: `Connector.action`
    #[must_use]
    pub fn anchor(&self) -> String {
        format!("{}.{}", self.connector, self.name.name)
    }
}

macro_rules! impl_spanned {
    ($($ty:ty),*) => {
        $(impl Spanned for $ty {
            fn span(&self) -> Span {
                self.span
            }
        })*
    };
}

impl_spanned!(Import, Function, StructDef, Connector, Action);

/// Everything documented in one source module
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ModuleDeclarations {
    /// Declared package path, `None` when the module has no `package` line
    pub package: Option<String>,
    pub imports: Vec<Import>,
    pub functions: Vec<Function>,
    pub structs: Vec<StructDef>,
    pub connectors: Vec<Connector>,
}

impl ModuleDeclarations {
    /// The package this module contributes to
    #[must_use]
    pub fn package_path(&self) -> &str {
        self.package.as_deref().unwrap_or(DEFAULT_PACKAGE)
    }

    /// Number of top-level declarations (functions, structs, connectors)
    #[must_use]
    pub fn declaration_count(&self) -> usize {
        self.functions.len() + self.structs.len() + self.connectors.len()
    }

    /// Bind every qualified type reference to the import it names
    ///
    /// A qualifier matching an import's local name (alias or last path
    /// segment) records that import's full path; others are left alone.
    pub fn bind_imports(&mut self) {
        if self.imports.is_empty() {
            return;
        }
        let imports: Vec<(String, String)> = self
            .imports
            .iter()
            .map(|i| (i.local_name().to_string(), i.path.clone()))
            .collect();
        let bind = |ty: &mut TypeName| {
            let Some(qualifier) = ty.package.as_deref() else {
                return;
            };
            if let Some((_, path)) = imports.iter().find(|(local, _)| local == qualifier) {
                ty.import_path = Some(path.clone());
            }
        };

        for function in &mut self.functions {
            function.params.iter_mut().for_each(|p| bind(&mut p.ty));
            function.returns.iter_mut().for_each(|r| bind(&mut r.ty));
        }
        for def in &mut self.structs {
            def.fields.iter_mut().for_each(|f| bind(&mut f.ty));
        }
        for connector in &mut self.connectors {
            connector.params.iter_mut().for_each(|p| bind(&mut p.ty));
            for action in &mut connector.actions {
                action.params.iter_mut().for_each(|p| bind(&mut p.ty));
                action.returns.iter_mut().for_each(|r| bind(&mut r.ty));
            }
        }
    }

    /// Returns true if the module declares nothing documentable
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.declaration_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(name: &str) -> Ident {
        Ident::new(name, Span::default())
    }

    #[test]
    fn import_local_name() {
        let plain = Import {
            path: "ballerina.lang.messages".to_string(),
            alias: None,
            span: Span::default(),
        };
        assert_eq!(plain.local_name(), "messages");

        let aliased = Import {
            alias: Some(ident("m")),
            ..plain
        };
        assert_eq!(aliased.local_name(), "m");
    }

    #[test]
    fn module_without_package_is_default() {
        let module = ModuleDeclarations::default();
        assert_eq!(module.package_path(), DEFAULT_PACKAGE);
        assert!(module.is_empty());
    }

    #[test]
    fn action_anchor_includes_connector() {
        let action = Action {
            name: ident("get"),
            connector: "TestConnector".to_string(),
            params: Vec::new(),
            returns: Vec::new(),
            annotations: Vec::new(),
            is_native: false,
            span: Span::default(),
        };
        assert_eq!(action.anchor(), "TestConnector.get");
    }
}
