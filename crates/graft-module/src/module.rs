//! The in-memory module model and method locator.

use serde::{Deserialize, Serialize};

use graft_types::{MethodBody, QualifiedName, TypeRef};

use crate::error::{ModuleError, ModuleResult};

/// A compiled module: a named container of types.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    pub name: String,
    pub types: Vec<TypeDef>,
}

/// A type definition inside a module.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDef {
    pub name: QualifiedName,
    pub methods: Vec<MethodDef>,
}

/// A method definition: name, parameter signature, and an optional body.
///
/// `body` is `None` for abstract and extern methods; such a method can be
/// located but not merged.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDef {
    pub name: String,
    pub params: Vec<TypeRef>,
    pub body: Option<MethodBody>,
}

impl Module {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            types: Vec::new(),
        }
    }

    /// Append a type, builder style.
    pub fn with_type(mut self, ty: TypeDef) -> Self {
        self.types.push(ty);
        self
    }

    /// The type with the given qualified name, if present.
    pub fn find_type(&self, name: &QualifiedName) -> Option<&TypeDef> {
        self.types.iter().find(|t| &t.name == name)
    }

    /// Locate a method by qualified type name, method name, and optional
    /// parameter signature. First match wins; a `None` signature matches any
    /// overload. Fails with [`ModuleError::MethodNotFound`] when the type,
    /// the name, or the signature has no match.
    pub fn find_method(
        &self,
        type_name: &QualifiedName,
        method: &str,
        signature: Option<&[TypeRef]>,
    ) -> ModuleResult<&MethodDef> {
        self.find_type(type_name)
            .and_then(|t| t.methods.iter().find(|m| m.matches(method, signature)))
            .ok_or_else(|| ModuleError::MethodNotFound {
                type_name: type_name.clone(),
                method: method.to_string(),
            })
    }

    /// Mutable variant of [`Module::find_method`], used to install a merged
    /// body in place.
    pub fn find_method_mut(
        &mut self,
        type_name: &QualifiedName,
        method: &str,
        signature: Option<&[TypeRef]>,
    ) -> ModuleResult<&mut MethodDef> {
        self.types
            .iter_mut()
            .find(|t| &t.name == type_name)
            .and_then(|t| t.methods.iter_mut().find(|m| m.matches(method, signature)))
            .ok_or_else(|| ModuleError::MethodNotFound {
                type_name: type_name.clone(),
                method: method.to_string(),
            })
    }
}

impl TypeDef {
    pub fn new(name: QualifiedName) -> Self {
        Self {
            name,
            methods: Vec::new(),
        }
    }

    /// Append a method, builder style.
    pub fn with_method(mut self, method: MethodDef) -> Self {
        self.methods.push(method);
        self
    }
}

impl MethodDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            body: None,
        }
    }

    pub fn with_params(mut self, params: Vec<TypeRef>) -> Self {
        self.params = params;
        self
    }

    pub fn with_body(mut self, body: MethodBody) -> Self {
        self.body = Some(body);
        self
    }

    fn matches(&self, name: &str, signature: Option<&[TypeRef]>) -> bool {
        self.name == name
            && signature.map_or(true, |sig| signatures_match(&self.params, sig))
    }
}

/// Structural parameter-signature comparison: length first, then
/// element-wise qualified name and generic arity.
pub fn signatures_match(params: &[TypeRef], wanted: &[TypeRef]) -> bool {
    params.len() == wanted.len() && params.iter().zip(wanted).all(|(a, b)| a == b)
}
