//! Shim descriptors.

use serde::{Deserialize, Serialize};

/// A callable shape needing a generated shim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Func {
    /// Identifier for the shim (or the method name inside a [`Wrap`]).
    pub name: String,
    /// Signature key, e.g. `func(int) (string)`.
    #[serde(rename = "type")]
    pub ty: String,
    /// Parameter types as they are spelled in the generated file.
    pub ins: Vec<String>,
    /// Result types as they are spelled in the generated file.
    pub outs: Vec<String>,
}

impl Func {
    pub fn arity(&self) -> (usize, usize) {
        (self.ins.len(), self.outs.len())
    }
}

/// A structural processing unit whose lifecycle methods each get a
/// closure wrapper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wrap {
    /// Identifier-safe rendering of the receiver type.
    pub name: String,
    /// Receiver type with pointers stripped.
    #[serde(rename = "type")]
    pub ty: String,
    /// One entry per lifecycle method; `Func::name` is the method name.
    pub methods: Vec<Func>,
}

impl Wrap {
    pub fn method(&self, name: &str) -> Option<&Func> {
        self.methods.iter().find(|m| m.name == name)
    }
}

/// A "push output" callback shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Emitter {
    /// Canonical name, `Emit…` or `EmitET…`.
    pub name: String,
    /// Signature key of the callback.
    #[serde(rename = "type")]
    pub ty: String,
    /// Whether the first parameter is an event timestamp.
    pub time: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub val: String,
}

/// A "pull input" callback shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Input {
    /// Canonical name, `Iter…` or `IterET…`.
    pub name: String,
    /// Signature key of the callback.
    #[serde(rename = "type")]
    pub ty: String,
    /// Whether the first parameter is an event timestamp.
    pub time: bool,
    /// Element types are the pointees of the out-parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub val: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_method_lookup() {
        let wrap = Wrap {
            name: "Bar".into(),
            ty: "Bar".into(),
            methods: vec![Func {
                name: "ProcessElement".into(),
                ty: "func(int) (string)".into(),
                ins: vec!["int".into()],
                outs: vec!["string".into()],
            }],
        };
        assert_eq!(wrap.method("ProcessElement").map(Func::arity), Some((1, 1)));
        assert!(wrap.method("Setup").is_none());
    }

    #[test]
    fn test_emitter_serializes_without_key() {
        let emit = Emitter {
            name: "EmitString".into(),
            ty: "func(string) ()".into(),
            time: false,
            key: None,
            val: "string".into(),
        };
        let json = serde_json::to_string(&emit).unwrap();
        assert_eq!(
            json,
            r#"{"name":"EmitString","type":"func(string) ()","time":false,"val":"string"}"#
        );
    }
}
