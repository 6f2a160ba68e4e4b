//! Service-discovery data model (XEP-0030 results with XEP-0004 forms).
//!
//! A disco#info result may carry extension data forms. Each form's type
//! is declared by the first value of its hidden `FORM_TYPE` field
//! (XEP-0068). Server contact addresses (XEP-0157) travel in a form of
//! type [`SERVER_INFO_FORM_TYPE`].

use serde::{Deserialize, Serialize};

/// The well-known form type carrying server contact addresses.
pub const SERVER_INFO_FORM_TYPE: &str = "http://jabber.org/network/serverinfo";

/// The field that declares a data form's type.
pub const FORM_TYPE_FIELD: &str = "FORM_TYPE";

/// One field of a data form: a name and an ordered list of values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormField {
    /// Field name (the `var` attribute on the wire).
    pub var: String,
    /// Values in wire order.
    pub values: Vec<String>,
}

impl FormField {
    /// Create a field from a name and values.
    pub fn new(var: impl Into<String>, values: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            var: var.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }
}

/// A data-form extension attached to a disco#info result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataForm {
    /// Fields in wire order.
    pub fields: Vec<FormField>,
}

impl DataForm {
    /// Create an empty form of the given type.
    pub fn of_type(form_type: impl Into<String>) -> Self {
        Self {
            fields: vec![FormField::new(FORM_TYPE_FIELD, [form_type.into()])],
        }
    }

    /// Add a field, builder style.
    pub fn with_field(
        mut self,
        var: impl Into<String>,
        values: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.fields.push(FormField::new(var, values));
        self
    }

    /// The form's declared type, if it declares one.
    pub fn form_type(&self) -> Option<&str> {
        self.field(FORM_TYPE_FIELD)
            .and_then(|f| f.values.first())
            .map(String::as_str)
    }

    /// Look up a field by name (first match).
    pub fn field(&self, var: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.var == var)
    }
}

/// A disco#info query result: the extension forms published by an entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoInfo {
    /// Extension forms in the order the entity listed them.
    pub extensions: Vec<DataForm>,
}

impl DiscoInfo {
    /// A result with no extensions.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Add an extension form, builder style.
    pub fn with_extension(mut self, form: DataForm) -> Self {
        self.extensions.push(form);
        self
    }
}
