//! Request body shapes.

use reqwest::multipart::{Form, Part};
use serde_json::Value;

use crate::error::Error;
use crate::resource::Payload;
use crate::types::ImageDescriptor;

/// A file attached to a multipart request under a named form field.
#[derive(Debug, Clone)]
pub struct Attachment {
    pub field: String,
    pub file: ImageDescriptor,
}

impl Attachment {
    pub fn new(field: impl Into<String>, file: ImageDescriptor) -> Self {
        Self {
            field: field.into(),
            file,
        }
    }
}

/// Body of one outgoing request.
#[derive(Debug)]
pub(crate) enum RequestBody<'a> {
    Empty,
    Json(&'a Payload),
    /// Form fields plus one binary file field.
    Multipart(&'a Payload, &'a Attachment),
    /// Form fields only, URL-encoded.
    Form(&'a Payload),
}

/// Text representation of a form field, or `None` to omit it.
pub(crate) fn form_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(if *b { "true" } else { "false" }.to_string()),
        other => Some(other.to_string()),
    }
}

pub(crate) fn form_pairs(fields: &Payload) -> Vec<(String, String)> {
    fields
        .iter()
        .filter_map(|(key, value)| form_value(value).map(|v| (key.clone(), v)))
        .collect()
}

pub(crate) fn multipart_form(fields: &Payload, attachment: &Attachment) -> Result<Form, Error> {
    let form = form_pairs(fields)
        .into_iter()
        .fold(Form::new(), |form, (key, value)| form.text(key, value));

    let file = &attachment.file;
    let part = Part::bytes(file.bytes().to_vec())
        .file_name(file.file_name().to_string())
        .mime_str(file.content_type())?;

    Ok(form.part(attachment.field.clone(), part))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn booleans_become_literal_strings() {
        assert_eq!(form_value(&json!(true)).as_deref(), Some("true"));
        assert_eq!(form_value(&json!(false)).as_deref(), Some("false"));
    }

    #[test]
    fn null_fields_are_omitted() {
        let mut fields = Payload::new();
        fields.insert("token".to_string(), json!("abc"));
        fields.insert("app_id".to_string(), Value::Null);
        fields.insert("limit".to_string(), json!(3));

        let pairs = form_pairs(&fields);
        assert_eq!(
            pairs,
            vec![
                ("limit".to_string(), "3".to_string()),
                ("token".to_string(), "abc".to_string()),
            ]
        );
    }

    #[test]
    fn rejects_invalid_content_type() {
        let fields = Payload::new();
        let attachment = Attachment::new("file", ImageDescriptor::new(vec![1, 2], "not a mime"));
        assert!(multipart_form(&fields, &attachment).is_err());
    }
}
