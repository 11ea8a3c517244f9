//! Coercion of untrusted generated JSON into typed form elements.
//!
//! The policy is to always produce a renderable form: unknown kinds become
//! `text`, choice fields without options get placeholders, and every
//! adjustment is reported instead of failing.

use once_cell::sync::Lazy;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};

use super::IngestionError;
use crate::domain::form::{ElementType, FormElement, MAX_ELEMENTS};
use crate::domain::foundation::ElementId;

/// Title used when the payload has none.
pub const DEFAULT_TITLE: &str = "AI Generated Form";

/// Options given to choice fields that arrive without usable options.
pub const DEFAULT_OPTIONS: [&str; 3] = ["Option 1", "Option 2", "Option 3"];

static TYPE_SYNONYMS: Lazy<HashMap<&'static str, ElementType>> = Lazy::new(|| {
    HashMap::from([
        ("text", ElementType::Text),
        ("string", ElementType::Text),
        ("input", ElementType::Text),
        ("email", ElementType::Email),
        ("textarea", ElementType::Textarea),
        ("select", ElementType::Select),
        ("dropdown", ElementType::Select),
        ("radio", ElementType::Radio),
        ("checkbox", ElementType::Checkbox),
        ("number", ElementType::Number),
        ("integer", ElementType::Number),
    ])
});

/// One adjustment made while coercing a field. `index` is the position in the raw `fields` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Coercion {
    /// A synonym label was mapped onto a canonical kind.
    #[serde(rename_all = "camelCase")]
    TypeMapped {
        index: usize,
        from: String,
        to: ElementType,
    },
    /// The label was missing or unknown, so the field became `text`.
    #[serde(rename_all = "camelCase")]
    TypeDefaulted { index: usize, from: Option<String> },
    /// No usable id, or a duplicate id; a fresh one was assigned.
    #[serde(rename_all = "camelCase")]
    IdGenerated { index: usize, id: String },
    #[serde(rename_all = "camelCase")]
    LabelDefaulted { index: usize, label: String },
    #[serde(rename_all = "camelCase")]
    OptionsDefaulted { index: usize },
    /// Options supplied for a kind that does not use them.
    #[serde(rename_all = "camelCase")]
    OptionsDropped { index: usize },
    /// Entry was not an object.
    #[serde(rename_all = "camelCase")]
    FieldSkipped { index: usize },
    /// Fields beyond the element cap were dropped.
    #[serde(rename_all = "camelCase")]
    Truncated { kept: usize, dropped: usize },
}

/// Result of coercing a generated form payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoercedForm {
    pub title: String,
    pub description: String,
    pub elements: Vec<FormElement>,
    pub coercions: Vec<Coercion>,
}

/// Coerces a `{title?, description?, fields: [...]}` payload.
///
/// Generated element ids take the form `element-{token}-{n}`; the token keeps
/// them unique across calls.
///
/// # Errors
///
/// - `MissingFields` if `raw` is not an object with a `fields` array
pub fn coerce_generated_form(raw: &Value, id_token: &str) -> Result<CoercedForm, IngestionError> {
    let object = raw.as_object().ok_or(IngestionError::MissingFields)?;
    let fields = object
        .get("fields")
        .and_then(Value::as_array)
        .ok_or(IngestionError::MissingFields)?;

    let title = non_empty_str(object, "title").unwrap_or(DEFAULT_TITLE).to_string();
    let description = object
        .get("description")
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string();

    let mut elements = Vec::new();
    let mut coercions = Vec::new();
    let mut used_ids = HashSet::new();

    for (index, field) in fields.iter().enumerate() {
        if elements.len() == MAX_ELEMENTS {
            coercions.push(Coercion::Truncated {
                kept: MAX_ELEMENTS,
                dropped: fields.len() - index,
            });
            break;
        }
        match coerce_element(field, index, id_token, &mut coercions) {
            Some(mut element) => {
                dedupe_id(&mut element, index, &mut used_ids, &mut coercions);
                elements.push(element);
            }
            None => coercions.push(Coercion::FieldSkipped { index }),
        }
    }

    Ok(CoercedForm {
        title,
        description,
        elements,
        coercions,
    })
}

/// Coerces one raw field. Returns `None` if the entry is not an object.
pub fn coerce_element(
    field: &Value,
    index: usize,
    id_token: &str,
    coercions: &mut Vec<Coercion>,
) -> Option<FormElement> {
    let object = field.as_object()?;

    let element_type = coerce_type(object.get("type"), index, coercions);

    let id = match non_empty_str(object, "id").and_then(|s| ElementId::new(s).ok()) {
        Some(id) => id,
        None => {
            let id = ElementId::numbered(id_token, index + 1);
            coercions.push(Coercion::IdGenerated {
                index,
                id: id.to_string(),
            });
            id
        }
    };

    let label = match non_empty_str(object, "label").or_else(|| non_empty_str(object, "name")) {
        Some(label) => label.to_string(),
        None => {
            let label = format!("Field {}", index + 1);
            coercions.push(Coercion::LabelDefaulted {
                index,
                label: label.clone(),
            });
            label
        }
    };

    let required = matches!(object.get("required"), Some(Value::Bool(true)))
        || matches!(object.get("required"), Some(Value::String(s)) if s == "true");

    let placeholder = non_empty_str(object, "placeholder").map(String::from);

    let raw_options = object.get("options").filter(|v| !v.is_null());
    let options = if element_type.is_choice() {
        let parsed = raw_options.map(parse_options).unwrap_or_default();
        if parsed.is_empty() {
            coercions.push(Coercion::OptionsDefaulted { index });
            Some(DEFAULT_OPTIONS.iter().map(|s| s.to_string()).collect())
        } else {
            Some(parsed)
        }
    } else {
        if raw_options.is_some() {
            coercions.push(Coercion::OptionsDropped { index });
        }
        None
    };

    Some(FormElement {
        id,
        element_type,
        label,
        required,
        placeholder,
        options,
        validation: None,
    })
}

fn coerce_type(raw: Option<&Value>, index: usize, coercions: &mut Vec<Coercion>) -> ElementType {
    let label = raw.and_then(Value::as_str).map(str::trim);
    let mapped = label.and_then(|l| TYPE_SYNONYMS.get(l.to_lowercase().as_str()).copied());

    match (label, mapped) {
        (Some(from), Some(to)) => {
            if from != to.as_str() {
                coercions.push(Coercion::TypeMapped {
                    index,
                    from: from.to_string(),
                    to,
                });
            }
            to
        }
        (from, _) => {
            coercions.push(Coercion::TypeDefaulted {
                index,
                from: from.map(String::from),
            });
            ElementType::Text
        }
    }
}

fn parse_options(raw: &Value) -> Vec<String> {
    raw.as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| match item {
                    Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
                    Value::Number(n) => Some(n.to_string()),
                    _ => None,
                })
                .collect()
        })
        .unwrap_or_default()
}

fn dedupe_id(
    element: &mut FormElement,
    index: usize,
    used: &mut HashSet<String>,
    coercions: &mut Vec<Coercion>,
) {
    if used.insert(element.id.to_string()) {
        return;
    }
    let base = element.id.to_string();
    let mut suffix = 2;
    let fresh = loop {
        let candidate = format!("{}-{}", base, suffix);
        if !used.contains(&candidate) {
            break candidate;
        }
        suffix += 1;
    };
    used.insert(fresh.clone());
    if let Ok(id) = ElementId::new(fresh.clone()) {
        element.id = id;
        coercions.push(Coercion::IdGenerated { index, id: fresh });
    }
}

fn non_empty_str<'a>(object: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    object
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}
