//! Form element model: the closed set of field kinds and their constraints.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{ElementId, ValidationError};

/// The seven supported field kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    Text,
    Email,
    Textarea,
    Select,
    Radio,
    Checkbox,
    Number,
}

impl ElementType {
    /// All element kinds, in builder palette order.
    pub const ALL: [ElementType; 7] = [
        ElementType::Text,
        ElementType::Email,
        ElementType::Textarea,
        ElementType::Select,
        ElementType::Radio,
        ElementType::Checkbox,
        ElementType::Number,
    ];

    /// Returns true for kinds that pick from a list of options.
    pub fn is_choice(&self) -> bool {
        matches!(self, ElementType::Select | ElementType::Radio)
    }

    /// Wire name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementType::Text => "text",
            ElementType::Email => "email",
            ElementType::Textarea => "textarea",
            ElementType::Select => "select",
            ElementType::Radio => "radio",
            ElementType::Checkbox => "checkbox",
            ElementType::Number => "number",
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ElementType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ElementType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ValidationError::invalid_format("type", format!("unknown kind '{}'", s)))
    }
}

/// Optional constraint bundle applied to non-empty string values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementValidation {
    /// Inclusive lower bound on character count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u32>,

    /// Inclusive upper bound on character count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,

    /// Regular expression source the value must match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

impl ElementValidation {
    /// Returns true when no constraint is configured.
    pub fn is_empty(&self) -> bool {
        self.min_length.is_none() && self.max_length.is_none() && self.pattern.is_none()
    }
}

/// One field definition within a form schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormElement {
    pub id: ElementId,

    #[serde(rename = "type")]
    pub element_type: ElementType,

    pub label: String,

    #[serde(default)]
    pub required: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,

    /// Choices for select/radio. Ignored for other kinds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<ElementValidation>,
}

impl FormElement {
    /// Creates an optional element with no placeholder, options or constraints.
    pub fn new(id: ElementId, element_type: ElementType, label: impl Into<String>) -> Self {
        Self {
            id,
            element_type,
            label: label.into(),
            required: false,
            placeholder: None,
            options: None,
            validation: None,
        }
    }

    /// Marks the element as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Sets the placeholder text.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Sets the option list.
    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = Some(options.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the constraint bundle.
    pub fn with_validation(mut self, validation: ElementValidation) -> Self {
        self.validation = Some(validation);
        self
    }

    /// Checks the shape rules that do not depend on sibling elements.
    ///
    /// Choice kinds must carry at least one option.
    pub fn check_shape(&self) -> Result<(), ValidationError> {
        if self.element_type.is_choice() {
            let has_options = self
                .options
                .as_ref()
                .map(|opts| opts.iter().any(|o| !o.trim().is_empty()))
                .unwrap_or(false);
            if !has_options {
                return Err(ValidationError::invalid_format(
                    format!("elements.{}.options", self.id),
                    format!("{} elements need at least one option", self.element_type),
                ));
            }
        }
        Ok(())
    }
}
