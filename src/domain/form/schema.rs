//! Form schema aggregate.
//!
//! A schema is an ordered list of elements plus metadata and the publication
//! fields. Element order is significant: rendering and tab order follow it.
//!
//! # Ownership
//!
//! Only the owner may mutate, publish, unpublish or delete a schema.
//! Content edits are allowed in every status and never touch `status`.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::{FormElement, FormStatus, PublishSettings, ShareLinks};
use crate::domain::foundation::{
    DomainError, ErrorCode, FormId, OwnedByUser, StateMachine, Timestamp, UserId, ValidationError,
};

/// Maximum number of elements in a single form.
pub const MAX_ELEMENTS: usize = 50;

/// Maximum length for a form title.
pub const MAX_TITLE_LENGTH: usize = 500;

/// Form schema aggregate.
///
/// # Invariants
///
/// - `id` is assigned at creation and never changes
/// - `elements` holds at most [`MAX_ELEMENTS`] entries with unique ids
/// - select/radio elements carry at least one option
/// - `published_at` and the share links are present once the form has been published
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormSchema {
    id: FormId,
    owner_id: UserId,
    title: String,
    description: Option<String>,
    elements: Vec<FormElement>,
    status: FormStatus,
    published_at: Option<Timestamp>,
    share_url: Option<String>,
    embed_code: Option<String>,
    allow_anonymous: bool,
    collect_emails: bool,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl FormSchema {
    /// Create a new draft form.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the title is blank or too long, or the elements
    ///   break the count, uniqueness or options rules
    pub fn new(
        id: FormId,
        owner_id: UserId,
        title: String,
        description: Option<String>,
        elements: Vec<FormElement>,
    ) -> Result<Self, DomainError> {
        Self::validate_title(&title)?;
        Self::validate_elements(&elements)?;

        let now = Timestamp::now();
        let defaults = PublishSettings::default();
        Ok(Self {
            id,
            owner_id,
            title,
            description,
            elements,
            status: FormStatus::Draft,
            published_at: None,
            share_url: None,
            embed_code: None,
            allow_anonymous: defaults.allow_anonymous,
            collect_emails: defaults.collect_emails,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitute a form from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: FormId,
        owner_id: UserId,
        title: String,
        description: Option<String>,
        elements: Vec<FormElement>,
        status: FormStatus,
        published_at: Option<Timestamp>,
        share_url: Option<String>,
        embed_code: Option<String>,
        allow_anonymous: bool,
        collect_emails: bool,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            owner_id,
            title,
            description,
            elements,
            status,
            published_at,
            share_url,
            embed_code,
            allow_anonymous,
            collect_emails,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &FormId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn elements(&self) -> &[FormElement] {
        &self.elements
    }

    pub fn status(&self) -> FormStatus {
        self.status
    }

    pub fn published_at(&self) -> Option<&Timestamp> {
        self.published_at.as_ref()
    }

    pub fn share_url(&self) -> Option<&str> {
        self.share_url.as_deref()
    }

    pub fn embed_code(&self) -> Option<&str> {
        self.embed_code.as_deref()
    }

    pub fn allow_anonymous(&self) -> bool {
        self.allow_anonymous
    }

    pub fn collect_emails(&self) -> bool {
        self.collect_emails
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// Returns true if submissions may currently be recorded.
    pub fn accepts_submissions(&self) -> bool {
        self.status.accepts_submissions()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Replace title, description and elements.
    ///
    /// # Errors
    ///
    /// - `Forbidden` if caller is not the owner
    /// - `ValidationFailed` if the new content is invalid
    pub fn update_content(
        &mut self,
        caller: &UserId,
        title: String,
        description: Option<String>,
        elements: Vec<FormElement>,
    ) -> Result<(), DomainError> {
        self.check_ownership(caller)?;
        Self::validate_title(&title)?;
        Self::validate_elements(&elements)?;

        self.title = title;
        self.description = description;
        self.elements = elements;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Publish (or republish) the form.
    ///
    /// All checks run before anything is written, so a failure leaves the
    /// form exactly as it was.
    ///
    /// # Errors
    ///
    /// - `Forbidden` if caller is not the owner
    /// - `EmptyForm` if the form has no elements
    /// - `InvalidStateTransition` if the form is already published
    pub fn publish(
        &mut self,
        caller: &UserId,
        settings: PublishSettings,
        links: ShareLinks,
        now: Timestamp,
    ) -> Result<(), DomainError> {
        self.check_ownership(caller)?;
        if self.elements.is_empty() {
            return Err(DomainError::new(
                ErrorCode::EmptyForm,
                "Cannot publish a form without elements",
            ));
        }
        let next = self.status.transition_to(FormStatus::Published)?;

        self.status = next;
        self.published_at = Some(now);
        self.share_url = Some(links.share_url);
        self.embed_code = Some(links.embed_code);
        self.allow_anonymous = settings.allow_anonymous;
        self.collect_emails = settings.collect_emails;
        self.updated_at = now;
        Ok(())
    }

    /// Stop accepting submissions. Share links are kept for a later republish.
    ///
    /// # Errors
    ///
    /// - `Forbidden` if caller is not the owner
    /// - `InvalidStateTransition` if the form is not published
    pub fn unpublish(&mut self, caller: &UserId) -> Result<(), DomainError> {
        self.check_ownership(caller)?;
        self.status = self.status.transition_to(FormStatus::Unpublished)?;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Validation
    // ─────────────────────────────────────────────────────────────────────────

    fn validate_title(title: &str) -> Result<(), ValidationError> {
        let trimmed = title.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("title"));
        }
        let len = trimmed.chars().count();
        if len > MAX_TITLE_LENGTH {
            return Err(ValidationError::too_many("title", MAX_TITLE_LENGTH, len));
        }
        Ok(())
    }

    /// Checks the element list rules shared by creation and updates.
    pub fn validate_elements(elements: &[FormElement]) -> Result<(), ValidationError> {
        if elements.len() > MAX_ELEMENTS {
            return Err(ValidationError::too_many(
                "elements",
                MAX_ELEMENTS,
                elements.len(),
            ));
        }

        let mut seen = HashSet::with_capacity(elements.len());
        for element in elements {
            if !seen.insert(element.id.as_str()) {
                return Err(ValidationError::invalid_format(
                    "elements",
                    format!("duplicate element id '{}'", element.id),
                ));
            }
            element.check_shape()?;
        }
        Ok(())
    }
}

impl OwnedByUser for FormSchema {
    fn owner_id(&self) -> &UserId {
        &self.owner_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ElementId;
    use crate::domain::form::ElementType;

    fn owner() -> UserId {
        UserId::new("owner-1").unwrap()
    }

    fn stranger() -> UserId {
        UserId::new("stranger").unwrap()
    }

    fn text(id: &str) -> FormElement {
        FormElement::new(ElementId::new(id).unwrap(), ElementType::Text, "Name")
    }

    fn form_with(elements: Vec<FormElement>) -> FormSchema {
        FormSchema::new(
            FormId::new(),
            owner(),
            "Contact".to_string(),
            None,
            elements,
        )
        .unwrap()
    }

    fn links(form: &FormSchema) -> ShareLinks {
        ShareLinks::derive("https://forms.test", form.id())
    }

    #[test]
    fn new_form_starts_as_draft_with_defaults() {
        let form = form_with(vec![text("a")]);

        assert_eq!(form.status(), FormStatus::Draft);
        assert!(form.allow_anonymous());
        assert!(!form.collect_emails());
        assert!(form.published_at().is_none());
        assert!(form.share_url().is_none());
    }

    #[test]
    fn new_rejects_blank_title() {
        let result = FormSchema::new(FormId::new(), owner(), "  ".to_string(), None, vec![]);
        assert_eq!(result.unwrap_err().code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn new_rejects_more_than_max_elements() {
        let elements: Vec<_> = (0..=MAX_ELEMENTS).map(|i| text(&format!("e{}", i))).collect();
        let result = FormSchema::new(FormId::new(), owner(), "T".to_string(), None, elements);
        assert!(result.is_err());
    }

    #[test]
    fn new_accepts_exactly_max_elements() {
        let elements: Vec<_> = (0..MAX_ELEMENTS).map(|i| text(&format!("e{}", i))).collect();
        let form = form_with(elements);
        assert_eq!(form.elements().len(), MAX_ELEMENTS);
    }

    #[test]
    fn new_rejects_duplicate_element_ids() {
        let result = FormSchema::new(
            FormId::new(),
            owner(),
            "T".to_string(),
            None,
            vec![text("a"), text("a")],
        );
        assert!(result.is_err());
    }

    #[test]
    fn publish_empty_form_fails_and_stays_draft() {
        let mut form = form_with(vec![]);
        let links = links(&form);

        let err = form
            .publish(&owner(), PublishSettings::default(), links, Timestamp::now())
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::EmptyForm);
        assert_eq!(form.status(), FormStatus::Draft);
        assert!(form.share_url().is_none());
    }

    #[test]
    fn publish_by_stranger_is_forbidden() {
        let mut form = form_with(vec![text("a")]);
        let links = links(&form);

        let err = form
            .publish(&stranger(), PublishSettings::default(), links, Timestamp::now())
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::Forbidden);
        assert_eq!(form.status(), FormStatus::Draft);
    }

    #[test]
    fn ownership_is_checked_before_emptiness() {
        let mut form = form_with(vec![]);
        let links = links(&form);

        let err = form
            .publish(&stranger(), PublishSettings::default(), links, Timestamp::now())
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::Forbidden);
    }

    #[test]
    fn publish_sets_links_settings_and_timestamp() {
        let mut form = form_with(vec![text("a")]);
        let links = links(&form);
        let now = Timestamp::now();
        let settings = PublishSettings {
            allow_anonymous: false,
            collect_emails: true,
        };

        form.publish(&owner(), settings, links.clone(), now).unwrap();

        assert_eq!(form.status(), FormStatus::Published);
        assert_eq!(form.published_at(), Some(&now));
        assert_eq!(form.share_url(), Some(links.share_url.as_str()));
        assert_eq!(form.embed_code(), Some(links.embed_code.as_str()));
        assert!(!form.allow_anonymous());
        assert!(form.collect_emails());
        assert!(form.accepts_submissions());
    }

    #[test]
    fn publishing_twice_is_an_invalid_transition() {
        let mut form = form_with(vec![text("a")]);
        let l = links(&form);
        form.publish(&owner(), PublishSettings::default(), l.clone(), Timestamp::now())
            .unwrap();

        let err = form
            .publish(&owner(), PublishSettings::default(), l, Timestamp::now())
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::InvalidStateTransition);
    }

    #[test]
    fn unpublish_keeps_share_links_and_allows_republish() {
        let mut form = form_with(vec![text("a")]);
        let l = links(&form);
        form.publish(&owner(), PublishSettings::default(), l.clone(), Timestamp::now())
            .unwrap();

        form.unpublish(&owner()).unwrap();

        assert_eq!(form.status(), FormStatus::Unpublished);
        assert!(!form.accepts_submissions());
        assert_eq!(form.share_url(), Some(l.share_url.as_str()));

        form.publish(&owner(), PublishSettings::default(), l, Timestamp::now())
            .unwrap();
        assert_eq!(form.status(), FormStatus::Published);
    }

    #[test]
    fn unpublish_draft_fails() {
        let mut form = form_with(vec![text("a")]);
        let err = form.unpublish(&owner()).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStateTransition);
        assert_eq!(form.status(), FormStatus::Draft);
    }

    #[test]
    fn update_content_keeps_status() {
        let mut form = form_with(vec![text("a")]);
        let l = links(&form);
        form.publish(&owner(), PublishSettings::default(), l, Timestamp::now())
            .unwrap();

        form.update_content(
            &owner(),
            "Renamed".to_string(),
            Some("new".to_string()),
            vec![text("a"), text("b")],
        )
        .unwrap();

        assert_eq!(form.status(), FormStatus::Published);
        assert_eq!(form.title(), "Renamed");
        assert_eq!(form.elements().len(), 2);
    }

    #[test]
    fn update_content_by_stranger_is_forbidden() {
        let mut form = form_with(vec![text("a")]);
        let err = form
            .update_content(&stranger(), "X".to_string(), None, vec![])
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);
        assert_eq!(form.title(), "Contact");
    }
}
