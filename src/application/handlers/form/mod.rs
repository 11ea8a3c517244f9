//! Form command and query handlers.

mod create_form;
mod delete_form;
mod generate_form;
mod get_form;
mod get_published_form;
mod list_forms;
mod publish_form;
mod unpublish_form;
mod update_form;

pub use create_form::{CreateFormCommand, CreateFormHandler};
pub use delete_form::{DeleteFormCommand, DeleteFormHandler};
pub use generate_form::{GenerateFormCommand, GenerateFormError, GenerateFormHandler};
pub use get_form::{GetFormHandler, GetFormQuery};
pub use get_published_form::{GetPublishedFormHandler, GetPublishedFormQuery};
pub use list_forms::{FormPage, ListFormsHandler, ListFormsQuery, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
pub use publish_form::{PublishFormCommand, PublishFormHandler};
pub use unpublish_form::{UnpublishFormCommand, UnpublishFormHandler};
pub use update_form::{UpdateFormCommand, UpdateFormHandler};
