//! HTTP adapter for the form builder endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    CreateFormRequest, FormListResponse, FormResponse, GenerateFormRequest,
    GeneratedFormResponse, ListFormsParams, PublicFormResponse, PublishFormRequest,
    UpdateFormRequest,
};
pub use handlers::{form_error_response, FormHandlers};
pub use routes::form_routes;
