//! Form generation handlers.

mod generate_form;

pub use generate_form::{
    GenerateFormCommand, GenerateFormHandler, DEFAULT_BACKEND_TIMEOUT,
};
