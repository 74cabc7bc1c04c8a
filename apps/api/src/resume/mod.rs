// Resume side of the form: PDF upload -> text lines -> inferred fields.

pub mod fields;
pub mod handlers;
pub mod pdf_text;

pub use fields::{infer_fields, ResumeFields, ResumePrefill};
