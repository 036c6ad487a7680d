use utoipa::ToSchema;

pub use gearlend_models::items::*;

/// An uploaded image file taken from a multipart form.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Multipart form accepted by item creation. Documentation only; the
/// handler reads the parts directly.
#[allow(dead_code)]
#[derive(ToSchema)]
pub struct CreateItemForm {
    #[schema(example = "Projector")]
    pub name: String,
    #[schema(example = 3)]
    pub quantity: i64,
    /// Defaults to true
    pub available: Option<bool>,
    /// png, jpg or jpeg
    #[schema(value_type = Option<String>, format = Binary)]
    pub image: Option<Vec<u8>>,
}
