use axum::extract::FromRequest;

use crate::error::ApiError;

/// `axum::Json` whose rejections render through [`ApiError`], so a malformed
/// body gets the same 400 shape as any other validation failure.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);
