//! Extractors whose rejections render as [`ApiErrorResponse`].

use axum::extract::{FromRequest, FromRequestParts};

use super::error::ApiErrorResponse;

/// JSON body extractor; malformed bodies become `INVALID_BODY` or `VALIDATION_ERROR`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiErrorResponse))]
pub struct ApiJson<T>(pub T);

/// Query string extractor; bad parameters become `VALIDATION_ERROR`.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiErrorResponse))]
pub struct ApiQuery<T>(pub T);

/// Path parameter extractor; bad parameters become `VALIDATION_ERROR`.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiErrorResponse))]
pub struct ApiPath<T>(pub T);
