/*
 * Responsibility
 * - GET /public, /private, /private-scoped
 * - private handlers only see claims the access guard has already verified
 */
use axum::Json;

use crate::api::v1::dto::messages::{MessageResponse, PrivateMessageResponse};
use crate::api::v1::extractors::{AuthCtx, AuthCtxExtractor};

pub const READ_MESSAGES_SCOPE: &str = "read:messages";

pub async fn public() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Hello from a public endpoint! You don't need to be authenticated to see this.",
    })
}

pub async fn private(AuthCtxExtractor(ctx): AuthCtxExtractor) -> Json<PrivateMessageResponse> {
    Json(private_response(
        &ctx,
        "Hello from a private endpoint! You need to be authenticated to see this.",
    ))
}

pub async fn private_scoped(
    AuthCtxExtractor(ctx): AuthCtxExtractor,
) -> Json<PrivateMessageResponse> {
    Json(private_response(
        &ctx,
        "Hello from a private endpoint! You need to be authenticated and have a scope of read:messages to see this.",
    ))
}

fn private_response(ctx: &AuthCtx, message: &'static str) -> PrivateMessageResponse {
    PrivateMessageResponse {
        message,
        sub: ctx.subject().map(str::to_owned),
        scopes: ctx.scopes(),
        expires_at: ctx.expires_at(),
    }
}
