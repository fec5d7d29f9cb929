use crate::services::auth::access_jwt::ValidatedClaims;

/// Whether the validated token grants `required`.
///
/// `scope` is a single space-delimited string; only an exact element match
/// counts (`read:messages` is not granted by `read:messages:all`). A missing
/// or empty claim grants nothing.
pub fn has_scope(claims: &ValidatedClaims, required: &str) -> bool {
    claims.scopes().any(|granted| granted == required)
}
