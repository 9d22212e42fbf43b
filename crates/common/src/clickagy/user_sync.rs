use crate::auction::types::{ServerResponse, SyncPermissions, SyncType, UserSync};

/// User-sync pixels to expose after an auction.
///
/// Yields the single image pixel when pixel syncs are allowed and the exchange
/// answered at least once. Response content is not inspected.
#[must_use]
pub fn resolve_user_syncs(
    permissions: &SyncPermissions,
    responses: &[ServerResponse],
    sync_url: &str,
) -> Vec<UserSync> {
    if !permissions.pixel_enabled || responses.is_empty() {
        return Vec::new();
    }

    vec![UserSync {
        sync_type: SyncType::Image,
        url: sync_url.to_string(),
    }]
}
