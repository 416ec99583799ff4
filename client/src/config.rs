use gloo_storage::Storage;

use rollcall_shared::DashboardSettings;
use rollcall_shared::settings::SETTINGS_STORAGE_KEY;

/// Settings read once at startup, shared through context.
#[derive(Clone)]
pub(crate) struct Settings(pub DashboardSettings);

/// Load settings, falling back to defaults for a missing or malformed blob,
/// and write the normalized form back so the key is discoverable.
pub fn load() -> DashboardSettings {
    let settings: DashboardSettings =
        gloo_storage::LocalStorage::get(SETTINGS_STORAGE_KEY).unwrap_or_default();
    if let Err(e) = gloo_storage::LocalStorage::set(SETTINGS_STORAGE_KEY, &settings) {
        web_sys::console::warn_1(&format!("[settings] persist failed: {e}").into());
    }
    settings
}
