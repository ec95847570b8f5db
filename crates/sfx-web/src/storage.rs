use sfx_core::{PreferenceStorage, Result, SfxError};
use web_sys as web;

/// `window.localStorage`, looked up on every access since it may be blocked.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorage;

fn local_storage() -> Result<web::Storage> {
    web::window()
        .ok_or_else(|| SfxError::Storage("no window".into()))?
        .local_storage()
        .map_err(|e| SfxError::Storage(format!("{e:?}")))?
        .ok_or_else(|| SfxError::Storage("localStorage unavailable".into()))
}

impl PreferenceStorage for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        local_storage()?
            .get_item(key)
            .map_err(|e| SfxError::Storage(format!("{e:?}")))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        local_storage()?
            .set_item(key, value)
            .map_err(|e| SfxError::Storage(format!("{e:?}")))
    }
}
