//! LocalStorage 封装模块
//!
//! `localStorage` behind the core's `SessionStorage` contract. Values are raw
//! strings (the session store serialises the profile itself), so this goes
//! through `raw()` rather than gloo's JSON helpers.

use furnish_shared::{AdminError, AdminResult, SessionStorage};
use gloo_storage::{LocalStorage, Storage};

#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl SessionStorage for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        LocalStorage::raw().get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> AdminResult<()> {
        LocalStorage::raw()
            .set_item(key, value)
            .map_err(|e| AdminError::storage(format!("{:?}", e)).in_op_with("storage.set", key))
    }

    fn delete(&self, key: &str) {
        LocalStorage::delete(key);
    }
}
