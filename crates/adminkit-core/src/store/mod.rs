// ── Resource store ──
//
// Cache, CRUD orchestration and navigation over cached collections.

mod cache;
mod crud;
mod item_store;
mod navigation;

pub use cache::ResourceCache;
pub use item_store::ItemStore;
