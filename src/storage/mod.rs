//! Storage Module
//!
//! File-per-key persistent storage.
//!
//! ## Responsibilities
//! - Map each key to one file under the root directory
//! - Create intermediate directories for nested keys on demand
//! - Report misses explicitly instead of returning empty values
//!
//! ## Layout
//! ```text
//! {root}/
//!   ├── config             ← key "config"
//!   └── reports/
//!       ├── jan            ← key "reports/jan"
//!       └── feb            ← key "reports/feb"
//! ```
//!
//! Values are written to `.bucket-put-*` files beside their target and
//! renamed into place. A crash mid-write can leave one of these behind;
//! they are safe to delete and only readable by asking for that exact
//! name as a key.
//!
//! The filesystem is the only source of truth. There is no index, no
//! cache and no per-key locking; concurrent writers to one key are
//! resolved by whichever rename lands last.

mod store;

pub use store::FileStore;
