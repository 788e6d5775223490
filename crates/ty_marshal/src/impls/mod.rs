//! [`Marshal`](crate::Marshal) implementations for foreign types.
//!
//! ## Implemented Menu
//!
//! - native: `bool`, `i8`-`i64`, `isize`, `u8`-`u64`, `usize`, `f32`, `f64`, `String`
//! - wrapper: `Option<T>`, `Box<T>` (transparent, hooks included)
//! - collections: `Vec<T>`, `BTreeMap<K, V>`, `std::collections::HashMap<K, V, S>`,
//!   `hashbrown::HashMap<K, V, S>`
//! - node: `serde_yaml::Value`, decoded verbatim (tags included)

// -----------------------------------------------------------------------------
// Modules

mod collections;
mod native;
mod node;
mod wrapper;
