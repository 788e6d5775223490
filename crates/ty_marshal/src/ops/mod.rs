//! Kind-specific access traits and the runtime-built record.
//!
//! ## Menu
//!
//! ### Interface
//!
//! Sub-traits of [`Marshal`], handed out by [`ValueRef`] / [`ValueMut`]:
//!
//! - [`Composite`]: struct-like values, accessed by field index.
//! - [`Sequence`]: ordered collections (e.g. `Vec<T>`).
//! - [`Mapping`]: key/value collections (e.g. `BTreeMap<K, V>`).
//! - [`Optional`]: nullable values (e.g. `Option<T>`).
//! - [`Integer`] / [`Float`]: range-checked numeric assignment.
//!
//! ### Dynamic Type
//!
//! - [`DynamicComposite`]: a record whose fields are added at runtime. Its
//!   identity is anonymous, so its field set is never cached.
//!
//! [`Marshal`]: crate::Marshal
//! [`ValueRef`]: crate::ValueRef
//! [`ValueMut`]: crate::ValueMut

// -----------------------------------------------------------------------------
// Modules

mod composite_ops;
mod mapping_ops;
mod number_ops;
mod optional_ops;
mod sequence_ops;

// -----------------------------------------------------------------------------
// Exports

pub use composite_ops::{Composite, DynamicComposite};
pub use mapping_ops::{Mapping, MappingEntries};
pub use number_ops::{Float, Integer};
pub use optional_ops::Optional;
pub use sequence_ops::{Sequence, SequenceIter};
