//! Procedural macros for `regroup`.
//!
//! # Regroup Derive
//!
//! `#[derive(Regroup)]` generates the field walk that binds a match's named
//! groups into a struct:
//!
//! ```text
//! #[derive(Regroup, Default)]
//! pub struct Request {
//!     #[regroup("method,required")]
//!     pub method: String,
//!     #[regroup("status")]
//!     pub status: Option<u16>,
//!     pub timing: Timing,
//!     #[regroup(skip)]
//!     pub raw: Vec<u8>,
//! }
//! ```
//!
//! This implements `regroup::Fill` (bind each field in declaration order) and
//! `regroup::Bind` (treat the struct as a record when nested in another).

mod regroup;
mod utils;

use proc_macro::TokenStream;

/// Derive macro binding regex capture groups to struct fields.
///
/// # Field attributes
///
/// - `#[regroup("group[,option...]")]` - Bind the field to `group`. Options:
///   `required`, `exists`, or a timestamp layout.
/// - `#[regroup(skip)]` - Never bind the field; fresh copies use
///   `Default::default()` for it.
/// - no attribute - Nested records are still filled; other fields are left
///   alone.
///
/// Every field that is not skipped must implement `regroup::Bind`, including
/// untagged ones: an untagged field of a type outside the binder's vocabulary
/// (a `Vec<u8>`, a `HashMap`, a handle) does not compile until it is marked
/// `#[regroup(skip)]`.
#[proc_macro_derive(Regroup, attributes(regroup))]
pub fn derive_regroup(input: TokenStream) -> TokenStream {
    regroup::derive_regroup(input)
}
