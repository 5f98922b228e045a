//! Immutable, uniqued types for an IR.
//!
//! A [`TypeContext`] owns every type and hands out lightweight handles.
//! Asking for the same type twice, from anywhere, yields the same handle, so
//! type equality is pointer equality.
//!
//! # Example
//!
//! ```
//! use bumpalo::Bump;
//! use ir_types::TypeContext;
//!
//! let arena = Bump::new();
//! let ctx = TypeContext::new(&arena);
//!
//! let i32 = ctx.i32().as_type();
//! let binop = ctx.function(&[i32, i32], &[ctx.i64().as_type()]);
//! assert_eq!(binop, ctx.function(&[i32, i32], &[ctx.i64().as_type()]));
//!
//! let v = ctx.vector(&[4, 4], ctx.f32());
//! assert_eq!(v.to_string(), "vector<4x4xf32>");
//! ```

#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]

extern crate alloc;

#[allow(unused_imports)]
pub(crate) use alloc::vec::Vec;

pub mod cast;
pub mod context;
pub mod display;
pub mod error;
pub mod kind;
pub mod ty;


pub use cast::TypeVariant;
pub use context::TypeContext;
pub use error::TypeError;
pub use kind::TypeKind;
pub use ty::{
    FunctionData, FunctionType, MAX_COUNT, PrimitiveType, Type, TypeData, VectorData, VectorType,
};

/// Logging helpers for this crate's tests.
#[cfg(test)]
pub mod test_utils {
    /// Installs a test-writer subscriber so the context's `trace!` events
    /// show up in captured test output: one per newly interned type, plus a
    /// `debug!` whenever a type is adopted from another context.
    ///
    /// The filter defaults to `trace` and can be narrowed with `RUST_LOG`,
    /// e.g. `RUST_LOG=ir_types::context=debug` to see adoptions only.
    ///
    /// # Example
    /// ```ignore
    /// #[test]
    /// fn test_adopt_rebuilds_structure() {
    ///     test_utils::init_test_logging();
    ///     // ... build types; each new one logs "interned new type"
    /// }
    /// ```
    pub fn init_test_logging() {
        use tracing_subscriber::{EnvFilter, fmt};

        // Try to initialize, ignore error if already initialized
        let _ = fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trace")),
            )
            .with_test_writer()
            .try_init();
    }
}
