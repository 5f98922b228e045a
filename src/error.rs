use crate::kind::TypeKind;
use crate::ty::MAX_COUNT;

/// Reasons a type request or downcast cannot be satisfied.
///
/// The checked entry points (`try_*` on the context, [`Type::try_cast`])
/// return these. The plain entry points treat them as contract violations
/// and panic with the same message.
///
/// [`Type::try_cast`]: crate::Type::try_cast
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TypeError {
    #[error("expected {expected} type, found `{found}`")]
    KindMismatch {
        expected: &'static str,
        found: TypeKind,
    },

    #[error("{what} count {len} exceeds the maximum of {max}", max = MAX_COUNT)]
    TooManyElements { what: &'static str, len: usize },

    #[error("vector type must have at least one dimension")]
    EmptyShape,

    #[error("vector dimension {index} has zero extent")]
    ZeroExtent { index: usize },

    #[error("`{kind}` is not a primitive type kind")]
    NotPrimitive { kind: TypeKind },

    #[error("`{kind}` type belongs to a different context")]
    ForeignType { kind: TypeKind },
}
