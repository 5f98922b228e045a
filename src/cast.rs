//! Capability checks and downcasts from [`Type`] to its typed handles.
//!
//! Every check is answered from the kind tag alone. A failed check never
//! reinterprets the payload: [`Type::dyn_cast`] yields `None`,
//! [`Type::try_cast`] yields [`TypeError::KindMismatch`], and only
//! [`Type::cast`] treats a mismatch as a caller bug.

use crate::error::TypeError;
use crate::kind::TypeKind;
use crate::ty::{FunctionType, PrimitiveType, Type, TypeData, VectorType};

/// A typed view of one variant of [`Type`].
pub trait TypeVariant<'a>: Copy + Sized {
    /// Name of the variant used in diagnostics.
    const NAME: &'static str;

    /// Whether a type of `kind` can be viewed as `Self`.
    fn classof(kind: TypeKind) -> bool;

    /// Builds the view, or `None` if `ty` is a different variant.
    fn from_type(ty: &'a Type<'a>) -> Option<Self>;
}

impl<'a> TypeVariant<'a> for PrimitiveType<'a> {
    const NAME: &'static str = "primitive";

    fn classof(kind: TypeKind) -> bool {
        kind.is_primitive()
    }

    fn from_type(ty: &'a Type<'a>) -> Option<Self> {
        match ty.data() {
            TypeData::Primitive(_) => Some(PrimitiveType { ty }),
            _ => None,
        }
    }
}

impl<'a> TypeVariant<'a> for FunctionType<'a> {
    const NAME: &'static str = "function";

    fn classof(kind: TypeKind) -> bool {
        kind == TypeKind::Function
    }

    fn from_type(ty: &'a Type<'a>) -> Option<Self> {
        match ty.data() {
            TypeData::Function(data) => Some(FunctionType { ty, data }),
            _ => None,
        }
    }
}

impl<'a> TypeVariant<'a> for VectorType<'a> {
    const NAME: &'static str = "vector";

    fn classof(kind: TypeKind) -> bool {
        kind == TypeKind::Vector
    }

    fn from_type(ty: &'a Type<'a>) -> Option<Self> {
        match ty.data() {
            TypeData::Vector(data) => Some(VectorType { ty, data }),
            _ => None,
        }
    }
}

impl<'a> Type<'a> {
    pub fn isa<V: TypeVariant<'a>>(&self) -> bool {
        V::classof(self.kind())
    }

    pub fn dyn_cast<V: TypeVariant<'a>>(&'a self) -> Option<V> {
        V::from_type(self)
    }

    pub fn try_cast<V: TypeVariant<'a>>(&'a self) -> Result<V, TypeError> {
        V::from_type(self).ok_or(TypeError::KindMismatch {
            expected: V::NAME,
            found: self.kind(),
        })
    }

    /// Views this type as `V`.
    ///
    /// # Panics
    ///
    /// Panics if this type is not a `V`; use [`Type::dyn_cast`] when the
    /// variant is not known in advance.
    #[track_caller]
    pub fn cast<V: TypeVariant<'a>>(&'a self) -> V {
        match self.try_cast() {
            Ok(view) => view,
            Err(err) => panic!("invalid cast of `{self}`: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TypeContext;
    use bumpalo::Bump;

    #[test]
    fn test_isa_agrees_with_dyn_cast() {
        let arena = Bump::new();
        let ctx = TypeContext::new(&arena);

        let f32 = ctx.f32();
        let func = ctx.function(&[f32.as_type()], &[]);
        let vec = ctx.vector(&[8], f32);

        for ty in [f32.as_type(), func.as_type(), vec.as_type()] {
            assert_eq!(
                ty.isa::<PrimitiveType>(),
                ty.dyn_cast::<PrimitiveType>().is_some()
            );
            assert_eq!(
                ty.isa::<FunctionType>(),
                ty.dyn_cast::<FunctionType>().is_some()
            );
            assert_eq!(ty.isa::<VectorType>(), ty.dyn_cast::<VectorType>().is_some());
        }
    }

    #[test]
    fn test_dyn_cast_returns_same_handle() {
        let arena = Bump::new();
        let ctx = TypeContext::new(&arena);

        let func = ctx.function(&[ctx.i32().as_type()], &[ctx.i64().as_type()]);
        let ty: &Type = func.as_type();

        assert_eq!(ty.dyn_cast::<FunctionType>(), Some(func));
        assert_eq!(ty.dyn_cast::<VectorType>(), None);
        assert_eq!(ty.dyn_cast::<PrimitiveType>(), None);
    }

    #[test]
    fn test_try_cast_reports_mismatch() {
        let arena = Bump::new();
        let ctx = TypeContext::new(&arena);

        let func = ctx.function(&[], &[]);
        let err = func.as_type().try_cast::<VectorType>().unwrap_err();
        assert_eq!(
            err,
            TypeError::KindMismatch {
                expected: "vector",
                found: TypeKind::Function,
            }
        );
    }

    #[test]
    #[should_panic(expected = "invalid cast of `i1`: expected function type, found `i1`")]
    fn test_cast_panics_on_mismatch() {
        let arena = Bump::new();
        let ctx = TypeContext::new(&arena);

        let _ = ctx.i1().as_type().cast::<FunctionType>();
    }
}
