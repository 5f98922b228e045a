//! Type header, variant payloads and typed handles.
//!
//! A [`Type`] is only ever created by a [`TypeContext`], lives in the
//! context's arena, and is never mutated afterwards. Because the context
//! uniques every type, two handles compare equal exactly when they point to
//! the same allocation, so `PartialEq` and `Hash` are address based.

use core::hash::{Hash, Hasher};
use core::ops::Deref;
use core::{fmt, ptr};

use crate::context::TypeContext;
use crate::kind::TypeKind;

/// Largest function arity or vector rank a type can record.
///
/// Counts are kept within 24 bits; requests above this are rejected.
pub const MAX_COUNT: usize = (1 << 24) - 1;

/// An immutable, uniqued type owned by a [`TypeContext`].
pub struct Type<'a> {
    context: &'a TypeContext<'a>,
    data: TypeData<'a>,
}

/// Variant-specific payload of a [`Type`].
#[derive(Clone, Copy, Debug)]
pub enum TypeData<'a> {
    Primitive(TypeKind),
    Function(FunctionData<'a>),
    Vector(VectorData<'a>),
}

/// Inputs and results of a function type, stored back to back in one
/// arena slice. The first `num_inputs` entries are the inputs.
#[derive(Clone, Copy, Debug)]
pub struct FunctionData<'a> {
    pub(crate) num_inputs: u32,
    pub(crate) inputs_and_results: &'a [&'a Type<'a>],
}

impl<'a> FunctionData<'a> {
    pub fn inputs(&self) -> &'a [&'a Type<'a>] {
        &self.inputs_and_results[..self.num_inputs as usize]
    }

    pub fn results(&self) -> &'a [&'a Type<'a>] {
        &self.inputs_and_results[self.num_inputs as usize..]
    }
}

/// Shape and element type of a vector type.
#[derive(Clone, Copy, Debug)]
pub struct VectorData<'a> {
    pub(crate) shape: &'a [u32],
    pub(crate) element: PrimitiveType<'a>,
}

impl<'a> VectorData<'a> {
    pub fn shape(&self) -> &'a [u32] {
        self.shape
    }

    pub fn element_type(&self) -> PrimitiveType<'a> {
        self.element
    }
}

impl<'a> Type<'a> {
    pub(crate) fn new(context: &'a TypeContext<'a>, data: TypeData<'a>) -> Self {
        Self { context, data }
    }

    /// Return the classification for this type.
    pub fn kind(&self) -> TypeKind {
        match self.data {
            TypeData::Primitive(kind) => kind,
            TypeData::Function(_) => TypeKind::Function,
            TypeData::Vector(_) => TypeKind::Vector,
        }
    }

    /// Return true if this type is the specified kind.
    pub fn is(&self, kind: TypeKind) -> bool {
        self.kind() == kind
    }

    /// The context in which this type was uniqued.
    pub fn context(&self) -> &'a TypeContext<'a> {
        self.context
    }

    pub fn data(&self) -> &TypeData<'a> {
        &self.data
    }

    pub fn is_primitive(&self) -> bool {
        self.kind().is_primitive()
    }

    pub fn is_function(&self) -> bool {
        self.is(TypeKind::Function)
    }

    pub fn is_vector(&self) -> bool {
        self.is(TypeKind::Vector)
    }
}

impl PartialEq for Type<'_> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self, other)
    }
}

impl Eq for Type<'_> {}

impl Hash for Type<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        ptr::hash(self, state)
    }
}

impl fmt::Debug for Type<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Type({self})")
    }
}

/// Handle to a primitive type. Vector element types are statically
/// restricted to this handle.
#[derive(Clone, Copy)]
pub struct PrimitiveType<'a> {
    pub(crate) ty: &'a Type<'a>,
}

/// Handle to a function type.
#[derive(Clone, Copy)]
pub struct FunctionType<'a> {
    pub(crate) ty: &'a Type<'a>,
    pub(crate) data: &'a FunctionData<'a>,
}

/// Handle to a vector type.
#[derive(Clone, Copy)]
pub struct VectorType<'a> {
    pub(crate) ty: &'a Type<'a>,
    pub(crate) data: &'a VectorData<'a>,
}

impl<'a> PrimitiveType<'a> {
    pub fn kind(self) -> TypeKind {
        self.ty.kind()
    }
}

impl<'a> FunctionType<'a> {
    pub fn inputs(self) -> &'a [&'a Type<'a>] {
        self.data.inputs()
    }

    pub fn results(self) -> &'a [&'a Type<'a>] {
        self.data.results()
    }
}

impl<'a> VectorType<'a> {
    pub fn shape(self) -> &'a [u32] {
        self.data.shape()
    }

    pub fn element_type(self) -> PrimitiveType<'a> {
        self.data.element_type()
    }

    pub fn rank(self) -> usize {
        self.data.shape.len()
    }

    /// Total number of elements, the product of all extents.
    ///
    /// Returns `None` if the count does not fit in a `u64`.
    pub fn num_elements(self) -> Option<u64> {
        self.data
            .shape
            .iter()
            .try_fold(1u64, |acc, &extent| acc.checked_mul(u64::from(extent)))
    }
}

macro_rules! impl_handle {
    ($handle:ident) => {
        impl<'a> $handle<'a> {
            /// The underlying type, valid for the lifetime of its context.
            pub fn as_type(self) -> &'a Type<'a> {
                self.ty
            }
        }

        impl<'a> Deref for $handle<'a> {
            type Target = Type<'a>;

            fn deref(&self) -> &Type<'a> {
                self.ty
            }
        }

        impl<'a> From<$handle<'a>> for &'a Type<'a> {
            fn from(handle: $handle<'a>) -> Self {
                handle.ty
            }
        }

        impl PartialEq for $handle<'_> {
            fn eq(&self, other: &Self) -> bool {
                ptr::eq(self.ty, other.ty)
            }
        }

        impl Eq for $handle<'_> {}

        impl Hash for $handle<'_> {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.ty.hash(state)
            }
        }

        impl fmt::Debug for $handle<'_> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($handle), "({})"), self.ty)
            }
        }

        impl fmt::Display for $handle<'_> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(self.ty, f)
            }
        }
    };
}

impl_handle!(PrimitiveType);
impl_handle!(FunctionType);
impl_handle!(VectorType);
