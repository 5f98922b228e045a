use bumpalo::Bump;
use core::cell::RefCell;
use core::fmt;
use core::hash::BuildHasher;
use core::ptr;
use hashbrown::{DefaultHashBuilder, HashTable, hash_table::Entry};
use static_assertions::{assert_eq_size, assert_not_impl_any};
use tracing::{debug, trace};

use crate::Vec;
use crate::error::TypeError;
use crate::kind::TypeKind;
use crate::ty::{
    FunctionData, FunctionType, MAX_COUNT, PrimitiveType, Type, TypeData, VectorData, VectorType,
};

/// Structural description of a type, used as the uniquing key.
///
/// Nested types are compared and hashed by address; they are already
/// uniqued, so that is the same as comparing them structurally.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
enum TypeKey<'k, 'a> {
    Primitive(TypeKind),
    Function {
        inputs: &'k [&'a Type<'a>],
        results: &'k [&'a Type<'a>],
    },
    Vector {
        shape: &'k [u32],
        element: PrimitiveType<'a>,
    },
}

impl<'a> TypeKey<'a, 'a> {
    fn of(ty: &Type<'a>) -> Self {
        match ty.data() {
            TypeData::Primitive(kind) => TypeKey::Primitive(*kind),
            TypeData::Function(data) => TypeKey::Function {
                inputs: data.inputs(),
                results: data.results(),
            },
            TypeData::Vector(data) => TypeKey::Vector {
                shape: data.shape(),
                element: data.element_type(),
            },
        }
    }
}

/// Owner and uniquer of every type.
///
/// Types and their trailing payloads (argument lists, shapes) are allocated
/// in the arena passed to [`TypeContext::new`] and stay valid until that
/// arena is dropped. Structurally equal requests always return the same
/// allocation.
///
/// The context is single-writer: it is neither `Send` nor `Sync`, so all
/// construction against one context happens on the thread that owns it.
pub struct TypeContext<'a> {
    // Arena holding all types from this context.
    arena: &'a Bump,
    hasher: DefaultHashBuilder,
    interned: RefCell<HashTable<&'a Type<'a>, &'a Bump>>,
}

assert_not_impl_any!(TypeContext<'static>: Send, Sync);
assert_not_impl_any!(Type<'static>: Send, Sync);
assert_eq_size!(PrimitiveType<'static>, &Type<'static>);

impl<'a> TypeContext<'a> {
    pub fn new(arena: &'a Bump) -> &'a Self {
        arena.alloc(Self {
            arena,
            hasher: DefaultHashBuilder::default(),
            interned: RefCell::new(HashTable::new_in(arena)),
        })
    }

    /// Number of distinct types uniqued so far.
    pub fn len(&self) -> usize {
        self.interned.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `ty` was uniqued by this context.
    pub fn owns(&self, ty: &Type<'_>) -> bool {
        ptr::addr_eq(ty.context(), self)
    }

    /// Returns the canonical type for `key`, calling `build` to create its
    /// payload only when no such type exists yet.
    ///
    /// The lookup and the insertion happen under one borrow of the table.
    fn intern(
        &'a self,
        key: TypeKey<'_, 'a>,
        build: impl FnOnce(&'a Bump) -> TypeData<'a>,
    ) -> &'a Type<'a> {
        let hash = self.hasher.hash_one(key);
        let mut table = self.interned.borrow_mut();
        match table.entry(
            hash,
            |&ty| TypeKey::of(ty) == key,
            |&ty| self.hasher.hash_one(TypeKey::of(ty)),
        ) {
            Entry::Occupied(entry) => *entry.get(),
            Entry::Vacant(entry) => {
                let ty: &'a Type<'a> = self.arena.alloc(Type::new(self, build(self.arena)));
                trace!(ty = %ty, "interned new type");
                entry.insert(ty);
                ty
            }
        }
    }

    fn check_owned(&self, ty: &Type<'_>) -> Result<(), TypeError> {
        if self.owns(ty) {
            Ok(())
        } else {
            Err(TypeError::ForeignType { kind: ty.kind() })
        }
    }

    // Factory methods for types.

    pub fn try_primitive(&'a self, kind: TypeKind) -> Result<PrimitiveType<'a>, TypeError> {
        if !kind.is_primitive() {
            return Err(TypeError::NotPrimitive { kind });
        }
        let ty = self.intern(TypeKey::Primitive(kind), |_| TypeData::Primitive(kind));
        Ok(PrimitiveType { ty })
    }

    /// Returns the unique primitive type of `kind`.
    ///
    /// # Panics
    ///
    /// Panics if `kind` is a derived kind.
    #[track_caller]
    pub fn primitive(&'a self, kind: TypeKind) -> PrimitiveType<'a> {
        match self.try_primitive(kind) {
            Ok(ty) => ty,
            Err(err) => panic!("{err}"),
        }
    }

    pub fn i1(&'a self) -> PrimitiveType<'a> {
        self.primitive(TypeKind::I1)
    }
    pub fn i8(&'a self) -> PrimitiveType<'a> {
        self.primitive(TypeKind::I8)
    }
    pub fn i16(&'a self) -> PrimitiveType<'a> {
        self.primitive(TypeKind::I16)
    }
    pub fn i32(&'a self) -> PrimitiveType<'a> {
        self.primitive(TypeKind::I32)
    }
    pub fn i64(&'a self) -> PrimitiveType<'a> {
        self.primitive(TypeKind::I64)
    }
    pub fn int(&'a self) -> PrimitiveType<'a> {
        self.primitive(TypeKind::Int)
    }
    pub fn bf16(&'a self) -> PrimitiveType<'a> {
        self.primitive(TypeKind::BF16)
    }
    pub fn f16(&'a self) -> PrimitiveType<'a> {
        self.primitive(TypeKind::F16)
    }
    pub fn f32(&'a self) -> PrimitiveType<'a> {
        self.primitive(TypeKind::F32)
    }
    pub fn f64(&'a self) -> PrimitiveType<'a> {
        self.primitive(TypeKind::F64)
    }

    pub fn try_function(
        &'a self,
        inputs: &[&'a Type<'a>],
        results: &[&'a Type<'a>],
    ) -> Result<FunctionType<'a>, TypeError> {
        if inputs.len() > MAX_COUNT {
            return Err(TypeError::TooManyElements {
                what: "function input",
                len: inputs.len(),
            });
        }
        for ty in inputs.iter().chain(results) {
            self.check_owned(ty)?;
        }

        let num_inputs = inputs.len();
        let ty = self.intern(TypeKey::Function { inputs, results }, |arena| {
            // Inputs first, then results, in a single allocation.
            let inputs_and_results =
                arena.alloc_slice_fill_with(num_inputs + results.len(), |i| {
                    if i < num_inputs {
                        inputs[i]
                    } else {
                        results[i - num_inputs]
                    }
                });
            TypeData::Function(FunctionData {
                num_inputs: num_inputs as u32,
                inputs_and_results,
            })
        });
        Ok(ty.cast())
    }

    /// Returns the unique function type mapping `inputs` to `results`.
    ///
    /// # Panics
    ///
    /// Panics if there are more than [`MAX_COUNT`] inputs, or if any type
    /// belongs to another context.
    #[track_caller]
    pub fn function(
        &'a self,
        inputs: &[&'a Type<'a>],
        results: &[&'a Type<'a>],
    ) -> FunctionType<'a> {
        match self.try_function(inputs, results) {
            Ok(ty) => ty,
            Err(err) => panic!("{err}"),
        }
    }

    pub fn try_vector(
        &'a self,
        shape: &[u32],
        element: PrimitiveType<'a>,
    ) -> Result<VectorType<'a>, TypeError> {
        if shape.is_empty() {
            return Err(TypeError::EmptyShape);
        }
        if shape.len() > MAX_COUNT {
            return Err(TypeError::TooManyElements {
                what: "vector dimension",
                len: shape.len(),
            });
        }
        if let Some(index) = shape.iter().position(|&extent| extent == 0) {
            return Err(TypeError::ZeroExtent { index });
        }
        self.check_owned(element.as_type())?;

        let ty = self.intern(TypeKey::Vector { shape, element }, |arena| {
            TypeData::Vector(VectorData {
                shape: arena.alloc_slice_copy(shape),
                element,
            })
        });
        Ok(ty.cast())
    }

    /// Returns the unique vector type of `shape` with `element` items.
    ///
    /// # Panics
    ///
    /// Panics if the shape is empty, has a zero extent, has more than
    /// [`MAX_COUNT`] dimensions, or if `element` belongs to another context.
    #[track_caller]
    pub fn vector(&'a self, shape: &[u32], element: PrimitiveType<'a>) -> VectorType<'a> {
        match self.try_vector(shape, element) {
            Ok(ty) => ty,
            Err(err) => panic!("{err}"),
        }
    }

    /// Recursively copies a type from another context into this one,
    /// returning the uniqued equivalent here. Adopting a type this context
    /// already owns returns it unchanged.
    pub fn adopt(&'a self, ty: &Type<'_>) -> &'a Type<'a> {
        fn inner<'a>(this: &'a TypeContext<'a>, ty: &Type<'_>) -> &'a Type<'a> {
            match ty.data() {
                TypeData::Primitive(kind) => this.primitive(*kind).as_type(),
                TypeData::Function(data) => {
                    let inputs: Vec<&'a Type<'a>> =
                        data.inputs().iter().map(|t| inner(this, t)).collect();
                    let results: Vec<&'a Type<'a>> =
                        data.results().iter().map(|t| inner(this, t)).collect();
                    this.function(&inputs, &results).as_type()
                }
                TypeData::Vector(data) => {
                    let element = this.primitive(data.element_type().kind());
                    this.vector(data.shape(), element).as_type()
                }
            }
        }

        if !self.owns(ty) {
            debug!(ty = %ty, "adopting type from another context");
        }
        inner(self, ty)
    }
}

impl fmt::Debug for TypeContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeContext")
            .field("types", &self.len())
            .finish_non_exhaustive()
    }
}
