//! Kind tags for every type in the IR.
//!
//! All primitive kinds are declared before the derived kinds, so classifying
//! a kind as primitive is a single comparison against
//! [`TypeKind::LAST_PRIMITIVE`].

use core::fmt;

/// Classification of a type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum TypeKind {
    // Integer.
    I1,
    I8,
    I16,
    I32,
    I64,

    /// Target pointer sized integer.
    Int,

    // Floating point.
    BF16,
    F16,
    F32,
    F64,

    // Derived types.
    Function,
    Vector,
}

impl TypeKind {
    /// The last primitive kind in declaration order.
    pub const LAST_PRIMITIVE: TypeKind = TypeKind::F64;

    /// All primitive kinds, in declaration order.
    pub const PRIMITIVES: [TypeKind; 10] = [
        TypeKind::I1,
        TypeKind::I8,
        TypeKind::I16,
        TypeKind::I32,
        TypeKind::I64,
        TypeKind::Int,
        TypeKind::BF16,
        TypeKind::F16,
        TypeKind::F32,
        TypeKind::F64,
    ];

    /// Returns true for the scalar leaf kinds.
    pub fn is_primitive(self) -> bool {
        self <= Self::LAST_PRIMITIVE
    }

    /// Returns true for the fixed-width integers and the pointer sized `Int`.
    pub fn is_integer(self) -> bool {
        self <= TypeKind::Int
    }

    pub fn is_float(self) -> bool {
        matches!(
            self,
            TypeKind::BF16 | TypeKind::F16 | TypeKind::F32 | TypeKind::F64
        )
    }

    /// Width in bits of a primitive kind.
    ///
    /// Returns `None` for the target-dependent `Int` and for derived kinds.
    pub fn bit_width(self) -> Option<u32> {
        match self {
            TypeKind::I1 => Some(1),
            TypeKind::I8 => Some(8),
            TypeKind::I16 | TypeKind::BF16 | TypeKind::F16 => Some(16),
            TypeKind::I32 | TypeKind::F32 => Some(32),
            TypeKind::I64 | TypeKind::F64 => Some(64),
            TypeKind::Int | TypeKind::Function | TypeKind::Vector => None,
        }
    }

    /// Keyword used when printing the kind.
    pub fn name(self) -> &'static str {
        match self {
            TypeKind::I1 => "i1",
            TypeKind::I8 => "i8",
            TypeKind::I16 => "i16",
            TypeKind::I32 => "i32",
            TypeKind::I64 => "i64",
            TypeKind::Int => "int",
            TypeKind::BF16 => "bf16",
            TypeKind::F16 => "f16",
            TypeKind::F32 => "f32",
            TypeKind::F64 => "f64",
            TypeKind::Function => "function",
            TypeKind::Vector => "vector",
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitives_precede_derived_kinds() {
        for kind in TypeKind::PRIMITIVES {
            assert!(kind.is_primitive(), "{kind} should be primitive");
            assert!(kind < TypeKind::Function);
            assert!(kind < TypeKind::Vector);
        }
        assert!(!TypeKind::Function.is_primitive());
        assert!(!TypeKind::Vector.is_primitive());
    }

    #[test]
    fn test_integer_and_float_classes_partition_primitives() {
        for kind in TypeKind::PRIMITIVES {
            assert_ne!(kind.is_integer(), kind.is_float(), "{kind}");
        }
        assert!(!TypeKind::Function.is_integer());
        assert!(!TypeKind::Vector.is_float());
    }

    #[test]
    fn test_bit_width() {
        assert_eq!(TypeKind::I1.bit_width(), Some(1));
        assert_eq!(TypeKind::BF16.bit_width(), Some(16));
        assert_eq!(TypeKind::F64.bit_width(), Some(64));
        assert_eq!(TypeKind::Int.bit_width(), None);
        assert_eq!(TypeKind::Function.bit_width(), None);
    }
}
