//! Printing of types.
//!
//! Primitives print as their keyword (`i32`, `bf16`, `int`), functions as
//! `(i32, i32) -> i64`, and vectors as `vector<4x4xf32>`. A function's
//! results are parenthesised unless there is exactly one result that is not
//! itself a function.

use core::fmt::{self, Write};

use crate::ty::{Type, TypeData};

fn write_list(f: &mut impl Write, types: &[&Type<'_>]) -> fmt::Result {
    f.write_char('(')?;
    for (i, ty) in types.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{ty}")?;
    }
    f.write_char(')')
}

impl Type<'_> {
    /// Print the type to `out`.
    pub fn print(&self, out: &mut impl Write) -> fmt::Result {
        match self.data() {
            TypeData::Primitive(kind) => out.write_str(kind.name()),
            TypeData::Function(data) => {
                write_list(out, data.inputs())?;
                out.write_str(" -> ")?;
                match data.results() {
                    [result] if !result.is_function() => result.print(out),
                    results => write_list(out, results),
                }
            }
            TypeData::Vector(data) => {
                out.write_str("vector<")?;
                for extent in data.shape() {
                    write!(out, "{extent}x")?;
                }
                write!(out, "{}>", data.element_type())
            }
        }
    }

    /// Print the type to stderr.
    #[cfg(feature = "std")]
    pub fn dump(&self) {
        std::eprintln!("{self}");
    }
}

impl fmt::Display for Type<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.print(f)
    }
}

#[cfg(test)]
mod tests {
    use crate::{TypeContext, TypeKind};
    use alloc::string::{String, ToString};
    use bumpalo::Bump;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_display_primitives() {
        let arena = Bump::new();
        let ctx = TypeContext::new(&arena);

        let names: Vec<String> = TypeKind::PRIMITIVES
            .iter()
            .map(|&kind| ctx.primitive(kind).to_string())
            .collect();
        assert_eq!(
            names,
            ["i1", "i8", "i16", "i32", "i64", "int", "bf16", "f16", "f32", "f64"]
        );
    }

    #[test]
    fn test_display_functions() {
        let arena = Bump::new();
        let ctx = TypeContext::new(&arena);
        let i32 = ctx.i32().as_type();
        let i64 = ctx.i64().as_type();
        let i1 = ctx.i1().as_type();

        assert_eq!(ctx.function(&[], &[]).to_string(), "() -> ()");
        assert_eq!(ctx.function(&[i32, i32], &[i64]).to_string(), "(i32, i32) -> i64");
        assert_eq!(
            ctx.function(&[i32], &[i64, i1]).to_string(),
            "(i32) -> (i64, i1)"
        );

        let inner = ctx.function(&[i32], &[i64]).as_type();
        assert_eq!(
            ctx.function(&[inner], &[inner]).to_string(),
            "((i32) -> i64) -> ((i32) -> i64)"
        );
    }

    #[test]
    fn test_display_vectors() {
        let arena = Bump::new();
        let ctx = TypeContext::new(&arena);

        assert_eq!(ctx.vector(&[4, 4], ctx.f32()).to_string(), "vector<4x4xf32>");
        assert_eq!(ctx.vector(&[16], ctx.bf16()).to_string(), "vector<16xbf16>");

        let vec = ctx.vector(&[2, 3, 5], ctx.i8()).as_type();
        let func = ctx.function(&[vec], &[vec]);
        assert_eq!(
            func.to_string(),
            "(vector<2x3x5xi8>) -> vector<2x3x5xi8>"
        );
    }

    #[test]
    fn test_print_to_sink_matches_display() {
        let arena = Bump::new();
        let ctx = TypeContext::new(&arena);
        let func = ctx.function(&[ctx.f16().as_type()], &[ctx.int().as_type()]);

        let mut out = String::new();
        func.print(&mut out).unwrap();
        assert_eq!(out, func.to_string());
        assert_eq!(format!("{func:?}"), "FunctionType((f16) -> int)");
    }
}
