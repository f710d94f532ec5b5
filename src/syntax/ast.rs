//! AST definitions for Mica expressions and type specifiers.
//!
//! Nodes are closed sum types built through one constructor per variant;
//! construction allocates and populates fields, nothing more. Each parent
//! exclusively owns its children (`Box`/[`Buf`]), so a tree has no sharing
//! and no cycles and drops as a unit.
//!
//! [`print_expr`] renders a tree in a fully parenthesized prefix form, e.g.
//! `(- (- 1 2) 3)`. The output is deterministic given the tree and serves
//! as the test oracle for the parser.

use crate::buf::Buf;
use crate::syntax::intern::{Interner, Name};

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    // Comparison
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    // Logical
    And,
    Or,
    // Bitwise
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,
}

impl BinOp {
    /// Canonical source symbol, used by the printer.
    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Mod => "%",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
            BinOp::Lt => "<",
            BinOp::Le => "<=",
            BinOp::Gt => ">",
            BinOp::Ge => ">=",
            BinOp::And => "&&",
            BinOp::Or => "||",
            BinOp::BitAnd => "&",
            BinOp::BitOr => "|",
            BinOp::BitXor => "^",
            BinOp::Shl => "<<",
            BinOp::Shr => ">>",
        }
    }
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    Neg,    // -x
    Plus,   // +x
    Not,    // !x
    BitNot, // ~x
}

impl UnOp {
    pub fn symbol(self) -> &'static str {
        match self {
            UnOp::Neg => "-",
            UnOp::Plus => "+",
            UnOp::Not => "!",
            UnOp::BitNot => "~",
        }
    }
}

/// Expression tree node.
#[derive(Debug, Clone)]
pub enum Expr {
    Int(u64),
    Float(f64),
    Str(String),
    Name(Name),
    Cast {
        ty: Box<Typespec>,
        expr: Box<Expr>,
    },
    Call {
        callee: Box<Expr>,
        args: Buf<Expr>,
    },
    Index {
        base: Box<Expr>,
        index: Box<Expr>,
    },
    Field {
        base: Box<Expr>,
        field: Name,
    },
    Compound {
        ty: Box<Typespec>,
        args: Buf<Expr>,
    },
    Unary {
        op: UnOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Ternary {
        cond: Box<Expr>,
        then_expr: Box<Expr>,
        else_expr: Box<Expr>,
    },
}

impl Expr {
    pub fn int(value: u64) -> Expr {
        Expr::Int(value)
    }

    pub fn float(value: f64) -> Expr {
        Expr::Float(value)
    }

    pub fn str(value: String) -> Expr {
        Expr::Str(value)
    }

    pub fn name(name: Name) -> Expr {
        Expr::Name(name)
    }

    pub fn cast(ty: Typespec, expr: Expr) -> Expr {
        Expr::Cast {
            ty: Box::new(ty),
            expr: Box::new(expr),
        }
    }

    pub fn call(callee: Expr, args: Buf<Expr>) -> Expr {
        Expr::Call {
            callee: Box::new(callee),
            args,
        }
    }

    pub fn index(base: Expr, index: Expr) -> Expr {
        Expr::Index {
            base: Box::new(base),
            index: Box::new(index),
        }
    }

    pub fn field(base: Expr, field: Name) -> Expr {
        Expr::Field {
            base: Box::new(base),
            field,
        }
    }

    pub fn compound(ty: Typespec, args: Buf<Expr>) -> Expr {
        Expr::Compound {
            ty: Box::new(ty),
            args,
        }
    }

    pub fn unary(op: UnOp, operand: Expr) -> Expr {
        Expr::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn binary(op: BinOp, left: Expr, right: Expr) -> Expr {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn ternary(cond: Expr, then_expr: Expr, else_expr: Expr) -> Expr {
        Expr::Ternary {
            cond: Box::new(cond),
            then_expr: Box::new(then_expr),
            else_expr: Box::new(else_expr),
        }
    }
}

/// Type specifier tree node.
#[derive(Debug, Clone)]
pub enum Typespec {
    Name(Name),
    Pointer {
        base: Box<Typespec>,
    },
    Array {
        base: Box<Typespec>,
        size: Box<Expr>,
    },
    Func {
        params: Buf<Typespec>,
        ret: Box<Typespec>,
    },
}

impl Typespec {
    pub fn name(name: Name) -> Typespec {
        Typespec::Name(name)
    }

    pub fn pointer(base: Typespec) -> Typespec {
        Typespec::Pointer {
            base: Box::new(base),
        }
    }

    pub fn array(base: Typespec, size: Expr) -> Typespec {
        Typespec::Array {
            base: Box::new(base),
            size: Box::new(size),
        }
    }

    pub fn func(params: Buf<Typespec>, ret: Typespec) -> Typespec {
        Typespec::Func {
            params,
            ret: Box::new(ret),
        }
    }
}

/// Render an expression in canonical prefix form.
pub fn print_expr(expr: &Expr, interner: &Interner) -> String {
    let mut out = String::new();
    write_expr(&mut out, expr, interner);
    out
}

/// Render a type specifier in canonical prefix form.
pub fn print_typespec(ty: &Typespec, interner: &Interner) -> String {
    let mut out = String::new();
    write_typespec(&mut out, ty, interner);
    out
}

fn write_expr(out: &mut String, expr: &Expr, interner: &Interner) {
    match expr {
        Expr::Int(value) => out.push_str(&value.to_string()),
        Expr::Float(value) => out.push_str(&value.to_string()),
        Expr::Str(value) => {
            out.push('"');
            out.push_str(value);
            out.push('"');
        }
        Expr::Name(name) => out.push_str(interner.resolve(*name)),
        Expr::Cast { ty, expr } => {
            out.push_str("(cast ");
            write_typespec(out, ty, interner);
            out.push(' ');
            write_expr(out, expr, interner);
            out.push(')');
        }
        Expr::Call { callee, args } => {
            out.push('(');
            write_expr(out, callee, interner);
            for arg in args {
                out.push(' ');
                write_expr(out, arg, interner);
            }
            out.push(')');
        }
        Expr::Index { base, index } => {
            out.push_str("(index ");
            write_expr(out, base, interner);
            out.push(' ');
            write_expr(out, index, interner);
            out.push(')');
        }
        Expr::Field { base, field } => {
            out.push_str("(field ");
            write_expr(out, base, interner);
            out.push(' ');
            out.push_str(interner.resolve(*field));
            out.push(')');
        }
        Expr::Compound { ty, args } => {
            out.push_str("(compound ");
            write_typespec(out, ty, interner);
            for arg in args {
                out.push(' ');
                write_expr(out, arg, interner);
            }
            out.push(')');
        }
        Expr::Unary { op, operand } => {
            out.push('(');
            out.push_str(op.symbol());
            out.push(' ');
            write_expr(out, operand, interner);
            out.push(')');
        }
        Expr::Binary { op, left, right } => {
            out.push('(');
            out.push_str(op.symbol());
            out.push(' ');
            write_expr(out, left, interner);
            out.push(' ');
            write_expr(out, right, interner);
            out.push(')');
        }
        Expr::Ternary {
            cond,
            then_expr,
            else_expr,
        } => {
            out.push_str("(if ");
            write_expr(out, cond, interner);
            out.push(' ');
            write_expr(out, then_expr, interner);
            out.push(' ');
            write_expr(out, else_expr, interner);
            out.push(')');
        }
    }
}

fn write_typespec(out: &mut String, ty: &Typespec, interner: &Interner) {
    match ty {
        Typespec::Name(name) => out.push_str(interner.resolve(*name)),
        Typespec::Pointer { base } => {
            out.push_str("(ptr ");
            write_typespec(out, base, interner);
            out.push(')');
        }
        Typespec::Array { base, size } => {
            out.push_str("(array ");
            write_typespec(out, base, interner);
            out.push(' ');
            write_expr(out, size, interner);
            out.push(')');
        }
        Typespec::Func { params, ret } => {
            out.push_str("(func (");
            for (i, param) in params.iter().enumerate() {
                if i > 0 {
                    out.push(' ');
                }
                write_typespec(out, param, interner);
            }
            out.push_str(") ");
            write_typespec(out, ret, interner);
            out.push(')');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_binary() {
        let interner = Interner::new();
        let expr = Expr::binary(BinOp::Add, Expr::int(1), Expr::int(2));
        assert_eq!(print_expr(&expr, &interner), "(+ 1 2)");
    }

    #[test]
    fn test_print_nested_binary() {
        let interner = Interner::new();
        let expr = Expr::binary(
            BinOp::Sub,
            Expr::binary(BinOp::Sub, Expr::int(1), Expr::int(2)),
            Expr::int(3),
        );
        assert_eq!(print_expr(&expr, &interner), "(- (- 1 2) 3)");
    }

    #[test]
    fn test_print_unary_and_float() {
        let interner = Interner::new();
        let expr = Expr::unary(UnOp::Neg, Expr::float(3.14));
        assert_eq!(print_expr(&expr, &interner), "(- 3.14)");
    }

    #[test]
    fn test_print_call_and_field() {
        let mut interner = Interner::new();
        let fact = interner.intern("fact");
        let cap = interner.intern("cap");

        let mut args = Buf::new();
        args.push(Expr::int(10));
        let call = Expr::call(Expr::name(fact), args);
        assert_eq!(print_expr(&call, &interner), "(fact 10)");

        let field = Expr::field(Expr::name(fact), cap);
        assert_eq!(print_expr(&field, &interner), "(field fact cap)");
    }

    #[test]
    fn test_print_index_and_ternary() {
        let mut interner = Interner::new();
        let xs = interner.intern("xs");

        let expr = Expr::ternary(
            Expr::index(Expr::name(xs), Expr::int(0)),
            Expr::int(1),
            Expr::int(2),
        );
        assert_eq!(print_expr(&expr, &interner), "(if (index xs 0) 1 2)");
    }

    #[test]
    fn test_print_cast_and_compound() {
        let mut interner = Interner::new();
        let int_name = interner.intern("int");
        let vec_name = interner.intern("Vec");

        let cast = Expr::cast(
            Typespec::pointer(Typespec::name(int_name)),
            Expr::int(0),
        );
        assert_eq!(print_expr(&cast, &interner), "(cast (ptr int) 0)");

        let mut args = Buf::new();
        args.push(Expr::int(1));
        args.push(Expr::int(2));
        let compound = Expr::compound(Typespec::name(vec_name), args);
        assert_eq!(print_expr(&compound, &interner), "(compound Vec 1 2)");
    }

    #[test]
    fn test_print_typespecs() {
        let mut interner = Interner::new();
        let int_name = interner.intern("int");
        let char_name = interner.intern("char");

        let array = Typespec::array(Typespec::name(int_name), Expr::int(16));
        assert_eq!(print_typespec(&array, &interner), "(array int 16)");

        let mut params = Buf::new();
        params.push(Typespec::name(int_name));
        params.push(Typespec::pointer(Typespec::name(char_name)));
        let func = Typespec::func(params, Typespec::name(int_name));
        assert_eq!(
            print_typespec(&func, &interner),
            "(func (int (ptr char)) int)"
        );
    }

    #[test]
    fn test_print_string_literal() {
        let interner = Interner::new();
        let expr = Expr::str(String::from("hello"));
        assert_eq!(print_expr(&expr, &interner), "\"hello\"");
    }
}
