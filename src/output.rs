//! Rendering of expression trees.
//!
//! Two forms are supported:
//!
//! - **JSON** via [`to_json()`] / [`to_json_pretty()`] - the `_type`-tagged
//!   protocol the evaluator consumes
//! - **Pure text** via [`to_pure()`] - a compact, human-readable rendering
//!   for logs and the command line
//!
//! # Examples
//!
//! ```
//! use tds_lambda::Expression;
//! use tds_lambda::output::{to_json, to_pure};
//!
//! let expr = Expression::function("asc", vec![Expression::string("trader")]);
//!
//! assert_eq!(to_pure(&expr), "asc('trader')");
//! assert_eq!(
//!     to_json(&expr).unwrap(),
//!     r#"{"_type":"func","function":"asc","parameters":[{"_type":"string","value":"trader"}]}"#
//! );
//! ```

use crate::ast::{Expression, Lambda, Literal};

pub struct PurePrinter {
    pretty: bool,
}

impl PurePrinter {
    pub fn new(pretty: bool) -> Self {
        PurePrinter { pretty }
    }

    pub fn print(&self, expr: &Expression) -> String {
        self.print_expression(expr, 0)
    }

    fn print_expression(&self, expr: &Expression, indent: usize) -> String {
        match expr {
            Expression::Variable(v) => format!("${}", v.name),
            Expression::Literal(literal) => self.print_literal(literal),
            Expression::Property(p) => match p.parameters.split_first() {
                Some((owner, args)) => format!(
                    "{}.{}({})",
                    self.print_expression(owner, indent),
                    p.property,
                    self.print_inline(args, indent)
                ),
                None => p.property.clone(),
            },
            Expression::Function(f) => {
                format!("{}({})", f.function, self.print_arguments(&f.parameters, indent))
            }
            Expression::Lambda(l) => self.print_lambda(l, indent),
            Expression::Collection(c) => {
                format!("[{}]", self.print_arguments(&c.values, indent))
            }
        }
    }

    fn print_literal(&self, literal: &Literal) -> String {
        match literal {
            Literal::String(s) => format!("'{}'", self.escape_string(s)),
            Literal::Boolean(b) => b.to_string(),
            Literal::Decimal(d) => format!("{}D", d),
            Literal::Integer(n) => n.to_string(),
            Literal::Float(n) => {
                // Keep a decimal point so the value still reads as a float
                if n.fract() == 0.0 && n.is_finite() {
                    format!("{:.1}", n)
                } else {
                    n.to_string()
                }
            }
            Literal::DateTime(s) | Literal::StrictDate(s) => format!("%{}", s),
            Literal::Null(_) => "[]".to_string(),
        }
    }

    fn print_lambda(&self, lambda: &Lambda, indent: usize) -> String {
        let params: Vec<&str> = lambda.parameters.iter().map(|p| p.name.as_str()).collect();
        let body: Vec<String> = lambda
            .body
            .iter()
            .map(|e| self.print_expression(e, indent))
            .collect();
        format!("{{{}|{}}}", params.join(", "), body.join("; "))
    }

    /// Arguments of a function or collection; one per line when pretty
    fn print_arguments(&self, args: &[Expression], indent: usize) -> String {
        if !self.pretty || args.len() < 2 {
            return self.print_inline(args, indent);
        }

        let items: Vec<String> = args
            .iter()
            .map(|a| {
                format!(
                    "{}{}",
                    self.indent(indent + 1),
                    self.print_expression(a, indent + 1)
                )
            })
            .collect();
        format!("\n{}\n{}", items.join(",\n"), self.indent(indent))
    }

    fn print_inline(&self, args: &[Expression], indent: usize) -> String {
        let items: Vec<String> = args
            .iter()
            .map(|a| self.print_expression(a, indent))
            .collect();
        items.join(", ")
    }

    fn indent(&self, level: usize) -> String {
        "  ".repeat(level)
    }

    fn escape_string(&self, s: &str) -> String {
        s.chars()
            .flat_map(|c| match c {
                '\'' => vec!['\\', '\''],
                '\\' => vec!['\\', '\\'],
                '\n' => vec!['\\', 'n'],
                '\r' => vec!['\\', 'r'],
                '\t' => vec!['\\', 't'],
                c => vec![c],
            })
            .collect()
    }
}

// Convenience functions

/// Renders an expression as single-line Pure text.
///
/// ```
/// use tds_lambda::{Expression, Literal};
/// use tds_lambda::output::to_pure;
///
/// let expr = Expression::function(
///     "greaterThan",
///     vec![Expression::var("qty"), Expression::literal(Literal::Integer(10))],
/// );
/// assert_eq!(to_pure(&expr), "greaterThan($qty, 10)");
/// ```
pub fn to_pure(expr: &Expression) -> String {
    PurePrinter::new(false).print(expr)
}

/// Renders an expression as Pure text, one argument per line.
pub fn to_pure_pretty(expr: &Expression) -> String {
    PurePrinter::new(true).print(expr)
}

/// Serializes expressions to compact protocol JSON.
pub fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string(value)
}

/// Serializes expressions to protocol JSON with 2-space indentation.
pub fn to_json_pretty<T: serde::Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}
