use serde::{Deserialize, Serialize};

use crate::ast::{Literal, Multiplicity, wire::WireExpression};

/// Node of the expression tree handed to the query evaluator.
///
/// The builder only ever constructs these; evaluation happens downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "serde_json::Value", into = "WireExpression")]
pub enum Expression {
    /// Reference to a bound lambda parameter
    ///
    /// # Example
    /// ```text
    /// $x
    /// ```
    Variable(Variable),

    /// Typed constant
    Literal(Literal),

    /// Column read through a typed accessor
    ///
    /// # Example
    /// ```text
    /// $x.getInteger('qty')
    /// ```
    Property(AppliedProperty),

    /// Function application
    ///
    /// # Example
    /// ```text
    /// greaterThan($x.getInteger('qty'), 10)
    /// ```
    Function(AppliedFunction),

    /// Anonymous function
    ///
    /// # Example
    /// ```text
    /// {x|isEmpty($x.getString('name'), '')}
    /// ```
    Lambda(Lambda),

    /// Ordered collection of expressions
    ///
    /// # Example
    /// ```text
    /// [asc('trader'), desc('qty')]
    /// ```
    Collection(Collection),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppliedProperty {
    /// Accessor name, e.g. `getString`
    pub property: String,
    /// Declared type of the column being read
    pub class: String,
    /// Row variable followed by the column-name literal
    pub parameters: Vec<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppliedFunction {
    pub function: String,
    pub parameters: Vec<Expression>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiplicity: Option<Multiplicity>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lambda {
    #[serde(with = "crate::ast::wire::lambda_parameters")]
    pub parameters: Vec<Variable>,
    /// First element is the return expression
    pub body: Vec<Expression>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiplicity: Option<Multiplicity>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub values: Vec<Expression>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiplicity: Option<Multiplicity>,
}

impl Variable {
    pub fn new(name: impl Into<String>) -> Self {
        Variable { name: name.into() }
    }
}

impl Expression {
    pub fn var(name: impl Into<String>) -> Self {
        Expression::Variable(Variable::new(name))
    }

    pub fn string(value: impl Into<String>) -> Self {
        Expression::Literal(Literal::String(value.into()))
    }

    pub fn literal(literal: impl Into<Literal>) -> Self {
        Expression::Literal(literal.into())
    }

    /// Function application with no multiplicity attached.
    pub fn function(name: impl Into<String>, parameters: Vec<Expression>) -> Self {
        Expression::Function(AppliedFunction {
            function: name.into(),
            parameters,
            multiplicity: None,
        })
    }

    /// Function application yielding exactly one value.
    pub fn function_one(name: impl Into<String>, parameters: Vec<Expression>) -> Self {
        Expression::Function(AppliedFunction {
            function: name.into(),
            parameters,
            multiplicity: Some(Multiplicity::PureOne),
        })
    }

    pub fn property(
        property: impl Into<String>,
        class: impl Into<String>,
        parameters: Vec<Expression>,
    ) -> Self {
        Expression::Property(AppliedProperty {
            property: property.into(),
            class: class.into(),
            parameters,
        })
    }

    pub fn lambda(
        parameters: Vec<Variable>,
        body: Vec<Expression>,
        multiplicity: Option<Multiplicity>,
    ) -> Self {
        Expression::Lambda(Lambda {
            parameters,
            body,
            multiplicity,
        })
    }

    pub fn collection(values: Vec<Expression>) -> Self {
        Expression::Collection(Collection {
            values,
            multiplicity: None,
        })
    }

    /// Name of the applied function, if this is a function application.
    pub fn function_name(&self) -> Option<&str> {
        match self {
            Expression::Function(f) => Some(&f.function),
            _ => None,
        }
    }

    /// Parameters of a function application or property access; empty otherwise.
    pub fn parameters(&self) -> &[Expression] {
        match self {
            Expression::Function(f) => &f.parameters,
            Expression::Property(p) => &p.parameters,
            _ => &[],
        }
    }
}

impl From<Variable> for Expression {
    fn from(v: Variable) -> Self {
        Expression::Variable(v)
    }
}

impl From<Literal> for Expression {
    fn from(l: Literal) -> Self {
        Expression::Literal(l)
    }
}
