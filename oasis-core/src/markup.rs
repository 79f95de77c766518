//! Conversion between expressions and a MathML-shaped markup tree.
//!
//! An operator node becomes an `apply` element, whose first child names the operator and whose
//! remaining children are the operands. A bounded operator also names its bound variable in a
//! `bvar` element before the operand, and wraps its bounds, when present, in `lowlimit` and
//! `uplimit` elements after it:
//!
//! ```text
//! <apply>
//!   <sum/>
//!   <bvar><ci>i</ci></bvar>
//!   <ci>i</ci>
//!   <lowlimit><cn type="constant">0</cn></lowlimit>
//!   <uplimit><cn type="constant">4</cn></uplimit>
//! </apply>
//! ```
//!
//! This module only deals with the in-memory [`Element`] tree; reading and writing it as text is
//! left to a markup library.

use crate::{
    error::{MalformedInput, Result},
    expr::{BinOp, Bounded, BoundedOp, Constant, Expression, Primary, UnaryOp},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An element of a markup tree.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Element {
    /// The name of the element, such as `apply`.
    pub name: String,

    /// The attributes of the element, in order.
    pub attributes: Vec<(String, String)>,

    /// The text content of the element, if any.
    pub text: Option<String>,

    /// The child elements, in order.
    pub children: Vec<Element>,
}

impl Element {
    /// Creates an empty element with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Self::default() }
    }

    /// Sets the text content of the element.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Adds an attribute to the element.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Adds a child to the element.
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Returns the value of the attribute with the given name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

fn binary_name(op: BinOp) -> &'static str {
    match op {
        BinOp::Add => "plus",
        BinOp::Subtract => "minus",
        BinOp::Multiply => "times",
        BinOp::Divide => "divide",
        BinOp::Modulo => "rem",
        BinOp::Exponent => "power",
    }
}

fn bounded_name(op: BoundedOp) -> &'static str {
    match op {
        BoundedOp::Sum => "sum",
        BoundedOp::Fourier => "fourier",
        BoundedOp::Laplace => "laplace",
    }
}

/// The operator named by the first child of an `apply` element.
enum Operator {
    Unary(UnaryOp),
    Binary(BinOp),
    Bounded(BoundedOp),
}

impl Operator {
    fn from_name(name: &str) -> Option<Self> {
        let op = match name {
            "sin" => Self::Unary(UnaryOp::Sin),
            "cos" => Self::Unary(UnaryOp::Cos),
            "tan" => Self::Unary(UnaryOp::Tan),
            "arctan" => Self::Unary(UnaryOp::ArcTan),
            "ln" => Self::Unary(UnaryOp::Ln),
            "floor" => Self::Unary(UnaryOp::Floor),
            "plus" => Self::Binary(BinOp::Add),
            "minus" => Self::Binary(BinOp::Subtract),
            "times" => Self::Binary(BinOp::Multiply),
            "divide" => Self::Binary(BinOp::Divide),
            "rem" => Self::Binary(BinOp::Modulo),
            "power" => Self::Binary(BinOp::Exponent),
            "sum" => Self::Bounded(BoundedOp::Sum),
            "fourier" => Self::Bounded(BoundedOp::Fourier),
            "laplace" => Self::Bounded(BoundedOp::Laplace),
            _ => return None,
        };
        Some(op)
    }
}

fn serialize_primary(primary: &Primary) -> Element {
    match primary {
        Primary::Constant(constant) if constant.is_pi() => Element::new("pi"),
        Primary::Constant(constant) if constant.is_e() => Element::new("exponentiale"),
        Primary::Constant(constant) => {
            let element = Element::new("cn")
                .with_attribute("type", "constant")
                .with_text(constant.value().to_string());
            match constant.name() {
                Some(name) => element.with_attribute("name", name),
                None => element,
            }
        },
        Primary::Variable(name) => Element::new("ci").with_text(name.as_str()),
        Primary::Real(value) => Element::new("cn").with_text(value.to_string()),
        Primary::Imaginary => Element::new("imaginaryi"),
        Primary::Impulse => Element::new("impulse"),
    }
}

/// Converts an expression into a markup tree.
pub fn serialize(expr: &Expression) -> Element {
    match expr {
        Expression::Primary(primary) => serialize_primary(primary),
        Expression::Unary(op, operand) => Element::new("apply")
            .with_child(Element::new(op.name()))
            .with_child(serialize(operand)),
        Expression::Binary(op, lhs, rhs) => Element::new("apply")
            .with_child(Element::new(binary_name(*op)))
            .with_child(serialize(lhs))
            .with_child(serialize(rhs)),
        Expression::Bounded(bounded) => {
            let mut element = Element::new("apply")
                .with_child(Element::new(bounded_name(bounded.op)))
                .with_child(Element::new("bvar").with_child(
                    Element::new("ci").with_text(bounded.var.as_str()),
                ))
                .with_child(serialize(&bounded.operand));
            if let Some(lower) = bounded.lower_bound() {
                element = element.with_child(Element::new("lowlimit").with_child(serialize(lower)));
            }
            if let Some(upper) = bounded.upper_bound() {
                element = element.with_child(Element::new("uplimit").with_child(serialize(upper)));
            }
            element
        },
    }
}

fn malformed(reason: impl Into<String>) -> crate::error::Error {
    MalformedInput::new(reason).into()
}

/// Returns the trimmed text content of the element, failing if there is none.
fn text_of(element: &Element) -> Result<&str> {
    element.text.as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .ok_or_else(|| malformed(format!("`{}` element has no text", element.name)))
}

fn parse_number(element: &Element) -> Result<f64> {
    let text = text_of(element)?;
    text.parse()
        .map_err(|_| malformed(format!("`{}` is not a number", text)))
}

/// Fails if the element has any children.
fn expect_leaf(element: &Element) -> Result<()> {
    if element.children.is_empty() {
        Ok(())
    } else {
        Err(malformed(format!("`{}` element must not have children", element.name)))
    }
}

/// Returns the single child of a wrapper element such as `lowlimit`.
fn only_child(element: &Element) -> Result<&Element> {
    match element.children.as_slice() {
        [child] => Ok(child),
        _ => Err(malformed(format!("`{}` element must have exactly one child", element.name))),
    }
}

fn deserialize_bounded(op: BoundedOp, args: &[Element]) -> Result<Expression> {
    let mut args = args.iter().peekable();

    let var = match args.next_if(|arg| arg.name == "bvar") {
        Some(bvar) => {
            let ci = only_child(bvar)?;
            if ci.name != "ci" {
                return Err(malformed("`bvar` element must wrap a `ci` element"));
            }
            text_of(ci)?.to_string()
        },
        None => op.default_var().to_string(),
    };

    let operand = args.next()
        .ok_or_else(|| malformed(format!("`{}` is missing its operand", bounded_name(op))))?;
    let operand = deserialize(operand)?;

    let lower = args.next_if(|arg| arg.name == "lowlimit")
        .map(|lower| deserialize(only_child(lower)?))
        .transpose()?;
    let upper = args.next_if(|arg| arg.name == "uplimit")
        .map(|upper| deserialize(only_child(upper)?))
        .transpose()?;

    if let Some(extra) = args.next() {
        return Err(malformed(format!(
            "unexpected `{}` element in `{}`",
            extra.name,
            bounded_name(op),
        )));
    }

    Ok(Expression::Bounded(Bounded {
        op,
        var,
        operand: Box::new(operand),
        lower: lower.map(Box::new),
        upper: upper.map(Box::new),
    }))
}

fn deserialize_apply(element: &Element) -> Result<Expression> {
    let Some((head, args)) = element.children.split_first() else {
        return Err(malformed("`apply` element has no operator"));
    };
    expect_leaf(head)?;
    let op = Operator::from_name(&head.name)
        .ok_or_else(|| malformed(format!("unknown operator `{}`", head.name)))?;

    match op {
        Operator::Unary(op) => match args {
            [operand] => Ok(Expression::unary(op, deserialize(operand)?)),
            _ => Err(malformed(format!("`{}` takes exactly one operand", head.name))),
        },
        Operator::Binary(op) => match args {
            [lhs, rhs] => Ok(Expression::binary(op, deserialize(lhs)?, deserialize(rhs)?)),
            _ => Err(malformed(format!("`{}` takes exactly two operands", head.name))),
        },
        Operator::Bounded(op) => deserialize_bounded(op, args),
    }
}

/// Converts a markup tree into an expression.
///
/// Fails with [`MalformedInput`] if the tree does not have the shape produced by [`serialize`].
pub fn deserialize(element: &Element) -> Result<Expression> {
    match element.name.as_str() {
        "apply" => deserialize_apply(element),
        "cn" => {
            expect_leaf(element)?;
            let value = parse_number(element)?;
            match (element.attribute("type"), element.attribute("name")) {
                (Some("constant"), Some(name)) => Ok(Constant::named(value, name).into()),
                (Some("constant"), None) => Ok(Expression::constant(value)),
                (None | Some("real"), _) => Ok(Expression::real(value)),
                (Some(other), _) => Err(malformed(format!("unknown number type `{}`", other))),
            }
        },
        "ci" => {
            expect_leaf(element)?;
            Ok(Expression::variable(text_of(element)?))
        },
        "pi" => expect_leaf(element).map(|_| Expression::pi()),
        "exponentiale" => expect_leaf(element).map(|_| Expression::e()),
        "imaginaryi" => expect_leaf(element).map(|_| Expression::imaginary()),
        "impulse" => expect_leaf(element).map(|_| Expression::impulse()),
        other => Err(malformed(format!("unexpected `{}` element", other))),
    }
}

#[cfg(test)]
mod tests {
    use crate::error::Error;
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn apply_layout() {
        let expr = Expression::variable("x") - Expression::real(2.5);
        let expected = Element::new("apply")
            .with_child(Element::new("minus"))
            .with_child(Element::new("ci").with_text("x"))
            .with_child(Element::new("cn").with_text("2.5"));
        assert_eq!(serialize(&expr), expected);
    }

    #[test]
    fn bounded_layout() {
        let expr = Expression::sum(
            Expression::constant(0.0),
            Expression::constant(4.0),
            Expression::variable("i"),
        );
        let element = serialize(&expr);
        let names = element.children.iter()
            .map(|child| child.name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["sum", "bvar", "ci", "lowlimit", "uplimit"]);
        assert_eq!(deserialize(&element).unwrap(), expr);
    }

    #[test]
    fn transforms_without_bounds() {
        let expr = Expression::fourier(Expression::impulse());
        assert_eq!(deserialize(&serialize(&expr)).unwrap(), expr);

        // the bound variable may be left out
        let element = Element::new("apply")
            .with_child(Element::new("laplace"))
            .with_child(Element::new("ci").with_text("t"));
        assert_eq!(deserialize(&element).unwrap(), Expression::laplace(Expression::variable("t")));
    }

    #[test]
    fn constants_keep_their_names() {
        let expr = Expression::named_constant(299792458.0, "c") * Expression::pi()
            + Expression::pow(Expression::e(), Expression::imaginary());
        let roundtrip = deserialize(&serialize(&expr)).unwrap();
        assert_eq!(roundtrip.to_string(), "c * π + e^i");
    }

    #[test]
    fn renamed_pi_is_not_pi() {
        let half_turn = Constant::named(std::f64::consts::PI, "half-turn");
        let element = serialize(&half_turn.clone().into());
        assert_eq!(element.name, "cn");
        assert_eq!(element.attribute("name"), Some("half-turn"));

        let Expression::Primary(Primary::Constant(roundtrip)) = deserialize(&element).unwrap() else {
            unreachable!()
        };
        assert_eq!(roundtrip.name(), Some("half-turn"));
        assert_eq!(serialize(&Expression::e()), Element::new("exponentiale"));
    }

    #[test]
    fn non_finite_numbers() {
        let nan = deserialize(&Element::new("cn").with_text("NaN")).unwrap();
        assert_eq!(nan, Expression::real(f64::NAN));
        assert_eq!(nan.simplify(), Ok(nan.clone()));

        let element = Element::new("apply")
            .with_child(Element::new("times"))
            .with_child(Element::new("cn").with_text("inf"))
            .with_child(Element::new("cn").with_attribute("type", "constant").with_text("NaN"));
        let expr = deserialize(&element).unwrap();
        assert_eq!(deserialize(&serialize(&expr)), Ok(expr.clone()));
        assert_eq!(crate::Simplifier::new().simplify(expr.clone()), Ok(expr));
    }

    #[test]
    fn malformed() {
        let cases = [
            Element::new("apply"),
            Element::new("apply").with_child(Element::new("frobnicate")),
            Element::new("apply")
                .with_child(Element::new("plus"))
                .with_child(Element::new("ci").with_text("x")),
            Element::new("cn").with_text("twelve"),
            Element::new("ci"),
            Element::new("matrix"),
            Element::new("apply")
                .with_child(Element::new("sum"))
                .with_child(Element::new("ci").with_text("i"))
                .with_child(Element::new("uplimit")),
        ];

        for element in cases {
            let result = deserialize(&element);
            assert!(matches!(result, Err(Error::MalformedInput(_))), "{:?} gave {:?}", element, result);
        }
    }
}
