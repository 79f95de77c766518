/// A rewrite rule that fired during simplification.
///
/// Each variant names the identity that was applied. Steps are reported in the order the rules
/// fired, with the steps of the left operand of a node before those of its right operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    /// Two numbers were combined into one.
    FoldNumbers,

    /// A function of a number was replaced by its value.
    FoldFunction,

    /// `a+0 = a`
    AddZero,

    /// `a+a = 2a`
    AddSame,

    /// `a-0 = a`
    SubtractZero,

    /// `a-a = 0`
    SubtractSame,

    /// `a*0 = 0`
    MultiplyZero,

    /// `a*1 = a`
    MultiplyOne,

    /// `a*a = a^2`
    MultiplySame,

    /// `a/1 = a`
    DivideOne,

    /// `a/a = 1`
    DivideSame,

    /// `0/a = 0`
    DivideZero,

    /// `a%1 = 0`
    ModuloOne,

    /// `a%a = 0`
    ModuloSame,

    /// `0%a = 0`
    ModuloZero,

    /// `a^0 = 1`
    PowerZero,

    /// `a^1 = a`
    PowerOne,

    /// `1^a = 1`
    OnePower,

    /// `i*i = -1`
    ISquared,

    /// `i^(4n) = 1`
    I0,

    /// `i^(4n+1) = i`
    I1,

    /// `i^(4n+2) = -1`
    I2,

    /// `i^(4n+3) = -i`
    I3,

    /// `e^(iπc)` at a multiple of `π/2` was replaced by `1`, `i`, `-1` or `-i`.
    EulerIdentity,

    /// `e^(iπc) = e^(i(c mod 2)π)`
    EulerNormalize,

    /// `Σ(a, b, c) = (b - a + 1)c`
    SumConstant,

    /// `Σ(0, n, i) = n(n-1)/2`
    SumIndex,
}
