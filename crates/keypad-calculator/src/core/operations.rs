//! The four binary operators and their checked application

use serde::{Deserialize, Serialize};

use crate::core::{CalcError, CalcResult};

/// Type-safe operator enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// Addition (+)
    Add,
    /// Subtraction (-)
    Subtract,
    /// Multiplication (×)
    Multiply,
    /// Division (÷)
    Divide,
}

impl Operation {
    /// All operators in keypad column order
    pub const ALL: [Self; 4] = [Self::Divide, Self::Multiply, Self::Subtract, Self::Add];

    /// Keyboard character for this operator
    #[must_use]
    pub const fn key(self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '*',
            Self::Divide => '/',
        }
    }

    /// Symbol shown on the display and on keypad buttons
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "×",
            Self::Divide => "÷",
        }
    }

    /// Name used in `data-action` attributes
    #[must_use]
    pub const fn action_name(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Subtract => "subtract",
            Self::Multiply => "multiply",
            Self::Divide => "divide",
        }
    }

    /// Parses a keyboard character
    #[must_use]
    pub const fn from_key(c: char) -> Option<Self> {
        match c {
            '+' => Some(Self::Add),
            '-' => Some(Self::Subtract),
            '*' => Some(Self::Multiply),
            '/' => Some(Self::Divide),
            _ => None,
        }
    }

    /// Parses a `data-action` name
    #[must_use]
    pub fn from_action_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.action_name() == name)
    }

    /// Applies the operator without any checks (IEEE semantics)
    #[must_use]
    pub fn apply_unchecked(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            Self::Add => lhs + rhs,
            Self::Subtract => lhs - rhs,
            Self::Multiply => lhs * rhs,
            Self::Divide => lhs / rhs,
        }
    }

    /// Applies the operator, rejecting zero divisors and non-finite results
    pub fn apply(self, lhs: f64, rhs: f64) -> CalcResult<f64> {
        if self == Self::Divide && rhs == 0.0 {
            return Err(CalcError::DivideByZero);
        }
        check_overflow(self.apply_unchecked(lhs, rhs))
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Checks for overflow (infinity or NaN)
fn check_overflow(result: f64) -> CalcResult<f64> {
    if result.is_nan() {
        Err(CalcError::InvalidResult)
    } else if result.is_infinite() {
        Err(CalcError::Overflow)
    } else {
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_operation_keys() {
        assert_eq!(Operation::Add.key(), '+');
        assert_eq!(Operation::Subtract.key(), '-');
        assert_eq!(Operation::Multiply.key(), '*');
        assert_eq!(Operation::Divide.key(), '/');
    }

    #[test]
    fn test_operation_symbols() {
        assert_eq!(Operation::Multiply.symbol(), "×");
        assert_eq!(Operation::Divide.symbol(), "÷");
        assert_eq!(format!("{}", Operation::Add), "+");
    }

    #[test]
    fn test_operation_from_key_roundtrip() {
        for op in Operation::ALL {
            assert_eq!(Operation::from_key(op.key()), Some(op));
        }
        assert_eq!(Operation::from_key('^'), None);
        assert_eq!(Operation::from_key('%'), None);
    }

    #[test]
    fn test_operation_from_action_name() {
        assert_eq!(Operation::from_action_name("add"), Some(Operation::Add));
        assert_eq!(
            Operation::from_action_name("divide"),
            Some(Operation::Divide)
        );
        assert_eq!(Operation::from_action_name("calculate"), None);
    }

    #[test]
    fn test_operation_serde_names() {
        let json = serde_json::to_string(&Operation::Multiply).unwrap();
        assert_eq!(json, "\"multiply\"");
        let op: Operation = serde_json::from_str("\"subtract\"").unwrap();
        assert_eq!(op, Operation::Subtract);
    }

    #[test]
    fn test_apply_basic() {
        assert_eq!(Operation::Add.apply(5.0, 3.0), Ok(8.0));
        assert_eq!(Operation::Subtract.apply(5.0, 3.0), Ok(2.0));
        assert_eq!(Operation::Multiply.apply(5.0, 3.0), Ok(15.0));
        assert_eq!(Operation::Divide.apply(6.0, 3.0), Ok(2.0));
    }

    #[test]
    fn test_apply_divide_by_zero() {
        assert_eq!(
            Operation::Divide.apply(5.0, 0.0),
            Err(CalcError::DivideByZero)
        );
        assert_eq!(
            Operation::Divide.apply(0.0, 0.0),
            Err(CalcError::DivideByZero)
        );
    }

    #[test]
    fn test_apply_divide_by_negative_zero() {
        assert_eq!(
            Operation::Divide.apply(5.0, -0.0),
            Err(CalcError::DivideByZero)
        );
    }

    #[test]
    fn test_apply_overflow() {
        assert_eq!(
            Operation::Multiply.apply(1e200, 1e200),
            Err(CalcError::Overflow)
        );
        assert_eq!(
            Operation::Subtract.apply(-f64::MAX, f64::MAX),
            Err(CalcError::Overflow)
        );
    }

    #[test]
    fn test_apply_unchecked_keeps_infinity() {
        assert!(Operation::Multiply
            .apply_unchecked(1e200, 1e200)
            .is_infinite());
    }

    #[test]
    fn test_check_overflow_nan() {
        assert_eq!(check_overflow(f64::NAN), Err(CalcError::InvalidResult));
    }

    proptest! {
        #[test]
        fn prop_addition_commutative(a in -1e10f64..1e10, b in -1e10f64..1e10) {
            prop_assert_eq!(Operation::Add.apply(a, b), Operation::Add.apply(b, a));
        }

        #[test]
        fn prop_multiply_commutative(a in -1e10f64..1e10, b in -1e10f64..1e10) {
            prop_assert_eq!(Operation::Multiply.apply(a, b), Operation::Multiply.apply(b, a));
        }

        #[test]
        fn prop_divide_nonzero_is_finite(a in -1e10f64..1e10, b in 1e-3f64..1e10) {
            prop_assert!(Operation::Divide.apply(a, b).is_ok());
        }
    }
}
