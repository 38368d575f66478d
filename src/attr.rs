use core::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

macro_rules! double_attrs {
    ($(#[$meta:meta])* $name:ident, $kind:literal, [$($(#[$vmeta:meta])* $variant:ident),* $(,)?]) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant),*
        }

        impl $name {
            /// Every attribute, in the order of the Gurobi reference manual.
            pub const ALL: &'static [$name] = &[$($name::$variant),*];

            /// Gurobi name of the attribute.
            pub fn name(&self) -> &'static str {
                match self {
                    $($name::$variant => stringify!($variant)),*
                }
            }
        }

        impl FromStr for $name {
            type Err = Error;

            /// Case-insensitive lookup by Gurobi name.
            fn from_str(s: &str) -> Result<Self> {
                Self::ALL
                    .iter()
                    .find(|attr| attr.name().eq_ignore_ascii_case(s))
                    .copied()
                    .ok_or_else(|| Error::UnknownAttribute(s.to_string(), $kind))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

double_attrs!(
    /// Numeric attributes of a variable.
    VarAttr,
    "variable",
    [
        /// Lower bound
        LB,
        /// Upper bound
        UB,
        /// Objective coefficient
        Obj,
        /// MIP start value
        Start,
        /// MIP hint value
        VarHintVal,
        /// Value in the current solution
        X,
        /// Value in the solution selected by `SolutionNumber`
        Xn,
        /// Reduced cost
        RC,
        /// Barrier value before crossover
        BarX,
        /// Objective coefficient sensitivity, lower end
        SAObjLow,
        /// Objective coefficient sensitivity, upper end
        SAObjUp,
        /// Lower bound sensitivity, lower end
        SALBLow,
        /// Lower bound sensitivity, upper end
        SALBUp,
        /// Upper bound sensitivity, lower end
        SAUBLow,
        /// Upper bound sensitivity, upper end
        SAUBUp,
        /// Unbounded ray
        UnbdRay,
    ]
);

double_attrs!(
    /// Numeric attributes of a linear constraint.
    ConstrAttr,
    "constraint",
    [
        /// Right-hand side
        RHS,
        /// Dual value
        Pi,
        /// Slack in the current solution
        Slack,
        /// Dual start value
        DStart,
        /// Right-hand side sensitivity, lower end
        SARHSLow,
        /// Right-hand side sensitivity, upper end
        SARHSUp,
        /// Farkas infeasibility proof
        FarkasDual,
    ]
);

/// Comparison between the two sides of a linear constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    /// `<=`
    LessEqual,
    /// `>=`
    GreaterEqual,
    /// `==`
    Equal,
}

impl FromStr for Sense {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "<" | "<=" => Ok(Sense::LessEqual),
            ">" | ">=" => Ok(Sense::GreaterEqual),
            "=" | "==" => Ok(Sense::Equal),
            other => Err(Error::InvalidSense(other.to_string())),
        }
    }
}

impl fmt::Display for Sense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Sense::LessEqual => "<=",
            Sense::GreaterEqual => ">=",
            Sense::Equal => "=",
        })
    }
}
