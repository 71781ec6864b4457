//! Solver-type vocabulary for configuration trees.
//!
//! This module names every preconditioner (`PC`) and Krylov (`KSP`) type a
//! configuration node can select, together with the type-specific parameters
//! each preconditioner carries.
//!
//! Modules:
//! - [`ksp_context`]: the `KspType` enumeration.
//! - [`pc_context`]: the `PcType` tag, its dispatch table, and `PcParams`.
//!
//! # References
//! - PETSc documentation: https://petsc.org/release/docs/manualpages/PC/

/// Declares a fieldless option enum whose variants have fixed PETSc names.
macro_rules! option_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident : $kind:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Every variant, in menu order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn name(self) -> &'static str {
                match self {
                    $( $name::$variant => $text ),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.name())
            }
        }

        impl std::str::FromStr for $name {
            type Err = crate::error::TreeError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $name::ALL
                    .iter()
                    .copied()
                    .find(|v| v.name() == s)
                    .ok_or_else(|| crate::error::TreeError::UnknownOption {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }
    };
}

pub mod ksp_context;
pub use ksp_context::KspType;
pub mod pc_context;
pub use pc_context::{Arity, FieldSplitType, GamgType, MgType, PcParams, PcType, PcTypeInfo};
