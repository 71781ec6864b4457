//! Krylov method selection for a solver node.
//!
//! The Krylov type is an axis independent of the preconditioner: any node may
//! pair any `KspType` with any `PcType`. Nothing here runs a solve; the type is
//! inert configuration that the defaulting rules recommend and the user edits.

option_enum! {
    /// Enum representing the available Krylov solver types.
    pub enum KspType: "ksp type" {
        /// Apply the preconditioner only
        Preonly => "preonly",
        /// Preconditioned Richardson iteration
        Richardson => "richardson",
        /// Chebyshev iteration (typical multigrid smoother)
        Chebyshev => "chebyshev",
        /// Conjugate Gradient (CG) method (for SPD matrices)
        Cg => "cg",
        /// Restarted GMRES
        Gmres => "gmres",
        /// Flexible GMRES (FGMRES)
        Fgmres => "fgmres",
        /// BiConjugate Gradient Stabilized (BiCGStab)
        Bicgstab => "bcgs",
        /// Conjugate Gradient Squared (CGS)
        Cgs => "cgs",
        /// Transpose-Free QMR (TFQMR)
        Tfqmr => "tfqmr",
        /// Minimal Residual (MINRES), symmetric indefinite
        Minres => "minres",
        /// Quasi-Minimal Residual (QMR)
        Qmr => "qmr",
    }
}

impl KspType {
    /// Methods whose theory assumes a symmetric operator.
    pub fn requires_symmetry(self) -> bool {
        matches!(self, KspType::Cg | KspType::Minres)
    }
}
