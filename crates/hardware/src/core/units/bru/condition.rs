//! Branch condition evaluation.

/// Condition deciding whether a control transfer is taken.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BranchCondition {
    /// `lhs == rhs`.
    Eq,
    /// `lhs != rhs`.
    Ne,
    /// `lhs < rhs`, signed.
    Lt,
    /// `lhs >= rhs`, signed.
    Ge,
    /// `lhs < rhs`, unsigned.
    Ltu,
    /// `lhs >= rhs`, unsigned.
    Geu,
    /// Unconditional.
    Always,
    /// Never taken.
    #[default]
    Never,
}

impl BranchCondition {
    /// Evaluates the condition on two signed operands.
    ///
    /// # Arguments
    ///
    /// * `lhs` - Left operand.
    /// * `rhs` - Right operand. Unsigned conditions reinterpret both operands as `u32`.
    ///
    /// # Returns
    ///
    /// `true` if the transfer is taken.
    pub const fn evaluate(self, lhs: i32, rhs: i32) -> bool {
        match self {
            Self::Eq => lhs == rhs,
            Self::Ne => lhs != rhs,
            Self::Lt => lhs < rhs,
            Self::Ge => lhs >= rhs,
            Self::Ltu => (lhs as u32) < (rhs as u32),
            Self::Geu => (lhs as u32) >= (rhs as u32),
            Self::Always => true,
            Self::Never => false,
        }
    }
}
