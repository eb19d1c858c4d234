//! First-class invariants for game states and transitions.
//!
//! Invariants are logical properties that every committed version (or
//! every committed step) must satisfy. They are testable independently of
//! the contract and are checked by the ledger before publishing.

/// A logical property that must hold for a given value.
pub trait Invariant<S> {
    /// Checks if the invariant holds.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("{}", description)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implemented for tuples of invariants; every member is checked and all
/// violations are reported.
pub trait InvariantSet<S> {
    /// Returns `Ok(())` if all invariants hold, else every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

macro_rules! impl_invariant_set {
    ($($inv:ident),+) => {
        impl<S, $($inv),+> InvariantSet<S> for ($($inv,)+)
        where
            $($inv: Invariant<S>,)+
        {
            fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
                let violations: Vec<_> = [$(($inv::holds(state), $inv::description())),+]
                    .into_iter()
                    .filter(|(holds, _)| !holds)
                    .map(|(_, description)| InvariantViolation::new(description))
                    .collect();

                if violations.is_empty() {
                    Ok(())
                } else {
                    Err(violations)
                }
            }
        }
    };
}

impl_invariant_set!(I1);
impl_invariant_set!(I1, I2);
impl_invariant_set!(I1, I2, I3);
impl_invariant_set!(I1, I2, I3, I4);

pub mod distinct_players;
pub mod mark_balance;
pub mod monotonic_board;
pub mod outcome_consistent;
pub mod turn_consistent;

pub use distinct_players::DistinctPlayersInvariant;
pub use mark_balance::MarkBalanceInvariant;
pub use monotonic_board::MonotonicBoardInvariant;
pub use outcome_consistent::OutcomeConsistentInvariant;
pub use turn_consistent::TurnConsistentInvariant;

/// Invariants every committed game version satisfies.
pub type GameStateInvariants = (
    DistinctPlayersInvariant,
    MarkBalanceInvariant,
    OutcomeConsistentInvariant,
    TurnConsistentInvariant,
);

/// Invariants every committed transition satisfies.
pub type TransitionInvariants = (MonotonicBoardInvariant,);
