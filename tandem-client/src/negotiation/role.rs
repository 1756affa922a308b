/// Fixed per-session tie-break assignment. The room's first occupant is
/// polite; the joiner is impolite and originates the initial offer. When
/// both sides offer at once, the impolite side's offer wins.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Role {
    Polite,
    Impolite,
}
