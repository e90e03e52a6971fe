//! The parse-tree types produced by [`parser`](crate::parser) and mutated by
//! [`normalizer`](crate::normalizer).
//!
//! The notation interleaves three nesting levels — groups, actions, events — each carrying its
//! own signed repetition quantity. Rather than expand a chain's quantity into physical copies (a
//! `^{99}` exponent would make that infeasible), every level keeps its quantity as a first-class
//! field and the quantity flows through period/cardinality arithmetic symbolically.

/// A single throw: a value, a destination-hand offset, and a repetition quantity.
///
/// `offset` is the raw count of trailing `x` markers, not yet reduced modulo the hand count;
/// [`semantics::validate_offsets`](crate::semantics::validate_offsets) is what checks it against
/// `hands_effective`. `quantity` is the exponent attached directly after this event inside a
/// multiplex bracket (see the grammar note in `parser`); it defaults to 1 when no `^` follows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Event {
    pub value: i64,
    pub offset: u32,
    pub quantity: i64,
}

impl Event {
    pub fn new(value: i64, offset: u32, quantity: i64) -> Self {
        Self {
            value,
            offset,
            quantity,
        }
    }
}

/// A multiplex: the set of throws a single hand makes on a single beat.
///
/// A bare (non-bracketed) throw is represented the same way as a bracketed one, as an `Action`
/// holding exactly one `Event`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Action {
    pub events: Vec<Event>,
}

impl Action {
    pub fn single(event: Event) -> Self {
        Self {
            events: vec![event],
        }
    }
}

/// One synchronous "tuple" of per-hand actions, plus how many trailing actions are suppressed.
///
/// `is_tuple` remembers whether this group was written with explicit `(...)` syntax in the
/// source; it has no semantic effect on validity or period/cardinality, but the re-serialiser
/// (`printer`) needs it to tell a single-hand explicit tuple like `(3)` apart from a bare `3` —
/// both end up with exactly one action after normalisation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Group {
    pub actions: Vec<Action>,
    pub suppression: u32,
    pub quantity: i64,
    pub is_tuple: bool,
    /// The hand index assigned to an implicit (non-tuple) group by the rotating counter in
    /// `semantics::infer_hands`. Unused (and left at 0) for explicit-tuple groups, whose actions
    /// already carry positional hand indices.
    pub hand_index: u32,
}

impl Group {
    pub fn implicit(action: Action) -> Self {
        Self {
            actions: vec![action],
            suppression: 0,
            quantity: 1,
            is_tuple: false,
            hand_index: 0,
        }
    }

    pub fn tuple(actions: Vec<Action>, suppression: u32) -> Self {
        Self {
            actions,
            suppression,
            quantity: 1,
            is_tuple: true,
            hand_index: 0,
        }
    }

    /// Beats consumed by one repetition of this group.
    pub fn step(&self) -> i64 {
        self.actions.len() as i64 - self.suppression as i64
    }

    /// Structural equality for periodicity checks: same shape and quantity, ignoring the
    /// purely-cosmetic `is_tuple`/`hand_index` bookkeeping.
    pub fn content_eq(&self, other: &Group) -> bool {
        self.actions == other.actions
            && self.suppression == other.suppression
            && self.quantity == other.quantity
    }
}

/// A full parsed pattern: an ordered list of groups, plus the inferred hand count.
///
/// `hands` is `None` until an explicit synchronous tuple is seen anywhere in the pattern; a
/// pattern with no explicit tuple is one-handed (`hands_effective() == 1`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pattern {
    pub groups: Vec<Group>,
    pub hands: Option<u32>,
}

impl Pattern {
    pub fn hands_effective(&self) -> u32 {
        self.hands.unwrap_or(1)
    }
}
