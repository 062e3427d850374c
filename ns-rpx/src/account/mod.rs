//! Account session, cards and the two-step card authentication flow.
//!
//! A [`Session`] performs the Basic-auth login and owns one [`Card`] per
//! card on the account. Cards resolve their selection token lazily and
//! cache their normalized state; the multi-step dance is invisible to the
//! caller.

mod card;
mod session;
mod types;

pub use card::Card;
pub use session::{Session, SessionConfig};
pub use types::{
    CardEntry, CardList, SelectCard, TransactionLeg, TransactionList, TransactionRecord,
    TransactionStation,
};
