//! Account name helpers for the colon-separated chart of accounts.

use crate::constants::ACCOUNT_SEPARATOR;

/// The account itself followed by each ancestor, nearest first.
///
/// `parents("Assets:Brokerage:BND")` yields `Assets:Brokerage:BND`,
/// `Assets:Brokerage`, `Assets`.
pub fn parents(account: &str) -> impl Iterator<Item = &str> {
    let mut next = if account.is_empty() {
        None
    } else {
        Some(account)
    };
    std::iter::from_fn(move || {
        let current = next?;
        next = current
            .rfind(ACCOUNT_SEPARATOR)
            .map(|index| &current[..index]);
        Some(current)
    })
}

/// First component of an account name.
pub fn root(account: &str) -> &str {
    account
        .split(ACCOUNT_SEPARATOR)
        .next()
        .unwrap_or(account)
}
