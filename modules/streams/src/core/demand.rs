#[cfg(test)]
mod tests;

/// Reserved demand value meaning effectively unbounded requests.
pub const UNBOUNDED: u64 = u64::MAX;

/// Adds two demand amounts, saturating into the unbounded sentinel.
#[must_use]
pub const fn add_cap(current: u64, amount: u64) -> u64 {
  match current.checked_add(amount) {
    | Some(total) => total,
    | None => UNBOUNDED,
  }
}

/// Multiplies two demand amounts, saturating into the unbounded sentinel.
#[must_use]
pub const fn multiply_cap(lhs: u64, rhs: u64) -> u64 {
  match lhs.checked_mul(rhs) {
    | Some(total) => total,
    | None => UNBOUNDED,
  }
}
