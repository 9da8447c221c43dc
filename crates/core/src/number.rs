//! Numeric helpers used for container sizing
//!
//! - `next_prime`: bucket counts for [`Table`](crate::Table)
//! - `next_power_of_two`: capacity steps for [`TextBuffer`](crate::TextBuffer)

/// Smallest prime `>= n`
///
/// Returns 2 for every `n <= 2`. Saturates at the largest prime below
/// `usize::MAX` rather than wrapping.
pub fn next_prime(n: usize) -> usize {
    let mut candidate = n.max(2);
    loop {
        if is_prime(candidate) {
            return candidate;
        }
        match candidate.checked_add(1) {
            Some(next) => candidate = next,
            None => return largest_prime_below(candidate),
        }
    }
}

/// Smallest power of two strictly greater than `n`
///
/// The buffer asks for room for `n` bytes plus a spare slot, so an exact
/// power of two is bumped to the next one. Saturates at the top power of
/// two representable in `usize`.
pub fn next_power_of_two(n: usize) -> usize {
    match n.checked_add(1) {
        Some(m) => m.checked_next_power_of_two().unwrap_or(1 << (usize::BITS - 1)),
        None => 1 << (usize::BITS - 1),
    }
}

/// Trial division over odd divisors up to `sqrt(n)`
pub fn is_prime(n: usize) -> bool {
    if n < 2 {
        return false;
    }
    if n < 4 {
        return true;
    }
    if n % 2 == 0 {
        return false;
    }
    let mut divisor = 3usize;
    while divisor <= n / divisor {
        if n % divisor == 0 {
            return false;
        }
        divisor += 2;
    }
    true
}

fn largest_prime_below(mut n: usize) -> usize {
    while n > 2 && !is_prime(n) {
        n -= 1;
    }
    n
}
