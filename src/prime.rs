//! Capacity normalization. Table capacities are kept prime so the
//! quadratic probe sequence cycles through distinct slots and simple
//! modular hashing spreads keys across buckets.

/// Returns true if `n` is prime. 2 and 3 are prime; 0, 1 and every
/// larger even number are not. Trial-divides by odd factors up to √n.
pub fn is_prime(n: usize) -> bool {
    if n == 2 || n == 3 {
        return true;
    }
    if n < 2 || n % 2 == 0 {
        return false;
    }

    let mut factor = 3;
    while factor * factor <= n {
        if n % factor == 0 {
            return false;
        }
        factor += 2;
    }
    true
}

/// Returns the closest prime at or above `n`, never an even number.
/// An even `n` is first bumped to `n + 1`, then the search advances in
/// steps of 2, so the result is always odd (the minimum result is 3).
pub fn next_prime(n: usize) -> usize {
    let mut candidate = if n % 2 == 0 { n + 1 } else { n };
    while !is_prime(candidate) {
        candidate += 2;
    }
    candidate
}
