use subtle::ConstantTimeEq;

///
/// Compares two byte strings for equality in constant time based on the input
///
/// Every byte of the common prefix is compared even after a mismatch is found, so the running time only depends on the lengths, never on the position of the first differing byte.
/// Slices of different lengths are unequal. The lengths themselves are not treated as secret.
///
/// ## Examples
///
/// Compare two byte arrays for equality:
/// ```
/// let x = [0,1,2,3,4,5,6,7,8];
/// let y = [0,1,2,3,4,5,6,7,8];
/// assert!(lc_crypto_key::cmp::eq(&x,&y))
/// ```
///
/// Compare two byte arrays for equality:
/// ```
/// let x = [0,1,2,3,4,5,6,7,8];
/// let y = [0,1,2,3,4,5,6,7,9];
/// assert!(!lc_crypto_key::cmp::eq(&x,&y))
/// ```
pub fn eq(a: &[u8], b: &[u8]) -> bool {
    let len = a.len().min(b.len());

    let prefix = a[..len].ct_eq(&b[..len]);
    let same_len = (a.len() as u64).ct_eq(&(b.len() as u64));

    (prefix & same_len).into()
}
