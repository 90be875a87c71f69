use rand::Rng;

/// Render `num/den` as a decimal with exactly `digits` fraction digits.
/// `den` must divide `10^digits`.
pub fn fraction_to_decimal(num: u64, den: u64, digits: usize) -> String {
    let scale = 10u64.pow(digits as u32);
    assert_eq!(scale % den, 0, "{num}/{den} has no {digits}-digit decimal form");

    let scaled = num * (scale / den);
    format!(
        "{}.{:0width$}",
        scaled / scale,
        scaled % scale,
        width = digits
    )
}

/// A short string over the characters that matter to value grammars, so
/// random inputs hit near misses as often as matches.
pub fn random_value<R: Rng>(rng: &mut R) -> String {
    const ALPHABET: &[u8] = b"0123456789012345.,:/ -NSEWQaz";

    let len = rng.gen_range(0..12);
    (0..len)
        .map(|_| char::from(ALPHABET[rng.gen_range(0..ALPHABET.len())]))
        .collect()
}

#[test]
fn decimal_form() {
    assert_eq!(fraction_to_decimal(5, 2, 1), "2.5");
    assert_eq!(fraction_to_decimal(41, 20, 2), "2.05");
    assert_eq!(fraction_to_decimal(3, 1, 3), "3.000");
}
