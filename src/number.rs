/// Checks whether `suspect` is a well-formed numeric literal: an optional
/// leading `-` followed by digits and at most one `.`.
///
/// A lone `.` passes; it is rejected later when the literal is parsed.
pub fn is_number(suspect: &str) -> bool {
    let digits = suspect.strip_prefix('-').unwrap_or(suspect);

    if digits.is_empty() {
        return false;
    }

    let mut dots = 0;

    for c in digits.chars() {
        match c {
            '.' => dots += 1,
            '0'..='9' => (),
            _ => return false,
        }
    }

    dots <= 1
}
