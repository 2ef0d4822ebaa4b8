//! AFL target: any UTF-8 input must produce a value or an error, never a
//! panic. Build with `cargo afl build --features fuzz`.

use afl::fuzz;

fn main() {
    fuzz!(|data: &[u8]| {
        if let Ok(line) = std::str::from_utf8(data) {
            let _ = rpncalc::evaluate(line);
            let _ = rpncalc::evaluate_rpn(line);
        }
    });
}
