//! Integration Test: Unwrap Prohibition
//!
//! **Policy**: Production code propagates errors with `?` or surfaces them as
//! data. `unwrap()` and `expect()` are for tests only.

use architectural_enforcement::{find_violations, report};

#[test]
fn test_no_unwrap_in_production_code() {
    let violations =
        find_violations(|code| code.contains(".unwrap()") || code.contains(".expect("));
    report("unwrap()/expect() found in production code", &violations);
}
