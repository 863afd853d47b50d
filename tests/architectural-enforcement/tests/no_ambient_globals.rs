//! Integration Test: No Ambient Globals
//!
//! The wallet and auth sources reach the reconciler through an injected
//! `SessionContext` owned by the composition root. Production code MUST NOT
//! keep UI-facing state in mutable globals.

use architectural_enforcement::{find_violations, report};

#[test]
fn test_no_mutable_globals_in_production_code() {
    let violations = find_violations(|code| {
        code.contains("static mut ")
            || code.contains("thread_local!")
            || code.contains("lazy_static!")
    });
    report("Mutable global state found in production code", &violations);
}
