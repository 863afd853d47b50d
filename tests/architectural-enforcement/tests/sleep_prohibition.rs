//! Integration Test: Sleep Prohibition
//!
//! **Policy**: Production code MUST NOT call sleep methods. Reconciliation is
//! driven by source notifications; pacing in the demo uses
//! `tokio::time::interval`.

use architectural_enforcement::{find_violations, report};

#[test]
fn test_no_sleep_in_production_code() {
    let violations =
        find_violations(|code| code.contains("::sleep(") || code.contains(".sleep("));
    report("Sleep calls found in production code", &violations);
}
