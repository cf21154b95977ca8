#[test]
fn gateway_error_ui() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/gateway_error_pass.rs");
    t.pass("tests/ui/gateway_error_status.rs");
}
