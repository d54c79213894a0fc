#[test]
fn genu_error_ui() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/genu_error_pass.rs");
    t.pass("tests/ui/genu_error_context.rs");
}
