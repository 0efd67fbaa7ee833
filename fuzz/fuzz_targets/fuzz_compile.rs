use afl::fuzz;
use parlc::CodegenConfig;

fn main() {
    let config = CodegenConfig::default();
    fuzz!(|data: &[u8]| {
        if let Ok(input) = std::str::from_utf8(data) {
            // Anything the analyzer accepts must generate cleanly
            if let Err(e) = parlc::compile(input, &config) {
                assert!(!e.is_internal(), "{}", e);
            }
        }
    });
}
