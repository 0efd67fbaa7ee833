use afl::fuzz;

fn main() {
    fuzz!(|data: &[u8]| {
        if let Ok(input) = std::str::from_utf8(data) {
            if let Ok(tokens) = parlc::lex(input) {
                let _ = parlc::Parser::parse(&tokens);
            }
        }
    });
}
