use serde_json::Value;

/// JSON to stdout: pretty on a terminal, one line when piped.
pub fn print_json(value: &Value) {
    let texto = if atty::is(atty::Stream::Stdout) {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    match texto {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("JSON serialization error: {}", e),
    }
}
