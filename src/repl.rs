use crate::runner::{self, Mode};
use std::io::{self, Write};

/// Interactive read-eval-print loop. Each line runs independently; there is
/// no state carried between lines because the evaluator holds none.
pub fn start(mode: Mode) {
    println!("Kea Interpreter v0.1.0");
    println!("Type 'exit' or press Ctrl+C to quit");
    println!();

    loop {
        print!(">> ");
        io::stdout().flush().unwrap();

        let mut line = String::new();
        match io::stdin().read_line(&mut line) {
            Ok(0) => {
                // EOF reached (Ctrl+D or piped input ended)
                println!();
                break;
            }
            Ok(_) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                if line == "exit" || line == "quit" {
                    println!("Goodbye!");
                    break;
                }

                runner::run(line, None, mode);
            }
            Err(error) => {
                eprintln!("Error reading input: {}", error);
                break;
            }
        }
    }
}
