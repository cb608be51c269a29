use calc::*;

const PROMPT: &str = "> ";

fn main() -> Result<(), rustyline::error::ReadlineError> {
    init_tracing();

    let mut rl = rustyline::DefaultEditor::new()?;
    let options = Options::default();

    loop {
        match rl.readline(PROMPT) {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                rl.add_history_entry(line.as_str())?;

                let outcome = evaluate_with(line.as_bytes(), options);
                if let Err(error) = &outcome {
                    // Point at the offending column of the line just typed
                    eprintln!("{}^", " ".repeat(PROMPT.len() + error.offset() - 1));
                    eprintln!("{error}");
                }
                print!("{}", render(&outcome));
            }
            Err(error) => {
                println!("Bye! ({error})");
                break;
            }
        }
    }

    Ok(())
}
