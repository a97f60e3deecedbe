use std::process::ExitCode;

fn main() -> ExitCode {
    embed_cli::init_tracing();

    let matches = embed_cli::command().get_matches();
    match embed_cli::execute(&matches) {
        Ok(output) => {
            println!("{}", output.text);
            if output.success {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(2)
        }
    }
}
