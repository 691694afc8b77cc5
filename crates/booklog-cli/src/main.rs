use booklog_cli::{command, init_logging, run, usage_exit_code, Invocation};
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let matches = match command().try_get_matches() {
        Ok(matches) => matches,
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(usage_exit_code(&e));
        }
    };

    let invocation = match Invocation::from_matches(&matches) {
        Ok(invocation) => invocation.with_env_overrides(),
        Err(e) => {
            eprintln!("Error: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = init_logging(&invocation.logging) {
        eprintln!("Error: {e}");
        return ExitCode::FAILURE;
    }

    match run(&invocation).await {
        Ok(report) => {
            println!("{report}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
