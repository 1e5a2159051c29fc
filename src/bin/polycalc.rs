use std::{
    io::{self, BufWriter},
    process::ExitCode,
};

use log::error;
use polycalc::calc::Calculator;

fn main() -> ExitCode {
    env_logger::init();

    let stdin = io::stdin();
    let stdout = BufWriter::new(io::stdout().lock());
    let res = Calculator::new().run(stdin.lock(), stdout, io::stderr().lock());
    match res {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
