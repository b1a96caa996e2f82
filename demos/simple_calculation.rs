use log::debug;
use safecalc_rs::{calculate, Calculator};

fn main() {
    pretty_env_logger::init();

    debug!("supported: {:?}", Calculator::supported_functions());

    for expression in [
        "2 + 2",
        "2^10",
        "15 * (4 + 3) / sqrt(25)",
        "factorial(5)",
        "round(pi, 3)",
        "sqrt(-1)",
        "1/0",
        "__import__('os')",
    ] {
        let calculation = calculate(expression);
        match calculation.to_json() {
            Ok(json) => println!("{}", json),
            Err(err) => println!("Error: {}", err),
        }
    }
}
