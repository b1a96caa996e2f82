use safecalc_rs::{Calculator, CalculatorConfig};

fn main() {
    pretty_env_logger::init();

    let expressions: Vec<String> = (1..=10)
        .map(|n| format!("factorial({}) / 2^{}", n, n))
        .chain(["log(0)".to_string(), "sin(pi / 6)".to_string()])
        .collect();

    let calculator =
        Calculator::with_config(CalculatorConfig::default().with_max_expression_length(64));
    for (i, calculation) in calculator.calculate_batch(&expressions).iter().enumerate() {
        match (&calculation.result, &calculation.error) {
            (Some(result), _) => println!("Result {}: {} = {}", i, calculation.expression, result),
            (_, Some(error)) => println!("Result {}: {} -> {}", i, calculation.expression, error),
            _ => unreachable!("a calculation always carries a result or an error"),
        }
    }
}
