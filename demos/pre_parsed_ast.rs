use safecalc_rs::ast::{normalize, Evaluator, Parser};

fn main() {
    pretty_env_logger::init();

    let expression = "2 * PI * 6371";
    let ast = normalize(expression)
        .and_then(|normalized| Parser::parse_expression(&normalized))
        .expect("Failed to parse");

    let evaluator = Evaluator::new();
    match evaluator.evaluate(&ast) {
        Ok(result) => println!("Result: {}", result),
        Err(err) => println!("Error: {}", err),
    }
}
