// mica: parse an expression and print its fully parenthesised form

mod buf;
mod syntax;

use std::fs;
use std::path::Path;

use syntax::ast::print_expr;
use syntax::intern::Interner;
use syntax::parse::parse_expression_str;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    let program_name = args.get(0).map(|s| s.as_str()).unwrap_or("mica");

    if args.len() < 2 {
        eprintln!("Error: No input provided");
        eprintln!();
        eprintln!("Usage: {} <file>", program_name);
        eprintln!("       {} -e <expression>", program_name);
        eprintln!();
        eprintln!("Examples:");
        eprintln!("  {} -e '2*3+4*5'          # prints (+ (* 2 3) (* 4 5))", program_name);
        eprintln!("  {} expr.mica             # parse an expression from a file", program_name);
        std::process::exit(1);
    }

    let source = if args[1] == "-e" {
        match args.get(2) {
            Some(expr) => expr.clone(),
            None => {
                eprintln!("Error: -e requires an expression argument");
                eprintln!("Usage: {} -e <expression>", program_name);
                std::process::exit(1);
            }
        }
    } else {
        let file = &args[1];
        if !Path::new(file).exists() {
            eprintln!("Error: File '{}' not found", file);
            eprintln!("Usage: {} <file>", program_name);
            std::process::exit(1);
        }
        fs::read_to_string(file)?
    };

    let mut interner = Interner::new();
    let expr = match parse_expression_str(source.trim_end(), &mut interner) {
        Ok(expr) => expr,
        Err(e) => {
            eprintln!("Parse error: {}", e);
            std::process::exit(1);
        }
    };

    println!("{}", print_expr(&expr, &interner));

    Ok(())
}
