//! Tally CLI - formula evaluation tool

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tally_expr::{eval_with, resolve, Bindings, Value};

#[derive(Parser)]
#[command(name = "tally")]
#[command(author, version, about = "Formula evaluation and resolution tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a single formula
    Eval {
        /// Formula text, e.g. "2+3*4^2"
        formula: String,

        /// Variable binding as NAME=VALUE (repeatable)
        #[arg(short, long = "set", value_name = "NAME=VALUE")]
        set: Vec<String>,
    },

    /// Resolve a system of named formulas
    Solve {
        /// Formula definition as NAME=TEXT (repeatable)
        #[arg(short, long = "formula", value_name = "NAME=TEXT")]
        formula: Vec<String>,

        /// Base variable binding as NAME=VALUE (repeatable)
        #[arg(short, long = "set", value_name = "NAME=VALUE")]
        set: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Eval { formula, set } => eval_command(&formula, &set),
        Commands::Solve { formula, set } => solve_command(&formula, &set),
    }
}

fn eval_command(formula: &str, definitions: &[String]) -> Result<()> {
    let bindings = parse_bindings(definitions)?;
    let result =
        eval_with(formula, &bindings).with_context(|| format!("cannot evaluate '{formula}'"))?;
    println!("{result}");
    Ok(())
}

fn solve_command(definitions: &[String], binding_definitions: &[String]) -> Result<()> {
    let bindings = parse_bindings(binding_definitions)?;

    let mut formulas = BTreeMap::new();
    for definition in definitions {
        let (name, text) = definition
            .split_once('=')
            .with_context(|| format!("formula '{definition}' must look like NAME=TEXT"))?;
        formulas.insert(name.trim().to_string(), text.to_string());
    }

    let resolution =
        resolve(&formulas, &bindings).context("cannot resolve the formula system")?;

    for name in &resolution.order {
        if let Some(value) = resolution.values.get(name) {
            println!("{name} = {value}");
        }
    }
    Ok(())
}

fn parse_bindings(definitions: &[String]) -> Result<Bindings> {
    let mut bindings = Bindings::new();
    for definition in definitions {
        let (name, value) = definition
            .split_once('=')
            .with_context(|| format!("binding '{definition}' must look like NAME=VALUE"))?;
        let value = match value {
            "true" => Value::Boolean(true),
            "false" => Value::Boolean(false),
            _ => Value::Number(value.parse().with_context(|| {
                format!("value in '{definition}' is neither a number nor true/false")
            })?),
        };
        bindings.insert(name.trim().to_string(), value);
    }
    Ok(bindings)
}
