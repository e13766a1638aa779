//! Resolves a catbuffer schema and prints the resulting models.
//!
//! Run with: `cargo run --example resolve -- [schema.yaml] [java|typescript|python|cpp] [--json]`

use catbuffer::prelude::*;
use std::path::Path;

const SAMPLE_SCHEMA: &str = include_str!("schemas/transfer.yaml");

fn print_class(class: &ClassModel) {
    match &class.super_class {
        Some(base) => println!("class {} extends {}", class.generated_name, base.generated_name),
        None => println!("class {}", class.generated_name),
    }
    for attribute in &class.attributes {
        let marker = if attribute.is_super {
            "super"
        } else if attribute.is_inherited {
            "inherited"
        } else if attribute.is_inline {
            "inline"
        } else {
            ""
        };
        println!(
            "    {:<28} {:<12} {:<28} {}",
            attribute.name,
            format!("{:?}", attribute.kind),
            attribute.generated_type,
            marker
        );
    }
    for variant in &class.constructor_variants {
        let arguments: Vec<&str> = variant.provided().collect();
        match (&variant.discriminant, &variant.value) {
            (Some(discriminant), Some(value)) => {
                println!("    new[{discriminant} = {value}]({})", arguments.join(", "));
            }
            _ => println!("    new({})", arguments.join(", ")),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let json = args.iter().any(|a| a == "--json");
    let positional: Vec<&String> = args.iter().filter(|a| !a.starts_with("--")).collect();

    let language: Language = positional.get(1).map_or(Ok(Language::Java), |l| l.parse())?;
    let schema = match positional.first() {
        Some(path) => parse_schema_file(Path::new(path.as_str()))?,
        None => parse_schema(SAMPLE_SCHEMA)?,
    };

    let config = GeneratorConfig::default();
    let compiled = Generator::new(&schema, &config, language).compile()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&compiled)?);
        return Ok(());
    }

    for artifact in compiled.artifacts() {
        match artifact {
            Artifact::Type(model) => {
                println!("type {} = {} ({} bytes)", model.generated_name, model.generated_type, model.size);
            }
            Artifact::Enum(model) => {
                println!("enum {} : {}", model.generated_name, model.generated_type);
                for value in &model.values {
                    println!("    {} = {}", value.constant_name, value.value);
                }
            }
            Artifact::Class(model) => print_class(model),
        }
    }
    if !compiled.skipped().is_empty() {
        println!("skipped: {}", compiled.skipped().join(", "));
    }
    Ok(())
}
