//! formwix CLI
//!
//! Command-line tool for checking form configurations, running
//! submissions against them, and rendering them to HTML.

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use formwix::config::ThemeOverride;
use formwix::schema::WEAK_PASSWORDS;
use formwix::{
    CompiledSchema, CrossFieldPass, ErrorMap, FormConfig, FormController, FormValues, MemoryStore,
    Rulebook, SchemaCompiler, SubmitOutcome, SubmitState,
};
use formwix_html::{render_form, Theme};
use serde_json::json;
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

/// Declarative forms from JSON configurations.
#[derive(Parser)]
#[command(name = "formwix")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    /// Extra common passwords to reject, one per line.
    #[arg(long, env = "FORMWIX_WEAK_PASSWORDS")]
    weak_passwords: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a configuration and report problems.
    Check {
        /// Form configuration (JSON).
        config: PathBuf,

        /// Also validate these values and print the errors as JSON.
        #[arg(short = 'i', long)]
        values: Option<PathBuf>,
    },

    /// List the compiled rules of every field.
    Schema {
        /// Form configuration (JSON).
        config: PathBuf,
    },

    /// Validate values and run a submission.
    Submit {
        /// Form configuration (JSON).
        config: PathBuf,

        /// Values to submit (JSON object keyed by field name).
        #[arg(short = 'i', long)]
        values: Option<PathBuf>,

        /// Set a single text value, as `name=value`.
        #[arg(short, long = "set", value_parser = parse_assignment)]
        set: Vec<(String, String)>,
    },

    /// Render a configuration to HTML.
    Render {
        /// Form configuration (JSON).
        config: PathBuf,

        /// Values to render (JSON object keyed by field name).
        #[arg(short = 'i', long)]
        values: Option<PathBuf>,

        /// Errors to render (JSON object keyed by field name).
        #[arg(short, long)]
        errors: Option<PathBuf>,

        /// Validate the values and render the resulting errors.
        #[arg(long, conflicts_with = "errors")]
        validate: bool,

        /// Theme slot overrides (JSON object keyed by slot).
        #[arg(short, long)]
        theme: Option<PathBuf>,

        /// Render the form as it looks while submitting.
        #[arg(long)]
        submitting: bool,

        /// Write the HTML to a file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn parse_assignment(arg: &str) -> Result<(String, String), String> {
    match arg.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(format!("expected name=value, got `{arg}`")),
    }
}

fn read_text(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let json = read_text(path)?;
    serde_json::from_str(&json).with_context(|| format!("failed to parse {}", path.display()))
}

fn load_config(path: &Path) -> anyhow::Result<FormConfig> {
    FormConfig::from_path(path)
        .with_context(|| format!("invalid form configuration {}", path.display()))
}

fn load_values(
    config: &FormConfig,
    path: Option<&Path>,
    assignments: Vec<(String, String)>,
) -> anyhow::Result<FormValues> {
    let mut values = config.default_values.clone();
    if let Some(path) = path {
        let given: FormValues = read_json(path)?;
        for (name, value) in given.iter() {
            values.set(name, value.clone());
        }
    }
    for (name, value) in assignments {
        values.set(name, value);
    }
    Ok(values)
}

fn build_compiler(weak_passwords: Option<&Path>) -> anyhow::Result<SchemaCompiler> {
    let Some(path) = weak_passwords else {
        return Ok(SchemaCompiler::default());
    };
    let list = read_text(path)?;
    let extra: Vec<&str> = list.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
    debug!(count = extra.len(), "Loaded weak passwords");
    let rulebook =
        Rulebook::default().with_weak_passwords(WEAK_PASSWORDS.iter().copied().chain(extra));
    Ok(SchemaCompiler::new(rulebook))
}

async fn submit(
    compiler: &SchemaCompiler,
    config: FormConfig,
    values: FormValues,
) -> anyhow::Result<()> {
    let submitted: Rc<RefCell<Option<FormValues>>> = Rc::new(RefCell::new(None));
    let captured = Rc::clone(&submitted);
    let store = Rc::new(RefCell::new(MemoryStore::from_config(&config)));
    let controller = FormController::with_compiler(compiler, config, store, move |values, _utils| {
        let captured = Rc::clone(&captured);
        async move {
            *captured.borrow_mut() = Some(values);
            Ok(())
        }
    })?;

    for (name, value) in values.iter() {
        controller.set_value(name, value.clone());
    }

    match controller.submit().await? {
        SubmitOutcome::Submitted => {
            let values = submitted.borrow_mut().take().unwrap_or_default();
            info!(fields = values.len(), "Form submitted");
            let report = json!({ "status": "submitted", "values": values });
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
        SubmitOutcome::Rejected(errors) => {
            let report = json!({ "status": "rejected", "errors": errors });
            println!("{}", serde_json::to_string_pretty(&report)?);
            bail!("submission rejected with {} error(s)", errors.len())
        }
        SubmitOutcome::Busy => bail!("a submission is already running"),
    }
}

fn validate(schema: &CompiledSchema, cross: &CrossFieldPass, values: &FormValues) -> ErrorMap {
    let mut errors = schema.validate(values).errors;
    errors.merge(cross.run(values));
    errors
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let compiler = build_compiler(cli.weak_passwords.as_deref())?;

    match cli.command {
        Commands::Check { config, values } => {
            let form = load_config(&config)?;
            let schema = compiler.compile(&form.fields)?;
            let cross = CrossFieldPass::from_config(&form);
            info!(
                fields = schema.len(),
                cross_field_rules = cross.len(),
                "Configuration {} is valid",
                config.display()
            );

            if let Some(path) = values {
                let values = load_values(&form, Some(&path), Vec::new())?;
                let errors = validate(&schema, &cross, &values);
                println!("{}", serde_json::to_string_pretty(&errors)?);
                if !errors.is_empty() {
                    bail!("{} field(s) failed validation", errors.len());
                }
            }
        }

        Commands::Schema { config } => {
            let form = load_config(&config)?;
            let schema = compiler.compile(&form.fields)?;

            println!("\nFields:");
            println!("{:-<60}", "");
            for field in form.fields.iter() {
                let Some(compiled) = schema.get(&field.name) else {
                    continue;
                };
                println!(
                    " {} ({}, {}{}) {}",
                    compiled.name(),
                    field.kind.type_name(),
                    compiled.base().name(),
                    if compiled.is_optional() { "" } else { ", required" },
                    compiled.check_codes().join(" > ")
                );
            }
            println!();
        }

        Commands::Submit { config, values, set } => {
            let form = load_config(&config)?;
            let values = load_values(&form, values.as_deref(), set)?;
            submit(&compiler, form, values).await?;
        }

        Commands::Render {
            config,
            values,
            errors,
            validate: run_validation,
            theme,
            submitting,
            output,
        } => {
            let form = load_config(&config)?;
            let values = load_values(&form, values.as_deref(), Vec::new())?;
            let errors = match errors {
                Some(path) => read_json(&path)?,
                None if run_validation => {
                    let schema = compiler.compile(&form.fields)?;
                    validate(&schema, &CrossFieldPass::from_config(&form), &values)
                }
                None => ErrorMap::new(),
            };
            let theme = match theme {
                Some(path) => Theme::default().merge(&read_json::<ThemeOverride>(&path)?),
                None => Theme::default(),
            };
            let state = if submitting {
                SubmitState::Submitting
            } else {
                SubmitState::Idle
            };

            let html = render_form(&form, &values, &errors, &theme, state);
            match output {
                Some(path) => {
                    std::fs::write(&path, &html)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    info!("Wrote {}", path.display());
                }
                None => println!("{html}"),
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use formwix::FieldValue;

    use super::*;

    #[test]
    fn test_parse_assignment() {
        assert_eq!(
            parse_assignment("email=a=b@example.com").unwrap(),
            ("email".to_string(), "a=b@example.com".to_string())
        );
        assert_eq!(parse_assignment("name=").unwrap(), ("name".to_string(), String::new()));
        assert!(parse_assignment("=value").is_err());
        assert!(parse_assignment("novalue").is_err());
    }

    #[test]
    fn test_load_values_layers_defaults() {
        let config = FormConfig::from_json_str(
            r#"{ "fields": [], "defaultValues": { "a": "default", "b": "kept" } }"#,
        )
        .unwrap();
        let assignments = vec![("a".to_string(), "set".to_string())];
        let values = load_values(&config, None, assignments).unwrap();
        assert_eq!(values.get("a"), Some(&FieldValue::from("set")));
        assert_eq!(values.get("b"), Some(&FieldValue::from("kept")));
    }
}
