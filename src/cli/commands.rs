use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use strsim::levenshtein;

use std::path::PathBuf;

use crate::schema::{self, Schema, VariableKind};
use crate::store::Session;

use super::exit_codes;
use super::output::{
    self, AppliesWhen, DescriptionsData, OutputMode, RelationshipsData, SchemaPathData, ShowData,
    ShowValue, ShowVariable, StaleSelection, VerifyData, VisibleData,
};

#[derive(Parser)]
#[command(name = "varform")]
#[command(about = "Conditional form evaluation: schemas, selections, and relationships")]
#[command(version)]
pub struct Cli {
    /// Path to schema file (overrides VARFORM_SCHEMA env var and default location)
    #[arg(long, global = true)]
    pub schema: Option<PathBuf>,

    /// Select values before evaluating: "VAR=VALUE" or "VAR=V1,V2" (repeatable)
    #[arg(short, long, global = true, action = clap::ArgAction::Append)]
    pub select: Vec<String>,

    /// Output in JSON format (auto-enabled when stdout is piped)
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Force text output even when stdout is piped
    #[arg(long, global = true, conflicts_with = "json")]
    pub no_json: bool,

    /// Suppress all output on success (errors still go to stderr)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the whole form as rendered under the current selections
    Show,

    /// Check whether a variable is visible and list its visible values
    Visible {
        /// Variable name
        variable: String,

        /// Output one value name per line (ideal for piping to fzf/xargs)
        #[arg(long)]
        names: bool,
    },

    /// Show the description text a variable displays right now
    Descriptions {
        /// Variable name
        variable: String,

        /// Annotate conditional descriptions with the condition gating them
        #[arg(short, long)]
        explain: bool,
    },

    /// Show related and incompatible values implied by the current selections
    Relationships,

    /// Verify the schema file for errors
    Verify,

    /// Schema file management
    Schema {
        #[command(subcommand)]
        command: SchemaCommands,
    },

    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum SchemaCommands {
    /// Show schema file path
    Path,
    /// Show the current schema document
    Show,
    /// Show an example schema document
    Example,
    /// Write the example schema to the schema path
    Init {
        /// Overwrite an existing schema file
        #[arg(long, short)]
        force: bool,
    },
}

/// parse one --select argument of the form "VAR=VALUE" or "VAR=V1,V2"
fn parse_select(arg: &str) -> Result<(String, Vec<String>)> {
    let (variable, values) = arg
        .split_once('=')
        .ok_or_else(|| anyhow!("invalid --select '{}': expected VAR=VALUE", arg))?;

    let variable = variable.trim();
    if variable.is_empty() {
        return Err(anyhow!("invalid --select '{}': empty variable name", arg));
    }

    let values: Vec<String> = values
        .split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
        .collect();

    Ok((variable.to_string(), values))
}

/// suggest close variable names for a typo (distance <= 2 or prefix match)
fn suggest_variables(query: &str, schema: &Schema) -> Vec<String> {
    let query_lower = query.to_lowercase();

    let mut candidates: Vec<(usize, String)> = schema
        .variable_names()
        .filter_map(|name| {
            let name_lower = name.to_lowercase();
            let distance = levenshtein(&query_lower, &name_lower);
            if distance <= 2 || name_lower.starts_with(&query_lower) {
                Some((distance, name.to_string()))
            } else {
                None
            }
        })
        .collect();

    candidates.sort();
    candidates.into_iter().take(3).map(|(_, name)| name).collect()
}

/// load the schema and apply --select flags to a fresh session
fn build_session(cli: &Cli, output_mode: OutputMode) -> Result<Session> {
    let path = schema::resolve_path(cli.schema.as_deref())?;
    let schema = match schema::load(&path) {
        Ok(schema) => schema,
        Err(e) => {
            if output_mode.is_json() {
                output::print_json_error(exit_codes::SCHEMA_ERROR, &format!("{:#}", e));
                std::process::exit(exit_codes::SCHEMA_ERROR);
            }
            return Err(e);
        }
    };

    let mut session = Session::with_schema(schema);
    for arg in &cli.select {
        let (variable, values) = match parse_select(arg) {
            Ok(parsed) => parsed,
            Err(e) => {
                if output_mode.is_json() {
                    output::print_json_error(exit_codes::INVALID_ARGS, &e.to_string());
                    std::process::exit(exit_codes::INVALID_ARGS);
                }
                return Err(e);
            }
        };
        session.set_selection(variable, values);
    }
    Ok(session)
}

/// error out for an unknown variable, with typo suggestions
fn variable_not_found(name: &str, session: &Session, output_mode: OutputMode) -> anyhow::Error {
    let suggestions = suggest_variables(name, session.schema());
    let message = format!("variable '{}' not found in schema", name);

    if output_mode.is_json() {
        output::print_json_error_with_suggestions(
            exit_codes::VARIABLE_NOT_FOUND,
            &message,
            suggestions,
        );
        std::process::exit(exit_codes::VARIABLE_NOT_FOUND);
    }

    if suggestions.is_empty() {
        anyhow!("{}", message)
    } else {
        anyhow!("{}. Did you mean: {}?", message, suggestions.join(", "))
    }
}

pub fn execute(cli: Cli) -> Result<()> {
    let output_mode = OutputMode::from_flags(cli.json, cli.no_json, cli.quiet, false);

    match &cli.command {
        Commands::Show => {
            let session = build_session(&cli, output_mode)?;

            let variables: Vec<ShowVariable> = session
                .visible_variables()
                .into_iter()
                .map(|variable| {
                    let values = match variable.kind {
                        VariableKind::Enum => session
                            .visible_values(&variable.name)
                            .unwrap_or_default()
                            .into_iter()
                            .filter_map(|v| {
                                let name = v.name.clone()?;
                                let selected =
                                    session.selections().contains(&variable.name, &name);
                                Some(ShowValue {
                                    name,
                                    description: v.description.clone(),
                                    selected,
                                })
                            })
                            .collect(),
                        VariableKind::Info => Vec::new(),
                    };
                    let descriptions = match variable.kind {
                        VariableKind::Info => session
                            .visible_descriptions(&variable.name)
                            .unwrap_or_default(),
                        VariableKind::Enum => Vec::new(),
                    };
                    ShowVariable {
                        name: variable.name.clone(),
                        kind: variable.kind.to_string(),
                        description: variable.description.clone(),
                        values,
                        descriptions,
                    }
                })
                .collect();

            let stale_selections: Vec<StaleSelection> = session
                .stale_selections()
                .into_iter()
                .map(|(variable, value)| StaleSelection { variable, value })
                .collect();

            match output_mode {
                OutputMode::Json => {
                    output::print_json(&ShowData {
                        variables,
                        stale_selections,
                    });
                }
                OutputMode::Quiet => {}
                OutputMode::Text | OutputMode::Names => {
                    for variable in &variables {
                        match variable.kind.as_str() {
                            "info" => {
                                println!("{}:", variable.name);
                                for line in &variable.descriptions {
                                    println!("  {}", line);
                                }
                            }
                            _ => {
                                let description = variable
                                    .description
                                    .as_ref()
                                    .map(|d| format!(" - {}", d))
                                    .unwrap_or_default();
                                println!("{}{}", variable.name, description);
                                for value in &variable.values {
                                    let marker = if value.selected { "*" } else { " " };
                                    println!("  [{}] {}", marker, value.name);
                                }
                            }
                        }
                    }
                    for stale in &stale_selections {
                        eprintln!(
                            "Warning: selected value '{}' for '{}' is no longer available",
                            stale.value, stale.variable
                        );
                    }
                }
            }
            Ok(())
        }

        Commands::Visible { variable, names } => {
            // the visible command has its own --names flag
            let output_mode = OutputMode::from_flags(cli.json, cli.no_json, cli.quiet, *names);
            let session = build_session(&cli, output_mode)?;

            let Some(visible) = session.is_visible(variable) else {
                return Err(variable_not_found(variable, &session, output_mode));
            };

            let values: Vec<String> = if visible {
                session
                    .visible_values(variable)
                    .unwrap_or_default()
                    .into_iter()
                    .filter_map(|v| v.name.clone())
                    .collect()
            } else {
                Vec::new()
            };

            match output_mode {
                OutputMode::Names => {
                    for name in &values {
                        println!("{}", name);
                    }
                }
                OutputMode::Json => {
                    output::print_json(&VisibleData {
                        variable: variable.clone(),
                        visible,
                        values,
                    });
                }
                OutputMode::Quiet => {}
                OutputMode::Text => {
                    if visible {
                        println!("✓ '{}' is visible", variable);
                        for name in &values {
                            println!("  - {}", name);
                        }
                    } else {
                        println!("✗ '{}' is hidden under the current selections", variable);
                    }
                }
            }

            // scripts branch on the exit code without parsing output
            if !visible {
                std::process::exit(exit_codes::NOT_VISIBLE);
            }
            Ok(())
        }

        Commands::Descriptions { variable, explain } => {
            let session = build_session(&cli, output_mode)?;

            let Some(descriptions) = session.visible_descriptions(variable) else {
                return Err(variable_not_found(variable, &session, output_mode));
            };

            let applies_when = if *explain {
                session.applies_when(variable)
            } else {
                Vec::new()
            };
            let applies_when: Vec<AppliesWhen> = applies_when
                .into_iter()
                .map(|(description, condition)| AppliesWhen {
                    description,
                    condition,
                })
                .collect();

            match output_mode {
                OutputMode::Json => {
                    output::print_json(&DescriptionsData {
                        variable: variable.clone(),
                        descriptions,
                        applies_when,
                    });
                }
                OutputMode::Quiet => {}
                OutputMode::Text | OutputMode::Names => {
                    for line in &descriptions {
                        println!("{}", line);
                    }
                    for entry in &applies_when {
                        println!("  (applies when: {})", entry.condition);
                    }
                }
            }
            Ok(())
        }

        Commands::Relationships => {
            let session = build_session(&cli, output_mode)?;
            let relationships = session.relationships();

            match output_mode {
                OutputMode::Json => {
                    output::print_json(&RelationshipsData { relationships });
                }
                OutputMode::Quiet => {}
                OutputMode::Text | OutputMode::Names => {
                    for (variable, relationship) in &relationships {
                        if relationship.related.is_empty() && relationship.incompatible.is_empty()
                        {
                            continue;
                        }
                        println!("{}:", variable);
                        for value in &relationship.related {
                            println!("  related:      {}", value);
                        }
                        for value in &relationship.incompatible {
                            println!("  incompatible: {}", value);
                        }
                    }
                }
            }
            Ok(())
        }

        Commands::Verify => {
            let path = schema::resolve_path(cli.schema.as_deref())?;
            let loaded = schema::load(&path);

            let findings = match &loaded {
                Ok(schema) => schema::lint(schema),
                Err(e) => vec![format!("{:#}", e)],
            };

            if output_mode.is_json() {
                output::print_json(&VerifyData {
                    valid: findings.is_empty(),
                    findings: findings.clone(),
                });
                if !findings.is_empty() {
                    std::process::exit(exit_codes::SCHEMA_ERROR);
                }
                return Ok(());
            }

            if findings.is_empty() {
                if !output_mode.is_quiet() {
                    println!("✓ Schema is valid: {}", path.display());
                }
                Ok(())
            } else {
                println!(
                    "✗ Schema has {} finding(s): {}",
                    findings.len(),
                    path.display()
                );
                println!();
                for finding in &findings {
                    println!("  - {}", finding);
                }
                Err(anyhow!("schema validation failed"))
            }
        }

        Commands::Schema { command } => match command {
            SchemaCommands::Path => {
                let path = schema::resolve_path(cli.schema.as_deref())?;
                if output_mode.is_json() {
                    output::print_json(&SchemaPathData {
                        path: path.display().to_string(),
                    });
                } else if !output_mode.is_quiet() {
                    println!("{}", path.display());
                }
                Ok(())
            }
            SchemaCommands::Show => {
                let path = schema::resolve_path(cli.schema.as_deref())?;
                let schema = schema::load(&path)?;
                let json = serde_json::to_string_pretty(&schema.to_doc())
                    .context("failed to serialize schema")?;
                println!("{}", json);
                Ok(())
            }
            SchemaCommands::Example => {
                let json = serde_json::to_string_pretty(&schema::example().to_doc())
                    .context("failed to serialize example schema")?;
                println!("{}", json);
                Ok(())
            }
            SchemaCommands::Init { force } => {
                let path = schema::resolve_path(cli.schema.as_deref())?;
                if path.exists() && !force {
                    return Err(anyhow!(
                        "schema file already exists: {} (use --force to overwrite)",
                        path.display()
                    ));
                }
                schema::save(&path, &schema::example())?;
                if !output_mode.is_quiet() && !output_mode.is_json() {
                    println!("Wrote example schema to {}", path.display());
                }
                if output_mode.is_json() {
                    output::print_json(&SchemaPathData {
                        path: path.display().to_string(),
                    });
                }
                Ok(())
            }
        },

        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(*shell, &mut cmd, "varform", &mut std::io::stdout());
            Ok(())
        }
    }
}
