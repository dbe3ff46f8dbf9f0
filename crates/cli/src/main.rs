use crate::{
    commands::{Commands, QueryArgs},
    error::CliError,
};
use clap::Parser;
use filter_engine::{
    CompiledQuery, CompilerSettings, DEFAULT_PER_PAGE, FieldRegistry, PageRequest, QueryCompiler,
    QueryTarget, RegistryConfig,
};
use filter_syntax::{Lexer, TreeBuilder};
use query_builder::{DialectKind, SelectQuery, ast::common::TableRef};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod commands;
mod error;
mod output;

#[derive(Parser)]
#[command(
    name = "qfilter",
    version = "0.1.0",
    about = "Compile filter and sort query parameters"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<(), CliError> {
    // Logs go to stderr so stdout stays machine readable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Tokens { filter } => {
            let tokens = Lexer::new().tokenize(&filter);
            output::print_tokens(&tokens);
        }
        Commands::Tree {
            filter,
            max_depth,
            json,
        } => {
            let builder = max_depth.map_or_else(TreeBuilder::new, TreeBuilder::with_max_depth);
            let tree = builder.build(Lexer::new().tokenize(&filter)).inspect_err(|err| {
                eprintln!("{}", err.format_error(&filter));
            })?;

            match (tree, json) {
                (Some(tree), true) => output::print_json(&tree)?,
                (Some(tree), false) => println!("{tree}"),
                (None, _) => info!("Filter is empty, no tree"),
            }
        }
        Commands::Compile { query, json } => {
            let (registry, settings) = load_registry(&query.registry)?;
            let compiled = compile(&registry, settings, &query)?;

            if json {
                output::print_json(&compiled)?;
            } else {
                print_compiled(&compiled);
            }
        }
        Commands::Sql {
            query,
            table,
            alias,
            dialect,
            page,
            per_page,
            count,
        } => {
            let dialect: DialectKind = dialect.parse()?;
            let (registry, settings) = load_registry(&query.registry)?;
            let compiled = compile(&registry, settings, &query)?;

            let mut select = SelectQuery::new(table_ref(&table));
            if let Some(alias) = &alias {
                select = select.alias(alias);
            }
            compiled.apply_to(&mut select);

            if page.is_some() || per_page.is_some() {
                let request = PageRequest::new(
                    page.unwrap_or(1),
                    per_page.unwrap_or(DEFAULT_PER_PAGE),
                );
                select.set_offset(request.offset());
                select.set_limit(request.limit());
            }

            let statement = if count {
                select.render_count(dialect.dialect())
            } else {
                select.render(dialect.dialect())
            };
            output::print_json(&statement)?;
        }
    }

    Ok(())
}

fn load_registry(path: &str) -> Result<(FieldRegistry, CompilerSettings), CliError> {
    let source = std::fs::read_to_string(path)?;
    let config = RegistryConfig::from_json(&source)?;
    let registry = config.build()?;

    info!(path, fields = registry.len(), "Loaded field registry");
    Ok((registry, config.settings))
}

fn compile(
    registry: &FieldRegistry,
    settings: CompilerSettings,
    query: &QueryArgs,
) -> Result<CompiledQuery, CliError> {
    let compiled = QueryCompiler::new(registry)
        .with_settings(settings)
        .compile(query.filter.as_deref(), query.sort.as_deref())?;
    Ok(compiled)
}

/// `schema.table` or `table`.
fn table_ref(name: &str) -> TableRef {
    match name.split_once('.') {
        Some((schema, table)) => TableRef {
            schema: Some(schema.to_string()),
            name: table.to_string(),
        },
        None => TableRef {
            schema: None,
            name: name.to_string(),
        },
    }
}

fn print_compiled(compiled: &CompiledQuery) {
    match &compiled.predicate {
        Some(predicate) => println!("{:<10} {}", "Filter", predicate),
        None => println!("{:<10} (none)", "Filter"),
    }
    for order in &compiled.order_by {
        println!("{:<10} {} {}", "Order by", order.column, order.direction.as_sql());
    }
}
